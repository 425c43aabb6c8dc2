//! Cboe delayed-quotes fetcher
//!
//! Pulls the full delayed options chain from Cboe's public CDN endpoint.
//! Cboe is the one provider here that ships Greeks with every contract.
//! It reports the underlying under `current_price` (falling back to
//! `close`), which rows expose as `spot_price`.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::core::{OptionType, QuoteRow, ScanError, ScanResult};

/// Cboe delayed quotes client
pub struct CboeClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl CboeClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: "https://cdn.cboe.com/api/global/delayed_quotes/options".to_string(),
        }
    }

    /// Fetch the full chain for a symbol, flattened to rows.
    pub fn option_rows(&self, symbol: &str) -> ScanResult<Vec<QuoteRow>> {
        let url = format!("{}/{}.json", self.base_url, symbol.to_uppercase());

        let response: CboeResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ScanError::Network(e.to_string()))?
            .json()
            .map_err(|e| ScanError::Data(format!("Failed to parse Cboe chain: {}", e)))?;

        let data = response.data;
        let spot = data.current_price.or(data.close);
        let today = Utc::now().date_naive();

        let mut rows = Vec::new();
        for contract in &data.options {
            let Some((expiration, strike, option_type)) = parse_option_symbol(&contract.option)
            else {
                tracing::debug!("Skipping unparseable Cboe symbol {}", contract.option);
                continue;
            };

            let mut row = QuoteRow::new(
                symbol.to_uppercase(),
                expiration,
                (expiration - today).num_days(),
                strike,
                option_type,
            );
            row.bid = contract.bid;
            row.ask = contract.ask;
            row.last = contract.last_trade_price;
            row.implied_volatility = contract.iv;
            row.delta = contract.delta;
            row.gamma = contract.gamma;
            row.theta = contract.theta;
            row.vega = contract.vega;
            row.volume = contract.volume.and_then(|v| u64::try_from(v).ok());
            row.open_interest = contract.open_interest.and_then(|oi| u64::try_from(oi).ok());
            row.spot_price = spot;
            rows.push(row);
        }

        Ok(rows)
    }
}

impl Default for CboeClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an OCC-style option symbol: root + YYMMDD + C/P + strike*1000
/// padded to 8 digits, e.g. "SPY260918C00500000".
fn parse_option_symbol(symbol: &str) -> Option<(NaiveDate, f64, OptionType)> {
    if symbol.len() < 15 {
        return None;
    }

    let (head, strike_part) = symbol.split_at(symbol.len() - 8);
    let (head, type_part) = head.split_at(head.len() - 1);
    let (_root, date_part) = head.split_at(head.len() - 6);

    let option_type = match type_part {
        "C" => OptionType::Call,
        "P" => OptionType::Put,
        _ => return None,
    };

    let yy: i32 = date_part[0..2].parse().ok()?;
    let mm: u32 = date_part[2..4].parse().ok()?;
    let dd: u32 = date_part[4..6].parse().ok()?;
    let expiration = NaiveDate::from_ymd_opt(2000 + yy, mm, dd)?;

    let strike: f64 = strike_part.parse::<u64>().ok()? as f64 / 1000.0;

    Some((expiration, strike, option_type))
}

// Cboe API response structures

#[derive(Debug, Deserialize)]
struct CboeResponse {
    data: CboeData,
}

#[derive(Debug, Deserialize)]
struct CboeData {
    current_price: Option<f64>,
    close: Option<f64>,
    options: Vec<CboeContract>,
}

#[derive(Debug, Deserialize)]
struct CboeContract {
    option: String,
    bid: Option<f64>,
    ask: Option<f64>,
    iv: Option<f64>,
    delta: Option<f64>,
    gamma: Option<f64>,
    theta: Option<f64>,
    vega: Option<f64>,
    volume: Option<i64>,
    open_interest: Option<i64>,
    last_trade_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_option_symbol() {
        let (expiration, strike, ty) = parse_option_symbol("SPY260918C00500000").unwrap();
        assert_eq!(expiration, NaiveDate::from_ymd_opt(2026, 9, 18).unwrap());
        assert!((strike - 500.0).abs() < 1e-12);
        assert_eq!(ty, OptionType::Call);

        // Fractional strike
        let (_, strike, ty) = parse_option_symbol("AAPL261218P00172500").unwrap();
        assert!((strike - 172.5).abs() < 1e-12);
        assert_eq!(ty, OptionType::Put);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_option_symbol("SPY").is_none());
        assert!(parse_option_symbol("SPY260918X00500000").is_none());
        assert!(parse_option_symbol("SPY26AB18C00500000").is_none());
    }

    #[test]
    #[ignore] // Requires network
    fn test_option_rows() {
        let client = CboeClient::new();
        let rows = client.option_rows("SPY").unwrap();
        assert!(!rows.is_empty());
        assert!(rows.iter().any(|r| r.spot_price.is_some()));
    }
}
