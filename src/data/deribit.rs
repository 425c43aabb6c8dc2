//! Deribit public API fetcher
//!
//! Options book summaries, index prices, and perpetual tickers from
//! Deribit's public v2 API. No authentication; everything here is the
//! unauthenticated market-data surface.
//!
//! Deribit quotes `mark_iv` in percent; rows store IV as a decimal
//! fraction, so it is divided by 100 on the way in.

use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::core::{OptionType, PerpRow, QuoteRow, ScanError, ScanResult};

/// Currencies scanned when listing perpetual instruments.
const LISTING_CURRENCIES: [&str; 3] = ["BTC", "ETH", "SOL"];

/// Deribit public API client
pub struct DeribitClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl DeribitClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .build()
                .expect("Failed to create HTTP client"),
            base_url: "https://www.deribit.com/api/v2".to_string(),
        }
    }

    /// Current index price for a currency (e.g. "BTC" -> btc_usd index).
    pub fn index_price(&self, currency: &str) -> ScanResult<f64> {
        let index_name = format!("{}_usd", currency.to_lowercase());
        let result: IndexPriceResult =
            self.get("public/get_index_price", &[("index_name", &index_name)])?;
        Ok(result.index_price)
    }

    /// All listed option summaries for a currency, flattened to rows.
    pub fn option_rows(&self, currency: &str) -> ScanResult<Vec<QuoteRow>> {
        let currency = currency.to_uppercase();
        let summaries: Vec<BookSummary> = self.get(
            "public/get_book_summary_by_currency",
            &[("currency", &currency), ("kind", &"option".to_string())],
        )?;

        let today = Utc::now().date_naive();
        let mut rows = Vec::new();

        for summary in &summaries {
            let Some((expiration, strike, option_type)) =
                parse_instrument_name(&summary.instrument_name)
            else {
                tracing::debug!(
                    "Skipping unparseable Deribit instrument {}",
                    summary.instrument_name
                );
                continue;
            };

            let mut row = QuoteRow::new(
                currency.clone(),
                expiration,
                (expiration - today).num_days(),
                strike,
                option_type,
            );
            row.bid = summary.bid_price;
            row.ask = summary.ask_price;
            row.last = summary.last;
            row.implied_volatility = summary.mark_iv.map(|iv| iv / 100.0);
            row.open_interest = summary.open_interest.map(|oi| oi as u64);
            row.volume = summary.volume.map(|v| v as u64);
            row.underlying_price = summary.underlying_price;
            rows.push(row);
        }

        Ok(rows)
    }

    /// Ticker snapshots for a set of perpetuals ("BTC" -> BTC-PERPETUAL).
    pub fn perp_info(&self, symbols: &[String]) -> ScanResult<Vec<PerpRow>> {
        let mut rows = Vec::new();

        for symbol in symbols {
            let instrument = format!("{}-PERPETUAL", symbol.to_uppercase());
            let ticker: Ticker =
                self.get("public/ticker", &[("instrument_name", &instrument)])?;

            let mut row = PerpRow::new(instrument);
            row.last_price = ticker.last_price;
            row.mark_price = ticker.mark_price;
            row.current_funding = ticker.current_funding;
            row.funding_8h = ticker.funding_8h;
            row.open_interest = ticker.open_interest;
            row.volume_usd = ticker.stats.as_ref().and_then(|s| s.volume_usd);
            row.change_percent = ticker.stats.as_ref().and_then(|s| s.price_change);
            rows.push(row);
        }

        Ok(rows)
    }

    /// List all perpetual contracts across the scanned currencies, with
    /// last price and open interest.
    pub fn perp_instruments(&self) -> ScanResult<Vec<PerpRow>> {
        let mut rows = Vec::new();

        for currency in LISTING_CURRENCIES {
            let summaries: Vec<BookSummary> = self.get(
                "public/get_book_summary_by_currency",
                &[("currency", &currency.to_string()), ("kind", &"future".to_string())],
            )?;

            for summary in summaries {
                if !summary.instrument_name.contains("PERPETUAL") {
                    continue;
                }
                let mut row = PerpRow::new(summary.instrument_name);
                row.last_price = summary.last;
                row.open_interest = summary.open_interest;
                rows.push(row);
            }
        }

        Ok(rows)
    }

    /// GET a public endpoint and unwrap the JSON-RPC envelope.
    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &String)]) -> ScanResult<T> {
        let url = format!("{}/{}", self.base_url, path);

        let envelope: Envelope<T> = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| ScanError::Network(e.to_string()))?
            .json()
            .map_err(|e| ScanError::Data(format!("Failed to parse {}: {}", path, e)))?;

        if let Some(err) = envelope.error {
            return Err(ScanError::Data(format!("Deribit error from {}: {}", path, err)));
        }

        envelope
            .result
            .ok_or_else(|| ScanError::Data(format!("Empty result from {}", path)))
    }
}

impl Default for DeribitClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a Deribit option instrument name, e.g. "BTC-26SEP25-100000-C".
/// Fractional strikes use 'd' as the decimal separator ("XRP...-0d5-P").
fn parse_instrument_name(name: &str) -> Option<(NaiveDate, f64, OptionType)> {
    let parts: Vec<&str> = name.split('-').collect();
    if parts.len() != 4 {
        return None;
    }

    let expiration = parse_expiry(parts[1])?;
    let strike: f64 = parts[2].replace('d', ".").parse().ok()?;
    let option_type = match parts[3] {
        "C" => OptionType::Call,
        "P" => OptionType::Put,
        _ => return None,
    };

    Some((expiration, strike, option_type))
}

/// Parse a DDMMMYY expiry like "26SEP25" (day may be one digit).
fn parse_expiry(s: &str) -> Option<NaiveDate> {
    if s.len() < 6 {
        return None;
    }

    let (day_part, rest) = s.split_at(s.len() - 5);
    let (month_part, year_part) = rest.split_at(3);

    let day: u32 = day_part.parse().ok()?;
    let year: i32 = year_part.parse::<i32>().ok()? + 2000;
    let month = match month_part {
        "JAN" => 1,
        "FEB" => 2,
        "MAR" => 3,
        "APR" => 4,
        "MAY" => 5,
        "JUN" => 6,
        "JUL" => 7,
        "AUG" => 8,
        "SEP" => 9,
        "OCT" => 10,
        "NOV" => 11,
        "DEC" => 12,
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

// Deribit API response structures

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: Option<T>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct IndexPriceResult {
    index_price: f64,
}

#[derive(Debug, Deserialize)]
struct BookSummary {
    instrument_name: String,
    bid_price: Option<f64>,
    ask_price: Option<f64>,
    last: Option<f64>,
    mark_iv: Option<f64>,
    open_interest: Option<f64>,
    volume: Option<f64>,
    underlying_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Ticker {
    last_price: Option<f64>,
    mark_price: Option<f64>,
    current_funding: Option<f64>,
    funding_8h: Option<f64>,
    open_interest: Option<f64>,
    stats: Option<TickerStats>,
}

#[derive(Debug, Deserialize)]
struct TickerStats {
    volume_usd: Option<f64>,
    price_change: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instrument_name() {
        let (expiration, strike, ty) = parse_instrument_name("BTC-26SEP25-100000-C").unwrap();
        assert_eq!(expiration, NaiveDate::from_ymd_opt(2025, 9, 26).unwrap());
        assert!((strike - 100000.0).abs() < 1e-9);
        assert_eq!(ty, OptionType::Call);

        // Single-digit day and put side
        let (expiration, _, ty) = parse_instrument_name("ETH-3JAN26-4000-P").unwrap();
        assert_eq!(expiration, NaiveDate::from_ymd_opt(2026, 1, 3).unwrap());
        assert_eq!(ty, OptionType::Put);

        // Fractional strike
        let (_, strike, _) = parse_instrument_name("XRP-26SEP25-0d5-P").unwrap();
        assert!((strike - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_parse_rejects_futures_and_garbage() {
        assert!(parse_instrument_name("BTC-PERPETUAL").is_none());
        assert!(parse_instrument_name("BTC-26SEP25").is_none());
        assert!(parse_instrument_name("BTC-26XYZ25-100000-C").is_none());
        assert!(parse_instrument_name("BTC-26SEP25-100000-Q").is_none());
    }

    #[test]
    #[ignore] // Requires network
    fn test_index_price() {
        let client = DeribitClient::new();
        let price = client.index_price("BTC").unwrap();
        assert!(price > 0.0);
    }

    #[test]
    #[ignore] // Requires network
    fn test_perp_info() {
        let client = DeribitClient::new();
        let rows = client.perp_info(&["BTC".to_string()]).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].mark_price.unwrap_or(0.0) > 0.0);
    }
}
