//! Yahoo Finance data fetcher
//!
//! Fetches free delayed options chains and daily closes through Yahoo
//! Finance's unofficial API. Yahoo reports IV per contract but no Greeks,
//! so Greek fields stay `None` on rows from this provider.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::core::{OptionType, QuoteRow, ScanError, ScanResult};

/// Expirations fetched per chain request. The reports only ever show the
/// first eight, so there is no point pulling the full two-year strip.
const MAX_EXPIRIES: usize = 8;

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: "https://query1.finance.yahoo.com".to_string(),
        }
    }

    /// Fetch the options chain for every near expiration, flattened to rows.
    pub fn option_rows(&self, symbol: &str) -> ScanResult<Vec<QuoteRow>> {
        let expirations = self.expirations(symbol)?;
        let today = Utc::now().date_naive();

        let mut rows = Vec::new();
        for &expiry_ts in expirations.iter().take(MAX_EXPIRIES) {
            match self.chain_rows(symbol, expiry_ts, today) {
                Ok(mut chain) => rows.append(&mut chain),
                Err(e) => {
                    tracing::warn!("Failed to get chain for ts {}: {}", expiry_ts, e);
                }
            }
        }

        Ok(rows)
    }

    /// Daily close prices, oldest first. Feeds realized-vol calculations.
    pub fn daily_closes(&self, symbol: &str) -> ScanResult<Vec<f64>> {
        let url = format!(
            "{}/v8/finance/chart/{}?range=6mo&interval=1d",
            self.base_url, symbol
        );

        let response: YahooChartResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ScanError::Network(e.to_string()))?
            .json()
            .map_err(|e| ScanError::Data(format!("Failed to parse chart: {}", e)))?;

        let result = response
            .chart
            .result
            .into_iter()
            .flatten()
            .next()
            .ok_or_else(|| ScanError::Data("No chart data returned".into()))?;

        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close.into_iter().flatten().collect())
            .unwrap_or_default();

        Ok(closes)
    }

    /// Available expiration timestamps for a symbol.
    fn expirations(&self, symbol: &str) -> ScanResult<Vec<i64>> {
        let url = format!("{}/v7/finance/options/{}", self.base_url, symbol);

        let response: YahooOptionsResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ScanError::Network(e.to_string()))?
            .json()
            .map_err(|e| ScanError::Data(format!("Failed to parse options: {}", e)))?;

        let chain = response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| ScanError::Data("No options data returned".into()))?;

        Ok(chain.expiration_dates)
    }

    /// One expiration's chain, flattened to rows.
    fn chain_rows(&self, symbol: &str, expiry_ts: i64, today: NaiveDate) -> ScanResult<Vec<QuoteRow>> {
        let url = format!(
            "{}/v7/finance/options/{}?date={}",
            self.base_url, symbol, expiry_ts
        );

        let response: YahooOptionsResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ScanError::Network(e.to_string()))?
            .json()
            .map_err(|e| ScanError::Data(format!("Failed to parse options: {}", e)))?;

        let chain_data = response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| ScanError::Data("No options data returned".into()))?;

        let spot = chain_data.quote.regular_market_price;
        let expiration = DateTime::from_timestamp(expiry_ts, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| ScanError::Data(format!("Bad expiry timestamp {}", expiry_ts)))?;
        let dte = (expiration - today).num_days();

        let mut rows = Vec::new();
        if let Some(options) = chain_data.options.first() {
            for (data, option_type) in options
                .calls
                .iter()
                .map(|c| (c, OptionType::Call))
                .chain(options.puts.iter().map(|p| (p, OptionType::Put)))
            {
                if let Some(row) =
                    convert_row(data, symbol, expiration, dte, option_type, spot)
                {
                    rows.push(row);
                }
            }
        }

        Ok(rows)
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert Yahoo option data to a quote row
fn convert_row(
    data: &YahooOptionData,
    symbol: &str,
    expiration: NaiveDate,
    dte: i64,
    option_type: OptionType,
    spot: f64,
) -> Option<QuoteRow> {
    let strike = data.strike?;

    let mut row = QuoteRow::new(symbol, expiration, dte, strike, option_type);
    row.bid = data.bid;
    row.ask = data.ask;
    row.last = data.last_price;
    row.volume = data.volume.and_then(|v| u64::try_from(v).ok());
    row.open_interest = data.open_interest.and_then(|oi| u64::try_from(oi).ok());
    row.implied_volatility = data.implied_volatility;
    row.underlying_price = Some(spot);

    Some(row)
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    result: Vec<YahooOptionChainData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates")]
    expiration_dates: Vec<i64>,
    quote: YahooQuoteData,
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteData {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: f64,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    calls: Vec<YahooOptionData>,
    puts: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionData {
    strike: Option<f64>,
    bid: Option<f64>,
    ask: Option<f64>,
    #[serde(rename = "lastPrice")]
    last_price: Option<f64>,
    volume: Option<i64>,
    #[serde(rename = "openInterest")]
    open_interest: Option<i64>,
    #[serde(rename = "impliedVolatility")]
    implied_volatility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooChartResult>>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooChartQuote {
    close: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_row_requires_strike() {
        let data = YahooOptionData {
            strike: None,
            bid: Some(1.0),
            ask: Some(1.2),
            last_price: None,
            volume: None,
            open_interest: None,
            implied_volatility: Some(0.2),
        };
        let expiration = NaiveDate::from_ymd_opt(2026, 9, 18).unwrap();
        assert!(convert_row(&data, "SPY", expiration, 26, OptionType::Call, 500.0).is_none());
    }

    #[test]
    fn test_convert_row_populates_underlying_price() {
        let data = YahooOptionData {
            strike: Some(505.0),
            bid: Some(4.9),
            ask: Some(5.1),
            last_price: Some(5.0),
            volume: Some(120),
            open_interest: Some(3400),
            implied_volatility: Some(0.21),
        };
        let expiration = NaiveDate::from_ymd_opt(2026, 9, 18).unwrap();
        let row = convert_row(&data, "SPY", expiration, 26, OptionType::Put, 500.0).unwrap();

        assert_eq!(row.underlying_price, Some(500.0));
        assert_eq!(row.spot_price, None);
        assert_eq!(row.open_interest, Some(3400));
        assert!((row.mid().unwrap() - 5.0).abs() < 1e-12);
        // Yahoo never reports Greeks
        assert!(row.delta.is_none());
    }

    #[test]
    #[ignore] // Requires network
    fn test_option_rows() {
        let client = YahooClient::new();
        let rows = client.option_rows("SPY").unwrap();
        assert!(!rows.is_empty());
        println!("SPY rows: {}", rows.len());
    }

    #[test]
    #[ignore] // Requires network
    fn test_daily_closes() {
        let client = YahooClient::new();
        let closes = client.daily_closes("SPY").unwrap();
        assert!(closes.len() > 30);
    }
}
