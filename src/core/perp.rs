//! Perpetual futures snapshot rows

use serde::{Deserialize, Serialize};

/// One perpetual contract snapshot. Every numeric field is optional;
/// reports print 0 for anything the provider left out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerpRow {
    /// Instrument symbol (e.g., "BTC-PERPETUAL")
    pub symbol: String,
    pub last_price: Option<f64>,
    pub mark_price: Option<f64>,
    /// Current funding rate as a decimal fraction
    pub current_funding: Option<f64>,
    /// Trailing 8h funding rate as a decimal fraction
    pub funding_8h: Option<f64>,
    pub open_interest: Option<f64>,
    /// 24h volume in USD
    pub volume_usd: Option<f64>,
    /// 24h price change in percent
    pub change_percent: Option<f64>,
}

impl PerpRow {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            last_price: None,
            mark_price: None,
            current_funding: None,
            funding_8h: None,
            open_interest: None,
            volume_usd: None,
            change_percent: None,
        }
    }
}
