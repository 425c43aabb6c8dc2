//! Option quote rows
//!
//! One `QuoteRow` per observed contract snapshot. Providers return different
//! subsets of these fields; everything that is not guaranteed everywhere is
//! an `Option` and downstream code degrades to 0 or skips the column.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

/// One observed option contract snapshot.
///
/// Underlying price appears under different names across providers:
/// Yahoo and Deribit populate `underlying_price`, Cboe populates
/// `spot_price`. Use [`crate::analytics::resolve_underlying`] rather than
/// reading either field directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRow {
    /// Underlying symbol (e.g., "SPY", "BTC")
    pub symbol: String,
    /// Expiration date
    pub expiration: NaiveDate,
    /// Calendar days to expiration
    pub dte: i64,
    /// Strike price
    pub strike: f64,
    /// Call or put
    pub option_type: OptionType,
    /// Implied volatility as a decimal fraction (0.25 = 25%)
    pub implied_volatility: Option<f64>,
    pub delta: Option<f64>,
    pub gamma: Option<f64>,
    pub theta: Option<f64>,
    pub vega: Option<f64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub last: Option<f64>,
    pub volume: Option<u64>,
    pub open_interest: Option<u64>,
    /// Underlying price as reported by Yahoo/Deribit-style providers
    pub underlying_price: Option<f64>,
    /// Underlying price as reported by Cboe-style providers
    pub spot_price: Option<f64>,
}

impl QuoteRow {
    /// Create a bare row; fetch clients fill in what the provider gives.
    pub fn new(
        symbol: impl Into<String>,
        expiration: NaiveDate,
        dte: i64,
        strike: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            expiration,
            dte,
            strike,
            option_type,
            implied_volatility: None,
            delta: None,
            gamma: None,
            theta: None,
            vega: None,
            bid: None,
            ask: None,
            last: None,
            volume: None,
            open_interest: None,
            underlying_price: None,
            spot_price: None,
        }
    }

    /// Mid price from bid/ask
    pub fn mid(&self) -> Option<f64> {
        match (self.bid, self.ask) {
            (Some(b), Some(a)) => Some((b + a) / 2.0),
            _ => None,
        }
    }

    /// IV is present and strictly positive
    pub fn has_valid_iv(&self) -> bool {
        self.implied_volatility.map(|iv| iv > 0.0).unwrap_or(false)
    }

    /// Delta carries information: present and not pinned at exactly
    /// 0, 1, or -1 (providers report those for stale or deep quotes).
    pub fn has_informative_delta(&self) -> bool {
        match self.delta {
            Some(d) => d != 0.0 && d != 1.0 && d != -1.0,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(strike: f64) -> QuoteRow {
        QuoteRow::new(
            "SPY",
            NaiveDate::from_ymd_opt(2026, 9, 18).unwrap(),
            26,
            strike,
            OptionType::Call,
        )
    }

    #[test]
    fn test_mid() {
        let mut q = row(500.0);
        assert_eq!(q.mid(), None);

        q.bid = Some(5.0);
        q.ask = Some(6.0);
        assert!((q.mid().unwrap() - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_informative_delta() {
        let mut q = row(500.0);
        assert!(!q.has_informative_delta());

        q.delta = Some(0.45);
        assert!(q.has_informative_delta());

        for pinned in [0.0, 1.0, -1.0] {
            q.delta = Some(pinned);
            assert!(!q.has_informative_delta());
        }
    }

    #[test]
    fn test_valid_iv() {
        let mut q = row(500.0);
        assert!(!q.has_valid_iv());
        q.implied_volatility = Some(0.0);
        assert!(!q.has_valid_iv());
        q.implied_volatility = Some(0.22);
        assert!(q.has_valid_iv());
    }
}
