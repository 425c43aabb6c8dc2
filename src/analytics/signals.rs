//! Volatility trading signals
//!
//! Stateless heuristics over grouped IV aggregates: term structure, skew,
//! fly, straddle cost, and the variance risk premium. Classification
//! thresholds are fixed constants and part of the output contract.

use std::fmt;

use crate::core::{OptionType, QuoteRow};

use super::aggregate::mean_iv_pct;
use super::filter::{by_option_type, by_strike_band};

/// OTM call wing: 103-108% of spot. Approximates the 25-delta call strike
/// without a delta solve.
pub const OTM_CALL_BAND: (f64, f64) = (1.03, 1.08);

/// OTM put wing: 92-97% of spot. Approximates the 25-delta put strike.
pub const OTM_PUT_BAND: (f64, f64) = (0.92, 0.97);

/// Skew beyond this many IV points (strictly) classifies as directional.
pub const SKEW_THRESHOLD_PCT: f64 = 2.0;

/// VRP beyond this many IV points (strictly) classifies as high/negative.
pub const VRP_THRESHOLD_PCT: f64 = 5.0;

/// DTE bucket used for the 30-day IV in the VRP calculation.
pub const VRP_DTE_BUCKET: (i64, i64) = (25, 35);

/// Trading days per year, for RV annualization.
pub const TRADING_DAYS: f64 = 252.0;

/// Term structure state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermShape {
    Contango,
    Backwardation,
}

impl fmt::Display for TermShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermShape::Contango => write!(f, "CONTANGO"),
            TermShape::Backwardation => write!(f, "BACKWARDATION"),
        }
    }
}

/// Term-structure spread and shape from near and far ATM IVs (percent).
/// Positive spread (far above near) is contango.
pub fn classify_term(near_iv: f64, far_iv: f64) -> (f64, TermShape) {
    let spread = far_iv - near_iv;
    let shape = if spread > 0.0 {
        TermShape::Contango
    } else {
        TermShape::Backwardation
    };
    (spread, shape)
}

/// Directional bias read from the put/call skew.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkewBias {
    Bearish,
    Bullish,
    Neutral,
}

impl SkewBias {
    /// Compact arrow form used in the per-expiration skew table.
    pub fn arrow_label(&self) -> &'static str {
        match self {
            SkewBias::Bearish => "\u{2191} Bearish",
            SkewBias::Bullish => "\u{2193} Bullish",
            SkewBias::Neutral => "\u{2192} Neutral",
        }
    }
}

impl fmt::Display for SkewBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkewBias::Bearish => write!(f, "BEARISH"),
            SkewBias::Bullish => write!(f, "BULLISH"),
            SkewBias::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Classify a put-minus-call IV spread (percent). Strict inequalities:
/// exactly +2.0 is still NEUTRAL.
pub fn classify_skew(spread_pct: f64) -> SkewBias {
    if spread_pct > SKEW_THRESHOLD_PCT {
        SkewBias::Bearish
    } else if spread_pct < -SKEW_THRESHOLD_PCT {
        SkewBias::Bullish
    } else {
        SkewBias::Neutral
    }
}

/// Mean wing IVs (percent) for one expiration slice: OTM calls in
/// [103%, 108%] of spot and OTM puts in [92%, 97%]. Empty wing -> 0.
pub fn wing_ivs_pct(rows: &[QuoteRow], spot: f64) -> (f64, f64) {
    let calls = by_strike_band(
        &by_option_type(rows, OptionType::Call),
        spot * OTM_CALL_BAND.0,
        spot * OTM_CALL_BAND.1,
    );
    let puts = by_strike_band(
        &by_option_type(rows, OptionType::Put),
        spot * OTM_PUT_BAND.0,
        spot * OTM_PUT_BAND.1,
    );
    (mean_iv_pct(&calls), mean_iv_pct(&puts))
}

/// Fly: average wing IV minus ATM IV, all in percent. A vol-of-vol proxy.
pub fn fly(call_wing_iv: f64, put_wing_iv: f64, atm_iv: f64) -> f64 {
    (call_wing_iv + put_wing_iv) / 2.0 - atm_iv
}

/// ATM straddle cost and the move it prices in.
#[derive(Debug, Clone, Copy)]
pub struct Straddle {
    /// Call mid + put mid
    pub cost: f64,
    /// Cost as percent of spot
    pub pct_move: f64,
    /// pct_move / DTE: daily breakeven move in percent
    pub daily_breakeven: f64,
}

/// Straddle economics from the two ATM mid prices.
pub fn straddle(call_mid: f64, put_mid: f64, spot: f64, dte: i64) -> Straddle {
    let cost = call_mid + put_mid;
    let pct_move = cost / spot * 100.0;
    let daily_breakeven = if dte > 0 { pct_move / dte as f64 } else { 0.0 };
    Straddle {
        cost,
        pct_move,
        daily_breakeven,
    }
}

/// Annualized realized volatility in percent from daily closes: sample
/// standard deviation of the trailing `lookback` percent returns, scaled
/// by sqrt(252) and 100. `None` when the history is shorter than the
/// lookback window.
pub fn realized_vol(closes: &[f64], lookback: usize) -> Option<f64> {
    if closes.len() < lookback {
        return None;
    }

    let returns: Vec<f64> = closes
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| w[1] / w[0] - 1.0)
        .collect();

    let tail = if returns.len() > lookback {
        &returns[returns.len() - lookback..]
    } else {
        &returns[..]
    };
    if tail.len() < 2 {
        return None;
    }

    let mean = tail.iter().sum::<f64>() / tail.len() as f64;
    let variance =
        tail.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (tail.len() - 1) as f64;

    Some(variance.sqrt() * TRADING_DAYS.sqrt() * 100.0)
}

/// Variance risk premium classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VrpSignal {
    High,
    Negative,
    Neutral,
}

impl fmt::Display for VrpSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VrpSignal::High => write!(f, "HIGH VRP"),
            VrpSignal::Negative => write!(f, "NEGATIVE VRP"),
            VrpSignal::Neutral => write!(f, "NEUTRAL VRP"),
        }
    }
}

/// Classify IV minus RV (both percent). Strict at +/-5.
pub fn classify_vrp(vrp_pct: f64) -> VrpSignal {
    if vrp_pct > VRP_THRESHOLD_PCT {
        VrpSignal::High
    } else if vrp_pct < -VRP_THRESHOLD_PCT {
        VrpSignal::Negative
    } else {
        VrpSignal::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_term_structure() {
        let (spread, shape) = classify_term(30.0, 35.0);
        assert!((spread - 5.0).abs() < 1e-12);
        assert_eq!(shape, TermShape::Contango);
        assert_eq!(shape.to_string(), "CONTANGO");

        let (spread, shape) = classify_term(35.0, 30.0);
        assert!((spread + 5.0).abs() < 1e-12);
        assert_eq!(shape, TermShape::Backwardation);
        assert_eq!(shape.to_string(), "BACKWARDATION");
    }

    #[test]
    fn test_skew_threshold_is_strict() {
        assert_eq!(classify_skew(2.0), SkewBias::Neutral);
        assert_eq!(classify_skew(2.01), SkewBias::Bearish);
        assert_eq!(classify_skew(-2.0), SkewBias::Neutral);
        assert_eq!(classify_skew(-2.01), SkewBias::Bullish);
        assert_eq!(classify_skew(0.0), SkewBias::Neutral);
    }

    #[test]
    fn test_vrp_classification() {
        // IV 25 / RV 18 -> +7
        assert_eq!(classify_vrp(25.0 - 18.0), VrpSignal::High);
        // IV 20 / RV 26 -> -6
        assert_eq!(classify_vrp(20.0 - 26.0), VrpSignal::Negative);
        // IV 22 / RV 20 -> +2
        assert_eq!(classify_vrp(22.0 - 20.0), VrpSignal::Neutral);

        assert_eq!(VrpSignal::High.to_string(), "HIGH VRP");
        assert_eq!(VrpSignal::Negative.to_string(), "NEGATIVE VRP");
        assert_eq!(VrpSignal::Neutral.to_string(), "NEUTRAL VRP");
    }

    #[test]
    fn test_fly() {
        assert!((fly(24.0, 26.0, 22.0) - 3.0).abs() < 1e-12);
        // Empty wings feed 0s through without panicking
        assert!((fly(0.0, 0.0, 0.0)).abs() < 1e-12);
    }

    #[test]
    fn test_straddle_breakeven() {
        let s = straddle(5.0, 4.0, 100.0, 30);
        assert!((s.cost - 9.0).abs() < 1e-12);
        assert!((s.pct_move - 9.0).abs() < 1e-12);
        assert!((s.daily_breakeven - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_wing_ivs_empty_slice_is_zero() {
        assert_eq!(wing_ivs_pct(&[], 500.0), (0.0, 0.0));
    }

    #[test]
    fn test_wing_bands() {
        let expiration = NaiveDate::from_ymd_opt(2026, 9, 18).unwrap();
        let mut call = QuoteRow::new("SPY", expiration, 26, 525.0, OptionType::Call); // 105%
        call.implied_volatility = Some(0.24);
        let mut put = QuoteRow::new("SPY", expiration, 26, 475.0, OptionType::Put); // 95%
        put.implied_volatility = Some(0.28);
        let mut atm = QuoteRow::new("SPY", expiration, 26, 500.0, OptionType::Call);
        atm.implied_volatility = Some(0.20);

        let (call_iv, put_iv) = wing_ivs_pct(&[call, put, atm], 500.0);
        assert!((call_iv - 24.0).abs() < 1e-10);
        assert!((put_iv - 28.0).abs() < 1e-10);
    }

    #[test]
    fn test_realized_vol_matches_sample_stdev() {
        // Build 31 closes so the return series has exactly 30 values
        let returns: Vec<f64> = (0..30).map(|i| 0.01 * ((i % 5) as f64 - 2.0)).collect();
        let mut closes = vec![100.0];
        for r in &returns {
            let last = *closes.last().unwrap();
            closes.push(last * (1.0 + r));
        }

        let rv = realized_vol(&closes, 30).unwrap();

        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        let var = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>()
            / (returns.len() - 1) as f64;
        let expected = var.sqrt() * 252f64.sqrt() * 100.0;

        assert!((rv - expected).abs() < 1e-9, "rv={rv} expected={expected}");
    }

    #[test]
    fn test_realized_vol_insufficient_history() {
        let closes = vec![100.0; 10];
        assert!(realized_vol(&closes, 30).is_none());
        assert!(realized_vol(&[], 30).is_none());
    }
}
