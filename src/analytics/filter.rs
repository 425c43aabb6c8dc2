//! Range filters over quote tables
//!
//! Free functions over `&[QuoteRow]`. Each returns a fresh table; compose
//! by chaining calls (logical AND). All bounds are inclusive.

use crate::core::{OptionType, QuoteRow};

/// Rows with days-to-expiry in `[lo, hi]`.
pub fn by_dte(rows: &[QuoteRow], lo: i64, hi: i64) -> Vec<QuoteRow> {
    rows.iter()
        .filter(|r| r.dte >= lo && r.dte <= hi)
        .cloned()
        .collect()
}

/// Rows with strike in `[lo, hi]`. Callers pass moneyness bands as
/// `spot * band_lo ..= spot * band_hi`.
pub fn by_strike_band(rows: &[QuoteRow], lo: f64, hi: f64) -> Vec<QuoteRow> {
    rows.iter()
        .filter(|r| r.strike >= lo && r.strike <= hi)
        .cloned()
        .collect()
}

/// Rows of one option type.
pub fn by_option_type(rows: &[QuoteRow], option_type: OptionType) -> Vec<QuoteRow> {
    rows.iter()
        .filter(|r| r.option_type == option_type)
        .cloned()
        .collect()
}

/// Rows whose implied volatility is present and strictly positive.
pub fn with_valid_iv(rows: &[QuoteRow]) -> Vec<QuoteRow> {
    rows.iter().filter(|r| r.has_valid_iv()).cloned().collect()
}

/// Rows whose delta is present and not pinned at exactly 0, 1, or -1.
pub fn with_informative_delta(rows: &[QuoteRow]) -> Vec<QuoteRow> {
    rows.iter()
        .filter(|r| r.has_informative_delta())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(dte: i64, strike: f64, option_type: OptionType) -> QuoteRow {
        let expiration = NaiveDate::from_ymd_opt(2026, 9, 18).unwrap();
        QuoteRow::new("SPY", expiration, dte, strike, option_type)
    }

    #[test]
    fn test_dte_bounds_are_inclusive() {
        let rows = vec![
            row(6, 500.0, OptionType::Call),
            row(7, 500.0, OptionType::Call),
            row(60, 500.0, OptionType::Call),
            row(61, 500.0, OptionType::Call),
        ];
        let kept = by_dte(&rows, 7, 60);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].dte, 7);
        assert_eq!(kept[1].dte, 60);
    }

    #[test]
    fn test_strike_band_inclusive() {
        let rows = vec![
            row(30, 489.9, OptionType::Put),
            row(30, 490.0, OptionType::Put),
            row(30, 510.0, OptionType::Put),
            row(30, 510.1, OptionType::Put),
        ];
        let kept = by_strike_band(&rows, 490.0, 510.0);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_filters_compose_by_intersection() {
        let mut a = row(10, 500.0, OptionType::Call);
        a.implied_volatility = Some(0.2);
        let mut b = row(10, 500.0, OptionType::Put);
        b.implied_volatility = Some(0.25);
        let mut c = row(200, 500.0, OptionType::Call);
        c.implied_volatility = Some(0.3);
        let d = row(10, 500.0, OptionType::Call); // no IV

        let rows = vec![a, b, c, d];
        let kept = by_option_type(&with_valid_iv(&by_dte(&rows, 1, 90)), OptionType::Call);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].implied_volatility, Some(0.2));
    }

    #[test]
    fn test_informative_delta_excludes_pins() {
        let mut a = row(30, 500.0, OptionType::Call);
        a.delta = Some(0.5);
        let mut b = row(30, 400.0, OptionType::Call);
        b.delta = Some(1.0);
        let mut c = row(30, 600.0, OptionType::Put);
        c.delta = Some(-1.0);
        let mut d = row(30, 700.0, OptionType::Call);
        d.delta = Some(0.0);
        let e = row(30, 500.0, OptionType::Call);

        let kept = with_informative_delta(&[a, b, c, d, e]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].delta, Some(0.5));
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(by_dte(&[], 0, 100).is_empty());
        assert!(with_valid_iv(&[]).is_empty());
    }
}
