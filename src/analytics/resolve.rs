//! Provider-agnostic column resolution
//!
//! Different providers report the underlying price under different field
//! names. The resolver walks the accepted variants in order and takes the
//! first one any row populates, so callers never touch provider-specific
//! fields directly.

use crate::core::QuoteRow;

/// Resolve the underlying price from a chain table.
///
/// Tries `underlying_price` first, then `spot_price`. Returns `None` when
/// no row carries either — callers print a message and bail, they do not
/// treat this as a hard error.
pub fn resolve_underlying(rows: &[QuoteRow]) -> Option<f64> {
    const VARIANTS: [fn(&QuoteRow) -> Option<f64>; 2] =
        [|r| r.underlying_price, |r| r.spot_price];

    for pick in VARIANTS {
        if let Some(price) = rows.iter().find_map(pick) {
            return Some(price);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionType;
    use chrono::NaiveDate;

    fn row() -> QuoteRow {
        QuoteRow::new(
            "SPY",
            NaiveDate::from_ymd_opt(2026, 9, 18).unwrap(),
            26,
            500.0,
            OptionType::Call,
        )
    }

    #[test]
    fn test_prefers_underlying_price() {
        let mut a = row();
        a.underlying_price = Some(501.0);
        a.spot_price = Some(499.0);
        assert_eq!(resolve_underlying(&[a]), Some(501.0));
    }

    #[test]
    fn test_falls_back_to_spot_price() {
        // Cboe-style table: only spot_price is populated
        let mut a = row();
        a.spot_price = Some(498.5);
        assert_eq!(resolve_underlying(&[a]), Some(498.5));
    }

    #[test]
    fn test_scans_past_rows_missing_the_field() {
        let blank = row();
        let mut b = row();
        b.underlying_price = Some(500.25);
        assert_eq!(resolve_underlying(&[blank, b]), Some(500.25));
    }

    #[test]
    fn test_none_when_absent_everywhere() {
        assert_eq!(resolve_underlying(&[row(), row()]), None);
        assert_eq!(resolve_underlying(&[]), None);
    }
}
