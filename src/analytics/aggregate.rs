//! Grouped aggregation
//!
//! Arithmetic means of implied volatility per transient group (expiration
//! or option type). An empty group always yields the sentinel 0.0 — "no
//! signal" — never an error.

use chrono::NaiveDate;

use crate::core::{OptionType, QuoteRow};

use super::filter::{by_option_type, by_strike_band};

/// ATM band around spot: strike in [98%, 102%] of the underlying.
pub const ATM_BAND: (f64, f64) = (0.98, 1.02);

/// Mean implied volatility of a table, in percent. Empty table -> 0.0.
pub fn mean_iv_pct(rows: &[QuoteRow]) -> f64 {
    let ivs: Vec<f64> = rows.iter().filter_map(|r| r.implied_volatility).collect();
    if ivs.is_empty() {
        return 0.0;
    }
    ivs.iter().sum::<f64>() / ivs.len() as f64 * 100.0
}

/// Mean IV (percent) of rows whose strike sits in the ATM band around spot.
pub fn atm_iv_pct(rows: &[QuoteRow], spot: f64) -> f64 {
    mean_iv_pct(&by_strike_band(rows, spot * ATM_BAND.0, spot * ATM_BAND.1))
}

/// Unique days-to-expiry values, ascending.
pub fn sorted_dtes(rows: &[QuoteRow]) -> Vec<i64> {
    let mut dtes: Vec<i64> = rows.iter().map(|r| r.dte).collect();
    dtes.sort_unstable();
    dtes.dedup();
    dtes
}

/// Unique expiration dates, ascending.
pub fn sorted_expirations(rows: &[QuoteRow]) -> Vec<NaiveDate> {
    let mut exps: Vec<NaiveDate> = rows.iter().map(|r| r.expiration).collect();
    exps.sort_unstable();
    exps.dedup();
    exps
}

/// Per-expiration IV summary. All values in percent; 0 where the
/// contributing group was empty.
#[derive(Debug, Clone)]
pub struct ExpirySummary {
    pub expiration: NaiveDate,
    pub dte: i64,
    pub atm_iv: f64,
    pub call_iv: f64,
    pub put_iv: f64,
}

impl ExpirySummary {
    /// Put IV minus call IV, in IV points.
    pub fn skew(&self) -> f64 {
        self.put_iv - self.call_iv
    }
}

/// Group a table by expiration and compute ATM / call / put mean IVs for
/// the first `limit` expirations.
pub fn summarize_by_expiration(rows: &[QuoteRow], spot: f64, limit: usize) -> Vec<ExpirySummary> {
    sorted_expirations(rows)
        .into_iter()
        .take(limit)
        .map(|expiration| {
            let group: Vec<QuoteRow> = rows
                .iter()
                .filter(|r| r.expiration == expiration)
                .cloned()
                .collect();
            let dte = group.first().map(|r| r.dte).unwrap_or(0);

            ExpirySummary {
                expiration,
                dte,
                atm_iv: atm_iv_pct(&group, spot),
                call_iv: mean_iv_pct(&by_option_type(&group, OptionType::Call)),
                put_iv: mean_iv_pct(&by_option_type(&group, OptionType::Put)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(expiration: NaiveDate, dte: i64, strike: f64, ty: OptionType, iv: f64) -> QuoteRow {
        let mut r = QuoteRow::new("SPY", expiration, dte, strike, ty);
        r.implied_volatility = Some(iv);
        r
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
    }

    #[test]
    fn test_empty_group_yields_zero_not_error() {
        assert_eq!(mean_iv_pct(&[]), 0.0);
        assert_eq!(atm_iv_pct(&[], 500.0), 0.0);
    }

    #[test]
    fn test_mean_iv_pct() {
        let rows = vec![
            row(date(18), 26, 500.0, OptionType::Call, 0.20),
            row(date(18), 26, 505.0, OptionType::Call, 0.30),
        ];
        assert!((mean_iv_pct(&rows) - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_atm_band_excludes_far_strikes() {
        let rows = vec![
            row(date(18), 26, 500.0, OptionType::Call, 0.20),
            row(date(18), 26, 550.0, OptionType::Call, 0.90), // 10% OTM, outside band
        ];
        assert!((atm_iv_pct(&rows, 500.0) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_summary_groups_by_expiration() {
        let rows = vec![
            row(date(4), 12, 500.0, OptionType::Call, 0.20),
            row(date(4), 12, 500.0, OptionType::Put, 0.24),
            row(date(18), 26, 500.0, OptionType::Call, 0.22),
        ];
        let summaries = summarize_by_expiration(&rows, 500.0, 8);
        assert_eq!(summaries.len(), 2);

        let near = &summaries[0];
        assert_eq!(near.expiration, date(4));
        assert_eq!(near.dte, 12);
        assert!((near.call_iv - 20.0).abs() < 1e-10);
        assert!((near.put_iv - 24.0).abs() < 1e-10);
        assert!((near.atm_iv - 22.0).abs() < 1e-10);
        assert!((near.skew() - 4.0).abs() < 1e-10);

        // Put group of the far expiry is empty -> sentinel 0
        assert_eq!(summaries[1].put_iv, 0.0);
    }

    #[test]
    fn test_summary_respects_limit() {
        let rows = vec![
            row(date(4), 12, 500.0, OptionType::Call, 0.2),
            row(date(11), 19, 500.0, OptionType::Call, 0.2),
            row(date(18), 26, 500.0, OptionType::Call, 0.2),
        ];
        assert_eq!(summarize_by_expiration(&rows, 500.0, 2).len(), 2);
    }
}
