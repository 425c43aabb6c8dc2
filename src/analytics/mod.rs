//! Filters, aggregates, and volatility signals
//!
//! Everything here is a free function over `&[QuoteRow]` slices. No state,
//! no I/O; the data layer fetches, this layer summarizes.

pub mod aggregate;
pub mod filter;
pub mod resolve;
pub mod signals;

pub use aggregate::{
    atm_iv_pct, mean_iv_pct, sorted_dtes, sorted_expirations, summarize_by_expiration,
    ExpirySummary, ATM_BAND,
};
pub use filter::{by_dte, by_option_type, by_strike_band, with_informative_delta, with_valid_iv};
pub use resolve::resolve_underlying;
pub use signals::{
    classify_skew, classify_term, classify_vrp, fly, realized_vol, straddle, wing_ivs_pct,
    SkewBias, Straddle, TermShape, VrpSignal, OTM_CALL_BAND, OTM_PUT_BAND, SKEW_THRESHOLD_PCT,
    TRADING_DAYS, VRP_DTE_BUCKET, VRP_THRESHOLD_PCT,
};
