//! # vol-scan — derivatives snapshot analytics
//!
//! Fetches options chains and crypto perpetual data from public provider
//! APIs and computes simple descriptive statistics over them: implied
//! volatility summaries, Greeks slices, funding snapshots, and volatility
//! trading signals (term structure, skew, fly, straddle cost, VRP).
//!
//! ## Key components
//!
//! - **Data fetching**: Cboe delayed quotes, Yahoo Finance chains and
//!   historical closes, Deribit public API (options + perpetuals)
//! - **Analytics**: range filters, grouped IV means, signal heuristics
//! - **Report**: fixed-width terminal tables
//! - **Plot** (optional `plot` feature): IV scatter and Greeks charts
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vol_scan::prelude::*;
//!
//! let rows = fetch_chains("SPY", Provider::Cboe).unwrap();
//! let spot = resolve_underlying(&rows).unwrap();
//!
//! let valid = with_valid_iv(&by_dte(&rows, 7, 180));
//! for summary in summarize_by_expiration(&valid, spot, 8) {
//!     println!("{} ATM IV {:.1}%", summary.expiration, summary.atm_iv);
//! }
//! ```
//!
//! ## What this crate does NOT do
//!
//! - Cache or persist fetched data
//! - Retry or rate-limit requests
//! - Price options or solve for Greeks (provider values are taken as-is)

pub mod analytics;
pub mod core;
pub mod data;
pub mod plot;
pub mod report;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{OptionType, PerpRow, QuoteRow, ScanError, ScanResult};

    // Data fetching
    pub use crate::data::{
        fetch_chains, fetch_daily_closes, CboeClient, DeribitClient, Provider, YahooClient,
    };

    // Analytics
    pub use crate::analytics::{
        atm_iv_pct,
        by_dte,
        by_option_type,
        by_strike_band,
        classify_skew,
        classify_term,
        classify_vrp,
        fly,
        mean_iv_pct,
        realized_vol,
        resolve_underlying,
        sorted_dtes,
        sorted_expirations,
        straddle,
        summarize_by_expiration,
        wing_ivs_pct,
        with_informative_delta,
        with_valid_iv,
        ExpirySummary,
        SkewBias,
        Straddle,
        TermShape,
        VrpSignal,
    };
}

// Re-export main types at crate root
pub use crate::core::{ScanError, ScanResult};
