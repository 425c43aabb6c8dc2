//! Data fetching
//!
//! Handles:
//! - Cboe delayed quotes (equity/ETF chains with Greeks)
//! - Yahoo Finance chains and daily closes
//! - Deribit public API (crypto options and perpetuals)

pub mod cboe;
pub mod deribit;
pub mod provider;
pub mod yahoo;

pub use cboe::CboeClient;
pub use deribit::DeribitClient;
pub use provider::{fetch_chains, fetch_daily_closes, Provider};
pub use yahoo::YahooClient;
