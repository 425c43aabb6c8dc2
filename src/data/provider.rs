//! Provider selection and dispatch

use std::fmt;

use clap::ValueEnum;

use crate::core::{QuoteRow, ScanResult};

use super::cboe::CboeClient;
use super::deribit::DeribitClient;
use super::yahoo::YahooClient;

/// Supported options-chain providers. The string forms are what
/// `--provider` accepts on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    /// Cboe delayed quotes (equities/ETFs, full Greeks)
    Cboe,
    /// Yahoo Finance (equities/ETFs, no Greeks)
    Yfinance,
    /// Deribit (crypto options, IV but no Greeks)
    Deribit,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Cboe => write!(f, "cboe"),
            Provider::Yfinance => write!(f, "yfinance"),
            Provider::Deribit => write!(f, "deribit"),
        }
    }
}

/// Fetch the options chain for a symbol from the chosen provider.
pub fn fetch_chains(symbol: &str, provider: Provider) -> ScanResult<Vec<QuoteRow>> {
    match provider {
        Provider::Cboe => CboeClient::new().option_rows(symbol),
        Provider::Yfinance => YahooClient::new().option_rows(symbol),
        Provider::Deribit => DeribitClient::new().option_rows(symbol),
    }
}

/// Fetch daily closes for realized-vol windows. Always served by Yahoo,
/// with the symbol passed straight through.
pub fn fetch_daily_closes(symbol: &str) -> ScanResult<Vec<f64>> {
    YahooClient::new().daily_closes(symbol)
}
