//! Core record types
//!
//! Plain structs for option and perpetual snapshots, plus the crate
//! error type. Tables are ordered `Vec`s of these records; there is no
//! dataframe abstraction anywhere.

pub mod error;
pub mod perp;
pub mod quote;

pub use error::{ScanError, ScanResult};
pub use perp::PerpRow;
pub use quote::{OptionType, QuoteRow};
