//! Error types for vol-scan

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Data error: {0}")]
    Data(String),

    #[error("Network error: {0}")]
    Network(String),
}

pub type ScanResult<T> = Result<T, ScanError>;

impl ScanError {
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }
}
