//! Error types for subtrack

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid cost: {0} (must be a finite number greater than zero)")]
    InvalidCost(f64),

    #[error("Invalid billing cycle: {0} (valid: Monthly, Quarterly, Yearly)")]
    InvalidCycle(String),

    #[error("Invalid page size: {0} (must be at least 1)")]
    InvalidPageSize(i64),

    #[error("Invalid page index: {0} (pages start at 1)")]
    InvalidPageIndex(i64),

    #[error("Invalid date: {0} (use YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("subscription {id}: {source}")]
    Record {
        id: i64,
        #[source]
        source: Box<Error>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The underlying error, looking through record context
    pub fn kind(&self) -> &Error {
        match self {
            Self::Record { source, .. } => source.kind(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
