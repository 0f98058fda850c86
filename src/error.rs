use thiserror::Error;

/// Error type for DataLens operations
///
/// The analytics functions themselves are total and return plain values;
/// these variants surface only from the ingestion adapters in [`crate::io`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error")]
    Io(#[source] std::io::Error),

    #[error("CSV error")]
    Csv(#[source] csv::Error),

    #[error("JSON error")]
    Json(#[source] serde_json::Error),

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("empty data: {0}")]
    EmptyData(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("data format error: {0}")]
    Format(String),
}

/// Type alias for Result
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
