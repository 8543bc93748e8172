use status_hal::HalError;
use thiserror::Error;

/// Result type alias for status operations
pub type StatusResult<T> = std::result::Result<T, StatusError>;

#[derive(Error, Debug)]
pub enum StatusError {
    #[error("Invalid hostname")]
    InvalidHostname,

    #[error(transparent)]
    Hal(#[from] HalError),

    #[error("Record store error: {0}")]
    Store(String),

    #[error("Archive error: {0}")]
    Archive(#[source] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}
