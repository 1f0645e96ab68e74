use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    // DNS, connection refused, TLS and other transport failures
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Invalid JSON response: {source}")]
    MalformedJson {
        source: serde_json::Error,
        body: String,
    },

    // Valid JSON whose shape is not a response object at all
    #[error("Unexpected response shape: {source}")]
    UnexpectedPayload {
        source: serde_json::Error,
        body: String,
    },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Failed to write report: {0}")]
    OutputError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}

impl Error {
    // reqwest reports an elapsed per-request timeout as a generic error; split it out
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Error::Timeout(timeout)
        } else {
            Error::RequestError(err)
        }
    }
}
