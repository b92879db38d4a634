use serde::Serialize;
use thiserror::Error;

/// Why a listing page could not be loaded.
///
/// Every variant ends up as the same "failed to load" banner; the variants
/// exist so logs and the JSON view can tell them apart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListingError {
    #[error("listing endpoint is not configured")]
    MissingEndpoint,

    #[error("network error: {0}")]
    Network(String),

    #[error("upstream returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    #[error("upstream body is not valid JSON: {0}")]
    UpstreamBody(String),
}

impl ListingError {
    pub fn outcome(&self) -> Outcome {
        match self {
            ListingError::MissingEndpoint => Outcome::ConfigError,
            ListingError::Network(_) => Outcome::NetworkError,
            ListingError::UpstreamStatus { .. } | ListingError::UpstreamBody(_) => {
                Outcome::UpstreamError
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Ok,
    UpstreamError,
    NetworkError,
    ConfigError,
}
