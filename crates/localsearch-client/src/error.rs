use localsearch_core::ValidationError;
use thiserror::Error;

/// Failures of one search submission. None of them are fatal; the control
/// is usable again once the error is returned.
#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("A search is already running")]
    Busy,

    #[error("Cannot reach backend at {url}. Check that the server is running and the URL is correct")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Connection to backend at {url} failed while reading the response: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Backend response is not valid JSON: {0}")]
    InvalidResponse(String),
}

impl PlaygroundError {
    /// Map a transport failure, keeping the configured base URL in the message
    pub(crate) fn from_transport(err: reqwest::Error, base_url: &str) -> Self {
        let url = base_url.to_string();
        if err.is_connect() || err.is_request() {
            PlaygroundError::Unreachable { url, source: err }
        } else if err.is_decode() {
            PlaygroundError::InvalidResponse(err.to_string())
        } else {
            PlaygroundError::Transport { url, source: err }
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PlaygroundError::Validation(_))
    }
}

/// Why a descriptor fetch was discarded. Logged, never returned to callers.
#[derive(Debug, Error)]
pub(crate) enum ResolveError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("descriptor returned HTTP {0}")]
    Status(u16),

    #[error("failed to read descriptor: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Descriptor(#[from] localsearch_config::ConfigError),
}
