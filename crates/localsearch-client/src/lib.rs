//! Async side of the LocalSearchBench client: backend discovery, health
//! probing and the three search operations.

pub mod error;
pub mod handle;
pub mod playground;
pub mod resolver;

pub use error::PlaygroundError;
pub use handle::{ConfigEvent, ConfigHandle};
pub use playground::{ControlState, Playground, SearchOutcome, SubmitControl, SubmitGuard};
pub use resolver::ConfigResolver;

use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};

/// Headers that keep intermediaries from serving a stale response
pub(crate) fn no_cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers
}
