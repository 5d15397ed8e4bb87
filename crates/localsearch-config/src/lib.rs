//! Configuration for the LocalSearchBench client.
//!
//! Settings are layered (defaults, then a `.localsearch.{toml,yml,yaml,json}`
//! file, then `LOCALSEARCH_*` variables) and validated with field-level
//! messages. The crate also parses the dynamic endpoint descriptor
//! (`tunnel_config.json`) that announces the current backend address.
//!
//! ```no_run
//! use localsearch_config::Config;
//!
//! let config = Config::load()?;
//! println!("{}", config.endpoint_url(&config.endpoints.rag_search));
//! # Ok::<(), localsearch_config::ConfigError>(())
//! ```

pub mod error;
pub mod loader;
pub mod types;
pub mod validation;

pub use error::{ConfigError, ErrorFormatter, Result};
pub use loader::{ConfigBuilder, ConfigOverlay};
pub use types::*;

pub use validation::Validate;
