//! Configuration type definitions
//!
//! Each section is self-contained with validation and defaults that match
//! the public LocalSearchBench demo deployment.

pub mod defaults;
pub mod descriptor;
pub mod endpoints;
pub mod server;
pub mod timeouts;

pub use defaults::DefaultsConfig;
pub use descriptor::{DescriptorConfig, DescriptorSource, TunnelDescriptor};
pub use endpoints::EndpointsConfig;
pub use server::ServerConfig;
pub use timeouts::TimeoutsConfig;

use serde::{Deserialize, Serialize};

/// Main configuration struct aggregating all settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Backend server location
    #[serde(default)]
    pub server: ServerConfig,

    /// API endpoint paths, relative to `server.base_url`
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// Default search parameters
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Expected durations per search mode
    #[serde(default)]
    pub timeouts: TimeoutsConfig,

    /// Where the dynamic endpoint descriptor lives
    #[serde(default)]
    pub descriptor: DescriptorConfig,
}

impl Config {
    /// Absolute URL for an endpoint path on the current backend
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.server.base_url.trim_end_matches('/'), path)
    }

    /// Health probe URL
    pub fn health_url(&self) -> String {
        self.endpoint_url(&self.endpoints.health_check)
    }
}

impl crate::validation::Validate for Config {
    fn validate(&self) -> crate::error::Result<()> {
        self.server.validate()?;
        self.endpoints.validate()?;
        self.defaults.validate()?;
        self.timeouts.validate()?;
        self.descriptor.validate()?;

        Ok(())
    }
}
