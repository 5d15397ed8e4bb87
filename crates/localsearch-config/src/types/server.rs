//! Backend server configuration

use serde::{Deserialize, Serialize};

/// Compiled-in fallback used until a descriptor has been resolved
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Backend server location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the RAG/Web/Agentic backend
    ///
    /// Usually a rotating tunnel address such as
    /// `https://<words>.trycloudflare.com`; replaced at runtime by the
    /// value found in the endpoint descriptor.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl crate::validation::Validate for ServerConfig {
    fn validate(&self) -> crate::error::Result<()> {
        crate::validation::validate_url("server.base_url", &self.base_url)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
