//! API endpoint paths

use serde::{Deserialize, Serialize};

/// Endpoint paths appended to `server.base_url`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_rag_search")]
    pub rag_search: String,

    #[serde(default = "default_web_search")]
    pub web_search: String,

    #[serde(default = "default_agentic_search")]
    pub agentic_search: String,

    #[serde(default = "default_health_check")]
    pub health_check: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            rag_search: default_rag_search(),
            web_search: default_web_search(),
            agentic_search: default_agentic_search(),
            health_check: default_health_check(),
        }
    }
}

impl crate::validation::Validate for EndpointsConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::validation::validate_path;

        validate_path("endpoints.rag_search", &self.rag_search)?;
        validate_path("endpoints.web_search", &self.web_search)?;
        validate_path("endpoints.agentic_search", &self.agentic_search)?;
        validate_path("endpoints.health_check", &self.health_check)?;
        Ok(())
    }
}

fn default_rag_search() -> String {
    "/api/rag/search".to_string()
}

fn default_web_search() -> String {
    "/api/web/search".to_string()
}

fn default_agentic_search() -> String {
    "/api/agentic/search".to_string()
}

fn default_health_check() -> String {
    "/health".to_string()
}
