//! Per-mode timing expectations
//!
//! Search timeouts are advisory: they are shown to the user while a
//! request runs and never abort it. Only `health_ms` cancels a request.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    #[serde(default = "default_rag_ms")]
    pub rag_ms: u64,

    #[serde(default = "default_web_ms")]
    pub web_ms: u64,

    #[serde(default = "default_agentic_ms")]
    pub agentic_ms: u64,

    /// Hard limit for the health probe
    #[serde(default = "default_health_ms")]
    pub health_ms: u64,
}

impl TimeoutsConfig {
    pub fn health(&self) -> Duration {
        Duration::from_millis(self.health_ms)
    }
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            rag_ms: default_rag_ms(),
            web_ms: default_web_ms(),
            agentic_ms: default_agentic_ms(),
            health_ms: default_health_ms(),
        }
    }
}

impl crate::validation::Validate for TimeoutsConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::validation::validate_positive;

        validate_positive("timeouts.rag_ms", self.rag_ms, 0)?;
        validate_positive("timeouts.web_ms", self.web_ms, 0)?;
        validate_positive("timeouts.agentic_ms", self.agentic_ms, 0)?;
        validate_positive("timeouts.health_ms", self.health_ms, 0)?;
        Ok(())
    }
}

fn default_rag_ms() -> u64 {
    60_000
}

fn default_web_ms() -> u64 {
    10_000
}

fn default_agentic_ms() -> u64 {
    120_000
}

fn default_health_ms() -> u64 {
    5_000
}
