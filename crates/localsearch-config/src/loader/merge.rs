//! Configuration merging logic
//!
//! Every layer above the defaults contributes a [`ConfigOverlay`]: the same
//! sections as [`Config`], with each field optional. A field the layer set
//! replaces the accumulated value, even when it equals the built-in default.

use crate::{types::*, Config};
use serde::Deserialize;

/// Fields a single layer (file, environment, explicit) actually set
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigOverlay {
    pub server: ServerOverlay,
    pub endpoints: EndpointsOverlay,
    pub defaults: DefaultsOverlay,
    pub timeouts: TimeoutsOverlay,
    pub descriptor: DescriptorOverlay,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerOverlay {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EndpointsOverlay {
    pub rag_search: Option<String>,
    pub web_search: Option<String>,
    pub agentic_search: Option<String>,
    pub health_check: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefaultsOverlay {
    pub top_k: Option<u32>,
    pub retriever_model: Option<String>,
    pub reranker_model: Option<String>,
    pub llm_model: Option<String>,
    pub use_reranker: Option<bool>,
    pub generate_answer: Option<bool>,
    pub max_iterations: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimeoutsOverlay {
    pub rag_ms: Option<u64>,
    pub web_ms: Option<u64>,
    pub agentic_ms: Option<u64>,
    pub health_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DescriptorOverlay {
    pub location: Option<String>,
    pub site_url: Option<String>,
    pub poll_interval_secs: Option<u64>,
}

impl ConfigOverlay {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Apply `overlay` on top of `base`; unset overlay fields keep the base value
pub fn merge(mut base: Config, overlay: ConfigOverlay) -> Config {
    base.server = merge_server(base.server, overlay.server);
    base.endpoints = merge_endpoints(base.endpoints, overlay.endpoints);
    base.defaults = merge_defaults(base.defaults, overlay.defaults);
    base.timeouts = merge_timeouts(base.timeouts, overlay.timeouts);
    base.descriptor = merge_descriptor(base.descriptor, overlay.descriptor);

    base
}

fn merge_server(base: ServerConfig, overlay: ServerOverlay) -> ServerConfig {
    ServerConfig {
        base_url: overlay.base_url.unwrap_or(base.base_url),
    }
}

fn merge_endpoints(base: EndpointsConfig, overlay: EndpointsOverlay) -> EndpointsConfig {
    EndpointsConfig {
        rag_search: overlay.rag_search.unwrap_or(base.rag_search),
        web_search: overlay.web_search.unwrap_or(base.web_search),
        agentic_search: overlay.agentic_search.unwrap_or(base.agentic_search),
        health_check: overlay.health_check.unwrap_or(base.health_check),
    }
}

fn merge_defaults(base: DefaultsConfig, overlay: DefaultsOverlay) -> DefaultsConfig {
    DefaultsConfig {
        top_k: overlay.top_k.unwrap_or(base.top_k),
        retriever_model: overlay.retriever_model.unwrap_or(base.retriever_model),
        reranker_model: overlay.reranker_model.unwrap_or(base.reranker_model),
        llm_model: overlay.llm_model.unwrap_or(base.llm_model),
        use_reranker: overlay.use_reranker.unwrap_or(base.use_reranker),
        generate_answer: overlay.generate_answer.unwrap_or(base.generate_answer),
        max_iterations: overlay.max_iterations.unwrap_or(base.max_iterations),
    }
}

fn merge_timeouts(base: TimeoutsConfig, overlay: TimeoutsOverlay) -> TimeoutsConfig {
    TimeoutsConfig {
        rag_ms: overlay.rag_ms.unwrap_or(base.rag_ms),
        web_ms: overlay.web_ms.unwrap_or(base.web_ms),
        agentic_ms: overlay.agentic_ms.unwrap_or(base.agentic_ms),
        health_ms: overlay.health_ms.unwrap_or(base.health_ms),
    }
}

fn merge_descriptor(base: DescriptorConfig, overlay: DescriptorOverlay) -> DescriptorConfig {
    DescriptorConfig {
        location: overlay.location.unwrap_or(base.location),
        site_url: overlay.site_url.or(base.site_url),
        poll_interval_secs: overlay
            .poll_interval_secs
            .unwrap_or(base.poll_interval_secs),
    }
}
