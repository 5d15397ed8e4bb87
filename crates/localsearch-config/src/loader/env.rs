//! Environment variable configuration overlay
//!
//! Variables use the format `LOCALSEARCH_<section>_<field>=value`:
//! - `LOCALSEARCH_SERVER_BASE_URL=https://demo.trycloudflare.com`
//! - `LOCALSEARCH_DEFAULTS_TOP_K=10`
//! - `LOCALSEARCH_DESCRIPTOR_SITE_URL=https://example.github.io/LocalSearchBench`

use super::merge::{
    ConfigOverlay, DefaultsOverlay, DescriptorOverlay, EndpointsOverlay, ServerOverlay,
    TimeoutsOverlay,
};
use crate::{error::ConfigError, Result};
use std::env;

const PREFIX: &str = "LOCALSEARCH_";

/// Overlay from the process environment
pub fn from_env() -> Result<Option<ConfigOverlay>> {
    from_vars(env::vars())
}

/// Overlay from `(key, value)` pairs; keys without the prefix are ignored
/// and only the fields named by a variable are set
pub fn from_vars<I>(vars: I) -> Result<Option<ConfigOverlay>>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_vars: Vec<(String, String)> = vars
        .into_iter()
        .filter(|(k, _)| k.starts_with(PREFIX))
        .collect();

    if env_vars.is_empty() {
        return Ok(None);
    }

    let mut config = ConfigOverlay::default();
    for (key, value) in env_vars {
        apply_env_var(&mut config, &key, &value)?;
    }

    Ok(Some(config))
}

/// Apply a single environment variable to the overlay
fn apply_env_var(config: &mut ConfigOverlay, key: &str, value: &str) -> Result<()> {
    let stripped = key.strip_prefix(PREFIX).unwrap_or(key);

    let (section, field) = stripped
        .split_once('_')
        .ok_or_else(|| ConfigError::EnvVarError {
            var: key.to_string(),
            message: "Expected format: LOCALSEARCH_<section>_<field>".to_string(),
        })?;

    let section = section.to_lowercase();
    let field = field.to_lowercase();

    match section.as_str() {
        "server" => apply_server_var(&mut config.server, &field, value),
        "endpoints" => apply_endpoints_var(&mut config.endpoints, &field, value),
        "defaults" => apply_defaults_var(&mut config.defaults, &field, value),
        "timeouts" => apply_timeouts_var(&mut config.timeouts, &field, value),
        "descriptor" => apply_descriptor_var(&mut config.descriptor, &field, value),
        _ => Err(ConfigError::EnvVarError {
            var: key.to_string(),
            message: format!("Unknown section: {}", section),
        }),
    }
}

fn apply_server_var(config: &mut ServerOverlay, field: &str, value: &str) -> Result<()> {
    match field {
        "base_url" => config.base_url = Some(value.to_string()),
        _ => return Err(ConfigError::unknown_field("server", field, &["base_url"])),
    }
    Ok(())
}

fn apply_endpoints_var(config: &mut EndpointsOverlay, field: &str, value: &str) -> Result<()> {
    let slot = match field {
        "rag_search" => &mut config.rag_search,
        "web_search" => &mut config.web_search,
        "agentic_search" => &mut config.agentic_search,
        "health_check" => &mut config.health_check,
        _ => {
            return Err(ConfigError::unknown_field(
                "endpoints",
                field,
                &["rag_search", "web_search", "agentic_search", "health_check"],
            ))
        }
    };
    *slot = Some(value.to_string());
    Ok(())
}

fn apply_defaults_var(config: &mut DefaultsOverlay, field: &str, value: &str) -> Result<()> {
    let var = field_var("DEFAULTS", field);
    match field {
        "top_k" => config.top_k = Some(parse_int(var, value)?),
        "max_iterations" => config.max_iterations = Some(parse_int(var, value)?),
        "retriever_model" => config.retriever_model = Some(value.to_string()),
        "reranker_model" => config.reranker_model = Some(value.to_string()),
        "llm_model" => config.llm_model = Some(value.to_string()),
        "use_reranker" => config.use_reranker = Some(parse_bool(var, value)?),
        "generate_answer" => config.generate_answer = Some(parse_bool(var, value)?),
        _ => {
            return Err(ConfigError::unknown_field(
                "defaults",
                field,
                &[
                    "top_k",
                    "max_iterations",
                    "retriever_model",
                    "reranker_model",
                    "llm_model",
                    "use_reranker",
                    "generate_answer",
                ],
            ))
        }
    }
    Ok(())
}

fn apply_timeouts_var(config: &mut TimeoutsOverlay, field: &str, value: &str) -> Result<()> {
    let slot = match field {
        "rag_ms" => &mut config.rag_ms,
        "web_ms" => &mut config.web_ms,
        "agentic_ms" => &mut config.agentic_ms,
        "health_ms" => &mut config.health_ms,
        _ => {
            return Err(ConfigError::unknown_field(
                "timeouts",
                field,
                &["rag_ms", "web_ms", "agentic_ms", "health_ms"],
            ))
        }
    };
    *slot = Some(parse_int(field_var("TIMEOUTS", field), value)?);
    Ok(())
}

fn apply_descriptor_var(config: &mut DescriptorOverlay, field: &str, value: &str) -> Result<()> {
    match field {
        "location" => config.location = Some(value.to_string()),
        "site_url" => config.site_url = Some(value.to_string()),
        "poll_interval_secs" => {
            config.poll_interval_secs = Some(parse_int(field_var("DESCRIPTOR", field), value)?)
        }
        _ => {
            return Err(ConfigError::unknown_field(
                "descriptor",
                field,
                &["location", "site_url", "poll_interval_secs"],
            ))
        }
    }
    Ok(())
}

fn field_var(section: &str, field: &str) -> String {
    format!("{}{}_{}", PREFIX, section, field.to_uppercase())
}

fn parse_int<T: std::str::FromStr>(var: String, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| ConfigError::EnvVarError {
        var,
        message: format!("Invalid integer: {}", value),
    })
}

fn parse_bool(var: String, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::EnvVarError {
            var,
            message: format!(
                "Invalid boolean: {} (use true/false, 1/0, yes/no, on/off)",
                value
            ),
        }),
    }
}
