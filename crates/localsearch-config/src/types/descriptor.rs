//! Dynamic endpoint descriptor
//!
//! The backend sits behind a temporary tunnel whose public address rotates.
//! A small JSON file (`tunnel_config.json`) published next to the site
//! carries the current address:
//!
//! ```json
//! { "rag_server_url": "https://<words>.trycloudflare.com", "updated_at": "2025-11-03 10:21:07" }
//! ```

use crate::error::{ConfigError, Result};
use crate::validation::is_absolute_http_url;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where to find the descriptor and how often to poll it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorConfig {
    /// Absolute URL, path relative to `site_url`, or local file path
    #[serde(default = "default_location")]
    pub location: String,

    /// Root of the published site that `location` is relative to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,

    /// Polling interval for `watch`
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

/// Resolved descriptor location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorSource {
    /// Fetched with a cache-busted GET
    Remote(String),
    /// Read from disk
    Local(PathBuf),
}

impl DescriptorConfig {
    pub fn source(&self) -> DescriptorSource {
        if is_absolute_http_url(&self.location) {
            return DescriptorSource::Remote(self.location.clone());
        }

        match &self.site_url {
            Some(site) => {
                let relative = self.location.trim_start_matches("./").trim_start_matches('/');
                DescriptorSource::Remote(format!("{}/{}", site.trim_end_matches('/'), relative))
            }
            None => DescriptorSource::Local(PathBuf::from(&self.location)),
        }
    }
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            site_url: None,
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl crate::validation::Validate for DescriptorConfig {
    fn validate(&self) -> Result<()> {
        use crate::validation::{validate_range, validate_url};

        if self.location.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "descriptor.location".to_string(),
                message: "Descriptor location cannot be empty".to_string(),
            });
        }

        if let Some(site) = &self.site_url {
            validate_url("descriptor.site_url", site)?;
        }

        validate_range("descriptor.poll_interval_secs", self.poll_interval_secs, 1, 3600)?;
        Ok(())
    }
}

fn default_location() -> String {
    "./tunnel_config.json".to_string()
}

fn default_poll_interval_secs() -> u64 {
    30
}

/// Body of `tunnel_config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelDescriptor {
    #[serde(default)]
    pub rag_server_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl TunnelDescriptor {
    /// Parse a descriptor body and check it carries a usable URL
    pub fn parse(body: &str) -> Result<Self> {
        let descriptor: Self =
            serde_json::from_str(body).map_err(|e| ConfigError::InvalidDescriptor {
                message: e.to_string(),
            })?;
        descriptor.server_url()?;
        Ok(descriptor)
    }

    /// The advertised backend URL
    pub fn server_url(&self) -> Result<&str> {
        let url = self
            .rag_server_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ConfigError::InvalidDescriptor {
                message: "missing rag_server_url".to_string(),
            })?;

        if !is_absolute_http_url(url) {
            return Err(ConfigError::InvalidDescriptor {
                message: format!("rag_server_url is not an http(s) URL: {}", url),
            });
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_source_is_local() {
        let config = DescriptorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.source(),
            DescriptorSource::Local(PathBuf::from("./tunnel_config.json"))
        );
    }

    #[test]
    fn test_relative_location_joins_site_url() {
        let config = DescriptorConfig {
            site_url: Some("https://example.github.io/LocalSearchBench/".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.source(),
            DescriptorSource::Remote(
                "https://example.github.io/LocalSearchBench/tunnel_config.json".to_string()
            )
        );
    }

    #[test]
    fn test_absolute_location_is_remote() {
        let config = DescriptorConfig {
            location: "https://example.org/tunnel_config.json".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.source(),
            DescriptorSource::Remote("https://example.org/tunnel_config.json".to_string())
        );
    }

    #[test]
    fn test_parse_descriptor() {
        let body = r#"{"rag_server_url": "https://a-b-c.trycloudflare.com", "updated_at": "2025-11-03"}"#;
        let descriptor = TunnelDescriptor::parse(body).unwrap();
        assert_eq!(
            descriptor.server_url().unwrap(),
            "https://a-b-c.trycloudflare.com"
        );
        assert_eq!(descriptor.updated_at.as_deref(), Some("2025-11-03"));
    }

    #[test]
    fn test_missing_url_rejected() {
        assert!(TunnelDescriptor::parse(r#"{"updated_at": "2025-11-03"}"#).is_err());
        assert!(TunnelDescriptor::parse(r#"{"rag_server_url": ""}"#).is_err());
    }

    #[test]
    fn test_malformed_body_rejected() {
        assert!(TunnelDescriptor::parse("<html>404</html>").is_err());
        assert!(TunnelDescriptor::parse(r#"{"rag_server_url": "not a url"}"#).is_err());
    }
}
