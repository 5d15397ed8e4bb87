//! Config files on disk. The format follows the extension.

use super::merge::ConfigOverlay;
use crate::{error::ConfigError, Config, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml" | "yaml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnknownFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Deserialize `content`; `origin` is quoted in error messages
    pub fn parse(self, content: &str, origin: Option<&str>) -> Result<Config> {
        self.deserialize(content, origin)
    }

    /// Only the fields `content` actually sets
    pub fn parse_overlay(self, content: &str, origin: Option<&str>) -> Result<ConfigOverlay> {
        self.deserialize(content, origin)
    }

    fn deserialize<T: DeserializeOwned>(self, content: &str, origin: Option<&str>) -> Result<T> {
        match self {
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| ConfigError::from_yaml_error(e, content, origin)),
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|e| ConfigError::from_toml_error(e, content, origin))
            }
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::from_json_error(e, content, origin)),
        }
    }
}

/// Read one config file as a layer; validation waits for the merged result
pub fn load_overlay<P: AsRef<Path>>(path: P) -> Result<ConfigOverlay> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let content = read(path)?;

    format.parse_overlay(&content, path.to_str())
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::IoError {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("a.yaml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new(".localsearch.yml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new(".localsearch.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("tunnel_config.json")).unwrap(),
            ConfigFormat::Json
        );
        assert!(ConfigFormat::from_path(Path::new("config.txt")).is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml = r#"
[endpoints]
rag_search = "/api/v1/rag/search"

[descriptor]
site_url = "https://example.github.io/LocalSearchBench"
poll_interval_secs = 60
"#;
        let config = ConfigFormat::Toml.parse(toml, None).unwrap();
        assert_eq!(config.endpoints.rag_search, "/api/v1/rag/search");
        assert_eq!(config.endpoints.health_check, "/health");
        assert_eq!(config.descriptor.poll_interval_secs, 60);
    }

    #[test]
    fn test_toml_type_error_names_file() {
        let err = ConfigFormat::Toml
            .parse("[defaults]\ntop_k = \"many\"\n", Some(".localsearch.toml"))
            .unwrap_err();
        assert!(err.to_string().contains(".localsearch.toml"));
    }

    #[test]
    fn test_partial_yaml() {
        let config = ConfigFormat::Yaml
            .parse("timeouts:\n  rag_ms: 90000\n", None)
            .unwrap();
        assert_eq!(config.timeouts.rag_ms, 90_000);
        assert_eq!(config.timeouts.web_ms, 10_000);
        assert_eq!(ConfigFormat::Yaml.parse("{}", None).unwrap(), Config::default());
    }

    #[test]
    fn test_bad_yaml_bool() {
        let yaml = "defaults:\n  use_reranker: sometimes\n";
        assert!(ConfigFormat::Yaml.parse(yaml, None).is_err());
    }

    #[test]
    fn test_overlay_only_sets_present_fields() {
        let overlay = ConfigFormat::Toml
            .parse_overlay("[defaults]\nuse_reranker = true\n", None)
            .unwrap();
        assert_eq!(overlay.defaults.use_reranker, Some(true));
        assert_eq!(overlay.defaults.top_k, None);
        assert_eq!(overlay.server.base_url, None);
        assert!(ConfigFormat::Yaml.parse_overlay("{}", None).unwrap().is_empty());
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{ "defaults": { "top_k": 5, "use_reranker": false } }"#;
        let config = ConfigFormat::Json.parse(json, None).unwrap();
        assert_eq!(config.defaults.top_k, 5);
        assert!(!config.defaults.use_reranker);
        assert_eq!(config.defaults.retriever_model, "Qwen3-Embedding-8B");
    }
}
