//! Layered loading: defaults, then files, environment and explicit
//! overrides in the order they were added.

pub mod env;
pub mod file;
pub mod merge;

use crate::{Config, Result, Validate};
use std::path::{Path, PathBuf};

pub use file::ConfigFormat;
pub use merge::ConfigOverlay;

#[derive(Debug, Clone)]
pub enum ConfigSource {
    File(PathBuf),
    /// `LOCALSEARCH_*` variables of the current process
    Environment,
    Explicit(ConfigOverlay),
}

impl ConfigSource {
    /// The overlay this source contributes, `None` when it has nothing to say
    fn overlay(self) -> Result<Option<ConfigOverlay>> {
        match self {
            ConfigSource::File(path) => file::load_overlay(path).map(Some),
            ConfigSource::Environment => env::from_env(),
            ConfigSource::Explicit(overlay) => Ok(Some(overlay)),
        }
    }
}

/// ```no_run
/// use localsearch_config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .with_file(".localsearch.toml")
///     .with_env()
///     .build()?;
/// # Ok::<(), localsearch_config::ConfigError>(())
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    layers: Vec<ConfigSource>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.layer(ConfigSource::File(path.as_ref().to_path_buf()))
    }

    pub fn with_env(self) -> Self {
        self.layer(ConfigSource::Environment)
    }

    /// Caller-supplied overrides; only the fields set in `overlay` apply
    pub fn with_overrides(self, overlay: ConfigOverlay) -> Self {
        self.layer(ConfigSource::Explicit(overlay))
    }

    fn layer(mut self, source: ConfigSource) -> Self {
        self.layers.push(source);
        self
    }

    /// Apply every layer over the defaults, then validate the result
    pub fn build(self) -> Result<Config> {
        let config = self
            .layers
            .into_iter()
            .try_fold(Config::default(), |acc, source| {
                Ok::<_, crate::ConfigError>(match source.overlay()? {
                    Some(overlay) => merge::merge(acc, overlay),
                    None => acc,
                })
            })?;

        config.validate()?;
        Ok(config)
    }
}

/// Files probed by [`Config::load`], first match wins
pub const DEFAULT_PATHS: [&str; 4] = [
    ".localsearch.toml",
    ".localsearch.yml",
    ".localsearch.yaml",
    ".localsearch.json",
];

impl Config {
    /// First of [`DEFAULT_PATHS`] found in the working directory, then the
    /// environment. Plain defaults when neither exists.
    pub fn load() -> Result<Self> {
        match DEFAULT_PATHS.iter().find(|p| Path::new(p).exists()) {
            Some(found) => Self::from_file(found),
            None => ConfigBuilder::new().with_env().build(),
        }
    }

    /// `path` plus the environment overlay
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        ConfigBuilder::new().with_file(path).with_env().build()
    }
}
