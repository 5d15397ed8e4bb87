//! Backend discovery and health probing.
//!
//! The public demo backend sits behind a tunnel whose address rotates. The
//! current address is published in a small JSON descriptor; the resolver
//! fetches it, writes the URL into the shared [`ConfigHandle`] and falls
//! back silently to whatever is configured when anything goes wrong.

use crate::error::ResolveError;
use crate::handle::{ConfigHandle, Publish};
use crate::no_cache_headers;
use localsearch_config::{Config, DescriptorSource, TunnelDescriptor};
use reqwest::Client;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ConfigResolver {
    handle: ConfigHandle,
    client: Client,
}

impl ConfigResolver {
    pub fn new(handle: ConfigHandle) -> Self {
        Self::with_client(handle, Client::new())
    }

    pub fn with_client(handle: ConfigHandle, client: Client) -> Self {
        Self { handle, client }
    }

    pub fn handle(&self) -> &ConfigHandle {
        &self.handle
    }

    /// Apply the descriptor if it can be fetched and carries a usable URL.
    ///
    /// Publishes `ConfigEvent::Loaded` on every success. On failure the
    /// configuration is left as it was and nothing is published. Always
    /// returns the configuration in effect afterwards.
    pub async fn resolve(&self) -> Config {
        match self.fetch_server_url().await {
            Ok(url) => self.handle.set_base_url(&url, Publish::Loaded),
            Err(e) => {
                warn!(
                    error = %e,
                    base_url = %self.handle.base_url(),
                    "Failed to load dynamic config, using configured backend URL"
                );
                self.handle.snapshot()
            }
        }
    }

    /// Re-read the descriptor and publish `UrlChanged` + `Updated` if the
    /// backend moved. Returns true when the URL changed.
    pub async fn refresh(&self) -> bool {
        match self.fetch_server_url().await {
            Ok(url) => {
                let before = self.handle.base_url();
                self.handle.set_base_url(&url, Publish::OnChange);
                before != url
            }
            Err(e) => {
                warn!(error = %e, "Descriptor refresh failed");
                false
            }
        }
    }

    /// Poll the descriptor every `period` until the returned task is aborted
    pub fn watch(&self, period: Duration) -> JoinHandle<()> {
        let resolver = self.clone();
        let period = period.max(Duration::from_millis(1));

        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                resolver.refresh().await;
            }
        })
    }

    /// GET `{base_url}{health_check}`; true only for a 2xx answer within
    /// the health timeout.
    pub async fn check_health(&self, config: &Config) -> bool {
        let url = config.health_url();
        let request = self.client.get(&url).headers(no_cache_headers()).send();

        match timeout(config.timeouts.health(), request).await {
            Ok(Ok(resp)) => {
                debug!(url = %url, status = %resp.status(), "Health check");
                resp.status().is_success()
            }
            Ok(Err(e)) => {
                warn!(url = %url, error = %e, "Backend connection failed");
                false
            }
            Err(_) => {
                warn!(url = %url, "Health check timed out");
                false
            }
        }
    }

    async fn fetch_server_url(&self) -> Result<String, ResolveError> {
        let source = self.handle.snapshot().descriptor.source();
        let body = match &source {
            DescriptorSource::Remote(url) => self.fetch_remote(url).await?,
            DescriptorSource::Local(path) => read_local(path).await?,
        };
        debug!(?source, "Fetched descriptor");

        let descriptor = TunnelDescriptor::parse(&body)?;
        Ok(descriptor.server_url()?.to_string())
    }

    async fn fetch_remote(&self, url: &str) -> Result<String, ResolveError> {
        let resp = self
            .client
            .get(url)
            .query(&[("t", cache_buster())])
            .headers(no_cache_headers())
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ResolveError::Status(resp.status().as_u16()));
        }
        Ok(resp.text().await?)
    }
}

async fn read_local(path: &Path) -> Result<String, ResolveError> {
    Ok(tokio::fs::read_to_string(path).await?)
}

/// Milliseconds since the epoch, unique enough per request
fn cache_buster() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
        .to_string()
}
