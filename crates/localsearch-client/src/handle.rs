//! Shared configuration with change notifications.

use localsearch_config::Config;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;
use tracing::info;

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEvent {
    /// A descriptor was applied by `resolve`
    Loaded(Config),
    /// The backend URL changed while polling
    UrlChanged { old: String, new: String },
    /// Follows every `UrlChanged`
    Updated(Config),
}

/// How a base URL write is announced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Publish {
    /// Always emit `Loaded`
    Loaded,
    /// Emit `UrlChanged` + `Updated` only if the URL differs
    OnChange,
}

/// Cloneable handle to the live configuration
///
/// Readers take snapshots. The base URL is written only from inside this
/// crate (by the resolver), and every write is published to subscribers.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<Config>>,
    events: broadcast::Sender<ConfigEvent>,
}

impl ConfigHandle {
    pub fn new(config: Config) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(config)),
            events,
        }
    }

    pub fn snapshot(&self) -> Config {
        self.read().clone()
    }

    pub fn base_url(&self) -> String {
        self.read().server.base_url.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConfigEvent> {
        self.events.subscribe()
    }

    pub(crate) fn set_base_url(&self, url: &str, publish: Publish) -> Config {
        let (old, snapshot) = {
            let mut config = self.write();
            let old = std::mem::replace(&mut config.server.base_url, url.to_string());
            (old, config.clone())
        };

        match publish {
            Publish::Loaded => {
                info!(url, "Loaded backend URL from descriptor");
                self.notify(ConfigEvent::Loaded(snapshot.clone()));
            }
            Publish::OnChange if old != url => {
                info!(old = %old, new = url, "Backend URL changed");
                self.notify(ConfigEvent::UrlChanged {
                    old,
                    new: url.to_string(),
                });
                self.notify(ConfigEvent::Updated(snapshot.clone()));
            }
            Publish::OnChange => {}
        }

        snapshot
    }

    fn notify(&self, event: ConfigEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }

    fn read(&self) -> RwLockReadGuard<'_, Config> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Config> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loaded_always_published() {
        let handle = ConfigHandle::default();
        let mut rx = handle.subscribe();

        handle.set_base_url("http://localhost:8000", Publish::Loaded);
        handle.set_base_url("http://localhost:8000", Publish::Loaded);

        assert!(matches!(rx.try_recv(), Ok(ConfigEvent::Loaded(_))));
        assert!(matches!(rx.try_recv(), Ok(ConfigEvent::Loaded(_))));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_change_published_once() {
        let handle = ConfigHandle::default();
        let mut rx = handle.subscribe();

        handle.set_base_url("https://a.trycloudflare.com", Publish::OnChange);
        handle.set_base_url("https://a.trycloudflare.com", Publish::OnChange);

        assert_eq!(
            rx.try_recv().unwrap(),
            ConfigEvent::UrlChanged {
                old: "http://localhost:8000".to_string(),
                new: "https://a.trycloudflare.com".to_string(),
            }
        );
        match rx.try_recv().unwrap() {
            ConfigEvent::Updated(config) => {
                assert_eq!(config.server.base_url, "https://a.trycloudflare.com")
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_clones_share_state() {
        let handle = ConfigHandle::default();
        let other = handle.clone();
        handle.set_base_url("https://b.example.org", Publish::OnChange);
        assert_eq!(other.base_url(), "https://b.example.org");
    }
}
