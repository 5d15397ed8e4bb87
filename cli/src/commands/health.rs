use super::ui;
use anyhow::{bail, Result};
use localsearch_client::{ConfigHandle, ConfigResolver};
use localsearch_config::Config;

pub async fn handle_health(config: Config) -> Result<()> {
    let resolver = ConfigResolver::new(ConfigHandle::new(config));
    let config = resolver.resolve().await;

    if resolver.check_health(&config).await {
        ui::print_success(&format!("Backend reachable at {}", config.server.base_url));
        Ok(())
    } else {
        bail!(
            "Cannot reach backend at {}. Check that the server is running and the URL is correct",
            config.health_url()
        )
    }
}
