use super::ui;
use anyhow::{anyhow, Result};
use clap::Subcommand;
use console::Style;
use localsearch_client::{ConfigEvent, ConfigHandle, ConfigResolver};
use localsearch_config::{Config, ErrorFormatter};
use std::path::Path;
use std::time::Duration;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Fetch the descriptor once and print the backend URL
    Resolve,
    /// Poll the descriptor and report backend URL changes until Ctrl-C
    Watch {
        /// Seconds between polls (defaults to descriptor.poll_interval_secs)
        #[arg(long)]
        interval: Option<u64>,
    },
}

/// Defaults < config file < environment, plus the `--descriptor` override
pub fn load_config(path: Option<&Path>, descriptor: Option<&str>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    };
    let mut config = loaded.map_err(|e| anyhow!(ErrorFormatter::new(e).format()))?;

    if let Some(location) = descriptor {
        config.descriptor.location = location.to_string();
    }
    Ok(config)
}

pub async fn handle_config(action: ConfigAction, config: Config) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Resolve => {
            let handle = ConfigHandle::new(config);
            let mut events = handle.subscribe();
            let resolved = ConfigResolver::new(handle).resolve().await;

            ui::print_key_value("Descriptor", &resolved.descriptor.location);
            ui::print_key_value("Backend URL", &resolved.server.base_url);
            if !matches!(events.try_recv(), Ok(ConfigEvent::Loaded(_))) {
                ui::print_warning("descriptor not applied, using configured URL");
            }
        }
        ConfigAction::Watch { interval } => {
            let secs = interval.unwrap_or(config.descriptor.poll_interval_secs);
            watch(config, Duration::from_secs(secs)).await?;
        }
    }
    Ok(())
}

async fn watch(config: Config, period: Duration) -> Result<()> {
    let handle = ConfigHandle::new(config);
    let resolver = ConfigResolver::new(handle.clone());
    let mut events = handle.subscribe();

    let current = resolver.resolve().await;
    ui::print_key_value("Backend URL", &current.server.base_url);
    println!(
        "{}",
        Style::new()
            .dim()
            .apply_to(format!("Polling every {}s, Ctrl-C to stop", period.as_secs()))
    );

    let task = resolver.watch(period);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => match event {
                Ok(ConfigEvent::UrlChanged { old, new }) => {
                    ui::print_success(&format!("Backend moved: {} -> {}", old, new));
                }
                Ok(_) => {}
                Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => {}
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            },
        }
    }
    task.abort();
    Ok(())
}
