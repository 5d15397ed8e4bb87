mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Cli, Commands};
use localsearch_core::SearchMode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        commands::ui::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // cities/examples/leaderboard work without a valid config
    let config = commands::config::load_config(cli.config.as_deref(), cli.descriptor.as_deref());

    match cli.command {
        Commands::Config { action } => commands::handle_config(action, config?).await?,
        Commands::Health => commands::handle_health(config?).await?,
        Commands::Rag(args) => commands::handle_search(SearchMode::Rag, args, config?).await?,
        Commands::Web(args) => commands::handle_search(SearchMode::Web, args, config?).await?,
        Commands::Agentic(args) => {
            commands::handle_search(SearchMode::Agentic, args, config?).await?
        }
        Commands::Cities => commands::handle_cities(),
        Commands::Examples => commands::handle_examples(),
        Commands::Leaderboard { file, click } => commands::handle_leaderboard(&file, &click)?,
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `-v`
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
