pub mod catalog;
pub mod config;
pub mod health;
pub mod leaderboard;
pub mod search;
pub mod ui;

pub use catalog::{handle_cities, handle_examples};
pub use config::{handle_config, ConfigAction};
pub use health::handle_health;
pub use leaderboard::handle_leaderboard;
pub use search::{handle_search, SearchArgs};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "localsearch")]
#[command(about = "Client for the LocalSearchBench local-life search playground")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Descriptor location (URL or file) that overrides the configured one
    #[arg(long, value_name = "LOCATION", global = true)]
    pub descriptor: Option<String>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or resolve the backend configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Check that the backend answers its health endpoint
    Health,
    /// Retrieval-augmented search over the merchant database
    Rag(SearchArgs),
    /// Web search
    Web(SearchArgs),
    /// Multi-step agentic search
    Agentic(SearchArgs),
    /// List supported cities
    Cities,
    /// List built-in example queries
    Examples,
    /// Show a leaderboard table, optionally sorted by header clicks
    Leaderboard {
        /// Leaderboard JSON file
        file: PathBuf,

        /// Column index to click; repeat to click several times
        #[arg(long)]
        click: Vec<usize>,
    },
}
