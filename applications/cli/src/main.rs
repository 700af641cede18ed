/// Encore CLI - inspect the response cache and simulate the playback queue
mod cache_cmd;
mod queue_cmd;

use clap::{Parser, Subcommand};
use encore_cache::{CacheConfig, ReadThroughCache, RedbStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Encore client core tools", long_about = None)]
struct Cli {
    /// Cache configuration file (TOML)
    #[arg(short, long, global = true, env = "ENCORE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Operate on a persistent cache file
    Cache {
        /// Database file backing the persistent tier
        #[arg(short, long, env = "ENCORE_CACHE_FILE", default_value = "encore-cache.redb")]
        store: PathBuf,

        #[command(subcommand)]
        action: cache_cmd::CacheAction,
    },
    /// Load a playlist and replay transport controls
    Queue {
        /// JSON array of media items
        playlist: PathBuf,

        /// Index of the item to start from
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// Steps to apply in order
        #[arg(value_enum)]
        steps: Vec<queue_cmd::Step>,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encore_cli=info,encore_cache=info,encore_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Cache { store, action } => {
            let config = CacheConfig::load(cli.config.as_deref())?;
            let store = RedbStore::open(&store)?;
            let cache = ReadThroughCache::new(config, Arc::new(store));
            println!("{}", cache_cmd::run(&cache, action)?);
        }
        Commands::Queue {
            playlist,
            start,
            steps,
        } => {
            let items = queue_cmd::load_playlist(&playlist)?;
            let snapshot = queue_cmd::run(items, start, &steps)?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    Ok(())
}
