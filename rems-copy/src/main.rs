//! rems-copy - copies REMS items from one instance to another
//!
//! **Usage:**
//! ```bash
//! rems-copy all test production --config config.json --language en --check
//! ```
//!
//! Exits non-zero on configuration or transport errors. Entities that could
//! not be migrated are listed in the report but do not change the exit code.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rems_common::api::HttpGateway;
use rems_common::entities::Kind;
use rems_common::{ConfigFile, MigrationConfig};
use rems_copy::{MigrationContext, RunMode};
use std::path::PathBuf;
use tracing::info;

/// Items selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Items {
    Licenses,
    Forms,
    Resources,
    Workflows,
    Catalogue,
    Categories,
    All,
}

impl Items {
    fn kinds(self) -> Vec<Kind> {
        match self {
            Items::Licenses => vec![Kind::License],
            Items::Forms => vec![Kind::Form],
            Items::Resources => vec![Kind::Resource],
            Items::Workflows => vec![Kind::Workflow],
            Items::Catalogue => vec![Kind::CatalogueItem],
            Items::Categories => vec![Kind::Category],
            Items::All => Kind::ALL.to_vec(),
        }
    }
}

/// Command-line arguments for rems-copy
#[derive(Parser, Debug)]
#[command(name = "rems-copy")]
#[command(about = "This tool copies REMS items from one instance to another")]
#[command(version)]
struct Args {
    /// Items to move
    #[arg(value_enum)]
    items: Items,

    /// Source environment where items are downloaded from
    source: String,

    /// Destination environment where items are uploaded to
    destination: String,

    /// Path to JSON or TOML configuration file
    #[arg(short, long, default_value = "config.json", env = "REMS_COPY_CONFIG")]
    config: PathBuf,

    /// Language used to match titles between instances (overrides the config file)
    #[arg(short, long)]
    language: Option<String>,

    /// Report what would be copied without creating or updating anything
    #[arg(long)]
    check: bool,

    /// Log every entity as it is processed
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "rems_copy=debug,rems_common=debug"
    } else {
        "rems_copy=info,rems_common=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    info!(
        "Starting rems-copy v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let file = ConfigFile::load(&args.config)
        .with_context(|| format!("load_config({})", args.config.display()))?;
    let config = MigrationConfig::resolve(
        &file,
        &args.source,
        &args.destination,
        args.language.as_deref(),
    )?;

    let source = HttpGateway::new(config.source.clone())?;
    let destination = HttpGateway::new(config.destination.clone())?;

    let mode = if args.check {
        info!("Check mode: nothing will be created or updated");
        RunMode::Check
    } else {
        RunMode::Migrate
    };

    let ctx = MigrationContext::new(&source, &destination, &config, mode);
    ctx.verify_language().await?;

    info!(
        "Copying {:?} from {} to {} (language {})",
        args.items, config.source.name, config.destination.name, config.language
    );

    let outcomes = rems_copy::migrate_all(&ctx, &args.items.kinds()).await?;

    for outcome in &outcomes {
        println!("{}", outcome);
    }

    let failed: usize = outcomes.iter().map(|o| o.failed.len()).sum();
    if failed > 0 {
        tracing::warn!("{} entities could not be migrated, see report above", failed);
    }

    Ok(())
}
