use anyhow::{Context, Result};
use clap::Parser;
use snake_engine::game::{GameConfig, GameEngine};
use snake_engine::logger;
use snake_engine::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_engine")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// TOML file overriding the default game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Write debug logs to this file (level from RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        logger::init(path)?;
    }

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    log::debug!("Using config: {:?}", config);

    if cli.dump_config {
        print!("{}", config.to_toml().context("Failed to render config")?);
        return Ok(());
    }

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };

    let mut human_mode = HumanMode::new(engine);
    human_mode.run().await
}
