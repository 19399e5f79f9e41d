use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use tile_snake::game::{Difficulty, GameConfig};
use tile_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "tile_snake")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// JSON game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the square grid
    #[arg(long)]
    tiles: Option<usize>,

    /// Game speed
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Where to keep the high score
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,

    /// Log file (the terminal is taken by the game)
    #[arg(long, default_value = "tile_snake.log")]
    log_file: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(tiles) = self.tiles {
            config.tile_count = tiles;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(path) = &self.high_score_file {
            config.high_score_path = path.clone();
        }
        if self.mute {
            config.sound = false;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = cli.game_config()?;

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
