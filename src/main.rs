mod config;
mod game;
mod term;
mod snake;
mod world;

use std::{fs::File, process::exit};

use anyhow::{Context, Result};
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::config::GameConfig;
use crate::game::SnakeGame;
use crate::term::TermManager;

pub type TermInt = u16;
pub type Coords = (u16, u16);

// The screen belongs to the game, so diagnostics go to a file
const LOG_FILE: &str = "snake.log";

fn main() {
    if let Err(e) = run() {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

fn run() -> Result<()> {
    let log_file = File::create(LOG_FILE).context("Failed to create log file")?;
    WriteLogger::init(LevelFilter::Info, Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = GameConfig::default();
    info!("Starting snake on a {}x{} grid, tick every {:?}", config.width, config.height, config.tick_interval);

    let mut term = TermManager::new();
    term.setup()?;

    // Restore the terminal whatever happened in the game
    let result = SnakeGame::new(config, &mut term).and_then(|mut game| game.run());
    let score = settle(result, term.restore())?;

    info!("Finished with score {}", score);
    Ok(())
}

/// The game's own error wins over a failed terminal restore.
fn settle(result: Result<u32>, restored: Result<()>) -> Result<u32> {
    match (result, restored) {
        (Err(e), Err(restore_err)) => {
            error!("Failed to restore terminal: {:#}", restore_err);
            Err(e)
        }
        (result, restored) => {
            restored?;
            result
        }
    }
}
