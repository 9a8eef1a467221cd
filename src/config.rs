use std::time::Duration;

use crate::TermInt;

const DEFAULT_WIDTH: TermInt = 32;
const DEFAULT_HEIGHT: TermInt = 16;
const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

/// Fixed parameters of a game session
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Grid width, border columns included
    pub width: TermInt,
    /// Grid height, border rows included
    pub height: TermInt,
    /// Time between two snake steps
    pub tick_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, Duration::from_millis(DEFAULT_TICK_INTERVAL_MS))
    }
}

impl GameConfig {
    pub fn new(width: TermInt, height: TermInt, tick_interval: Duration) -> Self {
        GameConfig { width, height, tick_interval }
    }
}
