use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use thiserror::Error;

/// Ticks per second the flash budget is expressed in.
pub const FLASH_WINDOW_TICKS: u32 = 60;

/// A 720x480 window of 24px tiles, less a one-tile border and a status row.
const DEFAULT_WIDTH: u16 = 28;
const DEFAULT_HEIGHT: u16 = 17;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: u16, height: u16 },
    #[error("invalid configuration: move interval must be at least one tick")]
    ZeroMoveInterval,
    #[error("invalid configuration: flash frequency must be within 1..=60, got {0}")]
    FlashFrequency(u32),
    #[error("invalid configuration: tick period must be at least 1ms")]
    ZeroTickPeriod,
}

/// Whether the high score remembers the best run or only the latest one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighScorePolicy {
    /// The finished run's score always replaces the high score.
    LastRun,
    /// The high score only ever goes up.
    Best,
}

/// Everything the game core needs to know about the board and its timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rules {
    pub width: i32,
    pub height: i32,
    pub move_every: u32,
    pub flash_freq: u32,
    pub high_score: HighScorePolicy,
}

impl Rules {
    /// Visibility toggles played after a collision.
    pub fn total_flashes(&self) -> u32 {
        FLASH_WINDOW_TICKS / self.flash_freq
    }

    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            width: DEFAULT_WIDTH as i32,
            height: DEFAULT_HEIGHT as i32,
            move_every: 15,
            flash_freq: 5,
            high_score: HighScorePolicy::LastRun,
        }
    }
}

/// Command-line settings for a game session.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Settings {
    /// Board width in tiles.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u16,

    /// Board height in tiles.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u16,

    /// Ticks between two moves of the snake.
    #[arg(long, default_value_t = 15)]
    pub move_every: u32,

    /// Ticks between two flashes after a crash.
    #[arg(long, default_value_t = 5)]
    pub flash_freq: u32,

    /// Length of one tick in milliseconds.
    #[arg(long, default_value_t = 16)]
    pub tick_ms: u64,

    /// Seed for apple and spawn placement. Random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where log output is written.
    #[arg(long, value_name = "PATH", default_value = "snekgrid.log")]
    pub log_file: PathBuf,

    /// Keep the best score instead of the last run's score.
    #[arg(long)]
    pub keep_best: bool,

    /// Log phase changes and apple placement too.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }
        if self.move_every == 0 {
            return Err(ConfigError::ZeroMoveInterval);
        }
        if self.flash_freq == 0 || self.flash_freq > FLASH_WINDOW_TICKS {
            return Err(ConfigError::FlashFrequency(self.flash_freq));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        Ok(())
    }

    pub fn rules(&self) -> Rules {
        Rules {
            width: self.width as i32,
            height: self.height as i32,
            move_every: self.move_every,
            flash_freq: self.flash_freq,
            high_score: if self.keep_best {
                HighScorePolicy::Best
            } else {
                HighScorePolicy::LastRun
            },
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}
