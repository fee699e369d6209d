use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// Anything that can stop the game from starting or keep running.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("could not initialise logging: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("terminal is {have_cols}x{have_rows} but the board needs at least {need_cols}x{need_rows}")]
    TerminalTooSmall {
        have_cols: u16,
        have_rows: u16,
        need_cols: u16,
        need_rows: u16,
    },
}
