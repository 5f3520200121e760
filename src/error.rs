use std::path::PathBuf;

/// A move that cannot be played on the current board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range (expected 0..=6)")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,
}

/// Errors raised when building a board from a raw grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid cell value {value} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, value: u8 },

    #[error("piece at row {row}, column {col} has an empty cell beneath it")]
    FloatingPiece { row: usize, col: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
