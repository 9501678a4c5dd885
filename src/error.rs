use std::path::PathBuf;

use crate::game::MoveError;

/// Precondition violations for a search request. Hitting one of these means
/// the driver asked for a move it should not have.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("search depth must be at least 1")]
    ZeroDepth,

    #[error("position is already decided")]
    TerminalState,

    #[error("no legal moves available")]
    NoLegalMoves,
}

/// Errors that can occur while driving a game session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("illegal move: {0}")]
    Move(#[from] MoveError),

    #[error("game is over")]
    GameOver,

    #[error("it is not the human's turn")]
    NotHumanTurn,

    #[error("it is not the engine's turn")]
    NotEngineTurn,

    #[error("search failed: {0}")]
    Search(#[from] SearchError),
}

/// Errors that can occur while loading or saving the scoreboard.
#[derive(Debug, thiserror::Error)]
pub enum ScoreboardError {
    #[error("failed to read scoreboard from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse scoreboard from {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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
