//! Error types for pod generation, storage, configuration and roster import.

use thiserror::Error;

/// Result type alias for pod generation and swap operations.
pub type PodResult<T> = Result<T, PodError>;

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Input validation failures raised before any pod is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PodError {
    #[error("pod size must be at least 2, got {0}")]
    InvalidPodSize(usize),

    #[error("league must have at least 2 players, got {0}")]
    InsufficientPlayers(usize),

    #[error("player {0} not found in roster")]
    UnknownPlayer(String),

    #[error("player {0} appears in multiple fixed pods")]
    DuplicateAssignment(String),

    #[error("fixed pod {index} must contain at least 2 players, got {size}")]
    FixedPodTooSmall { index: usize, size: usize },

    #[error("players {player1} and {player2} are both in pod {pod_id}, nothing to swap")]
    SamePod {
        pod_id: u32,
        player1: String,
        player2: String,
    },

    #[error("player {0} not found in any pod")]
    PlayerNotFound(String),
}

/// Errors from reading or writing stored documents.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from loading `league.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors from importing a roster CSV.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("roster file contains no players")]
    Empty,
}
