use std::path::PathBuf;

/// Errors raised by board mutation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("cell ({row}, {col}) is outside the {dim}x{dim} board")]
    OutOfBounds { row: usize, col: usize, dim: usize },
}

/// A move search aborted by a cancellation request. Distinct from "no move
/// available", which is an ordinary `None` outcome.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
#[error("move search cancelled")]
pub struct Cancelled;

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        let err = BoardError::OutOfBounds {
            row: 5,
            col: 1,
            dim: 3,
        };
        assert_eq!(err.to_string(), "cell (5, 1) is outside the 3x3 board");
    }

    #[test]
    fn test_cancelled_display() {
        assert_eq!(Cancelled.to_string(), "move search cancelled");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("game.dimension must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: game.dimension must be >= 1"
        );
    }
}
