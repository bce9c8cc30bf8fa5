use std::path::PathBuf;

/// Errors from applying a move to a board or a game session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is out of range (board has {cols} columns)")]
    InvalidColumn { column: usize, cols: usize },

    #[error("the game is over")]
    GameOver,

    #[error("it is the computer's turn")]
    NotYourTurn,
}

/// Errors from the move search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no legal moves: the board is full")]
    NoLegalMoves,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::ColumnFull { column: 3 };
        assert_eq!(err.to_string(), "column 3 is full");

        let err = MoveError::InvalidColumn { column: 9, cols: 7 };
        assert_eq!(
            err.to_string(),
            "column 9 is out of range (board has 7 columns)"
        );
    }

    #[test]
    fn test_search_error_display() {
        assert_eq!(
            SearchError::NoLegalMoves.to_string(),
            "no legal moves: the board is full"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("board.connect_target must be <= 7".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: board.connect_target must be <= 7"
        );
    }
}
