use std::path::Path;

use crate::ai::Difficulty;
use crate::error::ConfigError;
use crate::game::{
    sanitize_dimensions, Board, GameMode, DEFAULT_COLS, DEFAULT_CONNECT, DEFAULT_ROWS,
};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub game: GameConfig,
    pub ui: UiConfig,
}

/// Board geometry. Values below the minimums fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub connect_target: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            connect_target: DEFAULT_CONNECT,
        }
    }
}

impl BoardConfig {
    /// The dimensions a board built from this config will actually have.
    pub fn sanitized(&self) -> BoardConfig {
        let (rows, cols, connect_target) =
            sanitize_dimensions(self.rows, self.cols, self.connect_target);
        BoardConfig {
            rows,
            cols,
            connect_target,
        }
    }

    /// Create an empty board with these dimensions.
    pub fn build(&self) -> Board {
        Board::new(self.rows, self.cols, self.connect_target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Computer strength in single-player games.
    pub difficulty: Difficulty,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            mode: GameMode::Single,
            difficulty: Difficulty::Medium,
        }
    }
}

/// Presentation timing for the terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Pause before the computer's reply appears.
    pub ai_delay_ms: u64,
    /// Time between highlight toggles of a winning line.
    pub blink_interval_ms: u64,
    /// Number of highlight toggles before the next game starts.
    pub blink_count: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            ai_delay_ms: 500,
            blink_interval_ms: 300,
            blink_count: 6,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let board = self.board.sanitized();
        let longest = board.rows.max(board.cols);
        if board.connect_target > longest {
            return Err(ConfigError::Validation(format!(
                "board.connect_target must be <= {longest} for a {}x{} board",
                board.rows, board.cols
            )));
        }

        if self.ui.blink_count > 0 && self.ui.blink_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "ui.blink_interval_ms must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.board, BoardConfig::default());
        assert_eq!(config.game.mode, GameMode::Single);
        assert_eq!(config.game.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[board]
cols = 10
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.board.cols, 10);
        // Other fields should be defaults
        assert_eq!(config.board.rows, 6);
        assert_eq!(config.board.connect_target, 4);
        assert_eq!(config.ui.ai_delay_ms, 500);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_enums_parse_lowercase() {
        let toml_str = r#"
[game]
mode = "two"
difficulty = "hard"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.mode, GameMode::Two);
        assert_eq!(config.game.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_unknown_difficulty_is_a_parse_error() {
        let result: Result<AppConfig, _> = toml::from_str("[game]\ndifficulty = \"brutal\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_unreachable_target() {
        let mut config = AppConfig::default();
        config.board.connect_target = 8;
        assert!(config.validate().is_err());

        config.board.cols = 8;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_small_dimensions_are_sanitized_not_rejected() {
        let mut config = AppConfig::default();
        config.board.rows = 2;
        config.board.connect_target = 1;
        config.validate().expect("clamped dimensions are valid");
        assert_eq!(config.board.sanitized(), BoardConfig::default());

        let board = config.board.build();
        assert_eq!((board.rows(), board.cols(), board.connect_target()), (6, 7, 4));
    }

    #[test]
    fn test_validation_rejects_zero_blink_interval() {
        let mut config = AppConfig::default();
        config.ui.blink_interval_ms = 0;
        assert!(config.validate().is_err());

        config.ui.blink_count = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[board]
rows = 8
cols = 9
connect_target = 5
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(
            config.board,
            BoardConfig {
                rows: 8,
                cols: 9,
                connect_target: 5
            }
        );
        // Others are defaults
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[board]\nrows = 4\ncols = 4\nconnect_target = 5\n").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "got {err}");
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = AppConfig::load(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
