use std::path::Path;

use crate::error::ConfigError;

/// Board setup.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board dimension N (the board is N x N).
    pub dimension: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { dimension: 3 }
    }
}

/// Engine behavior.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Artificial "thinking" pause before the computer starts its search, in
    /// milliseconds. Cancellable throughout.
    pub think_delay_ms: u64,
    /// Fixed RNG seed for reproducible demo runs. The interactive
    /// scheduler's workers always draw from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            think_delay_ms: 750,
            seed: None,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            game: GameConfig::default(),
            engine: EngineConfig::default(),
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

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.dimension < 1 {
            return Err(ConfigError::Validation(
                "game.dimension must be >= 1".into(),
            ));
        }
        if self.game.dimension > 9 {
            return Err(ConfigError::Validation(
                "game.dimension must be <= 9".into(),
            ));
        }
        if self.engine.think_delay_ms > 10_000 {
            return Err(ConfigError::Validation(
                "engine.think_delay_ms must be <= 10000".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
