//! Application configuration.
//!
//! Loaded from `config.toml` in the platform data directory. A missing file
//! yields defaults, which reproduce the standard coaching thresholds.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::pose::visibility::DEFAULT_VISIBILITY_THRESHOLD;

/// How long the rep-complete feedback persists after the rep frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "frames")]
pub enum CelebrationPolicy {
    /// Keep it for as long as the athlete stays in the extended position
    #[default]
    WhileExtended,
    /// Keep it for this many further extended frames
    Frames(u32),
    /// Only the rep-completing frame shows it
    SingleFrame,
}

impl CelebrationPolicy {
    /// Whether the feedback may still show on the `frame`-th extended frame
    /// after the rep (1-based).
    pub fn keeps(&self, frame: u32) -> bool {
        match self {
            CelebrationPolicy::WhileExtended => true,
            CelebrationPolicy::Frames(limit) => frame <= *limit,
            CelebrationPolicy::SingleFrame => false,
        }
    }
}

/// Classification settings shared by every analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachSettings {
    /// Landmarks must be strictly above this confidence to be trusted
    pub visibility_threshold: f32,
    /// Frame gaps at or above this are dropped from plank hold time
    pub max_frame_gap_ms: f64,
    /// Rep-complete feedback persistence
    pub celebration: CelebrationPolicy,
}

impl Default for CoachSettings {
    fn default() -> Self {
        Self {
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            max_frame_gap_ms: 1000.0,
            celebration: CelebrationPolicy::default(),
        }
    }
}

/// When checkpoints are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckpointSettings {
    /// Emit every time reps reach a multiple of this
    pub rep_interval: u32,
    /// Emit every time whole hold seconds reach a multiple of this
    pub hold_interval_secs: u32,
}

impl Default for CheckpointSettings {
    fn default() -> Self {
        Self {
            rep_interval: 5,
            hold_interval_secs: 10,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Classification settings
    pub coach: CoachSettings,
    /// Checkpoint settings
    pub checkpoints: CheckpointSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            coach: CoachSettings::default(),
            checkpoints: CheckpointSettings::default(),
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "repcoach", "RepCoach")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_config_path())
}

/// Load application configuration from `path`.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        let config = AppConfig {
            data_dir: get_data_dir(),
            ..Default::default()
        };
        return Ok(config);
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = get_data_dir();

    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Save application configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save application configuration to `path`.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
