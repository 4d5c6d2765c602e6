//! Configuration storage.

pub mod config;

pub use config::{AppConfig, CelebrationPolicy, CheckpointSettings, CoachSettings, ConfigError};
