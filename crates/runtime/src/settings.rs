//! Runtime settings
//!
//! Loaded from an optional `classroom` config file plus `CLASSROOM_`-prefixed
//! environment variables (double-underscore nesting, e.g.
//! `CLASSROOM_SYNC__BROKER_URL`). Every field has a default so the pipeline
//! runs unconfigured.

use attention::AttentionConfig;
use serde::Deserialize;
use status_sync::SyncConfig;

/// Frames buffered between the landmark source and the monitor task
pub const DEFAULT_FRAME_QUEUE: usize = 8;

/// Complete runtime settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Broker and class/student identity
    pub sync: SyncConfig,

    /// Pipeline thresholds
    pub attention: AttentionConfig,

    /// Frame channel capacity; frames beyond it are dropped, not queued
    pub frame_queue: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sync: SyncConfig::default(),
            attention: AttentionConfig::default(),
            frame_queue: DEFAULT_FRAME_QUEUE,
        }
    }
}

impl Settings {
    /// Load settings from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("classroom").required(false))
            .add_source(
                config::Environment::with_prefix("CLASSROOM")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.frame_queue, DEFAULT_FRAME_QUEUE);
        assert_eq!(settings.sync.broker_port, 1883);
        assert_eq!(settings.attention.calibration_frames, 30);
    }

    #[test]
    fn test_partial_overrides_keep_defaults() {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[sync]\nclass_id = 42\nstudent_name = \"Mina\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.sync.class_id, 42);
        assert_eq!(settings.sync.student_name, "Mina");
        assert_eq!(settings.sync.broker_port, 1883);
        assert_eq!(settings.attention.calibration_frames, 30);
    }
}
