//! Runtime configuration, loaded from JSON.
//!
//! Every field has a default, so a config file only needs the values it
//! changes.

use crate::creature::CreatureStyle;
use serde::{Deserialize, Serialize};
use stagehand_render::{CameraConfig, SurfaceConfig};
use std::path::Path;

/// Slowest accepted refresh: one frame every 100 seconds.
pub const MIN_FRAME_RATE: f64 = 0.01;
pub const MAX_FRAME_RATE: f64 = 1000.0;

/// Errors from loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub camera: CameraConfig,
    pub surface: SurfaceConfig,
    pub creature: CreatureStyle,
    /// Target refresh rate in frames per second.
    pub frame_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            surface: SurfaceConfig::default(),
            creature: CreatureStyle::default(),
            frame_rate: 60.0,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Checks values the renderer does not check itself.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_FRAME_RATE..=MAX_FRAME_RATE).contains(&self.frame_rate) {
            return Err(ConfigError::Invalid(format!(
                "frame_rate {} must be between {MIN_FRAME_RATE} and {MAX_FRAME_RATE}",
                self.frame_rate
            )));
        }
        if let Some(problem) = self.camera.problem() {
            return Err(ConfigError::Invalid(problem));
        }
        Ok(())
    }
}
