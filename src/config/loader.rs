//! Loader for the motion tuning file.

use bevy::prelude::*;
use ron::Options;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::collision::ColliderSettings;
use crate::motor::MotionParameters;

/// Where the sandbox looks for tuning, relative to the working directory.
pub const MOTION_CONFIG_PATH: &str = "assets/data/motion.ron";

/// Tuning shared by every actor spawned after startup.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub parameters: MotionParameters,
    pub collider: ColliderSettings,
    /// Full width and height of the actor's box.
    pub actor_size: Vec2,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            parameters: MotionParameters::default(),
            collider: ColliderSettings::default(),
            actor_size: Vec2::new(0.97, 1.97),
        }
    }
}

#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ConfigLoadError {}

fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a `MotionConfig` from RON text. Missing fields take their defaults.
pub fn parse_motion_config(contents: &str) -> Result<MotionConfig, ConfigLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| ConfigLoadError {
            file: "<inline>".to_string(),
            message: format!("Parse error: {}", e),
        })
}

pub fn load_motion_config(path: &Path) -> Result<MotionConfig, ConfigLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_motion_config(&contents).map_err(|e| ConfigLoadError {
        file: file_name,
        message: e.message,
    })
}
