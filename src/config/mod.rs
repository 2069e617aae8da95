//! Config domain: motion tuning loaded from RON at startup.

mod loader;
mod validation;


pub use loader::{
    ConfigLoadError, MOTION_CONFIG_PATH, MotionConfig, load_motion_config, parse_motion_config,
};
pub use validation::{ConfigIssue, validate_config};

use bevy::prelude::*;
use std::path::Path;

/// Startup ordering: spawn actors after this set so `MotionConfig` exists.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_config.in_set(ConfigLoaded));
    }
}

fn load_config(mut commands: Commands) {
    let config = match load_motion_config(Path::new(MOTION_CONFIG_PATH)) {
        Ok(config) => {
            info!("Loaded motion config from {}", MOTION_CONFIG_PATH);
            config
        }
        Err(e) => {
            warn!("{}", e);
            warn!("Falling back to default motion config");
            MotionConfig::default()
        }
    };

    for issue in validate_config(&config) {
        warn!("Motion config: {}", issue);
    }

    commands.insert_resource(config);
}
