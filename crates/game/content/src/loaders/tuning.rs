//! Gameplay tuning loader.
//!
//! Loads a partial [`GameConfig`] from a TOML file. Every field is
//! optional; anything omitted keeps the built-in default, so a tuning file
//! only states what it changes.

use core::time::Duration;
use std::path::Path;

use serde::{Deserialize, Serialize};

use voidgate_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TuningToml {
    #[serde(default)]
    tick_ms: Option<u64>,
    #[serde(default)]
    interact: InteractToml,
    #[serde(default)]
    motion: MotionToml,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct InteractToml {
    #[serde(default)]
    distance: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MotionToml {
    #[serde(default)]
    move_speed: Option<f32>,
    #[serde(default)]
    jump_power: Option<f32>,
    #[serde(default)]
    max_jumps: Option<u8>,
    #[serde(default)]
    base_gravity: Option<f32>,
    #[serde(default)]
    fall_gravity_mult: Option<f32>,
    #[serde(default)]
    max_fall_speed: Option<f32>,
}

/// Loader for gameplay tuning from TOML files.
pub struct TuningLoader;

impl TuningLoader {
    /// Load tuning from a TOML file, layered over the defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::load_str(&content)
    }

    /// Load tuning from TOML text, layered over the defaults.
    pub fn load_str(content: &str) -> LoadResult<GameConfig> {
        let data: TuningToml = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tuning TOML: {}", e))?;

        let mut config = GameConfig::default();
        if let Some(tick_ms) = data.tick_ms {
            config.tick = Duration::from_millis(tick_ms);
        }
        if let Some(distance) = data.interact.distance {
            config.interact.distance = distance;
        }
        if let Some(value) = data.motion.move_speed {
            config.motion.move_speed = value;
        }
        if let Some(value) = data.motion.jump_power {
            config.motion.jump_power = value;
        }
        if let Some(value) = data.motion.max_jumps {
            config.motion.max_jumps = value;
        }
        if let Some(value) = data.motion.base_gravity {
            config.motion.base_gravity = value;
        }
        if let Some(value) = data.motion.fall_gravity_mult {
            config.motion.fall_gravity_mult = value;
        }
        if let Some(value) = data.motion.max_fall_speed {
            config.motion.max_fall_speed = value;
        }

        Ok(config)
    }
}
