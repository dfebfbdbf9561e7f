//! Game configuration
//!
//! Persisted as a flat JSON document. Every field has a default, so a
//! partial file only overrides what it names.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::sim::{Bounds, Hitbox, ShipStats};

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub width: f32,
    pub height: f32,
    /// Width reserved for the in-game GUI panel
    pub gui_space: f32,

    // === Timing (ticks) ===
    /// Shooting cooldown is `cooldown_constant / power_level`
    pub cooldown_constant: i32,
    pub debug_cooldown: i32,
    /// How long EXIT must be held
    pub exiting_delay: i32,
    /// Menu press cooldown
    pub press_cooldown: i32,

    // === Player ===
    pub initial_power: u32,
    pub player_health: i32,
    pub player_hardness: i32,
    pub player_speed: f32,
    pub player_half_extent: Vec2,

    // === Pruning ===
    /// Bullets are dropped once `y2 < -bullet_exit_margin`
    pub bullet_exit_margin: f32,
    /// Enemies are dropped once `y1 > height * enemy_exit_factor`
    pub enemy_exit_factor: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            gui_space: GUI_SPACE,

            cooldown_constant: COOLDOWN_CONSTANT,
            debug_cooldown: DEBUG_COOLDOWN,
            exiting_delay: EXITING_DELAY,
            press_cooldown: PRESS_COOLDOWN,

            initial_power: 1,
            player_health: PLAYER_HEALTH,
            player_hardness: PLAYER_HARDNESS,
            player_speed: PLAYER_SPEED,
            player_half_extent: Vec2::splat(PLAYER_HALF_EXTENT),

            bullet_exit_margin: BULLET_EXIT_MARGIN,
            enemy_exit_factor: ENEMY_EXIT_FACTOR,
        }
    }
}

impl GameConfig {
    /// Parse a configuration document, failing on malformed input
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a file, falling back to defaults if it is missing or bad
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path)
            .map_err(GameError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Using default config ({}: {err})", path.display());
                Self::default()
            }
        }
    }

    /// Write to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GameError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Config saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Playable area (the GUI panel is excluded)
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width - self.gui_space, self.height)
    }

    /// Starting hitbox of the player: horizontally centered on the window,
    /// near the bottom of the screen
    pub fn player_spawn(&self) -> Hitbox {
        let center = Vec2::new(
            (self.width / 2.0).floor(),
            (self.height / 1.17).floor(),
        );
        Hitbox::centered(center, self.player_half_extent)
    }

    pub fn player_stats(&self) -> ShipStats {
        ShipStats {
            health: self.player_health,
            hardness: self.player_hardness,
            speed: self.player_speed,
        }
    }

    /// Shooting cooldown length for a power level
    pub fn shooting_cooldown(&self, power_level: u32) -> i32 {
        self.cooldown_constant / power_as_i32(power_level).max(1)
    }

    /// Invulnerability window after the player is hit, saturating at
    /// `i32::MAX` for absurd power levels
    pub fn invulnerability(&self, power_level: u32) -> i32 {
        power_as_i32(power_level)
            .saturating_mul(5)
            .saturating_add(50)
    }
}

fn power_as_i32(power_level: u32) -> i32 {
    i32::try_from(power_level).unwrap_or(i32::MAX)
}
