//! Star Slayer - a small vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, trajectories, level scripts, tick)
//! - `settings`: Flat JSON game configuration
//! - `controls`: Key-to-action resolution
//! - `levels`: Level script providers

pub mod controls;
pub mod error;
pub mod levels;
pub mod settings;
pub mod sim;

pub use controls::{Action, Keymap};
pub use error::GameError;
pub use levels::{LevelDir, LevelSet, LevelSource};
pub use settings::GameConfig;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate the host is expected to drive `advance_game` at
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Window dimensions
    pub const WIDTH: f32 = 750.0;
    pub const HEIGHT: f32 = 700.0;
    /// Horizontal space reserved for the in-game GUI panel
    pub const GUI_SPACE: f32 = 250.0;

    /// Ticks the EXIT action must be held before the game quits
    pub const EXITING_DELAY: i32 = 30;
    /// Cooldown between debug overlay toggles
    pub const DEBUG_COOLDOWN: i32 = 20;
    /// Cooldown between menu presses
    pub const PRESS_COOLDOWN: i32 = 20;
    /// Base shooting cooldown, divided by the power level
    pub const COOLDOWN_CONSTANT: i32 = 30;

    /// Player defaults
    pub const PLAYER_HEALTH: i32 = 500;
    pub const PLAYER_HARDNESS: i32 = 1;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_HALF_EXTENT: f32 = 30.0;

    /// Generic ship defaults
    pub const SHIP_HEALTH: i32 = 500;
    pub const BULLET_HEALTH: i32 = 10;

    /// Bullets are dropped once their bottom edge is this far above the screen
    pub const BULLET_EXIT_MARGIN: f32 = 100.0;
    /// Enemies are dropped once their top edge passes `HEIGHT * factor`
    pub const ENEMY_EXIT_FACTOR: f32 = 1.15;

    /// Acceleration gained per tick by a ramping bullet
    pub const ACCEL_STEP: f32 = 0.3;
    /// Horizontal gain applied to a weaving bullet's oscillator value
    pub const WEAVE_GAIN: f32 = 0.1;
    /// Default ramp/oscillation length for bullets
    pub const OSCILLATION_TIME: i32 = 30;
}
