//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (spawn order for enemies, firing order for bullets)
//! - No rendering or platform dependencies

pub mod bullet;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod script;
pub mod state;
pub mod tick;
pub mod timer;

pub use bullet::{
    Bullet, BulletFactory, BulletMotion, BulletParams, BulletRegistry, NORMAL_ACC,
    NormalAccelerating, SINUSOIDAL_SIMPLE, SinusoidalSimple,
};
pub use collision::corners_inside;
pub use enemy::{
    BehaviorFactory, COMMON_1, COMMON_2, Direction, Enemy, EnemyBehavior, EnemyRegistry,
    EnemyTemplate, PhaseCycle, SpringWeave,
};
pub use entity::{Bounds, Hitbox, Ship, ShipStats};
pub use script::{LevelScript, SpawnDescriptor};
pub use state::{Game, Mode, Timers};
pub use tick::{TickInput, tick};
pub use timer::{SpringTimer, Timer};
