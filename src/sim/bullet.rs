//! Bullets and their trajectories
//!
//! A bullet is a `Ship` body plus a boxed [`BulletMotion`]. Motions are
//! looked up by name in a [`BulletRegistry`], so new patterns are added by
//! registering a factory rather than by touching the tick code.

use std::collections::HashMap;
use std::fmt;

use glam::Vec2;

use super::entity::{Bounds, Hitbox, Ship, ShipStats};
use super::timer::{SpringTimer, Timer};
use crate::consts::{ACCEL_STEP, BULLET_HEALTH, OSCILLATION_TIME, WEAVE_GAIN};
use crate::error::GameError;

pub const NORMAL_ACC: &str = "normal_acc";
pub const SINUSOIDAL_SIMPLE: &str = "sinusoidal_simple";

/// Per-tick movement pattern of a bullet
pub trait BulletMotion: fmt::Debug {
    /// Advance internal state one tick and return the translation to apply
    fn step(&mut self, speed: f32) -> Vec2;
}

/// Parameters handed to a motion factory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletParams {
    pub acceleration: f32,
    /// Ramp length for accelerating bullets, half-amplitude for weaving ones
    pub oscillation_time: i32,
    pub first_to_right: bool,
}

impl Default for BulletParams {
    fn default() -> Self {
        Self {
            acceleration: 1.0,
            oscillation_time: OSCILLATION_TIME,
            first_to_right: true,
        }
    }
}

/// Climbs straight up, gaining speed while its ramp timer runs
#[derive(Debug, Clone, PartialEq)]
pub struct NormalAccelerating {
    pub acceleration: f32,
    pub accel_timer: Timer,
}

impl NormalAccelerating {
    pub fn new(acceleration: f32, ramp_ticks: i32) -> Self {
        Self {
            acceleration,
            accel_timer: Timer::new(ramp_ticks),
        }
    }
}

impl BulletMotion for NormalAccelerating {
    fn step(&mut self, speed: f32) -> Vec2 {
        if !self.accel_timer.is_zero_or_less() {
            self.accel_timer.deduct(1);
            self.acceleration += ACCEL_STEP;
        }
        Vec2::new(0.0, -speed * self.acceleration)
    }
}

/// Climbs at constant speed while weaving side to side
#[derive(Debug, Clone, PartialEq)]
pub struct SinusoidalSimple {
    pub oscillation: SpringTimer,
    pub first_to_right: bool,
}

impl SinusoidalSimple {
    pub fn new(amplitude: i32, first_to_right: bool) -> Result<Self, GameError> {
        let start = if first_to_right { amplitude } else { -amplitude };
        Ok(Self {
            oscillation: SpringTimer::new(-amplitude, amplitude, start, true)?,
            first_to_right,
        })
    }
}

impl BulletMotion for SinusoidalSimple {
    fn step(&mut self, speed: f32) -> Vec2 {
        self.oscillation.count(1);
        Vec2::new(
            self.oscillation.current as f32 * WEAVE_GAIN * speed,
            -speed,
        )
    }
}

pub type BulletFactory = fn(&BulletParams) -> Result<Box<dyn BulletMotion>, GameError>;

fn normal_acc(params: &BulletParams) -> Result<Box<dyn BulletMotion>, GameError> {
    Ok(Box::new(NormalAccelerating::new(
        params.acceleration,
        params.oscillation_time,
    )))
}

fn sinusoidal_simple(params: &BulletParams) -> Result<Box<dyn BulletMotion>, GameError> {
    Ok(Box::new(SinusoidalSimple::new(
        params.oscillation_time,
        params.first_to_right,
    )?))
}

/// Name-to-factory table for bullet motions
#[derive(Debug, Clone)]
pub struct BulletRegistry {
    factories: HashMap<String, BulletFactory>,
    default: String,
}

impl Default for BulletRegistry {
    fn default() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
            default: NORMAL_ACC.to_string(),
        };
        registry.register(NORMAL_ACC, normal_acc);
        registry.register(SINUSOIDAL_SIMPLE, sinusoidal_simple);
        registry
    }
}

impl BulletRegistry {
    /// Add or replace a bullet type
    pub fn register(&mut self, name: impl Into<String>, factory: BulletFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Resolve a name, falling back to the default type
    fn resolve(&self, name: &str) -> (&str, BulletFactory) {
        if let Some((key, factory)) = self.factories.get_key_value(name) {
            return (key.as_str(), *factory);
        }
        log::warn!("Unknown bullet type {name:?}, using {:?}", self.default);
        match self.factories.get_key_value(self.default.as_str()) {
            Some((key, factory)) => (key.as_str(), *factory),
            None => (NORMAL_ACC, normal_acc as BulletFactory),
        }
    }

    /// Build a bullet of type `name` with the given body
    pub fn spawn(
        &self,
        name: &str,
        hitbox: Hitbox,
        stats: ShipStats,
        params: &BulletParams,
        bounds: &Bounds,
    ) -> Result<Bullet, GameError> {
        let (kind, factory) = self.resolve(name);
        let body = Ship::new(hitbox, stats, bounds)?;
        Ok(Bullet {
            body,
            kind: kind.to_string(),
            motion: factory(params)?,
        })
    }
}

/// A live projectile
#[derive(Debug)]
pub struct Bullet {
    pub body: Ship,
    kind: String,
    motion: Box<dyn BulletMotion>,
}

impl Bullet {
    /// Default body stats for a bullet with the given hardness and speed
    pub fn stats(hardness: i32, speed: f32) -> ShipStats {
        ShipStats {
            health: BULLET_HEALTH,
            hardness,
            speed,
        }
    }

    /// Registered type name
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn motion(&self) -> &dyn BulletMotion {
        self.motion.as_ref()
    }

    /// Move one tick along the trajectory
    pub fn trajectory(&mut self) {
        let delta = self.motion.step(self.body.speed);
        self.body.transfer(delta);
    }
}
