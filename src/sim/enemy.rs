//! Enemies and their movement patterns
//!
//! Enemy types live in an [`EnemyRegistry`] keyed by the type tag used in
//! level scripts. Each entry carries the body stats and a factory for the
//! [`EnemyBehavior`] that moves it.

use std::collections::HashMap;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Bounds, Hitbox, Ship, ShipStats};
use super::timer::{SpringTimer, Timer};
use crate::error::GameError;

pub const COMMON_1: &str = "common1";
pub const COMMON_2: &str = "common2";

/// Discrete heading, cycled LEFT -> DOWN -> RIGHT -> LEFT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Left = 0,
    Down = 1,
    Right = 2,
}

impl Direction {
    pub fn from_index(index: u8) -> Self {
        match index % 3 {
            0 => Direction::Left,
            1 => Direction::Down,
            _ => Direction::Right,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// `(direction + 1) mod 3`
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// `(direction - 1) mod 3`
    pub fn prev(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Translation for one tick at `speed`; downward moves run at half speed
    pub fn delta(self, speed: f32) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-speed, 0.0),
            Direction::Down => Vec2::new(0.0, speed / 2.0),
            Direction::Right => Vec2::new(speed, 0.0),
        }
    }
}

/// Per-tick movement pattern of an enemy
pub trait EnemyBehavior: fmt::Debug {
    /// Advance internal state one tick and return the translation to apply
    fn step(&mut self, speed: f32) -> Vec2;

    fn direction(&self) -> Direction;
}

/// "common1": holds a heading until its timer runs out, then turns
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseCycle {
    pub internal_timer: Timer,
    pub direction: Direction,
}

impl PhaseCycle {
    pub const PHASE_TICKS: i32 = 30;

    pub fn new(phase_ticks: i32, direction: Direction) -> Self {
        Self {
            internal_timer: Timer::new(phase_ticks),
            direction,
        }
    }
}

impl EnemyBehavior for PhaseCycle {
    fn step(&mut self, speed: f32) -> Vec2 {
        if self.internal_timer.is_zero_or_less() {
            self.direction = self.direction.next();
            self.internal_timer.reset();
        } else {
            self.internal_timer.count(1);
        }
        self.direction.delta(speed)
    }

    fn direction(&self) -> Direction {
        self.direction
    }
}

/// "common2": turns on the touches of a bouncing oscillator
///
/// Floor turns forward, ceiling turns back, and the ceiling's midpoint turns
/// forward on the way up or back on the way down.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringWeave {
    pub internal_timer: SpringTimer,
    pub direction: Direction,
}

impl SpringWeave {
    pub const FLOOR: i32 = 0;
    pub const CEILING: i32 = 30;

    pub fn new(direction: Direction) -> Result<Self, GameError> {
        Ok(Self {
            internal_timer: SpringTimer::new(Self::FLOOR, Self::CEILING, Self::CEILING, true)?,
            direction,
        })
    }
}

impl EnemyBehavior for SpringWeave {
    fn step(&mut self, speed: f32) -> Vec2 {
        let spring = &self.internal_timer;
        if spring.current == spring.floor {
            self.direction = self.direction.next();
        } else if spring.current == spring.ceiling {
            self.direction = self.direction.prev();
        } else if spring.current == spring.half_ceiling() {
            self.direction = if spring.adding {
                self.direction.next()
            } else {
                self.direction.prev()
            };
        }
        self.internal_timer.count(1);
        self.direction.delta(speed)
    }

    fn direction(&self) -> Direction {
        self.direction
    }
}

pub type BehaviorFactory = fn() -> Result<Box<dyn EnemyBehavior>, GameError>;

/// Body stats and behavior factory for one enemy type
#[derive(Debug, Clone, Copy)]
pub struct EnemyTemplate {
    pub stats: ShipStats,
    pub behavior: BehaviorFactory,
}

fn phase_cycle() -> Result<Box<dyn EnemyBehavior>, GameError> {
    Ok(Box::new(PhaseCycle::new(
        PhaseCycle::PHASE_TICKS,
        Direction::Left,
    )))
}

fn spring_weave() -> Result<Box<dyn EnemyBehavior>, GameError> {
    Ok(Box::new(SpringWeave::new(Direction::Left)?))
}

/// Type-tag-to-template table for enemies
#[derive(Debug, Clone)]
pub struct EnemyRegistry {
    templates: HashMap<String, EnemyTemplate>,
    default: String,
}

impl Default for EnemyRegistry {
    fn default() -> Self {
        let mut registry = Self {
            templates: HashMap::new(),
            default: COMMON_1.to_string(),
        };
        registry.register(
            COMMON_1,
            EnemyTemplate {
                stats: ShipStats {
                    health: 100,
                    hardness: 10,
                    speed: 2.0,
                },
                behavior: phase_cycle,
            },
        );
        registry.register(
            COMMON_2,
            EnemyTemplate {
                stats: ShipStats {
                    health: 150,
                    hardness: 15,
                    speed: 1.5,
                },
                behavior: spring_weave,
            },
        );
        registry
    }
}

impl EnemyRegistry {
    /// Add or replace an enemy type
    pub fn register(&mut self, name: impl Into<String>, template: EnemyTemplate) {
        self.templates.insert(name.into(), template);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn default_type(&self) -> &str {
        &self.default
    }

    /// Build an enemy of type `name`; unknown names get the default type
    pub fn spawn(&self, name: &str, hitbox: Hitbox, bounds: &Bounds) -> Result<Enemy, GameError> {
        let (kind, template) = match self.templates.get_key_value(name) {
            Some((key, template)) => (key.as_str(), *template),
            None => {
                log::warn!("Unknown enemy type {name:?}, using {:?}", self.default);
                match self.templates.get(self.default.as_str()) {
                    Some(template) => (self.default.as_str(), *template),
                    None => (
                        COMMON_1,
                        EnemyTemplate {
                            stats: ShipStats::default(),
                            behavior: phase_cycle,
                        },
                    ),
                }
            }
        };

        Ok(Enemy {
            body: Ship::new(hitbox, template.stats, bounds)?,
            kind: kind.to_string(),
            behavior: (template.behavior)()?,
        })
    }
}

/// A live enemy
#[derive(Debug)]
pub struct Enemy {
    pub body: Ship,
    kind: String,
    behavior: Box<dyn EnemyBehavior>,
}

impl Enemy {
    /// Registered type tag
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn direction(&self) -> Direction {
        self.behavior.direction()
    }

    /// Move one tick along the behavior's path
    pub fn trajectory(&mut self) {
        let delta = self.behavior.step(self.body.speed);
        self.body.transfer(delta);
    }
}
