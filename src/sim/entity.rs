//! Bounding boxes and ships
//!
//! Every gameplay object is a `Ship`: an axis-aligned hitbox with health,
//! contact damage (hardness), and a per-tick speed. Bullets and enemies wrap
//! a `Ship` body and add their own motion.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::corners_inside;
use crate::consts::SHIP_HEALTH;
use crate::error::GameError;

/// Axis-aligned rectangle with `x1 <= x2` and `y1 <= y2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Hitbox {
    /// Build a hitbox from two corners, swapping coordinates if needed
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Box of the given half extent around a center point
    pub fn centered(center: Vec2, half_extent: Vec2) -> Self {
        let min = center - half_extent;
        let max = center + half_extent;
        Self::new(min.x, min.y, max.x, max.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Same box shifted by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            x1: self.x1 + delta.x,
            y1: self.y1 + delta.y,
            x2: self.x2 + delta.x,
            y2: self.y2 + delta.y,
        }
    }

    /// Corner-containment collision (see [`corners_inside`])
    pub fn collides_with(&self, other: &Hitbox) -> bool {
        corners_inside(self, other)
    }
}

/// The playable area: window width minus the GUI panel, full height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, hitbox: &Hitbox) -> bool {
        hitbox.x1 >= 0.0
            && hitbox.y1 >= 0.0
            && hitbox.x2 <= self.width
            && hitbox.y2 <= self.height
    }

    pub fn check(&self, hitbox: &Hitbox) -> Result<(), GameError> {
        if self.contains(hitbox) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds {
                x1: hitbox.x1,
                y1: hitbox.y1,
                x2: hitbox.x2,
                y2: hitbox.y2,
            })
        }
    }
}

/// Combat stats for a new ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipStats {
    pub health: i32,
    pub hardness: i32,
    pub speed: f32,
}

impl Default for ShipStats {
    fn default() -> Self {
        Self {
            health: SHIP_HEALTH,
            hardness: 0,
            speed: 1.0,
        }
    }
}

/// A hitbox with health, contact damage and speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub hitbox: Hitbox,
    pub max_hp: i32,
    pub hp: i32,
    /// Damage dealt on contact
    pub hardness: i32,
    /// Pixels per tick
    pub speed: f32,
    /// Opaque handle for the renderer
    #[serde(default)]
    pub sprites: Option<String>,
}

impl Ship {
    /// Create a ship; fails if the hitbox is outside the playable bounds
    pub fn new(hitbox: Hitbox, stats: ShipStats, bounds: &Bounds) -> Result<Self, GameError> {
        bounds.check(&hitbox)?;
        Ok(Self {
            hitbox,
            max_hp: stats.health,
            hp: stats.health,
            hardness: stats.hardness,
            speed: stats.speed,
            sprites: None,
        })
    }

    pub fn with_sprites(mut self, sprites: impl Into<String>) -> Self {
        self.sprites = Some(sprites.into());
        self
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.hitbox.center()
    }

    pub fn has_no_health(&self) -> bool {
        self.hp <= 0
    }

    pub fn collides_with(&self, other: &Ship) -> bool {
        self.hitbox.collides_with(&other.hitbox)
    }

    /// Take `damage` points of health
    pub fn hurt(&mut self, damage: i32) {
        self.hp -= damage;
    }

    pub fn kill(&mut self) {
        self.hp = 0;
    }

    /// Translate without any bounds check
    pub fn transfer(&mut self, delta: Vec2) {
        self.hitbox = self.hitbox.translated(delta);
    }

    /// Translate only if the result stays inside `bounds`; otherwise the
    /// move is dropped entirely. Returns whether the ship moved.
    pub fn move_within(&mut self, delta: Vec2, bounds: &Bounds) -> bool {
        let moved = self.hitbox.translated(delta);
        if bounds.contains(&moved) {
            self.hitbox = moved;
            true
        } else {
            false
        }
    }
}
