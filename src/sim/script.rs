//! Level scripts
//!
//! A level is a timeline of spawn batches keyed by the level timer value at
//! which they fire, plus the total length of the level. On disk:
//!
//! ```json
//! {
//!     "total_time": 1800,
//!     "1750": [{"x1": 40, "y1": 20, "x2": 80, "y2": 60, "type": "common1"}]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::entity::{Bounds, Hitbox};
use crate::error::GameError;

/// One enemy to spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnDescriptor {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    #[serde(rename = "type")]
    pub kind: String,
}

impl SpawnDescriptor {
    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.x1, self.y1, self.x2, self.y2)
    }
}

/// Raw document shape before instant keys are validated
#[derive(Deserialize)]
struct RawLevel {
    total_time: i32,
    #[serde(flatten)]
    instants: HashMap<String, Vec<SpawnDescriptor>>,
}

/// Spawn timeline for one level
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelScript {
    /// Seeds the level countdown
    pub total_time: i32,
    instants: BTreeMap<i32, Vec<SpawnDescriptor>>,
}

impl LevelScript {
    pub fn new(total_time: i32) -> Self {
        Self {
            total_time,
            instants: BTreeMap::new(),
        }
    }

    /// Parse a level document. Keys must be integer instants in
    /// `0..=total_time`, each named once, and every descriptor needs all of
    /// its fields.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let raw: RawLevel = serde_json::from_str(json)?;
        let mut script = Self::new(raw.total_time);
        for (key, spawns) in raw.instants {
            let instant: i32 = key
                .trim()
                .parse()
                .map_err(|_| GameError::InvalidInstant { key: key.clone() })?;
            script.check_instant(instant)?;
            if script.instants.insert(instant, spawns).is_some() {
                return Err(GameError::DuplicateInstant { instant });
            }
        }
        Ok(script)
    }

    /// Parse and check every spawn box against the playable area
    pub fn from_json_checked(json: &str, bounds: &Bounds) -> Result<Self, GameError> {
        let script = Self::from_json(json)?;
        script.validate(bounds)?;
        Ok(script)
    }

    /// Check that every instant is reachable by the level countdown and
    /// every spawn box lies inside `bounds`
    pub fn validate(&self, bounds: &Bounds) -> Result<(), GameError> {
        self.instants().try_for_each(|instant| self.check_instant(instant))?;
        self.instants
            .values()
            .flatten()
            .try_for_each(|spawn| bounds.check(&spawn.hitbox()))
    }

    /// The countdown runs from `total_time` and stops at 0
    fn check_instant(&self, instant: i32) -> Result<(), GameError> {
        if (0..=self.total_time).contains(&instant) {
            Ok(())
        } else {
            Err(GameError::InstantOutOfRange {
                instant,
                total_time: self.total_time,
            })
        }
    }

    /// Add spawns at `instant`, appending to any batch already there
    pub fn insert(&mut self, instant: i32, spawns: Vec<SpawnDescriptor>) {
        self.instants.entry(instant).or_default().extend(spawns);
    }

    /// Remove and return the batch that fires at exactly `instant`
    pub fn take(&mut self, instant: i32) -> Option<Vec<SpawnDescriptor>> {
        self.instants.remove(&instant)
    }

    pub fn contains_instant(&self, instant: i32) -> bool {
        self.instants.contains_key(&instant)
    }

    /// Instants still pending, in ascending order
    pub fn instants(&self) -> impl Iterator<Item = i32> + '_ {
        self.instants.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    pub fn pending_spawns(&self) -> usize {
        self.instants.values().map(Vec::len).sum()
    }
}
