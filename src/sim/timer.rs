//! Countdown and bounded-oscillator primitives
//!
//! Every cooldown and periodic movement pattern in the game is built on
//! these two types. Both are plain values with public state: enemy AI reads
//! the oscillator's fields directly to detect boundary touches.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A countdown from `initial_time` towards zero.
///
/// `current_time` may go negative through [`Timer::deduct`]; the only
/// trigger condition is [`Timer::is_zero_or_less`]. A negative initial time
/// is valid and yields an always-expired timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub initial_time: i32,
    pub current_time: i32,
    /// Optional label, cleared on reset
    #[serde(default)]
    pub message: String,
}

impl Timer {
    pub fn new(initial_time: i32) -> Self {
        Self::with_message(initial_time, "")
    }

    pub fn with_message(initial_time: i32, message: impl Into<String>) -> Self {
        Self {
            initial_time,
            current_time: initial_time,
            message: message.into(),
        }
    }

    /// Subtract unconditionally
    pub fn deduct(&mut self, amount: i32) {
        self.current_time -= amount;
    }

    /// Subtract only while the timer has not expired
    pub fn count(&mut self, amount: i32) {
        if !self.is_zero_or_less() {
            self.deduct(amount);
        }
    }

    /// Like [`Timer::count`], but an already expired timer reloads itself
    /// instead, making it a self-rearming cooldown.
    pub fn count_and_rearm(&mut self, amount: i32) {
        if self.is_zero_or_less() {
            self.reset();
        } else {
            self.deduct(amount);
        }
    }

    pub fn reset(&mut self) {
        self.current_time = self.initial_time;
        self.message.clear();
    }

    pub fn is_zero_or_less(&self) -> bool {
        self.current_time <= 0
    }

    pub fn change_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Initial Time: {} - Current Time: {}",
            self.initial_time, self.current_time
        )?;
        if !self.message.is_empty() {
            write!(f, " - Message: {}", self.message)?;
        }
        Ok(())
    }
}

/// A value bouncing between `floor` and `ceiling` inclusive.
///
/// `adding` flips whenever a count leaves `current` on (or past) a bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpringTimer {
    pub floor: i32,
    pub ceiling: i32,
    pub current: i32,
    pub adding: bool,
}

impl SpringTimer {
    pub fn new(floor: i32, ceiling: i32, start: i32, adding: bool) -> Result<Self, GameError> {
        if floor >= ceiling {
            return Err(GameError::InvalidSpring { floor, ceiling });
        }
        if start < floor || start > ceiling {
            return Err(GameError::SpringStartOutOfRange {
                start,
                floor,
                ceiling,
            });
        }
        Ok(Self {
            floor,
            ceiling,
            current: start,
            adding,
        })
    }

    /// Advance one step in the current direction, bouncing at the bounds
    pub fn count(&mut self, how_much: i32) {
        if self.adding {
            if self.current < self.ceiling {
                self.current = (self.current + how_much).min(self.ceiling);
            }
        } else if self.current > self.floor {
            self.current = (self.current - how_much).max(self.floor);
        }

        if self.current <= self.floor || self.current >= self.ceiling {
            self.adding = !self.adding;
        }
    }

    /// Midpoint of the ceiling, floor-divided
    pub fn half_ceiling(&self) -> i32 {
        self.ceiling.div_euclid(2)
    }
}

impl fmt::Display for SpringTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Current: {} - Floor: {} - Ceiling: {} - Is it adding: {}",
            self.current, self.floor, self.ceiling, self.adding
        )
    }
}
