//! Key bindings
//!
//! Raw key names (as reported by the host's input layer) map to a small set
//! of game actions. Several keys may share an action.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Canonical action tokens consumed by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Shoot,
    Debug,
    Return,
    Exit,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Shoot,
        Action::Debug,
        Action::Return,
        Action::Exit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Up => "UP",
            Action::Down => "DOWN",
            Action::Left => "LEFT",
            Action::Right => "RIGHT",
            Action::Shoot => "SHOOT",
            Action::Debug => "DEBUG",
            Action::Return => "RETURN",
            Action::Exit => "EXIT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-to-action table, kept in binding order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keymap {
    bindings: Vec<(String, Action)>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `{"key": "ACTION", ...}` document, binding keys in the
    /// order the file lists them
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let entries: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut keymap = Self::new();
        for (key, value) in entries {
            let action: Action = serde_json::from_value(value)?;
            keymap.bind(key, action);
        }
        Ok(keymap)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let keymap = Self::from_json(&std::fs::read_to_string(path.as_ref())?)?;
        log::info!(
            "Loaded {} key bindings from {}",
            keymap.len(),
            path.as_ref().display()
        );
        Ok(keymap)
    }

    /// Bind `key` to `action`, replacing any previous binding of that key
    pub fn bind(&mut self, key: impl Into<String>, action: Action) {
        let key = key.into();
        match self.bindings.iter_mut().find(|(k, _)| *k == key) {
            Some(binding) => binding.1 = action,
            None => self.bindings.push((key, action)),
        }
    }

    pub fn unbind(&mut self, key: &str) -> Option<Action> {
        let index = self.bindings.iter().position(|(k, _)| k == key)?;
        Some(self.bindings.remove(index).1)
    }

    /// Action bound to a raw key, if any
    pub fn resolve(&self, key: &str) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, action)| *action)
    }

    /// Distinct bound actions, in order of first binding
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        for (_, action) in &self.bindings {
            if !actions.contains(action) {
                actions.push(*action);
            }
        }
        actions
    }

    /// Every key bound to `action`
    pub fn keys_for(&self, action: Action) -> Vec<&str> {
        self.bindings
            .iter()
            .filter(|(_, a)| *a == action)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
