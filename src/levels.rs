//! Level script providers

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::GameError;
use crate::sim::{Bounds, LevelScript};

/// Supplies the parsed script for a level number
pub trait LevelSource {
    fn level(&self, number: u32) -> Result<LevelScript, GameError>;
}

/// Reads `level_{n}.json` files from a directory, validating spawn
/// positions against the playable area
#[derive(Debug, Clone)]
pub struct LevelDir {
    root: PathBuf,
    bounds: Bounds,
}

impl LevelDir {
    pub fn new(root: impl Into<PathBuf>, bounds: Bounds) -> Self {
        Self {
            root: root.into(),
            bounds,
        }
    }

    pub fn path_for(&self, number: u32) -> PathBuf {
        self.root.join(format!("level_{number}.json"))
    }
}

impl LevelSource for LevelDir {
    fn level(&self, number: u32) -> Result<LevelScript, GameError> {
        let path = self.path_for(number);
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(GameError::LevelNotFound { level: number });
            }
            Err(err) => return Err(err.into()),
        };
        let script = LevelScript::from_json_checked(&json, &self.bounds)?;
        log::info!(
            "Loaded level {number} from {} ({} spawns over {} ticks)",
            path.display(),
            script.pending_spawns(),
            script.total_time
        );
        Ok(script)
    }
}

/// In-memory level table
#[derive(Debug, Clone, Default)]
pub struct LevelSet {
    levels: HashMap<u32, LevelScript>,
}

impl LevelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, number: u32, script: LevelScript) -> Self {
        self.insert(number, script);
        self
    }

    pub fn insert(&mut self, number: u32, script: LevelScript) {
        self.levels.insert(number, script);
    }
}

impl LevelSource for LevelSet {
    fn level(&self, number: u32) -> Result<LevelScript, GameError> {
        self.levels
            .get(&number)
            .cloned()
            .ok_or(GameError::LevelNotFound { level: number })
    }
}
