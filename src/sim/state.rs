//! Game state and core simulation types
//!
//! `Game` owns every live entity. Rendering reads it by reference between
//! ticks; only the tick functions mutate it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::{Bullet, BulletParams, BulletRegistry, NORMAL_ACC, SINUSOIDAL_SIMPLE};
use super::enemy::{Enemy, EnemyRegistry};
use super::entity::{Bounds, Hitbox, Ship};
use super::script::LevelScript;
use super::timer::Timer;
use crate::error::GameError;
use crate::levels::LevelSource;
use crate::settings::GameConfig;

/// Coarse mode: only `InGame` runs the simulation body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Menus and overlays
    #[default]
    Menu,
    /// Active gameplay
    InGame,
}

/// Gameplay timers, all counted down once per in-game tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timers {
    /// Level countdown; level script instants are compared against it
    pub level_timer: Timer,
    pub shooting_cooldown: Timer,
    /// Cooldown between debug overlay toggles
    pub debug_cooldown: Timer,
    /// Window after a hit during which enemies cannot hurt the player
    pub invulnerability: Timer,
}

impl Timers {
    pub fn new(config: &GameConfig, power_level: u32, level_time: i32) -> Self {
        Self {
            level_timer: Timer::new(level_time),
            shooting_cooldown: Timer::new(config.shooting_cooldown(power_level)),
            debug_cooldown: Timer::new(config.debug_cooldown),
            invulnerability: Timer::new(config.invulnerability(power_level)),
        }
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Timer> {
        [
            &mut self.level_timer,
            &mut self.shooting_cooldown,
            &mut self.debug_cooldown,
            &mut self.invulnerability,
        ]
        .into_iter()
    }
}

/// Complete game state
#[derive(Debug)]
pub struct Game {
    pub config: GameConfig,
    /// Playable area
    pub bounds: Bounds,
    pub mode: Mode,
    pub game_level: u32,
    /// Spawns still pending for the current level
    pub level_dict: LevelScript,
    pub player: Ship,
    pub power_level: u32,
    /// Live enemies, in spawn order
    pub enemies: Vec<Enemy>,
    /// Live bullets, in firing order
    pub bullets: Vec<Bullet>,
    pub timers: Timers,
    /// Counts down while EXIT is held
    pub exiting_cooldown: Timer,
    /// Menu press cooldown, the only timer that runs outside the game
    pub press_cooldown: Timer,
    pub show_debug_info: bool,
    /// EXIT is currently held
    pub exiting: bool,
    /// EXIT was held long enough; the host should quit
    pub exit_requested: bool,
    /// In-game ticks simulated so far
    pub time_ticks: u64,
    pub enemy_types: EnemyRegistry,
    pub bullet_types: BulletRegistry,
}

impl Game {
    /// Create a game on level 1 of `script`. Fails if the script or the
    /// player's spawn lies outside the playable area.
    pub fn new(config: GameConfig, script: LevelScript) -> Result<Self, GameError> {
        let bounds = config.bounds();
        script.validate(&bounds)?;

        let player = Ship::new(config.player_spawn(), config.player_stats(), &bounds)?;
        let power_level = config.initial_power.max(1);
        let timers = Timers::new(&config, power_level, script.total_time);

        Ok(Self {
            bounds,
            mode: Mode::Menu,
            game_level: 1,
            level_dict: script,
            player,
            power_level,
            enemies: Vec::new(),
            bullets: Vec::new(),
            timers,
            exiting_cooldown: Timer::new(config.exiting_delay),
            press_cooldown: Timer::new(config.press_cooldown),
            show_debug_info: false,
            exiting: false,
            exit_requested: false,
            time_ticks: 0,
            enemy_types: EnemyRegistry::default(),
            bullet_types: BulletRegistry::default(),
            config,
        })
    }

    /// Create a game using level 1 from a provider
    pub fn from_source(config: GameConfig, source: &dyn LevelSource) -> Result<Self, GameError> {
        let script = source.level(1)?;
        Self::new(config, script)
    }

    pub fn is_in_game(&self) -> bool {
        self.mode == Mode::InGame
    }

    pub fn start_game(&mut self) {
        if self.mode != Mode::InGame {
            log::info!("Entering level {}", self.game_level);
            self.mode = Mode::InGame;
        }
    }

    /// Leave gameplay for the menus, dropping every bullet and enemy
    pub fn return_to_menu(&mut self) {
        if self.mode != Mode::Menu {
            log::info!("Returning to menu");
            self.mode = Mode::Menu;
            self.clear_assets();
            self.press_cooldown.reset();
        }
    }

    pub fn clear_assets(&mut self) {
        self.enemies.clear();
        self.bullets.clear();
    }

    pub fn reset_timers(&mut self) {
        self.timers.iter_mut().for_each(Timer::reset);
    }

    /// Advance `how_much` levels, loading the new script and reseeding the
    /// level countdown from it
    pub fn level_up(&mut self, source: &dyn LevelSource, how_much: u32) -> Result<(), GameError> {
        let next = self.game_level + how_much;
        let script = source.level(next)?;
        script.validate(&self.bounds)?;

        self.timers.level_timer = Timer::new(script.total_time);
        self.level_dict = script;
        self.game_level = next;
        log::info!("Level up: now on level {next}");
        Ok(())
    }

    /// Raise the power level, shortening the shooting cooldown
    pub fn power_up(&mut self, how_much: u32) {
        self.power_level = self.power_level.saturating_add(how_much);
        self.timers.shooting_cooldown.initial_time = self.config.shooting_cooldown(self.power_level);
        log::info!(
            "Power level {} (shooting cooldown {})",
            self.power_level,
            self.timers.shooting_cooldown.initial_time
        );
    }

    /// Fire the pattern for the current power level from the player's nose
    pub fn shoot_bullets(&mut self) -> Result<(), GameError> {
        let center_x = self.player.center().x;
        let nose = self.player.hitbox.y1;
        let hardness = self.player.hardness;

        // (type, x offsets from center, speed, first_to_right)
        let pattern: &[(&str, f32, f32, f32, bool)] = match self.power_level {
            1 => &[(NORMAL_ACC, -5.0, 5.0, 2.0, true)],
            2 => &[(SINUSOIDAL_SIMPLE, -5.0, 5.0, 3.0, true)],
            _ => &[
                (SINUSOIDAL_SIMPLE, -15.0, -5.0, 3.0, true),
                (SINUSOIDAL_SIMPLE, 5.0, 15.0, 3.0, false),
            ],
        };

        let mut fired = Vec::with_capacity(pattern.len());
        for &(kind, left, right, speed, first_to_right) in pattern {
            let params = BulletParams {
                first_to_right,
                ..Default::default()
            };
            fired.push(self.bullet_types.spawn(
                kind,
                Hitbox::new(center_x + left, nose + 30.0, center_x + right, nose + 20.0),
                Bullet::stats(hardness, speed),
                &params,
                &self.bounds,
            )?);
        }

        log::debug!(
            "Fired {} bullet(s) at power {}",
            fired.len(),
            self.power_level
        );
        self.bullets.extend(fired);
        Ok(())
    }

    /// Move the player by its speed in the given unit direction, staying
    /// inside the playable area
    pub fn move_player(&mut self, direction: Vec2) -> bool {
        let delta = direction * self.player.speed;
        self.player.move_within(delta, &self.bounds)
    }

    /// The player has run out of health
    pub fn is_over(&self) -> bool {
        self.player.has_no_health()
    }

    /// Level countdown expired, no spawns pending and no enemies left
    pub fn level_finished(&self) -> bool {
        self.timers.level_timer.is_zero_or_less()
            && self.level_dict.is_empty()
            && self.enemies.is_empty()
    }
}
