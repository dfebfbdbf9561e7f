//! Star Slayer headless entry point
//!
//! Loads configuration, key bindings and level scripts from `assets/`, then
//! drives the simulation with a seeded autopilot that presses random bound
//! keys. Useful for soak-testing level scripts without a window.
//!
//! Environment:
//! - `STAR_SLAYER_CONFIG`: config path (default `assets/config.json`)
//! - `STAR_SLAYER_SEED`: autopilot seed (default 42)
//! - `STAR_SLAYER_TICKS`: tick cap (default 10 minutes of play)

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use star_slayer::consts::TICKS_PER_SECOND;
use star_slayer::sim::{Game, TickInput, tick};
use star_slayer::{Action, GameConfig, GameError, Keymap, LevelDir};

const DEFAULT_CONFIG: &str = "assets/config.json";
const KEYS_PATH: &str = "assets/keys.json";
const LEVELS_DIR: &str = "assets/levels";

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Presses a random pair of bound keys each tick, never RETURN or EXIT
struct Autopilot {
    rng: Pcg32,
    keymap: Keymap,
    keys: Vec<String>,
}

impl Autopilot {
    fn new(seed: u64, keymap: Keymap) -> Self {
        let keys = keymap
            .keys()
            .filter(|key| {
                !matches!(
                    keymap.resolve(key),
                    None | Some(Action::Return | Action::Exit)
                )
            })
            .map(str::to_string)
            .collect();
        Self {
            rng: Pcg32::seed_from_u64(seed),
            keymap,
            keys,
        }
    }

    fn next_input(&mut self) -> TickInput {
        let mut actions = Vec::with_capacity(2);
        if self.keys.is_empty() {
            return TickInput { actions };
        }
        for _ in 0..2 {
            let key = &self.keys[self.rng.random_range(0..self.keys.len())];
            if let Some(action) = self.keymap.resolve(key) {
                log::trace!("Pressing {key} ({action})");
                if !actions.contains(&action) {
                    actions.push(action);
                }
            }
        }
        TickInput { actions }
    }
}

fn run() -> Result<(), GameError> {
    let config_path = std::env::var("STAR_SLAYER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG.into());
    let seed: u64 = env_or("STAR_SLAYER_SEED", 42);
    let max_ticks: u64 = env_or("STAR_SLAYER_TICKS", 10 * 60 * TICKS_PER_SECOND as u64);

    let config = GameConfig::load(&config_path);
    let keymap = Keymap::load(KEYS_PATH)?;
    let levels = LevelDir::new(LEVELS_DIR, config.bounds());

    let mut game = Game::from_source(config, &levels)?;
    let mut autopilot = Autopilot::new(seed, keymap);
    game.start_game();
    log::info!("Autopilot seed {seed}, tick cap {max_ticks}");

    for _ in 0..max_ticks {
        let input = autopilot.next_input();
        tick(&mut game, &input);

        if game.time_ticks % TICKS_PER_SECOND as u64 == 0 {
            log::info!(
                "t={}s level={} hp={}/{} enemies={} bullets={} level_timer={}",
                game.time_ticks / TICKS_PER_SECOND as u64,
                game.game_level,
                game.player.hp,
                game.player.max_hp,
                game.enemies.len(),
                game.bullets.len(),
                game.timers.level_timer.current_time
            );
        }

        if game.exit_requested {
            log::info!("Exit requested after {} ticks", game.time_ticks);
            break;
        }
        if game.is_over() {
            log::info!(
                "Game over on level {} after {} ticks",
                game.game_level,
                game.time_ticks
            );
            break;
        }
        if game.level_finished() {
            match game.level_up(&levels, 1) {
                Ok(()) => game.power_up(1),
                Err(GameError::LevelNotFound { .. }) => {
                    log::info!("All levels cleared after {} ticks", game.time_ticks);
                    break;
                }
                Err(err) => return Err(err),
            }
        }
    }

    log::info!(
        "Finished: level {}, power {}, hp {}",
        game.game_level,
        game.power_level,
        game.player.hp
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Star Slayer (headless) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
