//! Fixed-rate simulation tick
//!
//! The host calls [`tick`] exactly once per frame. Within a tick, bullets
//! resolve first, then enemies, then the level script, and finally the
//! gameplay timers count down.

use glam::Vec2;

use super::state::{Game, Mode};
use super::timer::Timer;
use crate::controls::Action;

/// Actions held during a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub actions: Vec<Action>,
}

impl TickInput {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    pub fn held(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}

/// Apply this tick's actions, then advance the game by one step
pub fn tick(game: &mut Game, input: &TickInput) {
    for &action in &input.actions {
        game.process_action(action);
    }
    game.advance_game(input);
}

impl Game {
    /// Execute one action token against the current mode
    pub fn process_action(&mut self, action: Action) {
        if self.mode != Mode::InGame {
            // Menu navigation belongs to the host; EXIT is handled by the
            // exit timer in `refresh_return_timer`.
            return;
        }

        match action {
            Action::Up => {
                self.move_player(Vec2::NEG_Y);
            }
            Action::Down => {
                self.move_player(Vec2::Y);
            }
            Action::Left => {
                self.move_player(Vec2::NEG_X);
            }
            Action::Right => {
                self.move_player(Vec2::X);
            }
            Action::Shoot => {
                if self.timers.shooting_cooldown.is_zero_or_less() {
                    // A failed volley leaves the cooldown expired
                    match self.shoot_bullets() {
                        Ok(()) => self.timers.shooting_cooldown.reset(),
                        Err(err) => log::warn!("Could not fire: {err}"),
                    }
                }
            }
            Action::Debug => {
                if self.timers.debug_cooldown.is_zero_or_less() {
                    self.show_debug_info = !self.show_debug_info;
                    self.timers.debug_cooldown.reset();
                }
            }
            Action::Return => self.return_to_menu(),
            Action::Exit => {}
        }
    }

    /// Advance the game state by one tick
    pub fn advance_game(&mut self, input: &TickInput) {
        self.refresh_return_timer(input);

        match self.mode {
            Mode::InGame => {
                self.time_ticks += 1;
                self.exec_bul_trajectory();
                self.exec_enem_trajectory();
                self.exec_lvl_script();
                self.refresh_timers();
            }
            Mode::Menu => {
                self.show_debug_info = false;
                self.press_cooldown.count(1);
            }
        }
    }

    /// Resolve bullet hits, drop spent bullets and move the rest.
    ///
    /// A bullet hurts the player only if it is harder than the player.
    /// Otherwise it damages at most one enemy per tick, the first it
    /// touches. Removed bullets do not move on the tick they are removed.
    pub fn exec_bul_trajectory(&mut self) {
        let player = &mut self.player;
        let enemies = &mut self.enemies;
        let top = -self.config.bullet_exit_margin;

        self.bullets.retain_mut(|bullet| {
            if player.collides_with(&bullet.body) && bullet.body.hardness > player.hardness {
                player.hurt(bullet.body.hardness);
                bullet.body.kill();
            } else if let Some(enemy) = enemies
                .iter_mut()
                .find(|enemy| bullet.body.collides_with(&enemy.body))
            {
                enemy.body.hurt(bullet.body.hardness);
                bullet.body.kill();
            }

            if bullet.body.hitbox.y2 < top || bullet.body.has_no_health() {
                return false;
            }
            bullet.trajectory();
            true
        });
    }

    /// Resolve enemy contact with the player, drop dead or escaped enemies
    /// and move the rest. Contact damage lands once per invulnerability
    /// window.
    pub fn exec_enem_trajectory(&mut self) {
        let player = &mut self.player;
        let invulnerability = &mut self.timers.invulnerability;
        let bottom = self.config.height * self.config.enemy_exit_factor;

        self.enemies.retain_mut(|enemy| {
            if enemy.body.collides_with(player) && invulnerability.is_zero_or_less() {
                player.hurt(enemy.body.hardness);
                invulnerability.reset();
                log::debug!(
                    "Player hit by {} for {} (hp {})",
                    enemy.kind(),
                    enemy.body.hardness,
                    player.hp
                );
            }

            if enemy.body.has_no_health() || enemy.body.hitbox.y1 > bottom {
                return false;
            }
            enemy.trajectory();
            true
        });
    }

    /// Spawn the batch scheduled for the current level timer value, if any.
    ///
    /// Each instant fires at most once. An instant the timer never lands on
    /// exactly is never spawned.
    pub fn exec_lvl_script(&mut self) {
        let instant = self.timers.level_timer.current_time;
        let Some(spawns) = self.level_dict.take(instant) else {
            return;
        };

        for spawn in spawns {
            match self
                .enemy_types
                .spawn(&spawn.kind, spawn.hitbox(), &self.bounds)
            {
                Ok(enemy) => {
                    log::debug!("Spawned {} at instant {instant}", enemy.kind());
                    self.enemies.push(enemy);
                }
                Err(err) => log::error!("Dropped spawn at instant {instant}: {err}"),
            }
        }
    }

    /// Count every unexpired gameplay timer down by one
    pub fn refresh_timers(&mut self) {
        self.timers.iter_mut().for_each(|timer| timer.count(1));
    }

    /// Track how long EXIT has been held. Menus drain the exit timer twice
    /// as fast as gameplay.
    pub fn refresh_return_timer(&mut self, input: &TickInput) {
        if input.held(Action::Exit) {
            self.exiting = true;
            self.exiting_cooldown
                .deduct(if self.is_in_game() { 1 } else { 2 });
            if self.exiting_cooldown.is_zero_or_less() && !self.exit_requested {
                log::info!("Exit requested");
                self.exit_requested = true;
            }
        } else {
            self.exiting = false;
            self.exiting_cooldown.reset();
        }
    }

    /// Remaining exit hold time, for the renderer's exit indicator
    pub fn exit_progress(&self) -> &Timer {
        &self.exiting_cooldown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::bullet::{BulletMotion, BulletParams};
    use crate::sim::enemy::{COMMON_1, Direction, EnemyBehavior, EnemyTemplate};
    use crate::sim::entity::{Hitbox, ShipStats};
    use crate::sim::script::{LevelScript, SpawnDescriptor};
    use crate::GameError;

    #[derive(Debug)]
    struct Still;

    impl EnemyBehavior for Still {
        fn step(&mut self, _speed: f32) -> Vec2 {
            Vec2::ZERO
        }

        fn direction(&self) -> Direction {
            Direction::Down
        }
    }

    impl BulletMotion for Still {
        fn step(&mut self, _speed: f32) -> Vec2 {
            Vec2::ZERO
        }
    }

    fn still_enemy() -> Result<Box<dyn EnemyBehavior>, GameError> {
        Ok(Box::new(Still))
    }

    fn still_bullet(_: &BulletParams) -> Result<Box<dyn BulletMotion>, GameError> {
        Ok(Box::new(Still))
    }

    fn game_with(config: GameConfig, script: LevelScript) -> Game {
        let mut game = Game::new(config, script).unwrap();
        game.enemy_types.register(
            "stationary",
            EnemyTemplate {
                stats: ShipStats {
                    health: 20,
                    hardness: 3,
                    speed: 0.0,
                },
                behavior: still_enemy,
            },
        );
        game.bullet_types.register("still", still_bullet);
        game.start_game();
        game
    }

    fn game() -> Game {
        game_with(GameConfig::default(), LevelScript::new(1000))
    }

    fn spawn_enemy(game: &mut Game, x1: f32, y1: f32, x2: f32, y2: f32) {
        let enemy = game
            .enemy_types
            .spawn("stationary", Hitbox::new(x1, y1, x2, y2), &game.bounds)
            .unwrap();
        game.enemies.push(enemy);
    }

    fn spawn_bullet(game: &mut Game, kind: &str, hitbox: Hitbox, hardness: i32) {
        let bullet = game
            .bullet_types
            .spawn(
                kind,
                hitbox,
                crate::sim::Bullet::stats(hardness, 2.0),
                &BulletParams::default(),
                &game.bounds,
            )
            .unwrap();
        game.bullets.push(bullet);
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn enemy_contact_hurts_once_per_invulnerability_window() {
        let config = GameConfig {
            player_health: 10,
            ..Default::default()
        };
        let mut game = game_with(config, LevelScript::new(1000));
        // Player spans (345, 568)-(405, 628); the enemy's bottom-right
        // corner sits inside it.
        spawn_enemy(&mut game, 330.0, 550.0, 360.0, 580.0);
        game.timers.invulnerability.current_time = 0;

        game.advance_game(&idle());
        assert_eq!(game.player.hp, 7);
        // Reset during the tick, then counted down once by the timer refresh
        let inv = &game.timers.invulnerability;
        assert_eq!(inv.current_time, inv.initial_time - 1);

        game.advance_game(&idle());
        assert_eq!(game.player.hp, 7);
        assert_eq!(game.enemies.len(), 1);
    }

    #[test]
    fn script_spawns_each_instant_once() {
        let mut script = LevelScript::new(5);
        script.insert(
            5,
            vec![SpawnDescriptor {
                x1: 0.0,
                y1: 0.0,
                x2: 10.0,
                y2: 10.0,
                kind: COMMON_1.into(),
            }],
        );
        let mut game = game_with(GameConfig::default(), script);
        assert_eq!(game.timers.level_timer.current_time, 5);

        game.exec_lvl_script();
        assert_eq!(game.enemies.len(), 1);
        assert_eq!(game.enemies[0].kind(), COMMON_1);
        assert!(!game.level_dict.contains_instant(5));

        game.exec_lvl_script();
        assert_eq!(game.enemies.len(), 1);
    }

    #[test]
    fn unknown_spawn_types_fall_back_to_the_default() {
        let mut script = LevelScript::new(3);
        script.insert(
            3,
            vec![SpawnDescriptor {
                x1: 0.0,
                y1: 0.0,
                x2: 10.0,
                y2: 10.0,
                kind: "mothership".into(),
            }],
        );
        let mut game = game_with(GameConfig::default(), script);
        game.exec_lvl_script();
        assert_eq!(game.enemies[0].kind(), game.enemy_types.default_type());
    }

    #[test]
    fn skipped_instants_are_never_spawned() {
        let mut script = LevelScript::new(10);
        script.insert(
            5,
            vec![SpawnDescriptor {
                x1: 0.0,
                y1: 0.0,
                x2: 10.0,
                y2: 10.0,
                kind: COMMON_1.into(),
            }],
        );
        let mut game = game_with(GameConfig::default(), script);
        game.timers.level_timer.current_time = 4;
        for _ in 0..10 {
            game.advance_game(&idle());
        }
        assert!(game.enemies.is_empty());
        assert!(game.level_dict.contains_instant(5));
    }

    #[test]
    fn script_fires_as_the_level_timer_counts_down() {
        let mut script = LevelScript::new(10);
        script.insert(
            8,
            vec![SpawnDescriptor {
                x1: 100.0,
                y1: 0.0,
                x2: 130.0,
                y2: 30.0,
                kind: COMMON_1.into(),
            }],
        );
        let mut game = game_with(GameConfig::default(), script);
        game.advance_game(&idle()); // timer 10 -> 9
        game.advance_game(&idle()); // timer 9 -> 8
        assert!(game.enemies.is_empty());
        game.advance_game(&idle()); // fires at 8
        assert_eq!(game.enemies.len(), 1);
        assert!(game.level_dict.is_empty());
    }

    #[test]
    fn bullet_hits_only_the_first_enemy_and_stops() {
        let mut game = game();
        spawn_enemy(&mut game, 100.0, 100.0, 140.0, 140.0);
        spawn_enemy(&mut game, 100.0, 100.0, 140.0, 140.0);
        spawn_bullet(&mut game, "still", Hitbox::new(110.0, 110.0, 120.0, 120.0), 5);

        game.exec_bul_trajectory();
        assert!(game.bullets.is_empty());
        assert_eq!(game.enemies[0].body.hp, 15);
        assert_eq!(game.enemies[1].body.hp, 20);
    }

    #[test]
    fn removed_bullets_do_not_move_but_survivors_do() {
        let mut game = game();
        spawn_enemy(&mut game, 100.0, 100.0, 140.0, 140.0);
        // Hits the enemy: removed before its trajectory step
        spawn_bullet(&mut game, "normal_acc", Hitbox::new(110.0, 110.0, 120.0, 120.0), 1);
        // Clear of everything: moves up
        spawn_bullet(&mut game, "normal_acc", Hitbox::new(10.0, 300.0, 20.0, 310.0), 1);

        game.exec_bul_trajectory();
        assert_eq!(game.bullets.len(), 1);
        let survivor = game.bullets[0].body.hitbox;
        // speed 2 * acceleration 1.3 after the first ramp step
        assert!((survivor.y1 - (300.0 - 2.6)).abs() < 1e-3);
    }

    #[test]
    fn bullets_leaving_the_top_are_pruned() {
        let mut game = game();
        spawn_bullet(&mut game, "still", Hitbox::new(10.0, 0.0, 20.0, 10.0), 1);
        game.bullets[0].body.transfer(Vec2::new(0.0, -111.0));
        assert!(game.bullets[0].body.hitbox.y2 < -100.0);
        game.exec_bul_trajectory();
        assert!(game.bullets.is_empty());
    }

    #[test]
    fn hard_bullets_hurt_the_player_soft_ones_do_not() {
        let mut game = game();
        let hp = game.player.hp;
        let player_hardness = game.player.hardness;
        // Covers the player's top-left corner (345, 568)
        let over_corner = Hitbox::new(340.0, 560.0, 350.0, 575.0);

        spawn_bullet(&mut game, "still", over_corner, player_hardness);
        game.exec_bul_trajectory();
        assert_eq!(game.player.hp, hp);
        assert_eq!(game.bullets.len(), 1);

        game.clear_assets();
        spawn_bullet(&mut game, "still", over_corner, 4);
        game.exec_bul_trajectory();
        assert_eq!(game.player.hp, hp - 4);
        assert!(game.bullets.is_empty());
    }

    #[test]
    fn dead_and_escaped_enemies_are_pruned() {
        let mut game = game();
        spawn_enemy(&mut game, 10.0, 10.0, 40.0, 40.0);
        spawn_enemy(&mut game, 100.0, 10.0, 140.0, 40.0);
        spawn_enemy(&mut game, 200.0, 10.0, 240.0, 40.0);
        game.enemies[0].body.kill();
        game.enemies[1].body.transfer(Vec2::new(0.0, 800.0));

        game.exec_enem_trajectory();
        assert_eq!(game.enemies.len(), 1);
        assert_eq!(game.enemies[0].body.hitbox.x1, 200.0);
    }

    #[test]
    fn timers_count_down_only_until_expired() {
        let mut game = game();
        game.timers.debug_cooldown.current_time = 1;
        game.refresh_timers();
        game.refresh_timers();
        assert_eq!(game.timers.debug_cooldown.current_time, 0);
        assert_eq!(game.timers.level_timer.current_time, 998);
    }

    #[test]
    fn menu_mode_only_runs_the_press_cooldown() {
        let mut game = game();
        game.return_to_menu();
        spawn_bullet(&mut game, "normal_acc", Hitbox::new(10.0, 300.0, 20.0, 310.0), 1);
        game.show_debug_info = true;
        let before = game.bullets[0].body.hitbox;

        game.advance_game(&idle());
        assert_eq!(game.bullets[0].body.hitbox, before);
        assert_eq!(game.timers.level_timer.current_time, 1000);
        assert_eq!(
            game.press_cooldown.current_time,
            game.press_cooldown.initial_time - 1
        );
        assert!(!game.show_debug_info);
        assert_eq!(game.time_ticks, 0);
    }

    #[test]
    fn shooting_respects_the_cooldown() {
        let mut game = game();
        let shoot = TickInput::new([Action::Shoot]);

        tick(&mut game, &shoot);
        assert!(game.bullets.is_empty());

        game.timers.shooting_cooldown.current_time = 0;
        tick(&mut game, &shoot);
        assert_eq!(game.bullets.len(), 1);
        tick(&mut game, &shoot);
        assert_eq!(game.bullets.len(), 1);
    }

    #[test]
    fn blocked_volley_keeps_the_cooldown_expired() {
        let mut game = game();
        game.power_up(2);
        // Flush against the left edge, the left bullet of the pair would
        // start at x = -10
        game.player.hitbox = Hitbox::new(0.0, 568.0, 10.0, 628.0);
        game.timers.shooting_cooldown.current_time = 0;

        game.process_action(Action::Shoot);
        assert!(game.bullets.is_empty());
        assert!(game.timers.shooting_cooldown.is_zero_or_less());

        game.player.hitbox = Hitbox::new(100.0, 568.0, 160.0, 628.0);
        game.process_action(Action::Shoot);
        assert_eq!(game.bullets.len(), 2);
        assert!(!game.timers.shooting_cooldown.is_zero_or_less());
    }

    #[test]
    fn level_with_edge_instants_runs_to_completion() {
        let spawn = r#"[{"x1": 0, "y1": 0, "x2": 10, "y2": 10, "type": "common1"}]"#;
        let script = LevelScript::from_json(&format!(
            r#"{{"total_time": 5, "5": {spawn}, "0": {spawn}}}"#
        ))
        .unwrap();
        let mut game = game_with(GameConfig::default(), script);

        for _ in 0..20 {
            game.advance_game(&idle());
        }
        assert_eq!(game.timers.level_timer.current_time, 0);
        assert!(game.level_dict.is_empty());
        assert_eq!(game.enemies.len(), 2);

        game.enemies.iter_mut().for_each(|enemy| enemy.body.kill());
        game.advance_game(&idle());
        assert!(game.level_finished());
    }

    #[test]
    fn debug_toggle_respects_its_cooldown() {
        let mut game = game();
        game.timers.debug_cooldown.current_time = 0;
        game.process_action(Action::Debug);
        assert!(game.show_debug_info);
        game.process_action(Action::Debug);
        assert!(game.show_debug_info);
    }

    #[test]
    fn movement_actions_move_the_player() {
        let mut game = game();
        let start = game.player.hitbox;
        tick(&mut game, &TickInput::new([Action::Left, Action::Up]));
        assert_eq!(game.player.hitbox, start.translated(Vec2::new(-5.0, -5.0)));

        game.return_to_menu();
        tick(&mut game, &TickInput::new([Action::Right]));
        assert_eq!(game.player.hitbox, start.translated(Vec2::new(-5.0, -5.0)));
    }

    #[test]
    fn return_leaves_the_game() {
        let mut game = game();
        spawn_enemy(&mut game, 10.0, 10.0, 40.0, 40.0);
        tick(&mut game, &TickInput::new([Action::Return]));
        assert_eq!(game.mode, Mode::Menu);
        assert!(game.enemies.is_empty());
    }

    #[test]
    fn holding_exit_requests_quit_after_the_delay() {
        let mut game = game();
        let exit = TickInput::new([Action::Exit]);
        for _ in 0..29 {
            tick(&mut game, &exit);
        }
        assert!(game.exiting);
        assert!(!game.exit_requested);
        tick(&mut game, &exit);
        assert!(game.exit_requested);

        // Releasing resets the hold
        tick(&mut game, &idle());
        assert!(!game.exiting);
        assert_eq!(game.exit_progress().current_time, 30);
    }

    #[test]
    fn exit_hold_drains_twice_as_fast_in_menus() {
        let mut game = game();
        game.return_to_menu();
        let exit = TickInput::new([Action::Exit]);
        for _ in 0..15 {
            tick(&mut game, &exit);
        }
        assert!(game.exit_requested);
    }

    #[test]
    fn identical_inputs_give_identical_games() {
        let levels = crate::levels::LevelDir::new(
            concat!(env!("CARGO_MANIFEST_DIR"), "/assets/levels"),
            GameConfig::default().bounds(),
        );
        let mut a = Game::from_source(GameConfig::default(), &levels).unwrap();
        let mut b = Game::from_source(GameConfig::default(), &levels).unwrap();
        a.start_game();
        b.start_game();

        let inputs = [
            TickInput::new([Action::Shoot, Action::Left]),
            TickInput::new([Action::Up]),
            TickInput::default(),
            TickInput::new([Action::Right, Action::Shoot]),
        ];
        for frame in 0..400 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut a, input);
            tick(&mut b, input);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player, b.player);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.bullets.len(), b.bullets.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.body, eb.body);
        }
        assert!(!a.enemies.is_empty());
    }
}
