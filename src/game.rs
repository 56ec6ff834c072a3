use std::time::Instant;
use log::{debug, info};
use rand::rngs::StdRng;

use crate::constants::*;
use crate::rendering::{Hud, Surface};
use crate::schedule::TickSchedule;
use crate::spawner::Spawner;
use crate::state::{Direction, GameState, TickReport};
use crate::terminal_io::Command;
use crate::upgrades::UpgradeType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Ignored,
    Stopped { final_score: u32 },
    Quit,
}

/// The game loop's state machine: owns the round state, the random source
/// and the tick schedule.
pub struct Game {
    state: GameState,
    phase: Phase,
    spawner: Spawner,
    schedule: TickSchedule,
    rng: StdRng,
    round_ticks: u64,
    final_score: Option<u32>,
}

impl Game {
    pub fn new(spawner: Spawner, rng: StdRng) -> Self {
        Game {
            state: GameState::new(),
            phase: Phase::Idle,
            spawner,
            schedule: TickSchedule::new(TICKS_PER_SECOND),
            rng,
            round_ticks: 0,
            final_score: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    pub fn round_ticks(&self) -> u64 {
        self.round_ticks
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    /// Idle -> Running. Ignored while a round is already in progress.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.phase == Phase::Running {
            debug!("Start ignored: round already running");
            return false;
        }
        self.state.reset_round();
        self.round_ticks = 0;
        self.final_score = None;
        self.schedule.start(now);
        self.phase = Phase::Running;
        info!("Round started");
        true
    }

    /// Running -> Idle. Returns the final score, or `None` when idle already.
    pub fn stop(&mut self) -> Option<u32> {
        if self.phase == Phase::Idle {
            debug!("Stop ignored: no round running");
            return None;
        }
        self.schedule.cancel();
        self.phase = Phase::Idle;
        let score = self.state.economy.score;
        self.final_score = Some(score);
        info!("Round stopped after {} ticks. Final score: {}", self.round_ticks, score);
        Some(score)
    }

    pub fn handle_command(&mut self, command: Command, now: Instant) -> Flow {
        match command {
            Command::Start => {
                if self.start(now) { Flow::Continue } else { Flow::Ignored }
            }
            Command::Stop => match self.stop() {
                Some(final_score) => Flow::Stopped { final_score },
                None => Flow::Ignored,
            },
            Command::Quit => {
                self.stop();
                Flow::Quit
            }
            Command::BuySpeedUpgrade => self.purchase(UpgradeType::BulletSpeed),
            Command::BuyShieldUpgrade => self.purchase(UpgradeType::Shield),
            Command::MoveLeft | Command::MoveRight | Command::Fire if self.phase == Phase::Idle => {
                Flow::Ignored
            }
            Command::MoveLeft => {
                self.state.move_ship(Direction::Left);
                Flow::Continue
            }
            Command::MoveRight => {
                self.state.move_ship(Direction::Right);
                Flow::Continue
            }
            Command::Fire => {
                self.state.fire();
                Flow::Continue
            }
        }
    }

    fn purchase(&mut self, upgrade: UpgradeType) -> Flow {
        if self.state.purchase(upgrade) { Flow::Continue } else { Flow::Ignored }
    }

    pub fn take_due_ticks(&mut self, now: Instant) -> u32 {
        self.schedule.take_due(now)
    }

    pub fn tick(&mut self) -> Option<TickReport> {
        if self.phase != Phase::Running {
            return None;
        }
        let report = self.state.step(&self.spawner, &mut self.rng);
        self.round_ticks += 1;
        Some(report)
    }

    pub fn render(&self, surface: &mut impl Surface) {
        surface.clear();
        self.state.ship.draw(surface);
        for meteor in &self.state.meteors {
            meteor.draw(surface);
        }
        for bullet in &self.state.bullets {
            bullet.draw(surface);
        }

        let economy = &self.state.economy;
        surface.set_hud(Hud {
            score: economy.score,
            coins: economy.coins,
            speed_upgrade_cost: economy.speed_upgrade_cost,
            shield_upgrade_cost: economy.shield_upgrade_cost,
            shield_ticks_left: self.state.shield.remaining_ticks(),
        });
        surface.set_shield_indicator(self.state.shield.is_active());
        surface.set_start_enabled(self.phase == Phase::Idle);
        surface.show_message(self.final_score.map(|score| format!("Game Over! Your score is {}", score)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Bullet, Meteor, MeteorKind};
    use crate::rendering::{OutputTarget, Screen, ScreenBuffer};
    use crate::types::Vector2D;
    use rand::SeedableRng;

    fn quiet_game() -> Game {
        Game::new(Spawner::new(0.0), StdRng::seed_from_u64(9))
    }

    #[test]
    fn start_and_stop_move_between_phases() {
        let mut game = quiet_game();
        let now = Instant::now();
        assert_eq!(game.phase(), Phase::Idle);

        assert_eq!(game.handle_command(Command::Start, now), Flow::Continue);
        assert_eq!(game.phase(), Phase::Running);
        assert!(game.schedule().is_active());

        assert_eq!(game.handle_command(Command::Start, now), Flow::Ignored);

        assert_eq!(game.handle_command(Command::Stop, now), Flow::Stopped { final_score: 0 });
        assert_eq!(game.phase(), Phase::Idle);
        assert!(!game.schedule().is_active());

        assert_eq!(game.handle_command(Command::Stop, now), Flow::Ignored);
    }

    #[test]
    fn start_resets_round_state() {
        let mut game = quiet_game();
        let now = Instant::now();
        game.start(now);
        game.handle_command(Command::MoveRight, now);
        game.handle_command(Command::Fire, now);
        game.state_mut().economy.score = 300;
        game.state_mut().economy.coins = 120;
        game.state_mut().economy.bullet_speed = 9.0;
        game.stop();

        game.start(now);
        let state = game.state();
        assert_eq!(state.economy.score, 0);
        assert_eq!(state.economy.coins, 0);
        assert_eq!(state.economy.bullet_speed, INITIAL_BULLET_SPEED);
        assert!(state.bullets.is_empty());
        assert_eq!(game.final_score(), None);
        assert_eq!(game.round_ticks(), 0);
    }

    #[test]
    fn idle_game_ignores_movement_and_ticks() {
        let mut game = quiet_game();
        let now = Instant::now();
        assert_eq!(game.handle_command(Command::Fire, now), Flow::Ignored);
        assert_eq!(game.handle_command(Command::MoveLeft, now), Flow::Ignored);
        assert!(game.state().bullets.is_empty());
        assert_eq!(game.tick(), None);
    }

    #[test]
    fn upgrades_are_accepted_in_any_phase() {
        let mut game = quiet_game();
        let now = Instant::now();
        game.state_mut().economy.coins = 100;
        assert_eq!(game.handle_command(Command::BuySpeedUpgrade, now), Flow::Continue);
        assert_eq!(game.handle_command(Command::BuyShieldUpgrade, now), Flow::Ignored);
        assert_eq!(game.state().economy.speed_upgrade_cost, 250);
    }

    #[test]
    fn quit_while_running_stops_the_round() {
        let mut game = quiet_game();
        let now = Instant::now();
        game.start(now);
        game.state_mut().economy.score = 40;

        assert_eq!(game.handle_command(Command::Quit, now), Flow::Quit);
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.final_score(), Some(40));
    }

    #[test]
    fn score_never_decreases_during_a_round() {
        let mut game = Game::new(Spawner::new(0.2), StdRng::seed_from_u64(11));
        let now = Instant::now();
        game.start(now);
        let mut last_score = 0;
        for tick in 0..2_000u32 {
            if tick % 3 == 0 {
                game.handle_command(Command::Fire, now);
            }
            if tick % 40 < 20 {
                game.handle_command(Command::MoveLeft, now);
            } else {
                game.handle_command(Command::MoveRight, now);
            }
            let coins_before = game.state().economy.coins;
            let bullets_before = game.state().bullets.len();
            let report = game.tick().unwrap();
            let economy = &game.state().economy;
            assert!(economy.score >= last_score);
            assert!(economy.coins >= coins_before);
            assert!(report.hits.len() <= bullets_before);
            last_score = economy.score;
        }
        assert!(last_score > 0);
    }

    #[test]
    fn render_draws_entities_and_hud() {
        let mut game = quiet_game();
        let now = Instant::now();
        game.start(now);
        game.state_mut().bullets.push(Bullet::new(Vector2D::new(100.0, 100.0)));
        game.state_mut().meteors.push(Meteor::new(400.0, MeteorKind::Large));
        game.state_mut().economy.coins = 500;
        game.handle_command(Command::BuyShieldUpgrade, now);

        let mut screen = Screen::new(80, 24, OutputTarget::ScreenBuffer(ScreenBuffer::new(80, 24)));
        game.render(&mut screen);

        assert_eq!(screen.grid.char_at(10, 2), Some('|'));
        assert_eq!(screen.grid.char_at(40, 0), Some('@'));
        assert_eq!(screen.grid.char_at(40, 15), Some('^'));
        assert!(screen.shield_visible());
        assert!(!screen.start_enabled());
        assert_eq!(screen.hud().coins, 0);
        assert_eq!(screen.hud().shield_upgrade_cost, 800);
        assert_eq!(screen.message(), None);

        game.stop();
        game.render(&mut screen);
        assert!(screen.start_enabled());
        assert_eq!(screen.message(), Some("Game Over! Your score is 0"));
    }

    #[test]
    fn ship_at_left_edge_stays_visible_above_the_legend() {
        let mut game = quiet_game();
        game.start(Instant::now());
        for _ in 0..100 {
            game.handle_command(Command::MoveLeft, Instant::now());
        }
        assert_eq!(game.state().ship.position.x, 0.0);

        let mut screen = Screen::new(80, 24, OutputTarget::ScreenBuffer(ScreenBuffer::new(80, 24)));
        game.render(&mut screen);
        screen.present().unwrap();

        let OutputTarget::ScreenBuffer(sb) = &screen.target else {
            panic!("expected a screen buffer");
        };
        assert!(sb.row(15).starts_with("^^^^^"));
        assert!(sb.row(16).starts_with("^^^^^"));
    }

    #[test]
    fn shield_indicator_hides_on_the_expiry_tick() {
        let mut game = quiet_game();
        game.start(Instant::now());
        game.state_mut().economy.coins = 500;
        assert_eq!(game.handle_command(Command::BuyShieldUpgrade, Instant::now()), Flow::Continue);
        let mut screen = Screen::new(80, 24, OutputTarget::ScreenBuffer(ScreenBuffer::new(80, 24)));

        for _ in 0..SHIELD_DURATION_TICKS - 1 {
            let report = game.tick().unwrap();
            assert!(!report.shield_expired);
        }
        game.render(&mut screen);
        assert!(screen.shield_visible());
        assert_eq!(screen.hud().shield_ticks_left, 1);

        let report = game.tick().unwrap();
        assert!(report.shield_expired);
        game.render(&mut screen);
        assert!(!screen.shield_visible());
    }
}
