use std::io;
use std::time::Duration;
use log::{debug, error, info};

use crate::constants::IDLE_POLL_INTERVAL_MS;
use crate::game::{Flow, Game, Phase};
use crate::rendering::Screen;
use crate::terminal_io::{InputSource, command_for};

pub struct Runner<I: InputSource> {
    game: Game,
    screen: Screen,
    input: I,
    max_frames: Option<u64>,
    frame_count: u64,
    presented: u64,
}

impl<I: InputSource> Runner<I> {
    pub fn new(game: Game, screen: Screen, input: I, max_frames: Option<u64>) -> Self {
        Runner { game, screen, input, max_frames, frame_count: 0, presented: 0 }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.redraw()?;

        while self.max_frames.is_none_or(|max| self.frame_count < max) {
            if self.game.phase() == Phase::Idle && self.input.is_exhausted(self.frame_count) {
                info!("Input exhausted at frame {}", self.frame_count);
                break;
            }

            let mut dirty = false;
            let timeout = self
                .game
                .schedule()
                .time_until_due(self.input.now())
                .unwrap_or(Duration::from_millis(IDLE_POLL_INTERVAL_MS));

            if let Some(event) = self.input.poll(timeout, self.frame_count)? {
                if let Some(command) = command_for(&event) {
                    match self.game.handle_command(command, self.input.now()) {
                        Flow::Quit => {
                            self.redraw()?;
                            info!("Quit requested at frame {}", self.frame_count);
                            return Ok(());
                        }
                        Flow::Stopped { final_score } => {
                            info!("Game over, final score {}", final_score);
                            dirty = true;
                        }
                        Flow::Continue => dirty = true,
                        Flow::Ignored => debug!("Ignored {:?} while {:?}", command, self.game.phase()),
                    }
                }
            }

            // Every catch-up tick gets its own frame.
            let due = self.game.take_due_ticks(self.input.now());
            for _ in 0..due {
                if let Some(report) = self.game.tick() {
                    if report.shield_expired {
                        debug!("Shield indicator hidden");
                    }
                    self.redraw()?;
                    dirty = false;
                }
            }

            if dirty {
                self.redraw()?;
            }
            self.frame_count += 1;
        }
        Ok(())
    }

    fn redraw(&mut self) -> io::Result<()> {
        self.game.render(&mut self.screen);
        self.screen.present().map_err(|e| { error!("Failed to present frame: {}", e); e })?;
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::{OutputTarget, ScreenBuffer};
    use crate::spawner::Spawner;
    use crate::terminal_io::SimulatedInput;
    use crossterm::event::{Event, KeyCode};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;
    use std::time::Instant;

    fn key(c: char) -> Event {
        Event::Key(KeyCode::Char(c).into())
    }

    /// Starts a round on frame 0, then falls three periods behind per poll.
    struct LaggingInput {
        now: Instant,
        start: Option<Event>,
    }

    impl InputSource for LaggingInput {
        fn now(&self) -> Instant {
            self.now
        }

        fn poll(&mut self, timeout: Duration, frame: u64) -> io::Result<Option<Event>> {
            if frame == 0 {
                return Ok(self.start.take());
            }
            self.now += timeout * 3;
            Ok(None)
        }
    }

    fn runner(events: HashMap<u64, Event>, max_frames: Option<u64>) -> Runner<SimulatedInput> {
        let game = Game::new(Spawner::new(0.0), StdRng::seed_from_u64(5));
        let screen = Screen::new(40, 12, OutputTarget::ScreenBuffer(ScreenBuffer::new(40, 12)));
        Runner::new(game, screen, SimulatedInput::new(events), max_frames)
    }

    #[test]
    fn scripted_round_ticks_once_per_idle_frame() {
        let mut events = HashMap::new();
        events.insert(0, key('s'));
        events.insert(11, key('x'));
        let mut runner = runner(events, None);

        runner.run().unwrap();

        // Frame 0 starts the round, frames 1..=10 each tick once, frame 11 stops.
        assert_eq!(runner.game().phase(), Phase::Idle);
        assert_eq!(runner.game().round_ticks(), 10);
        assert_eq!(runner.game().final_score(), Some(0));
        assert_eq!(runner.screen().message(), Some("Game Over! Your score is 0"));
        assert_eq!(runner.frame_count(), 12);
    }

    #[test]
    fn quit_ends_the_run_and_surfaces_score() {
        let mut events = HashMap::new();
        events.insert(0, key('s'));
        events.insert(3, key('q'));
        let mut runner = runner(events, Some(100));

        runner.run().unwrap();

        assert_eq!(runner.frame_count(), 3);
        assert_eq!(runner.game().final_score(), Some(0));
        assert!(runner.screen().start_enabled());
    }

    #[test]
    fn max_frames_bounds_a_running_game() {
        let mut events = HashMap::new();
        events.insert(0, key('s'));
        let mut runner = runner(events, Some(30));

        runner.run().unwrap();

        assert_eq!(runner.frame_count(), 30);
        assert_eq!(runner.game().phase(), Phase::Running);
        assert_eq!(runner.game().round_ticks(), 29);
    }

    #[test]
    fn catch_up_ticks_are_each_presented() {
        let game = Game::new(Spawner::new(0.0), StdRng::seed_from_u64(5));
        let screen = Screen::new(40, 12, OutputTarget::ScreenBuffer(ScreenBuffer::new(40, 12)));
        let input = LaggingInput { now: Instant::now(), start: Some(key('s')) };
        let mut runner = Runner::new(game, screen, input, Some(2));

        runner.run().unwrap();

        // Initial frame, the start, then one frame per caught-up tick.
        assert_eq!(runner.game().round_ticks(), 3);
        assert_eq!(runner.presented(), 5);
    }
}
