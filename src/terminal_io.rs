use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Fire,
    Start,
    Stop,
    BuySpeedUpgrade,
    BuyShieldUpgrade,
    Quit,
}

pub fn command_for(event: &Event) -> Option<Command> {
    let Event::Key(key_event) = event else {
        return None;
    };
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    match key_event.code {
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Char(' ') => Some(Command::Fire),
        KeyCode::Char('s') => Some(Command::Start),
        KeyCode::Char('x') => Some(Command::Stop),
        KeyCode::Char('1') => Some(Command::BuySpeedUpgrade),
        KeyCode::Char('2') => Some(Command::BuyShieldUpgrade),
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

/// Source of input events and of the clock the game loop runs against.
pub trait InputSource {
    fn now(&self) -> Instant;

    fn poll(&mut self, timeout: Duration, frame: u64) -> io::Result<Option<Event>>;

    /// True once no further input can ever arrive.
    fn is_exhausted(&self, _frame: u64) -> bool {
        false
    }
}

// --- Real keyboard via crossterm ---
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn poll(&mut self, timeout: Duration, _frame: u64) -> io::Result<Option<Event>> {
        if event::poll(timeout).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
            let event = event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?;
            return Ok(Some(event));
        }
        Ok(None)
    }
}

// --- SimulatedInput for debugging ---
/// Replays one scripted event per frame against a virtual clock that only
/// moves when a poll would have waited.
pub struct SimulatedInput {
    events: HashMap<u64, Event>,
    now: Instant,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Event>) -> Self {
        SimulatedInput { events, now: Instant::now() }
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

impl InputSource for SimulatedInput {
    fn now(&self) -> Instant {
        self.now
    }

    fn poll(&mut self, timeout: Duration, frame: u64) -> io::Result<Option<Event>> {
        if let Some(event) = self.events.remove(&frame) {
            return Ok(Some(event));
        }
        self.now += timeout;
        Ok(None)
    }

    fn is_exhausted(&self, frame: u64) -> bool {
        self.events.keys().all(|&scheduled| scheduled < frame)
    }
}
