use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor::{Hide, Show},
    event::{Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use meteor_shooter::game::Game;
use meteor_shooter::rendering::{OutputTarget, Screen, ScreenBuffer};
use meteor_shooter::runner::Runner;
use meteor_shooter::spawner::Spawner;
use meteor_shooter::terminal_io::{SimulatedInput, TerminalInput};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Meteor Shooter: shoot falling meteors for score and coins, spend coins on upgrades.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Run headless against an in-memory screen with scripted input, logging every frame.
    #[arg(long)]
    debug: bool,

    /// Headless screen width in cells.
    #[arg(long, default_value_t = 80)]
    width: u16,

    /// Headless screen height in cells.
    #[arg(long, default_value_t = 24)]
    height: u16,

    /// Stop after this many frames.
    #[arg(long, value_name = "FRAMES")]
    max_frames: Option<u64>,

    /// Seed for meteor spawning. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// File that receives the log; stdout belongs to the game screen.
    #[arg(long, default_value = "meteor-shooter.log")]
    log_file: PathBuf,

    /// Most verbose level written to the log file.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

fn scripted_events() -> HashMap<u64, Event> {
    let mut sim_events = HashMap::new();
    sim_events.insert(1, Event::Key(KeyCode::Char('s').into()));
    sim_events.insert(2, Event::Key(KeyCode::Right.into()));
    sim_events.insert(3, Event::Key(KeyCode::Char(' ').into()));
    sim_events.insert(4, Event::Key(KeyCode::Left.into()));
    sim_events.insert(5, Event::Key(KeyCode::Char('1').into()));
    sim_events.insert(6, Event::Key(KeyCode::Char('2').into()));
    sim_events.insert(60, Event::Key(KeyCode::Char(' ').into()));
    sim_events.insert(240, Event::Key(KeyCode::Char('x').into()));
    sim_events.insert(241, Event::Key(KeyCode::Char('q').into())); // Quit right after the round ends
    sim_events
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    simple_logging::log_to_file(&cli.log_file, cli.log_level.into())?;
    info!("Starting meteor-shooter.");

    let rng = match cli.seed {
        Some(seed) => {
            info!("Seeding meteor spawns with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let spawner = Spawner::default();
    info!("Meteor spawn probability per tick: {}", spawner.probability());
    let game = Game::new(spawner, rng);

    if cli.debug {
        info!("Debug mode enabled. Resolution {}x{}", cli.width, cli.height);
        let screen = Screen::new(
            cli.width,
            cli.height,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(cli.width, cli.height)),
        );
        let input = SimulatedInput::new(scripted_events());
        let mut runner = Runner::new(game, screen, input, cli.max_frames);
        runner.run()?;
        info!("Debug run finished after {} frames.", runner.frame_count());
        return Ok(());
    }

    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    let result = run_in_terminal(game, cli.max_frames);

    let mut stdout = io::stdout();
    let restored = crossterm::execute!(stdout, Show)
        .and_then(|_| disable_raw_mode())
        .map_err(|e| { error!("Failed to restore terminal: {}", e); e });
    result?;
    restored?;
    info!("Exiting application.");
    Ok(())
}

fn run_in_terminal(game: Game, max_frames: Option<u64>) -> io::Result<()> {
    let (terminal_width, terminal_height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
    info!("Terminal size: {}x{}", terminal_width, terminal_height);

    let mut screen = Screen::new(terminal_width, terminal_height, OutputTarget::Stdout(io::stdout()));
    screen.clear_terminal().map_err(|e| { error!("Failed to clear screen: {}", e); e })?;
    screen.target.execute_other_command(Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;
    screen.target.flush()?;

    let mut runner = Runner::new(game, screen, TerminalInput, max_frames);
    runner.run()
}
