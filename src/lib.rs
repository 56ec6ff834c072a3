pub mod collision;
pub mod constants;
pub mod entities;
pub mod game;
pub mod motion;
pub mod rendering;
pub mod runner;
pub mod schedule;
pub mod shield;
pub mod spawner;
pub mod state;
pub mod terminal_io;
pub mod types;
pub mod upgrades;
