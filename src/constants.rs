// --- Play Area ---
pub const PLAY_WIDTH: f64 = 800.0;
pub const PLAY_HEIGHT: f64 = 600.0;
pub const TICKS_PER_SECOND: u32 = 60;
pub const MAX_CATCH_UP_TICKS: u32 = 5; // Backlog beyond this is dropped

// --- Spawning ---
pub const METEOR_SPAWN_PROBABILITY: f64 = 0.02;

// --- Ship ---
pub const SHIP_WIDTH: f64 = 50.0;
pub const SHIP_HEIGHT: f64 = 30.0;
pub const SHIP_START_Y: f64 = PLAY_HEIGHT - 50.0;
pub const SHIP_STEP: f64 = 5.0;

// --- Bullets ---
pub const BULLET_WIDTH: f64 = 4.0;
pub const BULLET_HEIGHT: f64 = 10.0;
pub const INITIAL_BULLET_SPEED: f64 = 5.0;

// --- Upgrades ---
pub const INITIAL_SPEED_UPGRADE_COST: u32 = 100;
pub const SPEED_UPGRADE_COST_INCREASE: u32 = 150;
pub const BULLET_SPEED_INCREMENT: f64 = 0.5;

pub const INITIAL_SHIELD_UPGRADE_COST: u32 = 500;
pub const SHIELD_UPGRADE_COST_INCREASE: u32 = 300;
pub const SHIELD_DURATION_TICKS: u32 = 60 * 10; // 10 seconds

// --- Runner ---
pub const IDLE_POLL_INTERVAL_MS: u64 = 50;
