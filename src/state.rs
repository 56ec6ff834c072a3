use log::debug;
use rand::Rng;

use crate::collision::{self, Hit};
use crate::constants::*;
use crate::entities::{Bullet, Meteor, MeteorKind, Ship};
use crate::motion;
use crate::shield::ShieldTimer;
use crate::spawner::Spawner;
use crate::upgrades::{Economy, UpgradeType};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub spawned: Option<MeteorKind>,
    pub hits: Vec<Hit>,
    pub shield_expired: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Clone, Debug, Default)]
pub struct GameState {
    pub ship: Ship,
    pub meteors: Vec<Meteor>,
    pub bullets: Vec<Bullet>,
    pub economy: Economy,
    pub shield: ShieldTimer,
}

impl GameState {
    pub fn new() -> Self {
        GameState::default()
    }

    pub fn reset_round(&mut self) {
        self.ship = Ship::new();
        self.meteors.clear();
        self.bullets.clear();
        self.economy.reset_round();
        self.shield.reset();
    }

    /// Spawn, move, collide. Rendering is left to the caller.
    pub fn step(&mut self, spawner: &Spawner, rng: &mut impl Rng) -> TickReport {
        let spawned = spawner.tick(rng, &mut self.meteors);
        motion::advance(&mut self.meteors, &mut self.bullets, self.economy.bullet_speed);
        let (hits, shield_expired) = self.resolve_collisions();
        TickReport { spawned, hits, shield_expired }
    }

    /// Awards every hit, then counts the shield down by one tick.
    pub fn resolve_collisions(&mut self) -> (Vec<Hit>, bool) {
        let hits = collision::resolve(&mut self.bullets, &mut self.meteors);
        for hit in &hits {
            self.economy.award(hit.kind);
        }
        if !hits.is_empty() {
            debug!("{} hit(s), score now {}", hits.len(), self.economy.score);
        }
        let shield_expired = self.shield.tick();
        (hits, shield_expired)
    }

    pub fn move_ship(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.ship.move_by(-SHIP_STEP),
            Direction::Right => self.ship.move_by(SHIP_STEP),
        }
    }

    pub fn fire(&mut self) {
        self.bullets.push(Bullet::new(self.ship.muzzle()));
    }

    pub fn purchase_speed_upgrade(&mut self) -> bool {
        self.economy.purchase_speed_upgrade()
    }

    pub fn purchase_shield_upgrade(&mut self) -> bool {
        if !self.economy.charge(UpgradeType::Shield) {
            return false;
        }
        self.shield.activate(SHIELD_DURATION_TICKS);
        true
    }

    pub fn purchase(&mut self, upgrade: UpgradeType) -> bool {
        match upgrade {
            UpgradeType::BulletSpeed => self.purchase_speed_upgrade(),
            UpgradeType::Shield => self.purchase_shield_upgrade(),
        }
    }
}
