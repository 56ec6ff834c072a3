use log::debug;
use rand::Rng;

use crate::constants::*;
use crate::entities::{Meteor, MeteorKind};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spawner {
    probability: f64,
}

impl Spawner {
    pub fn new(probability: f64) -> Self {
        Spawner { probability: probability.clamp(0.0, 1.0) }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn tick(&self, rng: &mut impl Rng, meteors: &mut Vec<Meteor>) -> Option<MeteorKind> {
        if !rng.gen_bool(self.probability) {
            return None;
        }
        let kind = roll_kind(rng);
        let x = rng.gen_range(0.0..PLAY_WIDTH - kind.size());
        meteors.push(Meteor::new(x, kind));
        debug!("Spawned {:?} meteor at x = {:.1}", kind, x);
        Some(kind)
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Spawner::new(METEOR_SPAWN_PROBABILITY)
    }
}

/// Half small; the other half split evenly between medium and large.
pub fn roll_kind(rng: &mut impl Rng) -> MeteorKind {
    if rng.gen_bool(0.5) {
        MeteorKind::Small
    } else if rng.gen_bool(0.5) {
        MeteorKind::Medium
    } else {
        MeteorKind::Large
    }
}
