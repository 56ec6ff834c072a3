use log::debug;

use crate::entities::{Bullet, Meteor, MeteorKind};

/// A bullet/meteor pair that destroyed each other. Indices refer to the pools
/// as they were when the pass started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub bullet: usize,
    pub meteor: usize,
    pub kind: MeteorKind,
}

/// Scans both pools without touching them. Candidate pairs are taken in
/// bullet-major, meteor-minor order and committed greedily, so every bullet
/// and every meteor appears in at most one hit.
pub fn find_hits(bullets: &[Bullet], meteors: &[Meteor]) -> Vec<Hit> {
    let candidates = bullets.iter().enumerate().flat_map(|(bullet_index, bullet)| {
        let bullet_bounds = bullet.bounds();
        meteors
            .iter()
            .enumerate()
            .filter(move |(_, meteor)| bullet_bounds.overlaps(&meteor.bounds()))
            .map(move |(meteor_index, meteor)| (bullet_index, meteor_index, meteor.kind))
    });

    let mut bullet_spent = vec![false; bullets.len()];
    let mut meteor_spent = vec![false; meteors.len()];
    let mut hits = Vec::new();
    for (bullet, meteor, kind) in candidates {
        if bullet_spent[bullet] || meteor_spent[meteor] {
            continue;
        }
        bullet_spent[bullet] = true;
        meteor_spent[meteor] = true;
        hits.push(Hit { bullet, meteor, kind });
    }
    hits
}

/// Finds the hits, then removes every matched entity in one go.
pub fn resolve(bullets: &mut Vec<Bullet>, meteors: &mut Vec<Meteor>) -> Vec<Hit> {
    let hits = find_hits(bullets, meteors);
    if hits.is_empty() {
        return hits;
    }

    let mut bullet_spent = vec![false; bullets.len()];
    let mut meteor_spent = vec![false; meteors.len()];
    for hit in &hits {
        bullet_spent[hit.bullet] = true;
        meteor_spent[hit.meteor] = true;
        debug!("Bullet {} destroyed {:?} meteor {}", hit.bullet, hit.kind, hit.meteor);
    }

    let mut index = 0;
    bullets.retain(|_| {
        let keep = !bullet_spent[index];
        index += 1;
        keep
    });
    let mut index = 0;
    meteors.retain(|_| {
        let keep = !meteor_spent[index];
        index += 1;
        keep
    });

    hits
}
