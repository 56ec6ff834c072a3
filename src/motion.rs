use crate::constants::PLAY_HEIGHT;
use crate::entities::{Bullet, Meteor};

/// Moves every meteor down and every bullet up, then drops whatever left
/// the play area. Both pools are settled before this returns.
pub fn advance(meteors: &mut Vec<Meteor>, bullets: &mut Vec<Bullet>, bullet_speed: f64) {
    meteors.retain_mut(|meteor| {
        meteor.update();
        meteor.position.y < PLAY_HEIGHT
    });

    bullets.retain_mut(|bullet| {
        bullet.update(bullet_speed);
        bullet.position.y > 0.0
    });
}
