use crate::constants::*;
use crate::rendering::{Sprite, Surface};
use crate::types::{Rect, Vector2D, clamp_coordinate};

// --- Meteor kinds and their static lookup table ---
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeteorKind {
    Small,
    Medium,
    Large,
}

impl MeteorKind {
    pub const ALL: [MeteorKind; 3] = [MeteorKind::Small, MeteorKind::Medium, MeteorKind::Large];

    pub fn size(self) -> f64 {
        match self {
            MeteorKind::Small => 20.0,
            MeteorKind::Medium => 40.0,
            MeteorKind::Large => 60.0,
        }
    }

    pub fn speed(self) -> f64 {
        match self {
            MeteorKind::Small => 4.0,
            MeteorKind::Medium => 2.0,
            MeteorKind::Large => 1.0,
        }
    }

    /// Score (and coins) awarded when the meteor is shot down.
    pub fn value(self) -> u32 {
        match self {
            MeteorKind::Small => 10,
            MeteorKind::Medium => 20,
            MeteorKind::Large => 50,
        }
    }

    pub fn sprite(self) -> Sprite {
        match self {
            MeteorKind::Small => Sprite { asset: "M_small.png", glyph: 'o' },
            MeteorKind::Medium => Sprite { asset: "M_medium.png", glyph: 'O' },
            MeteorKind::Large => Sprite { asset: "M_large.png", glyph: '@' },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Meteor {
    pub position: Vector2D,
    pub kind: MeteorKind,
}

impl Meteor {
    pub fn new(x: f64, kind: MeteorKind) -> Self {
        Meteor { position: Vector2D::new(x, 0.0), kind }
    }

    pub fn bounds(&self) -> Rect {
        let size = self.kind.size();
        Rect::new(self.position.x, self.position.y, size, size)
    }

    pub fn update(&mut self) {
        self.position = self.position.add(Vector2D::new(0.0, self.kind.speed()));
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.draw_sprite(self.kind.sprite(), self.bounds());
    }
}

// --- Bullet struct ---
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub position: Vector2D,
    pub width: f64,
    pub height: f64,
    pub display_char: char,
}

impl Bullet {
    pub fn new(position: Vector2D) -> Self {
        Bullet {
            position,
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
            display_char: '|',
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// Bullets share one speed, owned by the economy, so it is passed in.
    pub fn update(&mut self, speed: f64) {
        self.position = self.position.add(Vector2D::new(0.0, -speed));
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.fill_rect(self.bounds(), self.display_char);
    }
}

// --- Ship struct ---
#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub position: Vector2D,
    pub width: f64,
    pub height: f64,
    pub display_char: char,
}

impl Ship {
    pub fn new() -> Self {
        Ship {
            position: Vector2D::new(PLAY_WIDTH / 2.0 - SHIP_WIDTH / 2.0, SHIP_START_Y),
            width: SHIP_WIDTH,
            height: SHIP_HEIGHT,
            display_char: '^',
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    pub fn move_by(&mut self, dx: f64) {
        self.position.x = clamp_coordinate(self.position.x + dx, 0.0, PLAY_WIDTH - self.width);
    }

    /// Where a fired bullet starts: centered on the ship, at its top edge.
    pub fn muzzle(&self) -> Vector2D {
        Vector2D::new(self.position.x + self.width / 2.0 - BULLET_WIDTH / 2.0, self.position.y)
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.fill_rect(self.bounds(), self.display_char);
    }
}

impl Default for Ship {
    fn default() -> Self {
        Ship::new()
    }
}
