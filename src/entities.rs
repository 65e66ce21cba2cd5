/// All game entity types and their per-frame update rules.
///
/// Every entity follows the same tick shape: move, pick the animation frame
/// from its age, then age by one.

use crate::sprites::{Region, Sprite, SpriteQueue};

// ── Sprite-sheet layout ───────────────────────────────────────────────────────

const SHEET_STAR_U: u16 = 0;
const SHEET_BULLET_U: u16 = 8;
const SHEET_ALIEN_U: u16 = 16;
const SHEET_EXPLOSION_U: u16 = 32;
const SHEET_COIN_U: u16 = 48;

const STAR_SPEED: i32 = 2;
const BULLET_SPEED: i32 = 4;
/// Random part of an alien's speed; the current level is added on top.
pub const ALIEN_SPEED_SPREAD: f32 = 1.7;
pub const COIN_MIN_SPEED: f32 = 1.0;
pub const COIN_MAX_SPEED: f32 = 2.0;
/// Explosions are removed once their animation frame passes this value.
pub const EXPLOSION_LAST_FRAME: u32 = 2;

fn sheet_region(bank: u8, u: u16, anim: u32, w: i32, h: i32, colkey: u8) -> Region {
    Region {
        bank,
        u,
        v: h as u16 * anim as u16,
        w: w as u16,
        h: h as u16,
        colkey: Some(colkey),
    }
}

// ── Background stars ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: i32,
    pub y: i32,
    pub age: u32,
    pub anim: u32,
}

impl Star {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y, age: 0, anim: 0 }
    }
}

impl Sprite for Star {
    const WIDTH: i32 = 8;
    const HEIGHT: i32 = 8;

    fn position(&self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }

    fn tick(&mut self) {
        self.x -= STAR_SPEED;
        // three twinkle shapes, nine frames each
        self.anim = self.age / 9 % 3;
        self.age += 1;
    }

    fn animation_frame(&self) -> u32 {
        self.anim
    }

    fn region(&self) -> Region {
        // Stars key out colour 1, everything else keys out 0.
        sheet_region(0, SHEET_STAR_U, self.anim, Self::WIDTH, Self::HEIGHT, 1)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
    pub age: u32,
}

impl Bullet {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y, age: 0 }
    }

    /// True once the bullet has passed the right edge of a field `width` wide.
    pub fn is_off_right(&self, width: i32) -> bool {
        self.x > width
    }
}

impl Sprite for Bullet {
    const WIDTH: i32 = 8;
    const HEIGHT: i32 = 8;

    fn position(&self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }

    fn tick(&mut self) {
        self.x += BULLET_SPEED;
        self.age += 1;
    }

    fn animation_frame(&self) -> u32 {
        0
    }

    fn region(&self) -> Region {
        sheet_region(0, SHEET_BULLET_U, 0, Self::WIDTH, Self::HEIGHT, 0)
    }
}

// ── Enemies & pickups ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    /// Fractional so slow aliens still drift smoothly.
    pub x: f32,
    pub y: i32,
    /// Leftward speed in pixels per frame.
    pub vx: f32,
    pub age: u32,
    pub anim: u32,
}

impl Alien {
    pub fn new(x: f32, y: i32, vx: f32) -> Self {
        Self { x, y, vx, age: 0, anim: 0 }
    }
}

impl Sprite for Alien {
    const WIDTH: i32 = 16;
    const HEIGHT: i32 = 16;

    fn position(&self) -> (f32, f32) {
        (self.x, self.y as f32)
    }

    fn tick(&mut self) {
        self.x -= self.vx;
        self.anim = self.age / 5 % 2;
        self.age += 1;
    }

    fn animation_frame(&self) -> u32 {
        self.anim
    }

    fn region(&self) -> Region {
        sheet_region(0, SHEET_ALIEN_U, self.anim, Self::WIDTH, Self::HEIGHT, 0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Coin {
    pub x: f32,
    pub y: i32,
    pub vx: f32,
    pub age: u32,
    pub anim: u32,
}

impl Coin {
    pub fn new(x: f32, y: i32, vx: f32) -> Self {
        Self { x, y, vx, age: 0, anim: 0 }
    }
}

impl Sprite for Coin {
    const WIDTH: i32 = 8;
    const HEIGHT: i32 = 8;

    fn position(&self) -> (f32, f32) {
        (self.x, self.y as f32)
    }

    fn tick(&mut self) {
        self.x -= self.vx;
        // four-frame spin
        self.anim = self.age / 3 % 4;
        self.age += 1;
    }

    fn animation_frame(&self) -> u32 {
        self.anim
    }

    fn region(&self) -> Region {
        sheet_region(0, SHEET_COIN_U, self.anim, Self::WIDTH, Self::HEIGHT, 0)
    }
}

// ── Effects ───────────────────────────────────────────────────────────────────

/// Purely visual; removed once its animation has played out.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub x: i32,
    pub y: i32,
    pub age: u32,
    pub anim: u32,
}

impl Explosion {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y, age: 0, anim: 0 }
    }

    pub fn is_finished(&self) -> bool {
        self.anim > EXPLOSION_LAST_FRAME
    }
}

impl Sprite for Explosion {
    const WIDTH: i32 = 16;
    const HEIGHT: i32 = 16;

    fn position(&self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }

    fn tick(&mut self) {
        self.anim = self.age / 2;
        self.age += 1;
    }

    fn animation_frame(&self) -> u32 {
        self.anim
    }

    fn region(&self) -> Region {
        let anim = self.anim.min(EXPLOSION_LAST_FRAME);
        sheet_region(0, SHEET_EXPLOSION_U, anim, Self::WIDTH, Self::HEIGHT, 0)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_START_X: i32 = 5;
pub const PLAYER_START_Y: i32 = 50;

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub age: u32,
    pub anim: u32,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y, age: 0, anim: 0 }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_START_X, PLAYER_START_Y)
    }
}

impl Sprite for Player {
    const WIDTH: i32 = 16;
    const HEIGHT: i32 = 16;

    fn position(&self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }

    /// Animation only; movement is input driven (see `compute::update_player`).
    fn tick(&mut self) {
        // idle / thrust flicker
        self.anim = self.age / 3 % 2;
        self.age += 1;
    }

    fn animation_frame(&self) -> u32 {
        self.anim
    }

    fn region(&self) -> Region {
        sheet_region(1, 0, self.anim, Self::WIDTH, Self::HEIGHT, 0)
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Everything that moves, one ordered collection per entity type, plus the
/// spawn clocks that drive each type's cadence.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub stars: SpriteQueue<Star>,
    /// Capped at `GameConfig::max_bullets`.
    pub bullets: SpriteQueue<Bullet>,
    pub aliens: SpriteQueue<Alien>,
    pub explosions: SpriteQueue<Explosion>,
    pub coins: SpriteQueue<Coin>,
    pub star_clock: u64,
    /// Stars spawned so far; even spawns go to the top half, odd to the bottom.
    pub star_count: u64,
    pub alien_clock: u64,
    pub coin_clock: u64,
    pub width: i32,
    pub height: i32,
}
