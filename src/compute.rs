/// Per-frame simulation: spawn cadence, entity updates, removal and the
/// player controller.
///
/// Every function takes the `World` by mutable reference and changes only
/// what its name says. All randomness comes through an injected `Rng`, so a
/// seeded RNG makes a whole session reproducible.

use log::trace;
use rand::Rng;

use crate::collision::{self, AlienPass, CoinPass};
use crate::config::GameConfig;
use crate::entities::{
    Alien, Bullet, Coin, Player, Star, World, ALIEN_SPEED_SPREAD, COIN_MAX_SPEED, COIN_MIN_SPEED,
    PLAYER_START_X, PLAYER_START_Y,
};
use crate::input::{FrameInput, Key};
use crate::sprites::{Sprite, SpriteQueue};

const PLAYER_STEP: i32 = 2;
/// Leftmost x the ship may reach.
const PLAYER_MIN_X: i32 = 2;

// ── Difficulty ───────────────────────────────────────────────────────────────

/// Ten coins per level, starting at level 1.
pub fn level_for_score(score: u32) -> u32 {
    score / 10 + 1
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Empty world with the player at its start position, pulled inside the
/// field when the configured screen is smaller than the default.
///
/// `config` must pass [`GameConfig::validate`]; spawning on a field smaller
/// than a sprite or with a zero cadence panics.
pub fn init_world(config: &GameConfig) -> World {
    let x = PLAYER_START_X.clamp(PLAYER_MIN_X, (config.width / 2).max(PLAYER_MIN_X));
    let y = PLAYER_START_Y.clamp(0, (config.height - Player::HEIGHT).max(0));
    World {
        player: Player::new(x, y),
        stars: SpriteQueue::new(),
        bullets: SpriteQueue::bounded(config.max_bullets),
        aliens: SpriteQueue::new(),
        explosions: SpriteQueue::new(),
        coins: SpriteQueue::new(),
        star_clock: 0,
        star_count: 0,
        alien_clock: 0,
        coin_clock: 0,
        width: config.width,
        height: config.height,
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// New star at the right edge, alternating between the top and bottom half
/// so the sky fills evenly.
pub fn spawn_star(world: &mut World, rng: &mut impl Rng) {
    let max_y = world.height - Star::HEIGHT;
    let mid = max_y / 2;
    let y = if world.star_count % 2 == 0 {
        rng.gen_range(0..=mid)
    } else {
        rng.gen_range(mid..=max_y)
    };
    world.stars.push(Star::new(world.width, y));
    world.star_count += 1;
}

pub fn spawn_alien(world: &mut World, level: u32, rng: &mut impl Rng) {
    let y = rng.gen_range(0..=world.height - Alien::HEIGHT);
    let vx = ALIEN_SPEED_SPREAD * rng.gen::<f32>() + level as f32;
    trace!("alien spawned at y={} vx={:.2}", y, vx);
    world.aliens.push(Alien::new(world.width as f32, y, vx));
}

pub fn spawn_coin(world: &mut World, rng: &mut impl Rng) {
    let y = rng.gen_range(0..=world.height - Coin::HEIGHT);
    let vx = rng.gen_range(COIN_MIN_SPEED..COIN_MAX_SPEED);
    trace!("coin spawned at y={} vx={:.2}", y, vx);
    world.coins.push(Coin::new(world.width as f32, y, vx));
}

/// Fire from the trailing edge of the ship, vertically centered. Dropped
/// silently when the bullet cap is reached.
pub fn fire_bullet(world: &mut World) -> bool {
    let p = &world.player;
    let x = p.x + Player::WIDTH - Bullet::WIDTH;
    let y = p.y + Player::HEIGHT / 2 - Bullet::HEIGHT / 2;
    let fired = world.bullets.push(Bullet::new(x, y));
    if !fired {
        trace!("bullet cap reached, shot dropped");
    }
    fired
}

// ── Collection ticks ─────────────────────────────────────────────────────────

pub fn tick_stars(world: &mut World, interval: u64, rng: &mut impl Rng) {
    if world.star_clock % interval == 0 {
        spawn_star(world, rng);
    }
    for star in world.stars.iter_mut() {
        star.tick();
    }
    world.stars.pop_front_while(|s| s.is_off_left());
    world.star_clock += 1;
}

pub fn tick_bullets(world: &mut World) {
    for bullet in world.bullets.iter_mut() {
        bullet.tick();
    }
    let width = world.width;
    world.bullets.pop_front_while(|b| b.is_off_right(width));
}

/// Spawn, move, then resolve collisions. The alien clock advances by the
/// level, so spawns come roughly `interval / level` ticks apart.
pub fn tick_aliens(
    world: &mut World,
    level: u32,
    interval: u64,
    rng: &mut impl Rng,
) -> AlienPass {
    let next = world.alien_clock + u64::from(level.max(1));
    if next / interval > world.alien_clock / interval {
        spawn_alien(world, level, rng);
    }
    world.alien_clock = next;

    for alien in world.aliens.iter_mut() {
        alien.tick();
    }
    collision::resolve_aliens(world)
}

pub fn tick_explosions(world: &mut World) {
    for blast in world.explosions.iter_mut() {
        blast.tick();
    }
    world.explosions.pop_front_while(|e| e.is_finished());
}

pub fn tick_coins(world: &mut World, interval: u64, rng: &mut impl Rng) -> CoinPass {
    if world.coin_clock % interval == 0 {
        spawn_coin(world, rng);
    }
    for coin in world.coins.iter_mut() {
        coin.tick();
    }
    world.coin_clock += 1;
    collision::resolve_coins(world)
}

// ── Player controller ────────────────────────────────────────────────────────

/// Animate, apply held directions (each clamped independently), then fire on
/// a fresh press. The ship is confined to the left half of the field.
pub fn update_player(world: &mut World, input: &FrameInput) {
    let max_x = world.width / 2;
    let max_y = world.height - Player::HEIGHT;
    let p = &mut world.player;
    p.tick();

    if input.is_held(Key::Up) {
        p.y = (p.y - PLAYER_STEP).max(0);
    }
    if input.is_held(Key::Down) {
        p.y = (p.y + PLAYER_STEP).min(max_y);
    }
    if input.is_held(Key::Left) {
        p.x = (p.x - PLAYER_STEP).max(PLAYER_MIN_X);
    }
    if input.is_held(Key::Right) {
        p.x = (p.x + PLAYER_STEP).min(max_x);
    }

    if input.just_pressed(Key::Fire) {
        fire_bullet(world);
    }
}

// ── Full playing tick ────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    pub aliens: AlienPass,
    pub coins: CoinPass,
}

/// One `Playing` frame. Order matters: the player moves last so the next
/// frame draws it where this frame's input put it.
pub fn tick_world(
    world: &mut World,
    input: &FrameInput,
    level: u32,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> TickOutcome {
    // ── 1. Background ────────────────────────────────────────────────────────
    tick_stars(world, config.star_interval, rng);

    // ── 2. Bullets ───────────────────────────────────────────────────────────
    tick_bullets(world);

    // ── 3. Aliens ↔ bullets / player ─────────────────────────────────────────
    let aliens = tick_aliens(world, level, config.alien_interval, rng);

    // ── 4. Explosions ────────────────────────────────────────────────────────
    tick_explosions(world);

    // ── 5. Coins ↔ player / bullets ──────────────────────────────────────────
    let coins = tick_coins(world, config.coin_interval, rng);

    // ── 6. Player ────────────────────────────────────────────────────────────
    update_player(world, input);

    TickOutcome { aliens, coins }
}
