/// Collision tests and the per-tick interaction passes.
///
/// Passes scan in spawn order and only record what died; removals are
/// applied once the scan is over, so nothing is removed from a collection
/// while it is being walked.

use log::debug;

use crate::entities::{Explosion, World};
use crate::sprites::{Rect, Sprite};

/// An alien whose center comes closer than this to the player's center
/// destroys the ship.
pub const PLAYER_HIT_RADIUS: f32 = 10.0;

/// Strict overlap: rectangles that only share an edge do not collide.
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h
}

pub fn centers_within(a: &Rect, b: &Rect, radius: f32) -> bool {
    let (ax, ay) = a.center();
    let (bx, by) = b.center();
    let dx = ax - bx;
    let dy = ay - by;
    dx * dx + dy * dy < radius * radius
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlienPass {
    /// Aliens shot down this tick.
    pub shot_down: u32,
    /// Aliens that drifted off the left edge.
    pub escaped: u32,
    pub player_hit: bool,
}

/// Resolve aliens against bullets and the player.
///
/// Each alien is destroyed by at most one bullet and each bullet destroys at
/// most one alien. Only the first alien to reach the player counts.
pub fn resolve_aliens(world: &mut World) -> AlienPass {
    let mut pass = AlienPass::default();
    let mut dead_aliens: Vec<usize> = Vec::new();
    let mut spent_bullets: Vec<usize> = Vec::new();
    let mut blasts: Vec<Explosion> = Vec::new();

    let player_box = world.player.bounding_box();

    for (ai, alien) in world.aliens.iter().enumerate() {
        if alien.is_off_left() {
            dead_aliens.push(ai);
            pass.escaped += 1;
            continue;
        }

        let alien_box = alien.bounding_box();
        let hit = world
            .bullets
            .iter()
            .enumerate()
            .find(|(bi, b)| !spent_bullets.contains(bi) && aabb_overlap(&alien_box, &b.bounding_box()))
            .map(|(bi, _)| bi);

        if let Some(bi) = hit {
            debug!("alien {} shot down at ({:.1}, {})", ai, alien.x, alien.y);
            dead_aliens.push(ai);
            spent_bullets.push(bi);
            blasts.push(Explosion::new(alien.x as i32, alien.y));
            pass.shot_down += 1;
            continue;
        }

        if !pass.player_hit && centers_within(&alien_box, &player_box, PLAYER_HIT_RADIUS) {
            debug!("alien {} rammed the player at ({}, {})", ai, world.player.x, world.player.y);
            pass.player_hit = true;
            dead_aliens.push(ai);
            blasts.push(Explosion::new(world.player.x, world.player.y));
        }
    }

    world.aliens.remove_indices(&dead_aliens);
    world.bullets.remove_indices(&spent_bullets);
    for blast in blasts {
        world.explosions.push(blast);
    }
    pass
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoinPass {
    /// Coins touched by the player this tick.
    pub collected: u32,
    /// Coins destroyed by bullets (no score).
    pub shot: u32,
}

/// Resolve coins against the player and bullets. Bullets pass through the
/// coins they destroy.
pub fn resolve_coins(world: &mut World) -> CoinPass {
    let mut pass = CoinPass::default();
    let mut gone: Vec<usize> = Vec::new();

    let player_box = world.player.bounding_box();

    for (ci, coin) in world.coins.iter().enumerate() {
        if coin.is_off_left() {
            gone.push(ci);
            continue;
        }

        let coin_box = coin.bounding_box();
        if aabb_overlap(&coin_box, &player_box) {
            gone.push(ci);
            pass.collected += 1;
            continue;
        }

        if world
            .bullets
            .iter()
            .any(|b| aabb_overlap(&coin_box, &b.bounding_box()))
        {
            debug!("coin {} shot at ({:.1}, {})", ci, coin.x, coin.y);
            gone.push(ci);
            pass.shot += 1;
        }
    }

    world.coins.remove_indices(&gone);
    pass
}
