use space_adventure::compute::*;
use space_adventure::config::GameConfig;
use space_adventure::entities::*;
use space_adventure::input::{FrameInput, Key};
use space_adventure::sprites::Sprite;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn config() -> GameConfig {
    GameConfig::with_size(120, 90)
}

fn make_world() -> World {
    init_world(&config())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── init_world ────────────────────────────────────────────────────────────────

#[test]
fn init_world_player_position() {
    let w = make_world();
    assert_eq!(w.player.x, 5);
    assert_eq!(w.player.y, 50);
}

#[test]
fn init_world_empty_collections() {
    let w = make_world();
    assert!(w.stars.is_empty());
    assert!(w.bullets.is_empty());
    assert!(w.aliens.is_empty());
    assert!(w.explosions.is_empty());
    assert!(w.coins.is_empty());
    assert_eq!(w.bullets.capacity(), Some(5));
    assert_eq!((w.width, w.height), (120, 90));
}

#[test]
fn start_position_fits_a_short_field() {
    let config = GameConfig::with_size(120, 40);
    assert!(config.validate().is_ok());
    let mut w = init_world(&config);
    assert_eq!((w.player.x, w.player.y), (5, 24));

    update_player(&mut w, &FrameInput::new().hold(Key::Left));
    assert!(w.player.y <= 40 - Player::HEIGHT);
}

#[test]
fn start_position_fits_a_narrow_field() {
    let w = init_world(&GameConfig::with_size(32, 16));
    assert_eq!((w.player.x, w.player.y), (5, 0));
}

// ── level_for_score ───────────────────────────────────────────────────────────

#[test]
fn level_steps_every_ten_points() {
    assert_eq!(level_for_score(0), 1);
    assert_eq!(level_for_score(9), 1);
    assert_eq!(level_for_score(10), 2);
    assert_eq!(level_for_score(20), 3);
    assert_eq!(level_for_score(42), 5);
}

// ── Stars ─────────────────────────────────────────────────────────────────────

#[test]
fn star_spawns_on_first_tick_then_every_third() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    tick_stars(&mut w, 3, &mut rng);
    assert_eq!(w.stars.len(), 1);
    tick_stars(&mut w, 3, &mut rng);
    tick_stars(&mut w, 3, &mut rng);
    assert_eq!(w.stars.len(), 1);
    tick_stars(&mut w, 3, &mut rng);
    assert_eq!(w.stars.len(), 2);
}

#[test]
fn new_star_moves_in_its_spawn_tick() {
    let mut w = make_world();
    tick_stars(&mut w, 3, &mut seeded_rng());
    assert_eq!(w.stars.front().map(|s| s.x), Some(118));
}

#[test]
fn stars_alternate_top_and_bottom_half() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    let mid = (90 - Star::HEIGHT) / 2;
    for _ in 0..20 {
        spawn_star(&mut w, &mut rng);
    }
    for (i, s) in w.stars.iter().enumerate() {
        if i % 2 == 0 {
            assert!((0..=mid).contains(&s.y), "star {} at y={}", i, s.y);
        } else {
            assert!((mid..=90 - Star::HEIGHT).contains(&s.y), "star {} at y={}", i, s.y);
        }
    }
}

#[test]
fn stars_leaving_left_edge_are_evicted_oldest_first() {
    let mut w = make_world();
    w.stars.push(Star::new(-7, 0)); // → -9, gone
    w.stars.push(Star::new(-6, 0)); // → -8, stays
    w.star_clock = 1; // no spawn this tick
    tick_stars(&mut w, 3, &mut seeded_rng());
    assert_eq!(w.stars.len(), 1);
    assert_eq!(w.stars.front().map(|s| s.x), Some(-8));
}

// ── Bullets ───────────────────────────────────────────────────────────────────

#[test]
fn fire_bullet_from_trailing_edge_centered() {
    let mut w = make_world(); // player at (5, 50)
    assert!(fire_bullet(&mut w));
    let b = w.bullets.front().unwrap();
    assert_eq!(b.x, 5 + 16 - 8);
    assert_eq!(b.y, 50 + 8 - 4);
}

#[test]
fn fire_bullet_capped_at_five() {
    let mut w = make_world();
    for _ in 0..5 {
        assert!(fire_bullet(&mut w));
    }
    assert!(!fire_bullet(&mut w));
    assert_eq!(w.bullets.len(), 5);
}

#[test]
fn bullet_removed_exactly_when_past_width() {
    let mut w = make_world();
    w.bullets.push(Bullet::new(112, 0)); // → 116
    w.bullets.push(Bullet::new(116, 0)); // → 120 (still on screen)
    tick_bullets(&mut w);
    assert_eq!(w.bullets.len(), 2);
    tick_bullets(&mut w); // → 120, 124
    assert_eq!(w.bullets.len(), 2);
    // 124 > 120 but the front bullet (120) is still on screen; the next
    // tick moves it past the edge too.
    tick_bullets(&mut w);
    assert!(w.bullets.is_empty());
}

// ── Aliens ────────────────────────────────────────────────────────────────────

#[test]
fn alien_spawns_on_seventeenth_tick_at_level_one() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    for _ in 0..16 {
        tick_aliens(&mut w, 1, 17, &mut rng);
    }
    assert!(w.aliens.is_empty());
    tick_aliens(&mut w, 1, 17, &mut rng);
    assert_eq!(w.aliens.len(), 1);
    for _ in 0..17 {
        tick_aliens(&mut w, 1, 17, &mut rng);
    }
    assert_eq!(w.aliens.len(), 2);
}

#[test]
fn higher_level_spawns_aliens_faster() {
    let mut slow = make_world();
    let mut fast = make_world();
    let mut rng = seeded_rng();
    for _ in 0..68 {
        tick_aliens(&mut slow, 1, 17, &mut rng);
        tick_aliens(&mut fast, 3, 17, &mut rng);
    }
    // Long-lived aliens may leave the field; count spawns via the clock.
    assert_eq!(slow.alien_clock / 17, 4);
    assert_eq!(fast.alien_clock / 17, 12);
}

#[test]
fn spawned_alien_speed_includes_level() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    for _ in 0..50 {
        spawn_alien(&mut w, 3, &mut rng);
    }
    for a in w.aliens.iter() {
        assert!(a.vx >= 3.0 && a.vx < 4.7, "vx={}", a.vx);
        assert!(a.y >= 0 && a.y <= 90 - Alien::HEIGHT);
        assert_eq!(a.x, 120.0);
    }
}

#[test]
fn alien_leaving_left_edge_is_removed() {
    let mut w = make_world();
    w.aliens.push(Alien::new(-15.0, 0, 2.0)); // → -17
    w.aliens.push(Alien::new(60.0, 0, 2.0));
    tick_aliens(&mut w, 1, 17, &mut seeded_rng());
    assert_eq!(w.aliens.len(), 1);
    assert!((w.aliens.front().unwrap().x - 58.0).abs() < 1e-5);
}

// ── Explosions ────────────────────────────────────────────────────────────────

#[test]
fn explosions_expire_oldest_first() {
    let mut w = make_world();
    w.explosions.push(Explosion::new(0, 0));
    for _ in 0..3 {
        tick_explosions(&mut w);
    }
    w.explosions.push(Explosion::new(10, 10));
    for _ in 0..4 {
        tick_explosions(&mut w);
    }
    assert_eq!(w.explosions.len(), 1);
    assert_eq!(w.explosions.front().map(|e| e.x), Some(10));
}

// ── Coins ─────────────────────────────────────────────────────────────────────

#[test]
fn coin_spawns_every_forty_ticks() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    for _ in 0..41 {
        tick_coins(&mut w, 40, &mut rng);
    }
    assert_eq!(w.coin_clock, 41);
    // ticks 0 and 40 spawn; nothing has crossed the field yet
    assert_eq!(w.coins.len(), 2);
}

#[test]
fn coin_speed_in_range() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    for _ in 0..50 {
        spawn_coin(&mut w, &mut rng);
    }
    assert!(w.coins.iter().all(|c| c.vx >= 1.0 && c.vx < 2.0));
}

// ── Player controller ─────────────────────────────────────────────────────────

#[test]
fn player_moves_two_per_held_direction() {
    let mut w = make_world(); // (5, 50)
    let input = FrameInput::new().hold(Key::Right).hold(Key::Down);
    update_player(&mut w, &input);
    assert_eq!((w.player.x, w.player.y), (7, 52));
}

#[test]
fn opposite_directions_cancel() {
    let mut w = make_world();
    let input = FrameInput::new()
        .hold(Key::Left)
        .hold(Key::Right)
        .hold(Key::Up)
        .hold(Key::Down);
    update_player(&mut w, &input);
    assert_eq!((w.player.x, w.player.y), (5, 50));
}

#[test]
fn player_clamped_to_left_half() {
    let mut w = make_world();
    w.player.x = 59;
    update_player(&mut w, &FrameInput::new().hold(Key::Right));
    assert_eq!(w.player.x, 60);
    update_player(&mut w, &FrameInput::new().hold(Key::Right));
    assert_eq!(w.player.x, 60);

    w.player.x = 3;
    update_player(&mut w, &FrameInput::new().hold(Key::Left));
    assert_eq!(w.player.x, 2);
}

#[test]
fn player_clamped_vertically() {
    let mut w = make_world();
    w.player.y = 1;
    update_player(&mut w, &FrameInput::new().hold(Key::Up));
    assert_eq!(w.player.y, 0);

    w.player.y = 73;
    update_player(&mut w, &FrameInput::new().hold(Key::Down));
    assert_eq!(w.player.y, 74);
}

#[test]
fn fire_is_edge_triggered() {
    let mut w = make_world();
    update_player(&mut w, &FrameInput::new().hold(Key::Fire));
    assert!(w.bullets.is_empty());
    update_player(&mut w, &FrameInput::new().press(Key::Fire));
    assert_eq!(w.bullets.len(), 1);
}

#[test]
fn bullet_fired_after_move_uses_new_position() {
    let mut w = make_world();
    update_player(&mut w, &FrameInput::new().hold(Key::Down).press(Key::Fire));
    assert_eq!(w.bullets.front().map(|b| b.y), Some(52 + 4));
}

// ── tick_world ────────────────────────────────────────────────────────────────

#[test]
fn tick_world_runs_every_collection() {
    let mut w = make_world();
    let cfg = config();
    let out = tick_world(&mut w, &FrameInput::new(), 1, &cfg, &mut seeded_rng());
    assert_eq!(w.star_clock, 1);
    assert_eq!(w.alien_clock, 1);
    assert_eq!(w.coin_clock, 1);
    assert_eq!(w.stars.len(), 1);
    assert_eq!(w.coins.len(), 1);
    assert_eq!(w.player.age, 1);
    assert!(!out.aliens.player_hit);
}

#[test]
fn tick_world_is_deterministic_for_a_seed() {
    let cfg = config();
    let mut a = make_world();
    let mut b = make_world();
    let mut ra = seeded_rng();
    let mut rb = seeded_rng();
    for _ in 0..200 {
        tick_world(&mut a, &FrameInput::new(), 2, &cfg, &mut ra);
        tick_world(&mut b, &FrameInput::new(), 2, &cfg, &mut rb);
    }
    let ya: Vec<i32> = a.aliens.iter().map(|al| al.y).collect();
    let yb: Vec<i32> = b.aliens.iter().map(|al| al.y).collect();
    assert_eq!(ya, yb);
    assert_eq!(a.stars.len(), b.stars.len());
}
