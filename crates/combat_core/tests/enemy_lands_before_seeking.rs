use combat_core::{ArenaCfg, GameState};
use glam::vec3;

/// AI movement is suppressed during the fall; once rest is detected at
/// ground-contact height the enemy starts seeking, then coasts to a stop
/// without ever reaching the player.
#[test]
fn falling_enemy_freezes_horizontally_then_seeks() {
    let mut cfg = ArenaCfg::default();
    cfg.enemies.fire.interval = 30.0;
    let mut g = GameState::new(cfg, 10);
    g.sync_player(vec3(10.0, 0.9, 0.0));

    assert!(g.enemies.spawn_at(vec3(0.0, 14.0, 0.0)));

    let dt = 0.02;
    for _ in 0..50 {
        g.step(dt); // 1 s: still airborne
    }
    let mid_fall = g.enemies.pool.get(0).unwrap();
    assert!(!mid_fall.landed);
    assert_eq!(mid_fall.body.pos.x, 0.0, "no horizontal motion while falling");

    for _ in 0..100 {
        g.step(dt); // 3 s total: landed, chased, and settled
    }
    let e = g.enemies.pool.get(0).unwrap();
    assert!(e.landed);
    assert!(e.body.pos.x > 1.0, "moved toward the player; x={}", e.body.pos.x);

    // Seek zeroes inside the stop ring; residual drift damps out before the
    // enemy gets anywhere near the player.
    let dx = g.player_pos.x - e.body.pos.x;
    let dz = g.player_pos.z - e.body.pos.z;
    let dist = (dx * dx + dz * dz).sqrt();
    assert!(dist > 1.5, "coasted into the player; dist={dist}");
    assert!(e.body.horizontal_speed() < 0.25, "still sliding");
}
