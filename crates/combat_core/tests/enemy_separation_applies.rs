use combat_core::{ArenaCfg, GameState};
use glam::vec3;

/// Two enemies dropped nearly on top of each other push apart while inside
/// the stop distance (so seek contributes nothing).
#[test]
fn crowded_enemies_push_apart() {
    let mut cfg = ArenaCfg::default();
    cfg.enemies.fire.interval = 30.0;
    let mut g = GameState::new(cfg, 9);

    assert!(g.enemies.spawn_at(vec3(0.55, 0.8, 0.0)));
    assert!(g.enemies.spawn_at(vec3(0.60, 0.8, 0.0)));

    for _ in 0..20 {
        g.step(0.05); // 1 s
    }
    let a = g.enemies.pool.get(0).unwrap().body.pos;
    let b = g.enemies.pool.get(1).unwrap().body.pos;
    let dist = (a - b).length();
    assert!(dist > 1.5, "separation should push them apart; dist={dist}");
}
