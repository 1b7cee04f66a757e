use combat_core::{ArenaCfg, GameState};
use glam::vec3;

#[test]
fn activation_past_capacity_fails_and_leaves_pool_unchanged() {
    let mut cfg = ArenaCfg::default();
    cfg.enemies.pool_size = 3;
    let mut g = GameState::new(cfg, 1);

    for i in 0..3 {
        assert!(g.enemies.spawn_at(vec3(i as f32, 0.8, 0.0)), "slot {i}");
    }
    assert!(!g.enemies.spawn_at(vec3(9.0, 0.8, 0.0)), "pool is exhausted");
    assert_eq!(g.enemies.alive_count(), 3);

    // Freeing one slot makes exactly one activation possible again.
    g.enemies.pool.deactivate(1);
    assert!(g.enemies.spawn_at(vec3(9.0, 0.8, 0.0)));
    assert!(!g.enemies.spawn_at(vec3(9.0, 0.8, 0.0)));
}
