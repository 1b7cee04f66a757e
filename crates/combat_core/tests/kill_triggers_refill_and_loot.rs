use combat_core::{ArenaCfg, GameState};
use glam::vec3;

/// A kill at the cap triggers an immediate replacement drop in the same
/// tick, and loot lands at the death position.
#[test]
fn kill_is_replaced_within_the_same_tick() {
    let mut cfg = ArenaCfg::default();
    cfg.loot.drop_count = 1.0;
    cfg.loot.ammo_chance = 1.0;
    let mut g = GameState::new(cfg, 8);

    assert!(g.enemies.spawn_at(vec3(4.0, 0.8, 0.0)));
    assert!(g.enemies.spawn_at(vec3(-4.0, 0.8, 0.0)));
    assert_eq!(g.enemies.alive_count(), 2);

    let (enemies, bus) = (&mut g.enemies, &mut g.bus);
    enemies.damage(0, 1000, bus);
    assert_eq!(g.enemies.alive_count(), 1);

    g.step(0.01);
    assert_eq!(g.enemies.alive_count(), 2, "kill-driven drop refilled the slot");
    assert_eq!(g.pickups.ammo.active_count(), 1, "one loot drop per kill");

    // The replacement comes from the dropship: it starts overhead, falling.
    let replacement = g.enemies.pool.iter().find(|e| e.active && !e.landed).unwrap();
    assert!(replacement.body.pos.y > 10.0);
}
