use combat_core::{ArenaCfg, GameState};
use glam::vec3;

#[test]
fn reset_clears_pools_counters_and_ammo() {
    let mut cfg = ArenaCfg::default();
    cfg.loot.drop_count = 1.0;
    let mut g = GameState::new(cfg, 15);

    g.enemies.spawn_at(vec3(3.0, 0.8, 0.0));
    let (enemies, bus) = (&mut g.enemies, &mut g.bus);
    enemies.damage(0, 1000, bus);
    g.step(0.02); // reactions: refill + loot
    g.vitals.damage(30);
    g.weapon.magazine = 4;

    assert!(g.bus.kills > 0);
    assert!(g.pickups.active_count() > 0);

    g.reset();
    let hud = g.hud();
    assert_eq!(hud.kills, 0);
    assert_eq!(hud.score, 0);
    assert_eq!(hud.magazine, hud.magazine_size);
    assert_eq!(hud.health, hud.max_health);
    assert!(!hud.game_over);
    assert_eq!(g.enemies.alive_count(), 0);
    assert_eq!(g.pickups.active_count(), 0);
    assert_eq!(g.player_bullets.pool.active_count(), 0);
    assert_eq!(g.enemy_bullets.pool.active_count(), 0);
}
