use combat_core::{ArenaCfg, GameState};

/// A paused simulation drops no time: no spawns, no shots on resume from a
/// trigger held before the pause.
#[test]
fn paused_state_spawns_nothing_and_clears_held_trigger() {
    let cfg = ArenaCfg::default();
    let mut g = GameState::new(cfg, 14);

    g.trigger_down();
    g.set_running(false);
    for _ in 0..200 {
        g.step(0.05); // 10 s of wall time while paused
    }
    assert_eq!(g.enemies.alive_count(), 0, "dropship timer never advanced");
    assert_eq!(g.hud().magazine, 12, "held trigger was cleared on pause");

    g.set_running(true);
    for _ in 0..20 {
        g.step(0.05);
    }
    assert_eq!(g.hud().magazine, 12, "nothing fires until a fresh press");
    assert_eq!(g.enemies.alive_count(), 0, "first timed drop is still ahead");
}
