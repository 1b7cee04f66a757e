use combat_core::{ArenaCfg, GameState};
use glam::vec3;
use std::cell::RefCell;
use std::rc::Rc;

/// External observers run in registration order and a failing one never
/// starves the rest — or the score.
#[test]
fn failing_observer_does_not_break_fanout_or_score() {
    let cfg = ArenaCfg::default();
    let mut g = GameState::new(cfg, 16);

    let seen = Rc::new(RefCell::new(Vec::new()));
    g.bus.on_kill("hud-flash", |_| anyhow::bail!("listener exploded"));
    {
        let seen = Rc::clone(&seen);
        g.bus.on_kill("sound-cue", move |ev| {
            seen.borrow_mut().push(ev.index);
            Ok(())
        });
    }

    g.enemies.spawn_at(vec3(2.0, 0.8, 0.0));
    g.enemies.spawn_at(vec3(-2.0, 0.8, 0.0));
    let (enemies, bus) = (&mut g.enemies, &mut g.bus);
    enemies.damage(1, 1000, bus);
    enemies.damage(0, 1000, bus);

    assert_eq!(*seen.borrow(), vec![1, 0], "surviving observer saw both, in order");
    assert_eq!(g.bus.kills, 2);
    assert_eq!(g.bus.score, 2);
}
