//! Headless smoke run: thirty simulated seconds of a player holding the
//! trigger while tracking the nearest enemy. Prints the end-of-run HUD.

use combat_core::GameState;
use std::env;

fn main() {
    let tcfg = arena_data::configs::telemetry::load_default().unwrap_or_default();
    let _guard = combat_core::telemetry::init_telemetry(&tcfg).expect("init telemetry");

    let seed: u64 = env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(7);
    let mut g = GameState::from_default_config(seed).expect("load arena config");

    g.trigger_down();
    let dt = 1.0 / 60.0;
    for _ in 0..(30 * 60) {
        let eye = g.eye_pos();
        let nearest = g
            .enemies
            .pool
            .iter()
            .filter(|e| e.alive)
            .map(|e| e.body.pos)
            .min_by(|a, b| {
                a.distance_squared(eye)
                    .partial_cmp(&b.distance_squared(eye))
                    .unwrap()
            });
        if let Some(target) = nearest {
            g.set_aim(target - eye);
        }
        g.step(dt);
    }

    let hud = g.hud();
    println!(
        "seed={seed} kills={} score={} mag={}/{} reserve={} hp={}/{} game_over={}",
        hud.kills,
        hud.score,
        hud.magazine,
        hud.magazine_size,
        hud.reserve,
        hud.health,
        hud.max_health,
        hud.game_over
    );
}
