//! Fixed-order per-tick systems.
//!
//! One `run` advances the whole simulation by `dt`. Ordering guarantee:
//! damage application precedes death emission, which precedes the dependent
//! spawn/loot reactions, all inside the same tick.

use crate::body::{self, GROUND_Y};
use crate::enemy::{ENEMY_HALF_HEIGHT, ENEMY_HEIGHT, LAND_PAD, LAND_REST_SPEED};
use crate::GameState;
use arena_data::configs::arena::EnemyFireMode;
use glam::Vec3;
use std::time::Instant;

/// Horizontal speed below which a steering-less enemy snaps to rest.
const DRIFT_STOP_SPEED: f32 = 0.2;
const DRIFT_DAMPING: f32 = 0.9;
/// Friction factor for pickups resting on the floor.
const PICKUP_FRICTION: f32 = 0.9;

pub(crate) fn run(g: &mut GameState, dt: f32) {
    let t0 = Instant::now();
    weapon_system(g, dt);
    player_bullet_system(g, dt);
    enemy_behavior_system(g, dt);
    enemy_bullet_system(g, dt);
    pickup_system(g, dt);
    kill_reaction_system(g);
    dropship_system(g, dt);
    integrate_system(g, dt);
    metrics::histogram!("tick.ms").record(t0.elapsed().as_secs_f64() * 1000.0);
}

fn weapon_system(g: &mut GameState, dt: f32) {
    let origin = g.eye_pos();
    let dir = g.aim_dir();
    g.weapon.update(dt, origin, dir, &mut g.enemies, &mut g.player_bullets, &mut g.bus);
}

fn player_bullet_system(g: &mut GameState, dt: f32) {
    g.player_bullets.tick(dt);
}

/// Landing detection, seek/separation steering, and attack timers.
fn enemy_behavior_system(g: &mut GameState, dt: f32) {
    let cfg = g.enemies.cfg.clone();
    let player_pos = g.player_pos;
    let aim_target = g.upper_body_pos();
    let enemies = &mut g.enemies;
    let bullets = &mut g.enemy_bullets;

    // Landing: rest detection near ground-contact height.
    for e in enemies.pool.iter_mut() {
        if !e.active || e.landed {
            continue;
        }
        let near_ground = e.body.pos.y <= GROUND_Y + ENEMY_HALF_HEIGHT + LAND_PAD;
        if near_ground && e.body.vel.y.abs() < LAND_REST_SPEED {
            e.landed = true;
        }
    }

    // Positions snapshot for the separation pass.
    let others: Vec<(usize, Vec3)> = enemies
        .pool
        .iter()
        .enumerate()
        .filter(|(_, e)| e.active)
        .map(|(i, e)| (i, e.body.pos))
        .collect();

    for (i, e) in enemies.pool.iter_mut().enumerate() {
        if !e.active {
            continue;
        }
        if !e.landed {
            // Let the drop settle before any horizontal motion.
            e.body.vel.x = 0.0;
            e.body.vel.z = 0.0;
            continue;
        }

        // Seek toward the player, zeroed inside the stop distance.
        let to_player = Vec3::new(player_pos.x - e.body.pos.x, 0.0, player_pos.z - e.body.pos.z);
        let dist = to_player.length();
        let mut steer = Vec3::ZERO;
        if dist > cfg.stop_distance {
            steer += to_player.normalize() * cfg.speed;
        }

        // Separation: average repulsion from neighbors inside the radius.
        let mut sep = Vec3::ZERO;
        let mut count = 0;
        for &(j, other) in &others {
            if j == i {
                continue;
            }
            let dx = e.body.pos.x - other.x;
            let dz = e.body.pos.z - other.z;
            let d = (dx * dx + dz * dz).sqrt();
            if d > 0.0 && d < cfg.separation_radius {
                let w = (cfg.separation_radius - d) / cfg.separation_radius;
                sep += Vec3::new(dx, 0.0, dz).normalize() * w;
                count += 1;
            }
        }
        if count > 0 {
            sep = (sep / count as f32).normalize_or_zero() * cfg.sep_strength;
            steer += sep;
        }

        if steer.length_squared() > 1e-4 {
            let v = steer.normalize() * cfg.speed;
            e.body.vel.x = v.x;
            e.body.vel.z = v.z;
        } else if e.body.horizontal_speed() > DRIFT_STOP_SPEED {
            e.body.vel.x *= DRIFT_DAMPING;
            e.body.vel.z *= DRIFT_DAMPING;
        } else {
            e.body.vel.x = 0.0;
            e.body.vel.z = 0.0;
        }

        // Attack timers; shots aim from the chest toward the player's
        // upper body.
        let fire = &cfg.fire;
        let origin = e.body.pos + Vec3::Y * (ENEMY_HEIGHT * 0.25);
        let dir = (aim_target - origin).normalize_or_zero();
        if e.attack.burst_left > 0 {
            e.attack.gap -= dt;
            while e.attack.gap <= 0.0 && e.attack.burst_left > 0 {
                if dir.length_squared() > 1e-6 {
                    bullets.spawn(origin, dir);
                }
                e.attack.burst_left -= 1;
                e.attack.gap += fire.burst_gap;
            }
            if e.attack.burst_left == 0 {
                e.attack.timer = 0.0;
            }
        } else {
            e.attack.timer += dt;
            if e.attack.timer >= fire.interval {
                match fire.mode {
                    EnemyFireMode::Single => {
                        e.attack.timer -= fire.interval;
                        if dir.length_squared() > 1e-6 {
                            bullets.spawn(origin, dir);
                        }
                    }
                    EnemyFireMode::Burst => {
                        e.attack.timer = 0.0;
                        e.attack.burst_left = fire.burst_count;
                        e.attack.gap = 0.0;
                    }
                }
            }
        }
    }
}

fn enemy_bullet_system(g: &mut GameState, dt: f32) {
    let hits = g.enemy_bullets.tick(dt, g.player_pos, g.cfg.player.hit_radius);
    let damage = g.enemy_bullets.cfg.damage;
    for _ in 0..hits {
        g.vitals.damage(damage);
    }
}

fn pickup_system(g: &mut GameState, dt: f32) {
    let grants = g.pickups.tick(dt, g.player_pos);
    if grants.ammo > 0 {
        g.weapon.grant_reserve(grants.ammo);
    }
    if grants.heal > 0 {
        g.vitals.heal(grants.heal);
    }
}

/// Drain this tick's kill events and run the dependent reactions in order:
/// dropship replacement first, then loot at the death position.
fn kill_reaction_system(g: &mut GameState) {
    let kills = g.bus.drain_pending();
    for ev in &kills {
        g.dropship.on_kill(&mut g.enemies, &mut g.rng);
        g.pickups.drop_loot(ev.pos, &mut g.rng);
    }
}

fn dropship_system(g: &mut GameState, dt: f32) {
    g.dropship.tick(dt, &mut g.enemies, &mut g.rng);
}

/// Gravity + floor rest for the bodies the engine integrates itself
/// (enemies and pickups; bullets integrate in their own systems).
fn integrate_system(g: &mut GameState, dt: f32) {
    for e in g.enemies.pool.iter_mut() {
        if e.active {
            body::integrate(&mut e.body, ENEMY_HALF_HEIGHT, dt);
        }
    }
    let half = g.pickups.ammo_cfg.size * 0.5;
    for p in g.pickups.ammo.iter_mut() {
        if p.active && body::integrate(&mut p.body, half, dt) {
            p.body.vel.x *= PICKUP_FRICTION;
            p.body.vel.z *= PICKUP_FRICTION;
        }
    }
    let half = g.pickups.health_cfg.size * 0.5;
    for p in g.pickups.health.iter_mut() {
        if p.active && body::integrate(&mut p.body, half, dt) {
            p.body.vel.x *= PICKUP_FRICTION;
            p.body.vel.z *= PICKUP_FRICTION;
        }
    }
}
