//! Ammo and health pickups: loot drops on kill, TTL, proximity collection.

use crate::body::Body;
use crate::pool::{Pool, PoolSlot};
use arena_data::configs::arena::{HealthPickupsCfg, LootCfg, PickupsCfg};
use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// XZ jitter applied to the drop position so stacked kills don't stack loot.
const DROP_JITTER: f32 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct Pickup {
    pub body: Body,
    pub active: bool,
    pub ttl: f32,
}

impl Pickup {
    fn dormant() -> Self {
        Self { body: Body::parked(), active: false, ttl: 0.0 }
    }
}

impl PoolSlot for Pickup {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.ttl = 0.0;
        self.body.park();
    }
}

/// Resource grants produced by collection in one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Grants {
    pub ammo: i32,
    pub heal: i32,
}

pub struct Pickups {
    pub ammo: Pool<Pickup>,
    pub health: Pool<Pickup>,
    pub ammo_cfg: PickupsCfg,
    pub health_cfg: HealthPickupsCfg,
    pub loot: LootCfg,
}

impl Pickups {
    pub fn new(ammo_cfg: PickupsCfg, health_cfg: HealthPickupsCfg, loot: LootCfg) -> Self {
        Self {
            ammo: Pool::new(ammo_cfg.pool_size, |_| Pickup::dormant()),
            health: Pool::new(health_cfg.pool_size, |_| Pickup::dormant()),
            ammo_cfg,
            health_cfg,
            loot,
        }
    }

    pub fn spawn_ammo(&mut self, pos: Vec3, rng: &mut ChaCha8Rng) -> bool {
        let cfg = &self.ammo_cfg;
        spawn_into(&mut self.ammo, pos, cfg.lifetime, cfg.spawn_impulse, cfg.spawn_spread, rng)
    }

    pub fn spawn_health(&mut self, pos: Vec3, rng: &mut ChaCha8Rng) -> bool {
        let cfg = &self.health_cfg;
        spawn_into(&mut self.health, pos, cfg.lifetime, cfg.spawn_impulse, cfg.spawn_spread, rng)
    }

    /// Roll the loot table for one kill and spawn the results at `pos`.
    /// The fractional part of `drop_count` is a drop probability.
    pub fn drop_loot(&mut self, pos: Vec3, rng: &mut ChaCha8Rng) {
        let whole = self.loot.drop_count.floor() as u32;
        let frac = (self.loot.drop_count.fract() as f64).clamp(0.0, 1.0);
        let count = whole + u32::from(frac > 0.0 && rng.gen_bool(frac));
        for _ in 0..count {
            if rng.gen_range(0.0f32..1.0) < self.loot.ammo_chance {
                self.spawn_ammo(pos, rng);
            } else {
                self.spawn_health(pos, rng);
            }
        }
    }

    /// TTL and horizontal proximity collection against the player.
    /// Returns the summed grants for this tick.
    pub fn tick(&mut self, dt: f32, player_pos: Vec3) -> Grants {
        let mut grants = Grants::default();
        let ammo_units = self.ammo_cfg.bullets_per_pickup;
        let collected =
            collect_pool(&mut self.ammo, dt, player_pos, self.ammo_cfg.collect_radius);
        grants.ammo += collected * ammo_units;
        let heal_units = self.health_cfg.heal_per_pickup;
        let collected =
            collect_pool(&mut self.health, dt, player_pos, self.health_cfg.collect_radius);
        grants.heal += collected * heal_units;
        grants
    }

    pub fn active_count(&self) -> usize {
        self.ammo.active_count() + self.health.active_count()
    }

    pub fn deactivate_all(&mut self) {
        self.ammo.deactivate_all();
        self.health.deactivate_all();
    }
}

fn spawn_into(
    pool: &mut Pool<Pickup>,
    pos: Vec3,
    lifetime: f32,
    impulse: f32,
    spread: f32,
    rng: &mut ChaCha8Rng,
) -> bool {
    let jx = rng.gen_range(-DROP_JITTER..=DROP_JITTER);
    let jz = rng.gen_range(-DROP_JITTER..=DROP_JITTER);
    let vx = rng.gen_range(-spread..=spread);
    let vz = rng.gen_range(-spread..=spread);
    let vy = impulse + rng.gen_range(0.0f32..0.5);
    pool.activate_first_free(|p| {
        p.active = true;
        p.ttl = lifetime;
        p.body.pos = pos + Vec3::new(jx, 0.0, jz);
        p.body.vel = Vec3::new(vx, vy, vz);
    })
    .is_some()
}

fn collect_pool(pool: &mut Pool<Pickup>, dt: f32, player_pos: Vec3, collect_radius: f32) -> i32 {
    let r_sq = collect_radius * collect_radius;
    let mut collected = 0;
    for p in pool.iter_mut() {
        if !p.active {
            continue;
        }
        p.ttl -= dt;
        if p.ttl <= 0.0 {
            p.deactivate();
            continue;
        }
        if crate::geom::dist_sq_xz(p.body.pos, player_pos) <= r_sq {
            collected += 1;
            p.deactivate();
        }
    }
    collected
}
