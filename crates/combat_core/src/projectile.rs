//! Pooled bullets: player tracers and enemy fire.
//!
//! Bullets fly straight (`dir * speed` fixed at spawn), carry a TTL, and are
//! parked off-world on deactivation. The enemy-bullet player hit is the
//! tunneling-safe sphere-sphere proximity test; a physics host's contact
//! callback may call `on_world_contact` as an early-out but is never the
//! source of truth.

use crate::body::{Body, GROUND_Y};
use crate::pool::{Pool, PoolSlot};
use arena_data::configs::arena::EnemyBulletsCfg;
use glam::Vec3;

/// Player tracer tuning; damage rides the hitscan, so these only shape what
/// is visible in the world.
pub const PLAYER_BULLET_TTL: f32 = 3.0;
pub const PLAYER_BULLET_RADIUS: f32 = 0.07;

#[derive(Debug, Clone, Copy)]
pub struct Bullet {
    pub body: Body,
    pub active: bool,
    pub ttl: f32,
}

impl Bullet {
    fn dormant() -> Self {
        Self { body: Body::parked(), active: false, ttl: 0.0 }
    }
}

impl PoolSlot for Bullet {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.ttl = 0.0;
        self.body.park();
    }
}

pub struct PlayerBullets {
    pub pool: Pool<Bullet>,
    speed: f32,
}

impl PlayerBullets {
    pub fn new(pool_size: usize, speed: f32) -> Self {
        Self { pool: Pool::new(pool_size, |_| Bullet::dormant()), speed }
    }

    /// False when the pool is exhausted; the shot itself still happened.
    pub fn spawn(&mut self, origin: Vec3, dir: Vec3) -> bool {
        let vel = dir * self.speed;
        self.pool
            .activate_first_free(|b| {
                b.active = true;
                b.ttl = PLAYER_BULLET_TTL;
                b.body.pos = origin;
                b.body.vel = vel;
            })
            .is_some()
    }

    pub fn tick(&mut self, dt: f32) {
        for b in self.pool.iter_mut() {
            if !b.active {
                continue;
            }
            b.body.pos += b.body.vel * dt;
            b.ttl -= dt;
            if b.ttl <= 0.0 || b.body.pos.y - PLAYER_BULLET_RADIUS <= GROUND_Y {
                b.deactivate();
            }
        }
    }

    /// Optional early-out for a physics host's contact callback.
    pub fn on_world_contact(&mut self, index: usize) {
        self.pool.deactivate(index);
    }
}

pub struct EnemyBullets {
    pub pool: Pool<Bullet>,
    pub cfg: EnemyBulletsCfg,
    spawned_total: u64,
}

impl EnemyBullets {
    pub fn new(cfg: EnemyBulletsCfg) -> Self {
        let pool = Pool::new(cfg.pool_size, |_| Bullet::dormant());
        Self { pool, cfg, spawned_total: 0 }
    }

    pub fn spawn(&mut self, origin: Vec3, dir: Vec3) -> bool {
        let vel = dir * self.cfg.speed;
        let ttl = self.cfg.ttl;
        let spawned = self
            .pool
            .activate_first_free(|b| {
                b.active = true;
                b.ttl = ttl;
                b.body.pos = origin;
                b.body.vel = vel;
            })
            .is_some();
        if spawned {
            self.spawned_total += 1;
        }
        spawned
    }

    /// Integrate, expire, and test against the player sphere. Returns the
    /// number of hits this tick; each hit already deactivated its bullet.
    pub fn tick(&mut self, dt: f32, player_center: Vec3, player_hit_radius: f32) -> u32 {
        let reach = player_hit_radius + self.cfg.radius;
        let reach_sq = reach * reach;
        let mut hits = 0;
        for b in self.pool.iter_mut() {
            if !b.active {
                continue;
            }
            b.body.pos += b.body.vel * dt;
            b.ttl -= dt;
            if b.ttl <= 0.0 || b.body.pos.y - self.cfg.radius <= GROUND_Y {
                b.deactivate();
                continue;
            }
            if b.body.pos.distance_squared(player_center) <= reach_sq {
                hits += 1;
                b.deactivate();
            }
        }
        hits
    }

    pub fn on_world_contact(&mut self, index: usize) {
        self.pool.deactivate(index);
    }

    #[inline]
    pub fn spawned_total(&self) -> u64 {
        self.spawned_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_expiry_parks_the_bullet() {
        let mut pb = PlayerBullets::new(8, 80.0);
        assert!(pb.spawn(Vec3::new(0.0, 1.5, 0.0), Vec3::X));
        for _ in 0..40 {
            pb.tick(0.1);
        }
        assert_eq!(pb.pool.active_count(), 0);
        assert!(pb.pool.get(0).unwrap().body.pos.y < -100.0);
    }

    #[test]
    fn enemy_bullet_proximity_hits_once_and_deactivates() {
        let mut eb = EnemyBullets::new(EnemyBulletsCfg::default());
        let player = Vec3::new(4.0, 0.9, 0.0);
        assert!(eb.spawn(Vec3::new(0.0, 0.9, 0.0), Vec3::X));
        let mut total = 0;
        for _ in 0..60 {
            total += eb.tick(1.0 / 60.0, player, 1.0);
        }
        assert_eq!(total, 1);
        assert_eq!(eb.pool.active_count(), 0);
    }

    #[test]
    fn fast_bullet_cannot_tunnel_past_expiry_before_proximity_check() {
        // One tick moves the bullet from one side of the player to within
        // reach; the per-tick sphere test still registers the hit.
        let cfg = EnemyBulletsCfg { speed: 200.0, ..EnemyBulletsCfg::default() };
        let mut eb = EnemyBullets::new(cfg);
        let player = Vec3::new(3.0, 0.9, 0.0);
        eb.spawn(Vec3::new(0.0, 0.9, 0.0), Vec3::X);
        let hits = eb.tick(1.0 / 60.0, player, 1.0);
        assert_eq!(hits, 1);
    }
}
