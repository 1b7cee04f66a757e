//! The orbiting dropship: capacity-bounded enemy spawning.
//!
//! Drops happen on a fixed interval and immediately on kill notifications,
//! in both cases only while the alive count is under `max_simultaneous`, so
//! replenishment tracks the kill rate without exceeding the threat cap.

use crate::body::GROUND_Y;
use crate::enemy::Enemies;
use crate::geom::sample_in_disc;
use arena_data::configs::arena::ArenaCfg;
use glam::Vec3;
use rand_chacha::ChaCha8Rng;

/// Clearance between the ship's underside and the drop point.
const DROP_CLEARANCE: f32 = 0.2;

pub struct DropShip {
    timer: f32,
    drop_interval: f32,
    max_simultaneous: u32,
    /// Drops sample a disc at 75% of the ship radius so enemies never fall
    /// along the rim, directly onto the arena walls.
    disc_radius: f32,
    drop_y: f32,
}

impl DropShip {
    pub fn new(cfg: &ArenaCfg) -> Self {
        let ship_radius =
            cfg.ground.width.min(cfg.ground.depth) * cfg.dropship.size_ratio * 0.5;
        Self {
            timer: 0.0,
            drop_interval: cfg.dropship.drop_interval,
            max_simultaneous: cfg.dropship.max_simultaneous,
            disc_radius: ship_radius * 0.75,
            drop_y: GROUND_Y + cfg.dropship.height_above_ground
                - cfg.dropship.thickness * 0.5
                - DROP_CLEARANCE,
        }
    }

    /// Interval-driven drop.
    pub fn tick(&mut self, dt: f32, enemies: &mut Enemies, rng: &mut ChaCha8Rng) {
        self.timer += dt;
        if self.timer >= self.drop_interval {
            self.timer = 0.0;
            self.try_drop(enemies, rng);
        }
    }

    /// Kill-driven replacement drop.
    pub fn on_kill(&mut self, enemies: &mut Enemies, rng: &mut ChaCha8Rng) {
        self.try_drop(enemies, rng);
    }

    fn try_drop(&mut self, enemies: &mut Enemies, rng: &mut ChaCha8Rng) -> bool {
        if enemies.alive_count() >= self.max_simultaneous as usize {
            return false;
        }
        let p = sample_in_disc(rng, self.disc_radius);
        let pos = Vec3::new(p.x, self.drop_y, p.y);
        let dropped = enemies.spawn_at(pos);
        if dropped {
            metrics::counter!("combat.spawns_total").increment(1);
            log::debug!("dropship released enemy at ({:.2}, {:.2})", pos.x, pos.z);
        }
        dropped
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
    }
}
