//! Enemy pool: activation, damage/death, and the per-slot behavior state.
//!
//! Lifecycle per slot: dormant -> falling -> landed -> seeking/separating
//! (attacking interleaved) -> dead -> dormant. The steering and attack
//! systems in `schedule` drive the per-tick transitions; this module owns the
//! data and the death semantics.

use crate::body::Body;
use crate::events::{CombatBus, KillEvent};
use crate::pool::{Pool, PoolSlot};
use arena_data::configs::arena::EnemiesCfg;
use glam::Vec3;

pub const ENEMY_RADIUS: f32 = 0.35;
pub const ENEMY_HEIGHT: f32 = 1.6;
pub const ENEMY_HALF_HEIGHT: f32 = ENEMY_HEIGHT * 0.5;

/// Rest detection for the falling -> landed transition.
pub(crate) const LAND_PAD: f32 = 0.08;
pub(crate) const LAND_REST_SPEED: f32 = 0.2;

#[derive(Debug, Clone, Copy, Default)]
pub struct AttackState {
    /// Accumulates toward the fire interval.
    pub timer: f32,
    /// Shots left in the current burst (burst mode only).
    pub burst_left: u32,
    /// Countdown to the next burst shot.
    pub gap: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub body: Body,
    pub hp: i32,
    pub active: bool,
    /// Kill-emission guard, distinct from `active`: cleared on the first
    /// lethal hit so a second hit in the same tick cannot emit again.
    pub alive: bool,
    pub landed: bool,
    pub attack: AttackState,
}

impl Enemy {
    fn dormant() -> Self {
        Self {
            body: Body::parked(),
            hp: 0,
            active: false,
            alive: false,
            landed: false,
            attack: AttackState::default(),
        }
    }
}

impl PoolSlot for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.alive = false;
        self.landed = false;
        self.hp = 0;
        self.attack = AttackState::default();
        self.body.park();
    }
}

pub struct Enemies {
    pub pool: Pool<Enemy>,
    pub cfg: EnemiesCfg,
}

impl Enemies {
    pub fn new(cfg: EnemiesCfg) -> Self {
        let pool = Pool::new(cfg.pool_size, |_| Enemy::dormant());
        Self { pool, cfg }
    }

    /// Activate a dormant slot at `pos` (falling, full health).
    /// Returns false when the pool is exhausted.
    pub fn spawn_at(&mut self, pos: Vec3) -> bool {
        let hp = self.cfg.health;
        let spawned = self
            .pool
            .activate_first_free(|e| {
                e.active = true;
                e.alive = true;
                e.landed = false;
                e.hp = hp;
                e.attack = AttackState::default();
                e.body.pos = pos;
                e.body.vel = Vec3::ZERO;
            })
            .is_some();
        if !spawned {
            log::debug!("enemy pool exhausted; spawn request dropped");
        }
        spawned
    }

    /// Apply damage to a slot. Returns false without effect when the slot is
    /// not alive (dormant, or already dead this activation). Crossing to
    /// zero deactivates the slot and emits exactly one kill event.
    pub fn damage(&mut self, index: usize, amount: i32, bus: &mut CombatBus) -> bool {
        let Some(e) = self.pool.get_mut(index) else {
            return false;
        };
        if !e.alive {
            return false;
        }
        e.hp -= amount;
        if e.hp <= 0 {
            e.alive = false;
            let pos = e.body.pos;
            e.deactivate();
            bus.emit_kill(KillEvent { index, pos });
        }
        true
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn deactivate_all(&mut self) {
        self.pool.deactivate_all();
    }
}
