//! Player weapon: trigger edges, fire cadence, ammo accounting, reload state
//! machine, and hitscan resolution against the enemy pool.
//!
//! Damage rides a line-of-sight ray from the eye; the pooled tracer bullet is
//! what the world sees. Tracer-pool exhaustion therefore never refunds ammo
//! already spent on the shot.

use crate::enemy::{Enemies, ENEMY_HALF_HEIGHT, ENEMY_RADIUS};
use crate::events::CombatBus;
use crate::geom::ray_hits_capsule;
use crate::projectile::PlayerBullets;
use arena_data::configs::arena::{FireMode, GunCfg};
use glam::Vec3;

/// Forward nudge from the eye so the ray and tracer clear the player body.
const ORIGIN_OFFSET: f32 = 0.15;
/// Extra push applied to the tracer spawn point.
const SPAWN_OFFSET: f32 = 0.6;
/// Aim point distance when the ray hits nothing.
const FAR_TARGET: f32 = 1000.0;
/// Hits closer than this are our own geometry.
const MIN_HIT_T: f32 = 0.1;

/// Nearest qualifying thing along the aim ray.
#[derive(Debug, Clone, Copy)]
pub struct RayTarget {
    pub point: Vec3,
    pub enemy: Option<usize>,
}

/// Nearest of: enemy capsule, arena floor, far point. Player bullets are not
/// part of the query, so tracers never eat their own shots.
pub fn resolve_hitscan(origin: Vec3, dir: Vec3, enemies: &Enemies) -> RayTarget {
    let mut best_t = FAR_TARGET;
    let mut best_enemy = None;
    if dir.y < -1e-6 {
        let t_ground = (crate::body::GROUND_Y - origin.y) / dir.y;
        if t_ground > MIN_HIT_T && t_ground < best_t {
            best_t = t_ground;
        }
    }
    let core = ENEMY_HALF_HEIGHT - ENEMY_RADIUS;
    for (i, e) in enemies.pool.iter().enumerate() {
        if !e.alive {
            continue;
        }
        let a = e.body.pos - Vec3::Y * core;
        let b = e.body.pos + Vec3::Y * core;
        if let Some(t) = ray_hits_capsule(origin, dir, best_t, a, b, ENEMY_RADIUS) {
            if t > MIN_HIT_T && t < best_t {
                best_t = t;
                best_enemy = Some(i);
            }
        }
    }
    RayTarget { point: origin + dir * best_t, enemy: best_enemy }
}

pub struct Weapon {
    pub cfg: GunCfg,
    pub magazine: i32,
    pub reserve: i32,
    reloading: bool,
    reload_left: f32,
    enabled: bool,
    trigger_held: bool,
    /// One discrete shot queued by a trigger edge (semi, or the instant
    /// first shot of an auto press).
    shot_queued: bool,
    reload_queued: bool,
    /// Time since the last auto shot; the fractional remainder carries
    /// across ticks so cadence is frame-rate independent.
    cadence: f32,
}

impl Weapon {
    pub fn new(cfg: GunCfg) -> Self {
        let magazine = cfg.magazine_size;
        let reserve = cfg.total_bullets;
        Self {
            cfg,
            magazine,
            reserve,
            reloading: false,
            reload_left: 0.0,
            enabled: true,
            trigger_held: false,
            shot_queued: false,
            reload_queued: false,
            cadence: 0.0,
        }
    }

    pub fn trigger_down(&mut self) {
        if !self.enabled {
            return;
        }
        match self.cfg.fire_mode {
            FireMode::Semi => self.shot_queued = true,
            FireMode::Auto => {
                self.trigger_held = true;
                self.shot_queued = true;
                self.cadence = 0.0;
            }
        }
    }

    pub fn trigger_up(&mut self) {
        self.trigger_held = false;
    }

    pub fn request_reload(&mut self) {
        self.reload_queued = true;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.clear_held();
        }
    }

    /// Drop held/queued trigger state (pause, menu).
    pub fn clear_held(&mut self) {
        self.trigger_held = false;
        self.shot_queued = false;
        self.cadence = 0.0;
    }

    #[inline]
    pub fn reloading(&self) -> bool {
        self.reloading
    }

    #[inline]
    pub fn reload_left(&self) -> f32 {
        if self.reloading { self.reload_left.max(0.0) } else { 0.0 }
    }

    /// Pickup grants land here.
    pub fn grant_reserve(&mut self, amount: i32) {
        self.reserve += amount.max(0);
    }

    /// Back to a fresh magazine and full reserve.
    pub fn reset(&mut self) {
        self.magazine = self.cfg.magazine_size;
        self.reserve = self.cfg.total_bullets;
        self.reloading = false;
        self.reload_left = 0.0;
        self.clear_held();
    }

    fn can_fire(&self) -> bool {
        self.enabled
            && !self.reloading
            && (self.cfg.infinite
                || self.magazine > 0
                || self.cfg.ignore_reload
                || self.reserve > 0)
    }

    /// Begin a reload unless one is running, the magazine is full, or there
    /// is nothing to pull from. All rejections are silent no-ops.
    pub fn start_reload(&mut self) {
        if self.reloading || self.cfg.ignore_reload {
            return;
        }
        if self.magazine >= self.cfg.magazine_size {
            return;
        }
        if !self.cfg.infinite && self.reserve <= 0 {
            return;
        }
        self.reloading = true;
        self.reload_left = self.cfg.reload_time;
    }

    fn finish_reload(&mut self) {
        self.reloading = false;
        self.reload_left = 0.0;
        let need = self.cfg.magazine_size - self.magazine;
        if need <= 0 {
            return;
        }
        if self.cfg.infinite {
            self.magazine = self.cfg.magazine_size;
        } else {
            let take = need.min(self.reserve);
            self.reserve -= take;
            self.magazine += take;
        }
    }

    /// One per-tick update: reload deadline, queued discrete shots, auto
    /// cadence, and the empty-magazine auto reload.
    pub fn update(
        &mut self,
        dt: f32,
        origin: Vec3,
        dir: Vec3,
        enemies: &mut Enemies,
        bullets: &mut PlayerBullets,
        bus: &mut CombatBus,
    ) {
        if self.reloading {
            self.reload_left -= dt;
            if self.reload_left <= 0.0 {
                self.finish_reload();
            }
        }
        if self.reload_queued {
            self.reload_queued = false;
            self.start_reload();
        }
        if self.shot_queued {
            self.shot_queued = false;
            self.try_fire(origin, dir, enemies, bullets, bus);
        }
        if matches!(self.cfg.fire_mode, FireMode::Auto)
            && self.enabled
            && self.trigger_held
            && !self.reloading
        {
            let interval = 1.0 / self.cfg.fire_rate;
            self.cadence += dt;
            while self.cadence >= interval {
                self.cadence -= interval;
                self.try_fire(origin, dir, enemies, bullets, bus);
            }
        } else {
            self.cadence = 0.0;
        }
        // Empty magazine: kick off the automatic reload.
        if !self.reloading
            && !self.cfg.ignore_reload
            && self.magazine <= 0
            && (self.cfg.infinite || self.reserve > 0)
        {
            self.start_reload();
        }
    }

    /// Attempt one shot. Returns whether a shot actually fired.
    pub fn try_fire(
        &mut self,
        origin: Vec3,
        dir: Vec3,
        enemies: &mut Enemies,
        bullets: &mut PlayerBullets,
        bus: &mut CombatBus,
    ) -> bool {
        if !self.can_fire() {
            return false;
        }
        let dir = dir.normalize_or_zero();
        if dir.length_squared() <= 1e-6 {
            return false;
        }
        if self.magazine <= 0 {
            if self.cfg.ignore_reload {
                // Chambered refill: no delay, bounded by reserve.
                if !self.cfg.infinite && self.reserve <= 0 {
                    return false;
                }
                if self.cfg.infinite {
                    self.magazine = self.cfg.magazine_size;
                } else {
                    let take = self.cfg.magazine_size.min(self.reserve);
                    self.reserve -= take;
                    self.magazine = take;
                }
            } else {
                self.start_reload();
                return false;
            }
        }
        let muzzle = origin + dir * ORIGIN_OFFSET;
        let target = resolve_hitscan(muzzle, dir, enemies);
        if let Some(index) = target.enemy {
            enemies.damage(index, self.cfg.damage, bus);
        }
        let tracer_dir = (target.point - muzzle).normalize_or_zero();
        let _ = bullets.spawn(muzzle + tracer_dir * SPAWN_OFFSET, tracer_dir);
        if !self.cfg.infinite {
            self.magazine = (self.magazine - 1).max(0);
        }
        metrics::counter!("weapon.shots_total").increment(1);
        true
    }
}
