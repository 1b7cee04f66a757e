//! combat_core: single-threaded, tick-driven arena combat simulation.
//!
//! Fixed-capacity actor pools (enemies, bullets, pickups), a player weapon
//! with a reload state machine, seek/separation enemy AI fed by a
//! capacity-bounded dropship, and a kill/score/health event bus — all
//! advanced by one variable-timestep `GameState::step` call. Rendering,
//! input capture, and full rigid-body physics live outside; they talk to the
//! core through position/velocity mirrors, input edges, and the HUD snapshot.

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod body;
pub mod enemy;
pub mod events;
pub mod geom;
pub mod pickup;
pub mod pool;
pub mod projectile;
mod schedule;
pub mod spawner;
pub mod telemetry;
pub mod vitals;
pub mod weapon;

pub use arena_data::configs::arena::ArenaCfg;
pub use enemy::Enemies;
pub use events::{CombatBus, KillEvent};
pub use pickup::Pickups;
pub use projectile::{EnemyBullets, PlayerBullets};
pub use spawner::DropShip;
pub use vitals::PlayerVitals;
pub use weapon::Weapon;

/// Read-only HUD snapshot; presentation never reaches deeper than this.
#[derive(Debug, Clone, Copy)]
pub struct HudSnapshot {
    pub magazine: i32,
    pub reserve: i32,
    pub magazine_size: i32,
    pub infinite: bool,
    pub reloading: bool,
    pub reload_left_s: f32,
    pub score: u32,
    pub kills: u32,
    pub health: i32,
    pub max_health: i32,
    pub game_over: bool,
}

pub struct GameState {
    pub cfg: ArenaCfg,
    /// Player body center, mirrored from the externally-integrated body.
    pub player_pos: Vec3,
    pub vitals: PlayerVitals,
    pub weapon: Weapon,
    pub enemies: Enemies,
    pub player_bullets: PlayerBullets,
    pub enemy_bullets: EnemyBullets,
    pub pickups: Pickups,
    pub dropship: DropShip,
    pub bus: CombatBus,
    pub rng: ChaCha8Rng,
    aim_dir: Vec3,
    running: bool,
}

impl GameState {
    pub fn new(cfg: ArenaCfg, seed: u64) -> Self {
        let cfg = cfg.clamped();
        let vitals = PlayerVitals::new(cfg.player.health_max);
        let weapon = Weapon::new(cfg.gun.clone());
        let enemies = Enemies::new(cfg.enemies.clone());
        let player_bullets = PlayerBullets::new(cfg.gun.pool_size, cfg.gun.bullet_speed);
        let enemy_bullets = EnemyBullets::new(cfg.enemy_bullets.clone());
        let pickups =
            Pickups::new(cfg.pickups.clone(), cfg.health_pickups.clone(), cfg.loot.clone());
        let dropship = DropShip::new(&cfg);
        let bus = CombatBus::new(cfg.score.per_kill);
        let player_pos = Vec3::new(0.0, cfg.player.height * 0.5, 0.0);
        log::info!(
            "arena up: {} enemy slots, cap {}, seed {seed}",
            cfg.enemies.pool_size,
            cfg.dropship.max_simultaneous
        );
        Self {
            cfg,
            player_pos,
            vitals,
            weapon,
            enemies,
            player_bullets,
            enemy_bullets,
            pickups,
            dropship,
            bus,
            rng: ChaCha8Rng::seed_from_u64(seed),
            aim_dir: Vec3::NEG_Z,
            running: true,
        }
    }

    /// Convenience constructor from `data/config/arena.toml`.
    pub fn from_default_config(seed: u64) -> anyhow::Result<Self> {
        Ok(Self::new(ArenaCfg::load_default()?, seed))
    }

    /// Advance the whole simulation by `dt` seconds. All subsystem updates
    /// run synchronously inside this call; nothing blocks or suspends.
    pub fn step(&mut self, dt: f32) {
        if !self.running || dt <= 0.0 {
            return;
        }
        schedule::run(self, dt);
    }

    // --- input edges (camera/input capture lives outside the core) ---

    pub fn trigger_down(&mut self) {
        self.weapon.trigger_down();
    }

    pub fn trigger_up(&mut self) {
        self.weapon.trigger_up();
    }

    pub fn reload_pressed(&mut self) {
        self.weapon.request_reload();
    }

    /// Continuous aim: the camera forward vector.
    pub fn set_aim(&mut self, dir: Vec3) {
        let dir = dir.normalize_or_zero();
        if dir.length_squared() > 1e-6 {
            self.aim_dir = dir;
        }
    }

    /// Mirror the player body center from the host's physics step.
    pub fn sync_player(&mut self, pos: Vec3) {
        self.player_pos = pos;
    }

    /// Pause/resume. Pausing clears held trigger state so nothing fires on
    /// resume, and holds every timer where it stood.
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
        if !running {
            self.weapon.clear_held();
        }
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn aim_dir(&self) -> Vec3 {
        self.aim_dir
    }

    /// Hitscan origin: the eye sits at a configured fraction of body height
    /// above the player center.
    pub fn eye_pos(&self) -> Vec3 {
        self.player_pos + Vec3::Y * (self.cfg.player.height * self.cfg.player.camera_height_ratio)
    }

    /// What enemies aim for.
    pub fn upper_body_pos(&self) -> Vec3 {
        self.player_pos + Vec3::Y * (self.cfg.player.height * 0.25)
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            magazine: self.weapon.magazine,
            reserve: self.weapon.reserve,
            magazine_size: self.weapon.cfg.magazine_size,
            infinite: self.weapon.cfg.infinite,
            reloading: self.weapon.reloading(),
            reload_left_s: self.weapon.reload_left(),
            score: self.bus.score,
            kills: self.bus.kills,
            health: self.vitals.health,
            max_health: self.vitals.max_health,
            game_over: self.vitals.game_over,
        }
    }

    /// Bring the player back at full health; the arena keeps going.
    pub fn revive(&mut self) {
        self.vitals.revive();
    }

    /// Full reset: vitals, ammo, counters, and every pool back to dormant.
    pub fn reset(&mut self) {
        self.vitals.revive();
        self.weapon.reset();
        self.enemies.deactivate_all();
        self.player_bullets.pool.deactivate_all();
        self.enemy_bullets.pool.deactivate_all();
        self.pickups.deactivate_all();
        self.dropship.reset();
        self.bus.reset();
        log::info!("arena reset");
    }
}
