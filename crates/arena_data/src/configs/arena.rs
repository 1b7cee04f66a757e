//! Arena simulation tunables loaded from `data/config/arena.toml`.
//!
//! Missing file or missing sections fall back to the built-in defaults, and
//! every numeric field is clamped into its documented range so a hand-edited
//! TOML cannot push the engine outside tested bounds.

use anyhow::{Context, Result};
use serde::Deserialize;

fn cf(v: f32, lo: f32, hi: f32) -> f32 {
    v.clamp(lo, hi)
}

fn ci(v: i32, lo: i32, hi: i32) -> i32 {
    v.clamp(lo, hi)
}

fn cu(v: usize, lo: usize, hi: usize) -> usize {
    v.clamp(lo, hi)
}

/// Player weapon fire mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FireMode {
    Semi,
    #[default]
    Auto,
}

/// Enemy attack cadence mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyFireMode {
    #[default]
    Single,
    Burst,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GroundCfg {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
}

impl Default for GroundCfg {
    fn default() -> Self {
        Self { width: 30.0, depth: 30.0, height: 0.5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerCfg {
    pub health_max: i32,
    pub height: f32,
    /// Radius of the sphere enemy bullets test against.
    pub hit_radius: f32,
    /// Eye height as a fraction of body height; the hitscan origin.
    pub camera_height_ratio: f32,
}

impl Default for PlayerCfg {
    fn default() -> Self {
        Self { health_max: 100, height: 1.8, hit_radius: 1.0, camera_height_ratio: 0.6 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GunCfg {
    pub magazine_size: i32,
    pub total_bullets: i32,
    pub infinite: bool,
    /// Chambered instant refill instead of a timed reload.
    pub ignore_reload: bool,
    pub reload_time: f32,
    pub fire_mode: FireMode,
    /// Shots per second in auto mode.
    pub fire_rate: f32,
    pub bullet_speed: f32,
    pub pool_size: usize,
    pub damage: i32,
}

impl Default for GunCfg {
    fn default() -> Self {
        Self {
            magazine_size: 12,
            total_bullets: 120,
            infinite: false,
            ignore_reload: false,
            reload_time: 1.2,
            fire_mode: FireMode::Auto,
            fire_rate: 8.0,
            bullet_speed: 80.0,
            pool_size: 128,
            damage: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyFireCfg {
    pub mode: EnemyFireMode,
    /// Seconds between attacks (or between bursts).
    pub interval: f32,
    pub burst_count: u32,
    pub burst_gap: f32,
}

impl Default for EnemyFireCfg {
    fn default() -> Self {
        Self { mode: EnemyFireMode::Single, interval: 2.5, burst_count: 3, burst_gap: 0.15 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemiesCfg {
    pub pool_size: usize,
    pub health: i32,
    /// Movement speed in m/s.
    pub speed: f32,
    /// How close to the player they stop.
    pub stop_distance: f32,
    /// Distance to keep from each other.
    pub separation_radius: f32,
    pub sep_strength: f32,
    pub fire: EnemyFireCfg,
}

impl Default for EnemiesCfg {
    fn default() -> Self {
        Self {
            pool_size: 24,
            health: 100,
            speed: 20.0,
            stop_distance: 6.0,
            separation_radius: 2.0,
            sep_strength: 6.0,
            fire: EnemyFireCfg::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyBulletsCfg {
    pub pool_size: usize,
    pub speed: f32,
    pub damage: i32,
    pub radius: f32,
    pub ttl: f32,
}

impl Default for EnemyBulletsCfg {
    fn default() -> Self {
        Self { pool_size: 200, speed: 35.0, damage: 15, radius: 0.08, ttl: 4.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DropshipCfg {
    /// Ship diameter as a ratio of the smaller ground dimension.
    pub size_ratio: f32,
    pub thickness: f32,
    pub height_above_ground: f32,
    /// Seconds between automatic drops.
    pub drop_interval: f32,
    /// Cap on simultaneously active enemies.
    pub max_simultaneous: u32,
}

impl Default for DropshipCfg {
    fn default() -> Self {
        Self {
            size_ratio: 0.8,
            thickness: 0.3,
            height_above_ground: 15.0,
            drop_interval: 3.0,
            max_simultaneous: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoreCfg {
    pub per_kill: u32,
}

impl Default for ScoreCfg {
    fn default() -> Self {
        Self { per_kill: 1 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PickupsCfg {
    pub pool_size: usize,
    pub bullets_per_pickup: i32,
    pub size: f32,
    /// Seconds before an uncollected drop despawns.
    pub lifetime: f32,
    pub collect_radius: f32,
    pub spawn_impulse: f32,
    pub spawn_spread: f32,
}

impl Default for PickupsCfg {
    fn default() -> Self {
        Self {
            pool_size: 64,
            bullets_per_pickup: 3,
            size: 0.2,
            lifetime: 3.0,
            collect_radius: 1.2,
            spawn_impulse: 2.5,
            spawn_spread: 0.6,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HealthPickupsCfg {
    pub pool_size: usize,
    pub heal_per_pickup: i32,
    pub size: f32,
    pub lifetime: f32,
    pub collect_radius: f32,
    pub spawn_impulse: f32,
    pub spawn_spread: f32,
}

impl Default for HealthPickupsCfg {
    fn default() -> Self {
        Self {
            pool_size: 32,
            heal_per_pickup: 20,
            size: 0.22,
            lifetime: 25.0,
            collect_radius: 1.2,
            spawn_impulse: 2.2,
            spawn_spread: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LootCfg {
    /// Pickups per kill; the fractional part is a drop probability.
    pub drop_count: f32,
    /// Chance a drop is ammo; otherwise it is a health pickup.
    pub ammo_chance: f32,
}

impl Default for LootCfg {
    fn default() -> Self {
        Self { drop_count: 0.7, ammo_chance: 1.0 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArenaCfg {
    pub ground: GroundCfg,
    pub player: PlayerCfg,
    pub gun: GunCfg,
    pub enemies: EnemiesCfg,
    pub enemy_bullets: EnemyBulletsCfg,
    pub dropship: DropshipCfg,
    pub score: ScoreCfg,
    pub pickups: PickupsCfg,
    pub health_pickups: HealthPickupsCfg,
    pub loot: LootCfg,
}

impl ArenaCfg {
    /// Clamp every numeric field into its documented range.
    pub fn clamped(mut self) -> Self {
        let g = &mut self.ground;
        g.width = cf(g.width, 6.0, 200.0);
        g.depth = cf(g.depth, 6.0, 200.0);
        g.height = cf(g.height, 0.1, 5.0);

        let p = &mut self.player;
        p.health_max = ci(p.health_max, 1, 10_000);
        p.height = cf(p.height, 0.5, 3.0);
        p.hit_radius = cf(p.hit_radius, 0.1, 2.0);
        p.camera_height_ratio = cf(p.camera_height_ratio, 0.1, 0.95);

        let w = &mut self.gun;
        w.magazine_size = ci(w.magazine_size, 1, 100);
        w.total_bullets = ci(w.total_bullets, 0, 9999);
        w.reload_time = cf(w.reload_time, 0.0, 10.0);
        w.fire_rate = cf(w.fire_rate, 1.0, 50.0);
        w.bullet_speed = cf(w.bullet_speed, 5.0, 200.0);
        w.pool_size = cu(w.pool_size, 8, 512);
        w.damage = ci(w.damage, 1, 500);

        let e = &mut self.enemies;
        e.pool_size = cu(e.pool_size, 1, 512);
        e.health = ci(e.health, 1, 10_000);
        e.speed = cf(e.speed, 1.0, 100.0);
        e.stop_distance = cf(e.stop_distance, 0.1, 20.0);
        e.separation_radius = cf(e.separation_radius, 0.5, 10.0);
        e.sep_strength = cf(e.sep_strength, 0.0, 50.0);
        e.fire.interval = cf(e.fire.interval, 0.1, 30.0);
        e.fire.burst_count = e.fire.burst_count.clamp(1, 20);
        e.fire.burst_gap = cf(e.fire.burst_gap, 0.05, 2.0);

        let b = &mut self.enemy_bullets;
        b.pool_size = cu(b.pool_size, 1, 1000);
        b.speed = cf(b.speed, 1.0, 200.0);
        b.damage = ci(b.damage, 1, 10_000);
        b.radius = cf(b.radius, 0.02, 1.0);
        b.ttl = cf(b.ttl, 0.2, 30.0);

        let d = &mut self.dropship;
        d.size_ratio = cf(d.size_ratio, 0.1, 1.0);
        d.thickness = cf(d.thickness, 0.05, 5.0);
        d.height_above_ground = cf(d.height_above_ground, 1.0, 100.0);
        d.drop_interval = cf(d.drop_interval, 0.1, 60.0);
        d.max_simultaneous = d.max_simultaneous.clamp(1, 10);

        self.score.per_kill = self.score.per_kill.clamp(1, 10);

        let a = &mut self.pickups;
        a.pool_size = cu(a.pool_size, 1, 512);
        a.bullets_per_pickup = ci(a.bullets_per_pickup, 0, 9999);
        a.size = cf(a.size, 0.05, 2.0);
        a.lifetime = cf(a.lifetime, 1.0, 300.0);
        a.collect_radius = cf(a.collect_radius, 0.2, 5.0);
        a.spawn_impulse = cf(a.spawn_impulse, 0.0, 50.0);
        a.spawn_spread = cf(a.spawn_spread, 0.0, 10.0);

        let h = &mut self.health_pickups;
        h.pool_size = cu(h.pool_size, 1, 512);
        h.heal_per_pickup = ci(h.heal_per_pickup, 1, 10_000);
        h.size = cf(h.size, 0.05, 2.0);
        h.lifetime = cf(h.lifetime, 1.0, 300.0);
        h.collect_radius = cf(h.collect_radius, 0.2, 5.0);
        h.spawn_impulse = cf(h.spawn_impulse, 0.0, 50.0);
        h.spawn_spread = cf(h.spawn_spread, 0.0, 10.0);

        self.loot.drop_count = cf(self.loot.drop_count, 0.0, 10.0);
        self.loot.ammo_chance = cf(self.loot.ammo_chance, 0.0, 1.0);

        self
    }

    /// Parse and clamp a TOML string.
    pub fn from_toml_str(txt: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(txt).context("parse arena TOML")?;
        Ok(cfg.clamped())
    }

    /// Load `data/config/arena.toml`, falling back to defaults when absent.
    pub fn load_default() -> Result<Self> {
        let path = crate::loader::data_root().join("config/arena.toml");
        if path.is_file() {
            let txt = std::fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))?;
            Self::from_toml_str(&txt)
        } else {
            Ok(Self::default().clamped())
        }
    }
}
