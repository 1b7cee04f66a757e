//! arena_data: config schemas and loaders for the arena combat simulation.
//!
//! Kept free of engine dependencies; `combat_core` converts these plain
//! structs into runtime state at construction. Every numeric field is
//! range-clamped on load so the engine never sees out-of-range tunables.

pub mod loader;
pub mod configs {
    pub mod arena;
    pub mod telemetry;
}
