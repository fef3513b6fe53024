// hydraulik_sim: deterministic simulation core for the hex strategy game.
//
// This crate contains the movement and timing logic: A* pathfinding over the
// hex grid and the fixed-timestep tick scheduler. It has no rendering, UI or
// persistence dependencies and can be tested and benchmarked headless.
//
// Module overview:
// - `pathfinding.rs`: A* over the hex grid with a caller-supplied passability predicate.
// - `tick.rs`:        TickScheduler: frame time in, deterministic ticks out, bounded catch-up.
// - `config.rs`:      SimConfig: step duration and catch-up cap, loaded from JSON.
// - `error.rs`:       ConfigError: the only failure mode (bad configuration).
// - `hex`:            Re-exported from `hydraulik_hex`: axial/cube coordinates, neighbors, rings, lines.
//
// Logging goes through `tracing`; the host decides whether and where to
// install a subscriber.
//
// **Critical constraint: determinism.** Given the same inputs, every
// function here produces the same outputs. No system time, no OS entropy,
// and no iteration over hash maps.

pub mod config;
pub mod error;
pub use hydraulik_hex as hex;
pub mod pathfinding;
pub mod tick;

pub use config::SimConfig;
pub use error::ConfigError;
pub use hex::{Axial, Cube, HexDirection};
pub use pathfinding::{find_path, find_path_within};
pub use tick::{SubscriptionId, TickScheduler};
