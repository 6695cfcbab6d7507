//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-frame step only (no wall-clock time)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, aabb_overlap};
pub use spawner::Spawner;
pub use state::{Cloud, GameEvent, GameState, Obstacle, ObstacleKind, Player, Viewport};
pub use tick::{TickInput, tick};
