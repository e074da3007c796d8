//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-based timestep only
//! - Seeded RNG only
//! - Stable iteration order (by pipe index)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod body;
pub mod collision;
pub mod game;
pub mod spawner;
pub mod state;
pub mod world;

pub use body::{Aabb, Body};
pub use collision::{Detector, HitKind, find_hit};
pub use game::Game;
pub use spawner::Spawner;
pub use state::{GameEvent, GamePhase, GameState, Theme};
pub use world::{PipePair, ScrollRing, World};
