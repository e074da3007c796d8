//! Flappy Dark - A side-scrolling tap-to-flap arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, world, spawner, collisions, game loop)
//! - `platform`: Host clock abstraction
//! - `persistence`: Max score storage
//! - `tuning`: Data-driven game balance

pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use persistence::{MemoryStore, ScoreStore};
pub use sim::{Game, GameEvent, GamePhase, GameState, Theme};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal display frame length (60 Hz); one simulation tick
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default viewport
    pub const VIEWPORT_WIDTH: f32 = 360.0;
    pub const VIEWPORT_HEIGHT: f32 = 640.0;

    /// Bird sprite box
    pub const BIRD_WIDTH: f32 = 50.0;
    pub const BIRD_HEIGHT: f32 = 41.0;

    /// Floor strip height
    pub const FLOOR_HEIGHT: f32 = 50.0;
    /// Extra width on each floor segment so neighbours overlap
    pub const FLOOR_OVERLAP: f32 = 4.0;
    /// Segments in the floor ring
    pub const FLOOR_SEGMENTS: usize = 2;

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity set by a tap (pixels/tick, negative is up)
    pub const FLAP_VELOCITY: f32 = -8.0;
    /// Horizontal scroll (pixels/tick)
    pub const SCROLL_SPEED: f32 = 3.0;

    /// Pipe defaults
    pub const PIPE_COUNT: usize = 3;
    pub const PIPE_WIDTH: f32 = 64.0;
    pub const PIPE_GAP: f32 = 200.0;
    /// Horizontal distance between consecutive pipe centres
    pub const PIPE_SPACING: f32 = 220.0;
    /// Minimum distance between a gap edge and the ceiling/floor
    pub const PIPE_MARGIN: f32 = 40.0;
}
