//! Platform abstraction layer
//!
//! The host owns the display clock and input; this layer only turns host
//! frame time into whole simulation ticks.

pub mod time;

pub use time::FixedStep;
