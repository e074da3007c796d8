//! Data-driven game balance
//!
//! Every field has a default, so a tuning file only needs to list what it
//! overrides. Values are sanitized before a world is built from them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable simulation parameters (units: pixels and ticks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Bird ===
    pub bird_width: f32,
    pub bird_height: f32,
    /// Downward acceleration applied every tick
    pub gravity: f32,
    /// Vertical velocity a tap sets (negative is up)
    pub flap_velocity: f32,

    // === Scrolling ===
    pub scroll_speed: f32,
    pub floor_height: f32,
    pub floor_overlap: f32,

    // === Pipes ===
    pub pipe_count: usize,
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub pipe_spacing: f32,
    pub pipe_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,

            scroll_speed: SCROLL_SPEED,
            floor_height: FLOOR_HEIGHT,
            floor_overlap: FLOOR_OVERLAP,

            pipe_count: PIPE_COUNT,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_spacing: PIPE_SPACING,
            pipe_margin: PIPE_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields fall back to defaults)
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning.sanitized()
            }
            Err(e) => {
                log::warn!("Malformed tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Y coordinate of the top of the floor strip
    #[inline]
    pub fn floor_top(&self) -> f32 {
        self.viewport_height - self.floor_height
    }

    /// Starting centre x of pipe pair `index`; the first pair's left edge sits
    /// on the right edge of the viewport
    #[inline]
    pub fn pipe_start_x(&self, index: usize) -> f32 {
        self.viewport_width + self.pipe_width / 2.0 + index as f32 * self.pipe_spacing
    }

    /// Gap edge clearance, never less than half the bird's height
    #[inline]
    pub fn effective_margin(&self) -> f32 {
        self.pipe_margin.max(self.bird_height / 2.0)
    }

    /// Lowest and highest gap centre the spawner may pick
    ///
    /// Collapses to the midpoint of the playfield when the gap plus margins
    /// does not fit.
    pub fn gap_band(&self) -> (f32, f32) {
        let half_gap = self.pipe_gap / 2.0;
        let margin = self.effective_margin();
        let lo = margin + half_gap;
        let hi = self.floor_top() - margin - half_gap;
        if lo <= hi {
            (lo, hi)
        } else {
            let mid = self.floor_top() / 2.0;
            (mid, mid)
        }
    }

    /// Clamp values into a range the simulation can run with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        self.viewport_width = positive(self.viewport_width, defaults.viewport_width);
        self.viewport_height = positive(self.viewport_height, defaults.viewport_height);
        self.bird_width = positive(self.bird_width, defaults.bird_width);
        self.bird_height = positive(self.bird_height, defaults.bird_height);
        self.floor_height = positive(self.floor_height, defaults.floor_height)
            .min(self.viewport_height / 2.0);
        self.pipe_width = positive(self.pipe_width, defaults.pipe_width);
        self.pipe_gap = positive(self.pipe_gap, defaults.pipe_gap);

        if !self.gravity.is_finite() || self.gravity < 0.0 {
            self.gravity = defaults.gravity;
        }
        if !self.flap_velocity.is_finite() || self.flap_velocity >= 0.0 {
            self.flap_velocity = defaults.flap_velocity;
        }
        if !self.scroll_speed.is_finite() || self.scroll_speed < 0.0 {
            self.scroll_speed = defaults.scroll_speed;
        }
        if !self.floor_overlap.is_finite() || self.floor_overlap < 0.0 {
            self.floor_overlap = 0.0;
        }
        if !self.pipe_margin.is_finite() || self.pipe_margin < 0.0 {
            self.pipe_margin = 0.0;
        }

        self.pipe_count = self.pipe_count.max(1);
        // Pairs must never touch, even right after a recycle
        if !self.pipe_spacing.is_finite() || self.pipe_spacing <= self.pipe_width {
            log::warn!(
                "pipe_spacing {} too small for pipe_width {}, widening",
                self.pipe_spacing,
                self.pipe_width
            );
            self.pipe_spacing = self.pipe_width * 2.0;
        }

        self
    }
}
