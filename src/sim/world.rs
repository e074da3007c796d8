//! World container and integrator
//!
//! Owns every body in a run: the bird, the looping floor, and a fixed set of
//! pipe pairs. Nothing is allocated or freed while a run is in progress; a new
//! game builds a fresh `World`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Aabb, Body};
use crate::consts::FLOOR_SEGMENTS;
use crate::tuning::Tuning;

/// A pair of pipe halves with a vertical gap between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipePair {
    /// Upper half, from the top of the viewport down to the gap
    pub top: Body,
    /// Lower half, from the gap down to the floor
    pub bottom: Body,
    pub gap_center_y: f32,
    /// Set once the bird has passed this pair
    pub scored: bool,
}

impl PipePair {
    pub fn new(x: f32, gap_center_y: f32, tuning: &Tuning) -> Self {
        let mut pair = Self {
            top: Body::new_static(Vec2::new(x, 0.0), Vec2::ZERO),
            bottom: Body::new_static(Vec2::new(x, 0.0), Vec2::ZERO),
            gap_center_y,
            scored: false,
        };
        pair.top.half_extents.x = tuning.pipe_width / 2.0;
        pair.bottom.half_extents.x = tuning.pipe_width / 2.0;
        pair.set_gap(gap_center_y, tuning.pipe_gap, tuning.floor_top());
        pair
    }

    /// Horizontal centre
    #[inline]
    pub fn x(&self) -> f32 {
        self.top.position.x
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.top.left()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.top.right()
    }

    /// Distance between the bottom of the upper half and the top of the lower half
    #[inline]
    pub fn gap_height(&self) -> f32 {
        self.bottom.top() - self.top.bottom()
    }

    pub fn set_x(&mut self, x: f32) {
        self.top.position.x = x;
        self.bottom.position.x = x;
    }

    pub fn translate_x(&mut self, dx: f32) {
        let delta = Vec2::new(dx, 0.0);
        self.top.translate(delta);
        self.bottom.translate(delta);
    }

    /// Collision box of the upper half, open-ended above the viewport so a
    /// bird flying over the screen still hits it
    pub fn top_hitbox(&self) -> Aabb {
        let mut aabb = self.top.aabb();
        aabb.min.y = f32::NEG_INFINITY;
        aabb
    }

    /// Rebuild both halves around a new gap centre
    pub fn set_gap(&mut self, gap_center_y: f32, gap: f32, floor_top: f32) {
        let gap_top = gap_center_y - gap / 2.0;
        let gap_bottom = gap_center_y + gap / 2.0;

        let top_height = gap_top.max(0.0);
        self.top.half_extents.y = top_height / 2.0;
        self.top.position.y = gap_top - top_height / 2.0;

        let bottom_height = (floor_top - gap_bottom).max(0.0);
        self.bottom.half_extents.y = bottom_height / 2.0;
        self.bottom.position.y = gap_bottom + bottom_height / 2.0;

        self.gap_center_y = gap_center_y;
    }
}

/// Circular buffer of equal-pitch scrolling segments
///
/// `head` is the leftmost segment. Each segment is slightly wider than the
/// pitch so neighbours overlap. A segment is recycled once its pitch cell has
/// left the viewport, and it is placed one pitch after the current tail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollRing {
    segments: Vec<Body>,
    pitch: f32,
    head: usize,
    wraps: u64,
}

impl ScrollRing {
    pub fn new(count: usize, pitch: f32, overlap: f32, height: f32, center_y: f32) -> Self {
        let count = count.max(1);
        let size = Vec2::new(pitch + overlap, height);
        let segments = (0..count)
            .map(|i| {
                let x = pitch / 2.0 + i as f32 * pitch;
                Body::new_static(Vec2::new(x, center_y), size)
            })
            .collect();

        Self {
            segments,
            pitch,
            head: 0,
            wraps: 0,
        }
    }

    /// Segments in storage order (not scroll order)
    pub fn segments(&self) -> &[Body] {
        &self.segments
    }

    pub fn segments_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.segments.iter_mut()
    }

    /// Index of the leftmost segment
    pub fn head(&self) -> usize {
        self.head
    }

    /// Total number of recycles since creation
    pub fn wraps(&self) -> u64 {
        self.wraps
    }

    #[inline]
    fn tail(&self) -> usize {
        (self.head + self.segments.len() - 1) % self.segments.len()
    }

    /// Move every segment left by `dx` and recycle the ones that left the view
    ///
    /// Non-finite steps and a non-positive pitch leave the ring untouched.
    pub fn scroll(&mut self, dx: f32) {
        if !dx.is_finite() || !(self.pitch.is_finite() && self.pitch > 0.0) {
            return;
        }

        let n = self.segments.len();
        // Whole laps of the ring leave the layout unchanged; count them and
        // scroll only the remainder
        let period = self.pitch * n as f32;
        let mut dx = dx;
        if dx >= period {
            let laps = (dx / period).floor();
            dx = dx.rem_euclid(period);
            self.wraps = self
                .wraps
                .saturating_add((laps as u64).saturating_mul(n as u64));
        }

        let delta = Vec2::new(-dx, 0.0);
        for segment in &mut self.segments {
            segment.translate(delta);
        }

        let half_pitch = self.pitch / 2.0;
        for _ in 0..n {
            if self.segments[self.head].position.x + half_pitch > 0.0 {
                break;
            }
            let tail_x = self.segments[self.tail()].position.x;
            self.segments[self.head].position.x = tail_x + self.pitch;
            self.head = (self.head + 1) % n;
            self.wraps += 1;
        }
    }

    /// Whether the union of the segments covers `[from, to]` without a gap
    pub fn covers(&self, from: f32, to: f32) -> bool {
        let n = self.segments.len();
        let mut reach = from;
        for i in 0..n {
            let segment = &self.segments[(self.head + i) % n];
            if segment.left() > reach {
                return false;
            }
            reach = reach.max(segment.right());
            if reach >= to {
                return true;
            }
        }
        reach >= to
    }
}

/// The simulated world for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub bird: Body,
    pub floor: ScrollRing,
    /// Pipe pairs, reused by index for the whole run
    pub pipes: Vec<PipePair>,
    gravity: Vec2,
    scroll_speed: f32,
    viewport: Vec2,
}

impl World {
    /// Build the starting layout: bird in the middle of the screen, floor
    /// ring under it, pipes waiting past the right edge
    pub fn new(tuning: &Tuning) -> Self {
        let width = tuning.viewport_width;
        let height = tuning.viewport_height;

        let bird = Body::new(
            Vec2::new(width / 2.0, height / 2.0),
            Vec2::new(tuning.bird_width, tuning.bird_height),
        );

        let floor = ScrollRing::new(
            FLOOR_SEGMENTS,
            width,
            tuning.floor_overlap,
            tuning.floor_height,
            height - tuning.floor_height / 2.0,
        );

        let (lo, hi) = tuning.gap_band();
        let pipes = (0..tuning.pipe_count)
            .map(|i| PipePair::new(tuning.pipe_start_x(i), (lo + hi) / 2.0, tuning))
            .collect();

        Self {
            bird,
            floor,
            pipes,
            gravity: Vec2::new(0.0, tuning.gravity),
            scroll_speed: tuning.scroll_speed,
            viewport: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    #[inline]
    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    #[inline]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Every body in the world
    pub fn bodies_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        std::iter::once(&mut self.bird)
            .chain(self.floor.segments_mut())
            .chain(self.pipes.iter_mut().flat_map(|p| [&mut p.top, &mut p.bottom]))
    }

    /// Advance one step of `dt` frames: gravity and integration for dynamic
    /// bodies, then leftward scroll for the floor and pipes
    ///
    /// Steps that are negative or not finite are ignored.
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Ignoring world step dt={}", dt);
            return;
        }

        let gravity = self.gravity;
        for body in self.bodies_mut() {
            body.integrate(gravity, dt);
        }

        let dx = self.scroll_speed * dt;
        self.floor.scroll(dx);
        for pair in &mut self.pipes {
            pair.translate_x(-dx);
        }
    }
}
