//! Rigid body and bounding box primitives
//!
//! Everything in the world is an axis-aligned box. Positions are box centres
//! in screen space (y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Strict overlap test; boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// A simulated box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub half_extents: Vec2,
    /// Static bodies ignore gravity and velocity (they may still be scrolled)
    pub is_static: bool,
}

impl Body {
    /// Dynamic body at rest
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            half_extents: size / 2.0,
            is_static: false,
        }
    }

    pub fn new_static(position: Vec2, size: Vec2) -> Self {
        Self {
            is_static: true,
            ..Self::new(position, size)
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.position, self.half_extents)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.position.x - self.half_extents.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.position.x + self.half_extents.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y - self.half_extents.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y + self.half_extents.y
    }

    /// Semi-implicit Euler step: velocity first, then position
    pub fn integrate(&mut self, gravity: Vec2, dt: f32) {
        if self.is_static {
            return;
        }
        self.velocity += gravity * dt;
        self.position += self.velocity * dt;
    }

    /// Move without touching velocity
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Tap impulse: vertical velocity is replaced, not accumulated
    #[inline]
    pub fn apply_impulse(&mut self, vertical_velocity: f32) {
        self.velocity.y = vertical_velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_center(Vec2::new(0.0, 0.0), Vec2::splat(10.0));
        let b = Aabb::from_center(Vec2::new(15.0, 5.0), Vec2::splat(10.0));
        let c = Aabb::from_center(Vec2::new(40.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::from_center(Vec2::new(0.0, 0.0), Vec2::splat(10.0));
        let b = Aabb::from_center(Vec2::new(20.0, 0.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_edges() {
        let body = Body::new(Vec2::new(100.0, 50.0), Vec2::new(40.0, 20.0));
        assert_eq!(body.left(), 80.0);
        assert_eq!(body.right(), 120.0);
        assert_eq!(body.top(), 40.0);
        assert_eq!(body.bottom(), 60.0);
    }

    #[test]
    fn test_static_body_ignores_gravity() {
        let mut body = Body::new_static(Vec2::new(10.0, 10.0), Vec2::splat(4.0));
        body.integrate(Vec2::new(0.0, 0.5), 1.0);
        assert_eq!(body.position, Vec2::new(10.0, 10.0));
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_integrate_falls() {
        let mut body = Body::new(Vec2::new(0.0, 200.0), Vec2::splat(4.0));
        for _ in 0..10 {
            let prev_y = body.position.y;
            body.integrate(Vec2::new(0.0, 0.5), 1.0);
            assert!(body.position.y > prev_y);
            assert_eq!(body.position.x, 0.0);
        }
        assert!(body.velocity.y > 0.0);
    }

    #[test]
    fn test_impulse_is_idempotent() {
        let mut body = Body::new(Vec2::ZERO, Vec2::splat(4.0));
        body.velocity.y = 37.0;
        body.apply_impulse(-8.0);
        assert_eq!(body.velocity.y, -8.0);
        body.velocity.y = -100.0;
        body.apply_impulse(-8.0);
        assert_eq!(body.velocity.y, -8.0);
        body.apply_impulse(-8.0);
        assert_eq!(body.velocity.y, -8.0);
    }
}
