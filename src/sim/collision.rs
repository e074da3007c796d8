//! Collision and scoring detection
//!
//! Runs once per tick after the world has moved. A hit on any pipe half or
//! floor segment ends the run; passing a pipe pair's centre line scores it.

use serde::{Deserialize, Serialize};

use super::body::Aabb;
use super::state::GameEvent;
use super::world::World;

/// What the bird ran into
///
/// Only used for diagnostics; both kinds produce the same `GameOver` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    Pipe { index: usize },
    Floor { segment: usize },
}

/// First body overlapping `bird`, pipes before floor
pub fn find_hit(bird: &Aabb, world: &World) -> Option<HitKind> {
    for (index, pair) in world.pipes.iter().enumerate() {
        if bird.overlaps(&pair.top_hitbox()) || bird.overlaps(&pair.bottom.aabb()) {
            return Some(HitKind::Pipe { index });
        }
    }

    world
        .floor
        .segments()
        .iter()
        .position(|segment| bird.overlaps(&segment.aabb()))
        .map(|segment| HitKind::Floor { segment })
}

/// One-shot game-over latch plus per-pair scoring
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Detector {
    fired: bool,
    last_hit: Option<HitKind>,
}

impl Detector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether game-over has already been emitted this run
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn last_hit(&self) -> Option<HitKind> {
        self.last_hit
    }

    /// Clear the latch for a new run
    pub fn reset(&mut self) {
        self.fired = false;
        self.last_hit = None;
    }

    /// Check the current frame, pushing any events onto `events`
    ///
    /// A collision wins over scoring in the same frame, and nothing is emitted
    /// once the latch has fired.
    pub fn detect(&mut self, world: &mut World, events: &mut Vec<GameEvent>) {
        if self.fired {
            return;
        }

        let bird = world.bird.aabb();
        if let Some(hit) = find_hit(&bird, world) {
            log::debug!("Bird hit {:?}", hit);
            self.fired = true;
            self.last_hit = Some(hit);
            events.push(GameEvent::GameOver);
            return;
        }

        let bird_x = world.bird.position.x;
        for pair in world.pipes.iter_mut().filter(|p| !p.scored) {
            if bird_x > pair.x() {
                pair.scored = true;
                events.push(GameEvent::Score);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn still_world() -> World {
        let tuning = Tuning {
            gravity: 0.0,
            ..Default::default()
        };
        World::new(&tuning)
    }

    #[test]
    fn test_no_hit_in_open_air() {
        let world = still_world();
        assert_eq!(find_hit(&world.bird.aabb(), &world), None);
    }

    #[test]
    fn test_floor_hit() {
        let mut world = still_world();
        world.bird.position.y = world.viewport().y - 30.0;
        assert!(matches!(
            find_hit(&world.bird.aabb(), &world),
            Some(HitKind::Floor { .. })
        ));
    }

    #[test]
    fn test_pipe_hit_reports_index() {
        let mut world = still_world();
        let bird = world.bird.position;
        world.pipes[1].set_x(bird.x);
        // Gap far below the bird, so the upper half covers it
        let floor_top = world.viewport().y - 50.0;
        world.pipes[1].set_gap(bird.y + 200.0, 100.0, floor_top);
        assert_eq!(
            find_hit(&world.bird.aabb(), &world),
            Some(HitKind::Pipe { index: 1 })
        );
    }

    #[test]
    fn test_bird_above_viewport_hits_upper_half() {
        let mut world = still_world();
        let bird = world.bird.position;
        world.pipes[0].set_x(bird.x);
        world.bird.position.y = -100.0;
        assert_eq!(
            find_hit(&world.bird.aabb(), &world),
            Some(HitKind::Pipe { index: 0 })
        );

        // Clear of the pipe horizontally, nothing above the screen to hit
        world.pipes[0].set_x(bird.x + 500.0);
        assert_eq!(find_hit(&world.bird.aabb(), &world), None);
    }

    #[test]
    fn test_game_over_fires_once() {
        let mut world = still_world();
        world.bird.position.y = world.viewport().y - 30.0;
        let mut detector = Detector::new();
        let mut events = Vec::new();

        detector.detect(&mut world, &mut events);
        detector.detect(&mut world, &mut events);
        detector.detect(&mut world, &mut events);

        assert_eq!(events, vec![GameEvent::GameOver]);
        assert!(detector.has_fired());
        assert!(matches!(detector.last_hit(), Some(HitKind::Floor { .. })));
    }

    #[test]
    fn test_passing_gap_scores_once() {
        let mut world = still_world();
        let bird = world.bird.position;
        let floor_top = world.viewport().y - 50.0;
        world.pipes[0].set_x(bird.x + 2.0);
        world.pipes[0].set_gap(bird.y, 200.0, floor_top);

        let mut detector = Detector::new();
        let mut events = Vec::new();
        detector.detect(&mut world, &mut events);
        assert!(events.is_empty());

        world.pipes[0].translate_x(-4.0);
        detector.detect(&mut world, &mut events);
        detector.detect(&mut world, &mut events);
        assert_eq!(events, vec![GameEvent::Score]);
        assert!(world.pipes[0].scored);
    }

    #[test]
    fn test_collision_wins_over_score() {
        let mut world = still_world();
        let bird = world.bird.position;
        let floor_top = world.viewport().y - 50.0;
        // Already past the bird's centre, but the gap is too narrow
        world.pipes[0].set_x(bird.x - 1.0);
        world.pipes[0].set_gap(bird.y, 10.0, floor_top);

        let mut detector = Detector::new();
        let mut events = Vec::new();
        detector.detect(&mut world, &mut events);
        assert_eq!(events, vec![GameEvent::GameOver]);
        assert!(!world.pipes[0].scored);
    }

    #[test]
    fn test_reset_rearms_latch() {
        let mut world = still_world();
        world.bird.position = Vec2::new(world.bird.position.x, world.viewport().y);
        let mut detector = Detector::new();
        let mut events = Vec::new();
        detector.detect(&mut world, &mut events);
        detector.reset();
        assert!(!detector.has_fired());
        detector.detect(&mut world, &mut events);
        assert_eq!(events.len(), 2);
    }
}
