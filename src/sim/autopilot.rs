//! Demo pilot
//!
//! Plays the game without input: aims for the centre of the next gap and
//! flaps whenever the bird has sunk below it and is not already rising.

use super::world::{PipePair, World};

/// The pipe pair the bird still has to clear, nearest first
pub fn next_pipe(world: &World) -> Option<&PipePair> {
    let bird_left = world.bird.left();
    world
        .pipes
        .iter()
        .filter(|p| p.right() > bird_left)
        .min_by(|a, b| a.x().total_cmp(&b.x()))
}

/// Vertical position the pilot steers toward
pub fn target_y(world: &World) -> f32 {
    match next_pipe(world) {
        Some(pair) => pair.gap_center_y,
        None => {
            let floor_top = world
                .floor
                .segments()
                .first()
                .map(|s| s.top())
                .unwrap_or(world.viewport().y);
            floor_top / 2.0
        }
    }
}

/// Whether to tap this frame
pub fn should_flap(world: &World) -> bool {
    let bird = &world.bird;
    bird.velocity.y >= 0.0 && bird.position.y > target_y(world)
}
