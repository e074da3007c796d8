//! Game loop controller
//!
//! Owns the world, spawner, detector and UI-facing state, and moves them
//! through the `Idle -> Running -> GameOver -> Running` cycle. The host calls
//! `tick` once per display frame; taps may arrive at any time and are applied
//! at the start of the next tick.

use super::collision::{Detector, HitKind};
use super::spawner::Spawner;
use super::state::{GameEvent, GamePhase, GameState, Theme};
use super::world::World;
use crate::persistence::{MemoryStore, ScoreStore};
use crate::tuning::Tuning;

/// Seed for run number `run`, so every restart gets a fresh pipe sequence
fn run_seed(seed: u64, run: u32) -> u64 {
    (run as u64).wrapping_mul(2654435761).wrapping_add(seed)
}

/// A game session
#[derive(Debug)]
pub struct Game<S: ScoreStore = MemoryStore> {
    tuning: Tuning,
    seed: u64,
    run: u32,
    world: World,
    spawner: Spawner,
    detector: Detector,
    state: GameState,
    phase: GamePhase,
    /// Tap received since the last tick
    flap_pending: bool,
    /// Ticks simulated in the current run
    time_ticks: u64,
    store: S,
}

impl<S: ScoreStore> Game<S> {
    /// Create a session in the `Idle` phase, loading the best score from `store`
    pub fn new(tuning: Tuning, seed: u64, store: S) -> Self {
        let tuning = tuning.sanitized();
        let max_score = store.load_max_score().unwrap_or(0);
        let world = World::new(&tuning);
        let spawner = Spawner::new(&tuning, run_seed(seed, 0));

        let mut game = Self {
            tuning,
            seed,
            run: 0,
            world,
            spawner,
            detector: Detector::new(),
            state: GameState::new(max_score),
            phase: GamePhase::Idle,
            flap_pending: false,
            time_ticks: 0,
            store,
        };
        game.spawner.reset_pipes(&mut game.world.pipes);

        log::info!("Game created (seed {}, max score {})", seed, max_score);
        game
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access for hosts that script layouts (replays, tests)
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of `tick` calls that advanced the world this run
    ///
    /// Counts calls, not elapsed frames: `tick(2.0)` adds one. Ignored ticks
    /// (not running, bad `dt`) add nothing.
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// What ended the last run, if it has ended
    pub fn last_hit(&self) -> Option<HitKind> {
        self.detector.last_hit()
    }

    /// `Idle -> Running`; ignored in any other phase
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            log::debug!("start() ignored in {:?}", self.phase);
            return false;
        }
        self.phase = GamePhase::Running;
        self.state.begin_run();
        log::info!("Run started");
        true
    }

    /// `GameOver -> Running` with a freshly built world; ignored otherwise
    pub fn reset(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("reset() ignored in {:?}", self.phase);
            return false;
        }

        self.run += 1;
        self.world = World::new(&self.tuning);
        self.spawner = Spawner::new(&self.tuning, run_seed(self.seed, self.run));
        self.spawner.reset_pipes(&mut self.world.pipes);
        self.detector.reset();
        self.flap_pending = false;
        self.time_ticks = 0;

        self.phase = GamePhase::Running;
        self.state.begin_run();
        log::info!("Run {} started", self.run + 1);
        true
    }

    /// Record a tap; applied at the start of the next tick while running
    pub fn apply_impulse(&mut self) {
        if self.phase == GamePhase::Running {
            self.flap_pending = true;
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.state.theme = self.state.theme.toggled();
        log::debug!("Theme set to {}", self.state.theme.as_str());
        self.state.theme
    }

    /// Advance one frame (`dt` in frames) and return the events it produced
    ///
    /// Does nothing unless the game is running; once game-over fires the world
    /// stays frozen until `reset`. A negative or non-finite `dt` is dropped.
    pub fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != GamePhase::Running {
            return events;
        }
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Dropping tick with dt={}", dt);
            return events;
        }

        if std::mem::take(&mut self.flap_pending) {
            self.world.bird.apply_impulse(self.tuning.flap_velocity);
        }

        self.world.advance(dt);
        self.spawner.recycle(&mut self.world.pipes);
        self.detector.detect(&mut self.world, &mut events);
        self.time_ticks += 1;

        for event in &events {
            match event {
                GameEvent::Score => {
                    self.state.add_point();
                    log::debug!("Score: {}", self.state.score.unwrap_or(0));
                }
                GameEvent::GameOver => self.finish_run(),
            }
        }

        events
    }

    fn finish_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.flap_pending = false;
        let score = self.state.score.unwrap_or(0);

        if let Some(best) = self.state.end_run() {
            log::info!("New max score: {}", best);
            self.store.save_max_score(best);
        }
        log::info!(
            "Game over after {} ticks, score {} (hit {:?})",
            self.time_ticks,
            score,
            self.detector.last_hit()
        );
    }
}
