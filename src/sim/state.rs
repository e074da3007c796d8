//! Game state and core simulation types
//!
//! Everything the UI layer reads between frames lives here.

use serde::{Deserialize, Serialize};

/// Current phase of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No run started yet
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, world frozen until reset
    GameOver,
}

/// Discrete events emitted by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GameEvent {
    /// Bird passed a pipe pair
    Score,
    /// Bird hit a pipe or the floor
    GameOver,
}

/// Visual theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// Score and UI-facing flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub running: bool,
    /// `None` until the first run starts
    pub score: Option<u32>,
    /// Best score across runs
    pub max_score: u32,
    pub theme: Theme,
}

impl GameState {
    pub fn new(max_score: u32) -> Self {
        Self {
            running: false,
            score: None,
            max_score,
            theme: Theme::default(),
        }
    }

    /// Begin a run with a zero score
    pub fn begin_run(&mut self) {
        self.running = true;
        self.score = Some(0);
    }

    pub fn add_point(&mut self) {
        self.score = Some(self.score.unwrap_or(0) + 1);
    }

    /// Stop the run; returns the new best if this run beat it
    pub fn end_run(&mut self) -> Option<u32> {
        self.running = false;
        let score = self.score.unwrap_or(0);
        if score > self.max_score {
            self.max_score = score;
            Some(score)
        } else {
            None
        }
    }
}
