// lib.rs - Conway's Game of Life core: sparse grid, solo and versus engines

pub mod config;
pub mod error;
pub mod grid;
pub mod history;
pub mod patterns;
pub mod rules;
pub mod solo;
pub mod ticker;
pub mod versus;

use std::time::Duration;

pub use config::{Config, MatchConfig, SoloConfig};
pub use error::ConfigError;
pub use grid::{Bounds, Coord, SparseGrid};
pub use history::HistoryRing;
pub use patterns::Pattern;
pub use solo::{RunState, SoloEngine};
pub use ticker::{Clock, Tick, Ticker};
pub use versus::{MatchEngine, MatchResult, Phase, Player, Scores, Termination};

/// What one generation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    pub generation: u64,
    pub births: usize,
    pub deaths: usize,
    pub population: usize,
    /// Set on the step that ended a versus match.
    pub result: Option<MatchResult>,
}

/// Interface shared by both engines, consumed by whatever drives the clock.
pub trait LifeEngine {
    /// Advances one generation. `None` when the engine is not running.
    fn step(&mut self) -> Option<StepReport>;
    /// Flips between running and paused; returns whether it now runs.
    fn toggle_pause(&mut self) -> bool;
    fn is_running(&self) -> bool;
    fn interval(&self) -> Duration;
    fn generation(&self) -> u64;
    fn grid(&self) -> &SparseGrid;
}
