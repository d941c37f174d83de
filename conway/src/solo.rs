// solo.rs - Single-player, unbounded Game of Life

use std::time::Duration;

use rand::Rng;

use crate::config::SoloConfig;
use crate::grid::{Coord, SparseGrid};
use crate::patterns::Pattern;
use crate::{LifeEngine, StepReport, rules};

pub const MIN_INTERVAL: f32 = 0.05;                   // Fastest allowed update, seconds
pub const SPEED_STEP: f32 = 0.05;                     // Interval change per speed key

/// Seconds as a `Duration`, saturating at `Duration::MAX` for values too
/// large to represent.
pub(crate) fn seconds(secs: f32) -> Duration {
    Duration::try_from_secs_f32(secs).unwrap_or(Duration::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Paused,
    Running,
}

/// Classic Game of Life on an unbounded sparse grid.
#[derive(Debug, Clone)]
pub struct SoloEngine {
    grid: SparseGrid,
    state: RunState,
    update_interval: f32,
    fill_percent: u32,
    generation: u64,
}

impl Default for SoloEngine {
    fn default() -> Self {
        Self::new(&SoloConfig::default())
    }
}

impl SoloEngine {
    pub fn new(config: &SoloConfig) -> Self {
        Self {
            grid: SparseGrid::new(),
            state: RunState::Paused,
            update_interval: config.update_interval.max(MIN_INTERVAL),
            fill_percent: config.fill_percent,
            generation: 0,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn update_interval(&self) -> f32 {
        self.update_interval
    }

    pub fn fill_percent(&self) -> u32 {
        self.fill_percent
    }

    /// Replaces the grid with `pattern`, centered on the origin.
    pub fn seed_pattern(&mut self, pattern: &Pattern) {
        self.clear();
        self.grid.extend(pattern.placed_at((0, 0)));
        log::info!("Seeded {:?} ({} cells)", pattern.name, self.grid.len());
    }

    /// Seeds a random pattern over `[min, max)`. Ignored while running.
    pub fn random_fill<R: Rng>(&mut self, min: Coord, max: Coord, rng: &mut R) -> bool {
        if self.state == RunState::Running {
            return false;
        }
        let pattern = Pattern::random_fill(min, max, self.fill_percent, rng);
        self.seed_pattern(&pattern);
        true
    }

    /// Sets one cell while paused. Returns false when the edit was refused.
    pub fn toggle_cell_at(&mut self, cell: Coord, make_alive: bool) -> bool {
        if self.state == RunState::Running {
            return false;
        }
        if make_alive {
            self.grid.set_alive(cell);
        } else {
            self.grid.set_dead(cell);
        }
        true
    }

    /// Adds `delta` seconds to the update interval, never going below
    /// `MIN_INTERVAL`. There is no upper limit; `interval()` saturates.
    pub fn speed_adjust(&mut self, delta: f32) {
        self.update_interval = (self.update_interval + delta).max(MIN_INTERVAL);
    }

    pub fn faster(&mut self) {
        self.speed_adjust(-SPEED_STEP);
    }

    pub fn slower(&mut self) {
        self.speed_adjust(SPEED_STEP);
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
    }

    pub fn status(&self) -> &'static str {
        match self.state {
            RunState::Paused => "PAUSED",
            RunState::Running => "RUNNING",
        }
    }

    pub fn speed_text(&self) -> String {
        format!("Time of change: {:.2}", self.update_interval)
    }
}

impl LifeEngine for SoloEngine {
    fn step(&mut self) -> Option<StepReport> {
        if self.state != RunState::Running {
            return None;
        }
        let next = rules::step(&self.grid);
        let survivors = next.iter().filter(|&&c| self.grid.is_alive(c)).count();
        let report = StepReport {
            generation: self.generation + 1,
            births: next.len() - survivors,
            deaths: self.grid.len() - survivors,
            population: next.len(),
            result: None,
        };
        self.grid = next;
        self.generation += 1;
        log::debug!(
            "Generation {}: {} alive (+{} -{})",
            report.generation, report.population, report.births, report.deaths
        );
        Some(report)
    }

    fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            RunState::Paused => RunState::Running,
            RunState::Running => RunState::Paused,
        };
        log::info!("Simulation {}", self.status());
        self.is_running()
    }

    fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    fn interval(&self) -> Duration {
        seconds(self.update_interval)
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn grid(&self) -> &SparseGrid {
        &self.grid
    }
}
