// versus.rs - Two-player Game of Life on a bounded board with territory scoring

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::MatchConfig;
use crate::grid::{Bounds, Coord, SparseGrid};
use crate::history::HistoryRing;
use crate::patterns::Pattern;
use crate::solo::{MIN_INTERVAL, seconds};
use crate::{LifeEngine, StepReport, rules};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.id())
    }
}

/// Births credited to each player. Only ever increases during a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub player1: u32,
    pub player2: u32,
}

impl Scores {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    fn award(&mut self, player: Player) {
        match player {
            Player::One => self.player1 += 1,
            Player::Two => self.player2 += 1,
        }
    }

    pub fn result(&self) -> MatchResult {
        use std::cmp::Ordering;
        match self.player1.cmp(&self.player2) {
            Ordering::Greater => MatchResult::Winner(Player::One),
            Ordering::Less => MatchResult::Winner(Player::Two),
            Ordering::Equal => MatchResult::Draw,
        }
    }
}

impl fmt::Display for Scores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P1: {} | P2: {}", self.player1, self.player2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Winner(Player),
    Draw,
}

impl MatchResult {
    pub fn message(&self) -> &'static str {
        match self {
            MatchResult::Winner(Player::One) => "PLAYER 1 WINS!",
            MatchResult::Winner(Player::Two) => "PLAYER 2 WINS!",
            MatchResult::Draw => "DRAW!",
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Running,
    Paused,
    GameOver,
}

/// Why a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Extinct,
    Stable,
    Cycle,
}

/// Owner of a newborn cell: the player with more live neighbors, a coin
/// flip on a tie.
pub fn attribute_birth<R: Rng>(ones: u32, twos: u32, rng: &mut R) -> Player {
    if ones > twos {
        Player::One
    } else if twos > ones {
        Player::Two
    } else if rng.random_bool(0.5) {
        Player::One
    } else {
        Player::Two
    }
}

type GameOverListener = Box<dyn FnMut(MatchResult) + Send>;

/// Competitive engine: owned cells, births scored, and a match that ends on
/// extinction, a still state, or a repeat within the history window.
pub struct MatchEngine<R = StdRng> {
    bounds: Bounds,
    grid: SparseGrid,
    owners: HashMap<Coord, Player>,
    history: HistoryRing,
    scores: Scores,
    phase: Phase,
    current_player: Player,
    patterns: Vec<Pattern>,
    selected_pattern: usize,
    update_interval: f32,
    generation: u64,
    result: Option<MatchResult>,
    termination: Option<Termination>,
    rng: R,
    listeners: Vec<GameOverListener>,
}

impl MatchEngine<StdRng> {
    /// Seeds the tie-break source from `config.seed`, or from the OS when unset.
    pub fn new(config: &MatchConfig, patterns: Vec<Pattern>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, patterns, rng)
    }
}

impl<R: Rng> MatchEngine<R> {
    pub fn with_rng(config: &MatchConfig, patterns: Vec<Pattern>, rng: R) -> Self {
        Self {
            bounds: Bounds::from_board_size(config.board_size),
            grid: SparseGrid::new(),
            owners: HashMap::new(),
            history: HistoryRing::new(config.history_limit),
            scores: Scores::default(),
            phase: Phase::Setup,
            current_player: Player::One,
            patterns,
            selected_pattern: 0,
            update_interval: config.update_interval.max(MIN_INTERVAL),
            generation: 0,
            result: None,
            termination: None,
            rng,
            listeners: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn owners(&self) -> &HashMap<Coord, Player> {
        &self.owners
    }

    pub fn owner_of(&self, cell: Coord) -> Option<Player> {
        self.owners.get(&cell).copied()
    }

    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.result
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn selected_pattern(&self) -> usize {
        self.selected_pattern
    }

    /// Registers a callback fired once with the result when the match ends.
    pub fn on_game_over(&mut self, listener: impl FnMut(MatchResult) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Chooses the pattern for later setup placements. Out-of-range indices
    /// are ignored.
    pub fn select_pattern(&mut self, index: usize) -> bool {
        if index >= self.patterns.len() {
            return false;
        }
        self.selected_pattern = index;
        true
    }

    /// A click on the board: places the selected pattern during setup, or
    /// toggles a cell once setup is over and the match is paused.
    pub fn place_at(&mut self, cell: Coord) -> bool {
        match self.phase {
            Phase::Setup => self.place_pattern_at(cell) > 0,
            Phase::Paused => self.toggle_cell(cell),
            Phase::Running | Phase::GameOver => false,
        }
    }

    /// Places the selected pattern for the current player, centered on
    /// `origin`, then passes the turn. Offsets that fall off the board or on
    /// an occupied cell are skipped. Returns the number of cells placed.
    pub fn place_pattern_at(&mut self, origin: Coord) -> usize {
        if self.phase != Phase::Setup || !self.bounds.contains(origin) {
            return 0;
        }
        let Some(pattern) = self.patterns.get(self.selected_pattern) else {
            return 0;
        };
        let player = self.current_player;
        let mut placed = 0;
        for cell in pattern.placed_at(origin) {
            if !self.bounds.contains(cell) || self.grid.is_alive(cell) {
                log::trace!("Skipping {:?} for {}", cell, player);
                continue;
            }
            self.grid.set_alive(cell);
            self.owners.insert(cell, player);
            placed += 1;
        }
        self.current_player = player.other();
        log::debug!("{} placed {} cells at {:?}", player, placed, origin);
        placed
    }

    /// Places one cell for the current player and passes the turn.
    pub fn place_cell(&mut self, cell: Coord) -> bool {
        if self.phase != Phase::Setup || !self.bounds.contains(cell) || self.grid.is_alive(cell) {
            return false;
        }
        self.grid.set_alive(cell);
        self.owners.insert(cell, self.current_player);
        self.current_player = self.current_player.other();
        true
    }

    /// Manual edit between generations: a dead cell is born to player 1,
    /// a live one is removed.
    pub fn toggle_cell(&mut self, cell: Coord) -> bool {
        if self.phase != Phase::Paused || !self.bounds.contains(cell) {
            return false;
        }
        if self.grid.toggle(cell) {
            self.owners.insert(cell, Player::One);
        } else {
            self.owners.remove(&cell);
        }
        true
    }

    /// Back to an empty board in setup with player 1 to move.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.owners.clear();
        self.history.clear();
        self.scores = Scores::default();
        self.phase = Phase::Setup;
        self.current_player = Player::One;
        self.generation = 0;
        self.result = None;
        self.termination = None;
        log::info!("Match reset");
    }

    pub fn status(&self) -> String {
        match self.phase {
            Phase::Setup => format!("SETUP - {}", self.current_player),
            Phase::Running => "RUNNING".to_string(),
            Phase::Paused => "PAUSED".to_string(),
            Phase::GameOver => "GAME OVER".to_string(),
        }
    }

    /// Live neighbors of `cell`: total, owned by player 1, owned by player 2.
    fn tally(&self, cell: Coord) -> (u32, u32, u32) {
        let mut counts = (0, 0, 0);
        for n in rules::neighbors(cell) {
            if !self.grid.is_alive(n) {
                continue;
            }
            counts.0 += 1;
            match self.owners.get(&n) {
                Some(Player::One) => counts.1 += 1,
                Some(Player::Two) => counts.2 += 1,
                None => {}
            }
        }
        counts
    }

    fn advance(&mut self) -> StepReport {
        // Sorted so seeded tie-breaks replay identically.
        let mut candidates: Vec<Coord> = rules::candidates(&self.grid)
            .into_iter()
            .filter(|&c| self.bounds.contains(c))
            .collect();
        candidates.sort_unstable();

        let mut next = SparseGrid::new();
        let mut next_owners = HashMap::with_capacity(self.owners.len());
        let mut births = 0;
        for cell in candidates {
            let (total, ones, twos) = self.tally(cell);
            let alive = self.grid.is_alive(cell);
            if !rules::next_state(alive, total) {
                continue;
            }
            let owner = match self.owner_of(cell).filter(|_| alive) {
                Some(owner) => owner,
                None => {
                    let owner = attribute_birth(ones, twos, &mut self.rng);
                    if !alive {
                        self.scores.award(owner);
                        births += 1;
                    }
                    owner
                }
            };
            next.set_alive(cell);
            next_owners.insert(cell, owner);
        }

        let survivors = next.len() - births;
        let deaths = self.grid.len() - survivors;
        let stable = next == self.grid;
        let repeated = self.history.contains(&next);

        self.grid = next;
        self.owners = next_owners;
        self.history.push(self.grid.clone());
        self.generation += 1;

        let termination = if self.grid.is_empty() {
            Some(Termination::Extinct)
        } else if stable {
            Some(Termination::Stable)
        } else if repeated {
            Some(Termination::Cycle)
        } else {
            None
        };

        let result = termination.map(|reason| self.finish(reason));
        log::debug!(
            "Generation {}: {} alive (+{} -{}), {}",
            self.generation, self.grid.len(), births, deaths, self.scores
        );
        StepReport {
            generation: self.generation,
            births,
            deaths,
            population: self.grid.len(),
            result,
        }
    }

    fn finish(&mut self, reason: Termination) -> MatchResult {
        let result = self.scores.result();
        self.phase = Phase::GameOver;
        self.termination = Some(reason);
        self.result = Some(result);
        log::info!("Match over after {} generations ({:?}): {} [{}]",
            self.generation, reason, result, self.scores);
        for listener in &mut self.listeners {
            listener(result);
        }
        result
    }
}

impl<R: Rng> LifeEngine for MatchEngine<R> {
    fn step(&mut self) -> Option<StepReport> {
        if self.phase != Phase::Running {
            return None;
        }
        Some(self.advance())
    }

    /// Setup ends on the first toggle. Game over is final until `reset`.
    fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Setup | Phase::Paused => Phase::Running,
            Phase::Running => Phase::Paused,
            Phase::GameOver => Phase::GameOver,
        };
        log::info!("Match {}", self.status());
        self.is_running()
    }

    fn is_running(&self) -> bool {
        self.phase == Phase::Running
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
