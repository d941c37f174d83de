// patterns.rs - Named cell patterns: built-in library, random fill, JSON files

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::Coord;

pub const DEFAULT_FILL_PERCENT: u32 = 9;
pub const MAX_PATTERN_COORD: i32 = 1 << 20;            // Largest |x| or |y| in a pattern file

/// A named list of cell offsets, plus the fill percentage used when a
/// random pattern is generated from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    pub cells: Vec<Coord>,
    #[serde(default = "default_fill_percent")]
    pub fill_percent: u32,
}

fn default_fill_percent() -> u32 {
    DEFAULT_FILL_PERCENT
}

impl Pattern {
    pub fn new(name: impl Into<String>, cells: Vec<Coord>) -> Self {
        Self {
            name: name.into(),
            cells,
            fill_percent: DEFAULT_FILL_PERCENT,
        }
    }

    /// Midpoint of the bounding box, `(min + max) / 2` truncated toward zero.
    /// An empty pattern is centered on the origin.
    pub fn center(&self) -> Coord {
        let Some(&first) = self.cells.first() else {
            return (0, 0);
        };
        let (min, max) = self.cells.iter().fold((first, first), |(min, max), &(x, y)| {
            ((min.0.min(x), min.1.min(y)), (max.0.max(x), max.1.max(y)))
        });
        (midpoint(min.0, max.0), midpoint(min.1, max.1))
    }

    /// The pattern's cells translated so its center lands on `origin`.
    pub fn placed_at(&self, origin: Coord) -> impl Iterator<Item = Coord> + '_ {
        let (cx, cy) = self.center();
        self.cells
            .iter()
            .map(move |&(x, y)| (shift(origin.0, x, cx), shift(origin.1, y, cy)))
    }

    /// Fills the half-open rectangle `[min, max)`, each cell alive with
    /// `fill_percent` percent probability.
    pub fn random_fill<R: Rng>(min: Coord, max: Coord, fill_percent: u32, rng: &mut R) -> Self {
        let mut cells = Vec::new();
        for x in min.0..max.0 {
            for y in min.1..max.1 {
                if rng.random_range(0..100) < fill_percent {
                    cells.push((x, y));
                }
            }
        }
        Self {
            name: "Random".to_string(),
            cells,
            fill_percent,
        }
    }
}

fn midpoint(a: i32, b: i32) -> i32 {
    ((i64::from(a) + i64::from(b)) / 2) as i32
}

/// `origin + v - center`, clamped to the `i32` range.
fn shift(origin: i32, v: i32, center: i32) -> i32 {
    let moved = i64::from(origin) + i64::from(v) - i64::from(center);
    moved.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

const BUILTIN: &[(&str, &[Coord])] = &[
    ("Block", &[(0, 0), (1, 0), (0, 1), (1, 1)]),
    ("Blinker", &[(-1, 0), (0, 0), (1, 0)]),
    ("Toad", &[(0, 0), (1, 0), (2, 0), (-1, 1), (0, 1), (1, 1)]),
    ("Beacon", &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)]),
    ("Glider", &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]),
    ("R-pentomino", &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)]),
    (
        "Pulsar",
        &[
            // Top half
            (-4, -6), (-3, -6), (-2, -6), (2, -6), (3, -6), (4, -6),
            (-6, -4), (-1, -4), (1, -4), (6, -4),
            (-6, -3), (-1, -3), (1, -3), (6, -3),
            (-6, -2), (-1, -2), (1, -2), (6, -2),
            (-4, -1), (-3, -1), (-2, -1), (2, -1), (3, -1), (4, -1),
            // Bottom half (mirrored)
            (-4, 1), (-3, 1), (-2, 1), (2, 1), (3, 1), (4, 1),
            (-6, 2), (-1, 2), (1, 2), (6, 2),
            (-6, 3), (-1, 3), (1, 3), (6, 3),
            (-6, 4), (-1, 4), (1, 4), (6, 4),
            (-4, 6), (-3, 6), (-2, 6), (2, 6), (3, 6), (4, 6),
        ],
    ),
    (
        "Lightweight spaceship",
        &[(1, 0), (4, 0), (0, 1), (0, 2), (4, 2), (0, 3), (1, 3), (2, 3), (3, 3)],
    ),
    (
        "Gosper glider gun",
        &[
            // Left block
            (1, 5), (2, 5), (1, 6), (2, 6),
            // Left ship
            (11, 5), (11, 6), (11, 7), (12, 4), (12, 8), (13, 3), (13, 9),
            (14, 3), (14, 9), (15, 6), (16, 4), (16, 8), (17, 5), (17, 6),
            (17, 7), (18, 6),
            // Right ship
            (21, 3), (21, 4), (21, 5), (22, 3), (22, 4), (22, 5), (23, 2),
            (23, 6), (25, 1), (25, 2), (25, 6), (25, 7),
            // Right block
            (35, 3), (35, 4), (36, 3), (36, 4),
        ],
    ),
];

/// The patterns shipped with the game.
pub fn builtin() -> Vec<Pattern> {
    BUILTIN
        .iter()
        .map(|&(name, cells)| Pattern::new(name, cells.to_vec()))
        .collect()
}

pub fn find<'a>(patterns: &'a [Pattern], name: &str) -> Option<&'a Pattern> {
    patterns.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Parses a JSON array of patterns.
pub fn from_json(json: &str) -> Result<Vec<Pattern>, ConfigError> {
    let patterns: Vec<Pattern> = serde_json::from_str(json)?;
    if let Some(bad) = patterns.iter().find(|p| p.fill_percent > 100) {
        return Err(ConfigError::Invalid(format!(
            "pattern {:?} has fill_percent {} (max 100)",
            bad.name, bad.fill_percent
        )));
    }
    for pattern in &patterns {
        let far = pattern.cells.iter().find(|&&(x, y)| {
            x.unsigned_abs() > MAX_PATTERN_COORD as u32 || y.unsigned_abs() > MAX_PATTERN_COORD as u32
        });
        if let Some(&(x, y)) = far {
            return Err(ConfigError::Invalid(format!(
                "pattern {:?} has cell ({x}, {y}) beyond {MAX_PATTERN_COORD}",
                pattern.name
            )));
        }
    }
    Ok(patterns)
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<Pattern>, ConfigError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let patterns = from_json(&json)?;
    log::info!("Loaded {} patterns from {}", patterns.len(), path.display());
    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SparseGrid;
    use crate::rules;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn center_is_bounding_box_midpoint() {
        let pattern = Pattern::new("l", vec![(0, 0), (3, 0), (0, 5)]);
        assert_eq!(pattern.center(), (1, 2));
        assert_eq!(Pattern::new("empty", vec![]).center(), (0, 0));
    }

    #[test]
    fn center_truncates_toward_zero() {
        let pattern = Pattern::new("neg", vec![(-3, -3), (0, 0)]);
        assert_eq!(pattern.center(), (-1, -1));
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let edge = Pattern::new("edge", vec![(i32::MAX, 0), (i32::MAX - 1, 0)]);
        assert_eq!(edge.center(), (i32::MAX - 1, 0));
        let placed: Vec<_> = edge.placed_at((0, 0)).collect();
        assert_eq!(placed, vec![(1, 0), (0, 0)]);

        let wide = Pattern::new("wide", vec![(i32::MIN, 0), (i32::MAX, 0)]);
        assert_eq!(wide.center(), (0, 0));
        let placed: Vec<_> = wide.placed_at((i32::MAX, 0)).collect();
        assert_eq!(placed, vec![(-1, 0), (i32::MAX, 0)]);
    }

    #[test]
    fn placed_at_moves_center_to_origin() {
        let blinker = Pattern::new("blinker", vec![(4, 9), (5, 9), (6, 9)]);
        let placed: Vec<_> = blinker.placed_at((0, 0)).collect();
        assert_eq!(placed, vec![(-1, 0), (0, 0), (1, 0)]);
        let placed: Vec<_> = blinker.placed_at((10, -10)).collect();
        assert_eq!(placed, vec![(9, -10), (10, -10), (11, -10)]);
    }

    #[test]
    fn random_fill_respects_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Pattern::random_fill((0, 0), (10, 10), 0, &mut rng).cells.is_empty());
        let full = Pattern::random_fill((-2, -2), (3, 3), 100, &mut rng);
        assert_eq!(full.cells.len(), 25);
        assert!(full.cells.iter().all(|&(x, y)| (-2..3).contains(&x) && (-2..3).contains(&y)));
    }

    #[test]
    fn random_fill_is_reproducible_with_seed() {
        let a = Pattern::random_fill((0, 0), (20, 20), 30, &mut StdRng::seed_from_u64(7));
        let b = Pattern::random_fill((0, 0), (20, 20), 30, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(!a.cells.is_empty() && a.cells.len() < 400);
    }

    #[test]
    fn builtin_library_is_named_and_nonempty() {
        let patterns = builtin();
        assert_eq!(patterns.len(), BUILTIN.len());
        assert!(patterns.iter().all(|p| !p.cells.is_empty()));
        assert_eq!(find(&patterns, "glider").map(|p| p.cells.len()), Some(5));
        assert_eq!(find(&patterns, "gosper glider gun").map(|p| p.cells.len()), Some(36));
    }

    #[test]
    fn pulsar_is_centered_with_period_three() {
        let pulsar = find(&builtin(), "pulsar").cloned().unwrap();
        assert_eq!(pulsar.cells.len(), 48);
        assert_eq!(pulsar.center(), (0, 0));

        let start: SparseGrid = pulsar.placed_at((0, 0)).collect();
        let mut grid = start.clone();
        for generation in 1..=3 {
            grid = rules::step(&grid);
            assert_eq!(grid == start, generation == 3);
        }
    }

    #[test]
    fn parses_json_with_default_fill() {
        let json = r#"[{"name": "pair", "cells": [[0, 0], [1, 0]]},
                       {"name": "dot", "cells": [[5, -5]], "fill_percent": 40}]"#;
        let patterns = from_json(json).unwrap();
        assert_eq!(patterns[0].cells, vec![(0, 0), (1, 0)]);
        assert_eq!(patterns[0].fill_percent, DEFAULT_FILL_PERCENT);
        assert_eq!(patterns[1].fill_percent, 40);
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(from_json("{"), Err(ConfigError::Parse(_))));
        let json = r#"[{"name": "x", "cells": [], "fill_percent": 101}]"#;
        assert!(matches!(from_json(json), Err(ConfigError::Invalid(_))));
        let json = r#"[{"name": "far", "cells": [[2147483647, 0], [2147483646, 0]]}]"#;
        assert!(matches!(from_json(json), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
