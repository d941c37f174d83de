// rules.rs - Classic B3/S23 neighbor rule over a sparse grid

use std::collections::HashSet;

use crate::grid::{Bounds, Coord, NEIGHBOR_OFFSETS, SparseGrid};

/// Survival on 2 or 3 live neighbors, birth on exactly 3.
pub fn next_state(is_alive: bool, count: u32) -> bool {
    match (is_alive, count) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

pub fn neighbors((x, y): Coord) -> impl Iterator<Item = Coord> {
    NEIGHBOR_OFFSETS.iter().map(move |&(dx, dy)| (x.wrapping_add(dx), y.wrapping_add(dy)))
}

pub fn count_neighbors(grid: &SparseGrid, cell: Coord) -> u32 {
    neighbors(cell).filter(|&n| grid.is_alive(n)).count() as u32
}

/// Every alive cell plus its Moore neighborhood: the only cells that can
/// be alive next generation.
pub fn candidates(grid: &SparseGrid) -> HashSet<Coord> {
    let mut cells = HashSet::with_capacity(grid.len() * 9);
    for &cell in grid {
        cells.insert(cell);
        cells.extend(neighbors(cell));
    }
    cells
}

/// One generation on an unbounded plane.
pub fn step(grid: &SparseGrid) -> SparseGrid {
    candidates(grid)
        .into_iter()
        .filter(|&cell| next_state(grid.is_alive(cell), count_neighbors(grid, cell)))
        .collect()
}

/// One generation where nothing outside `bounds` is ever alive.
pub fn step_within(grid: &SparseGrid, bounds: Bounds) -> SparseGrid {
    candidates(grid)
        .into_iter()
        .filter(|&cell| bounds.contains(cell))
        .filter(|&cell| next_state(grid.is_alive(cell), count_neighbors(grid, cell)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cells: &[Coord]) -> SparseGrid {
        cells.iter().copied().collect()
    }

    #[test]
    fn rule_table() {
        for count in 0..=8 {
            assert_eq!(next_state(true, count), count == 2 || count == 3, "alive with {count}");
            assert_eq!(next_state(false, count), count == 3, "dead with {count}");
        }
    }

    #[test]
    fn block_is_still_life() {
        let block = grid(&[(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(step(&block), block);
    }

    #[test]
    fn blinker_has_period_two() {
        let row = grid(&[(-1, 0), (0, 0), (1, 0)]);
        let column = grid(&[(0, -1), (0, 0), (0, 1)]);
        let next = step(&row);
        assert_eq!(next, column);
        assert_eq!(step(&next), row);
    }

    #[test]
    fn births_and_survivals_follow_neighbor_counts() {
        // An irregular blob so cells see a spread of neighbor counts.
        let current = grid(&[(0, 0), (1, 0), (2, 0), (2, 1), (0, 2), (3, 3), (-1, 1)]);
        let next = step(&current);
        for cell in candidates(&current) {
            let count = count_neighbors(&current, cell);
            let expected = if current.is_alive(cell) {
                count == 2 || count == 3
            } else {
                count == 3
            };
            assert_eq!(next.is_alive(cell), expected, "cell {cell:?} with {count}");
        }
        assert!(next.iter().all(|c| candidates(&current).contains(c)));
    }

    #[test]
    fn lone_cell_dies() {
        assert!(step(&grid(&[(7, 7)])).is_empty());
    }

    #[test]
    fn step_leaves_input_untouched() {
        let row = grid(&[(-1, 0), (0, 0), (1, 0)]);
        let before = row.clone();
        let _ = step(&row);
        assert_eq!(row, before);
    }

    #[test]
    fn bounded_step_excludes_outside_cells() {
        // (2, 2) has three live neighbors but lies outside half = 1.
        let bounds = Bounds::from_board_size(3);
        let current = grid(&[(1, 1), (1, 2), (2, 1)]);
        assert!(step(&current).is_alive((2, 2)));
        assert!(!step_within(&current, bounds).is_alive((2, 2)));
    }
}
