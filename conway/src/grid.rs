// grid.rs - Sparse grid types for Conway's Game of Life

use std::collections::HashSet;
use std::collections::hash_set;

pub type Coord = (i32, i32);                          // (x, y) cell coordinate

/// The 8 Moore-neighborhood offsets, origin excluded.
pub const NEIGHBOR_OFFSETS: [Coord; 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Set of alive cells. Presence means alive, absence means dead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseGrid {
    alive: HashSet<Coord>,
}

impl SparseGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_alive(&self, cell: Coord) -> bool {
        self.alive.contains(&cell)
    }

    pub fn set_alive(&mut self, cell: Coord) {
        self.alive.insert(cell);
    }

    pub fn set_dead(&mut self, cell: Coord) {
        self.alive.remove(&cell);
    }

    /// Flips a cell and returns its new state.
    pub fn toggle(&mut self, cell: Coord) -> bool {
        if self.alive.remove(&cell) {
            false
        } else {
            self.alive.insert(cell);
            true
        }
    }

    pub fn clear(&mut self) {
        self.alive.clear();
    }

    /// Independent snapshot of the alive cells.
    pub fn cells(&self) -> HashSet<Coord> {
        self.alive.clone()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, Coord> {
        self.alive.iter()
    }

    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Smallest (min, max) corners enclosing every alive cell.
    pub fn bounding_box(&self) -> Option<(Coord, Coord)> {
        let mut cells = self.alive.iter();
        let &first = cells.next()?;
        Some(cells.fold((first, first), |(min, max), &(x, y)| {
            ((min.0.min(x), min.1.min(y)), (max.0.max(x), max.1.max(y)))
        }))
    }
}

impl FromIterator<Coord> for SparseGrid {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self { alive: iter.into_iter().collect() }
    }
}

impl Extend<Coord> for SparseGrid {
    fn extend<I: IntoIterator<Item = Coord>>(&mut self, iter: I) {
        self.alive.extend(iter);
    }
}

impl<'a> IntoIterator for &'a SparseGrid {
    type Item = &'a Coord;
    type IntoIter = hash_set::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.alive.iter()
    }
}

/// Square board `[-half, half]` on both axes, `half = board_size / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub half: i32,
}

impl Bounds {
    /// `half` stops one short of `i32::MAX` so the border ring stays representable.
    pub fn from_board_size(board_size: u32) -> Self {
        let half = (board_size / 2).min(i32::MAX as u32 - 1);
        Self { half: half as i32 }
    }

    pub fn contains(&self, (x, y): Coord) -> bool {
        let half = self.half.unsigned_abs();
        x.unsigned_abs() <= half && y.unsigned_abs() <= half
    }

    /// Cells one step outside the board, drawn as its edge.
    pub fn border(&self) -> Vec<Coord> {
        let edge = self.half + 1;
        let mut ring = Vec::with_capacity(8 * edge as usize);
        for x in -edge..=edge {
            ring.push((x, -edge));
            ring.push((x, edge));
        }
        for y in (-edge + 1)..edge {
            ring.push((-edge, y));
            ring.push((edge, y));
        }
        ring
    }
}
