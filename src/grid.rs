//! Occupancy grid and packing display.
//!
//! The grid is a flat row-major array of booleans: cell `(x, y)` lives at
//! index `y * width + x`. A grid belongs to exactly one region check.

use crate::pieces::{PlacedPiece, Shape, ShapeLibrary};

/// Mutable occupancy of a `width x height` rectangle.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    occupied: Vec<bool>,
    free: usize,
}

impl Grid {
    /// Creates an empty grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            occupied: vec![false; width * height],
            free: width * height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn area(&self) -> usize {
        self.occupied.len()
    }

    /// Converts `(x, y)` to a linear cell index.
    #[inline(always)]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn is_occupied(&self, cell: usize) -> bool {
        self.occupied[cell]
    }

    /// Returns the cell indices `shape` covers with its top-left at `(x, y)`.
    ///
    /// Returns `None` if any cell would fall outside the grid.
    pub fn cell_indices(&self, shape: &Shape, x: usize, y: usize) -> Option<Vec<usize>> {
        if x + shape.width() > self.width || y + shape.height() > self.height {
            return None;
        }
        Some(
            shape
                .cells()
                .iter()
                .map(|&(dx, dy)| self.index(x + dx as usize, y + dy as usize))
                .collect(),
        )
    }

    /// Returns whether every listed cell is unoccupied.
    #[inline]
    pub fn is_free(&self, cells: &[usize]) -> bool {
        cells.iter().all(|&cell| !self.occupied[cell])
    }

    /// Marks the listed cells occupied.
    #[inline]
    pub fn fill(&mut self, cells: &[usize]) {
        for &cell in cells {
            debug_assert!(!self.occupied[cell], "cell {cell} filled twice");
            if !self.occupied[cell] {
                self.occupied[cell] = true;
                self.free -= 1;
            }
        }
    }

    /// Restores the listed cells to unoccupied.
    #[inline]
    pub fn clear(&mut self, cells: &[usize]) {
        for &cell in cells {
            if self.occupied[cell] {
                self.occupied[cell] = false;
                self.free += 1;
            }
        }
    }

    /// Number of unoccupied cells.
    #[inline]
    pub fn free_count(&self) -> usize {
        self.free
    }
}

/// Returns the display character for the `n`-th placed piece.
///
/// `A`-`Z`, then `a`-`z`, then `#` for everything beyond.
fn piece_symbol(n: usize) -> char {
    match n {
        0..=25 => char::from(b'A' + n as u8),
        26..=51 => char::from(b'a' + (n - 26) as u8),
        _ => '#',
    }
}

/// Formats a packing of a `width x height` region as rows of letters.
///
/// Pieces are lettered in packing order; empty cells show as '.'. Pieces
/// referring to an unknown shape or orientation are skipped.
pub fn format_packing(
    width: usize,
    height: usize,
    library: &ShapeLibrary,
    packing: &[PlacedPiece],
) -> String {
    let grid = Grid::new(width, height);
    let mut symbols = vec!['.'; grid.area()];

    for (n, placed) in packing.iter().enumerate() {
        let Some(shape) = library
            .orientations(placed.shape_index)
            .get(placed.orientation_index)
        else {
            continue;
        };
        if let Some(cells) = grid.cell_indices(shape, placed.x, placed.y) {
            for cell in cells {
                symbols[cell] = piece_symbol(n);
            }
        }
    }

    let mut output = String::with_capacity((width + 1) * height);
    for row in symbols.chunks(width.max(1)) {
        output.extend(row);
        output.push('\n');
    }
    output
}
