//! Present shapes and placement types.
//!
//! Each shape is a set of unit cells in the plane, normalized to start at the
//! origin. `x` grows to the right (columns) and `y` grows downward (rows).

use std::fmt;

use crate::error::ShapeError;
use crate::geometry::{normalize, orientations};

/// A 2D coordinate representing a unit cell position.
pub type Coord = (i32, i32);

/// An origin-anchored set of occupied cells.
///
/// Cells are kept sorted and unique, so equality is structural equality of
/// the cell sets.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    cells: Vec<Coord>,
    width: usize,
    height: usize,
}

impl Shape {
    /// Builds a shape from arbitrary cells, translating them to the origin.
    pub fn new(cells: impl IntoIterator<Item = Coord>) -> Result<Self, ShapeError> {
        let cells = normalize(cells.into_iter().collect())?;
        Ok(Self::from_normalized(cells))
    }

    /// Builds a shape from rows of `#` (occupied) and `.` (empty).
    pub fn from_pattern<'a>(rows: impl IntoIterator<Item = &'a str>) -> Result<Self, ShapeError> {
        let mut cells = Vec::new();
        for (row, line) in rows.into_iter().enumerate() {
            for (column, ch) in line.chars().enumerate() {
                match ch {
                    '#' => cells.push((column as i32, row as i32)),
                    '.' => {}
                    _ => return Err(ShapeError::UnexpectedCell { row, column, ch }),
                }
            }
        }
        Self::new(cells)
    }

    /// Wraps cells that are already normalized, computing the bounding box.
    pub(crate) fn from_normalized(cells: Vec<Coord>) -> Self {
        let width = cells.iter().map(|&(x, _)| x as usize + 1).max().unwrap_or(0);
        let height = cells.iter().map(|&(_, y)| y as usize + 1).max().unwrap_or(0);
        Self {
            cells,
            width,
            height,
        }
    }

    /// Returns the occupied cells in sorted order.
    #[inline]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of occupied cells; identical for every orientation.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns whether the cell `(x, y)` of the bounding box is occupied.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.cells.binary_search(&(x as i32, y as i32)).is_ok()
    }
}

impl fmt::Display for Shape {
    /// Renders the shape as `#`/`.` rows, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width {
                let symbol = if self.contains(x, y) { '#' } else { '.' };
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}

/// A present committed to the grid.
///
/// `x` and `y` are the top-left anchor of the orientation's bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedPiece {
    pub shape_index: usize,
    pub orientation_index: usize,
    pub x: usize,
    pub y: usize,
}

/// Shapes indexed by their definition order, each with its orientation set.
///
/// Built once and shared read-only by every region check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeLibrary {
    shapes: Vec<Shape>,
    orientations: Vec<Vec<Shape>>,
}

impl ShapeLibrary {
    /// Precomputes the orientation set of every shape.
    pub fn new(shapes: Vec<Shape>) -> Self {
        let orientations = shapes.iter().map(orientations).collect();
        Self {
            shapes,
            orientations,
        }
    }

    /// Builds a library from `#`/`.` patterns.
    pub fn from_patterns(patterns: &[&[&str]]) -> Result<Self, ShapeError> {
        let shapes = patterns
            .iter()
            .map(|rows| Shape::from_pattern(rows.iter().copied()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(shapes))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shape(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Returns the unique orientations of shape `index`, or an empty slice
    /// for an unknown index.
    pub fn orientations(&self, index: usize) -> &[Shape] {
        self.orientations
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// The six presents of the reference puzzle, each fitting a 3x3 box.
pub const REFERENCE_SHAPES: &[&[&str]] = &[
    &["###", "##.", "##."],
    &["###", "##.", ".##"],
    &[".##", "###", "##."],
    &["##.", "###", "##."],
    &["###", "#..", "###"],
    &["###", ".#.", "###"],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_cells_and_bounding_box() {
        let shape = Shape::from_pattern(["..#", ".##"]).unwrap();
        assert_eq!(shape.cells(), &[(0, 1), (1, 0), (1, 1)]);
        assert_eq!((shape.width(), shape.height()), (2, 2));
        assert_eq!(shape.cell_count(), 3);
    }

    #[test]
    fn test_pattern_rejects_unknown_characters() {
        assert_eq!(
            Shape::from_pattern(["#.", "#x"]),
            Err(ShapeError::UnexpectedCell {
                row: 1,
                column: 1,
                ch: 'x'
            })
        );
    }

    #[test]
    fn test_blank_pattern_is_empty_shape() {
        assert_eq!(Shape::from_pattern(["...", "..."]), Err(ShapeError::Empty));
        assert_eq!(Shape::new(Vec::new()), Err(ShapeError::Empty));
    }

    #[test]
    fn test_translation_and_order_do_not_matter() {
        let a = Shape::new([(5, 5), (6, 5), (5, 6)]).unwrap();
        let b = Shape::new([(0, 1), (0, 0), (1, 0)]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_round_trips_pattern() {
        let rows = ["###", "#..", "###"];
        let shape = Shape::from_pattern(rows).unwrap();
        assert_eq!(shape.to_string(), rows.join("\n"));
    }

    #[test]
    fn test_reference_library() {
        let library = ShapeLibrary::from_patterns(REFERENCE_SHAPES).unwrap();
        assert_eq!(library.len(), 6);

        let counts: Vec<usize> = (0..library.len())
            .map(|index| library.orientations(index).len())
            .collect();
        assert_eq!(counts, vec![8, 8, 2, 4, 4, 2]);

        for (index, shape) in library.shapes().iter().enumerate() {
            assert_eq!(shape.cell_count(), 7);
            assert!(library
                .orientations(index)
                .iter()
                .all(|oriented| oriented.cell_count() == 7));
        }
        assert!(library.orientations(6).is_empty());
    }
}
