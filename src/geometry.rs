//! 2D rotation and reflection utilities.
//!
//! A square has 8 symmetries (the dihedral group of order 8): 4 quarter turns,
//! each optionally preceded by a horizontal mirror.

use rustc_hash::FxHashSet;

use crate::error::ShapeError;
use crate::pieces::{Coord, Shape};

/// All 8 transforms of the square.
///
/// Organized as 4 rotations of the shape followed by 4 rotations of its mirror:
/// - Transforms 0-3: 0, 90, 180 and 270 degrees clockwise
/// - Transforms 4-7: the same turns applied after `(x, y) -> (-x, y)`
///
/// One clockwise quarter turn maps `(x, y)` to `(y, -x)`. Translation commutes
/// with all of these, so renormalizing once after the closed form is the same
/// as renormalizing after every single turn.
pub const TRANSFORMS: [fn(Coord) -> Coord; 8] = [
    |(x, y)| (x, y),
    |(x, y)| (y, -x),
    |(x, y)| (-x, -y),
    |(x, y)| (-y, x),
    // mirrored
    |(x, y)| (-x, y),
    |(x, y)| (y, x),
    |(x, y)| (x, -y),
    |(x, y)| (-y, -x),
];

/// Translates cells so the minimum x and y values are both zero.
///
/// The result is sorted and free of duplicates, so two cell sets that differ
/// only by translation or listing order normalize to the same vector.
pub fn normalize(mut cells: Vec<Coord>) -> Result<Vec<Coord>, ShapeError> {
    if cells.is_empty() {
        return Err(ShapeError::Empty);
    }
    translate_to_origin(&mut cells);
    Ok(cells)
}

/// In-place normalization shared by [`normalize`] and [`transform`].
///
/// An empty vector is left untouched.
pub(crate) fn translate_to_origin(cells: &mut Vec<Coord>) {
    let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = cells.iter().map(|&(_, y)| y).min().unwrap_or(0);

    for (x, y) in cells.iter_mut() {
        *x -= min_x;
        *y -= min_y;
    }

    cells.sort_unstable();
    cells.dedup();
}

/// Applies one of the [`TRANSFORMS`] to a shape and renormalizes the result.
pub fn transform(shape: &Shape, transform_index: usize) -> Shape {
    let apply = TRANSFORMS[transform_index];
    let mut cells: Vec<Coord> = shape.cells().iter().map(|&cell| apply(cell)).collect();
    translate_to_origin(&mut cells);
    Shape::from_normalized(cells)
}

/// Generates all unique orientations of a shape.
///
/// Rotations come first, then the rotations of the mirror image. Symmetric
/// shapes produce duplicates; only the first occurrence of each is kept, so
/// the returned order is deterministic.
pub fn orientations(shape: &Shape) -> Vec<Shape> {
    let mut seen: FxHashSet<Shape> = FxHashSet::default();
    let mut unique = Vec::with_capacity(TRANSFORMS.len());

    for transform_index in 0..TRANSFORMS.len() {
        let oriented = transform(shape, transform_index);
        if seen.insert(oriented.clone()) {
            unique.push(oriented);
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(rows: &[&str]) -> Shape {
        Shape::from_pattern(rows.iter().copied()).unwrap()
    }

    #[test]
    fn test_normalize_moves_minimum_to_origin() {
        let cells = normalize(vec![(3, -2), (4, -2), (3, -1)]).unwrap();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert_eq!(normalize(Vec::new()), Err(ShapeError::Empty));
    }

    #[test]
    fn test_quarter_turn_matches_closed_form() {
        let l_piece = shape(&["#.", "#.", "##"]);
        let mut turned = l_piece.clone();
        for turns in 0..4 {
            assert_eq!(turned, transform(&l_piece, turns), "turns = {turns}");
            turned = transform(&turned, 1);
        }
        assert_eq!(turned, l_piece, "four quarter turns should be the identity");
    }

    #[test]
    fn test_quarter_turn_maps_x_y_to_y_neg_x() {
        // (0,0) (1,0) (2,0) (0,1) -> (0,0) (0,-1) (0,-2) (1,0), renormalized
        let l_piece = shape(&["###", "#.."]);
        assert_eq!(transform(&l_piece, 1), shape(&["#.", "#.", "##"]));
    }

    #[test]
    fn test_symmetric_shapes_have_one_orientation() {
        assert_eq!(orientations(&shape(&["#"])).len(), 1);
        assert_eq!(orientations(&shape(&["##", "##"])).len(), 1);
        assert_eq!(orientations(&shape(&[".#.", "###", ".#."])).len(), 1);
    }

    #[test]
    fn test_asymmetric_shape_has_eight_orientations() {
        // F pentomino
        let f_piece = shape(&[".##", "##.", ".#."]);
        assert_eq!(orientations(&f_piece).len(), 8);
    }

    #[test]
    fn test_orientation_counts_of_common_shapes() {
        assert_eq!(orientations(&shape(&["##"])).len(), 2);
        assert_eq!(orientations(&shape(&["###", ".#."])).len(), 4);
        assert_eq!(orientations(&shape(&["##.", ".##"])).len(), 4);
        assert_eq!(orientations(&shape(&["#..", "###"])).len(), 8);
    }

    #[test]
    fn test_orientations_preserve_cell_count_and_are_distinct() {
        let f_piece = shape(&[".##", "##.", ".#."]);
        let all = orientations(&f_piece);
        for (i, oriented) in all.iter().enumerate() {
            assert_eq!(oriented.cell_count(), f_piece.cell_count());
            assert!(oriented.cells().iter().all(|&(x, y)| x >= 0 && y >= 0));
            for other in &all[i + 1..] {
                assert_ne!(oriented, other);
            }
        }
    }

    #[test]
    fn test_first_orientation_is_the_shape_itself() {
        let l_piece = shape(&["#..", "###"]);
        assert_eq!(orientations(&l_piece)[0], l_piece);
    }

    #[test]
    fn test_quarter_turn_swaps_bounding_box() {
        let bar = shape(&["####"]);
        let all = orientations(&bar);
        assert_eq!(all.len(), 2);
        assert_eq!((all[0].width(), all[0].height()), (4, 1));
        assert_eq!((all[1].width(), all[1].height()), (1, 4));
    }
}
