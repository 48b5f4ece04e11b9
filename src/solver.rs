//! Backtracking region feasibility engine.
//!
//! Presents are expanded from the region's counts and sorted by shape index.
//! Each one tries every orientation at every row-major position, descending
//! after each valid placement and undoing it on failure. The descent keeps
//! an explicit stack of frames, one per placed present, so region size never
//! bounds the call stack.
//!
//! Pruning:
//! - Area: more required cells than the region holds fails without search
//! - Identical presents: a present of the same shape as its predecessor only
//!   tries positions at or after the predecessor's, so permutations of
//!   indistinguishable pieces are explored once
//! - Unreachable cells: a branch fails when the free cells that some still
//!   unplaced shape could cover are fewer than the cells still required
//!
//! All valid placements of each shape are precomputed once per check, along
//! with a per-cell index of the placements covering that cell.

use std::ops::Range;

use crate::error::RegionError;
use crate::grid::Grid;
use crate::pieces::{PlacedPiece, ShapeLibrary};

/// A rectangle together with the required count of each shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub width: usize,
    pub height: usize,
    /// Required count per shape index; missing trailing entries mean zero.
    pub counts: Vec<usize>,
}

impl Region {
    pub fn new(width: usize, height: usize, counts: Vec<usize>) -> Self {
        Self {
            width,
            height,
            counts,
        }
    }

    /// Number of cells in the rectangle, or `None` if it overflows `usize`.
    pub fn area(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Total number of presents required, saturating at `usize::MAX`.
    pub fn present_count(&self) -> usize {
        self.counts.iter().fold(0, |total, &count| total.saturating_add(count))
    }

    /// Rejects regions whose area overflows and regions requiring a shape
    /// the library does not define.
    ///
    /// Zero counts past the end of the library are accepted.
    pub fn validate(&self, library: &ShapeLibrary) -> Result<(), RegionError> {
        if self.area().is_none() {
            return Err(RegionError::AreaOverflow {
                width: self.width,
                height: self.height,
            });
        }

        match self
            .counts
            .iter()
            .enumerate()
            .skip(library.len())
            .find(|&(_, &count)| count > 0)
        {
            Some((index, _)) => Err(RegionError::UnknownShape {
                width: self.width,
                height: self.height,
                index,
                available: library.len(),
            }),
            None => Ok(()),
        }
    }

    /// Sum of the cell counts of all required presents, saturating at
    /// `usize::MAX`.
    ///
    /// Unknown shapes contribute nothing; call [`Region::validate`] first.
    pub fn required_cells(&self, library: &ShapeLibrary) -> usize {
        self.counts
            .iter()
            .enumerate()
            .filter_map(|(index, &count)| {
                library.shape(index).map(|s| s.cell_count().saturating_mul(count))
            })
            .fold(0, usize::saturating_add)
    }
}

/// Tuning for a single region search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of placement attempts before giving up, if any.
    pub max_nodes: Option<u64>,
    /// Enables unreachable-cell pruning. Never changes a verdict.
    pub prune_unreachable: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_nodes: None,
            prune_unreachable: true,
        }
    }
}

/// Outcome of a region check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Every present fits; the packing lists them in present order.
    Fits(Vec<PlacedPiece>),
    /// The search space was exhausted without a packing.
    DoesNotFit,
    /// The node budget ran out before the search finished.
    Undecided,
}

impl Verdict {
    #[inline]
    pub fn fits(&self) -> bool {
        matches!(self, Verdict::Fits(_))
    }
}

/// A verdict together with the number of placement attempts it took.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub verdict: Verdict,
    pub nodes: u64,
}

/// One in-bounds translation of one orientation.
struct Placement {
    /// Row-major index of the top-left anchor, used for ordering identical presents.
    anchor: usize,
    x: usize,
    y: usize,
    orientation_index: usize,
    cells: Vec<usize>,
}

/// Every valid placement of one shape in one region.
#[derive(Default)]
struct ShapePlacements {
    /// Ordered orientation-major, then row-major by anchor.
    placements: Vec<Placement>,
    /// The span of `placements` holding each orientation.
    orientations: Vec<Range<usize>>,
    /// Per cell, the indices of the placements covering it.
    covering: Vec<Vec<usize>>,
}

/// Builds placements for the shapes a region actually uses.
fn build_placement_table(
    library: &ShapeLibrary,
    region: &Region,
    grid: &Grid,
) -> Vec<ShapePlacements> {
    let mut table = Vec::with_capacity(library.len());

    for shape_index in 0..library.len() {
        let required = region.counts.get(shape_index).copied().unwrap_or(0);
        let mut shape = ShapePlacements::default();

        if required > 0 {
            let orientations = library.orientations(shape_index);
            for (orientation_index, oriented) in orientations.iter().enumerate() {
                let start = shape.placements.len();
                for y in 0..grid.height() {
                    for x in 0..grid.width() {
                        if let Some(cells) = grid.cell_indices(oriented, x, y) {
                            shape.placements.push(Placement {
                                anchor: grid.index(x, y),
                                x,
                                y,
                                orientation_index,
                                cells,
                            });
                        }
                    }
                }
                shape.orientations.push(start..shape.placements.len());
            }

            shape.covering = vec![Vec::new(); grid.area()];
            for (placement_index, placement) in shape.placements.iter().enumerate() {
                for &cell in &placement.cells {
                    shape.covering[cell].push(placement_index);
                }
            }
        }

        table.push(shape);
    }

    table
}

/// A required copy of one shape.
#[derive(Clone, Copy, Debug)]
struct Present {
    shape_index: usize,
    cell_count: usize,
}

/// Expands counts into presents sorted by shape index.
fn expand_presents(region: &Region, library: &ShapeLibrary) -> Vec<Present> {
    region
        .counts
        .iter()
        .enumerate()
        .filter_map(|(shape_index, &count)| {
            library.shape(shape_index).map(|shape| (shape_index, shape.cell_count(), count))
        })
        .flat_map(|(shape_index, cell_count, count)| {
            std::iter::repeat(Present {
                shape_index,
                cell_count,
            })
            .take(count)
        })
        .collect()
}

/// Result of a search.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Step {
    Found,
    Exhausted,
    Aborted,
}

/// Result of advancing one frame to its next placement.
enum Advance {
    Placed(usize),
    Exhausted,
    Aborted,
}

/// Search position of one present on the frame stack.
struct Frame {
    /// Lowest anchor this present may use.
    min_anchor: usize,
    orientation: usize,
    /// Next placement to try within the current orientation, once located.
    cursor: Option<usize>,
    /// Placement currently filled into the grid for this present.
    committed: Option<usize>,
}

impl Frame {
    fn new(min_anchor: usize) -> Self {
        Self {
            min_anchor,
            orientation: 0,
            cursor: None,
            committed: None,
        }
    }
}

/// Mutable state of one region check.
struct Search<'t> {
    table: &'t [ShapePlacements],
    presents: &'t [Present],
    /// Distinct shape indices of `presents`, in order.
    distinct_shapes: Vec<usize>,
    /// Per depth, the position in `distinct_shapes` of that present's shape.
    /// The shapes still pending at a depth are the tail from there.
    first_pending: Vec<usize>,
    config: SearchConfig,
    grid: Grid,
    placed: Vec<PlacedPiece>,
    nodes: u64,
}

impl<'t> Search<'t> {
    fn new(
        table: &'t [ShapePlacements],
        presents: &'t [Present],
        grid: Grid,
        config: SearchConfig,
    ) -> Self {
        // presents are sorted, so each shape forms one contiguous run
        let mut distinct_shapes: Vec<usize> = Vec::new();
        let mut first_pending = Vec::with_capacity(presents.len());
        for present in presents {
            if distinct_shapes.last() != Some(&present.shape_index) {
                distinct_shapes.push(present.shape_index);
            }
            first_pending.push(distinct_shapes.len() - 1);
        }

        Self {
            table,
            presents,
            distinct_shapes,
            first_pending,
            config,
            grid,
            placed: Vec::with_capacity(presents.len()),
            nodes: 0,
        }
    }

    /// Places every present, or exhausts the search space.
    fn run(&mut self, required_cells: usize) -> Step {
        let table = self.table;
        let mut frames: Vec<Frame> = Vec::with_capacity(self.presents.len());
        let mut remaining_cells = required_cells;
        let mut entering = Some(0);

        loop {
            if let Some(min_anchor) = entering.take() {
                let depth = frames.len();
                if depth == self.presents.len() {
                    return Step::Found;
                }
                if !self.config.prune_unreachable
                    || self.enough_coverable_cells(depth, remaining_cells)
                {
                    frames.push(Frame::new(min_anchor));
                }
            }

            let Some(depth) = frames.len().checked_sub(1) else {
                return Step::Exhausted;
            };
            let present = self.presents[depth];
            let shape = &table[present.shape_index];
            let frame = &mut frames[depth];

            if let Some(index) = frame.committed.take() {
                self.grid.clear(&shape.placements[index].cells);
                self.placed.pop();
                remaining_cells += present.cell_count;
            }

            match self.advance(shape, frame) {
                Advance::Placed(index) => {
                    let placement = &shape.placements[index];
                    self.grid.fill(&placement.cells);
                    self.placed.push(PlacedPiece {
                        shape_index: present.shape_index,
                        orientation_index: placement.orientation_index,
                        x: placement.x,
                        y: placement.y,
                    });
                    remaining_cells -= present.cell_count;
                    frame.committed = Some(index);

                    let next_is_identical = self
                        .presents
                        .get(depth + 1)
                        .is_some_and(|next| next.shape_index == present.shape_index);
                    entering = Some(if next_is_identical { placement.anchor } else { 0 });
                }
                Advance::Exhausted => {
                    frames.pop();
                }
                Advance::Aborted => return Step::Aborted,
            }
        }
    }

    /// Moves `frame` to its next free placement at or after its lower bound.
    ///
    /// Every placement examined counts as one node against the budget.
    fn advance(&mut self, shape: &ShapePlacements, frame: &mut Frame) -> Advance {
        while let Some(span) = shape.orientations.get(frame.orientation) {
            let mut cursor = frame.cursor.unwrap_or_else(|| {
                let run = &shape.placements[span.clone()];
                span.start + run.partition_point(|p| p.anchor < frame.min_anchor)
            });

            while cursor < span.end {
                if self.config.max_nodes.is_some_and(|max| self.nodes >= max) {
                    frame.cursor = Some(cursor);
                    return Advance::Aborted;
                }
                self.nodes += 1;

                let index = cursor;
                cursor += 1;
                if self.grid.is_free(&shape.placements[index].cells) {
                    frame.cursor = Some(cursor);
                    return Advance::Placed(index);
                }
            }

            frame.orientation += 1;
            frame.cursor = None;
        }

        Advance::Exhausted
    }

    /// Returns whether enough free cells can still be covered by some pending
    /// shape to hold `remaining_cells`.
    ///
    /// Stops counting unreachable cells as soon as the slack is used up.
    fn enough_coverable_cells(&self, depth: usize, remaining_cells: usize) -> bool {
        let free = self.grid.free_count();
        if free < remaining_cells {
            return false;
        }
        let slack = free - remaining_cells;
        let pending = &self.distinct_shapes[self.first_pending[depth]..];
        let mut unreachable = 0;

        for cell in 0..self.grid.area() {
            if self.grid.is_occupied(cell) {
                continue;
            }
            let coverable = pending.iter().any(|&shape_index| {
                let shape = &self.table[shape_index];
                shape.covering[cell]
                    .iter()
                    .any(|&p| self.grid.is_free(&shape.placements[p].cells))
            });
            if !coverable {
                unreachable += 1;
                if unreachable > slack {
                    return false;
                }
            }
        }

        true
    }
}

/// Region feasibility checker over a fixed shape library.
pub struct Solver<'a> {
    library: &'a ShapeLibrary,
    config: SearchConfig,
}

impl<'a> Solver<'a> {
    /// Creates an exhaustive solver with unreachable-cell pruning enabled.
    pub fn new(library: &'a ShapeLibrary) -> Self {
        Self::with_config(library, SearchConfig::default())
    }

    pub fn with_config(library: &'a ShapeLibrary, config: SearchConfig) -> Self {
        Self { library, config }
    }

    /// Returns whether every required present fits into the region.
    ///
    /// With a node budget configured, an undecided search counts as not fitting.
    pub fn fits(&self, region: &Region) -> Result<bool, RegionError> {
        Ok(self.check(region)?.verdict.fits())
    }

    /// Searches for a packing of the region's presents.
    pub fn check(&self, region: &Region) -> Result<SearchReport, RegionError> {
        region.validate(self.library)?;

        let required = region.required_cells(self.library);
        if region.area().map_or(true, |area| required > area) {
            return Ok(SearchReport {
                verdict: Verdict::DoesNotFit,
                nodes: 0,
            });
        }

        let presents = expand_presents(region, self.library);
        if presents.is_empty() {
            return Ok(SearchReport {
                verdict: Verdict::Fits(Vec::new()),
                nodes: 0,
            });
        }

        let grid = Grid::new(region.width, region.height);
        let table = build_placement_table(self.library, region, &grid);
        let mut search = Search::new(&table, &presents, grid, self.config);

        let verdict = match search.run(required) {
            Step::Found => Verdict::Fits(std::mem::take(&mut search.placed)),
            Step::Exhausted => Verdict::DoesNotFit,
            Step::Aborted => Verdict::Undecided,
        };

        Ok(SearchReport {
            verdict,
            nodes: search.nodes,
        })
    }
}
