//! Present Packing Library
//!
//! Decides whether sets of polyomino presents can be packed into rectangular
//! regions, allowing rotations and reflections.

pub mod error;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod pieces;
pub mod solver;

use rayon::prelude::*;

use error::{ParseError, RegionError};
use pieces::ShapeLibrary;
use solver::{Region, SearchConfig, SearchReport, Solver};

/// A shape library together with the regions to check against it.
///
/// Every region is validated against the library on construction.
#[derive(Clone, Debug)]
pub struct Problem {
    library: ShapeLibrary,
    regions: Vec<Region>,
}

impl Problem {
    pub fn new(library: ShapeLibrary, regions: Vec<Region>) -> Result<Self, RegionError> {
        for region in &regions {
            region.validate(&library)?;
        }
        Ok(Self { library, regions })
    }

    /// Parses the textual puzzle format (see [`input`]).
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let (library, regions) = input::parse(text)?;
        Ok(Self { library, regions })
    }

    pub fn library(&self) -> &ShapeLibrary {
        &self.library
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Checks every region, in parallel, returning reports in region order.
    pub fn reports(&self, config: SearchConfig) -> Result<Vec<SearchReport>, RegionError> {
        let solver = Solver::with_config(&self.library, config);
        self.regions
            .par_iter()
            .map(|region| solver.check(region))
            .collect()
    }

    /// Number of regions whose presents all fit.
    ///
    /// Undecided regions (node budget exhausted) are not counted.
    pub fn count_feasible(&self, config: SearchConfig) -> Result<usize, RegionError> {
        Ok(self
            .reports(config)?
            .iter()
            .filter(|report| report.verdict.fits())
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{Shape, REFERENCE_SHAPES};
    use crate::solver::Verdict;

    #[test]
    fn test_reference_count() {
        let problem = Problem::parse(input::REFERENCE_INPUT).unwrap();
        assert_eq!(problem.count_feasible(SearchConfig::default()).unwrap(), 2);
    }

    #[test]
    fn test_reports_keep_region_order() {
        let problem = Problem::parse(input::REFERENCE_INPUT).unwrap();
        let fits: Vec<bool> = problem
            .reports(SearchConfig::default())
            .unwrap()
            .iter()
            .map(|report| report.verdict.fits())
            .collect();
        assert_eq!(fits, vec![true, true, false]);
    }

    #[test]
    fn test_budget_applies_to_every_region() {
        let problem = Problem::parse(input::REFERENCE_INPUT).unwrap();
        let config = SearchConfig {
            max_nodes: Some(0),
            ..SearchConfig::default()
        };
        let reports = problem.reports(config).unwrap();
        assert!(reports
            .iter()
            .all(|report| report.verdict == Verdict::Undecided));
        assert_eq!(problem.count_feasible(config).unwrap(), 0);
    }

    #[test]
    fn test_new_rejects_unknown_shapes() {
        let library = ShapeLibrary::from_patterns(REFERENCE_SHAPES).unwrap();
        let regions = vec![
            Region::new(4, 4, vec![0, 0, 0, 0, 2, 0]),
            Region::new(4, 4, vec![0, 0, 0, 0, 0, 0, 1]),
        ];
        assert_eq!(
            Problem::new(library, regions).unwrap_err(),
            RegionError::UnknownShape {
                width: 4,
                height: 4,
                index: 6,
                available: 6
            }
        );
    }

    #[test]
    fn test_oversized_requirements_count_as_infeasible() {
        let problem = Problem::parse("0:\n##\n\n1x1: 18446744073709551615\n2x1: 1\n").unwrap();
        assert_eq!(problem.count_feasible(SearchConfig::default()).unwrap(), 1);

        let library = ShapeLibrary::new(vec![Shape::new([(0, 0)]).unwrap()]);
        assert_eq!(
            Problem::new(library, vec![Region::new(usize::MAX, 2, vec![1])]).unwrap_err(),
            RegionError::AreaOverflow {
                width: usize::MAX,
                height: 2
            }
        );
    }

    #[test]
    fn test_single_cell_pair_fits_4x4() {
        let library = ShapeLibrary::new(vec![Shape::new([(0, 0)]).unwrap()]);
        let problem = Problem::new(library, vec![Region::new(4, 4, vec![2])]).unwrap();
        assert_eq!(problem.count_feasible(SearchConfig::default()).unwrap(), 1);
    }
}
