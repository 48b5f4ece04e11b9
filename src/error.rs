//! Error types for shape construction, region validation and input parsing.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised while building a shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("shape has no occupied cells")]
    Empty,
    #[error("unexpected character '{ch}' at row {row}, column {column} of shape pattern")]
    UnexpectedCell { row: usize, column: usize, ch: char },
}

/// Errors raised when a region cannot be checked against a library.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("region {width}x{height} has more cells than can be counted")]
    AreaOverflow { width: usize, height: usize },
    #[error("region {width}x{height} requires shape {index}, but only {available} shapes are defined")]
    UnknownShape {
        width: usize,
        height: usize,
        index: usize,
        available: usize,
    },
}

/// Errors raised while parsing the textual puzzle format.
///
/// Every variant carries the 1-based line number it was detected on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected '<index>:' or '<width>x<height>: <counts>', got '{text}'")]
    UnexpectedLine { line: usize, text: String },
    #[error("line {line}: shape {found} is out of order, expected shape {expected}")]
    ShapeOrder {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: shape definitions must precede all regions")]
    ShapeAfterRegion { line: usize },
    #[error("line {line}: invalid shape")]
    Shape {
        line: usize,
        #[source]
        source: ShapeError,
    },
    #[error("line {line}: could not parse number")]
    Number {
        line: usize,
        #[source]
        source: ParseIntError,
    },
    #[error("line {line}: region {width}x{height} has more cells than can be counted")]
    AreaOverflow {
        line: usize,
        width: usize,
        height: usize,
    },
    #[error("line {line}: region lists {counts} counts, but only {shapes} shapes are defined")]
    TooManyCounts {
        line: usize,
        counts: usize,
        shapes: usize,
    },
}
