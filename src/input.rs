//! Parser for the textual puzzle format.
//!
//! ```text
//! 0:
//! ###
//! ##.
//! ##.
//!
//! 4x4: 0 0 0 0 2 0
//! ```
//!
//! Shape blocks come first: a `<index>:` header followed by `#`/`.` rows.
//! Indices must count up from 0. Each region line is `<width>x<height>:`
//! followed by whitespace-separated counts, one per shape; trailing counts
//! may be omitted and default to zero.

use crate::error::ParseError;
use crate::pieces::{Shape, ShapeLibrary};
use crate::solver::Region;

/// The example puzzle: six shapes and three regions, two of which fit.
pub const REFERENCE_INPUT: &str = "\
0:
###
##.
##.

1:
###
##.
.##

2:
.##
###
##.

3:
##.
###
##.

4:
###
#..
###

5:
###
.#.
###

4x4: 0 0 0 0 2 0
12x5: 1 0 1 0 2 2
12x5: 1 0 1 0 3 2
";

/// A line of input, classified by its `:`-separated prefix.
enum Line<'a> {
    Blank,
    ShapeHeader(&'a str),
    Region { size: &'a str, counts: &'a str },
    Other,
}

fn classify(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }
    match line.split_once(':') {
        Some((size, counts)) if size.contains('x') => Line::Region { size, counts },
        Some((index, rest)) if rest.trim().is_empty() => Line::ShapeHeader(index),
        _ => Line::Other,
    }
}

fn parse_number(line: usize, text: &str) -> Result<usize, ParseError> {
    text.trim()
        .parse()
        .map_err(|source| ParseError::Number { line, source })
}

fn parse_region(
    line: usize,
    size: &str,
    counts: &str,
    shapes: usize,
) -> Result<Region, ParseError> {
    let Some((width, height)) = size.split_once('x') else {
        return Err(ParseError::UnexpectedLine {
            line,
            text: size.to_string(),
        });
    };
    let width = parse_number(line, width)?;
    let height = parse_number(line, height)?;
    if width.checked_mul(height).is_none() {
        return Err(ParseError::AreaOverflow {
            line,
            width,
            height,
        });
    }

    let counts = counts
        .split_whitespace()
        .map(|count| parse_number(line, count))
        .collect::<Result<Vec<_>, _>>()?;
    if counts.len() > shapes {
        return Err(ParseError::TooManyCounts {
            line,
            counts: counts.len(),
            shapes,
        });
    }

    Ok(Region::new(width, height, counts))
}

/// Parses shape definitions and regions.
pub fn parse(input: &str) -> Result<(ShapeLibrary, Vec<Region>), ParseError> {
    let mut shapes = Vec::new();
    let mut regions = Vec::new();
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text.trim()))
        .peekable();

    while let Some((line, text)) = lines.next() {
        match classify(text) {
            Line::Blank => {}
            Line::Region { size, counts } => {
                regions.push(parse_region(line, size, counts, shapes.len())?);
            }
            Line::ShapeHeader(index) => {
                if !regions.is_empty() {
                    return Err(ParseError::ShapeAfterRegion { line });
                }
                let found = parse_number(line, index)?;
                if found != shapes.len() {
                    return Err(ParseError::ShapeOrder {
                        line,
                        expected: shapes.len(),
                        found,
                    });
                }

                // rows run until a blank line or the next header/region
                let mut rows = Vec::new();
                while let Some(&(_, row)) = lines.peek() {
                    if row.is_empty() || row.contains(':') {
                        break;
                    }
                    rows.push(row);
                    lines.next();
                }

                let shape = Shape::from_pattern(rows)
                    .map_err(|source| ParseError::Shape { line, source })?;
                shapes.push(shape);
            }
            Line::Other => {
                return Err(ParseError::UnexpectedLine {
                    line,
                    text: text.to_string(),
                });
            }
        }
    }

    Ok((ShapeLibrary::new(shapes), regions))
}
