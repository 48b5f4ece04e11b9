//! Present Packer
//!
//! Reads a puzzle file of present shapes and rectangular regions, and decides
//! for each region whether all of its required presents can be packed into
//! it. Presents may be rotated and mirrored but must not overlap.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;

use packer::error::{ParseError, RegionError};
use packer::grid::format_packing;
use packer::solver::{SearchConfig, SearchReport, Verdict};
use packer::Problem;

/// Packs polyomino presents into rectangular regions.
#[derive(Parser)]
#[command(name = "packer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count the regions whose presents all fit.
    Count {
        /// Puzzle input file.
        input: PathBuf,
        /// Give up on a region after this many placement attempts.
        #[arg(long)]
        max_nodes: Option<u64>,
        /// Print each region's verdict and node count to stderr.
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print each region's verdict and, when it fits, a packing.
    Show {
        /// Puzzle input file.
        input: PathBuf,
        /// Only show this region (0-based).
        #[arg(long)]
        region: Option<usize>,
        /// Give up on a region after this many placement attempts.
        #[arg(long)]
        max_nodes: Option<u64>,
    },
    /// Print every orientation of one shape.
    Orientations {
        /// Puzzle input file.
        input: PathBuf,
        /// Shape index.
        #[arg(long)]
        shape: usize,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: ParseError,
    },
    #[error(transparent)]
    Region(#[from] RegionError),
    #[error("no region {index}; the input has {count}")]
    NoSuchRegion { index: usize, count: usize },
    #[error("no shape {index}; the input has {count}")]
    NoSuchShape { index: usize, count: usize },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Count {
            input,
            max_nodes,
            verbose,
        } => run_count(&input, max_nodes, verbose),
        Command::Show {
            input,
            region,
            max_nodes,
        } => run_show(&input, region, max_nodes),
        Command::Orientations { input, shape } => run_orientations(&input, shape),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Reads and parses a puzzle file.
fn load(path: &Path) -> Result<Problem, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Problem::parse(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn search_config(max_nodes: Option<u64>) -> SearchConfig {
    SearchConfig {
        max_nodes,
        ..SearchConfig::default()
    }
}

/// Prints the number of feasible regions.
fn run_count(input: &Path, max_nodes: Option<u64>, verbose: bool) -> Result<(), CliError> {
    let problem = load(input)?;
    let reports = problem.reports(search_config(max_nodes))?;

    if verbose {
        for (index, report) in reports.iter().enumerate() {
            eprintln!("{}", format_search_stats(&problem, index, report));
        }
    }

    let feasible = reports.iter().filter(|r| r.verdict.fits()).count();
    println!("{feasible}");

    let undecided = reports
        .iter()
        .filter(|r| r.verdict == Verdict::Undecided)
        .count();
    if undecided > 0 {
        eprintln!("{undecided} regions left undecided by the node budget");
    }
    Ok(())
}

/// Prints verdicts and packings for one or all regions.
fn run_show(input: &Path, region: Option<usize>, max_nodes: Option<u64>) -> Result<(), CliError> {
    let problem = load(input)?;
    let reports = problem.reports(search_config(max_nodes))?;

    match region {
        Some(index) => {
            let report = reports.get(index).ok_or(CliError::NoSuchRegion {
                index,
                count: reports.len(),
            })?;
            print!("{}", format_report(&problem, index, report));
        }
        None => {
            for (index, report) in reports.iter().enumerate() {
                print!("{}", format_report(&problem, index, report));
                println!();
            }
            let feasible = reports.iter().filter(|r| r.verdict.fits()).count();
            println!("{feasible} of {} regions fit", reports.len());
        }
    }
    Ok(())
}

/// Prints the orientation set of one shape.
fn run_orientations(input: &Path, shape: usize) -> Result<(), CliError> {
    let problem = load(input)?;
    if shape >= problem.library().len() {
        return Err(CliError::NoSuchShape {
            index: shape,
            count: problem.library().len(),
        });
    }
    print!("{}", format_orientations(&problem, shape));
    Ok(())
}

fn verdict_label(verdict: &Verdict) -> &'static str {
    match verdict {
        Verdict::Fits(_) => "fits",
        Verdict::DoesNotFit => "does not fit",
        Verdict::Undecided => "undecided",
    }
}

/// Formats one region's verdict line followed by its packing, if any.
fn format_report(problem: &Problem, index: usize, report: &SearchReport) -> String {
    let region = &problem.regions()[index];
    let mut output = format!(
        "Region {index} ({}x{}): {}\n",
        region.width,
        region.height,
        verdict_label(&report.verdict)
    );
    if let Verdict::Fits(packing) = &report.verdict {
        output.push_str(&format_packing(
            region.width,
            region.height,
            problem.library(),
            packing,
        ));
    }
    output
}

/// Formats the `--verbose` line for one region: size, present count,
/// verdict and search effort.
fn format_search_stats(problem: &Problem, index: usize, report: &SearchReport) -> String {
    let region = &problem.regions()[index];
    format!(
        "region {index} ({}x{}, {} presents): {} after {} nodes",
        region.width,
        region.height,
        region.present_count(),
        verdict_label(&report.verdict),
        report.nodes
    )
}

/// Formats every orientation of a shape, separated by blank lines.
fn format_orientations(problem: &Problem, shape: usize) -> String {
    let orientations = problem.library().orientations(shape);
    let mut output = format!("Shape {shape}: {} orientations\n", orientations.len());
    for (i, oriented) in orientations.iter().enumerate() {
        output.push_str(&format!("\n{i}:\n{oriented}\n"));
    }
    output
}
