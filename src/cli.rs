// src/cli.rs
// DOCUMENTATION: Command-line arguments
// PURPOSE: Parse flags; missing search inputs switch to the interactive form

use crate::handlers::ExportMode;
use clap::Parser;
use std::path::PathBuf;

/// Search businesses near a city and export them as CSV.
///
/// Without --city and --category an interactive form asks for the inputs.
#[derive(Parser, Debug)]
#[command(name = "places-finder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// City or address to search around
    #[arg(long)]
    pub city: Option<String>,

    /// Business category (provider place type), e.g. restaurant, pharmacy
    #[arg(long)]
    pub category: Option<String>,

    /// Search radius in meters (100-50000)
    #[arg(long, value_parser = clap::value_parser!(u32).range(100..=50000))]
    pub radius: Option<u32>,

    /// CSV file to write (defaults to EXPORT_PATH)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export without asking
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Never export
    #[arg(long, conflicts_with = "yes")]
    pub no_export: bool,

    /// Display a previously exported CSV file and exit
    #[arg(long, value_name = "CSV", conflicts_with_all = ["city", "category"])]
    pub show: Option<PathBuf>,
}

impl Cli {
    /// Both search inputs were given as flags
    pub fn is_batch(&self) -> bool {
        self.city.is_some() && self.category.is_some()
    }

    pub fn export_mode(&self) -> ExportMode {
        if self.no_export {
            ExportMode::Never
        } else if self.yes || self.output.is_some() {
            ExportMode::Always
        } else {
            ExportMode::Ask
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("places-finder").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_radius_boundaries() {
        assert_eq!(parse(&["--radius", "100"]).unwrap().radius, Some(100));
        assert_eq!(parse(&["--radius", "50000"]).unwrap().radius, Some(50_000));
        assert!(parse(&["--radius", "99"]).is_err());
        assert!(parse(&["--radius", "50001"]).is_err());
    }

    #[test]
    fn test_batch_mode_needs_both_inputs() {
        assert!(parse(&["--city", "Lyon", "--category", "bakery"]).unwrap().is_batch());
        assert!(!parse(&["--city", "Lyon"]).unwrap().is_batch());
    }

    #[test]
    fn test_export_mode() {
        assert_eq!(parse(&[]).unwrap().export_mode(), ExportMode::Ask);
        assert_eq!(parse(&["-y"]).unwrap().export_mode(), ExportMode::Always);
        assert_eq!(parse(&["-o", "out.csv"]).unwrap().export_mode(), ExportMode::Always);
        assert_eq!(parse(&["--no-export"]).unwrap().export_mode(), ExportMode::Never);
        assert!(parse(&["--no-export", "--yes"]).is_err());
    }

    #[test]
    fn test_show_conflicts_with_search() {
        assert!(parse(&["--show", "commerces.csv"]).unwrap().show.is_some());
        assert!(parse(&["--show", "commerces.csv", "--city", "Lyon"]).is_err());
    }
}
