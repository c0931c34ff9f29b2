//! Command-line interface definition and parsing.

use clap::{Parser, Subcommand};
use ecm_core::models::{SortKey, SortOrder};
use std::path::PathBuf;

/// Command-line arguments for the energy contract valuation application.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, env = "APP_CONFIG")]
    pub config: Option<PathBuf>,

    /// What to do; serves the API if omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// The tasks the application can perform.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Serve the REST API.
    Serve,

    /// Append the price points in a JSON file to the store.
    Import {
        /// A JSON array of price points
        path: PathBuf,
    },

    /// Value the stored contracts and write the results to stdout as CSV.
    Value {
        /// The price curve to value against; the built-in curve if omitted
        #[arg(long)]
        curve_name: Option<String>,

        /// Restrict the curve to one financial year
        #[arg(long)]
        financial_year: Option<String>,

        /// Restrict the curve to one profile or scenario
        #[arg(long)]
        scenario: Option<String>,

        /// Restrict the curve to one value type
        #[arg(long)]
        value_type: Option<String>,

        /// Rank by name, total, average or volatility
        #[arg(long, value_parser = parse_sort_key)]
        sort: Option<SortKey>,

        /// Rank in ascending instead of descending order
        #[arg(long)]
        ascending: bool,
    },
}

impl Commands {
    /// The ranking direction requested by `--ascending`
    pub fn order(ascending: bool) -> SortOrder {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }
}

fn parse_sort_key(value: &str) -> Result<SortKey, String> {
    serde_json::from_value(serde_json::Value::from(value)).map_err(|err| err.to_string())
}

impl Cli {
    /// Parse command-line arguments.
    pub fn import() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_arguments() {
        let cli = Cli::try_parse_from([
            "ecmdemo",
            "value",
            "--curve-name",
            "forward",
            "--sort",
            "volatility",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Value {
                curve_name, sort, ascending, ..
            }) => {
                assert_eq!(curve_name.as_deref(), Some("forward"));
                assert_eq!(sort, Some(SortKey::Volatility));
                assert_eq!(Commands::order(ascending), SortOrder::Descending);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_sort_key() {
        assert!(Cli::try_parse_from(["ecmdemo", "value", "--sort", "vibes"]).is_err());
    }

    #[test]
    fn serves_by_default() {
        let cli = Cli::try_parse_from(["ecmdemo"]).unwrap();
        assert_eq!(cli.command, None);
    }
}
