//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Query a DCTrack inventory from the command line
#[derive(Parser, Debug)]
#[command(name = "dctrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML); defaults to DCTRACK_* environment variables
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Give up after this many seconds
    #[arg(
        short,
        long,
        global = true,
        default_value = "30",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Log in and report whether the credentials work
    Check,

    /// Free-text search for items
    Search {
        /// Text to search for
        query: String,

        /// Items to print in text mode (0 = all)
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// List installed items at a location with a vendor breakdown
    List {
        /// Location name
        location: String,
    },

    /// Show one item in detail
    Item {
        /// Item ID
        id: String,
    },

    /// Power statistics for installed items at a location
    Power {
        /// Location name
        location: String,
    },
}

impl Commands {
    /// Subcommand name as typed
    pub fn name(&self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Search { .. } => "search",
            Self::List { .. } => "list",
            Self::Item { .. } => "item",
            Self::Power { .. } => "power",
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Human-readable text
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from(["dctrack", "search", "PowerEdge", "--limit", "5"]);
        assert_eq!(
            cli.command,
            Commands::Search {
                query: "PowerEdge".to_string(),
                limit: 5
            }
        );
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.timeout, 30);
        assert!(!cli.verbose);
        assert_eq!(cli.command.name(), "search");
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "dctrack", "power", "RDU2", "--format", "json", "-v", "--timeout", "90",
        ]);
        assert_eq!(
            cli.command,
            Commands::Power {
                location: "RDU2".to_string()
            }
        );
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.timeout, 90);
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_config_path() {
        let cli = Cli::parse_from(["dctrack", "--config", "dctrack.yaml", "item", "12345"]);
        assert_eq!(cli.config, Some(PathBuf::from("dctrack.yaml")));
        assert_eq!(
            cli.command,
            Commands::Item {
                id: "12345".to_string()
            }
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Cli::try_parse_from(["dctrack", "--timeout", "0", "check"]).is_err());
        let cli = Cli::parse_from(["dctrack", "--timeout", "1", "check"]);
        assert_eq!(cli.timeout, 1);
    }

    #[test]
    fn test_missing_subcommand_rejected() {
        assert!(Cli::try_parse_from(["dctrack"]).is_err());
    }
}
