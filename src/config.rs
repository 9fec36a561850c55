//! Configuration management for the puzzle checker.
//!
//! Handles:
//! - Command-line argument parsing
//! - Family descriptor directory configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Command-line arguments for the puzzle checker
#[derive(Debug, Parser)]
#[command(name = "puzzle-check")]
#[command(about = "Checks logic-puzzle definition files against their solved grids")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Custom family descriptor directory to search
    #[arg(long, help = "Directory containing family descriptor TOML files")]
    pub family_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate every definition/result pair found in a directory
    Check {
        /// Puzzle family to check against
        #[arg(long, help = "Family name (e.g. 'sudoku', 'takuzu', 'nonogram')")]
        family: String,

        /// Directory holding the definition and result files
        directory: PathBuf,
    },
    /// Generate a random nonogram definition document
    Generate {
        /// Grid size (the instance is size x size)
        #[arg(long, default_value_t = 10)]
        size: usize,

        /// Also write the matching result grid next to the definition
        #[arg(long)]
        with_result: bool,

        /// Definition file to write (e.g. nonogram/generated.json)
        output: PathBuf,
    },
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Custom family descriptor directories to search
    pub family_dirs: Vec<PathBuf>,
}

impl Config {
    /// Create configuration from parsed arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        // Determine family descriptor directories
        let mut family_dirs = Vec::new();

        // Add user-specified directory if provided
        if let Some(custom_dir) = &args.family_dir {
            family_dirs.push(custom_dir.clone());
        }

        // Add default user config directory
        if let Some(config_dir) = dirs::config_dir() {
            family_dirs.push(config_dir.join("puzzle-check").join("families"));
        }

        Ok(Config { family_dirs })
    }
}
