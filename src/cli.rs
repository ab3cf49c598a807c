//! CLI argument parsing module for addrsplit
//!
//! This module handles parsing command-line arguments using the clap crate.
//! The tool has three commands:
//!
//! - `migrate` splits each student's composite address into an address table
//! - `check` reports which students have addresses that would be skipped
//! - `join` prints students joined with their migrated addresses
//!
//! Nothing is written to disk except by `migrate`, and not at all with `--dry-run`.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Command-line arguments for addrsplit
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Normalize delimited student addresses into a related address table"
)]
pub struct AddrsplitArgs {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Address segment delimiter
    ///
    /// Raw addresses hold four segments (street, city, state, zip) separated
    /// by this character. It must not be a letter, digit, '.' or whitespace.
    #[arg(short = 'F', long, global = true, help = "Address segment delimiter (default ';')")]
    pub delimiter: Option<char>,

    /// Enable verbose diagnostic output
    ///
    /// Logs every record as it is processed. `RUST_LOG` overrides this.
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split student addresses into an address table
    ///
    /// Existing rows in the address file are kept, and students that already
    /// have a row are not migrated again.
    Migrate {
        /// Student roster CSV with `student_id` and `address` columns
        students: PathBuf,

        /// Address table CSV to create or append to
        addresses: PathBuf,

        /// Report what would be migrated without writing the address file
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Validate student addresses without migrating them
    Check {
        /// Student roster CSV with `student_id` and `address` columns
        students: PathBuf,
    },

    /// Print students joined with their migrated addresses as CSV
    Join {
        /// Student roster CSV
        students: PathBuf,

        /// Address table CSV produced by `migrate`
        addresses: PathBuf,
    },
}

impl AddrsplitArgs {
    /// Whether the selected command is a dry-run migration
    pub fn dry_run(&self) -> bool {
        matches!(self.command, Command::Migrate { dry_run: true, .. })
    }
}

/// Parse command-line arguments into the AddrsplitArgs structure
///
/// # Returns
/// * `Ok(AddrsplitArgs)` - Command-line arguments successfully parsed
/// * `Err` - Error during argument parsing (handled by clap, usually results in help text display)
pub fn parse_args() -> Result<AddrsplitArgs> {
    Ok(AddrsplitArgs::parse())
}
