//! Configuration module for addrsplit
//!
//! This module provides a centralized configuration structure for the application.
//! It is built once from the command line and passed to the components that
//! need it, rather than threading individual flags through every call.

use crate::error::AddrResult;
use crate::validator::{AddressValidator, DEFAULT_DELIMITER};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Whether to show verbose output
    verbose: bool,

    /// Character separating the segments of a raw address
    delimiter: char,

    /// Whether to skip writing the address file
    dry_run: bool,
}

impl AppConfig {
    /// Create a new application configuration
    ///
    /// # Arguments
    /// * `verbose` - Whether to show verbose output
    /// * `delimiter` - Address segment delimiter from the command line, if any
    /// * `dry_run` - Whether to report without writing
    pub fn new(verbose: bool, delimiter: Option<char>, dry_run: bool) -> Self {
        Self {
            verbose,
            delimiter: delimiter.unwrap_or(DEFAULT_DELIMITER),
            dry_run,
        }
    }

    /// Get the verbose flag
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Get whether this is a dry run
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Default log filter directive when `RUST_LOG` is unset
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }

    /// Build the address validator for the configured delimiter
    pub fn validator(&self) -> AddrResult<AddressValidator> {
        AddressValidator::new(self.delimiter)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(false, None, false)
    }
}
