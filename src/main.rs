//! addrsplit - normalize delimited student addresses
//!
//! This tool reads a student roster CSV whose `address` column holds
//! `street;city;state;zip`, and writes each valid address as its own row in
//! a separate address table keyed back to the student.
//!
//! # Program Flow
//!
//! 1. Parse command-line arguments and build the configuration
//! 2. Install logging (stderr, `RUST_LOG` or `-v`)
//! 3. Run the selected command against the CSV files
//! 4. Print results to stdout; save the address table unless it is a dry run

use std::io;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use addrsplit::cli::{self, Command};
use addrsplit::config::AppConfig;
use addrsplit::csv_handler::{CsvAddressStore, CsvStudentSource};
use addrsplit::join::join_addresses;
use addrsplit::migrator::Migrator;
use addrsplit::store::StudentSource;

fn main() -> Result<()> {
    let args = cli::parse_args()?;
    let config = AppConfig::new(args.verbose, args.delimiter, args.dry_run());

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level()))
        .context("Failed to build log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let validator = config
        .validator()
        .context("Failed to build address validator")?;

    match args.command {
        Command::Migrate {
            students,
            addresses,
            ..
        } => {
            let source = CsvStudentSource::new(&students);
            let mut store = CsvAddressStore::open(&addresses)
                .with_context(|| format!("Failed to open address table: {}", addresses.display()))?;

            let report = Migrator::new(validator)
                .migrate(&source, &mut store)
                .context("Migration failed")?;
            print!("{report}");

            if config.dry_run() {
                info!("dry run, address table not written");
            } else if store.is_modified() || !addresses.exists() {
                store
                    .save()
                    .with_context(|| format!("Failed to save address table: {}", addresses.display()))?;
                info!(path = %store.path().display(), rows = store.store().len(), "address table saved");
            }
        }

        Command::Check { students } => {
            let source = CsvStudentSource::new(&students);
            let batch = source
                .students()
                .with_context(|| format!("Failed to load students: {}", source.path().display()))?;

            for row in &batch.rejected {
                println!("invalid student_id: {} ({})", row.student_id, row.reason);
            }
            let mut invalid = batch.rejected.len();
            for student in &batch.records {
                if !validator.is_valid(&student.address) {
                    println!("invalid student_id: {}", student.student_id);
                    invalid += 1;
                }
            }
            println!("valid: {}", batch.records.len() + batch.rejected.len() - invalid);
            println!("invalid: {invalid}");
        }

        Command::Join {
            students,
            addresses,
        } => {
            let batch = CsvStudentSource::new(&students)
                .students()
                .context("Failed to load students")?;
            let store = CsvAddressStore::open(&addresses)
                .with_context(|| format!("Failed to open address table: {}", addresses.display()))?;

            let mut writer = csv::Writer::from_writer(io::stdout());
            for row in join_addresses(&batch.records, store.store().records()) {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}
