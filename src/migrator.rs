//! Address migration
//!
//! Reads every student, validates and parses the composite address, and
//! writes one normalized address row per valid student. Malformed
//! addresses are recorded and skipped; only an unreadable source or a
//! rejected write stops the batch.
//!
//! Re-runs are guarded: students that already have a row in the
//! destination are reported as already migrated and left alone, so running
//! the migration twice over the same roster inserts nothing the second time.

use std::fmt;

use tracing::{debug, info, warn};

use crate::address::{parse_with, NewAddress};
use crate::error::AddrResult;
use crate::store::{AddressSink, StudentSource};
use crate::validator::AddressValidator;

/// Outcome of a migration batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Number of address rows written
    pub inserted: usize,
    /// Students whose row could not be read, or whose address failed validation or parsing
    pub skipped: Vec<String>,
    /// Students that already had an address in the destination
    pub already_migrated: Vec<String>,
}

impl MigrationReport {
    /// Records that went through validation (inserted or skipped)
    pub fn processed(&self) -> usize {
        self.inserted + self.skipped.len()
    }

    /// Every record read from the source
    pub fn total(&self) -> usize {
        self.processed() + self.already_migrated.len()
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "inserted: {}", self.inserted)?;
        writeln!(f, "skipped: {}", self.skipped.len())?;
        writeln!(f, "already migrated: {}", self.already_migrated.len())?;
        for student_id in &self.skipped {
            writeln!(f, "skipped student_id: {student_id}")?;
        }
        Ok(())
    }
}

/// Runs the validate-parse-insert pass over a student source
#[derive(Debug, Clone, Default)]
pub struct Migrator {
    validator: AddressValidator,
}

impl Migrator {
    /// Create a migrator using the given validator and its delimiter
    pub fn new(validator: AddressValidator) -> Self {
        Migrator { validator }
    }

    /// Migrate every student address from `source` into `sink`
    ///
    /// # Arguments
    /// * `source` - Student records to read
    /// * `sink` - Destination address table
    ///
    /// # Returns
    /// * `Ok(MigrationReport)` - Counts of inserted rows and skipped student ids
    /// * `Err` - If the source cannot be read or the sink rejects a write;
    ///   rows inserted before a failed write remain in the sink
    pub fn migrate<S, K>(&self, source: &S, sink: &mut K) -> AddrResult<MigrationReport>
    where
        S: StudentSource + ?Sized,
        K: AddressSink + ?Sized,
    {
        let batch = source.students()?;
        let delimiter = self.validator.delimiter();
        let mut report = MigrationReport::default();

        info!(
            records = batch.records.len(),
            rejected = batch.rejected.len(),
            "starting address migration"
        );

        for row in batch.rejected {
            warn!(
                student_id = %row.student_id,
                reason = %row.reason,
                "roster row could not be read, skipping"
            );
            report.skipped.push(row.student_id);
        }

        for student in batch.records {
            if sink.contains_student(&student.student_id) {
                debug!(student_id = %student.student_id, "already migrated");
                report.already_migrated.push(student.student_id);
                continue;
            }

            if !self.validator.is_valid(&student.address) {
                warn!(
                    student_id = %student.student_id,
                    address = %student.address,
                    "address does not match pattern, skipping"
                );
                report.skipped.push(student.student_id);
                continue;
            }

            let address = match parse_with(&student.address, delimiter) {
                Ok(address) => address,
                Err(e) if e.is_per_record() => {
                    // Validator and parser disagree
                    warn!(
                        student_id = %student.student_id,
                        error = %e,
                        "validated address failed to parse"
                    );
                    report.skipped.push(student.student_id);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let id = sink.insert(NewAddress {
                student_id: student.student_id.clone(),
                address,
            })?;
            debug!(student_id = %student.student_id, id, "inserted address");
            report.inserted += 1;
        }

        info!(
            inserted = report.inserted,
            skipped = report.skipped.len(),
            already_migrated = report.already_migrated.len(),
            "address migration finished"
        );

        Ok(report)
    }
}

/// Migrate with the default `;` delimiter
pub fn migrate<S, K>(source: &S, sink: &mut K) -> AddrResult<MigrationReport>
where
    S: StudentSource + ?Sized,
    K: AddressSink + ?Sized,
{
    Migrator::default().migrate(source, sink)
}
