//! CSV file handling module for addrsplit
//!
//! This module connects the migration to files on disk:
//!
//! - [`CsvStudentSource`] reads the student roster from a CSV file with a header row
//! - [`CsvAddressStore`] loads an existing address table (if any), accepts new rows,
//!   and writes the whole table back
//!
//! The module uses buffered I/O and serde-based record (de)serialization.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tempfile::NamedTempFile;

use crate::address::{AddressRecord, NewAddress};
use crate::error::{AddrError, AddrResult};
use crate::store::{AddressSink, AddressStore, RejectedRow, StudentBatch, StudentSource};
use crate::student::StudentRecord;

/// Student roster backed by a CSV file
///
/// The header row must name a `student_id` (or `id`) column and an
/// `address` column. Other roster columns are optional. A row that cannot be
/// decoded (wrong field count, bad encoding) is reported as rejected and the
/// rest of the roster is still read.
#[derive(Debug, Clone)]
pub struct CsvStudentSource {
    path: PathBuf,
}

impl CsvStudentSource {
    /// Create a source reading from the given path
    ///
    /// The file is not opened until [`StudentSource::students`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvStudentSource { path: path.into() }
    }

    /// Path of the roster file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> AddrResult<StudentBatch> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        // Field counts are checked per row so one ragged row cannot end the read
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let (headers, id_index) = student_headers(csv_reader.headers()?)?;

        let mut batch = StudentBatch::default();
        for result in csv_reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
                Err(e) => {
                    let line = e.position().map_or(0, |p| p.line());
                    batch.rejected.push(RejectedRow {
                        student_id: format!("line {line}"),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if record.len() != headers.len() {
                batch.rejected.push(RejectedRow {
                    student_id: row_student_id(&record, id_index),
                    reason: format!(
                        "found {} fields, but the header has {}",
                        record.len(),
                        headers.len()
                    ),
                });
                continue;
            }

            match record.deserialize::<StudentRecord>(Some(&headers)) {
                Ok(student) => batch.records.push(student),
                Err(e) => batch.rejected.push(RejectedRow {
                    student_id: row_student_id(&record, id_index),
                    reason: e.to_string(),
                }),
            }
        }

        Ok(batch)
    }
}

/// Check the roster header and pick the student id column
///
/// `student_id` wins over `id` when both are present; the `id` column is
/// then renamed so it is ignored during deserialization.
fn student_headers(raw: &StringRecord) -> AddrResult<(StringRecord, usize)> {
    let find = |name: &str| raw.iter().position(|h| h == name);

    if find("address").is_none() {
        return Err(AddrError::SourceReadError(
            "header has no `address` column".to_string(),
        ));
    }

    match (find("student_id"), find("id")) {
        (Some(index), Some(_)) => {
            let headers = raw
                .iter()
                .map(|h| if h == "id" { "_id" } else { h })
                .collect();
            Ok((headers, index))
        }
        (Some(index), None) | (None, Some(index)) => Ok((raw.clone(), index)),
        (None, None) => Err(AddrError::SourceReadError(
            "header has no `student_id` or `id` column".to_string(),
        )),
    }
}

/// The row's student id, or its line number when the id field is blank or absent
fn row_student_id(record: &StringRecord, id_index: usize) -> String {
    record
        .get(id_index)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("line {}", record.position().map_or(0, |p| p.line())))
}

impl StudentSource for CsvStudentSource {
    fn students(&self) -> AddrResult<StudentBatch> {
        self.read().map_err(|e| {
            let reason = match e {
                AddrError::SourceReadError(reason) => reason,
                other => other.to_string(),
            };
            AddrError::SourceReadError(format!("{}: {}", self.path.display(), reason))
        })
    }
}

/// Address table backed by a CSV file
///
/// Rows are held in memory and only written when [`CsvAddressStore::save`]
/// is called, so a dry run can use the same store without touching disk.
#[derive(Debug)]
pub struct CsvAddressStore {
    path: PathBuf,
    store: AddressStore,
    modified: bool,
}

impl CsvAddressStore {
    /// Open an address table, loading existing rows if the file exists
    ///
    /// # Arguments
    /// * `path` - Location of the address CSV file
    ///
    /// # Returns
    /// * `Ok(CsvAddressStore)` - Store holding any rows already in the file
    /// * `Err` - If the file exists but cannot be read or parsed
    pub fn open(path: impl Into<PathBuf>) -> AddrResult<Self> {
        let path = path.into();

        let store = if path.exists() {
            let file = File::open(&path)?;
            let mut csv_reader = csv::ReaderBuilder::new()
                .has_headers(true)
                .from_reader(BufReader::new(file));

            let records = csv_reader
                .deserialize()
                .collect::<Result<Vec<AddressRecord>, csv::Error>>()?;
            AddressStore::from_records(records)
        } else {
            AddressStore::new()
        };

        Ok(CsvAddressStore {
            path,
            store,
            modified: false,
        })
    }

    /// Path of the address file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The in-memory rows, including any not yet saved
    pub fn store(&self) -> &AddressStore {
        &self.store
    }

    /// Whether rows have been inserted since the store was opened or last saved
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Write every row back to the address file
    ///
    /// The header row is `id,student_id,street,city,state,zip`. An empty
    /// store still produces a file with just the header. Rows go to a
    /// temporary file in the same directory, which then replaces the table,
    /// so a failed write leaves the previous file intact.
    pub fn save(&mut self) -> AddrResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)?;

        {
            let mut csv_writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(BufWriter::new(&mut temp));

            // Written explicitly so an empty table still gets a header
            csv_writer.write_record(["id", "student_id", "street", "city", "state", "zip"])?;
            for record in self.store.records() {
                csv_writer.serialize(record)?;
            }
            csv_writer.flush()?;
        }

        temp.persist(&self.path).map_err(|e| e.error)?;
        self.modified = false;

        Ok(())
    }
}

impl AddressSink for CsvAddressStore {
    fn contains_student(&self, student_id: &str) -> bool {
        self.store.contains_student(student_id)
    }

    fn insert(&mut self, address: NewAddress) -> AddrResult<u64> {
        let id = self.store.insert(address)?;
        self.modified = true;
        Ok(id)
    }
}
