//! Source and destination seams for the migration
//!
//! The migrator reads students through [`StudentSource`] and writes
//! addresses through [`AddressSink`], so the same batch logic runs against
//! CSV files, in-memory collections, or anything else that implements them.

use std::collections::HashSet;

use crate::address::{AddressRecord, NewAddress};
use crate::error::{AddrError, AddrResult};
use crate::student::StudentRecord;

/// A roster row that could not be decoded into a [`StudentRecord`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// The row's `student_id` if it could be read, otherwise `line N`
    pub student_id: String,
    pub reason: String,
}

/// Everything read from a student source
///
/// Rows that fail to decode are reported in `rejected` and do not stop the
/// read; only an unreadable collection is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentBatch {
    pub records: Vec<StudentRecord>,
    pub rejected: Vec<RejectedRow>,
}

impl From<Vec<StudentRecord>> for StudentBatch {
    fn from(records: Vec<StudentRecord>) -> Self {
        StudentBatch {
            records,
            rejected: Vec::new(),
        }
    }
}

/// A readable collection of student records
pub trait StudentSource {
    /// Read every student record
    ///
    /// # Returns
    /// * `Ok(StudentBatch)` - Decoded records plus any rows that failed to decode
    /// * `Err(AddrError::SourceReadError)` - If the collection cannot be read
    fn students(&self) -> AddrResult<StudentBatch>;
}

impl StudentSource for [StudentRecord] {
    fn students(&self) -> AddrResult<StudentBatch> {
        Ok(self.to_vec().into())
    }
}

impl StudentSource for Vec<StudentRecord> {
    fn students(&self) -> AddrResult<StudentBatch> {
        Ok(self.clone().into())
    }
}

/// A writable address table keyed by `student_id`
pub trait AddressSink {
    /// Whether an address has already been written for this student
    fn contains_student(&self, student_id: &str) -> bool;

    /// Append one address, returning the surrogate id assigned to it
    ///
    /// Each call is a single unit: either the whole row is stored or an
    /// `AddrError::SinkWriteError` is returned and nothing is stored.
    fn insert(&mut self, address: NewAddress) -> AddrResult<u64>;
}

/// In-memory address table
///
/// Surrogate ids behave like a serial column: each insert takes one more
/// than the largest id seen so far, starting at 1.
#[derive(Debug, Clone)]
pub struct AddressStore {
    records: Vec<AddressRecord>,
    student_ids: HashSet<String>,
    next_id: u64,
}

impl AddressStore {
    /// Create an empty store
    pub fn new() -> Self {
        AddressStore {
            records: Vec::new(),
            student_ids: HashSet::new(),
            next_id: 1,
        }
    }

    /// Create a store pre-populated with existing rows
    ///
    /// Subsequent inserts continue numbering after the largest existing id.
    pub fn from_records(records: Vec<AddressRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().map_or(1, |max| max.saturating_add(1));
        let student_ids = records.iter().map(|r| r.student_id.clone()).collect();
        AddressStore {
            records,
            student_ids,
            next_id,
        }
    }

    /// All stored rows in insertion order
    pub fn records(&self) -> &[AddressRecord] {
        &self.records
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for AddressStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressSink for AddressStore {
    fn contains_student(&self, student_id: &str) -> bool {
        self.student_ids.contains(student_id)
    }

    fn insert(&mut self, address: NewAddress) -> AddrResult<u64> {
        let id = self.next_id;
        let next_id = id.checked_add(1).ok_or_else(|| AddrError::SinkWriteError {
            student_id: address.student_id.clone(),
            reason: "surrogate id space exhausted".to_string(),
        })?;

        self.student_ids.insert(address.student_id.clone());
        self.records.push(AddressRecord {
            id,
            student_id: address.student_id,
            street: address.address.street,
            city: address.address.city,
            state: address.address.state,
            zip: address.address.zip,
        });
        self.next_id = next_id;

        Ok(id)
    }
}
