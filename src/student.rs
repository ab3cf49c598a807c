//! Student roster records
//!
//! A student row carries its address as a single composite string, which
//! is what the migration splits apart. Only `student_id` and `address` are
//! required; the remaining roster columns are carried through for joins.

use serde::{Deserialize, Serialize};

/// A row of the student roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(alias = "id")]
    pub student_id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub curriculum: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub address: String,
}

impl StudentRecord {
    /// Build a record with only the identifying and address columns set
    pub fn new(student_id: impl Into<String>, address: impl Into<String>) -> Self {
        StudentRecord {
            student_id: student_id.into(),
            first_name: None,
            middle_name: None,
            last_name: None,
            grade: None,
            curriculum: None,
            email: None,
            address: address.into(),
        }
    }

    /// First, middle and last name joined with spaces, skipping blanks
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .flatten()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
