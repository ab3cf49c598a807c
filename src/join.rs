//! Rejoining normalized addresses to their students
//!
//! This is the inner join on `student_id` that recovers the original
//! student-to-address association from the two tables. Students without an
//! address row and address rows without a student are left out.

use std::collections::HashMap;

use serde::Serialize;

use crate::address::AddressRecord;
use crate::student::StudentRecord;

/// One student joined with one of their address rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentAddress {
    pub student_id: String,
    pub name: String,
    pub address_id: u64,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Inner join students and addresses on `student_id`
///
/// Rows come out in student order, and within a student in address id order.
pub fn join_addresses(
    students: &[StudentRecord],
    addresses: &[AddressRecord],
) -> Vec<StudentAddress> {
    let mut by_student: HashMap<&str, Vec<&AddressRecord>> = HashMap::new();
    for address in addresses {
        by_student
            .entry(address.student_id.as_str())
            .or_default()
            .push(address);
    }
    for rows in by_student.values_mut() {
        rows.sort_by_key(|r| r.id);
    }

    let mut joined = Vec::new();
    for student in students {
        let Some(rows) = by_student.get(student.student_id.as_str()) else {
            continue;
        };
        for address in rows {
            joined.push(StudentAddress {
                student_id: student.student_id.clone(),
                name: student.full_name(),
                address_id: address.id,
                street: address.street.clone(),
                city: address.city.clone(),
                state: address.state.clone(),
                zip: address.zip.clone(),
            });
        }
    }

    joined
}
