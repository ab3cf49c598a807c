//! Address parsing and the normalized address record
//!
//! This module splits a raw delimited address into its four atomic
//! components and defines the row type written to the address store.

use serde::{Deserialize, Serialize};

use crate::error::{AddrError, AddrResult};
use crate::validator::DEFAULT_DELIMITER;

/// Number of segments in a raw address: street, city, state, zip
pub const SEGMENT_COUNT: usize = 4;

/// The four components of a parsed address, each trimmed and non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// A row of the normalized address table
///
/// `id` is the surrogate key assigned by the store on insert and
/// `student_id` refers back to the student the address was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub id: u64,
    pub student_id: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// An address waiting to be inserted, before the store assigns its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub student_id: String,
    pub address: Address,
}

/// Parse a raw address using the default `;` delimiter
///
/// # Example
/// ```
/// # use addrsplit::address::parse;
/// let address = parse("123 Main St.;Springfield;IL;62704").unwrap();
/// assert_eq!(address.city, "Springfield");
/// assert_eq!(address.zip, "62704");
/// ```
pub fn parse(raw: &str) -> AddrResult<Address> {
    parse_with(raw, DEFAULT_DELIMITER)
}

/// Parse a raw address split on the given delimiter
///
/// # Arguments
/// * `raw` - Raw address string, expected to hold exactly four segments
/// * `delimiter` - Segment separator
///
/// # Returns
/// * `Ok(Address)` - All four components, whitespace-trimmed
/// * `Err(AddrError::MalformedAddress)` - If the segment count is not four or
///   any segment is empty after trimming
pub fn parse_with(raw: &str, delimiter: char) -> AddrResult<Address> {
    let segments: Vec<&str> = raw.split(delimiter).map(str::trim).collect();

    if segments.len() != SEGMENT_COUNT {
        return Err(AddrError::MalformedAddress(format!(
            "expected {} segments separated by '{}', found {}: {:?}",
            SEGMENT_COUNT,
            delimiter,
            segments.len(),
            raw
        )));
    }

    if let Some(position) = segments.iter().position(|s| s.is_empty()) {
        return Err(AddrError::MalformedAddress(format!(
            "segment {} is empty: {:?}",
            position + 1,
            raw
        )));
    }

    Ok(Address {
        street: segments[0].to_string(),
        city: segments[1].to_string(),
        state: segments[2].to_string(),
        zip: segments[3].to_string(),
    })
}
