//! Structural validation of raw address strings
//!
//! A raw address is accepted only when it holds exactly four delimited
//! segments in the order street, city, state, zip:
//!
//! - street: letters, digits, periods and spaces
//! - city: letters and spaces
//! - state: letters and spaces
//! - zip: digits and spaces
//!
//! Every segment must contain at least one character other than a space,
//! so a record that passes validation always parses into four non-empty
//! trimmed fields.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{AddrError, AddrResult};

/// Delimiter used by the student roster's address column
pub const DEFAULT_DELIMITER: char = ';';

const STREET: &str = "[A-Za-z0-9. ]*[A-Za-z0-9.][A-Za-z0-9. ]*";
const CITY: &str = "[A-Za-z ]*[A-Za-z][A-Za-z ]*";
const STATE: &str = "[A-Za-z ]*[A-Za-z][A-Za-z ]*";
const ZIP: &str = "[0-9 ]*[0-9][0-9 ]*";

/// Compiled four-segment address pattern for one delimiter
#[derive(Debug, Clone)]
pub struct AddressValidator {
    delimiter: char,
    pattern: Regex,
}

impl AddressValidator {
    /// Build a validator for the given delimiter
    ///
    /// # Arguments
    /// * `delimiter` - Character separating the four address segments
    ///
    /// # Returns
    /// * `Ok(AddressValidator)` - Validator anchored to exactly four segments
    /// * `Err(AddrError::InvalidDelimiter)` - If the delimiter could appear inside a segment
    pub fn new(delimiter: char) -> AddrResult<Self> {
        if delimiter.is_ascii_alphanumeric() || delimiter == '.' || delimiter.is_whitespace() {
            return Err(AddrError::InvalidDelimiter(delimiter));
        }

        let d = regex::escape(delimiter.encode_utf8(&mut [0; 4]));
        let pattern = Regex::new(&format!("^{STREET}{d}{CITY}{d}{STATE}{d}{ZIP}$"))?;

        Ok(AddressValidator { delimiter, pattern })
    }

    /// The delimiter this validator was built for
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Check a raw address string against the four-segment pattern
    ///
    /// Never fails: malformed input simply yields `false`.
    pub fn is_valid(&self, raw: &str) -> bool {
        self.pattern.is_match(raw)
    }
}

impl Default for AddressValidator {
    fn default() -> Self {
        default_validator().clone()
    }
}

fn default_validator() -> &'static AddressValidator {
    static VALIDATOR: OnceLock<AddressValidator> = OnceLock::new();
    VALIDATOR.get_or_init(|| {
        // ';' is neither alphanumeric, '.', nor whitespace, and the pattern is static
        AddressValidator::new(DEFAULT_DELIMITER).expect("default address pattern compiles")
    })
}

/// Check a raw address using the default `;` delimiter
pub fn is_valid(raw: &str) -> bool {
    default_validator().is_valid(raw)
}
