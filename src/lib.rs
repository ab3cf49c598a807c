//! Addrsplit library crate
//!
//! This is the library component of addrsplit, which normalizes a student
//! roster whose `address` column packs street, city, state and zip into one
//! delimited string. The library provides:
//!
//! - Structural validation of raw addresses against a four-segment pattern
//! - Parsing of valid addresses into trimmed, atomic components
//! - A migration pass that writes one address row per valid student, linked
//!   back by `student_id`, and reports the students it skipped
//! - CSV-backed student sources and address stores
//! - A join that recovers the student-to-address association
//!
//! Per-record problems never stop a migration; they are collected in the
//! report so the source data can be corrected and the migration re-run.

pub mod address;
pub mod cli;
pub mod config;
pub mod csv_handler;
pub mod error;
pub mod join;
pub mod migrator;
pub mod store;
pub mod student;
pub mod validator;
