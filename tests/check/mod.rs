//! Tests for the check command

use predicates::prelude::*;

use crate::helpers::{addrsplit, create_temp_dir, write_roster, MIXED_ROSTER};

#[test]
fn test_check_lists_invalid_students() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let students = write_roster(temp_dir.path(), MIXED_ROSTER)?;

    addrsplit()?
        .arg("check")
        .arg(&students)
        .assert()
        .success()
        .stdout(predicate::str::contains("invalid student_id: 2"))
        .stdout(predicate::str::contains("invalid student_id: 1").not())
        .stdout(predicate::str::contains("valid: 2"))
        .stdout(predicate::str::contains("invalid: 1"));

    // check never writes anything next to the roster
    assert_eq!(std::fs::read_dir(temp_dir.path())?.count(), 1);

    Ok(())
}

#[test]
fn test_check_rejects_missing_zip() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let students = write_roster(
        temp_dir.path(),
        "student_id,address\n7,10 Elm St.;Metropolis;NY\n",
    )?;

    addrsplit()?
        .arg("check")
        .arg(&students)
        .assert()
        .success()
        .stdout(predicate::str::contains("invalid student_id: 7"))
        .stdout(predicate::str::contains("valid: 0"));

    Ok(())
}

#[test]
fn test_check_requires_address_column() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let students = write_roster(temp_dir.path(), "student_id,email\n1,a@example.com\n")?;

    addrsplit()?
        .arg("check")
        .arg(&students)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load students"));

    Ok(())
}

#[test]
fn test_check_reports_unreadable_row() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let students = write_roster(
        temp_dir.path(),
        "student_id,address\n1,10 Elm St.;Metropolis;NY;10001\n2,123 Main St, Springfield IL 62704\n",
    )?;

    addrsplit()?
        .arg("check")
        .arg(&students)
        .assert()
        .success()
        .stdout(predicate::str::contains("invalid student_id: 2"))
        .stdout(predicate::str::contains("valid: 1"))
        .stdout(predicate::str::contains("invalid: 1"));

    Ok(())
}
