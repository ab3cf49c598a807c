//! Tests for the migrate command

use std::fs;

use predicates::prelude::*;

use crate::helpers::{addrsplit, create_temp_dir, write_roster, MIXED_ROSTER};

#[test]
fn test_migrate_mixed_roster() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let students = write_roster(temp_dir.path(), MIXED_ROSTER)?;
    let addresses = temp_dir.path().join("addresses.csv");

    addrsplit()?
        .arg("migrate")
        .arg(&students)
        .arg(&addresses)
        .assert()
        .success()
        .stdout(predicate::str::contains("inserted: 2"))
        .stdout(predicate::str::contains("skipped: 1"))
        .stdout(predicate::str::contains("skipped student_id: 2"));

    let contents = fs::read_to_string(&addresses)?;
    assert_eq!(
        contents,
        "id,student_id,street,city,state,zip\n\
         1,1,123 Main St.,Springfield,IL,62704\n\
         2,3,10 Elm St.,Metropolis,NY,10001\n"
    );

    Ok(())
}

#[test]
fn test_migrate_twice_does_not_duplicate() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let students = write_roster(temp_dir.path(), MIXED_ROSTER)?;
    let addresses = temp_dir.path().join("addresses.csv");

    addrsplit()?
        .arg("migrate")
        .arg(&students)
        .arg(&addresses)
        .assert()
        .success();
    let first = fs::read_to_string(&addresses)?;

    addrsplit()?
        .arg("migrate")
        .arg(&students)
        .arg(&addresses)
        .assert()
        .success()
        .stdout(predicate::str::contains("inserted: 0"))
        .stdout(predicate::str::contains("already migrated: 2"))
        .stdout(predicate::str::contains("skipped student_id: 2"));

    assert_eq!(fs::read_to_string(&addresses)?, first);

    Ok(())
}

#[test]
fn test_migrate_dry_run_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let students = write_roster(temp_dir.path(), MIXED_ROSTER)?;
    let addresses = temp_dir.path().join("addresses.csv");

    addrsplit()?
        .arg("migrate")
        .arg(&students)
        .arg(&addresses)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("inserted: 2"));

    assert!(!addresses.exists());

    Ok(())
}

#[test]
fn test_migrate_custom_delimiter() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let students = write_roster(
        temp_dir.path(),
        "student_id,address\n1,4 Oak Ave.|Gotham|NJ|07001\n2,4 Oak Ave.;Gotham;NJ;07001\n",
    )?;
    let addresses = temp_dir.path().join("addresses.csv");

    addrsplit()?
        .args(["-F", "|", "migrate"])
        .arg(&students)
        .arg(&addresses)
        .assert()
        .success()
        .stdout(predicate::str::contains("inserted: 1"))
        .stdout(predicate::str::contains("skipped student_id: 2"));

    assert!(fs::read_to_string(&addresses)?.contains("1,1,4 Oak Ave.,Gotham,NJ,07001"));

    Ok(())
}

#[test]
fn test_migrate_rejects_ambiguous_delimiter() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let students = write_roster(temp_dir.path(), MIXED_ROSTER)?;
    let addresses = temp_dir.path().join("addresses.csv");

    addrsplit()?
        .args(["-F", "."])
        .arg("migrate")
        .arg(&students)
        .arg(&addresses)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid delimiter"));

    assert!(!addresses.exists());

    Ok(())
}

#[test]
fn test_migrate_missing_roster_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let addresses = temp_dir.path().join("addresses.csv");

    addrsplit()?
        .arg("migrate")
        .arg(temp_dir.path().join("nope.csv"))
        .arg(&addresses)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read student records"));

    assert!(!addresses.exists());

    Ok(())
}

#[test]
fn test_migrate_verbose_logs_to_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let students = write_roster(temp_dir.path(), MIXED_ROSTER)?;
    let addresses = temp_dir.path().join("addresses.csv");

    addrsplit()?
        .arg("-v")
        .arg("migrate")
        .arg(&students)
        .arg(&addresses)
        .assert()
        .success()
        .stdout(predicate::str::contains("address migration").not())
        .stderr(predicate::str::contains("address migration finished"));

    Ok(())
}

#[test]
fn test_migrate_continues_past_unreadable_row() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let students = write_roster(
        temp_dir.path(),
        "student_id,address\n\
         1,10 Elm St.;Metropolis;NY;10001\n\
         2,123 Main St, Springfield IL 62704\n\
         3,123 Main St.;Springfield;IL;62704\n",
    )?;
    let addresses = temp_dir.path().join("addresses.csv");

    addrsplit()?
        .arg("migrate")
        .arg(&students)
        .arg(&addresses)
        .assert()
        .success()
        .stdout(predicate::str::contains("inserted: 2"))
        .stdout(predicate::str::contains("skipped: 1"))
        .stdout(predicate::str::contains("skipped student_id: 2"));

    let contents = fs::read_to_string(&addresses)?;
    assert!(contents.contains("1,1,10 Elm St.,Metropolis,NY,10001"));
    assert!(contents.contains("2,3,123 Main St.,Springfield,IL,62704"));

    Ok(())
}
