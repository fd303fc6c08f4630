use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn adding_phones() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("contacts.txt");

    Command::cargo_bin(env!("CARGO_PKG_NAME"))?
        .current_dir(dir.path())
        .arg("--file")
        .arg(&file)
        .write_stdin("add Alice 12345\nadd Alice 67890\nphone Alice\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Contact 'Alice' added with phone '12345'.",
        ))
        .stdout(predicate::str::contains("New phone added to 'Alice': 67890"))
        .stdout(predicate::str::contains(
            "Alice's phone number(s): 12345, 67890",
        ))
        .stdout(predicate::str::contains("Good bye!"));

    assert_eq!(fs::read_to_string(&file)?, "Alice,12345|67890\n");
    Ok(())
}

#[test]
fn duplicate_phone_is_not_added_twice() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("contacts.txt");

    Command::cargo_bin(env!("CARGO_PKG_NAME"))?
        .current_dir(dir.path())
        .arg("--file")
        .arg(&file)
        .write_stdin("add Alice 12345\nadd Alice 12345\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "This phone number already exists for 'Alice'.",
        ));

    assert_eq!(fs::read_to_string(&file)?, "Alice,12345\n");
    Ok(())
}

#[test]
fn invalid_inputs() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("contacts.txt");

    Command::cargo_bin(env!("CARGO_PKG_NAME"))?
        .current_dir(dir.path())
        .arg("--file")
        .arg(&file)
        .write_stdin("add Alice +2348031234567\nadd Alice\nadd Smith,John 123\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Phone number must contain digits only.",
        ))
        .stdout(predicate::str::contains(
            "Not enough arguments. Usage: add <name> <phone>",
        ))
        .stdout(predicate::str::contains(
            "Name must not be empty and must not contain a comma or a line break",
        ))
        .stdout(predicate::str::contains("No contacts to export."));

    assert!(!file.exists());
    Ok(())
}
