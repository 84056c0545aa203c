//! Argument handling of the maintenance CLI binary.

use std::process::Command;

#[test]
fn missing_password_prints_usage_and_exits_1() {
    let output = Command::new(env!("CARGO_BIN_EXE_phonebook_cli"))
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run phonebook_cli");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Please provide the password as an argument"),
        "{}",
        stdout
    );
}

#[test]
fn help_flag_prints_usage_and_exits_1() {
    let output = Command::new(env!("CARGO_BIN_EXE_phonebook_cli"))
        .arg("--help")
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run phonebook_cli");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("phonebook_cli <password>"));
}
