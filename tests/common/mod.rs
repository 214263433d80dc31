//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;

/// Helper to get a carangos command with no ambient credentials
pub fn carangos() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("carangos"));
    cmd.env_remove("CARANGOS_DATA_DIR")
        .env_remove("CARANGOS_USER")
        .env_remove("CARANGOS_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

pub fn data_dir(tmp: &TempDir) -> PathBuf {
    tmp.path().join("data")
}

/// Helper to create a data directory seeded with the organogram accounts
pub fn setup_plant() -> TempDir {
    let tmp = TempDir::new().unwrap();
    carangos()
        .arg("--data-dir")
        .arg(data_dir(&tmp))
        .args(["init", "--seed-org"])
        .assert()
        .success();
    tmp
}

/// A command logged in as `user`
pub fn as_user(tmp: &TempDir, user: &str, password: &str) -> Command {
    let mut cmd = carangos();
    cmd.env("CARANGOS_DATA_DIR", data_dir(tmp))
        .env("CARANGOS_USER", user)
        .env("CARANGOS_PASSWORD", password);
    cmd
}

pub fn as_admin(tmp: &TempDir) -> Command {
    as_user(tmp, "admin", "admin123")
}

/// Hire an employee and return the generated matrícula
pub fn hire(tmp: &TempDir, name: &str, cpf: &str, department: &str, title: &str) -> String {
    let output = as_user(tmp, "ger_rh", "123456")
        .args([
            "emp",
            "new",
            "--name",
            name,
            "--cpf",
            cpf,
            "--rg",
            "12.345.678-9",
            "--address",
            "Rua das Oficinas, 100",
            "--phone",
            "(11) 5555-0000",
            "--department",
            department,
            "--title",
            title,
            "-f",
            "id",
        ])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "hire failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Record a production entry as the assembly manager
pub fn record(tmp: &TempDir, day: &str, shift: &str, quantity: u32) {
    as_user(tmp, "ger_montagem", "123456")
        .args(["prod", "record", "--day", day, "--shift", shift, "-q"])
        .arg(quantity.to_string())
        .assert()
        .success();
}
