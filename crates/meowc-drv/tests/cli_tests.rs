//! End-to-end tests exercising the `meowc` binary through its CLI surface.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn meowc() -> Command {
    Command::cargo_bin("meowc").expect("binary builds")
}

fn write_source(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).expect("write fixture");
    path
}

#[test]
fn compiles_a_well_formed_program_with_no_flags_and_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "add.meow", "Wake Box x paws 1 + 2 Meow(x) Sleep");

    meowc().arg(&src).assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn tac_only_flag_prints_tac_to_stdout() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "add.meow", "Wake Box x paws 1 + 2 Meow(x) Sleep");

    meowc()
        .arg(&src)
        .arg("--tac-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("t0 = 1 + 2"))
        .stdout(predicate::str::contains("x = t0"))
        .stdout(predicate::str::contains("print x"));
}

#[test]
fn writes_tac_to_the_output_path_when_given() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "add.meow", "Wake Box x paws 1 + 2 Sleep");
    let out = dir.path().join("add.tac");

    meowc().arg(&src).arg("-o").arg(&out).assert().success();

    let written = fs::read_to_string(&out).expect("output file exists");
    assert!(written.contains("x = t0"));
}

#[test]
fn missing_input_file_exits_non_zero() {
    meowc()
        .arg("/no/such/file.meow")
        .assert()
        .failure()
        .stderr(predicate::str::contains("meowc:"));
}

#[test]
fn a_syntax_error_is_reported_and_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "bad.meow", "Wake Box x paws Sleep");

    meowc()
        .arg(&src)
        .assert()
        .failure()
        .stderr(predicate::str::contains("syntax").or(predicate::str::contains("error")));
}

#[test]
fn a_semantic_error_is_reported_and_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "undeclared.meow", "Wake Box x paws y + 1 Sleep");

    meowc().arg(&src).assert().failure();
}

#[test]
fn ast_flag_prints_the_tree_and_skips_semantic_analysis() {
    let dir = TempDir::new().unwrap();
    // Would fail semantic analysis (undeclared `y`), but --ast stops before that phase.
    let src = write_source(&dir, "shape.meow", "Wake Box x paws y + 1 Sleep");

    meowc()
        .arg(&src)
        .arg("--ast")
        .assert()
        .success()
        .stdout(predicate::str::contains("Program"));
}

#[test]
fn verbose_mode_does_not_change_the_exit_code() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "verbose.meow", "Wake Meow(1) Sleep");

    meowc().arg(&src).arg("--verbose").assert().success();
}
