// ABOUTME: End-to-end tests spawning the real binary with piped stdin

use assert_cmd::Command;
use predicates::prelude::*;

fn ourscheme() -> Command {
    Command::cargo_bin("ourscheme").expect("binary builds")
}

#[test]
fn test_piped_session_is_byte_exact() {
    ourscheme()
        .write_stdin("1\n(+ 1 2)\n(exit)\n")
        .assert()
        .success()
        .stdout(predicate::eq(
            "Welcome to OurScheme!\n\n> 3\n\n> \nThanks for using OurScheme!",
        ));
}

#[test]
fn test_eof_without_exit_reports_no_more_input() {
    ourscheme()
        .write_stdin("1\n(* 6 7)\n")
        .assert()
        .success()
        .stdout(predicate::eq(
            "Welcome to OurScheme!\n\n> 42\n\n> ERROR (no more input) : END-OF-FILE encountered\nThanks for using OurScheme!",
        ));
}

#[test]
fn test_diagnostics_do_not_kill_the_process() {
    ourscheme()
        .write_stdin("1\n(car 1)\nundefined\n(exit)\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ERROR (car with incorrect argument type) : 1")
                .and(predicate::str::contains("ERROR (unbound symbol) : undefined"))
                .and(predicate::str::ends_with("Thanks for using OurScheme!")),
        );
}

#[test]
fn test_script_file_runs_the_same_protocol() {
    let dir = std::env::temp_dir();
    let path = dir.join("ourscheme_cli_script_test.scm");
    std::fs::write(&path, "1\n(define (double n) (* 2 n))\n(double 21)\n(exit)\n")
        .expect("write script");

    ourscheme()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::eq(
            "Welcome to OurScheme!\n\n> double defined\n\n> 42\n\n> \nThanks for using OurScheme!",
        ));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_missing_script_file_fails() {
    ourscheme()
        .arg("does-not-exist.scm")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open"));
}
