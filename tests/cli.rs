//! End-to-end tests of the `unfurl` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn unfurl() -> Command {
    Command::cargo_bin("unfurl").unwrap()
}

#[test]
fn outline_reads_stdin() {
    unfurl()
        .arg("outline")
        .write_stdin("(foo, bar, baz)")
        .assert()
        .success()
        .stdout("(\n    foo,\n    bar,\n    baz,\n)\n");
}

#[test]
fn inline_normalizes_spacing_and_trailing_commas() {
    unfurl()
        .arg("inline")
        .write_stdin("( foo , bar ,)")
        .assert()
        .success()
        .stdout("(foo, bar)\n");
}

#[test]
fn inline_collapses_a_multiline_literal() {
    unfurl()
        .arg("inline")
        .write_stdin("{\n    'bim': boo,\n    hi: [\n        there,\n        jim,\n    ],\n}")
        .assert()
        .success()
        .stdout("{'bim': boo, hi: [there, jim]}\n");
}

#[test]
fn file_argument_is_read() {
    let path = std::env::temp_dir().join("unfurl-cli-file-test.txt");
    std::fs::write(&path, "[1, 2.0,]").unwrap();
    unfurl()
        .arg("outline")
        .arg(&path)
        .assert()
        .success()
        .stdout("[\n    1,\n    2.0,\n]\n");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn region_mode_reformats_only_the_enclosing_group() {
    unfurl()
        .arg("outline")
        .arg("--at")
        .arg("14")
        .write_stdin("value = dict(a=1, b=2)")
        .assert()
        .success()
        .stdout("value = dict(\n    a=1,\n    b=2,\n)\n");
}

#[test]
fn region_mode_without_an_enclosing_pair_fails() {
    unfurl()
        .arg("inline")
        .arg("--at")
        .arg("2")
        .write_stdin("no brackets here")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no bracketed region"));
}

#[test]
fn malformed_input_fails_with_a_diagnostic() {
    unfurl()
        .arg("inline")
        .write_stdin("(foo, bar")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unclosed"));
}

#[test]
fn ast_dumps_the_node_tree_as_json() {
    unfurl()
        .arg("ast")
        .write_stdin("{foo: bar}")
        .assert()
        .success()
        .stdout(predicate::str::contains("Surrounded").and(predicate::str::contains("KeyValue")));
}

#[test]
fn missing_file_reports_an_error() {
    unfurl()
        .arg("inline")
        .arg("definitely-not-a-real-file.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
