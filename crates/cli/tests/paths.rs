use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn inputtracer() -> Command {
    Command::cargo_bin("inputtracer").unwrap()
}

fn write_trace_result(dir: &std::path::Path) -> std::path::PathBuf {
    fs::write(
        dir.join("a.php"),
        "<?php\n$id = $_GET['id'];\necho query($id);\nfunction query($sql) { db_exec($sql); }\n",
    )
    .unwrap();
    let result_path = dir.join("result.json");
    inputtracer()
        .arg("trace")
        .arg(dir)
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(&result_path)
        .assert()
        .success();
    result_path
}

#[test]
fn paths_enumerates_at_least_one_path_from_every_source() {
    let dir = tempfile::tempdir().unwrap();
    let result_path = write_trace_result(dir.path());

    inputtracer()
        .arg("paths")
        .arg(&result_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("path 1:"));
}

#[test]
fn paths_with_an_unknown_function_name_finds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let result_path = write_trace_result(dir.path());

    inputtracer()
        .arg("paths")
        .arg(&result_path)
        .arg("--to")
        .arg("nonexistent_function_xyz")
        .assert()
        .success()
        .stdout(predicate::str::contains("no paths found"));
}

#[test]
fn paths_drops_infeasible_paths_unless_shown() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("a.php"),
        "<?php\n$id = $_GET['id'];\nif ($id == null) {\n  if ($id != null) {\n    echo query($id);\n  }\n}\nfunction query($sql) { db_exec($sql); }\n",
    )
    .unwrap();
    let result_path = dir.path().join("result.json");
    inputtracer()
        .arg("trace")
        .arg(dir.path())
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(&result_path)
        .assert()
        .success();

    inputtracer()
        .arg("paths")
        .arg(&result_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("infeasible path(s) dropped"));

    inputtracer()
        .arg("paths")
        .arg(&result_path)
        .arg("--show-infeasible")
        .assert()
        .success()
        .stdout(predicate::str::contains("[infeasible]"));
}

#[test]
fn paths_rejects_a_malformed_result_file() {
    let dir = tempfile::tempdir().unwrap();
    let bad_path = dir.path().join("bad.json");
    fs::write(&bad_path, "not json").unwrap();

    inputtracer().arg("paths").arg(&bad_path).assert().failure();
}
