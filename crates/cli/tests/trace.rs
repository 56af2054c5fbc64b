use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn inputtracer() -> Command {
    Command::cargo_bin("inputtracer").unwrap()
}

#[test]
fn trace_reports_a_source_and_tainted_function_in_text_format() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("a.php"),
        "<?php\n$id = $_GET['id'];\necho query($id);\nfunction query($sql) { db_exec($sql); }\n",
    )
    .unwrap();

    inputtracer()
        .arg("trace")
        .arg(dir.path())
        .arg("--format")
        .arg("text")
        .assert()
        .success()
        .stdout(predicate::str::contains("sources found:         1"))
        .stdout(predicate::str::contains("http_get"));
}

#[test]
fn trace_json_output_round_trips_as_valid_json() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "id = request.GET['id']\nquery(id)\n").unwrap();

    let output = inputtracer()
        .arg("trace")
        .arg(dir.path())
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value.get("flow_graph").is_some());
}

#[test]
fn trace_rejects_an_unknown_format() {
    let dir = tempfile::tempdir().unwrap();
    inputtracer()
        .arg("trace")
        .arg(dir.path())
        .arg("--format")
        .arg("xml")
        .assert()
        .failure();
}

#[test]
fn trace_writes_to_an_output_file_when_requested() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.php"), "<?php\n$x = 1;\n").unwrap();
    let out_file = dir.path().join("result.txt");

    inputtracer()
        .arg("trace")
        .arg(dir.path())
        .arg("--format")
        .arg("text")
        .arg("--output")
        .arg(&out_file)
        .assert()
        .success();

    let written = fs::read_to_string(&out_file).unwrap();
    assert!(written.contains("input flow trace summary"));
}
