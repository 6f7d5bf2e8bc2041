//! Integration tests for the non-interactive subcommands.

// `Command::cargo_bin` is deprecated in recent assert_cmd releases.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn theme_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/theme.json")
}

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("json-style-editor").unwrap();
    cmd.env_remove("JSON_STYLE_EDITOR_LOG")
        .env_remove("JSON_STYLE_EDITOR_INDENT")
        .current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd
}

#[test]
fn set_auto_vivifies_missing_containers() {
    cli()
        .args(["set", "--path", "a.b[0]", "--value", "x"])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout("{\n  \"a\": {\n    \"b\": [\n      \"x\"\n    ]\n  }\n}\n");
}

#[test]
fn set_applies_multiple_writes_in_order() {
    let output = cli()
        .args([
            "set",
            theme_path(),
            "--path",
            "theme.primary",
            "--value",
            "\"#112233\"",
            "--path",
            "theme.dark",
            "--value",
            "true",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["theme"]["primary"], "#112233");
    assert_eq!(value["theme"]["dark"], true);
    assert_eq!(value["tags"], serde_json::json!(["a", "b"]));
}

#[test]
fn set_rejects_unpaired_values() {
    cli()
        .args(["set", "--path", "a", "--path", "b", "--value", "1"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("every --path needs a --value"));
}

#[test]
fn outline_lists_inferred_fields() {
    cli()
        .args(["outline", theme_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("▾ theme"))
        .stdout(predicate::str::contains("dark: [ ] false"))
        .stdout(predicate::str::contains("radius: 4"))
        .stdout(predicate::str::contains("tags[1]: b"))
        .stdout(predicate::str::contains("Color 2:  #000000"))
        .stdout(predicate::str::contains("note").not());
}

#[test]
fn format_preserves_key_order_with_custom_indent() {
    cli()
        .args(["--indent", "4", "format", "-"])
        .write_stdin(r#"{"z":1,"a":[true,null]}"#)
        .assert()
        .success()
        .stdout("{\n    \"z\": 1,\n    \"a\": [\n        true,\n        null\n    ]\n}\n");
}

#[test]
fn invalid_json_is_reported() {
    cli()
        .arg("format")
        .write_stdin("{\"a\":")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn missing_input_file_is_reported() {
    cli()
        .args(["format", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read `does-not-exist.json`"));
}

#[test]
fn set_with_huge_index_appends_instead_of_crashing() {
    cli()
        .args(["set", "--path", "a[18446744073709551615]", "--value", "1"])
        .write_stdin(r#"{"a":[0]}"#)
        .assert()
        .success()
        .stdout("{\n  \"a\": [\n    0,\n    1\n  ]\n}\n");
}

#[test]
fn set_index_on_object_replaces_it_with_a_list() {
    cli()
        .args(["set", "--path", "o[0]", "--value", "y"])
        .write_stdin(r#"{"o":{"0":"keep","k":1}}"#)
        .assert()
        .success()
        .stdout("{\n  \"o\": [\n    \"y\"\n  ]\n}\n");
}
