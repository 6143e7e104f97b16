//! Snapshot loading and the `cfgtmpl` binary

use cfgtmpl_cli::{diff, load_config, resolve, Snapshot};
use cfgtmpl_macro::ObjectId;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::process::Command;
use tempfile::{Builder, NamedTempFile};

const YAML_SNAPSHOT: &str = r#"
object_id: 30
edges:
  - { child_id: 30, parent_id: 20 }
  - { child_id: 20, parent_id: 10 }
macros:
  - { owner_id: 10, name: TIMEOUT, value: "10" }
  - { owner_id: 20, name: TIMEOUT, value: "30" }
  - { owner_id: 30, name: PORT, value: "1161", order: 0 }
  - { owner_id: 30, name: COMMUNITY, value: public, order: 1 }
  - { owner_id: 30, name: SECRET, value: s3cr3t, is_password: true, order: 2 }
command_macros:
  - { command_id: 500, type: service, name: WARNING, description: warning threshold }
requested:
  - { name: COMMUNITY, value: public }
  - { name: SECRET, is_password: true }
  - { name: TIMEOUT, value: "30" }
  - { name: WARNING, value: "80" }
"#;

fn snapshot_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_cfgtmpl"))
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .unwrap();
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn yaml_snapshot_diff() {
    let file = snapshot_file(".yaml", YAML_SNAPSHOT);
    let snapshot = Snapshot::load(file.path()).unwrap();
    assert_eq!(snapshot.object_id, ObjectId(30));

    let difference = diff(&snapshot, &Default::default()).unwrap();

    assert_eq!(
        difference.removed_macros.keys().collect::<Vec<_>>(),
        vec!["PORT"]
    );
    // COMMUNITY 1 -> 0 and SECRET 2 -> 1, secret value kept
    assert_eq!(
        difference.updated_macros.keys().collect::<Vec<_>>(),
        vec!["COMMUNITY", "SECRET"]
    );
    assert_eq!(difference.updated_macros["SECRET"].value(), "s3cr3t");
    assert_eq!(difference.updated_macros["SECRET"].order(), 1);
    assert_eq!(
        difference.unchanged_macros.keys().collect::<Vec<_>>(),
        vec!["TIMEOUT"]
    );
    assert_eq!(difference.added_macros["WARNING"].order(), 3);
    assert_eq!(
        difference.added_macros["WARNING"].description(),
        "warning threshold"
    );
}

#[test]
fn json_snapshot_resolve() {
    let file = snapshot_file(
        ".json",
        r#"{
            "object_id": 2,
            "edges": [{"child_id": 2, "parent_id": 1}],
            "macros": [
                {"owner_id": 1, "name": "A", "value": "root"},
                {"owner_id": 2, "name": "B", "value": "own"}
            ]
        }"#,
    );
    let snapshot = Snapshot::load(file.path()).unwrap();

    let resolved = resolve(&snapshot, &Default::default()).unwrap();

    assert_eq!(resolved.direct["B"].value(), "own");
    assert_eq!(resolved.inherited["A"].value(), "root");
}

#[test]
fn config_limits_apply_to_requests() {
    let config_file = snapshot_file(".toml", "[macro_limits]\nmax_value_length = 1\n");
    let config = load_config(config_file.path()).unwrap();
    let file = snapshot_file(".yaml", YAML_SNAPSHOT);
    let snapshot = Snapshot::load(file.path()).unwrap();

    // stored values are longer than one character too
    assert!(diff(&snapshot, &config).is_err());
}

#[test]
fn unknown_extension_is_rejected() {
    let file = snapshot_file(".txt", "{}");
    let err = Snapshot::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("unsupported snapshot format"));
}

#[test]
fn binary_diff_text_masks_passwords() {
    let file = snapshot_file(".yaml", YAML_SNAPSHOT);
    let path = file.path().to_str().unwrap();

    let (success, stdout, _) = run(&["diff", path]);

    assert!(success);
    assert!(stdout.contains("- PORT=1161 (order 0)"), "{stdout}");
    assert!(stdout.contains("~ SECRET=******** (order 1)"), "{stdout}");
    assert!(stdout.contains("+ WARNING=80 (order 3) # warning threshold"), "{stdout}");
    assert!(!stdout.contains("s3cr3t"));
}

#[test]
fn binary_diff_json() {
    let file = snapshot_file(".yaml", YAML_SNAPSHOT);
    let path = file.path().to_str().unwrap();

    let (success, stdout, _) = run(&["diff", path, "--json"]);

    assert!(success);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["added_macros"]["WARNING"]["value"], "80");
    assert_eq!(value["removed_macros"]["PORT"]["order"], 0);
}

#[test]
fn binary_reports_missing_file() {
    let (success, _, stderr) = run(&["resolve", "/nonexistent/snapshot.json"]);

    assert!(!success);
    assert!(stderr.contains("failed to read snapshot"), "{stderr}");
}
