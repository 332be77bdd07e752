//! Runs the `xform` binary against scene files in temp directories.

use std::fs;
use std::process::Command;

fn xform() -> Command {
    Command::new(env!("CARGO_BIN_EXE_xform"))
}

const SCENE: &str = "\
nodes:
  - name: R
    children:
      - name: A
        position: [1, 0, 0]
        children:
          - name: B
            position: [0, 1, 0]
";

#[test]
fn eval_json_reports_world_matrices() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.yaml");
    fs::write(&path, SCENE).unwrap();

    let out = xform().args(["eval", "--json", "--world-only"]).arg(&path).output().unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let nodes: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let nodes = nodes.as_array().unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[2]["name"], "B");
    assert_eq!(nodes[2]["depth"], 2);
    assert_eq!(nodes[2]["world_position"], serde_json::json!([1.0, 1.0, 0.0]));
    assert!(nodes[2].get("local").is_none());
}

#[test]
fn eval_text_lists_every_node() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.yaml");
    fs::write(&path, SCENE).unwrap();

    let out = xform().arg("eval").arg(&path).output().unwrap();
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    for name in ["R #", "  A #", "    B #"] {
        assert!(text.lines().any(|l| l.starts_with(name)), "missing {name:?} in\n{text}");
    }
}

#[test]
fn eval_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = xform().arg("eval").arg(dir.path().join("none.yaml")).output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not found"));
}

#[test]
fn eval_malformed_yaml_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "nodes: [ { position: [1, 2] } ]").unwrap();

    let out = xform().arg("eval").arg(&path).output().unwrap();
    assert!(!out.status.success());
}

#[test]
fn compose_then_decompose() {
    let out = xform()
        .args(["compose", "-p", "1,2,3", "-s", "2,2,2", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let elements: Vec<String> = json["elements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap().to_string())
        .collect();
    assert_eq!(elements.len(), 16);

    let out = xform().arg("decompose").arg("--json").args(&elements).output().unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["position"], serde_json::json!([1.0, 2.0, 3.0]));
    assert_eq!(json["scale"], serde_json::json!([2.0, 2.0, 2.0]));
    assert_eq!(json["euler"]["order"], "XYZ");
}
