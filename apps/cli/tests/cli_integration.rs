use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

const REQUEST: &str = r#"{
    "requirements": [
        {"name": "引張強度", "value": "65", "unit": "MPa", "importance": "high"},
        {"name": "色", "value": "透明", "importance": "low"}
    ],
    "currentMaterial": {"composition": "PET/AL/PE", "properties": ["高バリア"]}
}"#;

const CREDENTIAL_VARS: [&str; 2] = ["MATERIALS_RESEARCH_API_KEY", "MATERIALS_SYNTHESIS_API_KEY"];

fn request_file(test_name: &str, body: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("materials_{test_name}_{nanos}.json"));
    std::fs::write(&path, body).expect("write request");
    path
}

fn run_cli(args: &[&str]) -> (i32, Value) {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_materials"));
    cmd.args(args);
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    let out = cmd.output().expect("failed to run materials cli");

    let code = out.status.code().unwrap_or(-1);
    let body = if code == 0 { &out.stdout } else { &out.stderr };
    let json = serde_json::from_slice(body).unwrap_or(Value::Null);
    (code, json)
}

#[test]
fn catalog_lists_builtin_materials() {
    let (code, json) = run_cli(&["catalog"]);
    assert_eq!(code, 0);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], "1.0");
    assert_eq!(json["command"], "catalog");
    assert!(json["error"].is_null());
    assert_eq!(json["data"]["count"], 12);
    assert_eq!(json["data"]["materials"][0]["id"], "pla");
}

#[test]
fn catalog_find_is_case_insensitive_and_reports_misses() {
    let (code, json) = run_cli(&["catalog", "--find", "PLA"]);
    assert_eq!(code, 0);
    assert_eq!(json["data"]["id"], "pla");

    let (code, json) = run_cli(&["catalog", "--find", "unobtainium"]);
    assert_eq!(code, 4);
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"]["type"], "NotFound");
}

#[test]
fn extract_maps_known_requirements_only() {
    let path = request_file("extract", REQUEST);
    let (code, json) = run_cli(&["extract", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(json["data"]["extracted"]["tensileStrength"], 65.0);
    assert_eq!(json["data"]["unmatched"], serde_json::json!(["色"]));
}

#[test]
fn offline_search_returns_catalog_candidates() {
    let path = request_file("search", REQUEST);
    let (code, json) = run_cli(&["search", "--offline", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    let data = &json["data"];
    assert_eq!(data["candidates"].as_array().map(Vec::len), Some(3));
    assert_eq!(data["catalogResultCount"], 3);
    assert_eq!(data["externalResultCount"], 0);
    assert_eq!(data["dataProvenance"], "Organic Polymer Database");
}

#[test]
fn offline_recommend_emits_metadata_envelope() {
    let path = request_file("recommend", REQUEST);
    let (code, json) = run_cli(&["--offline", "recommend", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    let data = &json["data"];
    assert_eq!(data["recommendations"].as_array().map(Vec::len), Some(3));
    assert_eq!(data["recommendations"][0]["materialName"], "CNF-coated paper");
    assert_eq!(data["metadata"]["confidenceLevel"], "low");
    assert_eq!(data["metadata"]["requestDigest"].as_str().map(str::len), Some(64));
}

#[test]
fn missing_and_malformed_inputs_fail_with_distinct_codes() {
    let (code, json) = run_cli(&["recommend", "--offline", "--input", "/nonexistent/request.json"]);
    assert_eq!(code, 2);
    assert_eq!(json["error"]["type"], "IoError");
    assert_eq!(json["command"], "recommend");

    let path = request_file("malformed", "{\"requirements\": 3}");
    let (code, json) = run_cli(&["recommend", "--offline", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 3);
    assert_eq!(json["error"]["type"], "InvalidInput");

    let path = request_file(
        "empty",
        r#"{"requirements": [], "currentMaterial": {"composition": " "}}"#,
    );
    let (code, _) = run_cli(&["extract", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 3);
}
