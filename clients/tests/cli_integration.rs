//! Integration tests for the `case_macos_system_profiler` binary.
//!
//! Every run loads a `system_profiler -json` capture so the tests do not
//! depend on the host being a Mac.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const HARDWARE_JSON: &str = r#"{
  "SPHardwareDataType": [
    {
      "_name": "hardware_overview",
      "machine_model": "MacBookPro18,3",
      "machine_name": "MacBook Pro",
      "physical_memory": "16 GB",
      "serial_number": "TESTSERIAL123"
    }
  ]
}"#;

const DEVICE_IRI: &str = "http://example.org/kb/AppleDevice-0f8fad5b-d9cb-469f-a165-70867728950e";

/// Runs the binary with `args`.
fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_case_macos_system_profiler"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute case_macos_system_profiler")
}

/// Writes `json` into `dir` and returns its path.
fn write_snapshot(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("SPHardwareDataType.json");
    fs::write(&path, json).expect("write snapshot");
    path
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

#[test]
fn writes_turtle_graph() {
    let tmp = TempDir::new().expect("temp dir");
    let snapshot = write_snapshot(tmp.path(), HARDWARE_JSON);
    let out = tmp.path().join("out.ttl");

    let output = run(&[
        "--SPHardwareDataType-json",
        path_str(&snapshot),
        path_str(&out),
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let turtle = fs::read_to_string(&out).expect("graph written");
    assert!(turtle.contains("@prefix uco-observable:"));
    assert!(turtle.contains("uco-observable:AppleDevice"));
    assert!(turtle.contains("uco-observable:DeviceFacet"));
    assert!(turtle.contains("\"TESTSERIAL123\""));
    assert!(turtle.contains("\"MacBookPro18,3\""));
    assert!(turtle.contains("<https://support.apple.com/en-us/HT201300>"));
}

#[test]
fn deterministic_runs_are_byte_identical() {
    let tmp = TempDir::new().expect("temp dir");
    let snapshot = write_snapshot(tmp.path(), HARDWARE_JSON);
    let first = tmp.path().join("first.ttl");
    let second = tmp.path().join("second.ttl");

    for out in [&first, &second] {
        let output = run(&[
            "--use-deterministic-uuids",
            "--device-iri",
            DEVICE_IRI,
            "--SPHardwareDataType-json",
            path_str(&snapshot),
            path_str(out),
        ]);
        assert!(output.status.success());
    }

    let first = fs::read(&first).expect("first graph");
    let second = fs::read(&second).expect("second graph");
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn missing_field_fails_without_output() {
    let tmp = TempDir::new().expect("temp dir");
    let snapshot = write_snapshot(
        tmp.path(),
        r#"{"SPHardwareDataType": [{"machine_name": "MacBook Pro", "machine_model": "MacBookPro18,3"}]}"#,
    );
    let out = tmp.path().join("out.ttl");

    let output = run(&[
        "--SPHardwareDataType-json",
        path_str(&snapshot),
        path_str(&out),
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("serial_number"));
    assert!(!out.exists());
}

#[test]
fn unknown_extension_fails_before_mapping() {
    let tmp = TempDir::new().expect("temp dir");
    let snapshot = write_snapshot(tmp.path(), HARDWARE_JSON);
    let out = tmp.path().join("out.trix");

    let output = run(&[
        "--SPHardwareDataType-json",
        path_str(&snapshot),
        path_str(&out),
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("output format"));
    assert!(!out.exists());
}

#[test]
fn rdf_extension_writes_rdf_xml() {
    let tmp = TempDir::new().expect("temp dir");
    let snapshot = write_snapshot(tmp.path(), HARDWARE_JSON);
    let out = tmp.path().join("out.rdf");

    let output = run(&[
        "--SPHardwareDataType-json",
        path_str(&snapshot),
        path_str(&out),
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let xml = fs::read_to_string(&out).expect("graph written");
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(xml.contains("<rdf:RDF"));
    assert!(xml.contains("<uco-observable:serialNumber>TESTSERIAL123</uco-observable:serialNumber>"));
    assert!(xml.trim_end().ends_with("</rdf:RDF>"));
}

#[test]
fn n3_extension_writes_turtle_syntax() {
    let tmp = TempDir::new().expect("temp dir");
    let snapshot = write_snapshot(tmp.path(), HARDWARE_JSON);
    let n3 = tmp.path().join("out.n3");
    let ttl = tmp.path().join("out.ttl");

    for out in [&n3, &ttl] {
        let output = run(&[
            "--use-deterministic-uuids",
            "--device-iri",
            DEVICE_IRI,
            "--SPHardwareDataType-json",
            path_str(&snapshot),
            path_str(out),
        ]);
        assert!(output.status.success());
    }

    let n3 = fs::read_to_string(&n3).expect("n3 written");
    assert!(n3.contains("@prefix uco-observable:"));
    assert_eq!(n3, fs::read_to_string(&ttl).expect("turtle written"));
}

#[test]
fn vocabulary_kb_prefix_is_rejected_before_retrieval() {
    let tmp = TempDir::new().expect("temp dir");
    // Never read: configuration is checked first.
    let snapshot = tmp.path().join("absent.json");
    let out = tmp.path().join("out.ttl");

    let output = run(&[
        "--kb-prefix",
        "rdf",
        "--SPHardwareDataType-json",
        path_str(&snapshot),
        path_str(&out),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid knowledge-base configuration"), "{stderr}");
    assert!(!stderr.contains("Failed to retrieve"));
    assert!(!out.exists());
}

#[test]
fn device_iri_with_space_is_rejected() {
    let tmp = TempDir::new().expect("temp dir");
    let snapshot = write_snapshot(tmp.path(), HARDWARE_JSON);
    let out = tmp.path().join("out.ttl");

    let output = run(&[
        "--device-iri",
        "http://example.org/kb/my mac",
        "--SPHardwareDataType-json",
        path_str(&snapshot),
        path_str(&out),
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--device-iri"));
    assert!(!out.exists());
}

#[test]
fn explicit_format_overrides_extension() {
    let tmp = TempDir::new().expect("temp dir");
    let snapshot = write_snapshot(tmp.path(), HARDWARE_JSON);
    let out = tmp.path().join("graph.out");

    let output = run(&[
        "--output-format",
        "nt",
        "--SPHardwareDataType-json",
        path_str(&snapshot),
        path_str(&out),
    ]);
    assert!(output.status.success());

    let ntriples = fs::read_to_string(&out).expect("graph written");
    assert!(!ntriples.contains("@prefix"));
    assert!(ntriples
        .lines()
        .all(|line| line.starts_with('<') && line.ends_with(" .")));
}

#[test]
fn json_ld_output_has_context_and_graph() {
    let tmp = TempDir::new().expect("temp dir");
    let snapshot = write_snapshot(tmp.path(), HARDWARE_JSON);
    let out = tmp.path().join("out.jsonld");

    let output = run(&[
        "--kb-prefix",
        "case",
        "--kb-prefix-iri",
        "urn:example:case:",
        "--SPHardwareDataType-json",
        path_str(&snapshot),
        path_str(&out),
    ]);
    assert!(output.status.success());

    let text = fs::read_to_string(&out).expect("graph written");
    assert!(text.contains("\"@context\""));
    assert!(text.contains("\"@graph\""));
    assert!(text.contains("\"case\": \"urn:example:case:\""));
    assert!(text.contains("case:AppleDevice-"));
}

#[test]
fn debug_flag_logs_reviewed_data_types() {
    let tmp = TempDir::new().expect("temp dir");
    let snapshot = write_snapshot(tmp.path(), HARDWARE_JSON);
    let out = tmp.path().join("out.nt");

    let output = run(&[
        "--debug",
        "--SPHardwareDataType-json",
        path_str(&snapshot),
        path_str(&out),
    ]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("reviewed data type: SPHardwareDataType"));
}

#[test]
fn malformed_snapshot_names_retrieval_stage() {
    let tmp = TempDir::new().expect("temp dir");
    let snapshot = write_snapshot(tmp.path(), "{\"SPHardwareDataType\": ");
    let out = tmp.path().join("out.ttl");

    let output = run(&[
        "--SPHardwareDataType-json",
        path_str(&snapshot),
        path_str(&out),
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to retrieve SPHardwareDataType"));
    assert!(!out.exists());
}
