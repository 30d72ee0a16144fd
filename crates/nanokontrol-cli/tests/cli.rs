use assert_cmd::Command;
use nanokontrol_core::protocols::{bitpack, frame, record};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("nanokontrol"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn fixture(name: &str) -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join(name)
        .join("input.syx")
}

#[test]
fn help_supports_decode_and_read() {
    cmd()
        .arg("dump")
        .arg("decode")
        .arg("--help")
        .assert()
        .success();
    cmd()
        .arg("dump")
        .arg("read")
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.syx");
    let output = temp.path().join("scene.json");

    cmd()
        .arg("dump")
        .arg("decode")
        .arg(missing)
        .arg("-o")
        .arg(output)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn unsupported_extension_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("scene.txt");
    std::fs::write(&input, [0xF0, 0xF7]).expect("write input");

    cmd()
        .arg("dump")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("unsupported input format"));
}

#[test]
fn stdout_outputs_json() {
    let assert = cmd()
        .arg("dump")
        .arg("decode")
        .arg(fixture("factory"))
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let json: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["document_version"], 1);
    assert_eq!(json["settings"]["common"]["control_mode"], "CUBASE");
    assert_eq!(json["settings"]["transport"]["play"]["cc"], 41);
}

#[test]
fn stdout_and_output_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("scene.json");

    cmd()
        .arg("dump")
        .arg("decode")
        .arg(fixture("factory"))
        .arg("--stdout")
        .arg("-o")
        .arg(output)
        .assert()
        .failure();
}

#[test]
fn pretty_and_compact_conflict() {
    cmd()
        .arg("dump")
        .arg("decode")
        .arg(fixture("factory"))
        .arg("--stdout")
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure();
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("scene.json");

    cmd()
        .arg("dump")
        .arg("decode")
        .arg(fixture("factory"))
        .arg("-o")
        .arg(&output)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
    assert!(output.is_file());
}

#[test]
fn list_issues_outputs_ids() {
    cmd()
        .arg("dump")
        .arg("decode")
        .arg(fixture("edited"))
        .arg("--stdout")
        .arg("--list-issues")
        .assert()
        .success()
        .stderr(contains("NK-ENUM-UNRECOGNIZED"));
}

#[test]
fn strict_rejects_unrecognized_values() {
    cmd()
        .arg("dump")
        .arg("decode")
        .arg(fixture("edited"))
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("groups[5].solo.behavior"));
}

#[test]
fn reserved_byte_hints_lenient_and_lenient_decodes() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("reserved.syx");
    let mut raw = std::fs::read(fixture("factory")).expect("read fixture");
    let mut natural = {
        let parts = frame::split_frame(&raw).expect("valid frame");
        bitpack::unpack(parts.packed)
    };
    natural[record::layout::TRANSPORT_RESERVED_OFFSET] = 0x01;
    raw[frame::layout::PAYLOAD_RANGE].copy_from_slice(&bitpack::pack(&natural));
    std::fs::write(&input, &raw).expect("write capture");

    cmd()
        .arg("dump")
        .arg("decode")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("reserved byte").and(contains("hint: use --lenient")));

    let assert = cmd()
        .arg("dump")
        .arg("decode")
        .arg(&input)
        .arg("--stdout")
        .arg("--lenient")
        .assert()
        .success();
    let json: Value = serde_json::from_slice(&assert.get_output().stdout).expect("valid json");
    assert_eq!(json["issues"][0]["id"], "NK-RESERVED-NONZERO");
}

#[test]
fn unknown_enum_failure_has_no_lenient_hint() {
    cmd()
        .arg("dump")
        .arg("decode")
        .arg(fixture("edited"))
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("--lenient").not());
}

#[test]
fn decode_then_encode_reproduces_capture() {
    let temp = TempDir::new().expect("tempdir");
    let document = temp.path().join("scene.json");
    let restored = temp.path().join("restored.syx");

    cmd()
        .arg("dump")
        .arg("decode")
        .arg(fixture("factory"))
        .arg("-o")
        .arg(&document)
        .assert()
        .success()
        .stderr(contains("OK: document written"));
    cmd()
        .arg("dump")
        .arg("encode")
        .arg(&document)
        .arg("-o")
        .arg(&restored)
        .assert()
        .success()
        .stderr(contains("OK: 402 bytes written"));

    let original = std::fs::read(fixture("factory")).expect("read fixture");
    let encoded = std::fs::read(&restored).expect("read restored");
    assert_eq!(original, encoded);
}

#[test]
fn encode_refuses_unrecognized_values_unless_allowed() {
    let temp = TempDir::new().expect("tempdir");
    let document = temp.path().join("edited.json");
    let restored = temp.path().join("edited.syx");

    cmd()
        .arg("dump")
        .arg("read")
        .arg(fixture("edited"))
        .arg("-o")
        .arg(&document)
        .assert()
        .success();
    cmd()
        .arg("dump")
        .arg("encode")
        .arg(&document)
        .arg("-o")
        .arg(&restored)
        .assert()
        .failure()
        .stderr(contains("hint:").and(contains("--allow-unrecognized")));
    cmd()
        .arg("dump")
        .arg("write")
        .arg(&document)
        .arg("-o")
        .arg(&restored)
        .arg("--allow-unrecognized")
        .assert()
        .success();

    let original = std::fs::read(fixture("edited")).expect("read fixture");
    let encoded = std::fs::read(&restored).expect("read restored");
    assert_eq!(original, encoded);
}

#[test]
fn encode_rejects_out_of_range_global_channel() {
    let temp = TempDir::new().expect("tempdir");
    let document = temp.path().join("scene.json");
    let restored = temp.path().join("scene.syx");

    let assert = cmd()
        .arg("dump")
        .arg("decode")
        .arg(fixture("factory"))
        .arg("--stdout")
        .assert()
        .success();
    let mut json: Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid json");
    json["header"]["global_channel"] = Value::from(16);
    std::fs::write(&document, serde_json::to_vec(&json).expect("json")).expect("write doc");

    cmd()
        .arg("dump")
        .arg("encode")
        .arg(&document)
        .arg("-o")
        .arg(&restored)
        .assert()
        .failure()
        .stderr(contains("global channel out of range"));
    assert!(!restored.exists());
}

#[test]
fn encode_output_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let document = temp.path().join("scene.json");
    std::fs::write(&document, "{}").expect("write doc");

    cmd()
        .arg("dump")
        .arg("encode")
        .arg(&document)
        .arg("-o")
        .arg(&document)
        .assert()
        .failure()
        .stderr(contains("output path must differ from input"));
}

#[test]
fn input_pattern_must_match_one_capture() {
    let temp = TempDir::new().expect("tempdir");
    std::fs::copy(fixture("factory"), temp.path().join("scene-1.syx")).expect("copy");
    let pattern = temp.path().join("scene-*.syx");

    cmd()
        .arg("dump")
        .arg("decode")
        .arg(&pattern)
        .arg("--stdout")
        .assert()
        .success();

    std::fs::copy(fixture("edited"), temp.path().join("scene-2.syx")).expect("copy");
    cmd()
        .arg("dump")
        .arg("decode")
        .arg(&pattern)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("matches more than one capture").and(contains("hint:")));
}

#[test]
fn request_prints_dump_request() {
    cmd()
        .arg("dump")
        .arg("request")
        .assert()
        .success()
        .stdout(contains("F0 42 40 00 01 13 00 1F 10 00 F7"));
    cmd()
        .arg("dump")
        .arg("request")
        .arg("--global-channel")
        .arg("5")
        .assert()
        .success()
        .stdout(contains("F0 42 45 00 01 13 00 1F 10 00 F7"));
}

#[test]
fn request_rejects_channel_above_fifteen() {
    cmd()
        .arg("dump")
        .arg("request")
        .arg("--global-channel")
        .arg("16")
        .assert()
        .failure();
}

#[test]
fn hexdump_prints_frame_rows() {
    cmd()
        .arg("dump")
        .arg("hexdump")
        .arg(fixture("factory"))
        .assert()
        .success()
        .stdout(contains("0000 f0 42 40 00 01 13 00 7f").and(contains("0190 ")));
}

#[test]
fn hexdump_natural_stage_has_record_length() {
    let assert = cmd()
        .arg("dump")
        .arg("hexdump")
        .arg(fixture("factory"))
        .arg("--stage")
        .arg("natural")
        .arg("--stride")
        .arg("16")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    // 339 bytes at 16 per row.
    assert_eq!(stdout.lines().count(), 22);
}
