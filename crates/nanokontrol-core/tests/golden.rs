use std::fs;
use std::path::{Path, PathBuf};

use nanokontrol_core::protocols::record::{ButtonBehavior, ControlAssign, ControlMode};
use nanokontrol_core::{
    DecodeOptions, ISSUE_ENUM_UNRECOGNIZED, SettingsDocument, decode_dump_file, encode_document,
};

fn golden_dir(dir: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join(dir)
}

fn load_expected_document(dir: &str) -> SettingsDocument {
    let expected_path = golden_dir(dir).join("expected_settings.json");
    let expected_json = fs::read_to_string(&expected_path).expect("read expected_settings.json");
    serde_json::from_str(&expected_json).expect("parse expected document")
}

fn run_golden(dir: &str) {
    let input = golden_dir(dir).join("input.syx");
    let expected = load_expected_document(dir);

    let mut actual = decode_dump_file(&input, &DecodeOptions::default()).expect("decode dump");
    actual.generated_at = expected.generated_at.clone();
    actual.input.path = expected.input.path.clone();

    let actual_value = serde_json::to_value(&actual).expect("serialize actual");
    let expected_value = serde_json::to_value(&expected).expect("serialize expected");
    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");

    let raw = fs::read(&input).expect("read input.syx");
    assert_eq!(encode_document(&actual), raw, "re-encode mismatch in {dir}");
}

#[test]
fn golden_factory() {
    run_golden("tests/golden/factory");
}

#[test]
fn golden_edited() {
    run_golden("tests/golden/edited");
}

#[test]
fn golden_factory_matches_default_record() {
    let document = load_expected_document("tests/golden/factory");
    assert_eq!(document.settings, Default::default());
    assert!(document.issues.is_empty());
}

#[test]
fn golden_edited_has_expected_values() {
    let document = load_expected_document("tests/golden/edited");
    let settings = &document.settings;
    assert_eq!(document.header.global_channel.get(), 5);
    assert_eq!(settings.common.control_mode, ControlMode::Live);
    assert_eq!(settings.groups[0].slider.max, 200);
    assert_eq!(settings.groups[1].knob.assign, ControlAssign::Disabled);
    assert_eq!(settings.groups[2].solo.on, 255);
    assert_eq!(settings.groups[5].solo.behavior, ButtonBehavior::Unrecognized(3));
    assert_eq!(settings.transport.custom_daw_assign, [1, 2, 3, 0x90, 5]);
    assert_eq!(document.issues.len(), 1);
    assert_eq!(document.issues[0].id, ISSUE_ENUM_UNRECOGNIZED);
}

#[test]
fn golden_edited_is_rejected_when_strict() {
    let input = golden_dir("tests/golden/edited").join("input.syx");
    let err = decode_dump_file(&input, &DecodeOptions::strict()).unwrap_err();
    assert!(err.to_string().contains("groups[5].solo.behavior"));
}
