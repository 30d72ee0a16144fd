//! Rebuild the golden fixtures under `tests/golden/`.
//!
//! `factory/input.syx` is re-encoded from `SettingsRecord::factory_default`,
//! then every fixture's `expected_settings.json` is re-decoded from its
//! capture. Run from the workspace root.

use std::error::Error;
use std::fs;
use std::path::Path;

use nanokontrol_core::protocols::frame::{FrameHeader, encode_frame};
use nanokontrol_core::{DEFAULT_GENERATED_AT, DecodeOptions, SettingsRecord, decode_dump_file};

const GOLDEN_ROOT: &str = "tests/golden";
const CAPTURE: &str = "input.syx";
const EXPECTED: &str = "expected_settings.json";

fn main() -> Result<(), Box<dyn Error>> {
    let root = Path::new(GOLDEN_ROOT);

    let factory = root.join("factory").join(CAPTURE);
    let raw = encode_frame(&FrameHeader::default(), &SettingsRecord::factory_default());
    fs::write(&factory, raw)?;
    println!("wrote {}", factory.display());

    let mut fixtures = fs::read_dir(root)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    fixtures.sort();

    for fixture in fixtures.iter().filter(|dir| dir.join(CAPTURE).is_file()) {
        let mut document = decode_dump_file(&fixture.join(CAPTURE), &DecodeOptions::default())
            .map_err(|err| format!("{}: {err}", fixture.display()))?;
        document.generated_at = DEFAULT_GENERATED_AT.to_string();
        let expected = fixture.join(EXPECTED);
        fs::write(&expected, serde_json::to_string_pretty(&document)? + "\n")?;
        println!("wrote {}", expected.display());
    }
    Ok(())
}
