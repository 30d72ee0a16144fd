//! Scene dump codec for the Korg nanoKONTROL2 control surface.
//!
//! The device exchanges its settings as a 402-byte SysEx "scene data dump".
//! This crate validates the frame, undoes the 7-bit packing of its payload
//! and decodes the fixed 339-byte scene record into typed settings; the
//! encode path runs the same layers in reverse and reproduces the frame
//! byte for byte. Protocol code (`protocols`) is pure; reading and writing
//! captures is isolated in `source`.
//!
//! Invariants:
//! - Every decode failure names the byte offset and the expected value or
//!   length.
//! - `encode(decode(frame)) == frame` for every frame that decodes without
//!   reported issues.
//! - Unknown enumeration bytes are kept as `Unrecognized` values, never
//!   coerced to a default.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use nanokontrol_core::{DecodeOptions, decode_dump_file};
//!
//! let document = decode_dump_file(Path::new("scene.syx"), &DecodeOptions::default())?;
//! println!("control mode: {:?}", document.settings.common.control_mode);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod dump;
pub mod protocols;
pub mod source;

pub use dump::{DumpError, decode_dump, decode_dump_file, encode_document, write_document};
pub use protocols::common::hexdump::{format_hex_bytes, hexdump};
pub use protocols::frame::{FrameError, FrameHeader, GlobalChannel};
pub use protocols::record::{DecodeOptions, Policy, RecordError, SettingsRecord};
pub use source::{DumpSink, DumpSource, IoSink, IoSource, SourceError};

/// Current settings document schema version.
pub const DOCUMENT_VERSION: u32 = 1;
/// Default timestamp used when the capture time is unknown.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

pub const ISSUE_RESERVED_NONZERO: &str = "NK-RESERVED-NONZERO";
pub const ISSUE_ENUM_UNRECOGNIZED: &str = "NK-ENUM-UNRECOGNIZED";
pub const ISSUE_RECORD_SHAPE: &str = "NK-RECORD-SHAPE";

/// Decoded scene dump as exchanged with users and editors (JSON).
///
/// Only `header` and `settings` are needed to encode a dump; the other
/// fields describe where the settings came from.
///
/// # Examples
/// ```
/// use nanokontrol_core::{FrameHeader, SettingsRecord, make_document};
///
/// let document = make_document("scene.syx", 402, FrameHeader::default(), SettingsRecord::default());
/// assert_eq!(document.document_version, nanokontrol_core::DOCUMENT_VERSION);
/// assert!(document.issues.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsDocument {
    /// Document schema version (not the binary version).
    #[serde(default = "default_document_version")]
    pub document_version: u32,
    /// Tool identification metadata.
    #[serde(default)]
    pub tool: ToolInfo,
    /// RFC3339 timestamp of the capture (file modification time when known).
    #[serde(default = "default_generated_at")]
    pub generated_at: String,
    /// Input capture metadata.
    #[serde(default)]
    pub input: InputInfo,
    /// Variable frame header fields.
    pub header: FrameHeader,
    /// Decoded scene settings.
    pub settings: SettingsRecord,
    /// Findings reported during decode, in payload order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
}

/// Tool metadata embedded in documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "nanokontrol").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input capture metadata embedded in documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Recoverable decode finding, reported instead of rejected.
///
/// # Examples
/// ```
/// use nanokontrol_core::{Issue, RecordError};
///
/// let issue = Issue::from_record_error(&RecordError::UnrecognizedEnum {
///     kind: "LED mode",
///     field: "common.led_mode".to_string(),
///     offset: 2,
///     value: 7,
/// });
/// assert_eq!(issue.id, nanokontrol_core::ISSUE_ENUM_UNRECOGNIZED);
/// assert_eq!(issue.offset, Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Stable issue identifier (e.g., `NK-RESERVED-NONZERO`).
    pub id: String,
    /// Severity label (`error` or `warning`).
    pub severity: String,
    /// Field path inside the record (e.g., `groups[3].solo.reserved`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Byte offset inside the natural payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    /// Raw byte found at `offset`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u8>,
    /// Human-readable message.
    pub message: String,
}

impl Issue {
    pub fn from_record_error(err: &RecordError) -> Self {
        let message = err.to_string();
        match err {
            RecordError::ReservedByte {
                field,
                offset,
                value,
            } => Issue {
                id: ISSUE_RESERVED_NONZERO.to_string(),
                severity: "error".to_string(),
                field: Some(field.clone()),
                offset: Some(*offset),
                value: Some(*value),
                message,
            },
            RecordError::UnrecognizedEnum {
                field,
                offset,
                value,
                ..
            } => Issue {
                id: ISSUE_ENUM_UNRECOGNIZED.to_string(),
                severity: "warning".to_string(),
                field: Some(field.clone()),
                offset: Some(*offset),
                value: Some(*value),
                message,
            },
            RecordError::Length { .. } | RecordError::TooShort { .. } => Issue {
                id: ISSUE_RECORD_SHAPE.to_string(),
                severity: "error".to_string(),
                field: None,
                offset: None,
                value: None,
                message,
            },
        }
    }
}

/// Build a document with tool metadata filled and no issues.
pub fn make_document(
    input_path: &str,
    input_bytes: u64,
    header: FrameHeader,
    settings: SettingsRecord,
) -> SettingsDocument {
    SettingsDocument {
        document_version: DOCUMENT_VERSION,
        tool: ToolInfo {
            name: "nanokontrol".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        header,
        settings,
        issues: vec![],
    }
}

fn default_document_version() -> u32 {
    DOCUMENT_VERSION
}

fn default_generated_at() -> String {
    DEFAULT_GENERATED_AT.to_string()
}
