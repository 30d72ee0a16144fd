//! Scene record decoding and encoding.
//!
//! The natural payload is a fixed 339-byte record: three common bytes, eight
//! 31-byte controller groups (slider, knob, solo/mute/rec buttons) and an
//! 88-byte transport block. Every button is the same six-byte sub-record
//! (assign, behavior, cc, off, on, reserved), so one `Button` type serves all
//! nineteen of them.
//!
//! Each record type declares its field order once, as a read/write pair over
//! `RecordReader` and `RecordWriter`; decode and encode cannot drift apart.
//! Reserved bytes must be zero and enumeration bytes outside the known set
//! surface as `Unrecognized` variants; `DecodeOptions` selects whether each
//! kind of finding aborts the decode or is reported as an issue.

pub mod error;
pub mod layout;
pub mod options;
pub mod parser;
pub mod reader;
pub mod types;
pub mod writer;

pub use error::RecordError;
pub use options::{DecodeOptions, Policy};
pub use parser::{Decoded, decode_record, decode_record_with, encode_record};
pub use types::{
    Button, ButtonAssign, ButtonBehavior, Common, Control, ControlAssign, ControlMode,
    ControllerGroup, LedMode, SettingsRecord, Transport, WireEnum,
};
