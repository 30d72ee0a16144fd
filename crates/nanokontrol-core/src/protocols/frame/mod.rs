//! Scene data dump frame.
//!
//! A dump is a 402-byte SysEx message: a 12-byte header (manufacturer,
//! device, dump command, declared length), the scene-dump function byte
//! `0x40`, 388 bytes of 7-bit packed payload and the `0xF7` terminator.
//! Decoding validates every constant byte before touching the payload, then
//! unpacks it (see `bitpack`) and decodes the scene record (see `record`).
//! Encoding is the exact reverse and always yields 402 bytes.
//!
//! Header byte 2 is `0x4g` with `g` the global MIDI channel; it is the only
//! header byte that varies and is exposed as `FrameHeader`, whose
//! `GlobalChannel` refuses values above 15.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::{FrameError, PayloadStage};
pub use parser::{
    DecodedFrame, FrameHeader, FrameParts, GlobalChannel, decode_frame, decode_frame_with,
    dump_request, encode_frame, split_frame,
};
