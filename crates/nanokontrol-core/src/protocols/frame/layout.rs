//! Byte layout of the scene data dump frame.

pub const FRAME_LEN: usize = 402;
pub const HEADER_LEN: usize = 12;

pub const SYSEX_START: u8 = 0xF0;
pub const SYSEX_END: u8 = 0xF7;
pub const KORG_ID: u8 = 0x42;

/// Header byte 2 is `0x4g`, `g` being the global MIDI channel.
pub const CHANNEL_OFFSET: usize = 2;
pub const CHANNEL_MARKER: u8 = 0x40;
pub const CHANNEL_MARKER_MASK: u8 = 0xF0;
pub const CHANNEL_MASK: u8 = 0x0F;

pub const FUNCTION_OFFSET: usize = 12;
/// Scene data dump function code. Device-specific magic.
pub const FUNCTION_SCENE_DUMP: u8 = 0x40;

pub const PAYLOAD_RANGE: std::ops::Range<usize> = 13..401;
pub const TERMINATOR_OFFSET: usize = 401;

/// Declared data length as a 7-bit pair: function byte plus packed payload.
pub const DATA_LEN_MSB: u8 = 0x03;
pub const DATA_LEN_LSB: u8 = 0x05;
pub const DATA_LEN: usize = ((DATA_LEN_MSB as usize) << 7) | DATA_LEN_LSB as usize;

const _: () = assert!(DATA_LEN == 1 + PAYLOAD_RANGE.end - PAYLOAD_RANGE.start);
const _: () = assert!(TERMINATOR_OFFSET + 1 == FRAME_LEN);

/// A frame byte whose value never changes.
#[derive(Debug, Clone, Copy)]
pub struct FixedByte {
    pub field: &'static str,
    pub offset: usize,
    pub value: u8,
}

const fn fixed(field: &'static str, offset: usize, value: u8) -> FixedByte {
    FixedByte {
        field,
        offset,
        value,
    }
}

/// Constant header bytes (everything but the channel byte).
pub const HEADER_CONSTANTS: [FixedByte; 11] = [
    fixed("sysex start", 0, SYSEX_START),
    fixed("manufacturer id", 1, KORG_ID),
    fixed("software project", 3, 0x00),
    fixed("device id", 4, 0x01),
    fixed("device id", 5, 0x13),
    fixed("sub id", 6, 0x00),
    fixed("dump command", 7, 0x7F),
    fixed("dump command", 8, 0x7F),
    fixed("length format", 9, 0x02),
    fixed("data length", 10, DATA_LEN_MSB),
    fixed("data length", 11, DATA_LEN_LSB),
];

pub const FUNCTION: FixedByte = fixed("function", FUNCTION_OFFSET, FUNCTION_SCENE_DUMP);
pub const TERMINATOR: FixedByte = fixed("sysex end", TERMINATOR_OFFSET, SYSEX_END);

/// Current scene data dump request: `F0 42 4g 00 01 13 00 1F 10 00 F7`.
pub const DUMP_REQUEST_LEN: usize = 11;
pub const DATA_DUMP_REQUEST: u8 = 0x1F;
pub const SCENE_DUMP_REQUEST: u8 = 0x10;
