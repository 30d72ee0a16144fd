//! Byte layout of the natural (unpacked) scene payload.

pub const NATURAL_LEN: usize = 339;
pub const RESERVED: u8 = 0x00;

pub const COMMON_OFFSET: usize = 0;
pub const COMMON_LEN: usize = 3;

/// Assign type, reserved, cc, min, max, reserved.
pub const CONTROL_LEN: usize = 6;
/// Assign type, behavior, cc, off, on, reserved.
pub const BUTTON_LEN: usize = 6;

pub const GROUP_COUNT: usize = 8;
/// Channel, slider, knob, solo, mute, rec.
pub const GROUP_LEN: usize = 1 + 2 * CONTROL_LEN + 3 * BUTTON_LEN;
pub const GROUPS_OFFSET: usize = COMMON_OFFSET + COMMON_LEN;

pub const TRANSPORT_BUTTON_NAMES: [&str; 11] = [
    "track_prev",
    "track_next",
    "cycle",
    "marker_set",
    "marker_prev",
    "marker_next",
    "rewind",
    "fast_forward",
    "stop",
    "play",
    "rec",
];
pub const CUSTOM_DAW_ASSIGN_LEN: usize = 5;
pub const TRANSPORT_RESERVED_LEN: usize = 16;
pub const TRANSPORT_OFFSET: usize = GROUPS_OFFSET + GROUP_COUNT * GROUP_LEN;
pub const TRANSPORT_LEN: usize = 1
    + TRANSPORT_BUTTON_NAMES.len() * BUTTON_LEN
    + CUSTOM_DAW_ASSIGN_LEN
    + TRANSPORT_RESERVED_LEN;

const _: () = assert!(TRANSPORT_OFFSET + TRANSPORT_LEN == NATURAL_LEN);

/// Offsets inside a controller group.
pub const GROUP_SLIDER_OFFSET: usize = 1;
pub const GROUP_KNOB_OFFSET: usize = GROUP_SLIDER_OFFSET + CONTROL_LEN;
pub const GROUP_SOLO_OFFSET: usize = GROUP_KNOB_OFFSET + CONTROL_LEN;
pub const GROUP_MUTE_OFFSET: usize = GROUP_SOLO_OFFSET + BUTTON_LEN;
pub const GROUP_REC_OFFSET: usize = GROUP_MUTE_OFFSET + BUTTON_LEN;

/// Offset of the reserved byte following a control's assign type.
pub const CONTROL_ASSIGN_RESERVED_OFFSET: usize = 1;
pub const CONTROL_TAIL_RESERVED_OFFSET: usize = 5;
pub const BUTTON_RESERVED_OFFSET: usize = 5;

pub const fn group_offset(index: usize) -> usize {
    GROUPS_OFFSET + index * GROUP_LEN
}

pub const fn transport_button_offset(index: usize) -> usize {
    TRANSPORT_OFFSET + 1 + index * BUTTON_LEN
}

pub const TRANSPORT_CUSTOM_DAW_OFFSET: usize =
    transport_button_offset(TRANSPORT_BUTTON_NAMES.len());
pub const TRANSPORT_RESERVED_OFFSET: usize =
    TRANSPORT_CUSTOM_DAW_OFFSET + CUSTOM_DAW_ASSIGN_LEN;

/// Global channel marker used by group and transport channel bytes.
pub const CHANNEL_FOLLOW_GLOBAL: u8 = 16;
