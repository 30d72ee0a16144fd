use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{FrameError, PayloadStage};
use super::layout;
use super::reader::FrameReader;
use crate::protocols::bitpack;
use crate::protocols::record::{
    DecodeOptions, Decoded, RecordError, SettingsRecord, decode_record_with, encode_record,
    layout as record_layout,
};

/// Global MIDI channel (0-15), carried in the low nibble of header byte 2.
///
/// Serialized as a bare integer; out-of-range values fail to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GlobalChannel(u8);

impl GlobalChannel {
    pub const MAX: u8 = layout::CHANNEL_MASK;

    /// # Errors
    /// `FrameError::ChannelOutOfRange` when `value` exceeds `Self::MAX`.
    pub fn new(value: u8) -> Result<Self, FrameError> {
        if value > Self::MAX {
            return Err(FrameError::ChannelOutOfRange { value });
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for GlobalChannel {
    type Error = FrameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GlobalChannel> for u8 {
    fn from(channel: GlobalChannel) -> Self {
        channel.0
    }
}

impl fmt::Display for GlobalChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Variable part of the frame header; every other header byte is constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameHeader {
    pub global_channel: GlobalChannel,
}

impl FrameHeader {
    pub fn new(global_channel: GlobalChannel) -> Self {
        Self { global_channel }
    }

    /// Header bytes as they appear on the wire.
    pub fn to_bytes(&self) -> [u8; layout::HEADER_LEN] {
        let mut bytes = [0u8; layout::HEADER_LEN];
        for fixed in &layout::HEADER_CONSTANTS {
            bytes[fixed.offset] = fixed.value;
        }
        bytes[layout::CHANNEL_OFFSET] = layout::CHANNEL_MARKER | self.global_channel.get();
        bytes
    }
}

/// Validated frame split into its header and packed payload.
#[derive(Debug, Clone, Copy)]
pub struct FrameParts<'a> {
    pub header: FrameHeader,
    pub packed: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub header: FrameHeader,
    pub record: SettingsRecord,
    /// Findings reported instead of rejected, see `DecodeOptions`.
    pub issues: Vec<RecordError>,
}

/// Check the frame shape and every constant byte, then slice out the payload.
///
/// # Errors
/// `FrameError::Length` when `raw` is not exactly `layout::FRAME_LEN` bytes
/// (nothing else is inspected in that case) and `FrameError::HeaderMismatch`
/// for the first constant byte that differs.
pub fn split_frame(raw: &[u8]) -> Result<FrameParts<'_>, FrameError> {
    let reader = FrameReader::new(raw);
    reader.require_exact_len(layout::FRAME_LEN)?;

    for fixed in &layout::HEADER_CONSTANTS {
        reader.expect_fixed(fixed)?;
    }
    let global_channel = GlobalChannel(reader.read_global_channel()?);
    reader.expect_fixed(&layout::FUNCTION)?;
    reader.expect_fixed(&layout::TERMINATOR)?;

    Ok(FrameParts {
        header: FrameHeader { global_channel },
        packed: reader.read_slice(layout::PAYLOAD_RANGE)?,
    })
}

/// Decode a scene data dump frame with the default options.
///
/// # Examples
/// ```
/// use nanokontrol_core::protocols::frame::{FrameHeader, decode_frame, encode_frame};
/// use nanokontrol_core::protocols::record::SettingsRecord;
///
/// let record = SettingsRecord::factory_default();
/// let raw = encode_frame(&FrameHeader::default(), &record);
/// let decoded = decode_frame(&raw)?;
/// assert_eq!(decoded.record.groups.len(), 8);
/// # Ok::<(), nanokontrol_core::protocols::frame::FrameError>(())
/// ```
pub fn decode_frame(raw: &[u8]) -> Result<DecodedFrame, FrameError> {
    decode_frame_with(raw, &DecodeOptions::default())
}

pub fn decode_frame_with(raw: &[u8], options: &DecodeOptions) -> Result<DecodedFrame, FrameError> {
    let parts = split_frame(raw)?;
    if !bitpack::is_seven_bit_clean(parts.packed) {
        tracing::warn!("packed payload contains bytes with the high bit set");
    }

    let natural = bitpack::unpack(parts.packed);
    if natural.len() != record_layout::NATURAL_LEN {
        return Err(FrameError::Length {
            stage: PayloadStage::Natural,
            expected: record_layout::NATURAL_LEN,
            actual: natural.len(),
        });
    }
    tracing::debug!(
        packed = parts.packed.len(),
        natural = natural.len(),
        global_channel = parts.header.global_channel.get(),
        "frame unpacked"
    );

    let Decoded { record, issues } = decode_record_with(&natural, options)?;
    Ok(DecodedFrame {
        header: parts.header,
        record,
        issues,
    })
}

/// Build a device-writable frame from a header and a record.
pub fn encode_frame(header: &FrameHeader, record: &SettingsRecord) -> Vec<u8> {
    let packed = bitpack::pack(&encode_record(record));
    let mut raw = Vec::with_capacity(layout::FRAME_LEN);
    raw.extend_from_slice(&header.to_bytes());
    raw.push(layout::FUNCTION.value);
    raw.extend_from_slice(&packed);
    raw.push(layout::TERMINATOR.value);
    debug_assert_eq!(raw.len(), layout::FRAME_LEN);
    raw
}

/// Message asking the device for its current scene data dump.
///
/// # Examples
/// ```
/// use nanokontrol_core::protocols::frame::{GlobalChannel, dump_request};
///
/// assert_eq!(
///     dump_request(GlobalChannel::default()),
///     [0xF0, 0x42, 0x40, 0x00, 0x01, 0x13, 0x00, 0x1F, 0x10, 0x00, 0xF7]
/// );
/// ```
pub fn dump_request(global_channel: GlobalChannel) -> [u8; layout::DUMP_REQUEST_LEN] {
    let header = FrameHeader { global_channel }.to_bytes();
    let mut message = [0u8; layout::DUMP_REQUEST_LEN];
    message[..7].copy_from_slice(&header[..7]);
    message[7] = layout::DATA_DUMP_REQUEST;
    message[8] = layout::SCENE_DUMP_REQUEST;
    message[9] = 0x00;
    message[10] = layout::SYSEX_END;
    message
}

#[cfg(test)]
mod tests {
    use super::{
        FrameHeader, GlobalChannel, decode_frame, decode_frame_with, dump_request, encode_frame,
    };
    use crate::protocols::bitpack;
    use crate::protocols::frame::error::{FrameError, PayloadStage};
    use crate::protocols::frame::layout;
    use crate::protocols::record::{
        ControlMode, DecodeOptions, RecordError, SettingsRecord, encode_record,
        layout as record_layout,
    };

    fn factory_frame() -> Vec<u8> {
        encode_frame(&FrameHeader::default(), &SettingsRecord::factory_default())
    }

    #[test]
    fn encoded_frame_layout() {
        let raw = factory_frame();
        assert_eq!(raw.len(), layout::FRAME_LEN);
        assert_eq!(
            &raw[..13],
            &[0xF0, 0x42, 0x40, 0x00, 0x01, 0x13, 0x00, 0x7F, 0x7F, 0x02, 0x03, 0x05, 0x40]
        );
        assert_eq!(raw[layout::TERMINATOR_OFFSET], 0xF7);
        assert!(bitpack::is_seven_bit_clean(&raw[1..layout::TERMINATOR_OFFSET]));
    }

    #[test]
    fn decode_valid_frame() {
        let mut record = SettingsRecord::factory_default();
        record.common.control_mode = ControlMode::Sonar;
        record.groups[2].slider.max = 0xC8;
        let header = FrameHeader::new(GlobalChannel::new(9).unwrap());
        let raw = encode_frame(&header, &record);

        let decoded = decode_frame(&raw).unwrap();
        assert_eq!(decoded.header.global_channel.get(), 9);
        assert_eq!(decoded.record, record);
        assert_eq!(decoded.record.groups.len(), record_layout::GROUP_COUNT);
        assert!(decoded.issues.is_empty());
        assert_eq!(encode_frame(&decoded.header, &decoded.record), raw);
    }

    #[test]
    fn off_by_one_lengths_are_shape_errors() {
        let raw = factory_frame();
        let short = &raw[..layout::FRAME_LEN - 1];
        let mut long = raw.clone();
        long.push(0xF7);
        for candidate in [short, long.as_slice()] {
            let err = decode_frame(candidate).unwrap_err();
            assert_eq!(
                err,
                FrameError::Length {
                    stage: PayloadStage::Frame,
                    expected: layout::FRAME_LEN,
                    actual: candidate.len(),
                }
            );
        }
    }

    #[test]
    fn header_constant_mismatch_reports_offset() {
        let mut raw = factory_frame();
        raw[5] = 0x14;
        let err = decode_frame(&raw).unwrap_err();
        assert_eq!(
            err,
            FrameError::HeaderMismatch {
                field: "device id",
                offset: 5,
                expected: 0x13,
                actual: 0x14,
            }
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn function_and_terminator_are_checked() {
        let mut raw = factory_frame();
        raw[layout::FUNCTION_OFFSET] = 0x41;
        let err = decode_frame(&raw).unwrap_err();
        assert!(matches!(
            err,
            FrameError::HeaderMismatch {
                offset: layout::FUNCTION_OFFSET,
                ..
            }
        ));

        let mut raw = factory_frame();
        raw[layout::TERMINATOR_OFFSET] = 0x00;
        let err = decode_frame(&raw).unwrap_err();
        assert!(err.to_string().contains("sysex end mismatch at offset 401"));
    }

    #[test]
    fn reserved_byte_in_payload_surfaces_as_record_error() {
        let mut natural = encode_record(&SettingsRecord::factory_default());
        let offset = record_layout::group_offset(0) + record_layout::GROUP_SOLO_OFFSET + 5;
        natural[offset] = 0x01;
        let mut raw = factory_frame();
        raw[layout::PAYLOAD_RANGE].copy_from_slice(&bitpack::pack(&natural));

        let err = decode_frame(&raw).unwrap_err();
        assert_eq!(
            err,
            FrameError::Record(RecordError::ReservedByte {
                field: "groups[0].solo.reserved".to_string(),
                offset,
                value: 0x01,
            })
        );

        let decoded = decode_frame_with(&raw, &DecodeOptions::lenient()).unwrap();
        assert_eq!(decoded.issues.len(), 1);
    }

    #[test]
    fn dump_request_carries_channel() {
        let request = dump_request(GlobalChannel::new(3).unwrap());
        assert_eq!(request[2], 0x43);
        assert_eq!(request[0], 0xF0);
        assert_eq!(request[10], 0xF7);
    }

    #[test]
    fn global_channel_above_fifteen_is_refused() {
        assert_eq!(GlobalChannel::new(15).unwrap().get(), 15);
        assert_eq!(
            GlobalChannel::new(20).unwrap_err(),
            FrameError::ChannelOutOfRange { value: 20 }
        );

        let header: FrameHeader =
            serde_json::from_str(r#"{"global_channel": 7}"#).expect("in range");
        assert_eq!(header.global_channel.get(), 7);
        let err = serde_json::from_str::<FrameHeader>(r#"{"global_channel": 20}"#).unwrap_err();
        assert!(err.to_string().contains("global channel out of range: 20"));

        let json = serde_json::to_value(header).expect("serialize");
        assert_eq!(json, serde_json::json!({ "global_channel": 7 }));
    }
}
