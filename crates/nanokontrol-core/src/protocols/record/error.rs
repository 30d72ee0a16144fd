use thiserror::Error;

/// Errors returned by scene record decoding.
///
/// Offsets are relative to the start of the natural (unpacked) payload and
/// field paths name the position in the record, e.g.
/// `groups[3].slider.reserved[1]`.
///
/// # Examples
/// ```
/// use nanokontrol_core::protocols::record::RecordError;
///
/// let err = RecordError::ReservedByte {
///     field: "groups[0].solo.reserved".to_string(),
///     offset: 18,
///     value: 0x01,
/// };
/// assert!(err.to_string().contains("offset 18"));
/// assert!(!err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("natural payload length mismatch: expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },
    /// A `RecordReader` ran past the end of its payload. `decode_record_with`
    /// checks the length first, so this only surfaces from direct reader use.
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("reserved byte {field} at offset {offset}: expected 0x00, got 0x{value:02x}")]
    ReservedByte {
        field: String,
        offset: usize,
        value: u8,
    },
    #[error("unrecognized {kind} value 0x{value:02x} for {field} at offset {offset}")]
    UnrecognizedEnum {
        kind: &'static str,
        field: String,
        offset: usize,
        value: u8,
    },
}

impl RecordError {
    /// Whether the caller may keep the decoded value despite this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RecordError::UnrecognizedEnum { .. })
    }

    pub fn offset(&self) -> Option<usize> {
        match self {
            RecordError::ReservedByte { offset, .. }
            | RecordError::UnrecognizedEnum { offset, .. } => Some(*offset),
            RecordError::Length { .. } | RecordError::TooShort { .. } => None,
        }
    }
}
