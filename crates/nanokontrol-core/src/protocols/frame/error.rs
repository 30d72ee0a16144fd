use std::fmt;

use thiserror::Error;

use crate::protocols::record::RecordError;

/// Decode stage at which a length check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadStage {
    Frame,
    Packed,
    Natural,
}

impl fmt::Display for PayloadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayloadStage::Frame => "frame",
            PayloadStage::Packed => "packed payload",
            PayloadStage::Natural => "natural payload",
        };
        f.write_str(name)
    }
}

/// Errors returned by frame decoding.
///
/// # Examples
/// ```
/// use nanokontrol_core::protocols::frame::{FrameError, PayloadStage};
///
/// let err = FrameError::Length {
///     stage: PayloadStage::Frame,
///     expected: 402,
///     actual: 401,
/// };
/// assert!(err.to_string().contains("expected 402 bytes, got 401"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("{stage} length mismatch: expected {expected} bytes, got {actual}")]
    Length {
        stage: PayloadStage,
        expected: usize,
        actual: usize,
    },
    #[error("{field} mismatch at offset {offset}: expected 0x{expected:02x}, got 0x{actual:02x}")]
    HeaderMismatch {
        field: &'static str,
        offset: usize,
        expected: u8,
        actual: u8,
    },
    #[error("global channel out of range: {value} (expected 0-15)")]
    ChannelOutOfRange { value: u8 },
    #[error("scene record: {0}")]
    Record(#[from] RecordError),
}

impl FrameError {
    /// Whether the caller may keep the decoded value despite this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            FrameError::Record(err) => err.is_recoverable(),
            FrameError::Length { .. }
            | FrameError::HeaderMismatch { .. }
            | FrameError::ChannelOutOfRange { .. } => false,
        }
    }
}
