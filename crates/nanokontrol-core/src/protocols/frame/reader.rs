use super::error::{FrameError, PayloadStage};
use super::layout::{self, FixedByte};

pub struct FrameReader<'a> {
    raw: &'a [u8],
}

impl<'a> FrameReader<'a> {
    pub fn new(raw: &'a [u8]) -> Self {
        Self { raw }
    }

    pub fn require_exact_len(&self, expected: usize) -> Result<(), FrameError> {
        if self.raw.len() != expected {
            return Err(FrameError::Length {
                stage: PayloadStage::Frame,
                expected,
                actual: self.raw.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, FrameError> {
        self.raw.get(offset).copied().ok_or(FrameError::Length {
            stage: PayloadStage::Frame,
            expected: offset + 1,
            actual: self.raw.len(),
        })
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], FrameError> {
        self.raw.get(range.clone()).ok_or(FrameError::Length {
            stage: PayloadStage::Packed,
            expected: range.end,
            actual: self.raw.len(),
        })
    }

    pub fn expect_fixed(&self, fixed: &FixedByte) -> Result<(), FrameError> {
        let actual = self.read_u8(fixed.offset)?;
        if actual != fixed.value {
            return Err(FrameError::HeaderMismatch {
                field: fixed.field,
                offset: fixed.offset,
                expected: fixed.value,
                actual,
            });
        }
        Ok(())
    }

    /// Read the `0x4g` channel byte and return `g`.
    pub fn read_global_channel(&self) -> Result<u8, FrameError> {
        let actual = self.read_u8(layout::CHANNEL_OFFSET)?;
        if actual & layout::CHANNEL_MARKER_MASK != layout::CHANNEL_MARKER {
            return Err(FrameError::HeaderMismatch {
                field: "global channel marker",
                offset: layout::CHANNEL_OFFSET,
                expected: layout::CHANNEL_MARKER,
                actual,
            });
        }
        Ok(actual & layout::CHANNEL_MASK)
    }
}
