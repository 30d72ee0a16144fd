use super::layout;
use super::types::WireEnum;

/// Append-only buffer mirroring `RecordReader`.
pub struct RecordWriter {
    payload: Vec<u8>,
}

impl RecordWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            payload: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.payload.push(value);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.payload.extend_from_slice(bytes);
    }

    pub fn write_enum<E: WireEnum>(&mut self, value: E) {
        self.payload.push(value.to_byte());
    }

    pub fn write_reserved(&mut self, len: usize) {
        self.payload.extend(std::iter::repeat_n(layout::RESERVED, len));
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.payload
    }
}
