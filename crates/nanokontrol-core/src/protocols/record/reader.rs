use super::error::RecordError;
use super::layout;
use super::options::{DecodeOptions, Policy};
use super::types::WireEnum;

/// Forward-only cursor over the natural payload.
///
/// Tracks the byte offset and the field path of the value being read so
/// every error can point at the exact byte. Findings that the options chose
/// to report instead of reject are collected as issues.
pub struct RecordReader<'a> {
    payload: &'a [u8],
    offset: usize,
    path: Vec<String>,
    options: DecodeOptions,
    issues: Vec<RecordError>,
}

impl<'a> RecordReader<'a> {
    pub fn new(payload: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            payload,
            offset: 0,
            path: Vec::new(),
            options,
            issues: Vec::new(),
        }
    }

    pub fn require_exact_len(&self, expected: usize) -> Result<(), RecordError> {
        if self.payload.len() != expected {
            return Err(RecordError::Length {
                expected,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Run `read` with `segment` appended to the field path.
    pub fn scoped<T>(
        &mut self,
        segment: impl Into<String>,
        read: impl FnOnce(&mut Self) -> Result<T, RecordError>,
    ) -> Result<T, RecordError> {
        self.path.push(segment.into());
        let result = read(self);
        self.path.pop();
        result
    }

    pub fn read_u8(&mut self) -> Result<u8, RecordError> {
        let value = self
            .payload
            .get(self.offset)
            .copied()
            .ok_or(RecordError::TooShort {
                needed: self.offset + 1,
                actual: self.payload.len(),
            })?;
        self.offset += 1;
        Ok(value)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], RecordError> {
        let end = self.offset + N;
        let bytes = self
            .payload
            .get(self.offset..end)
            .ok_or(RecordError::TooShort {
                needed: end,
                actual: self.payload.len(),
            })?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.offset = end;
        Ok(out)
    }

    pub fn read_enum<E: WireEnum>(&mut self, field: &str) -> Result<E, RecordError> {
        let offset = self.offset;
        let value = E::from_byte(self.read_u8()?);
        if !value.is_recognized() {
            let err = RecordError::UnrecognizedEnum {
                kind: E::KIND,
                field: self.field_path(field),
                offset,
                value: value.to_byte(),
            };
            self.handle(self.options.enums, err)?;
        }
        Ok(value)
    }

    /// Consume one reserved byte, which must be zero.
    pub fn expect_reserved(&mut self, field: &str) -> Result<(), RecordError> {
        let offset = self.offset;
        let value = self.read_u8()?;
        if value != layout::RESERVED {
            let err = RecordError::ReservedByte {
                field: self.field_path(field),
                offset,
                value,
            };
            self.handle(self.options.reserved_bytes, err)?;
        }
        Ok(())
    }

    pub fn expect_reserved_run(&mut self, field: &str, len: usize) -> Result<(), RecordError> {
        for index in 0..len {
            self.expect_reserved(&format!("{field}[{index}]"))?;
        }
        Ok(())
    }

    pub fn into_issues(self) -> Vec<RecordError> {
        self.issues
    }

    fn handle(&mut self, policy: Policy, err: RecordError) -> Result<(), RecordError> {
        match policy {
            Policy::Reject => Err(err),
            Policy::Report => {
                tracing::warn!(offset = err.offset(), "{err}");
                self.issues.push(err);
                Ok(())
            }
        }
    }

    fn field_path(&self, field: &str) -> String {
        if self.path.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.path.join("."), field)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RecordReader;
    use crate::protocols::record::error::RecordError;
    use crate::protocols::record::options::DecodeOptions;
    use crate::protocols::record::types::LedMode;

    #[test]
    fn reserved_error_carries_path_and_offset() {
        let payload = [0x00, 0x05];
        let mut reader = RecordReader::new(&payload, DecodeOptions::default());
        let err = reader
            .scoped("groups[2]", |r| {
                r.scoped("knob", |r| r.expect_reserved_run("reserved", 2))
            })
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::ReservedByte {
                field: "groups[2].knob.reserved[1]".to_string(),
                offset: 1,
                value: 0x05,
            }
        );
    }

    #[test]
    fn reported_findings_become_issues() {
        let payload = [0x07, 0x01];
        let mut reader = RecordReader::new(&payload, DecodeOptions::lenient());
        let led: LedMode = reader.read_enum("led_mode").unwrap();
        reader.expect_reserved("reserved").unwrap();
        assert_eq!(led, LedMode::Unrecognized(7));
        let issues = reader.into_issues();
        assert_eq!(issues.len(), 2);
        assert!(issues[0].is_recoverable());
        assert!(!issues[1].is_recoverable());
    }

    #[test]
    fn strict_rejects_unknown_enum() {
        let payload = [0x07];
        let mut reader = RecordReader::new(&payload, DecodeOptions::strict());
        let err = reader.read_enum::<LedMode>("led_mode").unwrap_err();
        assert!(err.to_string().contains("unrecognized LED mode value 0x07"));
    }

    #[test]
    fn read_past_end_is_too_short() {
        let payload = [0x01, 0x02];
        let mut reader = RecordReader::new(&payload, DecodeOptions::default());
        let err = reader.read_array::<3>().unwrap_err();
        assert_eq!(err, RecordError::TooShort { needed: 3, actual: 2 });
        assert_eq!(reader.offset(), 0);
    }
}
