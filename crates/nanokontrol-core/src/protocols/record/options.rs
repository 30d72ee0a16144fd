/// What the decoder does with a recoverable finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Abort the decode with an error.
    Reject,
    /// Keep decoding and record the finding as an issue.
    Report,
}

/// Decoder configuration.
///
/// The default rejects nonzero reserved bytes and keeps unknown enumeration
/// bytes as `Unrecognized` variants (reported as issues).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub reserved_bytes: Policy,
    pub enums: Policy,
}

impl DecodeOptions {
    pub const fn strict() -> Self {
        Self {
            reserved_bytes: Policy::Reject,
            enums: Policy::Reject,
        }
    }

    pub const fn lenient() -> Self {
        Self {
            reserved_bytes: Policy::Report,
            enums: Policy::Report,
        }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            reserved_bytes: Policy::Reject,
            enums: Policy::Report,
        }
    }
}
