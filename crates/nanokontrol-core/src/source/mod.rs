//! Byte sources and sinks for scene dumps.
//!
//! The codec never touches files itself; these types read a whole capture
//! into memory or write an encoded frame out, and nothing else.

mod io;

pub use io::{IoSink, IoSource};

use thiserror::Error;

/// Largest capture accepted by `IoSource`; a scene dump is 402 bytes.
pub const MAX_CAPTURE_LEN: usize = 2000;

pub trait DumpSource {
    /// Read the complete capture.
    fn read_dump(&mut self) -> Result<Vec<u8>, SourceError>;
}

pub trait DumpSink {
    /// Write all of `bytes` and flush.
    fn write_dump(&mut self, bytes: &[u8]) -> Result<(), SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("capture too large: more than {limit} bytes")]
    TooLarge { limit: usize },
}
