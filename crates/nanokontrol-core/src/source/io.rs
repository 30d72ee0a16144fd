use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use super::{DumpSink, DumpSource, MAX_CAPTURE_LEN, SourceError};

/// `DumpSource` over any reader, such as a capture file or stdin.
pub struct IoSource<R> {
    inner: R,
}

impl<R: Read> IoSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl IoSource<File> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> DumpSource for IoSource<R> {
    fn read_dump(&mut self) -> Result<Vec<u8>, SourceError> {
        let mut bytes = Vec::new();
        (&mut self.inner)
            .take(MAX_CAPTURE_LEN as u64 + 1)
            .read_to_end(&mut bytes)?;
        if bytes.len() > MAX_CAPTURE_LEN {
            return Err(SourceError::TooLarge {
                limit: MAX_CAPTURE_LEN,
            });
        }
        Ok(bytes)
    }
}

/// `DumpSink` over any writer.
pub struct IoSink<W> {
    inner: W,
}

impl<W: Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl IoSink<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self, SourceError> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> DumpSink for IoSink<W> {
    fn write_dump(&mut self, bytes: &[u8]) -> Result<(), SourceError> {
        self.inner.write_all(bytes)?;
        self.inner.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{IoSink, IoSource};
    use crate::source::{DumpSink, DumpSource, MAX_CAPTURE_LEN, SourceError};

    #[test]
    fn source_reads_whole_stream() {
        let mut source = IoSource::new(Cursor::new(vec![0xF0, 0x42, 0xF7]));
        assert_eq!(source.read_dump().unwrap(), vec![0xF0, 0x42, 0xF7]);
    }

    #[test]
    fn source_rejects_oversized_stream() {
        let mut source = IoSource::new(Cursor::new(vec![0u8; MAX_CAPTURE_LEN + 1]));
        let err = source.read_dump().unwrap_err();
        assert!(matches!(err, SourceError::TooLarge { limit: MAX_CAPTURE_LEN }));
    }

    #[test]
    fn source_accepts_limit_exactly() {
        let mut source = IoSource::new(Cursor::new(vec![0u8; MAX_CAPTURE_LEN]));
        assert_eq!(source.read_dump().unwrap().len(), MAX_CAPTURE_LEN);
    }

    #[test]
    fn sink_writes_all_bytes() {
        let mut sink = IoSink::new(Vec::new());
        sink.write_dump(&[1, 2, 3]).unwrap();
        assert_eq!(sink.into_inner(), vec![1, 2, 3]);
    }
}
