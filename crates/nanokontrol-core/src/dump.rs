use std::fs;
use std::path::Path;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::protocols::frame::{self, DecodedFrame, FrameError};
use crate::protocols::record::DecodeOptions;
use crate::source::{DumpSink, DumpSource, IoSource, SourceError};
use crate::{Issue, SettingsDocument, make_document};

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),
}

/// Read and decode a capture file.
///
/// `generated_at` is the file's modification time when the platform
/// reports one.
pub fn decode_dump_file(
    path: &Path,
    options: &DecodeOptions,
) -> Result<SettingsDocument, DumpError> {
    let source = IoSource::open(path)?;
    let mut document = decode_dump(path, source, options)?;
    if let Some(modified) = modified_rfc3339(path) {
        document.generated_at = modified;
    }
    Ok(document)
}

pub fn decode_dump<S: DumpSource>(
    path: &Path,
    mut source: S,
    options: &DecodeOptions,
) -> Result<SettingsDocument, DumpError> {
    let raw = source.read_dump()?;
    let DecodedFrame {
        header,
        record,
        issues,
    } = frame::decode_frame_with(&raw, options)?;

    let mut document = make_document(
        &path.display().to_string(),
        raw.len() as u64,
        header,
        record,
    );
    document.issues = issues.iter().map(Issue::from_record_error).collect();
    tracing::info!(
        path = %path.display(),
        issues = document.issues.len(),
        "scene dump decoded"
    );
    Ok(document)
}

/// Encode a document into a device-writable 402-byte frame.
pub fn encode_document(document: &SettingsDocument) -> Vec<u8> {
    frame::encode_frame(&document.header, &document.settings)
}

/// Encode a document and write the frame to `sink`.
pub fn write_document<K: DumpSink>(
    document: &SettingsDocument,
    sink: &mut K,
) -> Result<usize, DumpError> {
    let raw = encode_document(document);
    sink.write_dump(&raw)?;
    tracing::info!(bytes = raw.len(), "scene dump written");
    Ok(raw.len())
}

fn modified_rfc3339(path: &Path) -> Option<String> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    OffsetDateTime::from(modified).format(&Rfc3339).ok()
}
