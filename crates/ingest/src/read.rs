//! Strict document reading.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::CorpusConfig;
use crate::error::IngestError;

const UTF8_BOM: &str = "\u{feff}";

/// Read `path` as UTF-8 text.
///
/// Enforces `max_file_bytes` before reading, rejects invalid UTF-8 instead of
/// replacing it, and strips a leading byte order mark.
pub fn read_document(path: &Path, cfg: &CorpusConfig) -> Result<String, IngestError> {
    let meta = fs::metadata(path).map_err(|err| IngestError::io(path, &err))?;
    if !meta.is_file() {
        return Err(IngestError::Io {
            path: path.to_path_buf(),
            message: "not a regular file".into(),
        });
    }
    if let Some(limit) = cfg.max_file_bytes {
        if meta.len() > limit {
            return Err(IngestError::FileTooLarge {
                path: path.to_path_buf(),
                size: meta.len(),
                limit,
            });
        }
    }

    let bytes = fs::read(path).map_err(|err| IngestError::io(path, &err))?;
    let text = String::from_utf8(bytes).map_err(|_| IngestError::InvalidUtf8 {
        path: path.to_path_buf(),
    })?;
    debug!(path = %path.display(), bytes = text.len(), "document_read");

    Ok(match text.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    })
}
