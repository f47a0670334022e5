//! File type classification.
//!
//! Content sniffing is authoritative: it handles misleading or missing
//! extensions but needs read access and non-empty content. Extension
//! mapping is the fallback for unreadable or empty files. The caller picks
//! the fallback path by inspecting the returned error kind.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use filecensus_core::Category;

/// How many leading bytes are read for signature detection.
const SNIFF_LEN: u64 = 8192;

/// Errors from signature-based classification.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The file content could not be read for lack of permission.
    #[error("permission denied reading {path}")]
    PermissionDenied { path: PathBuf },

    /// Any other read failure.
    #[error("error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Content-first file type classifier.
///
/// Stateless, but constructed explicitly and injected into the analyzer so
/// tests can substitute classification without process-wide state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier;

impl Classifier {
    /// Create a new classifier.
    pub fn new() -> Self {
        Self
    }

    /// Classify a file by its content signature.
    ///
    /// Empty files fall back to [`Classifier::from_extension`]. Content
    /// with no recognizable signature is `text` when it decodes as UTF-8
    /// and `executable` (the octet-stream bucket) otherwise.
    pub fn from_signature(&self, path: &Path) -> Result<Category, ClassifyError> {
        let head = read_head(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::PermissionDenied => ClassifyError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => ClassifyError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        if head.is_empty() {
            return Ok(self.from_extension(path));
        }
        if let Some(kind) = infer::get(&head) {
            return Ok(Category::from_mime(kind.mime_type()));
        }
        if looks_like_text(&head) {
            Ok(Category::TEXT)
        } else {
            Ok(Category::EXECUTABLE)
        }
    }

    /// Classify a file purely by its filename extension.
    ///
    /// Returns [`Category::UNKNOWN`] when the extension has no MIME
    /// mapping.
    pub fn from_extension(&self, path: &Path) -> Category {
        match mime_guess::from_path(path).first() {
            Some(mime) => Category::from_mime(mime.essence_str()),
            None => Category::UNKNOWN,
        }
    }
}

/// Read the leading bytes used for signature detection.
fn read_head(path: &Path) -> std::io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN).read_to_end(&mut head)?;
    Ok(head)
}

/// Heuristic for signature-less content: printable text or binary data.
fn looks_like_text(head: &[u8]) -> bool {
    if head.contains(&0) {
        return false;
    }
    match std::str::from_utf8(head) {
        Ok(_) => true,
        // error_len() of None means a multi-byte character was cut off at
        // the read boundary, which still counts as text.
        Err(e) => e.error_len().is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_mapping() {
        let classifier = Classifier::new();
        assert_eq!(
            classifier.from_extension(Path::new("a.txt")),
            Category::TEXT
        );
        assert_eq!(
            classifier.from_extension(Path::new("photo.png")),
            Category::new("image")
        );
        assert_eq!(
            classifier.from_extension(Path::new("paper.pdf")),
            Category::PDF
        );
        assert_eq!(
            classifier.from_extension(Path::new("backup.zip")),
            Category::ARCHIVE
        );
        assert_eq!(
            classifier.from_extension(Path::new("backup.tar")),
            Category::ARCHIVE
        );
        assert_eq!(
            classifier.from_extension(Path::new("no_extension")),
            Category::UNKNOWN
        );
        assert_eq!(
            classifier.from_extension(Path::new("odd.unknownext")),
            Category::UNKNOWN
        );
    }

    #[test]
    fn test_text_heuristic() {
        assert!(looks_like_text(b"plain ascii\n"));
        assert!(looks_like_text("snowman \u{2603}".as_bytes()));
        // Truncated multi-byte character at the boundary.
        let mut truncated = "ok \u{2603}".as_bytes().to_vec();
        truncated.pop();
        assert!(looks_like_text(&truncated));

        assert!(!looks_like_text(b"\x00\x01\x02"));
        assert!(!looks_like_text(b"\xff\xfe binary"));
    }
}
