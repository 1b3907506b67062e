//! Per-format text extraction.
//!
//! Formats are modeled as an explicit enum so dispatch is exhaustive at
//! compile time. Markdown is treated as plain text; PDF text is pulled page
//! by page and joined with newlines.

use std::fs;
use std::path::Path;

use tracing::trace;

use crate::errors::StoreError;

/// Supported document formats, keyed by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Markdown,
    Pdf,
}

impl DocumentKind {
    /// Detects the format from a path's extension (case-insensitive).
    ///
    /// Returns `None` for anything unsupported, which discovery interprets
    /// as "skip silently".
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::PlainText),
            "md" => Some(Self::Markdown),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Extracts the full text of `path` according to the format.
    ///
    /// Text and Markdown are decoded as UTF-8 with invalid bytes replaced,
    /// so decoding never fails. PDF pages that yield no extractable text
    /// contribute an empty string so page order is preserved in the output.
    ///
    /// # Errors
    /// - `StoreError::Io` if the file cannot be read
    /// - `StoreError::Pdf` if the PDF cannot be parsed
    pub fn extract(self, path: &Path) -> Result<String, StoreError> {
        trace!("loader::extract kind={:?} path={:?}", self, path);
        match self {
            Self::PlainText | Self::Markdown => {
                let bytes = fs::read(path)?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            Self::Pdf => extract_pdf(path),
        }
    }
}

/// Page-by-page PDF text extraction, concatenated in page order.
fn extract_pdf(path: &Path) -> Result<String, StoreError> {
    let doc = lopdf::Document::load(path)
        .map_err(|e| StoreError::Pdf(format!("{}: {e}", path.display())))?;
    let pages: Vec<String> = doc
        .get_pages()
        .keys()
        .map(|page| doc.extract_text(&[*page]).unwrap_or_default())
        .collect();
    Ok(pages.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(
            DocumentKind::from_path(Path::new("a/b/NOTES.TXT")),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("readme.Md")),
            Some(DocumentKind::Markdown)
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("scan.PDF")),
            Some(DocumentKind::Pdf)
        );
    }

    #[test]
    fn unsupported_extensions_are_none() {
        assert_eq!(DocumentKind::from_path(Path::new("image.png")), None);
        assert_eq!(DocumentKind::from_path(Path::new("noextension")), None);
        assert_eq!(DocumentKind::from_path(Path::new("archive.tar.gz")), None);
    }

    #[test]
    fn plain_text_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        fs::write(&path, "some text").unwrap();
        let text = DocumentKind::PlainText.extract(&path).unwrap();
        assert_eq!(text, "some text");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(&[b'o', b'k', 0xFF, 0xFE, b'!']).unwrap();
        drop(f);
        let text = DocumentKind::PlainText.extract(&path).unwrap();
        assert!(text.starts_with("ok"));
        assert!(text.ends_with('!'));
    }

    #[test]
    fn corrupt_pdf_fails_with_pdf_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, "not a pdf at all").unwrap();
        let err = DocumentKind::Pdf.extract(&path).unwrap_err();
        assert!(matches!(err, StoreError::Pdf(_)));
    }
}
