//! Recursive document discovery under a data root.

use std::path::Path;

use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::errors::StoreError;
use crate::loader::DocumentKind;
use crate::record::Document;

/// Walks `root` recursively and lazily loads every supported file.
///
/// Files are read one at a time as the iterator advances, not up front.
/// Unsupported extensions are skipped silently. Entries the walker itself
/// cannot stat are skipped with a warning. A file that matches a supported
/// format but fails to load yields that file's error; callers propagating it
/// abort the walk.
///
/// Traversal order follows filesystem enumeration order and is not
/// guaranteed to be stable across platforms.
///
/// # Errors
/// Returns `StoreError::Config` if `root` does not exist.
pub fn find_documents(
    root: &Path,
) -> Result<impl Iterator<Item = Result<Document, StoreError>>, StoreError> {
    if !root.exists() {
        return Err(StoreError::Config(format!(
            "data root does not exist: {}",
            root.display()
        )));
    }

    debug!("discovery::find_documents root={:?}", root);

    let iter = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!("discovery: unreadable entry: {err}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let Some(kind) = DocumentKind::from_path(e.path()) else {
                trace!("discovery: skip unsupported {:?}", e.path());
                return None;
            };
            Some((e, kind))
        })
        .map(|(e, kind)| {
            let text = kind.extract(e.path())?;
            Ok(Document {
                path: e.path().to_path_buf(),
                text,
            })
        });

    Ok(iter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn collect_docs(root: &Path) -> Result<Vec<Document>, StoreError> {
        find_documents(root)?.collect()
    }

    #[test]
    fn walks_subdirectories_and_skips_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/b.md"), "bravo").unwrap();
        fs::write(dir.path().join("sub/c.png"), [0u8; 4]).unwrap();

        let mut docs = collect_docs(dir.path()).unwrap();
        docs.sort_by(|a, b| a.path.cmp(&b.path));
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].text, "alpha");
        assert_eq!(docs[1].text, "bravo");
    }

    #[test]
    fn missing_root_is_a_config_error() {
        let err = find_documents(Path::new("/definitely/not/here")).err().unwrap();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn corrupt_supported_file_aborts_the_walk() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.pdf"), "not a pdf").unwrap();
        let err = collect_docs(dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::Pdf(_)));
    }

    #[test]
    fn loading_is_deferred_until_iteration() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.pdf"), "not a pdf").unwrap();

        // Discovery itself succeeds; the loader failure surfaces per item.
        let results: Vec<_> = find_documents(dir.path()).unwrap().collect();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(StoreError::Pdf(_))));
    }

    #[test]
    fn empty_root_yields_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let docs = collect_docs(dir.path()).unwrap();
        assert!(docs.is_empty());
    }
}
