//! Directory Index
//!
//! Converts a directory tree into a flat base-name to absolute-path index.
//! The index reflects one consistent traversal snapshot; callers replace it
//! wholesale on re-index rather than merging.

use crate::error::FindError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Base-name (file name with extension, no directory component) to
/// absolute path. Duplicate base-names keep the path visited later.
pub type FileIndex = HashMap<String, PathBuf>;

/// Build a fresh index for the tree rooted at `root`.
///
/// Traversal is depth-first with the files of each directory emitted before
/// its subdirectories are recursed, siblings in name order. A directory
/// whose contents cannot be enumerated is skipped along with its subtree;
/// the scan continues with the remaining directories.
pub fn build_index(root: &Path) -> Result<FileIndex, FindError> {
    let root = fs::canonicalize(root).map_err(|source| FindError::InvalidRoot {
        path: root.to_path_buf(),
        source: Some(source),
    })?;
    if !root.is_dir() {
        return Err(FindError::InvalidRoot {
            path: root,
            source: None,
        });
    }

    let mut index = FileIndex::new();
    let walker = WalkDir::new(&root).sort_by(|a, b| {
        // Files before subdirectories, then name order. Later entries win
        // on base-name collisions, so a file in a subdirectory shadows a
        // same-named file in its parent.
        a.file_type()
            .is_dir()
            .cmp(&b.file_type().is_dir())
            .then_with(|| a.file_name().cmp(b.file_name()))
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "skipping unreadable directory");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let base_name = entry.file_name().to_string_lossy().into_owned();
        index.insert(base_name, entry.into_path());
    }

    debug!(root = %root.display(), entries = index.len(), "directory index built");
    Ok(index)
}
