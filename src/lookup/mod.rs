//! Lookup Orchestration
//!
//! Composes the directory index and record resolution into a single "find
//! the image for this name" operation. Produces an outcome value for the
//! caller to render or act on; opening the file itself is delegated to the
//! launch module.

use crate::error::FindError;
use crate::index::{self, FileIndex};
use crate::metadata::{self, NameTable};
use crate::resolve::{self, ResolutionResult};
use crate::store::sqlite::SqliteRecordStore;
use crate::store::StoreSchema;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of a find-image request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The image exists on disk at this absolute path.
    Launch(PathBuf),
    /// The loaded metadata's join column is absent from the record store.
    SchemaMismatch { column: String },
    /// No record matched the name at any tier.
    RecordNotFound { name: String },
    /// A record matched but no indexed file carries its base-name.
    FileNotIndexed { base_name: String },
    /// Store, index, or metadata has not been set up yet.
    NotReady,
}

/// Session state for lookups: the selected record store, the current
/// directory index, and the loaded name table.
///
/// Single-threaded by design; a new index is fully built before being
/// installed, and the store is opened per call and dropped on every exit
/// path. Mutation and lookup never interleave.
pub struct LookupSession {
    schema: StoreSchema,
    store_path: Option<PathBuf>,
    index: Option<FileIndex>,
    names: Option<NameTable>,
}

impl LookupSession {
    pub fn new(schema: StoreSchema) -> Self {
        Self {
            schema,
            store_path: None,
            index: None,
            names: None,
        }
    }

    /// Select a record store file, vetting it by opening it once.
    pub fn set_store(&mut self, path: &Path) -> Result<(), FindError> {
        SqliteRecordStore::open(path)?;
        self.store_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Index a directory tree, replacing any previous index wholesale.
    /// Returns the number of indexed files.
    pub fn index_directory(&mut self, root: &Path) -> Result<usize, FindError> {
        let fresh = index::build_index(root)?;
        let entries = fresh.len();
        self.index = Some(fresh);
        Ok(entries)
    }

    /// Load the name table whose first column is the join key.
    pub fn load_names(&mut self, path: &Path, delimiter: Option<char>) -> Result<(), FindError> {
        let table = metadata::load_name_table(path, delimiter)?;
        self.names = Some(table);
        Ok(())
    }

    pub fn names(&self) -> Option<&NameTable> {
        self.names.as_ref()
    }

    /// Resolve a display name to an on-disk image.
    ///
    /// Requires the store, the index, and the metadata to all be present;
    /// otherwise reports `NotReady` without a partial attempt.
    pub fn find_image(&self, display_name: &str) -> Result<Outcome, FindError> {
        let (Some(store_path), Some(index), Some(names)) =
            (self.store_path.as_deref(), self.index.as_ref(), self.names.as_ref())
        else {
            return Ok(Outcome::NotReady);
        };

        let column = names.join_key();
        // Scoped acquisition: the connection lives for this attempt only.
        let store = SqliteRecordStore::open(store_path)?;
        let outcome = match resolve::resolve(&store, &self.schema, column, display_name)? {
            ResolutionResult::ColumnMissing => Outcome::SchemaMismatch {
                column: column.to_string(),
            },
            ResolutionResult::NotFoundInRecords => Outcome::RecordNotFound {
                name: display_name.to_string(),
            },
            ResolutionResult::Found(base_name) => match index.get(&base_name) {
                Some(path) => Outcome::Launch(path.clone()),
                None => Outcome::FileNotIndexed { base_name },
            },
        };

        info!(name = display_name, outcome = ?outcome, "lookup finished");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_before_setup_is_not_ready() {
        let session = LookupSession::new(StoreSchema::default());
        let outcome = session.find_image("Jane Doe").unwrap();
        assert_eq!(outcome, Outcome::NotReady);
    }

    #[test]
    fn test_partial_setup_is_not_ready() {
        let temp = tempfile::tempdir().unwrap();
        let mut session = LookupSession::new(StoreSchema::default());
        session.index_directory(temp.path()).unwrap();
        let outcome = session.find_image("Jane Doe").unwrap();
        assert_eq!(outcome, Outcome::NotReady);
    }

    #[test]
    fn test_set_store_rejects_non_database() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("plain.txt");
        std::fs::write(&path, "just text standing in for a database file").unwrap();
        let mut session = LookupSession::new(StoreSchema::default());
        let err = session.set_store(&path).unwrap_err();
        assert!(matches!(err, FindError::StoreUnavailable(_)));
        assert_eq!(session.find_image("x").unwrap(), Outcome::NotReady);
    }

    #[test]
    fn test_reindex_replaces_previous_index() {
        let first = tempfile::tempdir().unwrap();
        std::fs::write(first.path().join("a.png"), b"a").unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join("b.png"), b"b").unwrap();

        let mut session = LookupSession::new(StoreSchema::default());
        assert_eq!(session.index_directory(first.path()).unwrap(), 1);
        assert_eq!(session.index_directory(second.path()).unwrap(), 1);

        let index = session.index.as_ref().unwrap();
        assert!(!index.contains_key("a.png"));
        assert!(index.contains_key("b.png"));
    }
}
