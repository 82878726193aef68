//! Document persistence
//!
//! Storage is an external collaborator reached through [`DocumentStore`].
//! [`Library`] wraps a store with the editor's failure posture: reads degrade
//! to an empty collection and write failures are logged, never surfaced to
//! the editing session.

use crate::error::Result;
use crate::model::Document;
use std::fs::{rename, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub trait DocumentStore {
    fn list_all(&mut self) -> Result<Vec<Document>>;

    /// Upserts by `tactic_id` and returns the updated collection.
    fn save(&mut self, document: &Document) -> Result<Vec<Document>>;

    /// Removes by `tactic_id` and returns the remaining collection.
    fn delete_by_id(&mut self, tactic_id: &str) -> Result<Vec<Document>>;
}

fn upsert(documents: &mut Vec<Document>, document: &Document) {
    match documents.iter_mut().find(|d| d.tactic_id() == document.tactic_id()) {
        Some(existing) => *existing = document.clone(),
        None => documents.push(document.clone()),
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    documents: Vec<Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn list_all(&mut self) -> Result<Vec<Document>> {
        Ok(self.documents.clone())
    }

    fn save(&mut self, document: &Document) -> Result<Vec<Document>> {
        upsert(&mut self.documents, document);
        Ok(self.documents.clone())
    }

    fn delete_by_id(&mut self, tactic_id: &str) -> Result<Vec<Document>> {
        self.documents.retain(|d| d.tactic_id() != tactic_id);
        Ok(self.documents.clone())
    }
}

/// Whole collection kept as one JSON array (the database export format).
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<Document>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        let documents: Vec<Document> = serde_json::from_str(&data)?;
        debug!("Read {} documents from {:?}", documents.len(), self.path);
        Ok(documents)
    }

    /// Atomic write: temp file, fsync, rename.
    fn write(&self, documents: &[Document]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let data = serde_json::to_vec_pretty(documents)?;
        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, &self.path)?;

        debug!("Wrote {} bytes to {:?}", data.len(), self.path);
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn list_all(&mut self) -> Result<Vec<Document>> {
        self.read()
    }

    fn save(&mut self, document: &Document) -> Result<Vec<Document>> {
        let mut documents = self.read()?;
        upsert(&mut documents, document);
        self.write(&documents)?;
        Ok(documents)
    }

    fn delete_by_id(&mut self, tactic_id: &str) -> Result<Vec<Document>> {
        let mut documents = self.read()?;
        documents.retain(|d| d.tactic_id() != tactic_id);
        self.write(&documents)?;
        Ok(documents)
    }
}

pub struct Library<S> {
    store: S,
}

impl<S: DocumentStore> Library<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list_all(&mut self) -> Vec<Document> {
        match self.store.list_all() {
            Ok(documents) => documents,
            Err(e) => {
                warn!("Failed to list documents: {}", e);
                Vec::new()
            }
        }
    }

    /// `None` when the store failed; the failure is already logged.
    pub fn save(&mut self, document: &Document) -> Option<Vec<Document>> {
        match self.store.save(document) {
            Ok(documents) => {
                info!("Saved document {}", document.tactic_id());
                Some(documents)
            }
            Err(e) => {
                warn!("Failed to save document {}: {}", document.tactic_id(), e);
                None
            }
        }
    }

    pub fn delete_by_id(&mut self, tactic_id: &str) -> Vec<Document> {
        match self.store.delete_by_id(tactic_id) {
            Ok(documents) => {
                info!("Deleted document {}", tactic_id);
                documents
            }
            Err(e) => {
                warn!("Failed to delete document {}: {}", tactic_id, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TacticError;
    use crate::geometry::{Pitch, Position};
    use crate::model::{BallState, DocumentMeta, Frame, TeamsMeta};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn doc(id: &str, title: &str) -> Document {
        Document {
            meta: DocumentMeta {
                tactic_id: id.to_string(),
                title: title.to_string(),
                pitch: Pitch::default(),
                teams: TeamsMeta::default(),
                players: Vec::new(),
                last_modified: None,
            },
            frames: vec![Frame::new(BTreeMap::new(), BallState::loose(Position::ORIGIN))],
        }
    }

    struct BrokenStore;

    impl DocumentStore for BrokenStore {
        fn list_all(&mut self) -> Result<Vec<Document>> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "offline").into())
        }

        fn save(&mut self, _document: &Document) -> Result<Vec<Document>> {
            Err(TacticError::Validation("rejected".to_string()))
        }

        fn delete_by_id(&mut self, _tactic_id: &str) -> Result<Vec<Document>> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "offline").into())
        }
    }

    #[test]
    fn test_memory_upsert_and_delete() {
        let mut store = MemoryStore::new();
        store.save(&doc("t1", "one")).unwrap();
        store.save(&doc("t2", "two")).unwrap();
        let all = store.save(&doc("t1", "renamed")).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].meta.title, "renamed");

        let rest = store.delete_by_id("t1").unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].tactic_id(), "t2");
    }

    #[test]
    fn test_file_store_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("tactics.json");
        let mut store = JsonFileStore::new(&path);

        assert!(store.list_all().unwrap().is_empty());

        let original = doc("t1", "one");
        store.save(&original).unwrap();
        store.save(&doc("t2", "two")).unwrap();

        let mut reopened = JsonFileStore::new(&path);
        let all = reopened.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], original);
        assert!(!path.with_extension("tmp").exists());

        let rest = reopened.delete_by_id("t1").unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(reopened.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_file_store_corrupt_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tactics.json");
        std::fs::write(&path, "not json").unwrap();
        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.list_all(), Err(TacticError::Json(_))));

        let mut library = Library::new(store);
        assert!(library.list_all().is_empty());
    }

    #[test]
    fn test_library_degrades_on_failure() {
        let mut library = Library::new(BrokenStore);
        assert!(library.list_all().is_empty());
        assert!(library.save(&doc("t1", "one")).is_none());
        assert!(library.delete_by_id("t1").is_empty());
    }

    #[test]
    fn test_library_passes_through() {
        let mut library = Library::new(MemoryStore::new());
        assert_eq!(library.save(&doc("t1", "one")).unwrap().len(), 1);
        assert_eq!(library.list_all().len(), 1);
        assert!(library.delete_by_id("t1").is_empty());
    }
}
