//! Document store adapters.
//!
//! [`FsDocumentStore`] reads YAML (or JSON, by extension) from disk.
//! [`InMemoryDocumentStore`] serves pre-parsed documents for tests and hosts
//! that assemble content without a data directory.

use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::infrastructure::ports::{DocumentError, DocumentStore};

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDocumentStore;

impl FsDocumentStore {
    pub fn new() -> Self {
        Self
    }

    fn parse(path: &Path, content: &str) -> Result<Value, DocumentError> {
        if content.trim().is_empty() {
            return Ok(Value::Null);
        }

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            return serde_json::from_str(content).map_err(|source| DocumentError::Json {
                path: path.to_path_buf(),
                source,
            });
        }

        // Parse into the YAML value model first so non-string mapping keys
        // (e.g. `1: ...`) become string keys instead of failing.
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|source| DocumentError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::to_value(yaml).map_err(|e| DocumentError::malformed(path, e))
    }
}

impl DocumentStore for FsDocumentStore {
    fn read_document(&self, path: &Path) -> Result<Option<Value>, DocumentError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DocumentError::io(path, e)),
        };
        Self::parse(path, &content).map(Some)
    }
}

/// Serves documents registered in memory, keyed by path.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<PathBuf, Value>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_document(self, path: impl Into<PathBuf>, document: Value) -> Self {
        self.insert(path, document);
        self
    }

    /// Add or replace the document at `path`.
    pub fn insert(&self, path: impl Into<PathBuf>, document: Value) {
        let mut documents = self
            .documents
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        documents.insert(path.into(), document);
    }

    /// Forget the document at `path`; later reads see it as missing.
    pub fn remove(&self, path: &Path) -> Option<Value> {
        let mut documents = self
            .documents
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        documents.remove(path)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn read_document(&self, path: &Path) -> Result<Option<Value>, DocumentError> {
        let documents = self
            .documents
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(documents.get(path).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn fs_store_reads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("localization.yaml");
        fs::write(&path, "en:\n  menu:\n    continue: Continue\n").unwrap();

        let doc = FsDocumentStore::new().read_document(&path).unwrap();
        assert_eq!(doc, Some(json!({"en": {"menu": {"continue": "Continue"}}})));
    }

    #[test]
    fn fs_store_reads_json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("races.json");
        fs::write(&path, r#"{"races": {"elf": {"name": "Elf"}}}"#).unwrap();

        let doc = FsDocumentStore::new().read_document(&path).unwrap();
        assert_eq!(doc, Some(json!({"races": {"elf": {"name": "Elf"}}})));
    }

    #[test]
    fn fs_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let doc = FsDocumentStore::new()
            .read_document(&dir.path().join("absent.yaml"))
            .unwrap();
        assert_eq!(doc, None);
    }

    #[test]
    fn fs_store_empty_file_is_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.yaml");
        fs::write(&path, "\n").unwrap();

        let doc = FsDocumentStore::new().read_document(&path).unwrap();
        assert_eq!(doc, Some(Value::Null));
    }

    #[test]
    fn fs_store_reports_yaml_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "en: [unclosed\n").unwrap();

        let err = FsDocumentStore::new().read_document(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Yaml { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn in_memory_store_round_trip() {
        let store = InMemoryDocumentStore::new().with_document("a.yaml", json!({"en": {}}));
        assert_eq!(
            store.read_document(Path::new("a.yaml")).unwrap(),
            Some(json!({"en": {}}))
        );
        store.remove(Path::new("a.yaml"));
        assert_eq!(store.read_document(Path::new("a.yaml")).unwrap(), None);
    }
}
