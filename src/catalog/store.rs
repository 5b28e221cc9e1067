//! Catalog file load/save with atomic replace.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use super::entry::SeriesEntry;
use super::error::CatalogError;

/// Load/save access to the series catalog file.
///
/// The store owns no in-memory state: `load` hands the full catalog to the
/// caller and `save` replaces the file wholesale. Saves go through a
/// sibling temp file followed by a rename, so a reader never observes a
/// partially written catalog.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Creates a store for the catalog at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the catalog file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the full catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] when the file cannot be read and
    /// [`CatalogError::Corrupt`] when it does not parse as a JSON array of
    /// series records.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Vec<SeriesEntry>, CatalogError> {
        let contents =
            fs::read_to_string(&self.path).map_err(|e| CatalogError::io(&self.path, e))?;

        let entries: Vec<SeriesEntry> = serde_json::from_str(&contents)
            .map_err(|e| CatalogError::corrupt(&self.path, e.to_string()))?;

        debug!(entries = entries.len(), "catalog loaded");
        Ok(entries)
    }

    /// Replaces the persisted catalog with `entries`.
    ///
    /// The new contents are written to a temp file next to the catalog and
    /// renamed over it, so the previous catalog stays intact until the new
    /// one is fully on disk. Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] when writing or renaming fails.
    #[instrument(skip(self, entries), fields(path = %self.path.display(), entries = entries.len()))]
    pub fn save(&self, entries: &[SeriesEntry]) -> Result<(), CatalogError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
        }

        // Infallible: SeriesEntry serialization has no non-string keys or
        // other shapes serde_json can reject.
        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| CatalogError::corrupt(&self.path, e.to_string()))?;

        let tmp_path = self.temp_path();
        fs::write(&tmp_path, contents).map_err(|e| CatalogError::io(&tmp_path, e))?;

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(CatalogError::io(&self.path, e));
        }

        debug!(entries = entries.len(), "catalog saved");
        Ok(())
    }

    /// Sibling temp path used during save.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map_or_else(
            || std::ffi::OsString::from("catalog.json"),
            std::borrow::ToOwned::to_owned,
        );
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_catalog(path: &Path, contents: &str) {
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_load_parses_catalog_array() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        write_catalog(
            &path,
            r#"[{"name":"foo","downloaded":false},{"name":"bar","downloaded":true}]"#,
        );

        let entries = CatalogStore::new(&path).load().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "foo");
        assert!(!entries[0].downloaded);
        assert!(entries[1].downloaded);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = CatalogStore::new(temp_dir.path().join("absent.json"));

        let result = store.load();
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn test_load_malformed_json_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        write_catalog(&path, "not json at all");

        let result = CatalogStore::new(&path).load();
        assert!(matches!(result, Err(CatalogError::Corrupt { .. })));
    }

    #[test]
    fn test_load_wrong_shape_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        // An object where an array is expected.
        write_catalog(&path, r#"{"name":"foo","downloaded":false}"#);

        let result = CatalogStore::new(&path).load();
        assert!(matches!(result, Err(CatalogError::Corrupt { .. })));
    }

    #[test]
    fn test_save_then_load_roundtrips() {
        let temp_dir = TempDir::new().unwrap();
        let store = CatalogStore::new(temp_dir.path().join("catalog.json"));

        let mut entries = vec![SeriesEntry::new("foo"), SeriesEntry::new("bar")];
        entries[1].mark_downloaded();
        store.save(&entries).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, entries);
    }

    #[test]
    fn test_save_preserves_extra_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        write_catalog(
            &path,
            r#"[{"name":"foo","downloaded":false,"timestamp":1612345678901}]"#,
        );
        let store = CatalogStore::new(&path);

        let mut entries = store.load().unwrap();
        entries[0].mark_downloaded();
        store.save(&entries).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[0]["downloaded"], json!(true));
        assert_eq!(raw[0]["timestamp"], json!(1_612_345_678_901_i64));
    }

    #[test]
    fn test_save_leaves_no_temp_file_behind() {
        let temp_dir = TempDir::new().unwrap();
        let store = CatalogStore::new(temp_dir.path().join("catalog.json"));

        store.save(&[SeriesEntry::new("foo")]).unwrap();

        let names: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["catalog.json".to_string()]);
    }

    #[test]
    fn test_save_replaces_existing_catalog_wholesale() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        write_catalog(&path, r#"[{"name":"old","downloaded":true}]"#);
        let store = CatalogStore::new(&path);

        store.save(&[SeriesEntry::new("new")]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "new");
    }

    #[test]
    fn test_save_creates_missing_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache").join("catalog.json");
        let store = CatalogStore::new(&path);

        store.save(&[SeriesEntry::new("foo")]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_empty_catalog_is_valid() {
        let temp_dir = TempDir::new().unwrap();
        let store = CatalogStore::new(temp_dir.path().join("catalog.json"));

        store.save(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }
}
