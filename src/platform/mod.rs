//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Keyed text storage (files on native, LocalStorage on web)
//! - The wasm entry point and game binding

use std::collections::HashMap;

use crate::error::PersistError;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Environment variable overriding the native data directory
pub const DATA_DIR_ENV: &str = "NINJA_DASH_DATA";
const DEFAULT_DATA_DIR: &str = ".ninja-dash";

/// Keyed text storage
pub trait TextStore {
    /// Read a value. A missing key is `Ok(None)`, not an error.
    fn read(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn write(&mut self, key: &str, text: &str) -> Result<(), PersistError>;
}

/// In-memory store for tests and sessions without storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, text: &str) -> Result<(), PersistError> {
        self.values.insert(key.to_string(), text.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{FileStore, data_dir};

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    use super::{DATA_DIR_ENV, DEFAULT_DATA_DIR, TextStore};
    use crate::error::PersistError;

    /// Data directory: `$NINJA_DASH_DATA`, else `./.ninja-dash`
    pub fn data_dir() -> PathBuf {
        std::env::var_os(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// One file per key inside a directory
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        /// Store rooted at [`data_dir`]
        pub fn open_default() -> Self {
            Self::new(data_dir())
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }
    }

    impl TextStore for FileStore {
        fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
            match fs::read_to_string(self.dir.join(key)) {
                Ok(text) => Ok(Some(text)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        /// Write to a temp file, then rename over the old value
        fn write(&mut self, key: &str, text: &str) -> Result<(), PersistError> {
            fs::create_dir_all(&self.dir)?;
            let path = self.dir.join(key);
            let tmp = self.dir.join(format!("{key}.tmp"));
            fs::write(&tmp, text)?;
            fs::rename(&tmp, &path)?;
            log::debug!("Wrote {}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_missing_key() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read("a").unwrap(), None);
        store.write("a", "1").unwrap();
        store.write("a", "2").unwrap();
        assert_eq!(store.read("a").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("ninja-dash-store-{}", std::process::id()));
        let mut store = FileStore::new(&dir);
        assert_eq!(store.read("settings.json").unwrap(), None);
        store.write("settings.json", "{}").unwrap();
        assert_eq!(store.read("settings.json").unwrap().as_deref(), Some("{}"));
        assert!(!dir.join("settings.json.tmp").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
