//! Durable key-value storage for user preferences
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// File name of the preferences file
const PREFS_FILE: &str = "prefs.json";

/// Error raised by a [`Storage`] backend
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object of strings
    #[error("malformed preferences: {0}")]
    Format(#[from] serde_json::Error),

    /// The backend refused the operation (e.g. disabled browser storage)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value store that outlives the process
pub trait Storage {
    /// Reads the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Storage that lives only as long as the process
///
/// This is the fallback when no durable backend is available.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage(BTreeMap<String, String>);

impl MemoryStorage {
    /// Builds an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.0.get(key).cloned())
    }
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Storage backed by a JSON object on disk
///
/// The whole file is read on every `get` and rewritten on every `set`; it
/// only ever holds a handful of keys.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Builds a store at the given path, which need not exist yet
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Picks the platform preferences file, if a home directory is known
    ///
    /// This is `prefs.json` in the per-user config directory, e.g.
    /// `$XDG_CONFIG_HOME/pocket/` on Linux or `%APPDATA%\pocket\config\`
    /// on Windows.
    pub fn default_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "pocket")?;
        Some(dirs.config_dir().join(PREFS_FILE))
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read(&self.path) {
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.load()?;
        map.insert(key.to_owned(), value.to_owned());
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_vec_pretty(&map)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("pocket-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("prefs.json")
    }

    #[test]
    fn memory_round_trip() {
        let mut s = MemoryStorage::new();
        assert_eq!(s.get("k").unwrap(), None);
        s.set("k", "v").unwrap();
        assert_eq!(s.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn file_round_trip() {
        let path = scratch("round-trip");
        let mut s = FileStorage::new(&path);
        assert_eq!(s.get("a").unwrap(), None);
        s.set("a", "1").unwrap();
        s.set("b", "2").unwrap();
        s.set("a", "3").unwrap();

        let s = FileStorage::new(&path);
        assert_eq!(s.get("a").unwrap().as_deref(), Some("3"));
        assert_eq!(s.get("b").unwrap().as_deref(), Some("2"));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn default_path_is_per_user() {
        // Every supported platform has a per-user config directory
        let path = FileStorage::default_path().unwrap();
        assert_eq!(path.file_name().unwrap(), PREFS_FILE);
        let dir = directories::ProjectDirs::from("", "", "pocket").unwrap();
        assert_eq!(path.parent().unwrap(), dir.config_dir());
        assert!(path.is_absolute());
    }

    #[test]
    fn file_malformed() {
        let path = scratch("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"not json").unwrap();
        let s = FileStorage::new(&path);
        assert!(matches!(s.get("a"), Err(StorageError::Format(..))));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
