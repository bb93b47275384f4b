//! Host collaborators for preferences: a key-value persistence, and the system color scheme signal

use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use crate::config::COLOR_SCHEME_ENV_VAR;

/// An opaque string key-value persistence, that survives across sessions
pub trait KeyValueStorage {
    /// Returns the value stored for `key`, or `None` if nothing was ever stored
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>>;
    /// Store `value` for `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>>;
}

/// A read-only source telling whether the host prefers a dark color scheme
pub trait SystemPreference {
    fn prefers_dark(&self) -> bool;
}

impl SystemPreference for bool {
    fn prefers_dark(&self) -> bool {
        *self
    }
}

/// Reads the preferred color scheme from the environment (`dark` or `light`)
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvSystemPreference;

impl SystemPreference for EnvSystemPreference {
    fn prefers_dark(&self) -> bool {
        match std::env::var(COLOR_SCHEME_ENV_VAR) {
            Ok(scheme) => scheme.trim().eq_ignore_ascii_case("dark"),
            Err(_) => false,
        }
    }
}



/// A storage that only lives as long as the process
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}


/// A storage that keeps every value in its own file, inside a folder
#[derive(Clone, Debug, PartialEq)]
pub struct FileStorage {
    folder: PathBuf,
}

impl FileStorage {
    /// The folder is created on the first write
    pub fn new(folder: &Path) -> Self {
        Self { folder: PathBuf::from(folder) }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name = sanitize_filename::sanitize(key);
        self.folder.join(file_name)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Unable to read file {:?}: {}", path, err).into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        std::fs::create_dir_all(&self.folder)?;
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .map_err(|err| format!("Unable to write file {:?}: {}", path, err))?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("darkMode").unwrap(), None);
        storage.set("darkMode", "true").unwrap();
        assert_eq!(storage.get("darkMode").unwrap(), Some("true".to_string()));
        storage.set("darkMode", "false").unwrap();
        assert_eq!(storage.get("darkMode").unwrap(), Some("false".to_string()));
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("prefs");

        let mut storage = FileStorage::new(&folder);
        assert_eq!(storage.get("darkMode").unwrap(), None);
        storage.set("darkMode", "true").unwrap();

        let reopened = FileStorage::new(&folder);
        assert_eq!(reopened.get("darkMode").unwrap(), Some("true".to_string()));
    }

    #[test]
    fn file_storage_sanitizes_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.set("../escape/attempt", "value").unwrap();

        assert_eq!(storage.get("../escape/attempt").unwrap(), Some("value".to_string()));
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn system_preference_sources() {
        assert!(true.prefers_dark());
        assert!(false.prefers_dark() == false);
    }

    #[test]
    fn color_scheme_from_the_environment() {
        // This is the only test that touches this variable, so there is no race with other tests
        for (value, dark) in &[("dark", true), (" DARK\n", true), ("Dark", true), ("light", false), ("", false), ("darker", false)] {
            std::env::set_var(COLOR_SCHEME_ENV_VAR, value);
            assert_eq!(EnvSystemPreference.prefers_dark(), *dark, "{:?}", value);
        }

        std::env::remove_var(COLOR_SCHEME_ENV_VAR);
        assert!(EnvSystemPreference.prefers_dark() == false);
    }
}
