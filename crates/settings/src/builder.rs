//! Fluent construction of key-value settings

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use jsonsettings_core::Result;

use crate::file::{KeyValueFile, SettingsFile};
use crate::store::KeyValueSettings;

/// Builder for [`KeyValueSettings`]
///
/// ```no_run
/// use jsonsettings::KeyValueSettingsBuilder;
///
/// let settings = KeyValueSettingsBuilder::from_file("settings.json")
///     .with_default("isTest", true)?
///     .load_or_create()?
///     .build();
///
/// assert!(settings.get_bool("isTest")?);
/// # Ok::<(), jsonsettings::SettingsError>(())
/// ```
#[derive(Debug)]
pub struct KeyValueSettingsBuilder {
    settings: KeyValueSettings,
    loaded: bool,
}

impl KeyValueSettingsBuilder {
    /// Start from an empty store bound to `path`. Does not read the file.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            settings: KeyValueSettings::new(path),
            loaded: false,
        }
    }

    /// Continue configuring an existing store.
    ///
    /// The caller owns the store's load state, so
    /// [`ensure_created`](Self::ensure_created) does not warn when it
    /// overwrites an existing file.
    pub fn from_settings(settings: KeyValueSettings) -> Self {
        Self {
            settings,
            loaded: true,
        }
    }

    /// Start from `folder/file_name`, creating `folder` if needed
    pub fn in_folder(folder: impl AsRef<Path>, file_name: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            settings: KeyValueSettings::in_folder(folder, file_name)?,
            loaded: false,
        })
    }

    /// Declare a default value. Fails if `key` already has one.
    pub fn with_default<T: Serialize>(mut self, key: &str, value: T) -> Result<Self> {
        self.settings.add_default(key, value)?;
        Ok(self)
    }

    /// Declare several defaults
    pub fn with_defaults<K, V, I>(mut self, defaults: I) -> Result<Self>
    where
        K: AsRef<str>,
        V: Serialize,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in defaults {
            self.settings.add_default(key.as_ref(), value)?;
        }
        Ok(self)
    }

    /// Declare several defaults given as document nodes
    pub fn with_default_values<K, I>(mut self, defaults: I) -> Result<Self>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Value)>,
    {
        for (key, value) in defaults {
            self.settings.add_default_value(key.as_ref(), value)?;
        }
        Ok(self)
    }

    /// Load the file if it exists. A malformed file is still an error.
    pub fn load_if_exists(mut self) -> Result<Self> {
        if self.settings.load(false)? {
            self.loaded = true;
        }
        Ok(self)
    }

    /// Make sure the file exists on disk.
    ///
    /// When the file is missing and `use_defaults` is set, every declared
    /// default whose key is not already in the document is copied in first.
    /// Existing keys are never overwritten.
    ///
    /// The in-memory document is always saved. If the file already exists
    /// and was not loaded beforehand, its contents are replaced by whatever
    /// is in memory, possibly nothing. Call
    /// [`load_if_exists`](Self::load_if_exists) first, or use
    /// [`load_or_create`](Self::load_or_create).
    pub fn ensure_created(mut self, use_defaults: bool) -> Result<Self> {
        let existed = self.settings.exists();
        if !existed && use_defaults {
            let filled = self.settings.fill_missing_defaults();
            debug!("Populated {} default settings", filled);
        }
        if existed && !self.loaded {
            warn!(
                "Overwriting {:?} with settings that were never loaded from it",
                self.settings.path()
            );
        }

        self.settings.save()?;
        if !existed {
            info!("Created settings file {:?}", self.settings.path());
        }
        Ok(self)
    }

    /// [`load_if_exists`](Self::load_if_exists) followed by
    /// [`ensure_created`](Self::ensure_created) with defaults written to a
    /// newly created file
    pub fn load_or_create(self) -> Result<Self> {
        self.load_if_exists()?.ensure_created(true)
    }

    /// Hand the store over to the caller
    pub fn build(self) -> KeyValueSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonsettings_core::SettingsError;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_from_file_does_not_touch_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let settings = KeyValueSettingsBuilder::from_file(&path).build();
        assert!(!path.exists());
        assert!(settings.keys().is_empty());
    }

    #[test]
    fn test_duplicate_default_propagates() {
        let dir = TempDir::new().unwrap();
        let result = KeyValueSettingsBuilder::from_file(dir.path().join("s.json"))
            .with_default("a", 1)
            .and_then(|b| b.with_defaults([("b", 2), ("a", 3)]));
        assert!(matches!(result, Err(SettingsError::DuplicateKey(ref k)) if k == "a"));
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let settings = KeyValueSettingsBuilder::from_file(&path)
            .with_default("isTest", true)
            .unwrap()
            .load_or_create()
            .unwrap()
            .build();

        assert!(settings.get_bool("isTest").unwrap());
        let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, json!({ "isTest": true }));
    }

    #[test]
    fn test_ensure_created_without_defaults_writes_empty_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let settings = KeyValueSettingsBuilder::from_file(&path)
            .with_default("isTest", true)
            .unwrap()
            .ensure_created(false)
            .unwrap()
            .build();

        assert!(!settings.contains_key("isTest"));
        assert!(settings.get_bool("isTest").unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_ensure_created_fills_gaps_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = KeyValueSettings::new(&path);
        store.set("a", "mine").unwrap();

        let settings = KeyValueSettingsBuilder::from_settings(store)
            .with_defaults([("a", "default-a"), ("b", "default-b")])
            .unwrap()
            .ensure_created(true)
            .unwrap()
            .build();
        assert_eq!(settings.get_value("a"), Some(&json!("mine")));
        assert_eq!(settings.get_value("b"), Some(&json!("default-b")));
    }

    #[test]
    fn test_existing_file_ignores_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"volume": 3}"#).unwrap();

        let settings = KeyValueSettingsBuilder::from_file(&path)
            .with_default("muted", false)
            .unwrap()
            .load_or_create()
            .unwrap()
            .build();

        assert_eq!(settings.get::<u8>("volume").unwrap(), 3);
        assert!(!settings.contains_key("muted"));
        let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, json!({ "volume": 3 }));
    }

    #[test]
    fn test_ensure_created_without_load_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"volume": 3}"#).unwrap();

        KeyValueSettingsBuilder::from_file(&path)
            .ensure_created(true)
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_from_settings_keeps_loaded_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"volume": 3}"#).unwrap();

        let mut store = KeyValueSettings::new(&path);
        assert!(store.load(true).unwrap());

        let builder = KeyValueSettingsBuilder::from_settings(store);
        assert!(builder.loaded);
        assert!(!KeyValueSettingsBuilder::from_file(&path).loaded);

        builder.ensure_created(true).unwrap();
        let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, json!({ "volume": 3 }));
    }

    #[test]
    fn test_load_if_exists_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ broken").unwrap();

        let result = KeyValueSettingsBuilder::from_file(&path).load_if_exists();
        assert!(matches!(result, Err(SettingsError::ParseError(_))));
    }

    #[test]
    fn test_with_default_values() {
        let dir = TempDir::new().unwrap();
        let settings = KeyValueSettingsBuilder::from_file(dir.path().join("s.json"))
            .with_default_values([("list", json!([1, 2])), ("flag", json!(false))])
            .unwrap()
            .build();
        assert_eq!(settings.get::<Vec<u8>>("list").unwrap(), vec![1, 2]);
        assert!(!settings.get_bool("flag").unwrap());
    }
}
