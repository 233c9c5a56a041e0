//! Key-value settings with declared defaults

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use jsonsettings_core::{from_node, io, to_node, Document, Result, SettingsError};

use crate::file::{save_document, KeyValueFile, SettingsFile};

/// Key-value settings file whose reads fall back to declared defaults.
///
/// Reads resolve persisted value first, then declared default, then fail.
/// Defaults are never written to the document except through
/// [`KeyValueSettingsBuilder::ensure_created`](crate::KeyValueSettingsBuilder::ensure_created).
#[derive(Debug, Clone)]
pub struct KeyValueSettings {
    path: PathBuf,
    document: Document,
    defaults: HashMap<String, Value>,
}

impl KeyValueSettings {
    /// Bind an empty store to `path`. The filesystem is not touched.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: Document::new(),
            defaults: HashMap::new(),
        }
    }

    /// Bind to `folder/file_name`, creating `folder` if it does not exist
    pub fn in_folder(folder: impl AsRef<Path>, file_name: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(io::path_in_folder(folder, file_name)?))
    }

    /// Persisted value, else declared default, else [`SettingsError::KeyNotFound`]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        match self.resolve(key) {
            Some(node) => from_node(key, node),
            None => Err(SettingsError::KeyNotFound(key.to_string())),
        }
    }

    /// Like [`get`](Self::get), but returns `fallback` instead of failing on a
    /// missing key
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, fallback: T) -> Result<T> {
        match self.resolve(key) {
            Some(node) => from_node(key, node),
            None => Ok(fallback),
        }
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get(key)
    }

    /// Declare a default for `key`.
    ///
    /// Fails with [`SettingsError::DuplicateKey`] if `key` already has one;
    /// call [`remove_default`](Self::remove_default) first to replace it.
    pub fn add_default<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let node = to_node(value)?;
        self.add_default_value(key, node)
    }

    pub fn add_default_value(&mut self, key: &str, value: Value) -> Result<()> {
        if self.defaults.contains_key(key) {
            return Err(SettingsError::DuplicateKey(key.to_string()));
        }
        self.defaults.insert(key.to_string(), value);
        Ok(())
    }

    /// Drop the declared default for `key`, if any
    pub fn remove_default(&mut self, key: &str) {
        self.defaults.remove(key);
    }

    pub fn default_value(&self, key: &str) -> Option<&Value> {
        self.defaults.get(key)
    }

    /// Copy every declared default whose key is absent from the document.
    /// Returns the number of keys filled in.
    pub(crate) fn fill_missing_defaults(&mut self) -> usize {
        let mut filled = 0;
        for (key, value) in &self.defaults {
            if !self.document.contains_key(key) {
                self.document.set(key.clone(), value.clone());
                filled += 1;
            }
        }
        filled
    }

    fn resolve(&self, key: &str) -> Option<&Value> {
        self.document.get(key).or_else(|| self.defaults.get(key))
    }
}

impl SettingsFile for KeyValueSettings {
    fn exists(&self) -> bool {
        io::file_exists(&self.path)
    }

    fn save(&self) -> Result<()> {
        save_document(&self.path, &self.document)
    }
}

impl KeyValueFile for KeyValueSettings {
    fn path(&self) -> &Path {
        &self.path
    }

    fn document(&self) -> &Document {
        &self.document
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}
