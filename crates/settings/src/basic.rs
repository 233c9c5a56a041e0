//! Key-value settings without declared defaults

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use jsonsettings_core::{from_node, io, Document, Result};

use crate::file::{save_document, KeyValueFile, SettingsFile};

/// Plain key-value settings file. Missing keys read as `T::default()`.
#[derive(Debug, Clone)]
pub struct BasicSettings {
    path: PathBuf,
    document: Document,
}

impl BasicSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: Document::new(),
        }
    }

    /// Bind to `folder/file_name`, creating `folder` if it does not exist
    pub fn in_folder(folder: impl AsRef<Path>, file_name: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(io::path_in_folder(folder, file_name)?))
    }

    pub fn get<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        self.get_or(key, T::default())
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, fallback: T) -> Result<T> {
        match self.document.get(key) {
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
}

impl SettingsFile for BasicSettings {
    fn exists(&self) -> bool {
        io::file_exists(&self.path)
    }

    fn save(&self) -> Result<()> {
        save_document(&self.path, &self.document)
    }
}

impl KeyValueFile for BasicSettings {
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
