//! Operations shared by every settings file

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use jsonsettings_core::{io, to_node, Document, Result, SettingsError};

/// A settings file bound to a path on disk
pub trait SettingsFile {
    /// True if the backing file is present
    fn exists(&self) -> bool;

    /// Write the settings to the backing file, replacing its contents
    fn save(&self) -> Result<()>;
}

/// Key-value settings backed by a [`Document`]
///
/// Implementors provide access to their path and document; loading and
/// writing values are shared.
pub trait KeyValueFile: SettingsFile {
    fn path(&self) -> &Path;

    fn document(&self) -> &Document;

    fn document_mut(&mut self) -> &mut Document;

    /// Untyped access to the persisted node
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.document().get(key)
    }

    /// Store `value` at `key`, overwriting any previous value
    fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let node = to_node(value)?;
        self.set_value(key, node);
        Ok(())
    }

    fn set_value(&mut self, key: &str, value: Value) {
        self.document_mut().set(key, value);
    }

    /// Remove a persisted value; declared defaults are untouched
    fn remove(&mut self, key: &str) -> Option<Value> {
        self.document_mut().remove(key)
    }

    /// True if the document holds `key`. Defaults are not consulted.
    fn contains_key(&self, key: &str) -> bool {
        self.document().contains_key(key)
    }

    fn keys(&self) -> Vec<String> {
        self.document().keys().cloned().collect()
    }

    /// Replace the document with the file's contents.
    ///
    /// A missing file returns `Ok(false)` and leaves the document as is, or
    /// fails with [`SettingsError::FileNotFound`] when `throw_on_fail` is set.
    fn load(&mut self, throw_on_fail: bool) -> Result<bool> {
        let path = self.path().to_path_buf();
        if !io::file_exists(&path) {
            if throw_on_fail {
                return Err(SettingsError::FileNotFound(path));
            }
            debug!("No settings file at {:?}, keeping in-memory document", path);
            return Ok(false);
        }

        let text = io::read_text(&path)?;
        *self.document_mut() = Document::parse(&text)?;
        debug!("Loaded {} settings from {:?}", self.document().len(), path);
        Ok(true)
    }
}

/// Pretty-print `document` into the file at `path`
pub(crate) fn save_document(path: &Path, document: &Document) -> Result<()> {
    let text = document.to_pretty_string()?;
    io::write_text(path, &text)?;
    debug!("Saved {} settings to {:?}", document.len(), path);
    Ok(())
}
