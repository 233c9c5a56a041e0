//! Raw file access for settings files
//!
//! Whole-file reads and full-overwrite writes. No locking.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Result, SettingsError};

pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Read the full file contents
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SettingsError::FileNotFound(path.to_path_buf()),
        _ => SettingsError::ReadError(e),
    })
}

/// Replace the file contents with `text`
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(SettingsError::WriteError)?;
    debug!("Wrote {} bytes to {:?}", text.len(), path);
    Ok(())
}

/// Join `folder` and `file_name`, creating the folder (and parents) if missing
pub fn path_in_folder(folder: impl AsRef<Path>, file_name: impl AsRef<Path>) -> Result<PathBuf> {
    let folder = folder.as_ref();
    if !folder.exists() {
        fs::create_dir_all(folder).map_err(SettingsError::CreateDirError)?;
        debug!("Created settings directory {:?}", folder);
    }
    Ok(folder.join(file_name))
}
