use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("No settings file was located at path: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to parse settings: {0}")]
    ParseError(#[source] serde_json::Error),

    #[error("No entry or default entry was found with key {0}.")]
    KeyNotFound(String),

    #[error("Default value with key {0} already exists.")]
    DuplicateKey(String),

    #[error("Failed to convert value at key {key}: {source}")]
    Conversion {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    SerializeError(#[source] serde_json::Error),

    #[error("Converter rejected field {field}: {message}")]
    Converter { field: String, message: String },

    #[error("Failed to read settings: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("Failed to write settings: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("Failed to create settings directory: {0}")]
    CreateDirError(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;
