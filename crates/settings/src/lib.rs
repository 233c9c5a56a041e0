//! JsonSettings
//!
//! Durable, file-backed application settings stored as JSON.
//!
//! ## Modes
//!
//! - Key-value: arbitrary keys read and written as typed values, with
//!   declared defaults ([`KeyValueSettings`], [`KeyValueSettingsBuilder`])
//!   or without them ([`BasicSettings`])
//! - Typed: settings are the fields of a record implementing
//!   [`SettingsSchema`] ([`TypedSettings`], [`TypedSettingsBuilder`])
//!
//! Nothing is re-read automatically; every load and save is caller-triggered.
//!
//! ## Usage
//!
//! ```no_run
//! use jsonsettings::{KeyValueFile, KeyValueSettingsBuilder, SettingsFile};
//!
//! let mut settings = KeyValueSettingsBuilder::from_file("settings.json")
//!     .with_default("isTest", true)?
//!     .load_or_create()?
//!     .build();
//!
//! settings.set("stringTest", "This is a test!")?;
//! assert!(settings.get_bool("isTest")?);
//!
//! settings.save()?;
//! # Ok::<(), jsonsettings::SettingsError>(())
//! ```

mod basic;
mod builder;
mod file;
mod options;
mod store;
mod typed;
mod typed_builder;

pub use basic::BasicSettings;
pub use builder::KeyValueSettingsBuilder;
pub use file::{KeyValueFile, SettingsFile};
pub use options::{
    DefaultValueHandling, FileNotFoundBehavior, Formatting, JsonConverter, NullValueHandling,
    SerializerOptions,
};
pub use store::KeyValueSettings;
pub use typed::{FieldDefaults, SettingsSchema, TypedSettings};
pub use typed_builder::TypedSettingsBuilder;

pub use jsonsettings_core::{Document, Result, SettingsError};
