//! Schema-bound settings records

use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use jsonsettings_core::{io, to_node, Result, SettingsError};

use crate::file::SettingsFile;
use crate::options::{Formatting, NullValueHandling, SerializerOptions};

/// Declared default values of a schema, keyed by serialized field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldDefaults {
    entries: Vec<(String, Value)>,
}

impl FieldDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the default for `field`. A later declaration for the same
    /// field replaces the earlier one.
    pub fn field(mut self, field: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| name == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field.to_string(), value)),
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A fixed-shape settings record.
///
/// `Default` supplies the zero state; [`field_defaults`](Self::field_defaults)
/// supplies the declared per-field defaults. Fields that should never reach
/// the file are marked `#[serde(skip)]`.
///
/// The record must carry `#[serde(default)]`. Files saved with an ignoring
/// [`DefaultValueHandling`](crate::DefaultValueHandling) omit fields, and
/// without it those files fail to load with a "missing field" error.
///
/// ```
/// use jsonsettings::{FieldDefaults, SettingsSchema};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// #[serde(default)]
/// struct Example {
///     test_string: Option<String>,
///     default_true: bool,
/// }
///
/// impl SettingsSchema for Example {
///     fn field_defaults() -> FieldDefaults {
///         FieldDefaults::new().field("default_true", true)
///     }
/// }
/// ```
pub trait SettingsSchema: Serialize + DeserializeOwned + Default {
    fn field_defaults() -> FieldDefaults {
        FieldDefaults::new()
    }
}

/// A settings record bound to its file and serializer options
#[derive(Debug, Clone)]
pub struct TypedSettings<T> {
    record: T,
    path: PathBuf,
    options: SerializerOptions,
    defaults: Arc<FieldDefaults>,
}

impl<T: SettingsSchema> TypedSettings<T> {
    pub(crate) fn bind(
        record: T,
        path: PathBuf,
        options: SerializerOptions,
        defaults: Arc<FieldDefaults>,
    ) -> Self {
        Self {
            record,
            path,
            options,
            defaults,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &SerializerOptions {
        &self.options
    }

    pub fn into_inner(self) -> T {
        self.record
    }

    /// The text `save` would write
    pub fn to_json(&self) -> Result<String> {
        record_to_text(&self.record, &self.options, &self.defaults)
    }
}

impl<T> Deref for TypedSettings<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.record
    }
}

impl<T> DerefMut for TypedSettings<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.record
    }
}

impl<T: SettingsSchema> SettingsFile for TypedSettings<T> {
    fn exists(&self) -> bool {
        io::file_exists(&self.path)
    }

    fn save(&self) -> Result<()> {
        let text = self.to_json()?;
        io::write_text(&self.path, &text)?;
        debug!("Saved typed settings to {:?}", self.path);
        Ok(())
    }
}

/// Assign every declared default onto `record`.
///
/// A default that does not fit its field fails with
/// [`SettingsError::Conversion`] naming the field.
pub(crate) fn apply_field_defaults<T: SettingsSchema>(
    mut record: T,
    defaults: &FieldDefaults,
) -> Result<T> {
    for (field, value) in defaults.iter() {
        let mut map = record_to_map(&record)?;
        map.insert(field.to_string(), value.clone());
        record = serde_json::from_value(Value::Object(map)).map_err(|source| {
            SettingsError::Conversion {
                key: field.to_string(),
                source,
            }
        })?;
    }
    Ok(record)
}

/// Deserialize a record from file text under `options`
pub(crate) fn record_from_text<T: SettingsSchema>(
    text: &str,
    options: &SerializerOptions,
    defaults: &FieldDefaults,
) -> Result<T> {
    let raw: Map<String, Value> = serde_json::from_str(text).map_err(SettingsError::ParseError)?;

    let mut map = Map::with_capacity(raw.len());
    for (field, value) in raw {
        let value = match options.converter_for(&field) {
            Some(converter) => converter.read_json(&field, value)?,
            None => value,
        };
        map.insert(field, value);
    }

    // Ignored nulls count as present: the field keeps its zero state
    let mut present_null = Vec::new();
    if options.null_value_handling == NullValueHandling::Ignore {
        map.retain(|field, value| {
            if value.is_null() {
                present_null.push(field.clone());
                return false;
            }
            true
        });
    }

    if options.default_value_handling.populates() {
        for (field, value) in defaults.iter() {
            if !map.contains_key(field) && !present_null.iter().any(|name| name == field) {
                map.insert(field.to_string(), value.clone());
            }
        }
    }

    serde_json::from_value(Value::Object(map)).map_err(SettingsError::ParseError)
}

/// Serialize a record to file text under `options`.
///
/// Ignoring default-value handling drops a field equal to its declared
/// default, or to its value in `T::default()` when none is declared.
pub(crate) fn record_to_text<T: SettingsSchema>(
    record: &T,
    options: &SerializerOptions,
    defaults: &FieldDefaults,
) -> Result<String> {
    let mut map = record_to_map(record)?;

    if options.null_value_handling == NullValueHandling::Ignore {
        map.retain(|_, value| !value.is_null());
    }

    if options.default_value_handling.ignores() {
        let zero = record_to_map(&T::default())?;
        map.retain(|field, value| {
            let default = defaults.get(field).or_else(|| zero.get(field));
            default != Some(&*value)
        });
    }

    let mut converted = Map::with_capacity(map.len());
    for (field, value) in map {
        let value = match options.converter_for(&field) {
            Some(converter) => converter.write_json(&field, value)?,
            None => value,
        };
        converted.insert(field, value);
    }

    match options.formatting {
        Formatting::Indented => serde_json::to_string_pretty(&converted),
        Formatting::None => serde_json::to_string(&converted),
    }
    .map_err(SettingsError::SerializeError)
}

fn record_to_map<T: Serialize>(record: &T) -> Result<Map<String, Value>> {
    match to_node(record)? {
        Value::Object(map) => Ok(map),
        other => Err(SettingsError::SerializeError(serde::ser::Error::custom(
            format!("settings record must serialize to an object, got {}", other),
        ))),
    }
}
