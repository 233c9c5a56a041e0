//! Serialization options for typed settings

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use jsonsettings_core::Result;

/// How declared field defaults take part in (de)serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultValueHandling {
    /// Write every field, read the file as is
    Include,
    /// Omit fields equal to their declared default when saving
    Ignore,
    /// Fill fields missing from the file with their declared default
    #[default]
    Populate,
    /// Both `Ignore` and `Populate`
    IgnoreAndPopulate,
}

impl DefaultValueHandling {
    pub fn populates(&self) -> bool {
        matches!(self, Self::Populate | Self::IgnoreAndPopulate)
    }

    pub fn ignores(&self) -> bool {
        matches!(self, Self::Ignore | Self::IgnoreAndPopulate)
    }
}

/// How null fields are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullValueHandling {
    /// Null fields are written, and read as null
    #[default]
    Include,
    /// Null fields are omitted on save and treated as missing on load
    Ignore,
}

/// Output layout of saved files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Formatting {
    /// Compact, no whitespace
    None,
    /// Pretty-printed with indentation
    #[default]
    Indented,
}

/// Behavior of a typed builder when the settings file is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileNotFoundBehavior {
    /// Build yields nothing
    #[default]
    ReturnNull,
    /// Build yields a freshly created default record
    ReturnDefault,
}

/// Custom conversion of a top-level field between its serialized form and
/// its on-disk form.
///
/// Converters see the field after the record was serialized (on save) and
/// before it is deserialized (on load). The first converter whose
/// [`can_convert`](Self::can_convert) matches a field handles it.
pub trait JsonConverter: Send + Sync {
    fn can_convert(&self, field: &str) -> bool;

    /// Serialized form to on-disk form
    fn write_json(&self, field: &str, value: Value) -> Result<Value>;

    /// On-disk form to serialized form
    fn read_json(&self, field: &str, value: Value) -> Result<Value>;
}

/// Options bundle used to read and write typed settings
#[derive(Clone, Default)]
pub struct SerializerOptions {
    pub default_value_handling: DefaultValueHandling,
    pub null_value_handling: NullValueHandling,
    pub formatting: Formatting,
    pub converters: Vec<Arc<dyn JsonConverter>>,
}

impl SerializerOptions {
    pub(crate) fn converter_for(&self, field: &str) -> Option<&Arc<dyn JsonConverter>> {
        self.converters.iter().find(|c| c.can_convert(field))
    }
}

impl fmt::Debug for SerializerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerOptions")
            .field("default_value_handling", &self.default_value_handling)
            .field("null_value_handling", &self.null_value_handling)
            .field("formatting", &self.formatting)
            .field("converters", &self.converters.len())
            .finish()
    }
}
