//! Fluent construction of typed settings

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use jsonsettings_core::{io, Result};

use crate::options::{
    DefaultValueHandling, FileNotFoundBehavior, Formatting, JsonConverter, NullValueHandling,
    SerializerOptions,
};
use crate::typed::{apply_field_defaults, record_from_text, FieldDefaults, SettingsSchema, TypedSettings};

/// Builder for [`TypedSettings`]
///
/// Per-field option setters (`with_default_value_handling`,
/// `with_null_value_handling`, `with_formatting`, `with_json_converter`) edit
/// the current options bundle. [`with_serializer_options`](Self::with_serializer_options)
/// replaces the whole bundle and discards those edits, so call it first.
///
/// ```no_run
/// use jsonsettings::{FieldDefaults, FileNotFoundBehavior, SettingsFile, SettingsSchema, TypedSettingsBuilder};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Default, Serialize, Deserialize)]
/// #[serde(default)]
/// struct Example {
///     default_true: bool,
/// }
///
/// impl SettingsSchema for Example {
///     fn field_defaults() -> FieldDefaults {
///         FieldDefaults::new().field("default_true", true)
///     }
/// }
///
/// let builder = TypedSettingsBuilder::<Example>::from_file("example.json")
///     .with_file_not_found_behavior(FileNotFoundBehavior::ReturnDefault);
///
/// if let Some(settings) = builder.build()? {
///     assert!(settings.default_true);
///     settings.save()?;
/// }
/// # Ok::<(), jsonsettings::SettingsError>(())
/// ```
#[derive(Debug)]
pub struct TypedSettingsBuilder<T> {
    path: PathBuf,
    options: SerializerOptions,
    not_found: FileNotFoundBehavior,
    defaults: Arc<FieldDefaults>,
    _schema: PhantomData<fn() -> T>,
}

impl<T: SettingsSchema> TypedSettingsBuilder<T> {
    /// Target the settings file at `path`
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: SerializerOptions::default(),
            not_found: FileNotFoundBehavior::default(),
            defaults: Arc::new(T::field_defaults()),
            _schema: PhantomData,
        }
    }

    /// Target `folder/file_name`, creating `folder` if needed
    pub fn in_folder(folder: impl AsRef<Path>, file_name: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_file(io::path_in_folder(folder, file_name)?))
    }

    /// Target the file formed by joining `parts`.
    ///
    /// No directories are created; `save` fails with
    /// [`SettingsError::WriteError`](jsonsettings_core::SettingsError::WriteError)
    /// while the parent folder is missing. Use [`in_folder`](Self::in_folder)
    /// to create it.
    pub fn from_path_parts<I, P>(parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let path: PathBuf = parts.into_iter().collect();
        Self::from_file(path)
    }

    /// Replace the whole options bundle
    pub fn with_serializer_options(mut self, options: SerializerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_default_value_handling(mut self, handling: DefaultValueHandling) -> Self {
        self.options.default_value_handling = handling;
        self
    }

    pub fn with_null_value_handling(mut self, handling: NullValueHandling) -> Self {
        self.options.null_value_handling = handling;
        self
    }

    pub fn with_formatting(mut self, formatting: Formatting) -> Self {
        self.options.formatting = formatting;
        self
    }

    /// Append a converter. Converters added earlier take precedence.
    pub fn with_json_converter(mut self, converter: impl JsonConverter + 'static) -> Self {
        self.options.converters.push(Arc::new(converter));
        self
    }

    pub fn with_file_not_found_behavior(mut self, behavior: FileNotFoundBehavior) -> Self {
        self.not_found = behavior;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &SerializerOptions {
        &self.options
    }

    /// A new record bound to this builder's file and options.
    ///
    /// Starts from `T::default()`; declared field defaults are applied when
    /// the default-value handling populates. Nothing is written to disk.
    pub fn create_default(&self) -> Result<TypedSettings<T>> {
        let mut record = T::default();
        if self.options.default_value_handling.populates() && !self.defaults.is_empty() {
            record = apply_field_defaults(record, &self.defaults)?;
            debug!("Applied {} declared defaults", self.defaults.len());
        }
        Ok(self.bind(record))
    }

    /// Load the record from its file.
    ///
    /// A missing file yields `Ok(None)` or a [`create_default`](Self::create_default)
    /// record, depending on the file-not-found behavior.
    pub fn build(&self) -> Result<Option<TypedSettings<T>>> {
        if !io::file_exists(&self.path) {
            debug!("No settings file at {:?}, behavior {:?}", self.path, self.not_found);
            return match self.not_found {
                FileNotFoundBehavior::ReturnDefault => self.create_default().map(Some),
                FileNotFoundBehavior::ReturnNull => Ok(None),
            };
        }

        let text = io::read_text(&self.path)?;
        let record = record_from_text(&text, &self.options, &self.defaults)?;
        debug!("Loaded typed settings from {:?}", self.path);
        Ok(Some(self.bind(record)))
    }

    fn bind(&self, record: T) -> TypedSettings<T> {
        TypedSettings::bind(
            record,
            self.path.clone(),
            self.options.clone(),
            Arc::clone(&self.defaults),
        )
    }
}
