use crate::config::{Settings, SettingsConfig};
use crate::converter::ConverterRegistry;
use crate::error::{Error, Result};
use crate::events::{EventManager, SettingKey};
use crate::manager::schema::Schema;

use log::{info, warn};
use std::any::Any;
use std::fmt;

/// The attached object together with the schema built for it.
pub(crate) struct Bound<T> {
    pub(crate) object: T,
    pub(crate) schema: Schema<T>,
}

/// Main settings manager: binds one settings object and exposes its settings
/// by category and name.
///
/// The manager provides:
///
/// - **Attach**: verify the declarations of `T` and bind an instance
/// - **Typed and text access**: get/set values directly or through converters
/// - **Validation**: run each setting's rule before any write
/// - **Text format**: generate and parse the `:Category:` / `name=value` format
/// - **Change Events**: callbacks after each successful write
///
/// # Example
///
/// ```rust
/// use catset::{setting, settings, SettingDef, Settings, SettingsManager};
///
/// #[derive(Default)]
/// struct AppSettings {
///     volume: i32,
/// }
///
/// impl Settings for AppSettings {
///     fn settings() -> Vec<SettingDef<Self>> {
///         settings![
///             setting::<Self, i32>("Volume", "Audio")
///                 .get(|s| s.volume)
///                 .set(|s, v| s.volume = v),
///         ]
///     }
/// }
///
/// let mut manager = SettingsManager::new();
/// manager.attach(AppSettings::default())?;
///
/// manager.set_value_from_string("Audio", "Volume", "7")?;
/// assert_eq!(manager.generate()?, ":Audio:\nVolume=7\n");
/// # Ok::<(), catset::Error>(())
/// ```
///
/// The manager is single-threaded: every mutation goes through `&mut self`
/// and nothing is locked internally.
pub struct SettingsManager<T: Settings> {
    /// Configuration
    pub(crate) config: SettingsConfig,

    /// Converters by value type
    pub(crate) converters: ConverterRegistry,

    /// Change listeners
    pub(crate) events: EventManager,

    /// Attached object and its schema, `None` until the first successful attach
    pub(crate) bound: Option<Bound<T>>,
}

impl<T: Settings> SettingsManager<T> {
    /// Create a manager with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SettingsConfig::default())
    }

    /// Create a manager with the given configuration.
    #[must_use]
    pub fn with_config(config: SettingsConfig) -> Self {
        let converters = if config.default_converters {
            ConverterRegistry::with_defaults()
        } else {
            ConverterRegistry::new()
        };

        Self {
            config,
            converters,
            events: EventManager::new(),
            bound: None,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &SettingsConfig {
        &self.config
    }

    /// Bind `object` and build its schema.
    ///
    /// The schema is built from scratch before anything is replaced, so on
    /// error the previously attached object and schema (if any) stay in
    /// place and `object` is dropped.
    ///
    /// # Errors
    ///
    /// Returns a schema error when a declared setting lacks a getter or a
    /// setter, has no registered converter, uses a forbidden character in
    /// its name or category, or repeats a (category, name) pair, and
    /// [`Error::EmptySchema`] when `T` declares no settings.
    pub fn attach(&mut self, object: T) -> Result<()> {
        let schema = match Schema::<T>::build(&self.converters) {
            Ok(schema) => schema,
            Err(e) => {
                if self.bound.is_some() {
                    warn!("Attach failed, keeping previously attached settings: {e}");
                }
                return Err(e);
            }
        };

        info!(
            "Attached {} with {} settings in {} categories",
            std::any::type_name::<T>(),
            schema.len(),
            schema.category_count()
        );

        self.bound = Some(Bound { object, schema });
        Ok(())
    }

    /// Unbind and return the attached object.
    pub fn detach(&mut self) -> Option<T> {
        self.bound.take().map(|bound| bound.object)
    }

    pub fn is_attached(&self) -> bool {
        self.bound.is_some()
    }

    /// The attached object
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAttached`] before the first successful attach.
    pub fn object(&self) -> Result<&T> {
        self.bound().map(|bound| &bound.object)
    }

    /// The attached object, for direct modification
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAttached`] before the first successful attach.
    pub fn object_mut(&mut self) -> Result<&mut T> {
        self.bound_mut().map(|bound| &mut bound.object)
    }

    // =========================================================================
    // Converters
    // =========================================================================

    /// Register the string converter for `V`, replacing any existing one.
    ///
    /// Converters must be registered before attaching an object that has
    /// settings of type `V`.
    pub fn register_converter<V: Any>(
        &mut self,
        to_text: impl Fn(&V) -> String + 'static,
        from_text: impl Fn(&str) -> std::result::Result<V, String> + 'static,
    ) {
        self.converters.register(to_text, from_text);
    }

    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    pub fn converters_mut(&mut self) -> &mut ConverterRegistry {
        &mut self.converters
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Get the event manager
    pub fn events(&self) -> &EventManager {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventManager {
        &mut self.events
    }

    /// Call `callback` with (`key`, `old_value`, `new_value`) after every
    /// successful write to any setting.
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: Fn(&SettingKey, &str, &str) + 'static,
    {
        self.events.on_change(callback);
    }

    /// Call `callback` after every successful write to one setting.
    pub fn watch<F>(&mut self, category: &str, name: &str, callback: F)
    where
        F: Fn(&SettingKey, &str, &str) + 'static,
    {
        self.events.watch(SettingKey::new(category, name), callback);
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    pub(crate) fn bound(&self) -> Result<&Bound<T>> {
        self.bound.as_ref().ok_or(Error::NotAttached)
    }

    pub(crate) fn bound_mut(&mut self) -> Result<&mut Bound<T>> {
        self.bound.as_mut().ok_or(Error::NotAttached)
    }
}

impl<T: Settings> Default for SettingsManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Settings> fmt::Debug for SettingsManager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsManager")
            .field("config", &self.config)
            .field("converters", &self.converters)
            .field("events", &self.events)
            .field("attached", &self.is_attached())
            .finish()
    }
}
