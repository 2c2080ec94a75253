//! Builder for SettingsManager
//!
//! This module contains [`SettingsManagerBuilder`] which provides a fluent API
//! for creating a [`SettingsManager`](super::SettingsManager).

use crate::config::{Settings, SettingsConfigBuilder, UnknownKeys};
use crate::converter::ConverterRegistry;
use std::any::Any;
use std::marker::PhantomData;

use super::SettingsManager;

type Registration = Box<dyn FnOnce(&mut ConverterRegistry)>;

/// Builder for creating a [`SettingsManager`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use catset::{setting, settings, SettingDef, Settings, SettingsManager};
///
/// #[derive(Default)]
/// struct Window { size: (i32, i32) }
///
/// impl Settings for Window {
///     fn settings() -> Vec<SettingDef<Self>> {
///         settings![
///             setting::<Self, (i32, i32)>("Size", "Layout")
///                 .get(|w| w.size)
///                 .set(|w, v| w.size = v),
///         ]
///     }
/// }
///
/// let mut manager = SettingsManager::<Window>::builder()
///     .header("Window layout")
///     .converter::<(i32, i32)>(
///         |(w, h)| format!("{w}x{h}"),
///         |s| {
///             let (w, h) = s.split_once('x').ok_or("expected WxH")?;
///             Ok((
///                 w.parse().map_err(|_| "bad width")?,
///                 h.parse().map_err(|_| "bad height")?,
///             ))
///         },
///     )
///     .build();
///
/// manager.attach(Window { size: (800, 600) })?;
/// assert_eq!(manager.generate()?, "# Window layout\n:Layout:\nSize=800x600\n");
/// # Ok::<(), catset::Error>(())
/// ```
pub struct SettingsManagerBuilder<T: Settings> {
    config_builder: SettingsConfigBuilder,
    converters: Vec<Registration>,
    _settings: PhantomData<T>,
}

impl<T: Settings> SettingsManagerBuilder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_builder: SettingsConfigBuilder::new(),
            converters: Vec::new(),
            _settings: PhantomData,
        }
    }

    /// Emit a `# ` comment header at the top of generated text.
    #[must_use]
    pub fn header(mut self, comment: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.header(comment);
        self
    }

    /// Choose how `parse` treats unknown categories and settings.
    #[must_use]
    pub fn unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.config_builder = self.config_builder.unknown_keys(policy);
        self
    }

    /// Skip unknown categories and settings while parsing instead of failing.
    #[must_use]
    pub fn skip_unknown_keys(mut self) -> Self {
        self.config_builder = self.config_builder.skip_unknown_keys();
        self
    }

    /// Start without the built-in `i32`, `f64`, `bool` and `String` converters.
    #[must_use]
    pub fn without_default_converters(mut self) -> Self {
        self.config_builder = self.config_builder.without_default_converters();
        self
    }

    /// Register a converter for `V` once the manager is built.
    ///
    /// Converters are applied in call order after the defaults, so they can
    /// replace a built-in converter.
    #[must_use]
    pub fn converter<V: Any>(
        mut self,
        to_text: impl Fn(&V) -> String + 'static,
        from_text: impl Fn(&str) -> std::result::Result<V, String> + 'static,
    ) -> Self {
        self.converters
            .push(Box::new(move |registry: &mut ConverterRegistry| {
                registry.register(to_text, from_text);
            }));
        self
    }

    /// Build the [`SettingsManager`]. No object is attached yet.
    #[must_use]
    pub fn build(self) -> SettingsManager<T> {
        let mut manager = SettingsManager::with_config(self.config_builder.build());

        for register in self.converters {
            register(manager.converters_mut());
        }

        manager
    }
}

impl<T: Settings> Default for SettingsManagerBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Settings> SettingsManager<T> {
    /// Create a builder for `SettingsManager` with a fluent API.
    #[must_use]
    pub fn builder() -> SettingsManagerBuilder<T> {
        SettingsManagerBuilder::new()
    }
}
