//! Core types for catset library

use serde::{Deserialize, Serialize};

/// What `parse` does with a category or setting the schema doesn't know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeys {
    /// Fail the whole parse with a lookup error (default)
    #[default]
    Reject,
    /// Log a warning and ignore the line (and, for an unknown category, every
    /// setting line under it)
    Skip,
}

/// Configuration for a [`SettingsManager`](crate::SettingsManager)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsConfig {
    /// Comment emitted as `# ` lines at the top of generated text
    pub header: Option<String>,

    /// Handling of unknown categories and settings while parsing
    pub unknown_keys: UnknownKeys,

    /// Pre-register the `i32`, `f64`, `bool` and `String` converters
    pub default_converters: bool,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            header: None,
            unknown_keys: UnknownKeys::Reject,
            default_converters: true,
        }
    }
}

impl SettingsConfig {
    /// Create a new builder for SettingsConfig
    ///
    /// # Example
    /// ```rust
    /// use catset::{SettingsConfig, UnknownKeys};
    ///
    /// let config = SettingsConfig::builder()
    ///     .header("Generated by my-app")
    ///     .skip_unknown_keys()
    ///     .build();
    /// assert_eq!(config.unknown_keys, UnknownKeys::Skip);
    /// ```
    #[must_use]
    pub fn builder() -> SettingsConfigBuilder {
        SettingsConfigBuilder::new()
    }
}

/// Builder for creating SettingsConfig with a fluent API
#[derive(Debug, Clone, Default)]
pub struct SettingsConfigBuilder {
    config: SettingsConfig,
}

impl SettingsConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `comment` at the top of generated text. Multi-line comments get
    /// one `# ` line each.
    #[must_use]
    pub fn header(mut self, comment: impl Into<String>) -> Self {
        self.config.header = Some(comment.into());
        self
    }

    #[must_use]
    pub fn unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.config.unknown_keys = policy;
        self
    }

    /// Shorthand for `unknown_keys(UnknownKeys::Skip)`
    #[must_use]
    pub fn skip_unknown_keys(self) -> Self {
        self.unknown_keys(UnknownKeys::Skip)
    }

    /// Start with an empty converter registry
    #[must_use]
    pub fn without_default_converters(mut self) -> Self {
        self.config.default_converters = false;
        self
    }

    #[must_use]
    pub fn build(self) -> SettingsConfig {
        self.config
    }
}
