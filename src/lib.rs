//! # catset - Categorized Settings
//!
//! A small, framework-agnostic library that exposes the fields of one settings
//! object as named, typed settings grouped into categories, with string
//! conversion, validation and a plain text format.
//!
//! ## Features
//!
//! - **Schema Verification**: declarations are checked on attach (read/write
//!   accessors, convertible type, legal names, unique keys)
//! - **Converters**: per-type string conversion, with `i32`, `f64`, `bool` and
//!   `String` built in
//! - **Validation**: numeric ranges, absolute paths, regex patterns or any
//!   custom rule, run before every write
//! - **Text Format**: generate and parse `:Category:` / `name=value` text
//! - **Change Events**: callbacks after every successful write
//!
//! ## Quick Start
//!
//! ```rust
//! use catset::{setting, settings, RangeRule, SettingDef, Settings, SettingsManager};
//!
//! #[derive(Default)]
//! struct Editor {
//!     font_size: i32,
//!     theme: String,
//! }
//!
//! impl Settings for Editor {
//!     fn settings() -> Vec<SettingDef<Self>> {
//!         settings![
//!             setting::<Self, i32>("FontSize", "Appearance")
//!                 .get(|e| e.font_size)
//!                 .set(|e, v| e.font_size = v)
//!                 .rule(RangeRule::new(5, 73)),
//!
//!             setting::<Self, String>("Theme", "Appearance")
//!                 .get(|e| e.theme.clone())
//!                 .set(|e, v| e.theme = v),
//!         ]
//!     }
//! }
//!
//! let mut manager = SettingsManager::new();
//! manager.attach(Editor { font_size: 12, theme: "dark".into() })?;
//!
//! assert_eq!(
//!     manager.generate()?,
//!     ":Appearance:\nFontSize=12\nTheme=dark\n"
//! );
//!
//! manager.parse(":Appearance:\nFontSize=14\n")?;
//! assert_eq!(manager.get_value::<i32>("Appearance", "FontSize")?, 14);
//!
//! // Rejected by the range rule, nothing is written
//! assert!(manager.set_value("Appearance", "FontSize", 100).is_err());
//! assert_eq!(manager.object()?.font_size, 14);
//! # Ok::<(), catset::Error>(())
//! ```
//!
//! ## Text Format
//!
//! ```text
//! # optional header comment
//! :Appearance:
//! FontSize=14
//! Theme=dark
//! ```
//!
//! Categories and settings are generated in sorted order. Parsing ignores
//! blank and `#` lines, applies only the settings it finds and either applies
//! every line or none of them.

pub mod config;
pub mod converter;
pub mod error;
pub mod events;
mod format;
pub mod manager;
pub mod rules;

pub use config::{
    SettingBuilder, SettingDef, Settings, SettingsConfig, SettingsConfigBuilder, UnknownKeys,
    setting,
};
pub use converter::{Converter, ConverterRegistry, ValueType};
pub use error::{Error, ErrorKind, Result};
pub use events::{ChangeCallback, EventManager, SettingKey};
pub use manager::{ParseSummary, SettingInfo, SettingsManager, SettingsManagerBuilder};
pub use rules::{PathRule, PatternRule, RangeRule, Rule, Verdict};

// Re-export derive macro when feature is enabled
#[cfg(feature = "derive")]
pub use catset_derive::Settings as DeriveSettings;
