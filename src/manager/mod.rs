//! Main settings manager module
//!
//! This module contains the [`SettingsManager`] struct which is the primary entry point
//! for attaching a settings object and reading, writing, generating and parsing its settings.
//!
//! The implementation is split by concern:
//!
//! - `core`: the manager itself, attach/detach, converters and events
//! - `builder`: [`SettingsManagerBuilder`]
//! - `operations`: typed and text access, validation and enumeration
//! - `io`: generation and parsing of the text format
//! - `schema`: the verified schema built on attach

mod builder;
mod core;
mod io;
mod operations;
pub(crate) mod schema;

pub use builder::SettingsManagerBuilder;
pub use self::core::SettingsManager;
pub use io::ParseSummary;
pub use operations::SettingInfo;
