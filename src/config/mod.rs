//! Core configuration types and traits
//!
//! This module contains the foundational types for declaring settings:
//! - `Settings` - Trait listing the settings of a bound type
//! - `SettingDef` / `SettingBuilder` - One declared setting with its accessors
//! - `SettingsConfig` - Configuration for the settings manager

mod schema;
mod types;

pub use schema::{SettingBuilder, SettingDef, Settings, setting};
pub(crate) use schema::{Getter, Setter};

pub use types::{SettingsConfig, SettingsConfigBuilder, UnknownKeys};
