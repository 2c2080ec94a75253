use crate::config::Settings;
use crate::converter::{ConverterRegistry, ValueType};
use crate::error::{Error, Result};
use crate::events::EventManager;
use crate::manager::core::SettingsManager;
use crate::manager::schema::Setting;
use crate::rules::{INVALID_FOR_TYPE, Verdict};

use log::debug;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};

/// Snapshot of one setting for display by UI or CLI glue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingInfo {
    pub category: String,
    pub name: String,
    /// Rust type name of the value
    #[serde(rename = "type")]
    pub type_name: String,
    /// Current value in its text form
    pub value: String,
    pub has_rule: bool,
}

impl<T: Settings> SettingsManager<T> {
    /// Get the current value of a setting.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No object is attached
    /// - The category or setting doesn't exist
    /// - `V` is not the setting's value type
    pub fn get_value<V: Any>(&self, category: &str, name: &str) -> Result<V> {
        let bound = self.bound()?;
        let setting = bound.schema.setting(category, name)?;

        setting
            .read(&bound.object)
            .downcast::<V>()
            .map(|value| *value)
            .map_err(|_| type_mismatch(setting, std::any::type_name::<V>()))
    }

    /// Get the current value of a setting without naming its type.
    ///
    /// # Errors
    ///
    /// Returns an error if no object is attached or the setting doesn't exist.
    pub fn get_value_any(&self, category: &str, name: &str) -> Result<Box<dyn Any>> {
        let bound = self.bound()?;
        let setting = bound.schema.setting(category, name)?;
        Ok(setting.read(&bound.object))
    }

    /// Get the current value of a setting in its text form.
    ///
    /// # Errors
    ///
    /// Returns an error if no object is attached or the setting doesn't exist.
    pub fn get_value_as_string(&self, category: &str, name: &str) -> Result<String> {
        let bound = self.bound()?;
        let setting = bound.schema.setting(category, name)?;
        text_of(setting, &*setting.read(&bound.object), &self.converters)
    }

    /// Validate and write a value.
    ///
    /// Nothing is written if validation fails.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No object is attached
    /// - The category or setting doesn't exist
    /// - `V` is not the setting's value type
    /// - The setting's rule rejects `value`
    pub fn set_value<V: Any>(&mut self, category: &str, name: &str, value: V) -> Result<()> {
        let bound = self.bound.as_mut().ok_or(Error::NotAttached)?;
        let setting = bound.schema.setting(category, name)?;

        if !setting.value_type().is::<V>() {
            return Err(type_mismatch(setting, std::any::type_name::<V>()));
        }

        validate(setting, &value)?;
        write(
            setting,
            &mut bound.object,
            Box::new(value),
            &self.converters,
            &self.events,
        )
    }

    /// Convert `text` with the setting's converter, then validate and write
    /// it like [`set_value`](Self::set_value).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`] if `text` can't be converted, and
    /// otherwise the same errors as [`set_value`](Self::set_value).
    pub fn set_value_from_string(&mut self, category: &str, name: &str, text: &str) -> Result<()> {
        let bound = self.bound.as_mut().ok_or(Error::NotAttached)?;
        let setting = bound.schema.setting(category, name)?;

        let value = from_text(setting, text, &self.converters)?;
        validate(setting, &*value)?;
        write(
            setting,
            &mut bound.object,
            value,
            &self.converters,
            &self.events,
        )
    }

    /// Check whether `text` would be accepted by a setting, without writing.
    ///
    /// Text the converter rejects yields a failing verdict with the message
    /// `"Given value is invalid for this type of setting."`. Convertible text
    /// gets the verdict of the setting's rule, or a pass if it has none.
    ///
    /// # Errors
    ///
    /// Returns an error if no object is attached or the setting doesn't exist.
    pub fn check_string_value(&self, category: &str, name: &str, text: &str) -> Result<Verdict> {
        let setting = self.bound()?.schema.setting(category, name)?;

        match from_text(setting, text, &self.converters) {
            Ok(value) => Ok(setting.check(&*value)),
            Err(Error::Conversion { .. }) => Ok(Verdict::fail(INVALID_FOR_TYPE)),
            Err(e) => Err(e),
        }
    }

    /// Value type of a setting.
    ///
    /// # Errors
    ///
    /// Returns an error if no object is attached or the setting doesn't exist.
    pub fn setting_type(&self, category: &str, name: &str) -> Result<ValueType> {
        Ok(self.bound()?.schema.setting(category, name)?.value_type())
    }

    /// Setting names grouped by category, both in sorted order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAttached`] if no object is attached.
    pub fn settings(&self) -> Result<BTreeMap<String, BTreeSet<String>>> {
        Ok(self.bound()?.schema.names())
    }

    /// Snapshot of every setting with its current value, in text order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAttached`] if no object is attached.
    pub fn describe(&self) -> Result<Vec<SettingInfo>> {
        let bound = self.bound()?;

        bound
            .schema
            .settings()
            .map(|setting| -> Result<SettingInfo> {
                Ok(SettingInfo {
                    category: setting.key().category.clone(),
                    name: setting.key().name.clone(),
                    type_name: setting.value_type().name().to_string(),
                    value: text_of(setting, &*setting.read(&bound.object), &self.converters)?,
                    has_rule: setting.has_rule(),
                })
            })
            .collect()
    }
}

// =============================================================================
// Shared steps
// =============================================================================

pub(super) fn type_mismatch<T>(setting: &Setting<T>, actual: &'static str) -> Error {
    Error::TypeMismatch {
        key: setting.key().to_string(),
        expected: setting.value_type().name(),
        actual,
    }
}

/// Text form of a value of `setting`'s type
pub(super) fn text_of<T>(
    setting: &Setting<T>,
    value: &dyn Any,
    converters: &ConverterRegistry,
) -> Result<String> {
    let converter = converters
        .get(setting.value_type())
        .ok_or_else(|| unsupported(setting))?;

    converter
        .to_text(value)
        .ok_or_else(|| type_mismatch(setting, "another type"))
}

/// Convert `text` into a value of `setting`'s type
pub(super) fn from_text<T>(
    setting: &Setting<T>,
    text: &str,
    converters: &ConverterRegistry,
) -> Result<Box<dyn Any>> {
    converters
        .get(setting.value_type())
        .ok_or_else(|| unsupported(setting))?
        .from_text(text)
}

/// Fail with the rule's message unless `value` passes it
pub(super) fn validate<T>(setting: &Setting<T>, value: &dyn Any) -> Result<()> {
    let verdict = setting.check(value);
    if verdict.is_valid() {
        return Ok(());
    }

    Err(Error::Validation {
        category: setting.key().category.clone(),
        name: setting.key().name.clone(),
        message: verdict.message,
    })
}

/// Write an already validated value and notify listeners
pub(super) fn write<T>(
    setting: &Setting<T>,
    object: &mut T,
    value: Box<dyn Any>,
    converters: &ConverterRegistry,
    events: &EventManager,
) -> Result<()> {
    let key = setting.key();

    if !events.has_listeners(key) {
        setting.write(object, value)?;
        debug!("Set {key}");
        return Ok(());
    }

    let old = text_of(setting, &*setting.read(object), converters)?;
    setting.write(object, value)?;
    let new = text_of(setting, &*setting.read(object), converters)?;

    debug!("Set {key}: {old} -> {new}");
    events.notify(key, &old, &new);
    Ok(())
}

fn unsupported<T>(setting: &Setting<T>) -> Error {
    Error::UnsupportedType {
        category: setting.key().category.clone(),
        name: setting.key().name.clone(),
        type_name: setting.value_type().name(),
    }
}
