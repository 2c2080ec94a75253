//! Built schema: the verified categories and settings of an attached object
//!
//! [`Schema::build`] turns the declarations of a [`Settings`] type into
//! categories keyed and sorted by name, each holding its settings sorted by
//! name. Building either succeeds completely or returns the first problem
//! found, so a manager can build into a fresh value and swap it in only on
//! success.

use crate::config::{Getter, Setter, SettingDef, Settings};
use crate::converter::{ConverterRegistry, ValueType};
use crate::error::{Error, Result};
use crate::events::SettingKey;
use crate::rules::{Rule, Verdict};

use regex::Regex;
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// Characters that would break the text format if they appeared in a name
static FORBIDDEN_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[:=#\r\n]").expect("forbidden character pattern is valid"));

fn check_name(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidName {
            value: value.to_string(),
            reason: "names cannot be empty",
        });
    }
    if FORBIDDEN_CHARS.is_match(value) {
        return Err(Error::InvalidName {
            value: value.to_string(),
            reason: "names cannot contain ':', '=', '#' or line breaks",
        });
    }
    Ok(())
}

// =============================================================================
// Setting
// =============================================================================

/// One verified setting with its accessors.
pub(crate) struct Setting<T> {
    key: SettingKey,
    value_type: ValueType,
    getter: Getter<T>,
    setter: Setter<T>,
    rule: Option<Box<dyn Rule>>,
}

impl<T> Setting<T> {
    pub(crate) fn key(&self) -> &SettingKey {
        &self.key
    }

    pub(crate) fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub(crate) fn has_rule(&self) -> bool {
        self.rule.is_some()
    }

    /// Current value, boxed as the setting's value type
    pub(crate) fn read(&self, object: &T) -> Box<dyn Any> {
        (self.getter)(object)
    }

    /// Run the setting's rule; settings without a rule accept everything.
    pub(crate) fn check(&self, value: &dyn Any) -> Verdict {
        match &self.rule {
            Some(rule) => rule.check(value),
            None => Verdict::pass(),
        }
    }

    /// Write `value` through the setter without validation.
    pub(crate) fn write(&self, object: &mut T, value: Box<dyn Any>) -> Result<()> {
        (self.setter)(object, value).map_err(|_| Error::TypeMismatch {
            key: self.key.to_string(),
            expected: self.value_type.name(),
            actual: "another type",
        })
    }
}

// =============================================================================
// Category
// =============================================================================

pub(crate) struct Category<T> {
    name: String,
    settings: BTreeMap<String, Setting<T>>,
}

impl<T> Category<T> {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Settings in name order
    pub(crate) fn settings(&self) -> impl Iterator<Item = &Setting<T>> {
        self.settings.values()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Setting<T>> {
        self.settings.get(name)
    }
}

// =============================================================================
// Schema
// =============================================================================

pub(crate) struct Schema<T> {
    categories: BTreeMap<String, Category<T>>,
    len: usize,
}

impl<T: Settings> Schema<T> {
    /// Build the schema for `T` from its declarations.
    ///
    /// Each declaration is checked in turn for read/write accessors, a
    /// registered converter, legal names and a unique key.
    ///
    /// # Errors
    ///
    /// Returns the first schema error found, or [`Error::EmptySchema`] when
    /// `T` declares nothing.
    pub(crate) fn build(converters: &ConverterRegistry) -> Result<Self> {
        Self::from_defs(T::settings(), converters)
    }

    pub(crate) fn from_defs(defs: Vec<SettingDef<T>>, converters: &ConverterRegistry) -> Result<Self> {
        let mut categories: BTreeMap<String, Category<T>> = BTreeMap::new();
        let mut len = 0;

        for def in defs {
            let SettingDef {
                name,
                category,
                value_type,
                getter,
                setter,
                rule,
            } = def;

            let (Some(getter), Some(setter)) = (getter, setter) else {
                return Err(Error::NonReadWrite { category, name });
            };

            if !converters.contains_type(value_type) {
                return Err(Error::UnsupportedType {
                    category,
                    name,
                    type_name: value_type.name(),
                });
            }

            check_name(&name)?;
            check_name(&category)?;

            let entry = categories
                .entry(category.clone())
                .or_insert_with(|| Category {
                    name: category.clone(),
                    settings: BTreeMap::new(),
                });

            if entry.settings.contains_key(&name) {
                return Err(Error::DuplicateName { category, name });
            }

            entry.settings.insert(
                name.clone(),
                Setting {
                    key: SettingKey::new(category, name),
                    value_type,
                    getter,
                    setter,
                    rule,
                },
            );
            len += 1;
        }

        if len == 0 {
            return Err(Error::EmptySchema);
        }

        Ok(Self { categories, len })
    }
}

impl<T> Schema<T> {
    pub(crate) fn category(&self, name: &str) -> Result<&Category<T>> {
        self.categories
            .get(name)
            .ok_or_else(|| Error::CategoryNotFound(name.to_string()))
    }

    pub(crate) fn setting(&self, category: &str, name: &str) -> Result<&Setting<T>> {
        self.category(category)?
            .get(name)
            .ok_or_else(|| Error::setting_not_found(category, name))
    }

    /// Categories in name order
    pub(crate) fn categories(&self) -> impl Iterator<Item = &Category<T>> {
        self.categories.values()
    }

    /// Every setting, ordered by category then name
    pub(crate) fn settings(&self) -> impl Iterator<Item = &Setting<T>> {
        self.categories().flat_map(Category::settings)
    }

    pub(crate) fn names(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.categories
            .iter()
            .map(|(name, category)| (name.clone(), category.settings.keys().cloned().collect()))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn category_count(&self) -> usize {
        self.categories.len()
    }
}
