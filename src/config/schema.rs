//! Settings declarations
//!
//! # Overview
//!
//! A type becomes manageable by implementing [`Settings`], which lists one
//! [`SettingDef`] per setting. Each definition names the setting, puts it in a
//! category and supplies typed accessors into the bound object:
//!
//! ```rust
//! use catset::{setting, settings, RangeRule, SettingDef, Settings};
//!
//! #[derive(Default)]
//! struct Profile {
//!     name: String,
//!     age: i32,
//! }
//!
//! impl Settings for Profile {
//!     fn settings() -> Vec<SettingDef<Self>> {
//!         settings![
//!             setting::<Self, String>("Your name", "Basic Information")
//!                 .get(|p| p.name.clone())
//!                 .set(|p, v| p.name = v),
//!
//!             setting::<Self, i32>("Your age", "Basic Information")
//!                 .get(|p| p.age)
//!                 .set(|p, v| p.age = v)
//!                 .rule(RangeRule::new(0, 130)),
//!         ]
//!     }
//! }
//! ```
//!
//! Definitions are checked when an object is attached to a
//! [`SettingsManager`](crate::SettingsManager): a definition without a getter
//! or setter, with an unconvertible value type, with an illegal name or with a
//! duplicate key is rejected there rather than here.
//!
//! With the `derive` feature, `#[derive(Settings)]` writes this list from
//! field attributes.

use crate::converter::ValueType;
use crate::rules::Rule;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

pub(crate) type Getter<T> = Box<dyn Fn(&T) -> Box<dyn Any>>;

/// Gives the value back when it is not of the setting's type.
pub(crate) type Setter<T> = Box<dyn Fn(&mut T, Box<dyn Any>) -> Result<(), Box<dyn Any>>>;

// =============================================================================
// Settings Trait
// =============================================================================

/// Trait for types whose fields are exposed as settings
///
/// Implement this trait (or derive it) for the object you attach to a
/// [`SettingsManager`](crate::SettingsManager).
pub trait Settings: Sized + 'static {
    /// Declarations for every setting of this type
    fn settings() -> Vec<SettingDef<Self>>;

    /// Declared categories, sorted and deduplicated
    #[must_use]
    fn categories() -> Vec<String> {
        let mut categories: Vec<String> = Self::settings()
            .iter()
            .map(|def| def.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }
}

// =============================================================================
// Setting Definition
// =============================================================================

/// Type-erased declaration of one setting of `T`.
pub struct SettingDef<T> {
    pub(crate) name: String,
    pub(crate) category: String,
    pub(crate) value_type: ValueType,
    pub(crate) getter: Option<Getter<T>>,
    pub(crate) setter: Option<Setter<T>>,
    pub(crate) rule: Option<Box<dyn Rule>>,
}

impl<T> SettingDef<T> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    #[must_use]
    pub fn has_rule(&self) -> bool {
        self.rule.is_some()
    }
}

impl<T> fmt::Debug for SettingDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingDef")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("value_type", &self.value_type.name())
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .field("rule", &self.has_rule())
            .finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Typed builder for a [`SettingDef`]; see [`setting`].
pub struct SettingBuilder<T, V> {
    name: String,
    category: String,
    getter: Option<Box<dyn Fn(&T) -> V>>,
    setter: Option<Box<dyn Fn(&mut T, V)>>,
    rule: Option<Box<dyn Rule>>,
    _value: PhantomData<V>,
}

impl<T: 'static, V: Any> SettingBuilder<T, V> {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            getter: None,
            setter: None,
            rule: None,
            _value: PhantomData,
        }
    }

    /// Read accessor; returns the current value
    #[must_use]
    pub fn get(mut self, getter: impl Fn(&T) -> V + 'static) -> Self {
        self.getter = Some(Box::new(getter));
        self
    }

    /// Write accessor
    #[must_use]
    pub fn set(mut self, setter: impl Fn(&mut T, V) + 'static) -> Self {
        self.setter = Some(Box::new(setter));
        self
    }

    /// Attach a validator rule, replacing any previous one
    #[must_use]
    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rule = Some(Box::new(rule));
        self
    }

    #[must_use]
    pub fn build(self) -> SettingDef<T> {
        let getter = self.getter.map(|get| -> Getter<T> {
            Box::new(move |obj: &T| Box::new(get(obj)) as Box<dyn Any>)
        });

        let setter = self.setter.map(|set| -> Setter<T> {
            Box::new(move |obj: &mut T, value: Box<dyn Any>| -> Result<(), Box<dyn Any>> {
                let value = value.downcast::<V>()?;
                set(obj, *value);
                Ok(())
            })
        });

        SettingDef {
            name: self.name,
            category: self.category,
            value_type: ValueType::of::<V>(),
            getter,
            setter,
            rule: self.rule,
        }
    }
}

impl<T: 'static, V: Any> From<SettingBuilder<T, V>> for SettingDef<T> {
    fn from(builder: SettingBuilder<T, V>) -> Self {
        builder.build()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Shorthand for [`SettingBuilder::new`]
///
/// # Example
/// ```rust
/// use catset::setting;
///
/// struct Window { width: i32 }
///
/// let def = setting::<Window, i32>("Width", "Layout")
///     .get(|w| w.width)
///     .set(|w, v| w.width = v)
///     .build();
/// assert_eq!(def.category(), "Layout");
/// ```
pub fn setting<T: 'static, V: Any>(
    name: impl Into<String>,
    category: impl Into<String>,
) -> SettingBuilder<T, V> {
    SettingBuilder::new(name, category)
}

/// Macro for building a `Vec<SettingDef<T>>` from builders or definitions
///
/// # Example
/// ```rust
/// use catset::{setting, settings, SettingDef, Settings};
///
/// #[derive(Default)]
/// struct Flags { verbose: bool }
///
/// impl Settings for Flags {
///     fn settings() -> Vec<SettingDef<Self>> {
///         settings![
///             setting::<Self, bool>("Verbose", "Output")
///                 .get(|f| f.verbose)
///                 .set(|f, v| f.verbose = v),
///         ]
///     }
/// }
///
/// assert_eq!(Flags::settings().len(), 1);
/// ```
#[macro_export]
macro_rules! settings {
    ($($def:expr),* $(,)?) => {{
        let mut defs = ::std::vec::Vec::new();
        $(
            defs.push($crate::SettingDef::from($def));
        )*
        defs
    }};
}

// =============================================================================
// Tests
// =============================================================================
