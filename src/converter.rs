//! String conversion for setting values
//!
//! Every value type that appears in a schema needs a [`Converter`]: a pair of
//! functions turning a value into its text form and back. Converters are kept
//! in a [`ConverterRegistry`] keyed by [`ValueType`]; the typed pair is erased
//! only inside the registry so values of different types can share one table.
//!
//! The registry starts with converters for `i32`, `f64`, `bool` and `String`.
//!
//! ```
//! use catset::ConverterRegistry;
//!
//! #[derive(Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let mut registry = ConverterRegistry::with_defaults();
//! registry.register::<Point>(
//!     |p| format!("{};{}", p.x, p.y),
//!     |s| {
//!         let (x, y) = s.split_once(';').ok_or("expected 'x;y'")?;
//!         Ok(Point {
//!             x: x.parse().map_err(|e| format!("{e}"))?,
//!             y: y.parse().map_err(|e| format!("{e}"))?,
//!         })
//!     },
//! );
//! assert!(registry.contains::<Point>());
//! ```

use crate::error::{Error, Result};
use log::{debug, info};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Value Type Tag
// =============================================================================

/// Identity of a setting's value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    /// The tag for `V`
    #[must_use]
    pub fn of<V: Any>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: std::any::type_name::<V>(),
        }
    }

    /// Whether this tag identifies `V`
    #[must_use]
    pub fn is<V: Any>(&self) -> bool {
        self.id == TypeId::of::<V>()
    }

    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full Rust type name, e.g. `alloc::string::String`
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// =============================================================================
// Converters
// =============================================================================

type ToText<V> = Box<dyn Fn(&V) -> String>;
type FromText<V> = Box<dyn Fn(&str) -> std::result::Result<V, String>>;

/// Bidirectional string conversion for values of type `V`.
pub struct Converter<V> {
    to_text: ToText<V>,
    from_text: FromText<V>,
}

impl<V: Any> Converter<V> {
    pub fn new<F, G>(to_text: F, from_text: G) -> Self
    where
        F: Fn(&V) -> String + 'static,
        G: Fn(&str) -> std::result::Result<V, String> + 'static,
    {
        Self {
            to_text: Box::new(to_text),
            from_text: Box::new(from_text),
        }
    }

    pub fn to_text(&self, value: &V) -> String {
        (self.to_text)(value)
    }

    /// Parse `text` into a value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`] carrying the rejected input.
    pub fn from_text(&self, text: &str) -> Result<V> {
        (self.from_text)(text).map_err(|reason| Error::Conversion {
            input: text.to_string(),
            type_name: std::any::type_name::<V>(),
            reason,
        })
    }
}

/// Type-erased view of a [`Converter`], used for heterogeneous storage.
pub(crate) trait ErasedConverter {
    /// `None` when `value` is not of the converter's type
    fn to_text(&self, value: &dyn Any) -> Option<String>;

    fn from_text(&self, text: &str) -> Result<Box<dyn Any>>;
}

impl<V: Any> ErasedConverter for Converter<V> {
    fn to_text(&self, value: &dyn Any) -> Option<String> {
        value
            .downcast_ref::<V>()
            .map(|v| Converter::<V>::to_text(self, v))
    }

    fn from_text(&self, text: &str) -> Result<Box<dyn Any>> {
        Converter::<V>::from_text(self, text).map(|v| Box::new(v) as Box<dyn Any>)
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Table of converters keyed by value type.
pub struct ConverterRegistry {
    converters: HashMap<TypeId, Box<dyn ErasedConverter>>,
}

impl ConverterRegistry {
    /// An empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// A registry holding the built-in `i32`, `f64`, `bool` and `String`
    /// converters
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register::<i32>(
            |n| n.to_string(),
            |s| {
                s.parse::<i32>()
                    .map_err(|_| format!("Cannot parse string {s} to int"))
            },
        );

        registry.register::<f64>(
            |n| n.to_string(),
            |s| {
                s.parse::<f64>()
                    .map_err(|_| format!("Cannot parse string {s} to double"))
            },
        );

        registry.register::<bool>(
            |b| b.to_string(),
            |s| {
                if s.eq_ignore_ascii_case("true") {
                    Ok(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Ok(false)
                } else {
                    Err(format!("Cannot parse string {s} to bool"))
                }
            },
        );

        registry.register::<String>(String::clone, |s| Ok(s.to_string()));

        info!("Registered {} default converters", registry.len());
        registry
    }

    /// Register the converter for `V`, replacing any existing one.
    pub fn register<V: Any>(
        &mut self,
        to_text: impl Fn(&V) -> String + 'static,
        from_text: impl Fn(&str) -> std::result::Result<V, String> + 'static,
    ) {
        self.insert(Converter::new(to_text, from_text));
    }

    /// Register an already constructed converter, replacing any existing one.
    pub fn insert<V: Any>(&mut self, converter: Converter<V>) {
        let replaced = self
            .converters
            .insert(TypeId::of::<V>(), Box::new(converter))
            .is_some();
        debug!(
            "{} converter for {}",
            if replaced { "Replaced" } else { "Registered" },
            std::any::type_name::<V>()
        );
    }

    #[must_use]
    pub fn contains<V: Any>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<V>())
    }

    #[must_use]
    pub fn contains_type(&self, value_type: ValueType) -> bool {
        self.converters.contains_key(&value_type.id())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    pub(crate) fn get(&self, value_type: ValueType) -> Option<&dyn ErasedConverter> {
        self.converters.get(&value_type.id()).map(|c| &**c)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("len", &self.converters.len())
            .finish()
    }
}
