//! Validator rules
//!
//! A [`Rule`] restricts which values a setting accepts beyond what its
//! converter can parse. Each setting carries at most one rule. Rules see the
//! value as `&dyn Any` so that one trait object type fits every setting; the
//! built-in rules downcast to the type they understand and reject anything
//! else.
//!
//! ```
//! use catset::rules::{self, RangeRule, Rule, Verdict};
//!
//! let percent = RangeRule::<i32>::new(0, 101);
//! assert!(percent.check(&50).is_valid());
//! assert_eq!(percent.check(&101).message(), "Given value is too large.");
//!
//! let forty = rules::custom(|v: &i32| {
//!     if *v == 40 { Verdict::pass() } else { Verdict::fail("Value must be 40.") }
//! });
//! assert!(!forty.check(&41).is_valid());
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

/// Verdict message for text the setting's converter cannot parse
pub const INVALID_FOR_TYPE: &str = "Given value is invalid for this type of setting.";
pub const TOO_SMALL: &str = "Given value is too small.";
pub const TOO_LARGE: &str = "Given value is too large.";
pub const NOT_A_NUMBER: &str = "Given value is not a number of the expected type.";
pub const NOT_A_PATH: &str = "Given value is not a valid absolute path.";
pub const NO_PATTERN_MATCH: &str = "Given value does not match the required pattern.";
pub const NOT_A_STRING: &str = "Given value is not text.";

/// Outcome of checking a value: valid or not, plus a message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub valid: bool,
    pub message: String,
}

impl Verdict {
    /// A passing verdict with an empty message
    #[must_use]
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A value check attached to a setting.
pub trait Rule {
    fn check(&self, value: &dyn Any) -> Verdict;
}

// =============================================================================
// Numeric range
// =============================================================================

/// Accepts numbers strictly between `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeRule<N> {
    min: N,
    max: N,
}

impl<N: PartialOrd + Copy + 'static> RangeRule<N> {
    #[must_use]
    pub fn new(min: N, max: N) -> Self {
        Self { min, max }
    }
}

impl<N: PartialOrd + Copy + 'static> Rule for RangeRule<N> {
    fn check(&self, value: &dyn Any) -> Verdict {
        let Some(number) = value.downcast_ref::<N>() else {
            return Verdict::fail(NOT_A_NUMBER);
        };

        // NaN compares as neither, and counts as too small
        if number.partial_cmp(&self.min) != Some(Ordering::Greater) {
            Verdict::fail(TOO_SMALL)
        } else if number.partial_cmp(&self.max) != Some(Ordering::Less) {
            Verdict::fail(TOO_LARGE)
        } else {
            Verdict::pass()
        }
    }
}

// =============================================================================
// Filesystem path
// =============================================================================

/// Accepts strings that form a syntactically valid, absolute path on the
/// current platform. The path does not have to exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathRule;

impl PathRule {
    fn is_valid_path(text: &str) -> bool {
        if text.is_empty() || text.contains('\0') {
            return false;
        }

        #[cfg(windows)]
        {
            // Drive prefix colon is the only place ':' may appear
            let body = text.get(2..).unwrap_or_default();
            if body.contains(['<', '>', '"', '|', '?', '*', ':']) {
                return false;
            }
        }

        Path::new(text).is_absolute()
    }
}

impl Rule for PathRule {
    fn check(&self, value: &dyn Any) -> Verdict {
        match value.downcast_ref::<String>() {
            Some(text) if Self::is_valid_path(text) => Verdict::pass(),
            _ => Verdict::fail(NOT_A_PATH),
        }
    }
}

// =============================================================================
// Regex pattern
// =============================================================================

/// Accepts strings matching a regular expression in full.
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
}

impl PatternRule {
    /// Compile `pattern`; the whole value must match it.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error for an invalid pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self { regex })
    }
}

impl Rule for PatternRule {
    fn check(&self, value: &dyn Any) -> Verdict {
        match value.downcast_ref::<String>() {
            Some(text) if self.regex.is_match(text) => Verdict::pass(),
            Some(_) => Verdict::fail(NO_PATTERN_MATCH),
            None => Verdict::fail(NOT_A_STRING),
        }
    }
}

// =============================================================================
// Custom
// =============================================================================

/// Rule built from a typed predicate; see [`custom`].
pub struct CustomRule<V, F> {
    predicate: F,
    _value: PhantomData<fn(&V)>,
}

impl<V: Any, F: Fn(&V) -> Verdict> Rule for CustomRule<V, F> {
    fn check(&self, value: &dyn Any) -> Verdict {
        match value.downcast_ref::<V>() {
            Some(v) => (self.predicate)(v),
            None => Verdict::fail(format!(
                "Given value is not of type {}.",
                std::any::type_name::<V>()
            )),
        }
    }
}

impl<V, F> fmt::Debug for CustomRule<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule").finish_non_exhaustive()
    }
}

/// Wrap a predicate over `V` as a [`Rule`]. Values of any other type fail.
pub fn custom<V, F>(predicate: F) -> CustomRule<V, F>
where
    V: Any,
    F: Fn(&V) -> Verdict,
{
    CustomRule {
        predicate,
        _value: PhantomData,
    }
}
