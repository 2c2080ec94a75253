//! Event system for settings changes
//!
//! Provides callbacks fired after a setting value has been written. Values are
//! reported in their text form, as produced by the setting's converter.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identity of a setting: its category plus its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SettingKey {
    pub category: String,
    pub name: String,
}

impl SettingKey {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category, self.name)
    }
}

/// Type alias for a change callback receiving (`key`, `old_value`, `new_value`)
pub type ChangeCallback = Box<dyn Fn(&SettingKey, &str, &str)>;

/// Manages event listeners for settings changes
#[derive(Default)]
pub struct EventManager {
    /// Global listeners (called for all changes)
    global_listeners: Vec<ChangeCallback>,

    /// Per-key listeners (called only for specific setting changes)
    key_listeners: HashMap<SettingKey, Vec<ChangeCallback>>,
}

impl EventManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a global change listener (called for all settings changes)
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: Fn(&SettingKey, &str, &str) + 'static,
    {
        self.global_listeners.push(Box::new(callback));
    }

    /// Register a listener for a specific setting
    pub fn watch<F>(&mut self, key: SettingKey, callback: F)
    where
        F: Fn(&SettingKey, &str, &str) + 'static,
    {
        self.key_listeners
            .entry(key)
            .or_default()
            .push(Box::new(callback));
    }

    /// Remove all listeners for a specific key
    pub fn unwatch(&mut self, key: &SettingKey) {
        self.key_listeners.remove(key);
    }

    /// Clear all listeners
    pub fn clear(&mut self) {
        self.global_listeners.clear();
        self.key_listeners.clear();
    }

    /// Whether a change to `key` would reach any listener
    #[must_use]
    pub fn has_listeners(&self, key: &SettingKey) -> bool {
        !self.global_listeners.is_empty() || self.key_listeners.contains_key(key)
    }

    /// Notify all listeners about a change
    pub fn notify(&self, key: &SettingKey, old_value: &str, new_value: &str) {
        for callback in &self.global_listeners {
            callback(key, old_value, new_value);
        }

        if let Some(listeners) = self.key_listeners.get(key) {
            for callback in listeners {
                callback(key, old_value, new_value);
            }
        }
    }
}

impl fmt::Debug for EventManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventManager")
            .field("global_listeners", &self.global_listeners.len())
            .field("watched_keys", &self.key_listeners.len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
