//! Common test utilities for catset integration tests
//!
//! Provides shared test fixtures, settings types, and helper functions.

#![allow(dead_code)]

use catset::rules::custom;
use catset::{
    PathRule, RangeRule, SettingDef, Settings, SettingsManager, Verdict, setting, settings,
};

// =============================================================================
// Custom Value Type
// =============================================================================

/// A value type without a built-in converter
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

pub fn point_to_text(point: &Point) -> String {
    format!("{};{}", point.x, point.y)
}

pub fn point_from_text(text: &str) -> Result<Point, String> {
    let (x, y) = text
        .split_once(';')
        .ok_or_else(|| format!("expected 'x;y', got '{text}'"))?;
    Ok(Point {
        x: x.trim().parse().map_err(|_| format!("bad x in '{text}'"))?,
        y: y.trim().parse().map_err(|_| format!("bad y in '{text}'"))?,
    })
}

// =============================================================================
// Test Settings
// =============================================================================

/// Settings in two categories, including one custom type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestSettings {
    pub integer: i32,
    pub double: f64,
    pub string: String,
    pub custom: Point,
}

impl Settings for TestSettings {
    fn settings() -> Vec<SettingDef<Self>> {
        settings![
            setting::<Self, i32>("IntegerSetting", "Default")
                .get(|s| s.integer)
                .set(|s, v| s.integer = v),
            setting::<Self, f64>("DoubleSetting", "Default")
                .get(|s| s.double)
                .set(|s, v| s.double = v),
            setting::<Self, String>("StringSetting", "General")
                .get(|s| s.string.clone())
                .set(|s, v| s.string = v),
            setting::<Self, Point>("CustomSetting", "General")
                .get(|s| s.custom)
                .set(|s, v| s.custom = v),
        ]
    }
}

/// Settings using only the built-in converters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleSettings {
    pub integer: i32,
    pub string: String,
}

impl Settings for SimpleSettings {
    fn settings() -> Vec<SettingDef<Self>> {
        settings![
            setting::<Self, i32>("IntegerSetting", "Default")
                .get(|s| s.integer)
                .set(|s, v| s.integer = v),
            setting::<Self, String>("StringSetting", "General")
                .get(|s| s.string.clone())
                .set(|s, v| s.string = v),
        ]
    }
}

/// Settings carrying one rule each
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerifySettings {
    pub int: i32,
    pub double: f64,
    pub path: String,
    pub forty: i32,
    pub enabled: bool,
}

impl Settings for VerifySettings {
    fn settings() -> Vec<SettingDef<Self>> {
        settings![
            setting::<Self, i32>("Int", "All")
                .get(|s| s.int)
                .set(|s, v| s.int = v)
                .rule(RangeRule::new(0, 32)),
            setting::<Self, f64>("Double", "All")
                .get(|s| s.double)
                .set(|s, v| s.double = v)
                .rule(RangeRule::new(-32.4, 99.98)),
            setting::<Self, String>("Path", "All")
                .get(|s| s.path.clone())
                .set(|s, v| s.path = v)
                .rule(PathRule),
            setting::<Self, i32>("Forty", "All")
                .get(|s| s.forty)
                .set(|s, v| s.forty = v)
                .rule(custom(|n: &i32| {
                    if *n == 40 {
                        Verdict::pass()
                    } else {
                        Verdict::fail("Value must be forty.")
                    }
                })),
            setting::<Self, bool>("Enabled", "All")
                .get(|s| s.enabled)
                .set(|s, v| s.enabled = v),
        ]
    }
}

/// An absolute path valid on the current platform
pub fn absolute_path() -> &'static str {
    if cfg!(windows) {
        "C:\\So\\Am\\I"
    } else {
        "/iam/valid"
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Install a test logger once; later calls are no-ops.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Manager with the `Point` converter registered and a default object attached
pub fn test_manager() -> SettingsManager<TestSettings> {
    init_logger();
    let mut manager = SettingsManager::builder()
        .converter::<Point>(point_to_text, point_from_text)
        .build();
    manager
        .attach(TestSettings::default())
        .expect("Failed to attach test settings");
    manager
}

pub fn simple_manager() -> SettingsManager<SimpleSettings> {
    init_logger();
    let mut manager = SettingsManager::new();
    manager
        .attach(SimpleSettings::default())
        .expect("Failed to attach simple settings");
    manager
}

pub fn verify_manager() -> SettingsManager<VerifySettings> {
    init_logger();
    let mut manager = SettingsManager::new();
    manager
        .attach(VerifySettings::default())
        .expect("Failed to attach verify settings");
    manager
}
