//! Text Format Integration Tests
//!
//! Tests for generating and parsing settings text:
//! - Canonical ordering and value forms
//! - Round trips, comments and partial updates
//! - Malformed input and unknown keys
//! - All-or-nothing application and the skip policy

mod common;

use catset::{Error, ErrorKind, ParseSummary, SettingsManager, UnknownKeys};
use common::{
    Point, SimpleSettings, TestSettings, point_from_text, point_to_text, simple_manager,
    test_manager, verify_manager,
};

const DEFAULT_TEXT: &str =
    ":Default:\nDoubleSetting=0\nIntegerSetting=0\n:General:\nCustomSetting=0;0\nStringSetting=\n";

// =============================================================================
// Generate
// =============================================================================

#[test]
fn test_generate_defaults() {
    let manager = test_manager();
    assert_eq!(manager.generate().unwrap(), DEFAULT_TEXT);
}

#[test]
fn test_generate_simple_schema() {
    let manager = simple_manager();
    assert_eq!(
        manager.generate().unwrap(),
        ":Default:\nIntegerSetting=0\n:General:\nStringSetting=\n"
    );
}

#[test]
fn test_generate_reflects_current_values() {
    let mut manager = test_manager();
    manager.set_value("Default", "DoubleSetting", 1.5).unwrap();
    manager
        .set_value("General", "StringSetting", "a=b=c".to_string())
        .unwrap();

    assert_eq!(
        manager.generate().unwrap(),
        ":Default:\nDoubleSetting=1.5\nIntegerSetting=0\n:General:\nCustomSetting=0;0\nStringSetting=a=b=c\n"
    );
}

#[test]
fn test_generate_with_header() {
    let mut manager = SettingsManager::<SimpleSettings>::builder()
        .header("Generated settings\n\nEdit with care")
        .build();
    manager.attach(SimpleSettings::default()).unwrap();

    let text = manager.generate().unwrap();
    assert!(text.starts_with("# Generated settings\n#\n# Edit with care\n:Default:\n"));

    // The header is skipped when read back
    let summary = manager.parse(&text).unwrap();
    assert_eq!(summary.applied, 2);
}

#[test]
fn test_generate_rejects_newline_in_value() {
    let mut manager = simple_manager();
    manager
        .set_value_from_string("General", "StringSetting", "a\nb")
        .unwrap();

    let err = manager.generate().unwrap_err();
    assert!(matches!(
        err,
        Error::MultilineValue { ref category, ref name } if category == "General" && name == "StringSetting"
    ));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_generate_rejects_carriage_return_in_value() {
    let mut manager = simple_manager();
    manager
        .set_value("General", "StringSetting", "x\r".to_string())
        .unwrap();
    assert!(matches!(
        manager.generate(),
        Err(Error::MultilineValue { .. })
    ));

    // Once the value is single-line again the text reads back unchanged
    manager
        .set_value("General", "StringSetting", "x".to_string())
        .unwrap();
    let text = manager.generate().unwrap();
    let mut fresh = simple_manager();
    fresh.parse(&text).unwrap();
    assert_eq!(fresh.generate().unwrap(), text);
}

// =============================================================================
// Parse
// =============================================================================

#[test]
fn test_parse_sets_values() {
    let mut manager = test_manager();
    let summary = manager
        .parse(":Default:\nIntegerSetting=-10\nDoubleSetting=2.25\n:General:\nCustomSetting=4;5\nStringSetting=x=y\n")
        .unwrap();

    assert_eq!(
        summary,
        ParseSummary {
            applied: 4,
            skipped: 0
        }
    );

    let object = manager.object().unwrap();
    assert_eq!(object.integer, -10);
    assert_eq!(object.double, 2.25);
    assert_eq!(object.custom, Point::new(4, 5));
    assert_eq!(object.string, "x=y");
}

#[test]
fn test_round_trip_is_idempotent() {
    let mut source = test_manager();
    source
        .parse(":Default:\nIntegerSetting=77\nDoubleSetting=-0.125\n:General:\nStringSetting=with = signs\nCustomSetting=-1;9\n")
        .unwrap();
    let text = source.generate().unwrap();

    let mut target = test_manager();
    target.parse(&text).unwrap();
    assert_eq!(target.generate().unwrap(), text);
    assert_eq!(target.object().unwrap(), source.object().unwrap());
}

#[test]
fn test_parse_ignores_comments_and_blank_lines() {
    let mut manager = simple_manager();
    let text = "# top comment\n\n:Default:\n   \n# IntegerSetting=99\nIntegerSetting=5\r\n";
    let summary = manager.parse(text).unwrap();

    assert_eq!(summary.applied, 1);
    assert_eq!(manager.object().unwrap().integer, 5);
}

#[test]
fn test_parse_is_partial_update() {
    let mut manager = test_manager();
    manager.set_value("General", "StringSetting", "keep".to_string()).unwrap();

    manager.parse(":Default:\nIntegerSetting=3\n").unwrap();

    let object = manager.object().unwrap();
    assert_eq!(object.integer, 3);
    assert_eq!(object.string, "keep");
}

#[test]
fn test_parse_empty_value_clears_string() {
    let mut manager = simple_manager();
    manager.set_value("General", "StringSetting", "x".to_string()).unwrap();
    manager.parse(":General:\nStringSetting=\n").unwrap();
    assert_eq!(manager.object().unwrap().string, "");
}

#[test]
fn test_repeated_key_last_wins() {
    let mut manager = simple_manager();
    let summary = manager
        .parse(":Default:\nIntegerSetting=1\nIntegerSetting=2\n")
        .unwrap();
    assert_eq!(summary.applied, 2);
    assert_eq!(manager.object().unwrap().integer, 2);
}

#[test]
fn test_category_can_reappear() {
    let mut manager = simple_manager();
    manager
        .parse(":Default:\nIntegerSetting=1\n:General:\nStringSetting=s\n:Default:\nIntegerSetting=8\n")
        .unwrap();
    assert_eq!(manager.object().unwrap().integer, 8);
}

// =============================================================================
// Malformed Text
// =============================================================================

#[test]
fn test_setting_before_header_fails() {
    let mut manager = simple_manager();
    let err = manager.parse("IntegerSetting=4\n:Default:\n").unwrap_err();
    assert!(matches!(err, Error::Format { line: 1, .. }));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_missing_separator_fails() {
    let mut manager = simple_manager();
    let err = manager.parse(":Default:\nIntegerSetting\n").unwrap_err();
    assert!(matches!(err, Error::Format { line: 2, .. }));
}

#[test]
fn test_malformed_header_fails() {
    let mut manager = simple_manager();
    assert!(matches!(
        manager.parse(":Default\nIntegerSetting=1\n"),
        Err(Error::Format { line: 1, .. })
    ));
}

// =============================================================================
// Unknown Keys
// =============================================================================

#[test]
fn test_unknown_category_fails() {
    let mut manager = simple_manager();
    let err = manager.parse(":Nope:\nIntegerSetting=1\n").unwrap_err();
    assert!(matches!(err, Error::CategoryNotFound(ref c) if c == "Nope"));
}

#[test]
fn test_unknown_setting_fails_anywhere() {
    let mut manager = simple_manager();
    let err = manager
        .parse(":Default:\nIntegerSetting=6\n:General:\nStringSetting=s\nMissing=1\n")
        .unwrap_err();
    assert!(err.is_not_found());

    // Nothing before the bad line was applied either
    assert_eq!(manager.object().unwrap(), &SimpleSettings::default());
}

#[test]
fn test_skip_policy_ignores_unknown_keys() {
    let mut manager = SettingsManager::<SimpleSettings>::builder()
        .skip_unknown_keys()
        .build();
    assert_eq!(manager.config().unknown_keys, UnknownKeys::Skip);
    manager.attach(SimpleSettings::default()).unwrap();

    let summary = manager
        .parse(":Default:\nIntegerSetting=6\nOld=1\n:Legacy:\nA=1\nB=2\n:General:\nStringSetting=s\n")
        .unwrap();

    assert_eq!(
        summary,
        ParseSummary {
            applied: 2,
            skipped: 3
        }
    );
    assert_eq!(manager.object().unwrap().integer, 6);
    assert_eq!(manager.object().unwrap().string, "s");
}

#[test]
fn test_skip_policy_still_rejects_bad_values() {
    let mut manager = SettingsManager::<SimpleSettings>::builder()
        .unknown_keys(UnknownKeys::Skip)
        .build();
    manager.attach(SimpleSettings::default()).unwrap();

    assert!(matches!(
        manager.parse(":Default:\nIntegerSetting=abc\n"),
        Err(Error::Conversion { .. })
    ));
}

// =============================================================================
// Atomicity
// =============================================================================

#[test]
fn test_invalid_value_leaves_object_unchanged() {
    let mut manager = verify_manager();
    let before = manager.object().unwrap().clone();

    let err = manager
        .parse(":All:\nInt=12\nForty=40\nDouble=1000\n")
        .unwrap_err();
    assert!(matches!(err, Error::Validation { ref name, .. } if name == "Double"));
    assert_eq!(manager.object().unwrap(), &before);
}

#[test]
fn test_unconvertible_value_leaves_object_unchanged() {
    let mut manager = test_manager();
    let err = manager
        .parse(":Default:\nIntegerSetting=5\n:General:\nCustomSetting=oops\n")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conversion);
    assert_eq!(manager.object().unwrap(), &TestSettings::default());
}

#[test]
fn test_failed_parse_does_not_notify() {
    let mut manager = simple_manager();
    let fired = std::rc::Rc::new(std::cell::Cell::new(0));
    let counter = std::rc::Rc::clone(&fired);
    manager.on_change(move |_, _, _| counter.set(counter.get() + 1));

    assert!(manager.parse(":Default:\nIntegerSetting=1\nBad\n").is_err());
    assert_eq!(fired.get(), 0);

    manager.parse(":Default:\nIntegerSetting=1\n").unwrap();
    assert_eq!(fired.get(), 1);
}

#[test]
fn test_custom_converter_from_builder() {
    let mut manager = SettingsManager::<TestSettings>::builder()
        .converter::<Point>(point_to_text, point_from_text)
        .build();
    manager.attach(TestSettings::default()).unwrap();
    manager.parse(":General:\nCustomSetting=10;20\n").unwrap();
    assert_eq!(
        manager.get_value::<Point>("General", "CustomSetting").unwrap(),
        Point::new(10, 20)
    );
}
