//! Tests for the derive macro

mod common;

use catset::{DeriveSettings, Error, Settings, SettingsManager, Verdict};
use common::{Point, absolute_path, point_from_text, point_to_text};

fn even(value: &i32) -> Verdict {
    if value % 2 == 0 {
        Verdict::pass()
    } else {
        Verdict::fail("Value must be even.")
    }
}

#[derive(DeriveSettings, Debug, Default, Clone, PartialEq)]
#[schema(category = "General")]
struct AppSettings {
    #[setting(name = "Volume", min = 0, max = 11)]
    volume: i32,

    #[setting(name = "Scale", min = 0, max = 4.5)]
    scale: f64,

    #[setting]
    verbose: bool,

    #[setting(name = "LogFile", category = "Paths", path)]
    log_file: String,

    #[setting(name = "User", category = "Paths", pattern = "[a-z]+")]
    user: String,

    #[setting(name = "Step", rule = catset::rules::custom(even))]
    step: i32,

    #[setting(name = "Origin", category = "Layout")]
    origin: Point,

    // Not a setting
    cache: Vec<u8>,
}

#[derive(DeriveSettings, Default)]
struct ReadOnlyField {
    #[setting(category = "Info", read_only)]
    version: i32,
}

#[derive(DeriveSettings, Default)]
struct WriteOnlyField {
    #[setting(category = "Info", write_only)]
    token: String,
}

fn manager() -> SettingsManager<AppSettings> {
    common::init_logger();
    let mut manager = SettingsManager::builder()
        .converter::<Point>(point_to_text, point_from_text)
        .build();
    manager.attach(AppSettings::default()).unwrap();
    manager
}

#[test]
fn test_derive_declares_marked_fields() {
    let defs = AppSettings::settings();
    assert_eq!(defs.len(), 7);

    let verbose = defs.iter().find(|d| d.name() == "verbose").unwrap();
    assert_eq!(verbose.category(), "General");
    assert!(!verbose.has_rule());

    let log_file = defs.iter().find(|d| d.name() == "LogFile").unwrap();
    assert_eq!(log_file.category(), "Paths");
    assert!(log_file.has_rule());

    assert_eq!(AppSettings::categories(), vec!["General", "Layout", "Paths"]);
}

#[test]
fn test_derive_generates_text() {
    let manager = manager();
    assert_eq!(
        manager.generate().unwrap(),
        ":General:\nScale=0\nStep=0\nVolume=0\nverbose=false\n:Layout:\nOrigin=0;0\n:Paths:\nLogFile=\nUser=\n"
    );
}

#[test]
fn test_derive_range_rules() {
    let mut manager = manager();

    assert!(matches!(
        manager.set_value("General", "Volume", 11),
        Err(Error::Validation { .. })
    ));
    manager.set_value("General", "Volume", 10).unwrap();

    let verdict = manager.check_string_value("General", "Scale", "4.5").unwrap();
    assert_eq!(verdict.message(), "Given value is too large.");
    manager.set_value_from_string("General", "Scale", "4.25").unwrap();

    let object = manager.object().unwrap();
    assert_eq!(object.volume, 10);
    assert_eq!(object.scale, 4.25);
}

#[test]
fn test_derive_path_pattern_and_custom_rules() {
    let mut manager = manager();

    assert!(manager.set_value_from_string("Paths", "LogFile", "relative").is_err());
    manager
        .set_value_from_string("Paths", "LogFile", absolute_path())
        .unwrap();

    assert!(manager.set_value_from_string("Paths", "User", "Admin1").is_err());
    manager.set_value_from_string("Paths", "User", "admin").unwrap();

    let verdict = manager.check_string_value("General", "Step", "3").unwrap();
    assert_eq!(verdict.message(), "Value must be even.");
    manager.set_value("General", "Step", 4).unwrap();

    let object = manager.object().unwrap();
    assert_eq!(object.log_file, absolute_path());
    assert_eq!(object.user, "admin");
    assert_eq!(object.step, 4);
    assert!(object.cache.is_empty());
}

#[test]
fn test_derive_round_trip() {
    // Every ruled setting needs an accepted value, or the text cannot be read back
    let mut source = manager();
    source
        .parse(&format!(
            ":General:\nScale=1.5\nverbose=true\nVolume=3\n:Layout:\nOrigin=2;-2\n:Paths:\nLogFile={}\nUser=admin\n",
            absolute_path()
        ))
        .unwrap();
    let text = source.generate().unwrap();

    let mut target = manager();
    target.parse(&text).unwrap();
    assert_eq!(target.generate().unwrap(), text);
    assert_eq!(target.object().unwrap(), source.object().unwrap());
    assert_eq!(target.object().unwrap().scale, 1.5);
    assert_eq!(target.object().unwrap().origin, Point::new(2, -2));
}

#[test]
fn test_derive_read_only_and_write_only_rejected() {
    let err = SettingsManager::new()
        .attach(ReadOnlyField::default())
        .unwrap_err();
    assert!(matches!(err, Error::NonReadWrite { ref name, .. } if name == "version"));

    let err = SettingsManager::new()
        .attach(WriteOnlyField::default())
        .unwrap_err();
    assert!(matches!(err, Error::NonReadWrite { ref name, .. } if name == "token"));
}
