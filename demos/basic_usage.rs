// Basic usage example for catset
//
// Run with: cargo run --example basic_usage

use catset::rules::custom;
use catset::{
    PathRule, PatternRule, RangeRule, SettingDef, Settings, SettingsManager, Verdict, setting,
    settings,
};

/// A window size with its own text form
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Size {
    width: i32,
    height: i32,
}

// Define your settings
#[derive(Debug, Clone)]
struct AppSettings {
    name: String,
    theme: String,
    port: i32,
    scale: f64,
    log_file: String,
    debug: bool,
    window: Size,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "My App".to_string(),
            theme: "light".to_string(),
            port: 8080,
            scale: 1.0,
            log_file: "/var/log/my-app.log".to_string(),
            debug: false,
            window: Size {
                width: 800,
                height: 600,
            },
        }
    }
}

impl Settings for AppSettings {
    fn settings() -> Vec<SettingDef<Self>> {
        settings![
            setting::<Self, String>("Name", "General")
                .get(|s| s.name.clone())
                .set(|s, v| s.name = v),

            setting::<Self, String>("Theme", "Appearance")
                .get(|s| s.theme.clone())
                .set(|s, v| s.theme = v)
                .rule(PatternRule::new("light|dark|auto").expect("valid theme pattern")),

            setting::<Self, f64>("Scale", "Appearance")
                .get(|s| s.scale)
                .set(|s, v| s.scale = v)
                .rule(custom(|scale: &f64| {
                    if *scale > 0.0 && *scale <= 4.0 {
                        Verdict::pass()
                    } else {
                        Verdict::fail("Scale must be above 0 and at most 4.")
                    }
                })),

            setting::<Self, Size>("Window", "Appearance")
                .get(|s| s.window)
                .set(|s, v| s.window = v),

            setting::<Self, i32>("Port", "Network")
                .get(|s| s.port)
                .set(|s, v| s.port = v)
                .rule(RangeRule::new(1023, 65536)),

            setting::<Self, String>("LogFile", "Advanced")
                .get(|s| s.log_file.clone())
                .set(|s, v| s.log_file = v)
                .rule(PathRule),

            setting::<Self, bool>("Debug", "Advanced")
                .get(|s| s.debug)
                .set(|s, v| s.debug = v),
        ]
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Initialize settings manager with fluent builder API
    let mut manager = SettingsManager::<AppSettings>::builder()
        .header("my-app settings")
        .converter::<Size>(
            |size| format!("{}x{}", size.width, size.height),
            |text| {
                let (w, h) = text.split_once('x').ok_or("expected WIDTHxHEIGHT")?;
                Ok(Size {
                    width: w.parse().map_err(|_| format!("bad width '{w}'"))?,
                    height: h.parse().map_err(|_| format!("bad height '{h}'"))?,
                })
            },
        )
        .build();

    manager.on_change(|key, old, new| println!("  changed {key}: {old} -> {new}"));
    manager.attach(AppSettings::default())?;

    println!("catset Basic Usage Example\n");
    println!("Generated settings:\n{}", manager.generate()?);

    // Update settings through typed and text access
    println!("Changing theme and port...");
    manager.set_value_from_string("Appearance", "Theme", "dark")?;
    manager.set_value("Network", "Port", 9000)?;

    // Dry-run a value before applying it
    let verdict = manager.check_string_value("Network", "Port", "80")?;
    println!("Port 80 accepted: {} ({})", verdict.is_valid(), verdict.message());

    // Rejected writes leave the object untouched
    if let Err(e) = manager.set_value_from_string("Advanced", "LogFile", "relative.log") {
        println!("Rejected: {e}");
    }

    // Apply a partial update from text
    println!("\nParsing an update...");
    let summary = manager.parse(":Appearance:\nWindow=1280x720\n:Advanced:\nDebug=true\n")?;
    println!("Applied {} settings", summary.applied);

    println!("\nSettings by category:");
    for (category, names) in manager.settings()? {
        println!("  {category}: {}", names.into_iter().collect::<Vec<_>>().join(", "));
    }

    println!("\nDescription:\n{}", serde_json::to_string_pretty(&manager.describe()?)?);
    println!("\nFinal settings:\n{}", manager.generate()?);

    Ok(())
}
