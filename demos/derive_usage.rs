// Derive macro usage example for catset
//
// Run with: cargo run --example derive_usage --features derive

use catset::{DeriveSettings, Settings, SettingsManager};

// =============================================================================
// Settings defined using the derive macro
// =============================================================================

#[derive(Debug, Clone, DeriveSettings)]
#[schema(category = "General")]
pub struct AppSettings {
    #[setting(name = "TrayEnabled")]
    pub tray_enabled: bool,

    #[setting(name = "FontSize", category = "Appearance", min = 7, max = 33)]
    pub font_size: i32,

    #[setting(name = "Theme", category = "Appearance", pattern = "light|dark|system")]
    pub theme: String,

    #[setting(name = "DownloadDir", category = "Paths", path)]
    pub download_dir: String,

    /// Runtime state, not persisted
    pub session_count: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            tray_enabled: true,
            font_size: 14,
            theme: "system".to_string(),
            download_dir: if cfg!(windows) {
                "C:\\Downloads".to_string()
            } else {
                "/tmp/downloads".to_string()
            },
            session_count: 0,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("catset Derive Macro Example\n");
    println!("Declared categories: {:?}\n", AppSettings::categories());

    let mut manager = SettingsManager::new();
    manager.attach(AppSettings::default())?;
    println!("Defaults:\n{}", manager.generate()?);

    manager.parse(":Appearance:\nFontSize=18\nTheme=dark\n")?;
    println!("After update:\n{}", manager.generate()?);

    for text in ["40", "abc", "20"] {
        let verdict = manager.check_string_value("Appearance", "FontSize", text)?;
        println!(
            "FontSize={text}: {}",
            if verdict.is_valid() {
                "ok"
            } else {
                verdict.message()
            }
        );
    }

    let settings = manager.detach().ok_or("no settings attached")?;
    println!("\nFinal object: {settings:?}");

    Ok(())
}
