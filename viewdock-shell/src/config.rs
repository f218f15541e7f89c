use std::path::{Path, PathBuf};

use viewdock::{ViewManagerSettings, load_settings};

/// Return the path to the view manager settings file.
fn settings_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("viewdock")
            .join("settings.json");
    }
    std::env::temp_dir().join("viewdock").join("settings.json")
}

/// Load settings from disk, falling back to defaults on error.
pub(crate) fn load_initial_settings() -> ViewManagerSettings {
    let path = settings_path();
    match load_settings(&path) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!(
                "failed to load {}, using defaults: {err}",
                path.display()
            );
            ViewManagerSettings::default()
        },
    }
}
