//! Settings persistence
//!
//! Loads and stores [`Settings`] through confy under the `depmelody` app
//! name. The types themselves live in `depmelody-types` so the host UI can
//! share them without pulling in persistence.

use std::path::Path;

use depmelody_types::Settings;
use tracing::warn;

const APP_NAME: &str = "depmelody";
const CONFIG_NAME: Option<&str> = Some("config");

/// Persistence extension for [`Settings`].
pub trait SettingsExt: Sized {
    /// Load from the default platform config location, falling back to
    /// defaults on any error.
    fn load() -> Self;

    /// Load from an explicit file path, falling back to defaults.
    fn load_from(path: &Path) -> Self;

    fn save(self);
}

impl SettingsExt for Settings {
    fn load() -> Self {
        confy::load(APP_NAME, CONFIG_NAME).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load settings, using defaults");
            Settings::default()
        })
    }

    fn load_from(path: &Path) -> Self {
        confy::load_path(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Failed to load settings, using defaults");
            Settings::default()
        })
    }

    fn save(self) {
        if let Err(e) = confy::store(APP_NAME, CONFIG_NAME, self) {
            warn!(error = %e, "Failed to save settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_reads_overrides_and_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "volume = 0.5\nprofile_file = \"p.csv\"").unwrap();

        let settings = Settings::load_from(&path);
        assert!((settings.volume - 0.5).abs() < f64::EPSILON);
        assert_eq!(settings.profile_file, "p.csv");
        // Unset fields keep their defaults.
        assert_eq!(settings.input_key, "Space");
        assert!(settings.enable_keyboard);
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("missing.toml"));
        assert!((settings.volume - 0.8).abs() < f64::EPSILON);
        assert_eq!(settings.station_file, "stations/stations.csv");
    }
}
