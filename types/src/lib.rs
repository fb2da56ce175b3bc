//! Shared configuration types for depmelody.
//!
//! Kept free of platform and persistence concerns so both the core and the
//! host binary can depend on them; loading/saving lives in
//! `depmelody_core::settings`.

use serde::{Deserialize, Serialize};

/// How the companion window should stay on top of the game.
///
/// Consumed by the host's window chrome; carried here because it is part of
/// the persisted settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopmostMode {
    Always,
    PlayingOnly,
    AtStationOnly,
    None,
}

/// Persisted application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Audio profile CSV to load at startup.
    #[serde(default = "default_profile_file")]
    pub profile_file: String,

    /// Station definition CSV to load at startup.
    #[serde(default = "default_station_file")]
    pub station_file: String,

    /// Master playback volume, 0.0 to 1.0.
    #[serde(default = "default_volume")]
    pub volume: f64,

    #[serde(default = "default_topmost")]
    pub topmost: TopmostMode,

    /// Whether the global trigger key is active.
    #[serde(default = "default_true")]
    pub enable_keyboard: bool,

    /// Trigger key identifier, e.g. "Space".
    #[serde(default = "default_input_key")]
    pub input_key: String,

    /// Log filter directive, e.g. "info" or "debug".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_profile_file() -> String {
    "profiles/default.csv".to_string()
}

fn default_station_file() -> String {
    "stations/stations.csv".to_string()
}

fn default_volume() -> f64 {
    0.8
}

fn default_topmost() -> TopmostMode {
    TopmostMode::Always
}

fn default_true() -> bool {
    true
}

fn default_input_key() -> String {
    "Space".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile_file: default_profile_file(),
            station_file: default_station_file(),
            volume: default_volume(),
            topmost: default_topmost(),
            enable_keyboard: true,
            input_key: default_input_key(),
            log_level: default_log_level(),
        }
    }
}
