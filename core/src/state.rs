//! Shared application state
//!
//! One `AppState` instance exists per running session. The mode manager is
//! the only writer; modes and the host read it through borrows handed out
//! per call. Nothing here is global or static.

use std::fmt;

/// Which operating mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeKind {
    #[default]
    Vehicle,
    Station,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeKind::Vehicle => write!(f, "VehicleMode"),
            ModeKind::Station => write!(f, "StationMode"),
        }
    }
}

/// Game run state as reported by telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    Running,
    Paused,
    #[default]
    Stopped,
}

/// Travel direction, derived from the train number parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Even train numbers.
    #[default]
    Up,
    /// Odd train numbers.
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
        }
    }
}

/// A matched station platform.
///
/// Recreated each time telemetry matches a station; never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationInfo {
    pub name: String,
    pub platform: u32,
}

impl StationInfo {
    /// Odd platforms use the "odd" announcement variant.
    pub fn is_odd_platform(&self) -> bool {
        self.platform % 2 == 1
    }
}

impl fmt::Display for StationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} platform {}", self.name, self.platform)
    }
}

/// Snapshot of everything the modes and the host UI read.
///
/// Updated once per telemetry tick by the mode manager.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub current_mode: ModeKind,
    pub game_status: GameStatus,
    pub train_number: String,
    pub direction: Direction,
    pub occupied_tracks: Vec<String>,
    pub current_station: Option<StationInfo>,
    pub at_station: bool,

    /// File currently audible on any channel, for status display.
    pub current_audio_file: Option<std::path::PathBuf>,
    pub audio_playing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parity() {
        let odd = StationInfo {
            name: "Ayase".to_string(),
            platform: 1,
        };
        let even = StationInfo {
            name: "Ayase".to_string(),
            platform: 2,
        };
        assert!(odd.is_odd_platform());
        assert!(!even.is_odd_platform());
    }

    #[test]
    fn test_mode_display_used_in_transition_logs() {
        assert_eq!(ModeKind::Vehicle.to_string(), "VehicleMode");
        assert_eq!(ModeKind::Station.to_string(), "StationMode");
    }
}
