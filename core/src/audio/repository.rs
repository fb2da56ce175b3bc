//! Audio cue lookup
//!
//! Resolves semantic cue requests to file paths. Station cues are optional
//! and resolve to `None` when undefined; vehicle cues are mandatory and
//! guaranteed present by profile validation, so a miss at lookup time is a
//! configuration bug surfaced as an error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, warn};

use super::key::AudioKey;
use super::profile::{self, ProfileError};
use crate::state::Direction;

/// A mandatory cue was absent at lookup time.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("required audio entry missing: {0}")]
    MissingEntry(AudioKey),
}

/// Cue table with lookup fallbacks.
#[derive(Default)]
pub struct AudioRepository {
    files: HashMap<AudioKey, PathBuf>,
}

impl AudioRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from an already-assembled table.
    pub fn from_table(files: HashMap<AudioKey, PathBuf>) -> Self {
        Self { files }
    }

    /// Load and validate a profile CSV, replacing the current table.
    ///
    /// On any failure the current table is left untouched, so a bad reload
    /// cannot take down a running session.
    pub fn load_profile(&mut self, path: &Path) -> Result<(), ProfileError> {
        info!(path = %path.display(), "Loading audio profile");

        let files = profile::load_profile(path)?;
        let report = profile::validate(&files);

        if !report.is_valid() {
            error!(%report, "Audio profile rejected");
            return Err(ProfileError::Validation(report));
        }

        info!(count = files.len(), "Loaded audio entries");
        self.files = files;
        Ok(())
    }

    /// Departure melody for a station platform, if the profile defines one.
    pub fn station_melody(
        &self,
        station: &str,
        platform: u32,
        _direction: Direction,
    ) -> Option<&Path> {
        let key = AudioKey::StationMelody {
            station: station.to_string(),
            platform,
        };

        match self.files.get(&key) {
            Some(path) => Some(path),
            None => {
                warn!(station, platform, "Station melody not found");
                None
            }
        }
    }

    /// Door-closing announcement for the platform parity, if defined.
    pub fn station_door_closing(&self, odd_platform: bool) -> Option<&Path> {
        let key = AudioKey::StationDoorClosing { odd: odd_platform };

        match self.files.get(&key) {
            Some(path) => Some(path),
            None => {
                warn!(odd_platform, "Station door closing not found");
                None
            }
        }
    }

    /// On-board departure melody. Mandatory.
    pub fn vehicle_melody(&self, direction: Direction) -> Result<&Path, AudioError> {
        let key = AudioKey::VehicleMelody { direction };

        self.files.get(&key).map(PathBuf::as_path).ok_or_else(|| {
            error!(%direction, "Vehicle melody not found");
            AudioError::MissingEntry(key)
        })
    }

    /// On-board door-closing announcement. Mandatory.
    pub fn vehicle_door_closing(&self) -> Result<&Path, AudioError> {
        self.files
            .get(&AudioKey::VehicleDoorClosing)
            .map(PathBuf::as_path)
            .ok_or_else(|| {
                error!("Vehicle door closing not found");
                AudioError::MissingEntry(AudioKey::VehicleDoorClosing)
            })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn repository() -> AudioRepository {
        AudioRepository::from_table(HashMap::from([
            (
                AudioKey::VehicleMelody {
                    direction: Direction::Up,
                },
                PathBuf::from("up.wav"),
            ),
            (
                AudioKey::VehicleMelody {
                    direction: Direction::Down,
                },
                PathBuf::from("down.wav"),
            ),
            (AudioKey::VehicleDoorClosing, PathBuf::from("doors.wav")),
            (
                AudioKey::StationMelody {
                    station: "Ayase".to_string(),
                    platform: 1,
                },
                PathBuf::from("ayase1.wav"),
            ),
            (
                AudioKey::StationDoorClosing { odd: true },
                PathBuf::from("odd.wav"),
            ),
        ]))
    }

    #[test]
    fn test_station_cues_resolve_to_none_when_undefined() {
        let repo = repository();
        assert!(repo.station_melody("Ayase", 2, Direction::Up).is_none());
        assert!(repo.station_door_closing(false).is_none());
    }

    #[test]
    fn test_station_cues_resolve_when_defined() {
        let repo = repository();
        assert_eq!(
            repo.station_melody("Ayase", 1, Direction::Down),
            Some(Path::new("ayase1.wav"))
        );
        assert_eq!(repo.station_door_closing(true), Some(Path::new("odd.wav")));
    }

    #[test]
    fn test_vehicle_cues_are_mandatory() {
        let repo = repository();
        assert_eq!(
            repo.vehicle_melody(Direction::Up).unwrap(),
            Path::new("up.wav")
        );
        assert_eq!(repo.vehicle_door_closing().unwrap(), Path::new("doors.wav"));

        let empty = AudioRepository::new();
        assert!(empty.vehicle_melody(Direction::Up).is_err());
        assert!(empty.vehicle_door_closing().is_err());
    }

    #[test]
    fn test_failed_reload_keeps_previous_table() {
        let dir = tempfile::tempdir().unwrap();
        let up = dir.path().join("up.wav");
        let down = dir.path().join("down.wav");
        let doors = dir.path().join("doors.wav");
        for p in [&up, &down, &doors] {
            File::create(p).unwrap();
        }

        let good = dir.path().join("good.csv");
        let mut file = File::create(&good).unwrap();
        writeln!(file, "type,station,platform,direction,file").unwrap();
        writeln!(file, "vehicle_melody,,,up,{}", up.display()).unwrap();
        writeln!(file, "vehicle_melody,,,down,{}", down.display()).unwrap();
        writeln!(file, "vehicle_door_closing,,,,{}", doors.display()).unwrap();

        let bad = dir.path().join("bad.csv");
        let mut file = File::create(&bad).unwrap();
        writeln!(file, "type,station,platform,direction,file").unwrap();
        writeln!(file, "vehicle_melody,,,up,{}", up.display()).unwrap();

        let mut repo = AudioRepository::new();
        repo.load_profile(&good).unwrap();
        assert_eq!(repo.len(), 3);

        let err = repo.load_profile(&bad).unwrap_err();
        assert!(matches!(err, ProfileError::Validation(_)));
        assert_eq!(repo.len(), 3);
        assert!(repo.vehicle_door_closing().is_ok());
    }
}
