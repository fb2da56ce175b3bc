//! Audio profile loading and validation
//!
//! The profile is a CSV with columns `type`, `station`, `platform`,
//! `direction`, `file`. The `direction` column doubles as the parity label
//! for station door-closing rows. Rows with a blank file path are skipped.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use super::key::AudioKey;
use crate::state::Direction;

/// Outcome of validating a loaded profile table.
///
/// Collects every problem rather than stopping at the first, so the operator
/// can fix the profile in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub missing_entries: Vec<String>,
    pub missing_files: Vec<PathBuf>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.missing_entries.is_empty() && self.missing_files.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "audio profile validation failed")?;

        if !self.missing_entries.is_empty() {
            writeln!(f, "missing required entries:")?;
            for entry in &self.missing_entries {
                writeln!(f, "  - {entry}")?;
            }
        }

        if !self.missing_files.is_empty() {
            writeln!(f, "referenced files not found:")?;
            for file in &self.missing_files {
                writeln!(f, "  - {}", file.display())?;
            }
        }

        write!(f, "fix the profile and load it again")
    }
}

/// Errors while loading an audio profile. Fatal at startup; a failed reload
/// leaves the previous table in place.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read audio profile {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("audio profile {path} is missing the {column:?} column")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{0}")]
    Validation(ValidationReport),
}

/// The three entries every profile must define.
fn required_entries() -> [AudioKey; 3] {
    [
        AudioKey::VehicleMelody {
            direction: Direction::Up,
        },
        AudioKey::VehicleMelody {
            direction: Direction::Down,
        },
        AudioKey::VehicleDoorClosing,
    ]
}

/// Parse a profile CSV into a cue table. Does not validate; see [`validate`].
pub fn load_profile(path: &Path) -> Result<HashMap<AudioKey, PathBuf>, ProfileError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| ProfileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let headers = reader
        .headers()
        .map_err(|source| ProfileError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let col = |name: &'static str| -> Result<usize, ProfileError> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(ProfileError::MissingColumn {
                path: path.to_path_buf(),
                column: name,
            })
    };

    let type_col = col("type")?;
    let station_col = col("station")?;
    let platform_col = col("platform")?;
    let direction_col = col("direction")?;
    let file_col = col("file")?;

    let mut files = HashMap::new();

    for record in reader.records() {
        let record = record.map_err(|source| ProfileError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let field = |idx: usize| record.get(idx).unwrap_or_default().trim();

        let file_path = field(file_col);
        if file_path.is_empty() {
            continue;
        }

        let cue_type = field(type_col);
        let key = match cue_type {
            "station_melody" => AudioKey::StationMelody {
                station: field(station_col).to_string(),
                platform: field(platform_col).parse().unwrap_or(0),
            },
            "station_door_closing" => AudioKey::StationDoorClosing {
                odd: field(direction_col) == "odd",
            },
            "vehicle_melody" => AudioKey::VehicleMelody {
                direction: if field(direction_col) == "down" {
                    Direction::Down
                } else {
                    Direction::Up
                },
            },
            "vehicle_door_closing" => AudioKey::VehicleDoorClosing,
            other => {
                warn!(cue_type = other, "Skipping unknown cue type in profile");
                continue;
            }
        };

        debug!(key = %key, file = file_path, "Profile entry");
        files.insert(key, PathBuf::from(file_path));
    }

    Ok(files)
}

/// Check the mandatory entries and that every referenced file exists.
pub fn validate(files: &HashMap<AudioKey, PathBuf>) -> ValidationReport {
    let mut report = ValidationReport::default();

    for key in required_entries() {
        if !files.contains_key(&key) {
            report.missing_entries.push(key.to_string());
        }
    }

    for file in files.values() {
        if !file.exists() {
            report.missing_files.push(file.clone());
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap();
        path
    }

    fn write_profile(dir: &Path, rows: &[String]) -> PathBuf {
        let path = dir.join("profile.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "type,station,platform,direction,file").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        path
    }

    #[test]
    fn test_valid_profile_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let up = touch(dir.path(), "up.wav");
        let down = touch(dir.path(), "down.wav");
        let doors = touch(dir.path(), "doors.wav");
        let melody = touch(dir.path(), "ayase1.wav");

        let path = write_profile(
            dir.path(),
            &[
                format!("vehicle_melody,,,up,{}", up.display()),
                format!("vehicle_melody,,,down,{}", down.display()),
                format!("vehicle_door_closing,,,,{}", doors.display()),
                format!("station_melody,Ayase,1,,{}", melody.display()),
            ],
        );

        let files = load_profile(&path).unwrap();
        assert_eq!(files.len(), 4);

        let report = validate(&files);
        assert!(report.is_valid());
        assert!(report.missing_entries.is_empty());
        assert!(report.missing_files.is_empty());
    }

    #[test]
    fn test_blank_file_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_profile(
            dir.path(),
            &["station_melody,Ayase,1,,".to_string()],
        );

        let files = load_profile(&path).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_validation_aggregates_every_problem() {
        let dir = tempfile::tempdir().unwrap();
        let up = touch(dir.path(), "up.wav");

        // Down melody and door closing are absent; one referenced file is not
        // on disk.
        let path = write_profile(
            dir.path(),
            &[
                format!("vehicle_melody,,,up,{}", up.display()),
                format!("station_melody,Ayase,1,,{}", dir.path().join("gone.wav").display()),
            ],
        );

        let files = load_profile(&path).unwrap();
        let report = validate(&files);

        assert!(!report.is_valid());
        assert_eq!(report.missing_entries.len(), 2);
        assert_eq!(report.missing_files.len(), 1);

        let message = report.to_string();
        assert!(message.contains("vehicle melody (Down)"));
        assert!(message.contains("vehicle door closing"));
        assert!(message.contains("gone.wav"));
    }

    #[test]
    fn test_station_door_closing_parity_labels() {
        let dir = tempfile::tempdir().unwrap();
        let odd = touch(dir.path(), "odd.wav");
        let even = touch(dir.path(), "even.wav");

        let path = write_profile(
            dir.path(),
            &[
                format!("station_door_closing,,,odd,{}", odd.display()),
                format!("station_door_closing,,,even,{}", even.display()),
            ],
        );

        let files = load_profile(&path).unwrap();
        assert_eq!(
            files.get(&AudioKey::StationDoorClosing { odd: true }),
            Some(&odd)
        );
        assert_eq!(
            files.get(&AudioKey::StationDoorClosing { odd: false }),
            Some(&even)
        );
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = load_profile(Path::new("no/such/profile.csv")).unwrap_err();
        assert!(matches!(err, ProfileError::Read { .. }));
    }
}
