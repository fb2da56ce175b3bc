//! Station platform table
//!
//! Maps exact sets of occupied track circuits to station platforms. Loaded
//! once from a CSV with columns `station`, `platform`, and a variable number
//! of `track_circuit_N` columns.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::state::StationInfo;

/// Errors while loading the station definition file. Fatal at startup.
#[derive(Debug, Error)]
pub enum StationTableError {
    #[error("failed to read station definition {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid platform number {value:?} in {path} (record {record})")]
    InvalidPlatform {
        path: PathBuf,
        record: u64,
        value: String,
    },

    #[error("station definition {path} is missing the {column:?} column")]
    MissingColumn { path: PathBuf, column: &'static str },
}

#[derive(Debug)]
struct StationEntry {
    name: String,
    platform: u32,
    tracks: HashSet<String>,
}

/// Read-only station platform table.
///
/// Entries keep file order so that the first configured platform wins when
/// two rows define the same track set.
#[derive(Debug)]
pub struct StationTable {
    entries: Vec<StationEntry>,
}

impl StationTable {
    /// Load the table from a CSV file.
    pub fn load(path: &Path) -> Result<Self, StationTableError> {
        info!(path = %path.display(), "Loading station definition");

        let mut reader =
            csv::Reader::from_path(path).map_err(|source| StationTableError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let headers = reader
            .headers()
            .map_err(|source| StationTableError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .clone();

        let station_col = column_index(&headers, "station").ok_or(
            StationTableError::MissingColumn {
                path: path.to_path_buf(),
                column: "station",
            },
        )?;
        let platform_col = column_index(&headers, "platform").ok_or(
            StationTableError::MissingColumn {
                path: path.to_path_buf(),
                column: "platform",
            },
        )?;

        // Track circuit columns are numbered from 1 upward.
        let track_cols: Vec<usize> = (1..)
            .map(|i| column_index(&headers, &format!("track_circuit_{i}")))
            .take_while(Option::is_some)
            .flatten()
            .collect();

        let mut entries = Vec::new();

        for (record_number, record) in reader.records().enumerate() {
            let record = record.map_err(|source| StationTableError::Read {
                path: path.to_path_buf(),
                source,
            })?;

            let name = record.get(station_col).unwrap_or_default().trim();
            let platform_field = record.get(platform_col).unwrap_or_default().trim();
            let platform: u32 =
                platform_field
                    .parse()
                    .map_err(|_| StationTableError::InvalidPlatform {
                        path: path.to_path_buf(),
                        record: record_number as u64 + 1,
                        value: platform_field.to_string(),
                    })?;

            let tracks: HashSet<String> = track_cols
                .iter()
                .filter_map(|&col| record.get(col))
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();

            if tracks.is_empty() {
                warn!(
                    station = name,
                    platform, "Skipping station platform with no track circuits"
                );
                continue;
            }

            entries.push(StationEntry {
                name: name.to_string(),
                platform,
                tracks,
            });
        }

        info!(count = entries.len(), "Loaded station platforms");

        Ok(Self { entries })
    }

    /// Build a table programmatically, preserving insertion order.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, u32, HashSet<String>)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, platform, tracks)| StationEntry {
                    name,
                    platform,
                    tracks,
                })
                .collect(),
        }
    }

    /// Match the occupied track circuits against the configured platforms.
    ///
    /// The input is de-duplicated and order-insensitive; a platform matches
    /// only when its track set is exactly equal to the occupied set. Returns
    /// the first configured match, or `None`.
    pub fn find_station(&self, occupied_tracks: &[String]) -> Option<StationInfo> {
        if occupied_tracks.is_empty() {
            return None;
        }

        let occupied: HashSet<&str> = occupied_tracks.iter().map(String::as_str).collect();

        self.entries
            .iter()
            .find(|entry| {
                entry.tracks.len() == occupied.len()
                    && occupied.iter().all(|t| entry.tracks.contains(*t))
            })
            .map(|entry| StationInfo {
                name: entry.name.clone(),
                platform: entry.platform,
            })
    }

    pub fn is_at_station(&self, occupied_tracks: &[String]) -> bool {
        self.find_station(occupied_tracks).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}
