//! Scriptable telemetry provider
//!
//! Stands in for the game during tests and offline runs. Values staged
//! through the handle become visible after the next `fetch_data`, matching
//! the snapshot semantics of the live provider.

use std::sync::{Arc, Mutex};

use super::{ApiError, TelemetryApi};
use crate::state::GameStatus;

#[derive(Default)]
struct Staged {
    game_status: GameStatus,
    track_circuits: Vec<String>,
    train_number: String,
    failures_remaining: u32,
}

/// Control handle for staging telemetry values.
#[derive(Clone)]
pub struct MockApiHandle {
    staged: Arc<Mutex<Staged>>,
}

impl MockApiHandle {
    pub fn set_game_status(&self, status: GameStatus) {
        self.staged.lock().expect("mock state poisoned").game_status = status;
    }

    pub fn set_track_circuits<I, S>(&self, tracks: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.staged.lock().expect("mock state poisoned").track_circuits =
            tracks.into_iter().map(Into::into).collect();
    }

    pub fn set_train_number(&self, number: &str) {
        self.staged.lock().expect("mock state poisoned").train_number = number.to_string();
    }

    /// Make the next `n` fetches fail.
    pub fn fail_next_fetches(&self, n: u32) {
        self.staged
            .lock()
            .expect("mock state poisoned")
            .failures_remaining = n;
    }
}

/// In-memory [`TelemetryApi`] implementation.
pub struct MockApi {
    staged: Arc<Mutex<Staged>>,
    connected: bool,

    game_status: GameStatus,
    track_circuits: Vec<String>,
    train_number: String,
}

impl MockApi {
    pub fn new() -> (Self, MockApiHandle) {
        let staged = Arc::new(Mutex::new(Staged::default()));
        let handle = MockApiHandle {
            staged: Arc::clone(&staged),
        };

        let api = Self {
            staged,
            connected: false,
            game_status: GameStatus::default(),
            track_circuits: Vec::new(),
            train_number: String::new(),
        };

        (api, handle)
    }
}

impl TelemetryApi for MockApi {
    fn connect(&mut self) -> bool {
        self.connected = true;
        true
    }

    fn disconnect(&mut self) {
        self.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn fetch_data(&mut self) -> Result<(), ApiError> {
        let snapshot = {
            let mut staged = self.staged.lock().expect("mock state poisoned");
            if staged.failures_remaining > 0 {
                staged.failures_remaining -= 1;
                return Err(ApiError::Unavailable);
            }
            (
                staged.game_status,
                staged.track_circuits.clone(),
                staged.train_number.clone(),
            )
        };

        self.game_status = snapshot.0;
        self.track_circuits = snapshot.1;
        self.train_number = snapshot.2;
        Ok(())
    }

    fn game_status(&self) -> GameStatus {
        self.game_status
    }

    fn track_circuits(&self) -> Vec<String> {
        self.track_circuits.clone()
    }

    fn train_number(&self) -> String {
        self.train_number.clone()
    }
}
