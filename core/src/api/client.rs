//! Retrying telemetry client
//!
//! Wraps a [`TelemetryApi`] with fixed-delay retries, a consecutive-failure
//! counter, and an at-most-one-in-flight fetch guard. Fetch failures never
//! propagate past this boundary; callers keep reading the last good
//! snapshot.

use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::TelemetryApi;
use crate::state::GameStatus;

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(1000);
const UNSTABLE_THRESHOLD: u32 = 5;

pub struct ApiClient<T: TelemetryApi> {
    api: T,
    // try-locked, never awaited: a tick that finds a fetch in flight skips
    // its own fetch instead of queueing behind it.
    fetch_guard: Mutex<()>,
    consecutive_failures: u32,
}

impl<T: TelemetryApi> ApiClient<T> {
    pub fn new(api: T) -> Self {
        Self {
            api,
            fetch_guard: Mutex::new(()),
            consecutive_failures: 0,
        }
    }

    pub fn connect(&mut self) -> bool {
        info!("Connecting to telemetry");

        let connected = self.api.connect();
        if connected {
            info!("Connected to telemetry");
            self.consecutive_failures = 0;
        } else {
            error!("Failed to connect to telemetry");
        }

        connected
    }

    pub fn disconnect(&mut self) {
        self.api.disconnect();
        info!("Disconnected from telemetry");
    }

    pub fn is_connected(&self) -> bool {
        self.api.is_connected()
    }

    /// Refresh the telemetry snapshot, retrying up to [`MAX_RETRIES`] times.
    ///
    /// Skips entirely when another fetch is still in flight. After the last
    /// failed attempt the snapshot is left as-is and the getters keep
    /// serving the previous values.
    pub async fn fetch_data(&mut self) {
        let Ok(_guard) = self.fetch_guard.try_lock() else {
            debug!("Fetch already in flight, skipping");
            return;
        };

        for attempt in 1..=MAX_RETRIES {
            match self.api.fetch_data().await {
                Ok(()) => {
                    self.consecutive_failures = 0;
                    return;
                }
                Err(e) => {
                    self.consecutive_failures += 1;
                    warn!(
                        attempt,
                        max_retries = MAX_RETRIES,
                        error = %e,
                        "Telemetry fetch failed"
                    );

                    if attempt < MAX_RETRIES {
                        tokio::time::sleep(RETRY_DELAY).await;
                    }
                }
            }
        }

        error!(
            max_retries = MAX_RETRIES,
            "Telemetry fetch failed after all attempts"
        );

        if self.consecutive_failures >= UNSTABLE_THRESHOLD {
            error!(
                failures = self.consecutive_failures,
                "Telemetry connection unstable"
            );
        }
    }

    pub fn game_status(&self) -> GameStatus {
        self.api.game_status()
    }

    pub fn track_circuits(&self) -> Vec<String> {
        self.api.track_circuits()
    }

    pub fn train_number(&self) -> String {
        self.api.train_number()
    }
}
