//! Game telemetry interface
//!
//! The game exposes train number, occupied track circuits and run state over
//! a local endpoint. The core consumes it through [`TelemetryApi`]; the
//! transport lives behind the trait implementation.

mod client;
mod mock;

pub use client::ApiClient;
pub use mock::{MockApi, MockApiHandle};

use thiserror::Error;

use crate::state::GameStatus;

/// A telemetry request failed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("telemetry endpoint unavailable")]
    Unavailable,

    #[error("telemetry request failed: {0}")]
    Request(String),
}

/// Raw telemetry provider.
///
/// `fetch_data` refreshes an internal snapshot; the getters read from that
/// snapshot and never fail, so a failed fetch leaves callers on
/// stale-but-consistent data.
pub trait TelemetryApi {
    fn connect(&mut self) -> bool;

    fn disconnect(&mut self);

    fn is_connected(&self) -> bool;

    fn fetch_data(&mut self) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn game_status(&self) -> GameStatus;

    fn track_circuits(&self) -> Vec<String>;

    fn train_number(&self) -> String;
}
