pub mod api;
pub mod audio;
pub mod direction;
pub mod modes;
pub mod settings;
pub mod state;
pub mod stations;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenience
pub use api::{ApiClient, ApiError, MockApi, MockApiHandle, TelemetryApi};
pub use audio::{
    AudioError, AudioKey, AudioPlayer, AudioRepository, PlayerError, ProfileError, RodioPlayer,
    STATION_CHANNEL, VEHICLE_CHANNEL, ValidationReport,
};
pub use direction::resolve_direction;
pub use modes::{Mode, ModeContext, ModeManager, PressOutcome, StationMode, VehicleMode};
pub use settings::SettingsExt;
pub use state::{AppState, Direction, GameStatus, ModeKind, StationInfo};
pub use stations::{StationTable, StationTableError};
