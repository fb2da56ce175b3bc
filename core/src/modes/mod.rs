//! Operating modes
//!
//! Exactly one mode is active at a time; all transitions go through
//! [`ModeManager::switch_mode`](manager::ModeManager), which sequences
//! `on_exit` → swap → `on_enter` and logs the switch.

mod manager;
mod station;
mod vehicle;


pub use manager::ModeManager;
pub use station::StationMode;
pub use vehicle::VehicleMode;

use crate::audio::{AudioPlayer, AudioRepository};
use crate::state::AppState;

/// Everything a mode may touch during one event or tick.
///
/// Borrowed from the manager per call; modes hold no references of their
/// own.
pub struct ModeContext<'a, P: AudioPlayer> {
    pub player: &'a mut P,
    pub audio: &'a AudioRepository,
    pub state: &'a AppState,
}

/// Result of delegating a button press to a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    Handled,
    /// No melody is defined for the current station; the manager falls back
    /// to vehicle mode and replays the press there.
    MelodyNotFound,
}

/// Mode lifecycle and event handling.
pub trait Mode {
    fn on_enter<P: AudioPlayer>(&mut self, cx: &mut ModeContext<'_, P>);

    fn on_exit<P: AudioPlayer>(&mut self, cx: &mut ModeContext<'_, P>);

    fn on_button_pressed<P: AudioPlayer>(&mut self, cx: &mut ModeContext<'_, P>) -> PressOutcome;

    fn on_button_released<P: AudioPlayer>(&mut self, cx: &mut ModeContext<'_, P>);

    /// Per-tick housekeeping after telemetry has been applied.
    fn update<P: AudioPlayer>(&mut self, cx: &mut ModeContext<'_, P>);
}
