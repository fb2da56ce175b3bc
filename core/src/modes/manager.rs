//! Mode manager
//!
//! Owns the application state, the playback channels, and both modes.
//! Drives everything from two inputs: the periodic telemetry tick
//! (`update`) and trigger press/release events. The host must deliver both
//! from one logical context; nothing here is safe for concurrent mutation.

use std::path::Path;

use tracing::info;

use super::{Mode, ModeContext, PressOutcome, StationMode, VehicleMode};
use crate::api::{ApiClient, TelemetryApi};
use crate::audio::{AudioPlayer, AudioRepository, ProfileError};
use crate::direction::resolve_direction;
use crate::state::{AppState, GameStatus, ModeKind, StationInfo};
use crate::stations::StationTable;

pub struct ModeManager<P: AudioPlayer, A: TelemetryApi> {
    player: P,
    audio: AudioRepository,
    client: ApiClient<A>,
    stations: StationTable,
    state: AppState,

    vehicle: VehicleMode,
    station: StationMode,
    current: ModeKind,

    previous_station: Option<StationInfo>,
    /// Set when entering station mode; the press that still carries it plays
    /// the station melody, any later press hands control back to vehicle
    /// mode.
    station_first_press: bool,
}

impl<P: AudioPlayer, A: TelemetryApi> ModeManager<P, A> {
    pub fn new(
        player: P,
        audio: AudioRepository,
        client: ApiClient<A>,
        stations: StationTable,
    ) -> Self {
        Self {
            player,
            audio,
            client,
            stations,
            state: AppState::default(),
            vehicle: VehicleMode::new(),
            station: StationMode::new(),
            current: ModeKind::Vehicle,
            previous_station: None,
            station_first_press: true,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn current_mode(&self) -> ModeKind {
        self.current
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.player.set_volume(volume);
    }

    /// Swap in a new audio profile; on failure the active one stays.
    pub fn reload_profile(&mut self, path: &Path) -> Result<(), ProfileError> {
        self.audio.load_profile(path)
    }

    /// Periodic telemetry tick.
    ///
    /// Fetches the latest snapshot (skipping if one is already in flight),
    /// rederives direction and station, applies arrival/departure edges and
    /// the game-status audio policy, then lets the active mode run its
    /// housekeeping.
    pub async fn update(&mut self) {
        self.client.fetch_data().await;

        self.state.game_status = self.client.game_status();
        self.state.occupied_tracks = self.client.track_circuits();
        self.state.train_number = self.client.train_number();
        self.state.direction = resolve_direction(&self.state.train_number);

        let current_station = self.stations.find_station(&self.state.occupied_tracks);
        self.state.current_station = current_station.clone();
        self.state.at_station = current_station.is_some();

        self.detect_station_change(current_station);
        self.handle_game_status();

        // Completion notifications drive the station melody sequence; the
        // subscription stands regardless of which mode is current.
        let finished = self.player.take_finished();
        if finished > 0 {
            let Self {
                player,
                audio,
                state,
                station,
                ..
            } = self;
            let mut cx = ModeContext {
                player,
                audio: &*audio,
                state: &*state,
            };
            for _ in 0..finished {
                station.on_playback_finished(&mut cx);
            }
        }

        {
            let Self {
                player,
                audio,
                state,
                vehicle,
                station,
                current,
                ..
            } = self;
            let mut cx = ModeContext {
                player,
                audio: &*audio,
                state: &*state,
            };
            match *current {
                ModeKind::Vehicle => vehicle.update(&mut cx),
                ModeKind::Station => station.update(&mut cx),
            }
        }

        self.state.audio_playing = self.player.is_playing();
        self.state.current_audio_file = self.player.current_file();
    }

    /// Trigger pressed.
    pub fn on_button_pressed(&mut self) {
        if self.current == ModeKind::Vehicle && self.state.at_station {
            self.switch_mode(ModeKind::Station);
            self.station_first_press = true;
        } else if self.current == ModeKind::Station && !self.station_first_press {
            // A repeat press at the same station hands control back to the
            // vehicle melody without waiting for departure.
            self.switch_mode(ModeKind::Vehicle);
        }

        if self.current == ModeKind::Station {
            self.station_first_press = false;
        }

        if self.delegate_press() == PressOutcome::MelodyNotFound {
            // No melody for this station: recover by starting the vehicle
            // melody immediately instead of demanding a second press.
            info!("Station melody not found, falling back to vehicle mode");
            self.switch_mode(ModeKind::Vehicle);
            self.station_first_press = true;
            self.delegate_press();
        }
    }

    /// Trigger released.
    pub fn on_button_released(&mut self) {
        let Self {
            player,
            audio,
            state,
            vehicle,
            station,
            current,
            ..
        } = self;
        let mut cx = ModeContext {
            player,
            audio: &*audio,
            state: &*state,
        };
        match *current {
            ModeKind::Vehicle => vehicle.on_button_released(&mut cx),
            ModeKind::Station => station.on_button_released(&mut cx),
        }
    }

    fn delegate_press(&mut self) -> PressOutcome {
        let Self {
            player,
            audio,
            state,
            vehicle,
            station,
            current,
            ..
        } = self;
        let mut cx = ModeContext {
            player,
            audio: &*audio,
            state: &*state,
        };
        match *current {
            ModeKind::Vehicle => vehicle.on_button_pressed(&mut cx),
            ModeKind::Station => station.on_button_pressed(&mut cx),
        }
    }

    /// The single transition choke point: exit, swap, enter.
    fn switch_mode(&mut self, to: ModeKind) {
        info!("Mode switch: {} -> {}", self.current, to);

        {
            let Self {
                player,
                audio,
                state,
                vehicle,
                station,
                current,
                ..
            } = self;
            let mut cx = ModeContext {
                player,
                audio: &*audio,
                state: &*state,
            };

            match *current {
                ModeKind::Vehicle => vehicle.on_exit(&mut cx),
                ModeKind::Station => station.on_exit(&mut cx),
            }

            *current = to;

            match to {
                ModeKind::Vehicle => vehicle.on_enter(&mut cx),
                ModeKind::Station => station.on_enter(&mut cx),
            }
        }

        self.state.current_mode = to;
    }

    fn detect_station_change(&mut self, current_station: Option<StationInfo>) {
        let previous_station = self.previous_station.take();

        match (&current_station, &previous_station) {
            (Some(station), None) => {
                info!(
                    station = %station.name,
                    platform = station.platform,
                    "Arrived at station"
                );
            }
            (None, Some(previous)) => {
                info!(station = %previous.name, "Departed from station");

                if self.current == ModeKind::Station {
                    // Departure cuts any in-flight platform audio before the
                    // mode flips back.
                    self.player.stop_all();
                    self.switch_mode(ModeKind::Vehicle);
                    self.station_first_press = true;
                }
            }
            _ => {}
        }

        self.previous_station = current_station;
    }

    /// Audio policy for the game run state, evaluated every tick.
    fn handle_game_status(&mut self) {
        match self.state.game_status {
            GameStatus::Running => {
                if self.player.is_paused() {
                    self.player.resume();
                }
            }
            GameStatus::Paused => {
                if self.player.is_playing() && !self.player.is_paused() {
                    self.player.pause();
                }
            }
            GameStatus::Stopped => {
                if self.player.is_playing() || self.player.is_paused() {
                    self.player.stop_all();
                }
                if self.current == ModeKind::Station {
                    self.switch_mode(ModeKind::Vehicle);
                    self.station_first_press = true;
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn player(&self) -> &P {
        &self.player
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }
}
