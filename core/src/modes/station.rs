//! Station mode
//!
//! One press plays the station's departure melody on the "station" channel;
//! when it finishes, the door-closing announcement follows automatically.
//! Releases are ignored; there is no press-and-hold semantic here.

use tracing::{error, info, warn};

use super::{Mode, ModeContext, PressOutcome};
use crate::audio::{AudioPlayer, STATION_CHANNEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PlaybackState {
    #[default]
    Idle,
    PlayingMelody,
    PlayingAnnouncement,
}

#[derive(Default)]
pub struct StationMode {
    playback: PlaybackState,
}

impl StationMode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the melody → announcement → idle sequence on playback
    /// completion.
    ///
    /// Completion events carry no channel id; this only works because
    /// station mode is their sole consumer and drives nothing but the
    /// station channel.
    pub fn on_playback_finished<P: AudioPlayer>(&mut self, cx: &mut ModeContext<'_, P>) {
        match self.playback {
            PlaybackState::PlayingMelody => self.play_door_closing(cx),
            PlaybackState::PlayingAnnouncement => self.playback = PlaybackState::Idle,
            PlaybackState::Idle => {}
        }
    }

    fn play_door_closing<P: AudioPlayer>(&mut self, cx: &mut ModeContext<'_, P>) {
        let Some(station) = &cx.state.current_station else {
            warn!("Station info not available");
            self.playback = PlaybackState::Idle;
            return;
        };

        // The station variant is optional; the vehicle announcement stands in
        // when it is undefined.
        let announcement = match cx.audio.station_door_closing(station.is_odd_platform()) {
            Some(path) => path.to_path_buf(),
            None => match cx.audio.vehicle_door_closing() {
                Ok(path) => path.to_path_buf(),
                Err(e) => {
                    error!(error = %e, "Cannot start door closing announcement");
                    self.playback = PlaybackState::Idle;
                    return;
                }
            },
        };

        info!(file = %announcement.display(), "Playing station door closing");
        cx.player.play(STATION_CHANNEL, &announcement, false);
        self.playback = PlaybackState::PlayingAnnouncement;
    }
}

impl Mode for StationMode {
    fn on_enter<P: AudioPlayer>(&mut self, _cx: &mut ModeContext<'_, P>) {
        info!("Enter StationMode");
        self.playback = PlaybackState::Idle;
    }

    fn on_exit<P: AudioPlayer>(&mut self, _cx: &mut ModeContext<'_, P>) {
        info!("Exit StationMode");
        // The station channel is deliberately left running: switching back to
        // vehicle mode mid-announcement must not cut the platform audio. The
        // manager silences it on departure and on game stop.
        self.playback = PlaybackState::Idle;
    }

    fn on_button_pressed<P: AudioPlayer>(&mut self, cx: &mut ModeContext<'_, P>) -> PressOutcome {
        let Some(station) = &cx.state.current_station else {
            warn!("Station info not available");
            return PressOutcome::MelodyNotFound;
        };

        let melody = match cx.audio.station_melody(
            &station.name,
            station.platform,
            cx.state.direction,
        ) {
            Some(path) => path.to_path_buf(),
            None => return PressOutcome::MelodyNotFound,
        };

        info!(file = %melody.display(), "Playing station melody");
        cx.player.play(STATION_CHANNEL, &melody, false);
        self.playback = PlaybackState::PlayingMelody;
        PressOutcome::Handled
    }

    fn on_button_released<P: AudioPlayer>(&mut self, _cx: &mut ModeContext<'_, P>) {
        // Releases have no meaning in station mode.
    }

    fn update<P: AudioPlayer>(&mut self, _cx: &mut ModeContext<'_, P>) {}
}
