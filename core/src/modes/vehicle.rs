//! Vehicle mode
//!
//! Press-and-hold semantics on the "vehicle" channel: the melody loops while
//! the trigger is held, and releasing it plays the door-closing
//! announcement.

use tracing::{error, info};

use super::{Mode, ModeContext, PressOutcome};
use crate::audio::{AudioPlayer, VEHICLE_CHANNEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PlaybackState {
    #[default]
    Idle,
    PlayingMelodyLoop,
    PlayingAnnouncement,
}

#[derive(Default)]
pub struct VehicleMode {
    playback: PlaybackState,
}

impl VehicleMode {
    pub fn new() -> Self {
        Self::default()
    }

    fn play_melody_loop<P: AudioPlayer>(&mut self, cx: &mut ModeContext<'_, P>) {
        let melody = match cx.audio.vehicle_melody(cx.state.direction) {
            Ok(path) => path.to_path_buf(),
            Err(e) => {
                // Profile validation guarantees this entry; reaching here
                // means the table was swapped out from under us.
                error!(error = %e, "Cannot start vehicle melody");
                return;
            }
        };

        info!(file = %melody.display(), "Playing vehicle melody loop");
        cx.player.play(VEHICLE_CHANNEL, &melody, true);
        self.playback = PlaybackState::PlayingMelodyLoop;
    }

    fn play_door_closing<P: AudioPlayer>(&mut self, cx: &mut ModeContext<'_, P>) {
        let announcement = match cx.audio.vehicle_door_closing() {
            Ok(path) => path.to_path_buf(),
            Err(e) => {
                error!(error = %e, "Cannot start vehicle door closing");
                self.playback = PlaybackState::Idle;
                return;
            }
        };

        info!(file = %announcement.display(), "Playing vehicle door closing");
        cx.player.play(VEHICLE_CHANNEL, &announcement, false);
        self.playback = PlaybackState::PlayingAnnouncement;
    }
}

impl Mode for VehicleMode {
    fn on_enter<P: AudioPlayer>(&mut self, _cx: &mut ModeContext<'_, P>) {
        info!("Enter VehicleMode");
        self.playback = PlaybackState::Idle;
    }

    fn on_exit<P: AudioPlayer>(&mut self, cx: &mut ModeContext<'_, P>) {
        info!("Exit VehicleMode");
        cx.player.stop(VEHICLE_CHANNEL);
        self.playback = PlaybackState::Idle;
    }

    fn on_button_pressed<P: AudioPlayer>(&mut self, cx: &mut ModeContext<'_, P>) -> PressOutcome {
        info!("VehicleMode: Button pressed");

        if self.playback == PlaybackState::PlayingAnnouncement {
            cx.player.stop(VEHICLE_CHANNEL);
        }

        self.play_melody_loop(cx);
        PressOutcome::Handled
    }

    fn on_button_released<P: AudioPlayer>(&mut self, cx: &mut ModeContext<'_, P>) {
        info!("VehicleMode: Button released");

        if self.playback == PlaybackState::PlayingMelodyLoop {
            cx.player.stop(VEHICLE_CHANNEL);
            self.play_door_closing(cx);
        }
    }

    fn update<P: AudioPlayer>(&mut self, cx: &mut ModeContext<'_, P>) {
        if self.playback == PlaybackState::PlayingAnnouncement
            && !cx.player.is_channel_playing(VEHICLE_CHANNEL)
        {
            self.playback = PlaybackState::Idle;
        }
    }
}
