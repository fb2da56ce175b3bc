//! Playback channel contract
//!
//! Channels are independent single-slot playback lanes identified by a
//! caller-chosen string id. The modes drive disjoint channels ("vehicle" and
//! "station") and never touch each other's.

use std::path::{Path, PathBuf};

/// Channel id used by the vehicle mode.
pub const VEHICLE_CHANNEL: &str = "vehicle";
/// Channel id used by the station mode.
pub const STATION_CHANNEL: &str = "station";

/// Multi-channel audio playback.
///
/// `play` on a missing or undecodable file logs and returns without playing;
/// cue sequencing must never crash on a bad resource. Pause, resume and
/// volume apply to all channels uniformly.
pub trait AudioPlayer {
    /// Start a cue on the channel, replacing whatever it was playing. The
    /// channel is created on first use. Looped cues restart from the start
    /// on natural end and never report completion.
    fn play(&mut self, channel: &str, path: &Path, looped: bool);

    /// Stop one channel. No-op on an unknown or idle channel.
    fn stop(&mut self, channel: &str);

    /// Stop every channel. Idempotent.
    fn stop_all(&mut self);

    /// Pause all channels.
    fn pause(&mut self);

    /// Resume all paused channels.
    fn resume(&mut self);

    /// Set the master volume, clamped to 0.0..=1.0. Applies to current and
    /// future channels.
    fn set_volume(&mut self, volume: f64);

    fn is_channel_playing(&self, channel: &str) -> bool;

    /// True when any channel has an active cue (paused counts as active).
    fn is_playing(&self) -> bool;

    /// True when any channel is paused.
    fn is_paused(&self) -> bool;

    /// File currently audible on some channel, for status display.
    fn current_file(&self) -> Option<PathBuf>;

    /// Drain natural (non-looped) completions since the last call.
    ///
    /// Completions carry no channel id; callers re-check per-channel state to
    /// tell which cue ended. The mode logic tolerates this only because the
    /// two modes drive disjoint channels.
    fn take_finished(&mut self) -> usize;
}
