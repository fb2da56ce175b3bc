//! Shared test doubles.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::audio::AudioPlayer;

/// One observed playback call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Play {
        channel: String,
        path: PathBuf,
        looped: bool,
    },
    Stop(String),
    StopAll,
    Pause,
    Resume,
    SetVolume(u32),
}

#[derive(Debug, Default, Clone)]
struct ChannelState {
    current: PathBuf,
    looping: bool,
    playing: bool,
    paused: bool,
}

/// [`AudioPlayer`] double that records every call and lets tests drive
/// natural completion by hand. Every path is treated as present.
#[derive(Default)]
pub(crate) struct RecordingPlayer {
    pub calls: Vec<Call>,
    channels: HashMap<String, ChannelState>,
    finished_pending: usize,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the natural end of a one-shot cue on a channel.
    pub fn finish_current(&mut self, channel: &str) {
        if let Some(ch) = self.channels.get_mut(channel) {
            assert!(!ch.looping, "looped cues never finish naturally");
            if ch.playing {
                ch.playing = false;
                self.finished_pending += 1;
            }
        }
    }

    /// Calls observed since construction, filtered to plays and stops.
    pub fn playback_calls(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| {
                matches!(c, Call::Play { .. } | Call::Stop(_) | Call::StopAll)
            })
            .collect()
    }

    pub fn count(&self, wanted: &Call) -> usize {
        self.calls.iter().filter(|c| *c == wanted).count()
    }
}

impl AudioPlayer for RecordingPlayer {
    fn play(&mut self, channel: &str, path: &Path, looped: bool) {
        self.calls.push(Call::Play {
            channel: channel.to_string(),
            path: path.to_path_buf(),
            looped,
        });
        self.channels.insert(
            channel.to_string(),
            ChannelState {
                current: path.to_path_buf(),
                looping: looped,
                playing: true,
                paused: false,
            },
        );
    }

    fn stop(&mut self, channel: &str) {
        self.calls.push(Call::Stop(channel.to_string()));
        if let Some(ch) = self.channels.get_mut(channel) {
            ch.playing = false;
            ch.paused = false;
        }
    }

    fn stop_all(&mut self) {
        self.calls.push(Call::StopAll);
        for ch in self.channels.values_mut() {
            ch.playing = false;
            ch.paused = false;
        }
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
        for ch in self.channels.values_mut() {
            if ch.playing {
                ch.paused = true;
            }
        }
    }

    fn resume(&mut self) {
        self.calls.push(Call::Resume);
        for ch in self.channels.values_mut() {
            ch.paused = false;
        }
    }

    fn set_volume(&mut self, volume: f64) {
        // Stored in permille so the call log stays comparable.
        self.calls
            .push(Call::SetVolume((volume.clamp(0.0, 1.0) * 1000.0) as u32));
    }

    fn is_channel_playing(&self, channel: &str) -> bool {
        self.channels.get(channel).is_some_and(|ch| ch.playing)
    }

    fn is_playing(&self) -> bool {
        self.channels.values().any(|ch| ch.playing)
    }

    fn is_paused(&self) -> bool {
        self.channels.values().any(|ch| ch.paused)
    }

    fn current_file(&self) -> Option<PathBuf> {
        self.channels
            .values()
            .find(|ch| ch.playing)
            .map(|ch| ch.current.clone())
    }

    fn take_finished(&mut self) -> usize {
        std::mem::take(&mut self.finished_pending)
    }
}
