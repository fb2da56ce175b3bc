//! rodio-backed playback
//!
//! One `Sink` per channel, created lazily on first play. Natural completion
//! is detected by polling for drained one-shot sinks in `take_finished`.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use thiserror::Error;
use tracing::{error, info};

use super::player::AudioPlayer;

/// Audio output could not be initialised. Fatal at startup.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("failed to open audio output device")]
    Stream(#[from] rodio::StreamError),
}

struct Channel {
    sink: Sink,
    current: PathBuf,
    looping: bool,
    playing: bool,
    paused: bool,
}

impl Channel {
    fn is_playing(&self) -> bool {
        // A drained one-shot sink is finished even before the next poll.
        self.playing && (self.looping || !self.sink.empty())
    }
}

/// System audio player.
pub struct RodioPlayer {
    // Keeps the output device alive; dropped last.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    channels: HashMap<String, Channel>,
    volume: f64,
}

impl RodioPlayer {
    pub fn new() -> Result<Self, PlayerError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            channels: HashMap::new(),
            volume: 0.8,
        })
    }

    fn fresh_sink(&self) -> Option<Sink> {
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.set_volume(self.volume as f32);
                Some(sink)
            }
            Err(e) => {
                error!(error = %e, "Failed to create playback sink");
                None
            }
        }
    }
}

impl AudioPlayer for RodioPlayer {
    fn play(&mut self, channel: &str, path: &Path, looped: bool) {
        if !path.exists() {
            error!(path = %path.display(), "Audio file not found");
            return;
        }

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to open audio file");
                return;
            }
        };

        let source = match Decoder::new(BufReader::new(file)) {
            Ok(source) => source,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to decode audio file");
                return;
            }
        };

        // Replace the sink wholesale so no queued audio from the previous cue
        // can leak into the new one.
        if let Some(old) = self.channels.remove(channel) {
            old.sink.stop();
        }

        let Some(sink) = self.fresh_sink() else {
            return;
        };

        if looped {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }

        self.channels.insert(
            channel.to_string(),
            Channel {
                sink,
                current: path.to_path_buf(),
                looping: looped,
                playing: true,
                paused: false,
            },
        );

        info!(
            channel,
            file = %path.display(),
            looped,
            "Playing"
        );
    }

    fn stop(&mut self, channel: &str) {
        if let Some(ch) = self.channels.get_mut(channel) {
            ch.sink.stop();
            ch.playing = false;
            ch.paused = false;
            info!(channel, "Stopped channel");
        }
    }

    fn stop_all(&mut self) {
        for ch in self.channels.values_mut() {
            ch.sink.stop();
            ch.playing = false;
            ch.paused = false;
        }
        info!("Stopped all channels");
    }

    fn pause(&mut self) {
        for ch in self.channels.values_mut() {
            if ch.is_playing() && !ch.paused {
                ch.sink.pause();
                ch.paused = true;
            }
        }
        info!("Paused all channels");
    }

    fn resume(&mut self) {
        for ch in self.channels.values_mut() {
            if ch.paused {
                ch.sink.play();
                ch.paused = false;
            }
        }
        info!("Resumed all channels");
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
        for ch in self.channels.values() {
            ch.sink.set_volume(self.volume as f32);
        }
        info!(volume = self.volume, "Volume set");
    }

    fn is_channel_playing(&self, channel: &str) -> bool {
        self.channels
            .get(channel)
            .is_some_and(Channel::is_playing)
    }

    fn is_playing(&self) -> bool {
        self.channels.values().any(Channel::is_playing)
    }

    fn is_paused(&self) -> bool {
        self.channels.values().any(|ch| ch.paused)
    }

    fn current_file(&self) -> Option<PathBuf> {
        self.channels
            .values()
            .find(|ch| ch.is_playing())
            .map(|ch| ch.current.clone())
    }

    fn take_finished(&mut self) -> usize {
        let mut finished = 0;
        for (id, ch) in &mut self.channels {
            if ch.playing && !ch.looping && ch.sink.empty() {
                ch.playing = false;
                ch.paused = false;
                finished += 1;
                info!(channel = %id, "Playback finished");
            }
        }
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These run against the real output device; environments without one get
    // a graceful skip.
    fn player() -> Option<RodioPlayer> {
        match RodioPlayer::new() {
            Ok(player) => Some(player),
            Err(_) => {
                eprintln!("No audio output device, skipping test");
                None
            }
        }
    }

    #[test]
    fn test_stop_is_idempotent_on_idle_channels() {
        let Some(mut player) = player() else { return };

        player.stop("vehicle");
        player.stop("vehicle");
        player.stop_all();
        player.stop_all();

        assert!(!player.is_playing());
        assert!(!player.is_channel_playing("vehicle"));
    }

    #[test]
    fn test_play_with_missing_file_does_not_panic() {
        let Some(mut player) = player() else { return };

        player.play("vehicle", Path::new("missing.wav"), false);
        assert!(!player.is_channel_playing("vehicle"));
        assert_eq!(player.take_finished(), 0);
    }

    #[test]
    fn test_volume_is_clamped() {
        let Some(mut player) = player() else { return };

        player.set_volume(2.5);
        assert!((player.volume - 1.0).abs() < f64::EPSILON);
        player.set_volume(-1.0);
        assert!(player.volume.abs() < f64::EPSILON);
    }
}
