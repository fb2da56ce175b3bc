//! Audio cue resolution and playback.

pub mod key;
pub mod output;
pub mod player;
pub mod profile;
pub mod repository;

pub use key::AudioKey;
pub use output::{PlayerError, RodioPlayer};
pub use player::{AudioPlayer, STATION_CHANNEL, VEHICLE_CHANNEL};
pub use profile::{ProfileError, ValidationReport};
pub use repository::{AudioError, AudioRepository};
