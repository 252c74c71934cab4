//! Glue together `mural-core` audio buffers and `kira` to play music playlists and sound effects.

#![allow(clippy::uninlined_format_args)]

mod effects;
mod manager;
mod player;

pub use effects::{EffectSink, EffectsPlayer};
pub use manager::{KiraDevice, NullDevice, OutputDevice, Speaker, Streamer, MUTE_DECIBELS};
pub use player::{MusicPlayer, PlayerState};

use mural_core::types::Volume;

/// Gain handed to the mixer for a volume and mute flag.
pub fn gain_decibels(volume: Volume, mute: bool) -> f32 {
    if mute {
        MUTE_DECIBELS
    } else {
        volume.to_decibels().max(MUTE_DECIBELS)
    }
}
