use std::sync::Arc;

use mural_core::format::audio::AudioBuffer;
use mural_core::types::Volume;

use crate::gain_decibels;
use crate::manager::{Speaker, Streamer};

/// Something that plays one-shot sound effects.
pub trait EffectSink {
    fn play_effect(&mut self, buffer: &Arc<AudioBuffer>);
}

/// Mixes any number of one-shot effects, with a volume and mute of its own.
pub struct EffectsPlayer {
    speaker: Arc<Speaker>,
    volume: Volume,
    mute: bool,
    streams: Vec<Box<dyn Streamer>>,
}

impl EffectsPlayer {
    pub fn new(speaker: Arc<Speaker>) -> Self {
        Self {
            speaker,
            volume: Volume::default(),
            mute: false,
            streams: Vec::new(),
        }
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.mute
    }

    pub fn set_volume(&mut self, volume: Volume) {
        self.volume = volume;
        self.apply_gain();
    }

    pub fn set_mute(&mut self, mute: bool) {
        self.mute = mute;
        self.apply_gain();
    }

    fn apply_gain(&mut self) {
        let gain = gain_decibels(self.volume, self.mute);
        let _device = self.speaker.lock();
        for stream in &mut self.streams {
            stream.set_gain(gain);
        }
    }

    /// Number of effects still playing.
    pub fn playing(&self) -> usize {
        self.streams.iter().filter(|s| !s.is_finished()).count()
    }

    pub fn stop_all(&mut self) {
        let _device = self.speaker.lock();
        for mut stream in self.streams.drain(..) {
            stream.stop();
        }
    }
}

impl EffectSink for EffectsPlayer {
    fn play_effect(&mut self, buffer: &Arc<AudioBuffer>) {
        if self.mute {
            return;
        }

        let gain = gain_decibels(self.volume, self.mute);
        let mut device = self.speaker.lock();
        self.streams.retain(|s| !s.is_finished());
        match device.attach(buffer, gain) {
            Ok(stream) => self.streams.push(stream),
            Err(e) => log::error!("unable to play effect: {:#}", e),
        }
    }
}

impl Drop for EffectsPlayer {
    fn drop(&mut self) {
        self.stop_all();
    }
}
