use std::sync::Arc;

use anyhow::{bail, Result};
use mural_core::format::audio::AudioBuffer;
use mural_core::types::Volume;

use crate::manager::{Speaker, Streamer};
use crate::gain_decibels;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Playing,
    Stopped,
}

/// Plays a playlist of music buffers one at a time.
///
/// At most one stream of this player is attached to the speaker at any time.
pub struct MusicPlayer {
    speaker: Arc<Speaker>,
    playlist: Vec<Arc<AudioBuffer>>,
    index: usize,
    volume: Volume,
    mute: bool,
    stream: Option<Box<dyn Streamer>>,
    state: PlayerState,
}

impl MusicPlayer {
    pub fn new(speaker: Arc<Speaker>) -> Self {
        Self {
            speaker,
            playlist: Vec::new(),
            index: 0,
            volume: Volume::default(),
            mute: false,
            stream: None,
            state: PlayerState::Idle,
        }
    }

    pub fn add(&mut self, buffer: Arc<AudioBuffer>) {
        self.playlist.push(buffer);
    }

    /// Replaces the playlist. The current stream keeps playing.
    pub fn set_playlist(&mut self, playlist: Vec<Arc<AudioBuffer>>) {
        self.playlist = playlist;
        if self.index >= self.playlist.len() {
            self.index = 0;
        }
    }

    pub fn play(&mut self) -> Result<()> {
        let Some(buffer) = self.playlist.get(self.index).cloned() else {
            bail!("no track at playlist index {} ({} tracks)", self.index, self.playlist.len());
        };

        let gain = self.gain();
        let mut device = self.speaker.lock();
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
        self.stream = Some(device.attach(&buffer, gain)?);
        self.state = PlayerState::Playing;

        log::debug!("playing track {} of {}", self.index, self.playlist.len());
        Ok(())
    }

    pub fn stop(&mut self) {
        match self.stream.take() {
            Some(mut stream) => {
                let _device = self.speaker.lock();
                stream.stop();
                self.state = PlayerState::Stopped;
            }
            None => log::warn!("Tried to stop music that was not playing"),
        }
    }

    pub fn next(&mut self) -> Result<()> {
        self.stop_if_attached();
        self.set_index(self.index as isize + 1);
        self.play()
    }

    pub fn prev(&mut self) -> Result<()> {
        self.stop_if_attached();
        self.set_index(self.index as isize - 1);
        self.play()
    }

    fn stop_if_attached(&mut self) {
        if self.stream.is_some() {
            self.stop();
        }
    }

    /// Moves to track `index`, wrapping out of range values to the other end of the playlist.
    pub fn set_index(&mut self, index: isize) {
        let last = self.playlist.len() as isize - 1;
        self.index = if index > last {
            0
        } else if index < 0 {
            last.max(0) as usize
        } else {
            index as usize
        };
    }

    pub fn reset(&mut self) {
        self.stop_if_attached();
        self.index = 0;
    }

    pub fn set_volume(&mut self, volume: Volume) {
        self.volume = volume;
        self.apply_gain();
    }

    pub fn set_mute(&mut self, mute: bool) {
        self.mute = mute;
        self.apply_gain();
    }

    fn gain(&self) -> f32 {
        gain_decibels(self.volume, self.mute)
    }

    fn apply_gain(&mut self) {
        let gain = self.gain();
        if let Some(stream) = self.stream.as_mut() {
            let _device = self.speaker.lock();
            stream.set_gain(gain);
        }
    }

    /// Advances to the next track once the current one has finished.
    pub fn update(&mut self) {
        if self.state != PlayerState::Playing {
            return;
        }
        let finished = self.stream.as_ref().map_or(true, |s| s.is_finished());
        if finished {
            if let Err(e) = self.next() {
                log::error!("unable to advance playlist: {:#}", e);
                self.state = PlayerState::Stopped;
            }
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.playlist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.mute
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }
}

impl Drop for MusicPlayer {
    fn drop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            let _device = self.speaker.lock();
            stream.stop();
        }
    }
}
