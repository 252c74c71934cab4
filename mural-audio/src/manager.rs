use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use anyhow::{anyhow, Result};
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings};
use kira::sound::PlaybackState;
use kira::{AudioManager, AudioManagerSettings, Decibels, DefaultBackend, Frame, Tween};
use mural_core::format::audio::AudioBuffer;

/// Gain at which the mixer is silent.
pub const MUTE_DECIBELS: f32 = -60.0;

/// A buffer attached to the output.
pub trait Streamer: Send {
    fn set_gain(&mut self, decibels: f32);
    /// Detaches the stream from the output. Stopping twice is a no-op.
    fn stop(&mut self);
    fn is_finished(&self) -> bool;
}

/// The audio output. Streams attached to it are mixed on the device's own thread.
pub trait OutputDevice: Send {
    fn attach(&mut self, buffer: &Arc<AudioBuffer>, decibels: f32) -> Result<Box<dyn Streamer>>;
}

/// Owns the output device; its lock is the mixer lock.
pub struct Speaker {
    device: Mutex<Box<dyn OutputDevice>>,
}

impl Speaker {
    pub fn new(device: impl OutputDevice + 'static) -> Self {
        Self {
            device: Mutex::new(Box::new(device)),
        }
    }

    /// The system output, or a silent device when there is none.
    pub fn with_default_device() -> Self {
        match KiraDevice::new() {
            Ok(device) => Self::new(device),
            Err(e) => {
                log::warn!("no audio output available, audio is silent: {:#}", e);
                Self::new(NullDevice)
            }
        }
    }

    /// Acquires the mixer lock. Released when the guard drops.
    pub fn lock(&self) -> MutexGuard<'_, Box<dyn OutputDevice>> {
        self.device.lock().unwrap_or_else(|poisoned| {
            log::warn!("mixer lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

pub struct KiraDevice {
    manager: AudioManager<DefaultBackend>,
}

impl KiraDevice {
    pub fn new() -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| anyhow!("failed to create kira audio manager: {:?}", e))?;
        Ok(Self { manager })
    }

    fn sound_data(buffer: &AudioBuffer, decibels: f32) -> StaticSoundData {
        let frames: Arc<[Frame]> = buffer
            .stereo_frames()
            .map(|(left, right)| Frame::new(left, right))
            .collect();
        StaticSoundData {
            sample_rate: buffer.sample_rate(),
            frames,
            settings: StaticSoundSettings::new().volume(Decibels(decibels)),
            slice: None,
        }
    }
}

impl OutputDevice for KiraDevice {
    fn attach(&mut self, buffer: &Arc<AudioBuffer>, decibels: f32) -> Result<Box<dyn Streamer>> {
        let handle = self
            .manager
            .play(Self::sound_data(buffer, decibels))
            .map_err(|e| anyhow!("failed to start playing audio: {:?}", e))?;
        Ok(Box::new(KiraStreamer { handle }))
    }
}

struct KiraStreamer {
    handle: StaticSoundHandle,
}

impl Streamer for KiraStreamer {
    fn set_gain(&mut self, decibels: f32) {
        self.handle.set_volume(Decibels(decibels), Tween::default());
    }

    fn stop(&mut self) {
        self.handle.stop(Tween::default());
    }

    fn is_finished(&self) -> bool {
        self.handle.state() == PlaybackState::Stopped
    }
}

/// An output that plays nothing. Streams finish after the buffer's duration.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDevice;

impl OutputDevice for NullDevice {
    fn attach(&mut self, buffer: &Arc<AudioBuffer>, _decibels: f32) -> Result<Box<dyn Streamer>> {
        Ok(Box::new(NullStreamer {
            ends_at: Instant::now() + buffer.duration(),
            stopped: false,
        }))
    }
}

struct NullStreamer {
    ends_at: Instant,
    stopped: bool,
}

impl Streamer for NullStreamer {
    fn set_gain(&mut self, _decibels: f32) {}

    fn stop(&mut self) {
        self.stopped = true;
    }

    fn is_finished(&self) -> bool {
        self.stopped || Instant::now() >= self.ends_at
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{buffer, RecordingDevice};
    use super::*;

    #[test]
    fn null_streams_finish_after_duration() {
        let mut device = NullDevice;
        let mut stream = device.attach(&buffer(0), 0.0).unwrap();
        assert!(stream.is_finished());

        let mut long = device.attach(&buffer(8000 * 60), 0.0).unwrap();
        assert!(!long.is_finished());
        long.stop();
        assert!(long.is_finished());
        stream.stop();
    }

    #[test]
    fn lock_survives_poisoning() {
        let speaker = Arc::new(Speaker::new(RecordingDevice::default()));
        let poisoner = speaker.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock();
            panic!("poison the mixer lock");
        })
        .join();

        assert!(speaker.lock().attach(&buffer(1), 0.0).is_ok());
    }
}
