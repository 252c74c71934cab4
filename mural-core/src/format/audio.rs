//! Decoding of OGG/WAV/MP3 entries into interleaved `f32` PCM.

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};

use crate::error::{MuralError, Result};
use crate::format::archive::{extension, is_audio};
use crate::format::Asset;

/// Decoded PCM, interleaved by channel.
///
/// Samples can only be appended while the decoder fills the buffer; once handed out the
/// buffer is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    channels: u16,
    samples: Vec<f32>,
}

impl AudioBuffer {
    fn with_format(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
            samples: Vec::new(),
        }
    }

    fn append(&mut self, samples: &[f32]) {
        self.samples.extend_from_slice(samples);
    }

    /// Builds a buffer from already decoded samples.
    pub fn from_samples(sample_rate: u32, channels: u16, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            channels,
            samples,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn frame_count(&self) -> usize {
        match self.channels {
            0 => 0,
            n => self.samples.len() / n as usize,
        }
    }

    pub fn duration(&self) -> std::time::Duration {
        if self.sample_rate == 0 {
            return std::time::Duration::ZERO;
        }
        std::time::Duration::from_secs_f64(self.frame_count() as f64 / self.sample_rate as f64)
    }

    /// Iterates over `(left, right)` frames; mono is duplicated, extra channels are dropped.
    pub fn stereo_frames(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        let channels = self.channels.max(1) as usize;
        self.samples.chunks_exact(channels).map(|frame| match frame {
            [mono] => (*mono, *mono),
            [left, right, ..] => (*left, *right),
            [] => (0.0, 0.0),
        })
    }
}

impl Asset for AudioBuffer {
    fn load_from_bytes(name: &str, data: Vec<u8>) -> Result<Self> {
        if !is_audio(name) {
            return Err(MuralError::UnsupportedFormat(name.to_string()));
        }

        let mut hint = Hint::new();
        if let Some(ext) = extension(name) {
            hint.with_extension(&ext);
        }

        let mss = MediaSourceStream::new(Box::new(Cursor::new(data)), Default::default());
        let probed = get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(|e| MuralError::decode(name, e))?;
        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| MuralError::decode(name, "no audio track"))?;
        let track_id = track.id;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| MuralError::decode(name, "missing sample rate"))?;
        let channels = track
            .codec_params
            .channels
            .map(|c| c.count() as u16)
            .ok_or_else(|| MuralError::decode(name, "missing channel layout"))?;

        let mut decoder = get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| MuralError::decode(name, e))?;

        let mut buffer = AudioBuffer::with_format(sample_rate, channels);
        let mut sample_buf: Option<SampleBuffer<f32>> = None;

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(_)) => break, // EOF
                Err(SymphoniaError::ResetRequired) => {
                    decoder.reset();
                    continue;
                }
                Err(e) => return Err(MuralError::decode(name, e)),
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    let sample_buf = sample_buf.get_or_insert_with(|| {
                        SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec())
                    });
                    if sample_buf.capacity() < decoded.capacity() * decoded.spec().channels.count() {
                        *sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
                    }
                    sample_buf.copy_interleaved_ref(decoded);
                    buffer.append(sample_buf.samples());
                }
                Err(SymphoniaError::IoError(_)) => break,
                Err(SymphoniaError::DecodeError(e)) => {
                    log::warn!("{}: skipping damaged packet: {}", name, e);
                    continue;
                }
                Err(SymphoniaError::ResetRequired) => {
                    decoder.reset();
                    continue;
                }
                Err(e) => return Err(MuralError::decode(name, e)),
            }
        }

        log::debug!(
            "decoded {}: {} Hz, {} channel(s), {:.2}s",
            name,
            buffer.sample_rate,
            buffer.channels,
            buffer.duration().as_secs_f32()
        );

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::wav_bytes;

    #[test]
    fn decode_wav() {
        let buffer = AudioBuffer::load_from_bytes("click.wav", wav_bytes(22050, 2205)).unwrap();
        assert_eq!(buffer.sample_rate(), 22050);
        assert_eq!(buffer.channels(), 1);
        assert_eq!(buffer.frame_count(), 2205);
        assert!(buffer.samples().iter().any(|s| s.abs() > 0.1));
    }

    #[test]
    fn reject_unknown_extension() {
        let err = AudioBuffer::load_from_bytes("click.flac", wav_bytes(22050, 10)).unwrap_err();
        assert!(matches!(err, MuralError::UnsupportedFormat(_)));
    }

    #[test]
    fn garbage_fails_to_decode() {
        let err = AudioBuffer::load_from_bytes("theme.ogg", vec![1, 2, 3, 4]).unwrap_err();
        assert!(matches!(err, MuralError::Decode { .. }));
    }

    #[test]
    fn mono_is_duplicated_to_stereo() {
        let buffer = AudioBuffer::from_samples(8000, 1, vec![0.25, -0.5]);
        let frames: Vec<_> = buffer.stereo_frames().collect();
        assert_eq!(frames, vec![(0.25, 0.25), (-0.5, -0.5)]);
    }
}
