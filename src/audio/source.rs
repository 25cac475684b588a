//! Decoded Audio Source
//!
//! The immutable multi-channel sample buffer every other stage reads
//! from. Created once per decode, destroyed on reset or new upload;
//! nothing in the crate mutates it after construction.

use crate::error::{Result, ShabdaError};

/// Decoded per-channel sample data with rate and duration.
///
/// Channels are stored non-interleaved: one `Vec<f32>` per channel, all
/// the same length.
#[derive(Debug, Clone)]
pub struct AudioSource {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl AudioSource {
    /// Build a source from de-interleaved channel data.
    ///
    /// Fails if there are no channels, the sample rate is zero, or the
    /// channels differ in length.
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        if channels.is_empty() {
            return Err(ShabdaError::UnsupportedFile {
                reason: "audio has no channels".to_string(),
            });
        }
        if sample_rate == 0 {
            return Err(ShabdaError::UnsupportedFile {
                reason: "sample rate is zero".to_string(),
            });
        }
        let frames = channels[0].len();
        if channels.iter().any(|ch| ch.len() != frames) {
            return Err(ShabdaError::UnsupportedFile {
                reason: "channels differ in length".to_string(),
            });
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Sample rate in Hz.
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Frames per channel.
    #[inline]
    pub fn num_frames(&self) -> usize {
        self.channels[0].len()
    }

    /// Duration in seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.num_frames() as f64 / self.sample_rate as f64
    }

    /// Read access to one channel's samples.
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds.
    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// All channels, non-interleaved.
    #[inline]
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }
}
