//! Audio Decoding
//!
//! The decoding collaborator: reads a WAV file and hands the rest of
//! the system de-interleaved f32 channel data as an [`AudioSource`].
//! Integer depths of 8/16/24/32 bits and 32-bit float are accepted;
//! nothing is resampled.
//!
//! Decode failures are the one error class that resets the whole
//! session (see [`crate::error::ShabdaError::resets_state`]); the
//! caller owns that reset.

use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::audio::source::AudioSource;
use crate::error::{Result, ShabdaError};

/// Decode a WAV file into an [`AudioSource`].
pub fn decode_wav_file(path: &Path) -> Result<AudioSource> {
    if !path.exists() {
        return Err(ShabdaError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let reader = WavReader::open(path).map_err(|e| ShabdaError::DecodeFailed {
        reason: format!("failed to open WAV file: {}", e),
        source: Some(Box::new(e)),
    })?;

    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(ShabdaError::UnsupportedFile {
            reason: "WAV file declares zero channels".to_string(),
        });
    }

    let interleaved = read_samples_as_f32(reader, spec.bits_per_sample, spec.sample_format)?;
    let channel_data = deinterleave(&interleaved, channels);

    log::info!(
        "Decoded {}: {} ch, {} Hz, {} frames",
        path.display(),
        channels,
        spec.sample_rate,
        channel_data[0].len()
    );

    AudioSource::from_channels(channel_data, spec.sample_rate)
}

/// Read all samples from the reader, normalized to f32 in [-1, 1).
fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f32>> {
    let decode_err = |e: hound::Error| ShabdaError::DecodeFailed {
        reason: format!("failed to read samples: {}", e),
        source: Some(Box::new(e)),
    };

    match sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(decode_err),
        SampleFormat::Int => match bits_per_sample {
            8 => reader
                .samples::<i8>()
                .map(|s| s.map(|v| v as f32 / 128.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(decode_err),
            16 => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / 32768.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(decode_err),
            // 24-bit is stored as i32 in hound
            24 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 8388608.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(decode_err),
            32 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 2147483648.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(decode_err),
            other => Err(ShabdaError::UnsupportedFile {
                reason: format!("{}-bit integer audio", other),
            }),
        },
    }
}

/// De-interleave samples from [L,R,L,R,...] to [[L,L,...], [R,R,...]].
fn deinterleave(samples: &[f32], channels: usize) -> Vec<Vec<f32>> {
    let frames = samples.len() / channels;
    let mut result = vec![Vec::with_capacity(frames); channels];

    for (i, sample) in samples.iter().enumerate() {
        result[i % channels].push(*sample);
    }

    result
}

// ============================================================================
// Tests
// ============================================================================
