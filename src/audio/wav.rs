//! 16-bit PCM WAV Encoding
//!
//! Serializes a merged float buffer to WAV bytes with the canonical
//! 44-byte header. The byte layout is the compatibility contract with
//! standard WAV readers, so this module writes every field itself
//! instead of going through a writer abstraction: RIFF at offset 0,
//! WAVE at 8, "fmt " at 12 (PCM, 16-bit), "data" at 36, frames
//! interleaved across channels, little-endian throughout.
//!
//! Quantization scales positive samples by 32767 and negative samples
//! by 32768 and truncates. The asymmetry is historical but bit-exact
//! output compatibility requires keeping it.

/// Size of the canonical PCM WAV header in bytes.
pub const WAV_HEADER_LEN: usize = 44;

const BITS_PER_SAMPLE: u16 = 16;
const PCM_FORMAT: u16 = 1;

/// Quantize one float sample to signed 16-bit PCM.
///
/// Clamps to [-1, 1] first; positive values scale by 32767, negative by
/// 32768, truncated toward zero.
#[inline]
pub fn quantize_sample(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 32768.0) as i16
    } else {
        (clamped * 32767.0) as i16
    }
}

/// Encode non-interleaved channel data as a complete WAV file.
///
/// All channels must be the same length; the shortest channel bounds
/// the frame count if they differ.
pub fn encode_wav(channels: &[Vec<f32>], sample_rate: u32) -> Vec<u8> {
    let num_channels = channels.len() as u16;
    let frames = channels.iter().map(|ch| ch.len()).min().unwrap_or(0);

    let block_align = num_channels * (BITS_PER_SAMPLE / 8);
    let byte_rate = sample_rate * block_align as u32;
    let data_len = (frames * block_align as usize) as u32;

    let mut bytes = Vec::with_capacity(WAV_HEADER_LEN + data_len as usize);

    // RIFF chunk descriptor
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    // "fmt " sub-chunk
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&PCM_FORMAT.to_le_bytes());
    bytes.extend_from_slice(&num_channels.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // "data" sub-chunk, frames interleaved across channels
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());

    for frame in 0..frames {
        for channel in channels {
            bytes.extend_from_slice(&quantize_sample(channel[frame]).to_le_bytes());
        }
    }

    bytes
}

// ============================================================================
// Tests
// ============================================================================
