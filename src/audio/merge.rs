//! Per-Actor Audio Merging
//!
//! Splices an actor's segments into one contiguous multi-channel
//! buffer, sample-accurately and independently per channel. No
//! resampling and no crossfades at the seams: audible boundary clicks
//! are an accepted limitation of straight concatenation.
//!
//! The merge always builds a fresh output buffer and never mutates the
//! source, so a failure cannot leave partial corruption behind.

use crate::audio::source::AudioSource;
use crate::timeline::model::Segment;

/// A merged, contiguous multi-channel buffer ready for encoding.
#[derive(Debug, Clone)]
pub struct MergedAudio {
    /// Non-interleaved channel data, all the same length
    pub channels: Vec<Vec<f32>>,
    /// Sample rate inherited from the source
    pub sample_rate: u32,
}

impl MergedAudio {
    /// Frames per channel.
    pub fn num_frames(&self) -> usize {
        self.channels.first().map(|ch| ch.len()).unwrap_or(0)
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_frames() as f64 / self.sample_rate as f64
    }
}

/// Frame count a segment contributes to the merged output.
#[inline]
pub fn segment_frames(segment: &Segment, sample_rate: u32) -> usize {
    let frames = (segment.end - segment.start) * sample_rate as f64;
    if frames <= 0.0 {
        0
    } else {
        frames.floor() as usize
    }
}

/// Concatenate the given segments' audio into one contiguous buffer.
///
/// `segments` must already be ordered by ascending start (the ordering
/// [`crate::timeline::TimelineModel::actor_segments_sorted`] provides).
/// The output length is the sum of `floor((end - start) * rate)` over
/// all segments; each segment's frames are copied from
/// `floor(start * rate)` per channel. Reads past the source end are
/// truncated and the shortfall stays silent.
///
/// Returns `None` when there are no segments or the computed length is
/// zero.
pub fn merge_segments(source: &AudioSource, segments: &[Segment]) -> Option<MergedAudio> {
    if segments.is_empty() {
        return None;
    }

    let rate = source.sample_rate();
    let total_frames: usize = segments.iter().map(|s| segment_frames(s, rate)).sum();
    if total_frames == 0 {
        log::warn!("Merge produced zero frames from {} segments", segments.len());
        return None;
    }

    let num_channels = source.num_channels();
    let source_frames = source.num_frames();
    let mut channels = vec![vec![0.0_f32; total_frames]; num_channels];

    for ch in 0..num_channels {
        let src = source.channel(ch);
        let out = &mut channels[ch];
        let mut write_pos = 0;

        for segment in segments {
            let frames = segment_frames(segment, rate);
            if frames == 0 {
                continue;
            }
            let src_start = (segment.start * rate as f64).floor() as usize;
            let available = source_frames.saturating_sub(src_start).min(frames);
            if available > 0 {
                out[write_pos..write_pos + available]
                    .copy_from_slice(&src[src_start..src_start + available]);
            }
            write_pos += frames;
        }
    }

    log::debug!(
        "Merged {} segments into {} frames ({} ch @ {} Hz)",
        segments.len(),
        total_frames,
        num_channels,
        rate
    );

    Some(MergedAudio {
        channels,
        sample_rate: rate,
    })
}

// ============================================================================
// Tests
// ============================================================================
