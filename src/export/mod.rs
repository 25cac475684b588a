//! Export Module
//!
//! Per-actor export bundles (merged WAV + metadata JSON + SRT) and the
//! file naming shared by every export path.
//!
//! Exports read the actor's segment list once at call time; a delete
//! racing an in-flight export is an accepted hazard of the
//! single-threaded host model and is not guarded here.

pub mod metadata;
pub mod subtitle;

use chrono::{DateTime, Utc};

use crate::audio::merge::merge_segments;
use crate::audio::source::AudioSource;
use crate::audio::wav::encode_wav;
use crate::error::{Result, ShabdaError};
use crate::timeline::model::TimelineModel;

pub use metadata::{ActorMetadata, SegmentMetadata};
pub use subtitle::{format_srt_timestamp, generate_srt};

/// A complete export bundle for one actor.
#[derive(Debug, Clone)]
pub struct ActorExport {
    /// Merged audio encoded as a 16-bit PCM WAV file
    pub wav_bytes: Vec<u8>,
    /// Pretty-printed metadata JSON
    pub metadata_json: String,
    /// SRT subtitle text (may be empty if no segment carries text)
    pub srt: String,
    /// WAV filename, `{dialect}_{sanitizedActorName}.wav`
    pub wav_filename: String,
    /// Metadata filename, `..._metadata.json`
    pub metadata_filename: String,
    /// Subtitle filename, `..._subtitles.srt`
    pub subtitle_filename: String,
}

/// Replace every non-alphanumeric character with an underscore so the
/// actor name is safe in filenames.
pub fn sanitize_actor_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Base stem for an actor's export files: `{dialect}_{sanitizedName}`.
fn export_stem(dialect: &str, actor_name: &str) -> String {
    format!("{}_{}", dialect, sanitize_actor_name(actor_name))
}

/// Filename for a timestamped project snapshot download.
pub fn snapshot_filename(at: DateTime<Utc>) -> String {
    format!("bangla_audio_project_{}.json", at.format("%Y%m%d_%H%M%S"))
}

/// Build the full export bundle for one actor: merge its segments,
/// encode the WAV, and render metadata and subtitles from the same
/// sorted segment list.
pub fn export_actor(
    model: &TimelineModel,
    source: &AudioSource,
    actor_id: u64,
    dialect: &str,
) -> Result<ActorExport> {
    let actor = model
        .actor(actor_id)
        .ok_or(ShabdaError::UnknownActor { id: actor_id })?;

    let segments = model.actor_segments_sorted(actor_id);
    let merged = merge_segments(source, &segments).ok_or_else(|| ShabdaError::EmptyMerge {
        actor: actor.name.clone(),
    })?;

    let metadata = ActorMetadata::new(
        actor,
        dialect,
        source.sample_rate(),
        merged.duration(),
        &segments,
    );

    let stem = export_stem(dialect, &actor.name);
    log::info!(
        "Exporting actor '{}': {} segments, {:.3}s merged",
        actor.name,
        segments.len(),
        merged.duration()
    );

    Ok(ActorExport {
        wav_bytes: encode_wav(&merged.channels, merged.sample_rate),
        metadata_json: metadata.to_json()?,
        srt: generate_srt(&segments, dialect),
        wav_filename: format!("{stem}.wav"),
        metadata_filename: format!("{stem}_metadata.json"),
        subtitle_filename: format!("{stem}_subtitles.srt"),
    })
}

// ============================================================================
// Tests
// ============================================================================
