//! Per-Actor Metadata Export
//!
//! The JSON sidecar written next to each merged WAV: actor identity,
//! dialect, source sample rate, merged duration, and the segment list
//! sorted by start with original-timeline bounds and per-segment text.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::timeline::model::{Actor, Segment};

/// Metadata sidecar for one exported actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorMetadata {
    pub actor_id: u64,
    pub actor_name: String,
    pub dialect: String,
    pub original_file_sample_rate: u32,
    pub merged_audio_duration: f64,
    pub segments: Vec<SegmentMetadata>,
}

/// One segment entry in the metadata sidecar. Bounds are on the
/// original recording's timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentMetadata {
    pub id: u64,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub regional_text: String,
    pub standard_text: String,
}

impl ActorMetadata {
    /// Build metadata for an actor from segments already sorted by
    /// ascending start.
    pub fn new(
        actor: &Actor,
        dialect: &str,
        sample_rate: u32,
        merged_duration: f64,
        segments: &[Segment],
    ) -> Self {
        Self {
            actor_id: actor.id,
            actor_name: actor.name.clone(),
            dialect: dialect.to_string(),
            original_file_sample_rate: sample_rate,
            merged_audio_duration: merged_duration,
            segments: segments
                .iter()
                .map(|s| SegmentMetadata {
                    id: s.id,
                    start: s.start,
                    end: s.end,
                    duration: s.duration(),
                    regional_text: s.regional_text.clone(),
                    standard_text: s.standard_text.clone(),
                })
                .collect(),
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
