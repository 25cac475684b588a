//! Project Snapshots
//!
//! Serializes the full session state (actors, segments, counters,
//! dialect, color index) to a JSON snapshot and restores it later. The
//! snapshot is decoupled from the audio itself: audio bytes are never
//! embedded, and on load the snapshot is re-attached to an
//! independently decoded source, matched only by a duration tolerance.
//!
//! Version checking is exact equality with no migration: any other
//! version is rejected as an input error and the in-memory state stays
//! untouched.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShabdaError};
use crate::timeline::model::{Actor, Segment, TimelineModel};

/// Current snapshot schema version. Loads require exact equality.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Maximum tolerated difference between the snapshot's recorded audio
/// duration and the live source before a warning is issued.
pub const DURATION_TOLERANCE_SECS: f64 = 0.1;

/// Monotonic id counters carried through save/load so ids are never
/// reused across sessions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counters {
    pub next_actor_id: u64,
    pub next_segment_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorSnapshot {
    pub id: u64,
    pub name: String,
    pub color: String,
    pub segment_ids: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSnapshot {
    pub id: u64,
    pub actor_id: u64,
    pub start: f64,
    pub end: f64,
    pub regional_text: String,
    pub standard_text: String,
}

/// Full serialized session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub version: u32,
    pub dialect: String,
    pub audio_file_name: String,
    pub audio_duration: f64,
    pub actors: Vec<ActorSnapshot>,
    pub segments: Vec<SegmentSnapshot>,
    pub counters: Counters,
    pub color_index: usize,
}

impl ProjectSnapshot {
    /// Capture the current session state.
    pub fn capture(
        model: &TimelineModel,
        dialect: &str,
        audio_file_name: &str,
        audio_duration: f64,
    ) -> Self {
        let (next_actor_id, next_segment_id) = model.counters();
        Self {
            version: SNAPSHOT_VERSION,
            dialect: dialect.to_string(),
            audio_file_name: audio_file_name.to_string(),
            audio_duration,
            actors: model
                .actors()
                .map(|a| ActorSnapshot {
                    id: a.id,
                    name: a.name.clone(),
                    color: a.color.clone(),
                    segment_ids: a.segment_ids.clone(),
                })
                .collect(),
            segments: model
                .segments()
                .map(|s| SegmentSnapshot {
                    id: s.id,
                    actor_id: s.actor_id,
                    start: s.start,
                    end: s.end,
                    regional_text: s.regional_text.clone(),
                    standard_text: s.standard_text.clone(),
                })
                .collect(),
            counters: Counters {
                next_actor_id,
                next_segment_id,
            },
            color_index: model.color_index(),
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a snapshot from JSON.
    ///
    /// The version field is checked before the rest of the document is
    /// interpreted, so a future-versioned file reports a version
    /// mismatch rather than a shape error.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ShabdaError::InvalidProject {
                reason: format!("not valid JSON: {}", e),
            })?;

        let version = value
            .get("version")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| ShabdaError::InvalidProject {
                reason: "missing version field".to_string(),
            })?;
        if version != SNAPSHOT_VERSION as u64 {
            return Err(ShabdaError::VersionMismatch {
                found: version,
                expected: SNAPSHOT_VERSION,
            });
        }

        serde_json::from_value(value).map_err(|e| ShabdaError::InvalidProject {
            reason: format!("malformed snapshot: {}", e),
        })
    }

    /// Replace the model's state with this snapshot's.
    ///
    /// The already-loaded audio source is kept as-is; if its duration
    /// differs from the recorded one by more than
    /// [`DURATION_TOLERANCE_SECS`], a non-fatal warning is logged and
    /// reported through the return value.
    pub fn apply(&self, model: &mut TimelineModel, live_duration: f64) -> bool {
        let mismatch = (self.audio_duration - live_duration).abs() > DURATION_TOLERANCE_SECS;
        if mismatch {
            log::warn!(
                "Snapshot was saved against {:.3}s of audio but the loaded file is {:.3}s; \
                 segment bounds may not line up",
                self.audio_duration,
                live_duration
            );
        }

        let actors = self
            .actors
            .iter()
            .map(|a| Actor {
                id: a.id,
                name: a.name.clone(),
                color: a.color.clone(),
                segment_ids: a.segment_ids.clone(),
            })
            .collect();
        let segments = self
            .segments
            .iter()
            .map(|s| Segment {
                id: s.id,
                actor_id: s.actor_id,
                start: s.start,
                end: s.end,
                regional_text: s.regional_text.clone(),
                standard_text: s.standard_text.clone(),
            })
            .collect();

        model.restore(
            actors,
            segments,
            (self.counters.next_actor_id, self.counters.next_segment_id),
            self.color_index,
        );
        mismatch
    }
}

/// Parse a snapshot and apply it to the model in one step.
///
/// On any error the model is left untouched. Returns true when the
/// duration-tolerance warning fired.
pub fn load_snapshot(json: &str, model: &mut TimelineModel, live_duration: f64) -> Result<bool> {
    let snapshot = ProjectSnapshot::from_json(json)?;
    Ok(snapshot.apply(model, live_duration))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn populated_model() -> TimelineModel {
        let mut model = TimelineModel::new();
        let a = model.add_actor("Rahim").unwrap();
        let b = model.add_actor("Karim").unwrap();
        let s1 = model.assign_segment(a, 0.5, 2.0).unwrap();
        model.assign_segment(b, 3.0, 4.5).unwrap();
        model.update_segment_text(s1, "oi ba", "hello").unwrap();
        model.take_events();
        model
    }

    #[test]
    fn test_round_trip() {
        let model = populated_model();
        let snapshot = ProjectSnapshot::capture(&model, "sylhet", "session.wav", 60.0);
        let json = snapshot.to_json().unwrap();

        let mut restored = TimelineModel::new();
        let warned = load_snapshot(&json, &mut restored, 60.0).unwrap();

        assert!(!warned);
        assert_eq!(restored.num_actors(), 2);
        assert_eq!(restored.num_segments(), 2);
        assert_eq!(restored.counters(), model.counters());
        assert_eq!(restored.color_index(), model.color_index());

        let seg = restored.segment(1).unwrap();
        assert_eq!(seg.regional_text, "oi ba");
    }

    #[test]
    fn test_snapshot_json_is_camel_case_without_audio() {
        let model = populated_model();
        let snapshot = ProjectSnapshot::capture(&model, "sylhet", "session.wav", 60.0);
        let json = snapshot.to_json().unwrap();

        assert!(json.contains("\"audioFileName\""));
        assert!(json.contains("\"audioDuration\""));
        assert!(json.contains("\"colorIndex\""));
        assert!(json.contains("\"nextActorId\""));
        // Only the filename crosses over; no sample data is embedded
        assert!(!json.contains("samples"));
        assert!(!json.contains("channels"));
    }

    #[test]
    fn test_version_mismatch_leaves_state_unchanged() {
        let model = populated_model();
        let snapshot = ProjectSnapshot::capture(&model, "sylhet", "session.wav", 60.0);
        let json = snapshot.to_json().unwrap().replace(
            &format!("\"version\": {}", SNAPSHOT_VERSION),
            "\"version\": 2",
        );

        let mut target = populated_model();
        let before_counters = target.counters();
        let err = load_snapshot(&json, &mut target, 60.0).unwrap_err();

        assert!(matches!(
            err,
            ShabdaError::VersionMismatch {
                found: 2,
                expected: SNAPSHOT_VERSION
            }
        ));
        assert_eq!(target.num_actors(), 2);
        assert_eq!(target.counters(), before_counters);
    }

    #[test]
    fn test_version_beyond_u32_reported_exactly() {
        // 2^32 + 1 must not truncate to 1 and masquerade as current
        let mut model = TimelineModel::new();
        let err = load_snapshot("{\"version\": 4294967297}", &mut model, 1.0).unwrap_err();
        assert!(matches!(
            err,
            ShabdaError::VersionMismatch {
                found: 4_294_967_297,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json_is_input_error() {
        let mut model = TimelineModel::new();
        let err = load_snapshot("{ nope", &mut model, 1.0).unwrap_err();
        assert!(matches!(err, ShabdaError::InvalidProject { .. }));
    }

    #[test]
    fn test_missing_version_is_input_error() {
        let mut model = TimelineModel::new();
        let err = load_snapshot("{\"dialect\": \"sylhet\"}", &mut model, 1.0).unwrap_err();
        assert!(matches!(err, ShabdaError::InvalidProject { .. }));
    }

    #[test]
    fn test_duration_mismatch_warns_but_loads() {
        let model = populated_model();
        let snapshot = ProjectSnapshot::capture(&model, "sylhet", "session.wav", 60.0);
        let json = snapshot.to_json().unwrap();

        let mut restored = TimelineModel::new();
        // 59.5s live audio vs 60.0s recorded: outside tolerance
        let warned = load_snapshot(&json, &mut restored, 59.5).unwrap();
        assert!(warned);
        assert_eq!(restored.num_segments(), 2);
    }

    #[test]
    fn test_duration_within_tolerance_is_silent() {
        let model = populated_model();
        let snapshot = ProjectSnapshot::capture(&model, "sylhet", "session.wav", 60.0);
        let json = snapshot.to_json().unwrap();

        let mut restored = TimelineModel::new();
        let warned = load_snapshot(&json, &mut restored, 60.05).unwrap();
        assert!(!warned);
    }
}
