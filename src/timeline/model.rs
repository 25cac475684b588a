//! Timeline Data Model
//!
//! One owned mutable aggregate for actors, segments and id counters.
//! All edits go through methods here so the data invariants stay
//! enforceable and unit-testable; nothing in the crate touches the maps
//! directly.
//!
//! Mutations append typed [`TimelineEvent`]s that the rendering layer
//! drains with [`TimelineModel::take_events`], replacing string-keyed
//! ad-hoc UI refresh triggers.

use std::collections::BTreeMap;

use crate::error::{Result, ShabdaError};

/// Rotating palette for actor lane colors, consumed via the persisted
/// color index.
pub const ACTOR_COLORS: [&str; 8] = [
    "#e74c3c", "#3498db", "#2ecc71", "#f39c12", "#9b59b6", "#1abc9c", "#e67e22", "#34495e",
];

/// A named speaker owning an ordered set of segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Unique identifier, monotonically assigned, never reused
    pub id: u64,
    /// Display name, unique and non-blank
    pub name: String,
    /// Lane color from [`ACTOR_COLORS`]
    pub color: String,
    /// Member segment ids in assignment order
    pub segment_ids: Vec<u64>,
}

/// A time-bounded, actor-attributed span carrying bilingual transcript
/// text.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Unique identifier, monotonically assigned, never reused
    pub id: u64,
    /// Owning actor
    pub actor_id: u64,
    /// Start time in seconds on the original recording
    pub start: f64,
    /// End time in seconds on the original recording
    pub end: f64,
    /// Transcript in the selected regional dialect
    pub regional_text: String,
    /// Transcript in the standard language
    pub standard_text: String,
}

impl Segment {
    /// Span length in seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Change notification emitted by the model for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineEvent {
    ActorAdded(u64),
    ActorRemoved(u64),
    SegmentAdded(u64),
    SegmentRemoved(u64),
    SegmentUpdated(u64),
}

/// Owns actors, segments and counters; enforces the data invariants.
#[derive(Debug, Clone, Default)]
pub struct TimelineModel {
    actors: BTreeMap<u64, Actor>,
    segments: BTreeMap<u64, Segment>,
    next_actor_id: u64,
    next_segment_id: u64,
    color_index: usize,
    events: Vec<TimelineEvent>,
}

impl TimelineModel {
    /// Create an empty model with counters starting at 1.
    pub fn new() -> Self {
        Self {
            actors: BTreeMap::new(),
            segments: BTreeMap::new(),
            next_actor_id: 1,
            next_segment_id: 1,
            color_index: 0,
            events: Vec::new(),
        }
    }

    // ========================================================================
    // Actors
    // ========================================================================

    /// Add a new actor with the next palette color.
    ///
    /// The name is trimmed before checks. Fails with a validation error
    /// if the trimmed name is empty or exactly matches an existing
    /// actor's name.
    pub fn add_actor(&mut self, name: &str) -> Result<u64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ShabdaError::BlankActorName);
        }
        if self.actors.values().any(|a| a.name == name) {
            return Err(ShabdaError::DuplicateActorName {
                name: name.to_string(),
            });
        }

        let id = self.next_actor_id;
        self.next_actor_id += 1;

        let color = ACTOR_COLORS[self.color_index % ACTOR_COLORS.len()].to_string();
        self.color_index += 1;

        self.actors.insert(
            id,
            Actor {
                id,
                name: name.to_string(),
                color,
                segment_ids: Vec::new(),
            },
        );
        self.events.push(TimelineEvent::ActorAdded(id));
        log::debug!("Actor {} added: {}", id, name);
        Ok(id)
    }

    /// Delete an actor and all of its segments.
    ///
    /// Member segments are removed first, then the actor. Idempotent:
    /// returns false if the actor does not exist.
    pub fn delete_actor(&mut self, id: u64) -> bool {
        let Some(actor) = self.actors.get(&id) else {
            return false;
        };

        let member_ids = actor.segment_ids.clone();
        for seg_id in member_ids {
            if self.segments.remove(&seg_id).is_some() {
                self.events.push(TimelineEvent::SegmentRemoved(seg_id));
            }
        }

        self.actors.remove(&id);
        self.events.push(TimelineEvent::ActorRemoved(id));
        log::debug!("Actor {} deleted (cascade)", id);
        true
    }

    /// Look up an actor by id.
    pub fn actor(&self, id: u64) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// All actors in id order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    /// Number of actors.
    pub fn num_actors(&self) -> usize {
        self.actors.len()
    }

    // ========================================================================
    // Segments
    // ========================================================================

    /// Attach a committed selection to an actor as a new segment.
    ///
    /// Fails if the actor is unknown or either bound is non-finite.
    /// Otherwise always succeeds, including when the new span overlaps
    /// existing segments: overlaps are permitted and unchecked.
    pub fn assign_segment(&mut self, actor_id: u64, start: f64, end: f64) -> Result<u64> {
        if !self.actors.contains_key(&actor_id) {
            return Err(ShabdaError::UnknownActor { id: actor_id });
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(ShabdaError::InvalidBounds {
                reason: format!("non-finite bounds {start}..{end}"),
            });
        }

        let id = self.next_segment_id;
        self.next_segment_id += 1;

        self.segments.insert(
            id,
            Segment {
                id,
                actor_id,
                start,
                end,
                regional_text: String::new(),
                standard_text: String::new(),
            },
        );
        if let Some(actor) = self.actors.get_mut(&actor_id) {
            actor.segment_ids.push(id);
        }
        self.events.push(TimelineEvent::SegmentAdded(id));
        log::debug!(
            "Segment {} assigned to actor {}: {:.3}s..{:.3}s",
            id,
            actor_id,
            start,
            end
        );
        Ok(id)
    }

    /// Delete a segment. Idempotent: returns false if absent.
    pub fn delete_segment(&mut self, id: u64) -> bool {
        let Some(segment) = self.segments.remove(&id) else {
            return false;
        };
        if let Some(actor) = self.actors.get_mut(&segment.actor_id) {
            actor.segment_ids.retain(|&sid| sid != id);
        }
        self.events.push(TimelineEvent::SegmentRemoved(id));
        true
    }

    /// Replace both transcript fields, trimmed, unconditionally.
    pub fn update_segment_text(&mut self, id: u64, regional: &str, standard: &str) -> Result<()> {
        let segment = self
            .segments
            .get_mut(&id)
            .ok_or(ShabdaError::UnknownSegment { id })?;
        segment.regional_text = regional.trim().to_string();
        segment.standard_text = standard.trim().to_string();
        self.events.push(TimelineEvent::SegmentUpdated(id));
        Ok(())
    }

    /// Overwrite a segment's bounds during a handle drag.
    ///
    /// The selection controller has already clamped the values; no
    /// further validation happens here. No-op if the segment vanished
    /// mid-drag.
    pub fn set_segment_bounds(&mut self, id: u64, start: f64, end: f64) {
        if let Some(segment) = self.segments.get_mut(&id) {
            segment.start = start;
            segment.end = end;
            self.events.push(TimelineEvent::SegmentUpdated(id));
        }
    }

    /// Look up a segment by id.
    pub fn segment(&self, id: u64) -> Option<&Segment> {
        self.segments.get(&id)
    }

    /// All segments in id order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.values()
    }

    /// Number of segments.
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// An actor's segments sorted ascending by start time.
    ///
    /// This is the ordering every export stage (merge, metadata,
    /// subtitles) consumes.
    pub fn actor_segments_sorted(&self, actor_id: u64) -> Vec<Segment> {
        let Some(actor) = self.actors.get(&actor_id) else {
            return Vec::new();
        };
        let mut segments: Vec<Segment> = actor
            .segment_ids
            .iter()
            .filter_map(|id| self.segments.get(id).cloned())
            .collect();
        segments.sort_by(|a, b| a.start.total_cmp(&b.start));
        segments
    }

    // ========================================================================
    // Events & lifecycle
    // ========================================================================

    /// Drain pending change notifications for the rendering layer.
    pub fn take_events(&mut self) -> Vec<TimelineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Clear everything. Used on new uploads and on decode failure,
    /// which resets the full session.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // ========================================================================
    // Snapshot plumbing
    // ========================================================================

    /// Current id counters as (next_actor_id, next_segment_id).
    pub fn counters(&self) -> (u64, u64) {
        (self.next_actor_id, self.next_segment_id)
    }

    /// Current palette position.
    pub fn color_index(&self) -> usize {
        self.color_index
    }

    /// Replace all in-memory state from a loaded snapshot.
    ///
    /// Drops pending events: after a wholesale replacement the renderer
    /// redraws from scratch anyway.
    pub fn restore(
        &mut self,
        actors: Vec<Actor>,
        segments: Vec<Segment>,
        counters: (u64, u64),
        color_index: usize,
    ) {
        self.actors = actors.into_iter().map(|a| (a.id, a)).collect();
        self.segments = segments.into_iter().map(|s| (s.id, s)).collect();
        self.next_actor_id = counters.0;
        self.next_segment_id = counters.1;
        self.color_index = color_index;
        self.events.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    fn model_with_actor(name: &str) -> (TimelineModel, u64) {
        let mut model = TimelineModel::new();
        let id = model.add_actor(name).unwrap();
        (model, id)
    }

    // ------------------------------------------------------------------------
    // Actor tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_add_actor() {
        let (model, id) = model_with_actor("Rahim");
        let actor = model.actor(id).unwrap();
        assert_eq!(actor.name, "Rahim");
        assert_eq!(actor.color, ACTOR_COLORS[0]);
        assert!(actor.segment_ids.is_empty());
    }

    #[test]
    fn test_add_actor_trims_name() {
        let (model, id) = model_with_actor("  Karim  ");
        assert_eq!(model.actor(id).unwrap().name, "Karim");
    }

    #[test]
    fn test_add_actor_blank_rejected() {
        let mut model = TimelineModel::new();
        let err = model.add_actor("   ").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(model.num_actors(), 0);
    }

    #[test]
    fn test_add_actor_duplicate_rejected() {
        let (mut model, _) = model_with_actor("Rahim");
        let err = model.add_actor("Rahim").unwrap_err();
        assert!(matches!(err, ShabdaError::DuplicateActorName { .. }));
        assert_eq!(model.num_actors(), 1);
    }

    #[test]
    fn test_actor_colors_rotate() {
        let mut model = TimelineModel::new();
        for i in 0..ACTOR_COLORS.len() + 1 {
            model.add_actor(&format!("actor{i}")).unwrap();
        }
        let colors: Vec<_> = model.actors().map(|a| a.color.clone()).collect();
        assert_eq!(colors[0], ACTOR_COLORS[0]);
        assert_eq!(colors[ACTOR_COLORS.len()], ACTOR_COLORS[0]);
    }

    #[test]
    fn test_actor_ids_never_reused() {
        let (mut model, first) = model_with_actor("Rahim");
        model.delete_actor(first);
        let second = model.add_actor("Karim").unwrap();
        assert!(second > first);
    }

    // ------------------------------------------------------------------------
    // Segment tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_assign_segment() {
        let (mut model, actor_id) = model_with_actor("Rahim");
        let seg_id = model.assign_segment(actor_id, 1.0, 2.5).unwrap();

        let segment = model.segment(seg_id).unwrap();
        assert_eq!(segment.actor_id, actor_id);
        assert!((segment.duration() - 1.5).abs() < 1e-9);
        assert_eq!(model.actor(actor_id).unwrap().segment_ids, vec![seg_id]);
    }

    #[test]
    fn test_assign_segment_unknown_actor() {
        let mut model = TimelineModel::new();
        let err = model.assign_segment(99, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, ShabdaError::UnknownActor { id: 99 }));
    }

    #[test]
    fn test_assign_segment_nan_rejected() {
        let (mut model, actor_id) = model_with_actor("Rahim");
        let err = model.assign_segment(actor_id, f64::NAN, 1.0).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(model.num_segments(), 0);
    }

    #[test]
    fn test_assign_segment_overlap_permitted() {
        // Overlap detection is intentionally absent: both assignments
        // succeed with no auto-resolution.
        let (mut model, actor_id) = model_with_actor("Rahim");
        model.assign_segment(actor_id, 0.0, 2.0).unwrap();
        model.assign_segment(actor_id, 1.0, 3.0).unwrap();
        assert_eq!(model.num_segments(), 2);
    }

    #[test]
    fn test_delete_segment_idempotent() {
        let (mut model, actor_id) = model_with_actor("Rahim");
        let seg_id = model.assign_segment(actor_id, 0.0, 1.0).unwrap();

        assert!(model.delete_segment(seg_id));
        assert!(!model.delete_segment(seg_id));
        assert!(model.actor(actor_id).unwrap().segment_ids.is_empty());
    }

    #[test]
    fn test_delete_actor_cascades_exactly_its_segments() {
        let mut model = TimelineModel::new();
        let a = model.add_actor("Rahim").unwrap();
        let b = model.add_actor("Karim").unwrap();
        let sa1 = model.assign_segment(a, 0.0, 1.0).unwrap();
        let sa2 = model.assign_segment(a, 2.0, 3.0).unwrap();
        let sb = model.assign_segment(b, 1.0, 2.0).unwrap();

        assert!(model.delete_actor(a));

        assert!(model.segment(sa1).is_none());
        assert!(model.segment(sa2).is_none());
        assert!(model.segment(sb).is_some());
        assert!(model.actor(a).is_none());
        assert!(model.actor(b).is_some());
    }

    #[test]
    fn test_update_segment_text_trims() {
        let (mut model, actor_id) = model_with_actor("Rahim");
        let seg_id = model.assign_segment(actor_id, 0.0, 1.0).unwrap();

        model
            .update_segment_text(seg_id, "  kemon aso  ", " how are you ")
            .unwrap();
        let segment = model.segment(seg_id).unwrap();
        assert_eq!(segment.regional_text, "kemon aso");
        assert_eq!(segment.standard_text, "how are you");
    }

    #[test]
    fn test_update_segment_text_unknown() {
        let mut model = TimelineModel::new();
        let err = model.update_segment_text(7, "a", "b").unwrap_err();
        assert!(matches!(err, ShabdaError::UnknownSegment { id: 7 }));
    }

    #[test]
    fn test_actor_segments_sorted_by_start() {
        let (mut model, actor_id) = model_with_actor("Rahim");
        model.assign_segment(actor_id, 5.0, 6.0).unwrap();
        model.assign_segment(actor_id, 1.0, 2.0).unwrap();
        model.assign_segment(actor_id, 3.0, 4.0).unwrap();

        let starts: Vec<f64> = model
            .actor_segments_sorted(actor_id)
            .iter()
            .map(|s| s.start)
            .collect();
        assert_eq!(starts, vec![1.0, 3.0, 5.0]);
    }

    // ------------------------------------------------------------------------
    // Event tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_events_emitted_and_drained() {
        let mut model = TimelineModel::new();
        let actor_id = model.add_actor("Rahim").unwrap();
        let seg_id = model.assign_segment(actor_id, 0.0, 1.0).unwrap();
        model.delete_actor(actor_id);

        let events = model.take_events();
        assert_eq!(
            events,
            vec![
                TimelineEvent::ActorAdded(actor_id),
                TimelineEvent::SegmentAdded(seg_id),
                TimelineEvent::SegmentRemoved(seg_id),
                TimelineEvent::ActorRemoved(actor_id),
            ]
        );
        assert!(model.take_events().is_empty());
    }

    // ------------------------------------------------------------------------
    // Lifecycle tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_reset_clears_everything() {
        let (mut model, actor_id) = model_with_actor("Rahim");
        model.assign_segment(actor_id, 0.0, 1.0).unwrap();

        model.reset();
        assert_eq!(model.num_actors(), 0);
        assert_eq!(model.num_segments(), 0);
        assert_eq!(model.counters(), (1, 1));
    }

    #[test]
    fn test_restore_replaces_state() {
        let (mut model, _) = model_with_actor("Old");

        let actor = Actor {
            id: 4,
            name: "Restored".to_string(),
            color: ACTOR_COLORS[2].to_string(),
            segment_ids: vec![9],
        };
        let segment = Segment {
            id: 9,
            actor_id: 4,
            start: 1.0,
            end: 2.0,
            regional_text: String::new(),
            standard_text: String::new(),
        };
        model.restore(vec![actor], vec![segment], (5, 10), 3);

        assert_eq!(model.num_actors(), 1);
        assert_eq!(model.actor(4).unwrap().name, "Restored");
        assert_eq!(model.counters(), (5, 10));
        assert_eq!(model.color_index(), 3);
        // Counters resume without reuse
        let new_actor = model.add_actor("Next").unwrap();
        assert_eq!(new_actor, 5);
    }
}
