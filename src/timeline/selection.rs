//! Selection & Drag State Machine
//!
//! Interactive pointer handling over the waveform: creating a new time
//! selection, and dragging an existing segment's boundary handles.
//!
//! States: Idle, Selecting (anchored rubber-band), DraggingHandle
//! (live-mutating one segment boundary). The controller receives
//! pointer positions already converted to seconds by the coordinate
//! mapper, so every value passing through here is time, not pixels.
//!
//! A lost pointer capture is handled by calling
//! [`SelectionController::pointer_up`] like a normal release: live
//! clamping already guarantees the last computed values are valid, so
//! there is no rollback path.

use crate::error::{Result, ShabdaError};
use crate::timeline::model::TimelineModel;

/// Selections shorter than this are discarded on release as accidental
/// clicks.
pub const MIN_SELECTION_SECS: f64 = 0.05;

/// Minimum span a handle drag may shrink a segment to.
pub const MIN_SEGMENT_SECS: f64 = 0.01;

/// Which boundary handle of a segment is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleSide {
    Left,
    Right,
}

/// An ephemeral, not-yet-assigned time selection. Always normalized:
/// `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub start: f64,
    pub end: f64,
}

impl Selection {
    /// Span length in seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Pointer interaction state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// No pointer interaction in progress
    Idle,
    /// Rubber-band selection from `anchor` to `cursor` (unnormalized)
    Selecting { anchor: f64, cursor: f64 },
    /// Live drag of one segment boundary
    DraggingHandle {
        segment_id: u64,
        side: HandleSide,
        /// Bounds snapshotted at pointer-down
        original_start: f64,
        original_end: f64,
        /// Pointer time at pointer-down; moves are deltas against this
        grab_time: f64,
    },
}

/// What a pointer release resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Release while idle: nothing happened
    Nothing,
    /// A selection of at least [`MIN_SELECTION_SECS`] is now pending
    SelectionPending,
    /// The selection was shorter than the minimum and was dropped
    SelectionDiscarded,
    /// A handle drag committed its live-clamped bounds
    DragCommitted,
}

/// Interactive state machine for creating selections and dragging
/// segment boundaries.
#[derive(Debug, Clone)]
pub struct SelectionController {
    /// Duration of the loaded recording in seconds
    duration: f64,
    state: DragState,
    /// Committed selection awaiting explicit assign or clear
    pending: Option<Selection>,
}

impl SelectionController {
    /// Create a controller for a recording of the given duration.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            state: DragState::Idle,
            pending: None,
        }
    }

    /// Re-arm for a newly decoded source. Drops any in-flight
    /// interaction and pending selection.
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
        self.state = DragState::Idle;
        self.pending = None;
    }

    // ========================================================================
    // Pointer transitions
    // ========================================================================

    /// Pointer-down on empty waveform: Idle -> Selecting.
    ///
    /// Ignored unless idle (a second pointer-down mid-gesture is stale
    /// input from the event layer).
    pub fn pointer_down(&mut self, time: f64) {
        if self.state != DragState::Idle {
            return;
        }
        let anchor = time.clamp(0.0, self.duration);
        self.state = DragState::Selecting {
            anchor,
            cursor: anchor,
        };
    }

    /// Pointer-down on a segment handle: Idle -> DraggingHandle.
    ///
    /// Snapshots the segment's current bounds for delta-based moves.
    /// Returns false (staying idle) if the segment does not exist.
    pub fn pointer_down_on_handle(
        &mut self,
        model: &TimelineModel,
        segment_id: u64,
        side: HandleSide,
        time: f64,
    ) -> bool {
        if self.state != DragState::Idle {
            return false;
        }
        let Some(segment) = model.segment(segment_id) else {
            log::warn!("Handle drag on missing segment {segment_id}");
            return false;
        };
        self.state = DragState::DraggingHandle {
            segment_id,
            side,
            original_start: segment.start,
            original_end: segment.end,
            grab_time: time,
        };
        true
    }

    /// Pointer move: extend the selection or live-drag the boundary.
    ///
    /// Handle drags clamp the candidate boundary (left handle to
    /// `[0, end - 0.01]`, right handle to `[start + 0.01, duration]`)
    /// and mutate the segment immediately for visual feedback.
    pub fn pointer_move(&mut self, model: &mut TimelineModel, time: f64) {
        match self.state {
            DragState::Idle => {}
            DragState::Selecting { anchor, .. } => {
                self.state = DragState::Selecting {
                    anchor,
                    cursor: time.clamp(0.0, self.duration),
                };
            }
            DragState::DraggingHandle {
                segment_id,
                side,
                original_start,
                original_end,
                grab_time,
            } => {
                let delta = time - grab_time;
                let (candidate, lo, hi) = match side {
                    HandleSide::Left => (
                        original_start + delta,
                        0.0,
                        original_end - MIN_SEGMENT_SECS,
                    ),
                    HandleSide::Right => (
                        original_end + delta,
                        original_start + MIN_SEGMENT_SECS,
                        self.duration,
                    ),
                };
                // Bounds already outside the live recording (a snapshot
                // loaded against shorter audio) leave no valid position
                // for the handle; the segment stays as-is.
                if lo > hi {
                    return;
                }
                let clamped = candidate.clamp(lo, hi);
                let (start, end) = match side {
                    HandleSide::Left => (clamped, original_end),
                    HandleSide::Right => (original_start, clamped),
                };
                model.set_segment_bounds(segment_id, start, end);
            }
        }
    }

    /// Pointer release: resolve the gesture and return to Idle.
    ///
    /// A selection is normalized (swapped if dragged right-to-left) and
    /// discarded when shorter than [`MIN_SELECTION_SECS`]; otherwise it
    /// replaces the pending selection. A handle drag needs no further
    /// work: the live-clamped bounds already sit in the model.
    pub fn pointer_up(&mut self, _model: &mut TimelineModel) -> ReleaseOutcome {
        let outcome = match self.state {
            DragState::Idle => ReleaseOutcome::Nothing,
            DragState::Selecting { anchor, cursor } => {
                let (start, end) = if anchor <= cursor {
                    (anchor, cursor)
                } else {
                    (cursor, anchor)
                };
                if end - start < MIN_SELECTION_SECS {
                    log::debug!("Selection discarded: {:.3}s is below minimum", end - start);
                    ReleaseOutcome::SelectionDiscarded
                } else {
                    self.pending = Some(Selection { start, end });
                    ReleaseOutcome::SelectionPending
                }
            }
            DragState::DraggingHandle { segment_id, .. } => {
                log::debug!("Handle drag committed on segment {segment_id}");
                ReleaseOutcome::DragCommitted
            }
        };
        self.state = DragState::Idle;
        outcome
    }

    // ========================================================================
    // Pending selection
    // ========================================================================

    /// Assign the pending selection to an actor as a new segment,
    /// consuming it.
    pub fn assign_to(&mut self, model: &mut TimelineModel, actor_id: u64) -> Result<u64> {
        let selection = self.pending.ok_or(ShabdaError::NoSelection)?;
        let segment_id = model.assign_segment(actor_id, selection.start, selection.end)?;
        self.pending = None;
        Ok(segment_id)
    }

    /// Drop the pending selection without assigning it.
    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    /// The selection awaiting assignment, if any.
    pub fn pending(&self) -> Option<Selection> {
        self.pending
    }

    // ========================================================================
    // State queries
    // ========================================================================

    /// Current interaction state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// True when no gesture is in progress.
    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }

    /// True while rubber-band selecting.
    pub fn is_selecting(&self) -> bool {
        matches!(self.state, DragState::Selecting { .. })
    }

    /// True while dragging a segment handle.
    pub fn is_dragging_handle(&self) -> bool {
        matches!(self.state, DragState::DraggingHandle { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
