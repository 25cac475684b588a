//! Timeline Module
//!
//! The segmentation data model (actors, segments, counters), the
//! pixel<->time coordinate mapping, and the interactive selection/drag
//! state machine.

pub mod mapper;
pub mod model;
pub mod selection;

pub use mapper::{canvas_width, to_pixel, to_time, ViewState, MAX_ZOOM, MIN_ZOOM};
pub use model::{Actor, Segment, TimelineEvent, TimelineModel, ACTOR_COLORS};
pub use selection::{
    DragState, HandleSide, ReleaseOutcome, Selection, SelectionController, MIN_SEGMENT_SECS,
    MIN_SELECTION_SECS,
};
