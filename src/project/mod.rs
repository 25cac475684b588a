//! Project Module
//!
//! Versioned JSON snapshots of the full session state.

pub mod snapshot;

pub use snapshot::{
    load_snapshot, ActorSnapshot, Counters, ProjectSnapshot, SegmentSnapshot,
    DURATION_TOLERANCE_SECS, SNAPSHOT_VERSION,
};
