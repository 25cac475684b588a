//! Shabda - Actor-Attributed Audio Segmentation Engine
//!
//! Shabda turns a single decoded recording into actor-attributed,
//! time-bounded segments carrying bilingual (regional + standard)
//! transcript text, and exports per-actor merged audio with metadata
//! and subtitles.
//!
//! # Architecture
//!
//! - `timeline` - the segmentation data model, the pixel<->time mapping
//!   under zoom/scroll, and the interactive selection/drag state machine
//! - `audio` - the immutable decoded source, per-actor merging, 16-bit
//!   PCM WAV encoding, and the single-resource playback state machine
//! - `export` - SRT subtitles, per-actor metadata JSON, file naming
//! - `project` - versioned JSON snapshots of the full session state

pub mod audio;
pub mod cli;
pub mod error;
pub mod export;
pub mod project;
pub mod timeline;

pub use error::{ErrorCategory, Result, ShabdaError};
