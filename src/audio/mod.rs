//! Audio Module
//!
//! The immutable decoded source buffer, WAV decoding, per-actor
//! sample-accurate merging, 16-bit PCM WAV encoding, and the
//! single-resource playback state machine.

pub mod io;
pub mod merge;
pub mod playback;
pub mod source;
pub mod wav;

pub use io::decode_wav_file;
pub use merge::{merge_segments, MergedAudio};
pub use playback::{PlaybackController, PlaybackState};
pub use source::AudioSource;
pub use wav::encode_wav;
