//! Playback State Machine
//!
//! Playback is a single live resource. Starting new playback always
//! stops and releases any prior playback first, stop is idempotent and
//! unconditional, and a failed start leaves nothing behind. The actual
//! audio output device belongs to the host; this tracks which span owns
//! the resource via a generation handle so stale completion callbacks
//! can be recognized and dropped.

use crate::error::{Result, ShabdaError};

/// Current playback state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlaybackState {
    /// No live playback resource
    #[default]
    Idle,
    /// One live span is playing
    Playing {
        /// Generation handle; stale handles identify superseded playback
        handle: u64,
        /// Span start in seconds on the original recording
        start: f64,
        /// Span end in seconds
        end: f64,
    },
}

/// Manages the single live playback resource.
#[derive(Debug, Clone, Default)]
pub struct PlaybackController {
    state: PlaybackState,
    next_handle: u64,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start playing a span, releasing any prior playback first.
    ///
    /// Returns the generation handle of the new playback. An invalid
    /// span fails after the prior resource was already released, so a
    /// failed start never leaves a live resource behind.
    pub fn start(&mut self, start: f64, end: f64) -> Result<u64> {
        // Prior resource goes away regardless of whether the new start
        // succeeds.
        self.stop();

        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(ShabdaError::InvalidBounds {
                reason: format!("unplayable span {start}..{end}"),
            });
        }

        self.next_handle += 1;
        let handle = self.next_handle;
        self.state = PlaybackState::Playing { handle, start, end };
        log::debug!("Playback {} started: {:.3}s..{:.3}s", handle, start, end);
        Ok(handle)
    }

    /// Stop and release the live resource. Idempotent.
    pub fn stop(&mut self) {
        if let PlaybackState::Playing { handle, .. } = self.state {
            log::debug!("Playback {} stopped", handle);
        }
        self.state = PlaybackState::Idle;
    }

    /// Completion callback from the host: only the current generation
    /// may move the state to idle, stale handles are ignored.
    pub fn on_finished(&mut self, handle: u64) {
        if let PlaybackState::Playing { handle: live, .. } = self.state {
            if live == handle {
                self.state = PlaybackState::Idle;
            }
        }
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// True while a span is playing.
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_idle() {
        let playback = PlaybackController::new();
        assert!(!playback.is_playing());
        assert_eq!(playback.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_start_and_stop() {
        let mut playback = PlaybackController::new();
        playback.start(1.0, 3.0).unwrap();
        assert!(playback.is_playing());

        playback.stop();
        assert!(!playback.is_playing());
    }

    #[test]
    fn test_stop_idempotent() {
        let mut playback = PlaybackController::new();
        playback.stop();
        playback.stop();
        assert!(!playback.is_playing());
    }

    #[test]
    fn test_start_supersedes_prior_playback() {
        let mut playback = PlaybackController::new();
        let first = playback.start(0.0, 2.0).unwrap();
        let second = playback.start(5.0, 8.0).unwrap();

        assert_ne!(first, second);
        match playback.state() {
            PlaybackState::Playing { handle, start, end } => {
                assert_eq!(handle, second);
                assert_eq!(start, 5.0);
                assert_eq!(end, 8.0);
            }
            PlaybackState::Idle => panic!("expected playing"),
        }
    }

    #[test]
    fn test_failed_start_releases_prior() {
        let mut playback = PlaybackController::new();
        playback.start(0.0, 2.0).unwrap();

        let err = playback.start(3.0, 3.0).unwrap_err();
        assert!(matches!(err, ShabdaError::InvalidBounds { .. }));
        // Cleanup happened: nothing is live
        assert!(!playback.is_playing());
    }

    #[test]
    fn test_stale_finish_ignored() {
        let mut playback = PlaybackController::new();
        let first = playback.start(0.0, 2.0).unwrap();
        let second = playback.start(5.0, 8.0).unwrap();

        playback.on_finished(first);
        assert!(playback.is_playing());

        playback.on_finished(second);
        assert!(!playback.is_playing());
    }
}
