//! Error handling for Shabda
//!
//! Every failure belongs to one of four classes: input errors (bad or
//! incompatible files), decode errors (codec failures), validation errors
//! (rejected user edits), and resource errors (merge/export buffers).
//! Callers surface the message at the operation boundary; nothing here is
//! allowed to terminate the application.

use thiserror::Error;

/// Result type alias for Shabda operations
pub type Result<T> = std::result::Result<T, ShabdaError>;

/// Failure classes as reported to the user-facing status line.
///
/// `Decode` is the only class that resets the full in-memory state;
/// the others leave state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad file type, unreadable file, malformed/incompatible project JSON
    Input,
    /// Codec failure while decoding audio
    Decode,
    /// Rejected edit (blank/duplicate actor name, bad selection bounds)
    Validation,
    /// Merge/export buffer failure
    Resource,
}

/// Main error type for Shabda operations
#[derive(Error, Debug)]
pub enum ShabdaError {
    // Input Errors
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unsupported audio file: {reason}")]
    UnsupportedFile { reason: String },

    #[error("Invalid project file: {reason}")]
    InvalidProject { reason: String },

    // `found` is u64: the version comes straight from the JSON and may
    // exceed the schema's own u32 range
    #[error("Incompatible project version: found {found}, expected {expected}")]
    VersionMismatch { found: u64, expected: u32 },

    // Decode Errors
    #[error("Failed to decode audio: {reason}")]
    DecodeFailed {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Validation Errors
    #[error("Actor name cannot be blank")]
    BlankActorName,

    #[error("Actor name already exists: {name}")]
    DuplicateActorName { name: String },

    #[error("Unknown actor id: {id}")]
    UnknownActor { id: u64 },

    #[error("Unknown segment id: {id}")]
    UnknownSegment { id: u64 },

    #[error("Invalid segment bounds: {reason}")]
    InvalidBounds { reason: String },

    #[error("No pending selection to assign")]
    NoSelection,

    // Resource Errors
    #[error("Nothing to merge for actor '{actor}': no segments with audible length")]
    EmptyMerge { actor: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ShabdaError {
    /// Classify this error for status reporting.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ShabdaError::FileNotFound { .. } => ErrorCategory::Input,
            ShabdaError::UnsupportedFile { .. } => ErrorCategory::Input,
            ShabdaError::InvalidProject { .. } => ErrorCategory::Input,
            ShabdaError::VersionMismatch { .. } => ErrorCategory::Input,
            ShabdaError::DecodeFailed { .. } => ErrorCategory::Decode,
            ShabdaError::BlankActorName => ErrorCategory::Validation,
            ShabdaError::DuplicateActorName { .. } => ErrorCategory::Validation,
            ShabdaError::UnknownActor { .. } => ErrorCategory::Validation,
            ShabdaError::UnknownSegment { .. } => ErrorCategory::Validation,
            ShabdaError::InvalidBounds { .. } => ErrorCategory::Validation,
            ShabdaError::NoSelection => ErrorCategory::Validation,
            ShabdaError::EmptyMerge { .. } => ErrorCategory::Resource,
            ShabdaError::Io(_) => ErrorCategory::Input,
            ShabdaError::Serialization(_) => ErrorCategory::Input,
        }
    }

    /// Whether handling this error requires a full state reset.
    ///
    /// Only decode failures reset the session; every other class leaves
    /// actors, segments and counters untouched.
    pub fn resets_state(&self) -> bool {
        self.category() == ErrorCategory::Decode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = ShabdaError::VersionMismatch {
            found: 2,
            expected: 1,
        };
        assert_eq!(err.category(), ErrorCategory::Input);

        let err = ShabdaError::DuplicateActorName {
            name: "Rahim".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);

        let err = ShabdaError::EmptyMerge {
            actor: "Rahim".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Resource);
    }

    #[test]
    fn test_only_decode_resets_state() {
        let decode = ShabdaError::DecodeFailed {
            reason: "truncated stream".to_string(),
            source: None,
        };
        assert!(decode.resets_state());

        let validation = ShabdaError::BlankActorName;
        assert!(!validation.resets_state());

        let input = ShabdaError::InvalidProject {
            reason: "not JSON".to_string(),
        };
        assert!(!input.resets_state());
    }
}
