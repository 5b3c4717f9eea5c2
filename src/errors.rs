/*!
 * Error types for the narrasub application.
 *
 * The subtitle core never fails: every recoverable condition it meets is
 * described by a [`Degradation`], logged, and answered with a defined
 * fallback. Only the outer layer (files, configuration, duration probing)
 * produces real errors, using the thiserror crate like the rest of the
 * application.
 */

use thiserror::Error;

/// A recoverable condition met while building subtitles.
///
/// Degradations change the quality of the output but never abort the
/// pipeline. They are returned alongside results so callers can report them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Degradation {
    /// Input bytes were not valid UTF-8 and were decoded lossily
    #[error("Malformed input: {invalid_sequences} invalid byte sequence(s) replaced")]
    MalformedInput {
        /// Number of replacement characters introduced by decoding
        invalid_sequences: usize,
    },

    /// No timing can be produced for this segment
    #[error("Timing infeasible: {reason}")]
    TimingInfeasible {
        /// Human readable cause (non-positive duration, zero weight)
        reason: String,
    },

    /// A chunk could not be aligned to recognizer word timestamps
    #[error("Alignment mismatch for chunk {order}: {reason}")]
    AlignmentMismatch {
        /// Chunk order within the segment
        order: usize,
        /// Why the chunk fell back to proportional timing
        reason: String,
    },

    /// Han characters the conversion table has no entry for
    #[error("Script conversion passed {count} Han character(s) through unchanged")]
    ScriptConversionMiss {
        /// Number of unmapped Han characters
        count: usize,
    },
}

impl Degradation {
    /// Whether the condition deserves a warning rather than a debug line
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput { .. } | Self::TimingInfeasible { .. }
        )
    }

    /// Emit the degradation through the log facade
    pub fn log(&self, context: &str) {
        if self.is_warning() {
            log::warn!("{}: {}", context, self);
        } else {
            log::debug!("{}: {}", context, self);
        }
    }
}

/// Errors that can occur while measuring audio duration
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The probe command could not be started or exited unsuccessfully
    #[error("Probe command failed: {0}")]
    CommandFailed(String),

    /// The probe did not finish in time
    #[error("Probe timed out after {0} seconds")]
    Timeout(u64),

    /// The probe output could not be read as a duration
    #[error("Failed to parse probe output: {0}")]
    ParseError(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from duration probing
    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
