/*!
 * Timing allocation for segmented narration.
 *
 * Chunks are turned into timed cues covering the whole audio duration.
 * Without recognizer output every chunk is timed proportionally to its
 * weight ([`proportional`]). When word timestamps are available, chunks that
 * match them closely enough are anchored to the spoken words and the rest are
 * spread over the room between anchors ([`hybrid`]).
 *
 * Allocation never fails. Conditions that reduce quality are reported as
 * [`Degradation`]s through [`Allocator::allocate_with_report`].
 */

pub mod hybrid;
pub mod proportional;

use serde::{Deserialize, Serialize};

use crate::errors::Degradation;
use crate::segmentation::Chunk;

// @const: Default minimum on-screen time for one cue
pub const DEFAULT_MIN_CUE_DURATION_SEC: f64 = 0.5;

// @const: Default relative deviation accepted for anchored chunks
pub const DEFAULT_ALIGNMENT_TOLERANCE: f64 = 0.2;

// @const: Shortest cue ever produced, keeps start < end
pub(crate) const MIN_SLICE_SEC: f64 = 0.001;

// @struct: Word-level timestamp from a speech recognizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTimestamp {
    // @field: Recognized word
    #[serde(alias = "text")]
    pub word: String,

    // @field: Start time in seconds
    #[serde(alias = "start", alias = "startSec")]
    pub start_sec: f64,

    // @field: End time in seconds
    #[serde(alias = "end", alias = "endSec")]
    pub end_sec: f64,
}

impl WordTimestamp {
    pub fn new(word: impl Into<String>, start_sec: f64, end_sec: f64) -> Self {
        WordTimestamp {
            word: word.into(),
            start_sec,
            end_sec,
        }
    }
}

/// How a cue got its timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingSource {
    /// Share of the duration proportional to the chunk weight
    Proportional,
    /// Span of matched recognizer words
    Aligned,
}

// @struct: Timed subtitle cue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    // @field: 1-based index
    pub index: usize,

    // @field: Start time in seconds
    pub start_sec: f64,

    // @field: End time in seconds
    pub end_sec: f64,

    // @field: Display text
    pub text: String,

    // @field: Strategy that produced the timing
    pub timing: TimingSource,
}

impl Cue {
    pub fn new(index: usize, start_sec: f64, end_sec: f64, text: impl Into<String>) -> Self {
        Cue {
            index,
            start_sec,
            end_sec,
            text: text.into(),
            timing: TimingSource::Proportional,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_sec - self.start_sec
    }
}

/// Per-chunk weight used for proportional allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightModel {
    /// Weight is the chunk's character count
    #[default]
    Characters,
    /// Weight is the estimated speaking time plus a punctuation pause
    SpeechRate,
}

// @struct: Timing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Minimum cue duration in seconds, lowered when the audio is too short
    #[serde(default = "default_min_cue_duration_sec")]
    pub min_cue_duration_sec: f64,

    /// Accepted relative deviation between matched span and estimate
    #[serde(default = "default_alignment_tolerance")]
    pub alignment_tolerance: f64,

    /// Proportional weight model
    #[serde(default)]
    pub weight_model: WeightModel,
}

fn default_min_cue_duration_sec() -> f64 {
    DEFAULT_MIN_CUE_DURATION_SEC
}

fn default_alignment_tolerance() -> f64 {
    DEFAULT_ALIGNMENT_TOLERANCE
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            min_cue_duration_sec: default_min_cue_duration_sec(),
            alignment_tolerance: default_alignment_tolerance(),
            weight_model: WeightModel::default(),
        }
    }
}

/// Assigns start and end times to chunks
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    config: TimingConfig,
}

impl Allocator {
    pub fn new(config: TimingConfig) -> Self {
        Allocator { config }
    }

    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    /// Allocate timing, logging and discarding degradations
    pub fn allocate(
        &self,
        chunks: &[Chunk],
        total_duration_sec: f64,
        word_timestamps: Option<&[WordTimestamp]>,
    ) -> Vec<Cue> {
        self.allocate_with_report(chunks, total_duration_sec, word_timestamps)
            .0
    }

    /// Allocate timing and return every degradation met on the way
    pub fn allocate_with_report(
        &self,
        chunks: &[Chunk],
        total_duration_sec: f64,
        word_timestamps: Option<&[WordTimestamp]>,
    ) -> (Vec<Cue>, Vec<Degradation>) {
        if chunks.is_empty() {
            return (Vec::new(), Vec::new());
        }

        if !total_duration_sec.is_finite() || total_duration_sec <= 0.0 {
            let degradation = Degradation::TimingInfeasible {
                reason: format!("audio duration {} is not positive", total_duration_sec),
            };
            degradation.log("Timing allocation");
            return (Vec::new(), vec![degradation]);
        }

        let (cues, degradations) = match word_timestamps {
            Some(words) if !words.is_empty() => {
                hybrid::allocate(chunks, total_duration_sec, words, &self.config)
            }
            _ => proportional::allocate(chunks, total_duration_sec, &self.config),
        };

        for degradation in &degradations {
            degradation.log("Timing allocation");
        }
        (cues, degradations)
    }
}

/// Allocate timing with the default configuration
pub fn allocate(
    chunks: &[Chunk],
    total_duration_sec: f64,
    word_timestamps: Option<&[WordTimestamp]>,
) -> Vec<Cue> {
    Allocator::default().allocate(chunks, total_duration_sec, word_timestamps)
}
