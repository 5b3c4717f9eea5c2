/*!
 * Timecode validation for timed cues.
 *
 * This module checks that cue timing is:
 * - Logically consistent (start < end, not negative)
 * - Ordered without overlaps
 * - Within reading speed limits
 * - Covering the audio duration when it is known
 */

use log::debug;

use crate::timing::Cue;

/// Maximum characters per second for readable subtitles
const DEFAULT_MAX_CPS: f64 = 25.0;

/// Minimum duration for a cue in seconds
const MIN_CUE_DURATION_SEC: f64 = 0.5;

/// Maximum duration for a single cue in seconds
const MAX_CUE_DURATION_SEC: f64 = 30.0;

/// Timing differences below this are rounding noise
const TIME_EPSILON_SEC: f64 = 0.001;

/// Result of timecode validation for a single cue
#[derive(Debug, Clone)]
pub struct TimecodeCueResult {
    /// Index of the cue
    pub index: usize,
    /// Whether the cue passed validation
    pub passed: bool,
    /// Issues found
    pub issues: Vec<TimecodeIssue>,
}

impl TimecodeCueResult {
    pub fn passed(index: usize) -> Self {
        Self {
            index,
            passed: true,
            issues: vec![],
        }
    }

    pub fn failed(index: usize, issues: Vec<TimecodeIssue>) -> Self {
        Self {
            index,
            passed: false,
            issues,
        }
    }
}

/// Types of timecode issues
#[derive(Debug, Clone, PartialEq)]
pub enum TimecodeIssue {
    /// End is not after start, or start is negative
    InvalidTimeRange { start_sec: f64, end_sec: f64 },
    /// Duration is too short to read
    DurationTooShort { duration_sec: f64, min_duration_sec: f64 },
    /// Duration is too long for one cue
    DurationTooLong { duration_sec: f64, max_duration_sec: f64 },
    /// Reading speed exceeds limit
    ReadingSpeedTooHigh { cps: f64, max_cps: f64 },
    /// Starts before the previous cue ends
    OverlapsWithCue { other_index: usize, overlap_sec: f64 },
    /// Silence between this cue and the previous one
    GapAfterCue { previous_index: usize, gap_sec: f64 },
}

impl TimecodeIssue {
    /// Whether the issue breaks the cue contract rather than readability
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTimeRange { .. } | Self::OverlapsWithCue { .. }
        )
    }
}

impl std::fmt::Display for TimecodeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimecodeIssue::InvalidTimeRange { start_sec, end_sec } => {
                write!(f, "Invalid time range: start {:.3}s, end {:.3}s", start_sec, end_sec)
            }
            TimecodeIssue::DurationTooShort { duration_sec, min_duration_sec } => {
                write!(
                    f,
                    "Duration too short: {:.3}s (min: {:.3}s)",
                    duration_sec, min_duration_sec
                )
            }
            TimecodeIssue::DurationTooLong { duration_sec, max_duration_sec } => {
                write!(
                    f,
                    "Duration too long: {:.3}s (max: {:.3}s)",
                    duration_sec, max_duration_sec
                )
            }
            TimecodeIssue::ReadingSpeedTooHigh { cps, max_cps } => {
                write!(f, "Reading speed too high: {:.1} CPS (max: {:.1})", cps, max_cps)
            }
            TimecodeIssue::OverlapsWithCue { other_index, overlap_sec } => {
                write!(f, "Overlaps with cue {} by {:.3}s", other_index, overlap_sec)
            }
            TimecodeIssue::GapAfterCue { previous_index, gap_sec } => {
                write!(f, "Gap of {:.3}s after cue {}", gap_sec, previous_index)
            }
        }
    }
}

/// Result of validating all timecodes in a cue list
#[derive(Debug, Clone)]
pub struct TimecodeValidationResult {
    /// Overall pass/fail status
    pub passed: bool,
    /// Results for each cue
    pub cue_results: Vec<TimecodeCueResult>,
    /// Total number of issues
    pub total_issues: usize,
    /// Number of overlapping cues
    pub overlap_count: usize,
    /// Difference between covered time and the audio duration, when known
    pub coverage_error_sec: Option<f64>,
}

impl TimecodeValidationResult {
    /// Get all failed cues
    pub fn failed_cues(&self) -> Vec<&TimecodeCueResult> {
        self.cue_results.iter().filter(|r| !r.passed).collect()
    }
}

/// Configuration for timecode validation
#[derive(Debug, Clone)]
pub struct TimecodeValidatorConfig {
    pub max_cps: f64,
    pub min_duration_sec: f64,
    pub max_duration_sec: f64,
    pub check_overlaps: bool,
    /// Report gaps between consecutive cues
    pub check_gaps: bool,
}

impl Default for TimecodeValidatorConfig {
    fn default() -> Self {
        Self {
            max_cps: DEFAULT_MAX_CPS,
            min_duration_sec: MIN_CUE_DURATION_SEC,
            max_duration_sec: MAX_CUE_DURATION_SEC,
            check_overlaps: true,
            check_gaps: true,
        }
    }
}

/// Timecode validator for cues
pub struct TimecodeValidator {
    config: TimecodeValidatorConfig,
}

impl TimecodeValidator {
    pub fn new() -> Self {
        Self {
            config: TimecodeValidatorConfig::default(),
        }
    }

    pub fn with_config(config: TimecodeValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate a single cue
    pub fn validate_cue(&self, cue: &Cue) -> TimecodeCueResult {
        let mut issues = Vec::new();

        if cue.end_sec <= cue.start_sec || cue.start_sec < 0.0 {
            issues.push(TimecodeIssue::InvalidTimeRange {
                start_sec: cue.start_sec,
                end_sec: cue.end_sec,
            });
            // Can't do further validation with invalid times
            return TimecodeCueResult::failed(cue.index, issues);
        }

        let duration_sec = cue.duration();

        if duration_sec + TIME_EPSILON_SEC < self.config.min_duration_sec {
            issues.push(TimecodeIssue::DurationTooShort {
                duration_sec,
                min_duration_sec: self.config.min_duration_sec,
            });
        }

        if duration_sec > self.config.max_duration_sec {
            issues.push(TimecodeIssue::DurationTooLong {
                duration_sec,
                max_duration_sec: self.config.max_duration_sec,
            });
        }

        let cps = Self::calculate_cps(cue);
        if cps > self.config.max_cps {
            issues.push(TimecodeIssue::ReadingSpeedTooHigh {
                cps,
                max_cps: self.config.max_cps,
            });
        }

        if issues.is_empty() {
            TimecodeCueResult::passed(cue.index)
        } else {
            TimecodeCueResult::failed(cue.index, issues)
        }
    }

    /// Validate cues in order, optionally against the audio duration
    pub fn validate_cues(&self, cues: &[Cue], total_duration_sec: Option<f64>) -> TimecodeValidationResult {
        let mut cue_results: Vec<TimecodeCueResult> =
            cues.iter().map(|c| self.validate_cue(c)).collect();
        let mut overlap_count = 0;

        for (i, pair) in cues.windows(2).enumerate() {
            let (current, next) = (&pair[0], &pair[1]);

            if self.config.check_overlaps && current.end_sec > next.start_sec + TIME_EPSILON_SEC {
                overlap_count += 1;
                let result = &mut cue_results[i + 1];
                result.issues.push(TimecodeIssue::OverlapsWithCue {
                    other_index: current.index,
                    overlap_sec: current.end_sec - next.start_sec,
                });
                result.passed = false;
            }

            // Gaps are warnings, not failures
            if self.config.check_gaps && next.start_sec > current.end_sec + TIME_EPSILON_SEC {
                cue_results[i + 1].issues.push(TimecodeIssue::GapAfterCue {
                    previous_index: current.index,
                    gap_sec: next.start_sec - current.end_sec,
                });
            }
        }

        let coverage_error_sec = total_duration_sec.map(|total| {
            let covered: f64 = cues.iter().map(|c| c.duration().max(0.0)).sum();
            covered - total
        });

        let total_issues: usize = cue_results.iter().map(|r| r.issues.len()).sum();
        let passed = cue_results.iter().all(|r| r.passed)
            && coverage_error_sec.is_none_or(|e| e.abs() <= TIME_EPSILON_SEC);

        debug!(
            "Timecode validation: {} cues, {} issues, {} overlaps",
            cues.len(),
            total_issues,
            overlap_count
        );

        TimecodeValidationResult {
            passed,
            cue_results,
            total_issues,
            overlap_count,
            coverage_error_sec,
        }
    }

    /// Calculate reading speed (characters per second) for a cue
    pub fn calculate_cps(cue: &Cue) -> f64 {
        let duration_sec = cue.duration();
        if duration_sec <= 0.0 {
            return f64::INFINITY;
        }
        cue.text.chars().filter(|c| !c.is_whitespace()).count() as f64 / duration_sec
    }
}

impl Default for TimecodeValidator {
    fn default() -> Self {
        Self::new()
    }
}
