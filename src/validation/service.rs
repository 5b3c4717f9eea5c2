/*!
 * Validation service that orchestrates all validators.
 *
 * Validation is diagnostic only: it never changes cues, it reports what a
 * reviewer should look at before the subtitles are burned in.
 */

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::timing::Cue;

use super::length::{LengthValidationResult, LengthValidator};
use super::timecodes::{TimecodeValidationResult, TimecodeValidator, TimecodeValidatorConfig};

/// Configuration for the validation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Whether validation is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to validate timecodes
    #[serde(default = "default_true")]
    pub timecode_validation: bool,

    /// Whether to validate line lengths
    #[serde(default = "default_true")]
    pub length_validation: bool,

    /// Maximum characters per second for readable subtitles
    #[serde(default = "default_max_cps")]
    pub max_chars_per_second: f64,
}

fn default_true() -> bool {
    true
}

fn default_max_cps() -> f64 {
    25.0
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timecode_validation: true,
            length_validation: true,
            max_chars_per_second: default_max_cps(),
        }
    }
}

/// Combined validation outcome
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Whether every enabled check passed
    pub passed: bool,
    pub timecodes: Option<TimecodeValidationResult>,
    pub lengths: Option<LengthValidationResult>,
}

impl ValidationReport {
    /// Total number of issues across validators
    pub fn total_issues(&self) -> usize {
        self.timecodes.as_ref().map_or(0, |r| r.total_issues)
            + self.lengths.as_ref().map_or(0, |r| r.total_issues)
    }

    /// Human readable issue lines, one per problem
    pub fn issue_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(timecodes) = &self.timecodes {
            for result in &timecodes.cue_results {
                lines.extend(result.issues.iter().map(|i| format!("Cue {}: {}", result.index, i)));
            }
            if let Some(error) = timecodes.coverage_error_sec {
                if error.abs() > 0.001 {
                    lines.push(format!("Cues cover {:+.3}s relative to the audio duration", error));
                }
            }
        }
        if let Some(lengths) = &self.lengths {
            for result in &lengths.cue_results {
                lines.extend(result.issues.iter().map(|i| format!("Cue {}: {}", result.index, i)));
            }
        }
        lines
    }
}

/// Runs the enabled validators over a cue list
pub struct ValidationService {
    config: ValidationConfig,
    timecode_validator: TimecodeValidator,
    length_validator: LengthValidator,
}

impl ValidationService {
    pub fn new(config: ValidationConfig, max_line_chars: usize) -> Self {
        let timecode_validator = TimecodeValidator::with_config(TimecodeValidatorConfig {
            max_cps: config.max_chars_per_second,
            ..TimecodeValidatorConfig::default()
        });
        Self {
            config,
            timecode_validator,
            length_validator: LengthValidator::with_max_line_chars(max_line_chars),
        }
    }

    /// Validate cues, logging a warning per failing cue
    pub fn validate(&self, cues: &[Cue], total_duration_sec: Option<f64>) -> ValidationReport {
        if !self.config.enabled {
            debug!("Validation disabled");
            return ValidationReport {
                passed: true,
                timecodes: None,
                lengths: None,
            };
        }

        let timecodes = self
            .config
            .timecode_validation
            .then(|| self.timecode_validator.validate_cues(cues, total_duration_sec));
        let lengths = self
            .config
            .length_validation
            .then(|| self.length_validator.validate_cues(cues));

        let passed = timecodes.as_ref().is_none_or(|r| r.passed)
            && lengths.as_ref().is_none_or(|r| r.passed);

        let report = ValidationReport {
            passed,
            timecodes,
            lengths,
        };
        if !report.passed {
            warn!("Validation found {} issue(s)", report.total_issues());
        }
        report
    }
}
