/*!
 * Tests for cue validation
 */

use narrasub::timing::Cue;
use narrasub::validation::length::{LengthIssue, LengthValidator};
use narrasub::validation::timecodes::{TimecodeIssue, TimecodeValidator};
use narrasub::validation::{ValidationConfig, ValidationService};

/// Overlapping cues fail timecode validation
#[test]
fn test_validateCues_withOverlap_shouldFail() {
    let cues = vec![Cue::new(1, 0.0, 2.0, "一二三"), Cue::new(2, 1.5, 3.0, "四五六")];
    let result = TimecodeValidator::new().validate_cues(&cues, None);
    assert!(!result.passed);
    assert_eq!(result.overlap_count, 1);
    assert!(matches!(
        result.cue_results[1].issues[0],
        TimecodeIssue::OverlapsWithCue { other_index: 1, .. }
    ));
}

/// Gaps are reported but do not fail
#[test]
fn test_validateCues_withGap_shouldWarnOnly() {
    let cues = vec![Cue::new(1, 0.0, 1.0, "一"), Cue::new(2, 2.0, 3.0, "二")];
    let result = TimecodeValidator::new().validate_cues(&cues, None);
    assert!(result.passed);
    assert_eq!(result.total_issues, 1);
}

/// Missing coverage of the audio fails
#[test]
fn test_validateCues_withShortCoverage_shouldFail() {
    let cues = vec![Cue::new(1, 0.0, 4.0, "一二三")];
    let result = TimecodeValidator::new().validate_cues(&cues, Some(5.0));
    assert!(!result.passed);
    assert_eq!(result.coverage_error_sec, Some(-1.0));
}

/// Reading speed is checked against non-whitespace characters
#[test]
fn test_calculateCps_withSpaces_shouldIgnoreThem() {
    let cue = Cue::new(1, 0.0, 2.0, "a b c d");
    assert_eq!(TimecodeValidator::calculate_cps(&cue), 2.0);
}

/// Long lines fail unless they are a single grapheme
#[test]
fn test_lengthValidator_withLongLines_shouldFlagThem() {
    let validator = LengthValidator::with_max_line_chars(4);
    let long = validator.validate_cue(&Cue::new(1, 0.0, 1.0, "一二三四五"));
    assert!(matches!(
        long.issues[0],
        LengthIssue::LineTooLong { char_count: 5, max_chars: 4, .. }
    ));

    let emoji = validator.validate_cue(&Cue::new(2, 0.0, 1.0, "👨‍👩‍👧"));
    assert!(emoji.passed);

    let empty = validator.validate_cue(&Cue::new(3, 0.0, 1.0, "\u{00A0}"));
    assert_eq!(empty.issues, vec![LengthIssue::EmptyText]);
}

/// The service combines validators
#[test]
fn test_service_withBadCues_shouldCollectIssueLines() {
    let service = ValidationService::new(ValidationConfig::default(), 4);
    let cues = vec![Cue::new(1, 0.0, 1.0, "一二三四五"), Cue::new(2, 1.0, 0.5, "六")];
    let report = service.validate(&cues, None);
    assert!(!report.passed);
    assert_eq!(report.total_issues(), 2);
    assert!(report.issue_lines().iter().any(|l| l.starts_with("Cue 2: Invalid time range")));
}
