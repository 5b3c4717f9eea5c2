/*!
 * Line length validation for cues.
 *
 * Every line of a cue must fit the on-screen limit. A line made of a single
 * grapheme cluster wider than the limit is accepted, since it cannot be
 * split without breaking the character apart.
 */

use log::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::segmentation::DEFAULT_MAX_LINE_CHARS;
use crate::timing::Cue;

/// Result of length validation for a single cue
#[derive(Debug, Clone)]
pub struct LengthCueResult {
    /// Index of the cue
    pub index: usize,
    /// Whether validation passed
    pub passed: bool,
    /// Issues found
    pub issues: Vec<LengthIssue>,
    /// Longest line in characters
    pub longest_line: usize,
}

/// Types of length issues
#[derive(Debug, Clone, PartialEq)]
pub enum LengthIssue {
    /// Cue has no visible text
    EmptyText,
    /// A line is wider than the limit
    LineTooLong {
        line: usize,
        char_count: usize,
        max_chars: usize,
    },
}

impl std::fmt::Display for LengthIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthIssue::EmptyText => write!(f, "Cue text is empty"),
            LengthIssue::LineTooLong {
                line,
                char_count,
                max_chars,
            } => write!(
                f,
                "Line {} too long: {} chars (max: {})",
                line, char_count, max_chars
            ),
        }
    }
}

/// Result of validating lengths for a cue list
#[derive(Debug, Clone)]
pub struct LengthValidationResult {
    /// Overall pass/fail status
    pub passed: bool,
    /// Results for each cue
    pub cue_results: Vec<LengthCueResult>,
    /// Total number of issues
    pub total_issues: usize,
}

impl LengthValidationResult {
    /// Get all failed cues
    pub fn failed_cues(&self) -> Vec<&LengthCueResult> {
        self.cue_results.iter().filter(|r| !r.passed).collect()
    }
}

/// Line length validator
pub struct LengthValidator {
    max_line_chars: usize,
}

impl LengthValidator {
    pub fn new() -> Self {
        Self::with_max_line_chars(DEFAULT_MAX_LINE_CHARS)
    }

    pub fn with_max_line_chars(max_line_chars: usize) -> Self {
        Self {
            max_line_chars: max_line_chars.max(1),
        }
    }

    /// Validate a single cue
    pub fn validate_cue(&self, cue: &Cue) -> LengthCueResult {
        let mut issues = Vec::new();
        let mut longest_line = 0;

        // A lone no-break space is how empty cues are written out
        let visible = cue.text.trim();
        if visible.is_empty() {
            issues.push(LengthIssue::EmptyText);
        }

        for (i, line) in visible.lines().enumerate() {
            let char_count = line.chars().count();
            longest_line = longest_line.max(char_count);

            let single_grapheme = line.graphemes(true).count() == 1;
            if char_count > self.max_line_chars && !single_grapheme {
                issues.push(LengthIssue::LineTooLong {
                    line: i + 1,
                    char_count,
                    max_chars: self.max_line_chars,
                });
            }
        }

        LengthCueResult {
            index: cue.index,
            passed: issues.is_empty(),
            issues,
            longest_line,
        }
    }

    /// Validate every cue
    pub fn validate_cues(&self, cues: &[Cue]) -> LengthValidationResult {
        let cue_results: Vec<LengthCueResult> =
            cues.iter().map(|c| self.validate_cue(c)).collect();
        let total_issues = cue_results.iter().map(|r| r.issues.len()).sum();
        let passed = cue_results.iter().all(|r| r.passed);

        debug!(
            "Length validation: {} cues, {} issues (max {} chars)",
            cues.len(),
            total_issues,
            self.max_line_chars
        );

        LengthValidationResult {
            passed,
            cue_results,
            total_issues,
        }
    }
}

impl Default for LengthValidator {
    fn default() -> Self {
        Self::new()
    }
}
