/*!
 * Script normalization for narration text.
 *
 * Collapses whitespace and optionally converts simplified Chinese characters
 * to their traditional forms using the bundled table in [`table`]. The
 * normalizer never fails: unknown characters pass through unchanged and
 * invalid UTF-8 is decoded lossily.
 */

pub mod table;

use log::debug;

use crate::errors::Degradation;
use table::{SIMPLIFIED_TO_TRADITIONAL, TRADITIONAL_FORMS};

/// Script tag of a run of normalized text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Characters that only exist in simplified writing
    Simplified,
    /// Characters that only exist in traditional writing
    Traditional,
    /// Non-Han text and Han characters shared by both variants
    Other,
}

/// A maximal run of characters sharing one script tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRun {
    // @field: Script tag
    pub script: Script,
    // @field: Char offset of the first character
    pub start: usize,
    // @field: Number of characters
    pub len: usize,
}

/// Canonicalized narration text ready for segmentation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText {
    /// Whitespace-collapsed, optionally converted text
    pub text: String,

    /// Script-tagged runs covering `text` in order
    pub runs: Vec<ScriptRun>,

    /// Han characters the conversion table has no entry for
    pub unmapped_han: usize,
}

impl NormalizedText {
    /// Number of Unicode scalar values in the text
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Diagnostic describing unconverted Han characters, if any
    pub fn conversion_miss(&self) -> Option<Degradation> {
        (self.unmapped_han > 0).then(|| Degradation::ScriptConversionMiss {
            count: self.unmapped_han,
        })
    }
}

impl std::fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Check whether a character is a CJK ideograph
pub fn is_han(c: char) -> bool {
    matches!(
        c as u32,
        0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xF900..=0xFAFF
            | 0x20000..=0x2A6DF
            | 0x2A700..=0x2EBEF
            | 0x30000..=0x3134F
    )
}

/// Traditional form of a character, or the character itself
pub fn to_traditional(c: char) -> char {
    SIMPLIFIED_TO_TRADITIONAL.get(&c).copied().unwrap_or(c)
}

/// Classify a single character
pub fn classify(c: char) -> Script {
    if SIMPLIFIED_TO_TRADITIONAL.contains_key(&c) {
        Script::Simplified
    } else if TRADITIONAL_FORMS.contains(&c) {
        Script::Traditional
    } else {
        Script::Other
    }
}

/// Normalize narration text.
///
/// Runs of whitespace collapse to one ASCII space, both ends are trimmed and
/// punctuation is kept verbatim. With `convert_to_traditional` every character
/// found in the bundled table is replaced by its traditional form.
pub fn normalize(text: &str, convert_to_traditional: bool) -> NormalizedText {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    let mut unmapped_han = 0;

    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }

        let converted = if convert_to_traditional {
            to_traditional(c)
        } else {
            c
        };
        if convert_to_traditional
            && converted == c
            && is_han(c)
            && !TRADITIONAL_FORMS.contains(&c)
        {
            unmapped_han += 1;
        }
        out.push(converted);
    }

    let runs = tag_runs(&out);
    debug!(
        "Normalized {} chars into {} chars ({} script runs)",
        text.chars().count(),
        out.chars().count(),
        runs.len()
    );

    NormalizedText {
        text: out,
        runs,
        unmapped_han,
    }
}

/// Normalize raw bytes, replacing invalid UTF-8 sequences.
///
/// Returns the normalized text and, when decoding had to repair the input, a
/// [`Degradation::MalformedInput`] describing how much was replaced.
pub fn normalize_bytes(
    bytes: &[u8],
    convert_to_traditional: bool,
) -> (NormalizedText, Option<Degradation>) {
    let decoded = String::from_utf8_lossy(bytes);
    let degradation = match &decoded {
        std::borrow::Cow::Borrowed(_) => None,
        std::borrow::Cow::Owned(repaired) => {
            let original_replacements = count_valid_replacements(bytes);
            let invalid_sequences = repaired
                .chars()
                .filter(|&c| c == char::REPLACEMENT_CHARACTER)
                .count()
                .saturating_sub(original_replacements);
            Some(Degradation::MalformedInput { invalid_sequences })
        }
    };

    (normalize(&decoded, convert_to_traditional), degradation)
}

// U+FFFD characters that were already present as valid UTF-8
fn count_valid_replacements(bytes: &[u8]) -> usize {
    bytes
        .windows(3)
        .filter(|w| w == &[0xEF, 0xBF, 0xBD])
        .count()
}

fn tag_runs(text: &str) -> Vec<ScriptRun> {
    let mut runs: Vec<ScriptRun> = Vec::new();

    for (offset, c) in text.chars().enumerate() {
        let script = classify(c);
        match runs.last_mut() {
            Some(run) if run.script == script => run.len += 1,
            _ => runs.push(ScriptRun {
                script,
                start: offset,
                len: 1,
            }),
        }
    }

    runs
}
