/*!
 * Tests for the script normalizer
 */

use narrasub::errors::Degradation;
use narrasub::script::{self, normalize, normalize_bytes, Script};
use crate::common;

/// Example 3: simplified narration converts to traditional
#[test]
fn test_normalize_withSimplifiedNarration_shouldConvertToTraditional() {
    let result = normalize("这是简体中文", true);
    assert_eq!(result.text, "這是簡體中文");
    assert_eq!(result.char_count(), 6);
}

/// Conversion leaves other scripts, digits and punctuation alone
#[test]
fn test_normalize_withMixedScripts_shouldOnlyTouchHan() {
    let result = normalize("Hello 世界 2024！😀", true);
    assert_eq!(result.text, "Hello 世界 2024！😀");
    assert!(result.runs.iter().all(|r| r.script == Script::Other));
}

/// Characters with more than one traditional form are left for the reader
#[test]
fn test_normalize_withContextDependentCharacters_shouldLeaveThemUnchanged() {
    let result = normalize("皇后和头发，茶几上的钟表", true);
    assert_eq!(result.text, "皇后和頭发，茶几上的钟表");

    for word in ["皇后", "以后", "出发", "几个", "汇报", "历史"] {
        let converted = normalize(word, true).text;
        assert_eq!(converted.chars().next(), word.chars().next(), "{}", word);
        assert!(!converted.contains(['後', '發', '幾', '匯', '歷']), "{}", word);
    }
}

/// Converting twice gives the same result as converting once
#[test]
fn test_normalize_withRandomNarration_shouldBeIdempotent() {
    for seed in 0..200 {
        let text = format!("这是{}说话", common::random_narration(seed, 40));
        let once = normalize(&text, true);
        let twice = normalize(&once.text, true);
        assert_eq!(once, twice, "seed {}", seed);
    }
}

/// Already traditional text passes through unchanged
#[test]
fn test_normalize_withTraditionalText_shouldBeNoOp() {
    let text = "今天天氣很好。我們去公園玩，你呢？";
    assert_eq!(normalize(text, true).text, text);
}

/// Whitespace of every kind collapses to one ASCII space
#[test]
fn test_normalize_withUnicodeWhitespace_shouldCollapse() {
    let result = normalize("\u{3000}第一句\u{3000}\u{3000}第二句\n\n", false);
    assert_eq!(result.text, "第一句 第二句");
}

/// Empty and blank input produce empty text
#[test]
fn test_normalize_withBlankInput_shouldBeEmpty() {
    assert!(normalize("", true).is_empty());
    assert!(normalize(" \t\n ", true).is_empty());
    assert!(normalize(" \t\n ", true).runs.is_empty());
}

/// Script runs cover the whole text in order
#[test]
fn test_runs_withMixedText_shouldCoverText() {
    let result = normalize("这是abc體", false);
    let mut cursor = 0;
    for run in &result.runs {
        assert_eq!(run.start, cursor);
        cursor += run.len;
    }
    assert_eq!(cursor, result.char_count());
    assert_eq!(result.runs[0].script, Script::Simplified);
    assert_eq!(result.runs.last().map(|r| r.script), Some(Script::Traditional));
}

/// Character helpers
#[test]
fn test_charHelpers_withKnownCharacters_shouldClassify() {
    assert!(script::is_han('中'));
    assert!(!script::is_han('a'));
    assert!(!script::is_han('。'));
    assert_eq!(script::to_traditional('这'), '這');
    assert_eq!(script::to_traditional('x'), 'x');
    assert_eq!(script::classify('們'), Script::Traditional);
}

/// Valid UTF-8 bytes report nothing
#[test]
fn test_normalizeBytes_withValidUtf8_shouldNotReport() {
    let (text, degradation) = normalize_bytes("你好\u{FFFD}".as_bytes(), false);
    assert_eq!(text.text, "你好\u{FFFD}");
    assert!(degradation.is_none());
}

/// Each invalid sequence is counted once
#[test]
fn test_normalizeBytes_withTwoInvalidSequences_shouldCountBoth() {
    let (_, degradation) = normalize_bytes(b"\xFFab\xC3", false);
    assert_eq!(
        degradation,
        Some(Degradation::MalformedInput {
            invalid_sequences: 2
        })
    );
}
