/*!
 * Tests for the segmentation engine
 */

use narrasub::script::normalize;
use narrasub::segmentation::{
    reconstruct, segment, PunctuationSet, Segmenter, SegmenterConfig,
};
use unicode_segmentation::UnicodeSegmentation;
use crate::common;

fn texts(chunks: &[narrasub::Chunk]) -> Vec<&str> {
    chunks.iter().map(|c| c.text.as_str()).collect()
}

/// Example 1 segmentation
#[test]
fn test_segment_withExampleNarration_shouldBreakAtPunctuation() {
    let chunks = segment(&normalize(common::EXAMPLE_NARRATION, true), 25);
    assert_eq!(texts(&chunks), vec!["今天天氣很好。", "我們去公園玩，", "你呢？"]);
    assert_eq!(chunks.iter().map(|c| c.order).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(chunks[2].offset, 14);
}

/// Example 2: an unpunctuated run is hard split
#[test]
fn test_segment_withLongRun_shouldHardSplit() {
    let text = "天".repeat(30);
    let chunks = segment(&normalize(&text, false), 25);
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].char_count, 25);
    assert_eq!(chunks[1].char_count, 5);
}

/// Latin text breaks at whitespace before the hard limit
#[test]
fn test_segment_withEnglishSentence_shouldBreakAtSpaces() {
    let config = SegmenterConfig {
        max_line_chars: 20,
        min_chunk_chars: 0,
        punctuation: PunctuationSet::latin(),
    };
    let text = normalize("The quick brown fox jumps over the lazy dog", false);
    let chunks = Segmenter::new(config).segment(&text);
    assert_eq!(texts(&chunks), vec!["The quick brown fox", "jumps over the lazy", "dog"]);
}

/// Empty text yields no chunks
#[test]
fn test_segment_withEmptyText_shouldReturnNothing() {
    assert!(segment(&normalize("", true), 25).is_empty());
    assert!(segment(&normalize("   ", true), 25).is_empty());
}

/// Punctuation-only text is kept as a chunk
#[test]
fn test_segment_withOnlyPunctuation_shouldKeepIt() {
    let chunks = segment(&normalize("。。。", false), 25);
    assert_eq!(texts(&chunks), vec!["。。。"]);
}

/// Chunks never exceed the limit and always rebuild the text
#[test]
fn test_segment_withRandomNarration_shouldHoldLengthAndReconstruction() {
    for seed in 0..300 {
        let text = normalize(&common::random_narration(seed, 80), seed % 2 == 0);
        let max = 5 + (seed as usize % 30);
        let chunks = segment(&text, max);

        assert_eq!(reconstruct(&text, &chunks), text.text, "seed {}", seed);

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.order, i);
            assert_eq!(chunk.char_count, chunk.text.chars().count());
            assert!(!chunk.text.is_empty());
            assert!(
                chunk.char_count <= max || chunk.text.graphemes(true).count() == 1,
                "seed {}: chunk {:?} exceeds {}",
                seed,
                chunk.text,
                max
            );
        }

        // Consecutive chunks are separated by at most one space
        for pair in chunks.windows(2) {
            let gap = pair[1].offset - pair[0].end();
            assert!(gap <= 1, "seed {}: gap of {}", seed, gap);
        }
    }
}

/// Segmentation is deterministic
#[test]
fn test_segment_withSameInput_shouldBeDeterministic() {
    let text = normalize(&common::random_narration(7, 80), true);
    assert_eq!(segment(&text, 12), segment(&text, 12));
}

/// Short chunks merge forward when configured
#[test]
fn test_segment_withMinChunkChars_shouldMergeShortChunks() {
    let config = SegmenterConfig {
        max_line_chars: 25,
        min_chunk_chars: 4,
        punctuation: PunctuationSet::cjk(),
    };
    let chunks = Segmenter::new(config).segment(&normalize("好。今天天氣很好。", false));
    assert_eq!(texts(&chunks), vec!["好。今天天氣很好。"]);
}
