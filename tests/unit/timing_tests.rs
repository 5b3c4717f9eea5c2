/*!
 * Tests for the timing allocator
 */

use narrasub::errors::Degradation;
use narrasub::script::normalize;
use narrasub::segmentation::segment;
use narrasub::timing::{
    allocate, Allocator, Cue, TimingConfig, TimingSource, WeightModel, WordTimestamp,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::common;

fn assert_covering(cues: &[Cue], total: f64, context: &str) {
    assert_eq!(cues[0].start_sec, 0.0, "{}", context);
    assert_eq!(cues[cues.len() - 1].end_sec, total, "{}", context);
    for (i, cue) in cues.iter().enumerate() {
        assert_eq!(cue.index, i + 1, "{}", context);
        assert!(cue.start_sec < cue.end_sec, "{}: cue {} is empty", context, cue.index);
    }
    for pair in cues.windows(2) {
        assert_eq!(pair[0].end_sec, pair[1].start_sec, "{}", context);
    }
    let covered: f64 = cues.iter().map(Cue::duration).sum();
    assert!((covered - total).abs() < 1e-9, "{}", context);
}

/// Example 1 timing
#[test]
fn test_allocate_withExampleNarration_shouldMatchExpectedDurations() {
    let chunks = segment(&normalize(common::EXAMPLE_NARRATION, true), 25);
    let cues = allocate(&chunks, 10.0, None);

    assert_eq!(cues.len(), 3);
    assert!((cues[0].duration() - 70.0 / 17.0).abs() < 1e-9);
    assert!((cues[1].start_sec - 70.0 / 17.0).abs() < 1e-9);
    assert!((cues[2].start_sec - 140.0 / 17.0).abs() < 1e-9);
    assert_eq!(cues[2].end_sec, 10.0);
    assert!(cues.iter().all(|c| c.timing == TimingSource::Proportional));
}

/// Example 4: a zero duration yields no cues and a degradation
#[test]
fn test_allocateWithReport_withZeroDuration_shouldReportInfeasible() {
    let chunks = segment(&normalize(common::EXAMPLE_NARRATION, true), 25);
    let (cues, degradations) = Allocator::default().allocate_with_report(&chunks, 0.0, None);
    assert!(cues.is_empty());
    assert!(matches!(degradations[0], Degradation::TimingInfeasible { .. }));
}

/// Negative durations are infeasible too
#[test]
fn test_allocate_withNegativeDuration_shouldReturnNothing() {
    let chunks = segment(&normalize("你好。", true), 25);
    assert!(allocate(&chunks, -3.0, None).is_empty());
}

/// No chunks, no cues
#[test]
fn test_allocate_withNoChunks_shouldReturnNothing() {
    assert!(allocate(&[], 10.0, None).is_empty());
}

/// The minimum cue duration holds when the audio is long enough
#[test]
fn test_allocate_withShortChunk_shouldRespectMinimumDuration() {
    let chunks = segment(&normalize(&format!("{}。好。", "天".repeat(24)), false), 25);
    let cues = allocate(&chunks, 5.0, None);
    assert_eq!(cues.len(), 2);
    assert!((cues[1].duration() - 0.5).abs() < 1e-9);
    assert_covering(&cues, 5.0, "short chunk");
}

/// Too many chunks for the floor share the duration evenly
#[test]
fn test_allocate_withVeryShortAudio_shouldLowerFloor() {
    let chunks = segment(&normalize("一。二。三。四。", false), 25);
    let cues = allocate(&chunks, 1.0, None);
    assert_eq!(cues.len(), 4);
    assert!(cues.iter().all(|c| (c.duration() - 0.25).abs() < 1e-9));
}

/// Proportional cues cover the duration for any input
#[test]
fn test_allocate_withRandomNarration_shouldCoverDuration() {
    let mut rng = StdRng::seed_from_u64(42);
    for seed in 0..300 {
        let text = normalize(&common::random_narration(seed, 80), true);
        let chunks = segment(&text, 5 + (seed as usize % 30));
        if chunks.is_empty() {
            continue;
        }
        let total = rng.random_range(0.05..120.0);
        let config = TimingConfig {
            weight_model: if seed % 2 == 0 {
                WeightModel::Characters
            } else {
                WeightModel::SpeechRate
            },
            ..TimingConfig::default()
        };
        let cues = Allocator::new(config).allocate(&chunks, total, None);
        assert_eq!(cues.len(), chunks.len());
        assert_covering(&cues, total, &format!("seed {}", seed));
    }
}

/// Hybrid cues cover the duration even with noisy word timestamps
#[test]
fn test_allocate_withRandomWordTimestamps_shouldCoverDuration() {
    let mut rng = StdRng::seed_from_u64(7);
    for seed in 0..200 {
        let text = normalize(&common::random_narration(seed, 60), true);
        let chunks = segment(&text, 8);
        if chunks.is_empty() {
            continue;
        }
        let total = rng.random_range(1.0..60.0);

        let mut words = Vec::new();
        let mut cursor = 0.0;
        for chunk in &chunks {
            let length = rng.random_range(-0.2..(total / chunks.len() as f64));
            let start = cursor + rng.random_range(-0.3..0.3);
            words.push(WordTimestamp::new(chunk.text.clone(), start, start + length));
            cursor += total / chunks.len() as f64;
        }

        let cues = allocate(&chunks, total, Some(words.as_slice()));
        assert_eq!(cues.len(), chunks.len());
        assert_covering(&cues, total, &format!("seed {}", seed));
    }
}

/// Words that exactly follow the text anchor every chunk
#[test]
fn test_allocate_withFaithfulWords_shouldAlignEveryChunk() {
    let chunks = segment(&normalize(common::EXAMPLE_NARRATION, true), 25);
    let words = vec![
        WordTimestamp::new("今天天氣很好", 0.2, 4.0),
        WordTimestamp::new("我們去公園玩", 4.4, 8.0),
        WordTimestamp::new("你呢", 8.3, 9.9),
    ];
    let (cues, degradations) =
        Allocator::default().allocate_with_report(&chunks, 10.0, Some(words.as_slice()));

    assert!(degradations.is_empty());
    assert!(cues.iter().all(|c| c.timing == TimingSource::Aligned));
    assert_eq!(cues[0].start_sec, 0.0);
    assert_eq!(cues[1].start_sec, 4.4);
    assert_eq!(cues[2].start_sec, 8.3);
    assert_covering(&cues, 10.0, "faithful words");
}

/// Recognizer output in Whisper spelling deserializes
#[test]
fn test_wordTimestamp_withAlternateSpellings_shouldDeserialize() {
    let words: Vec<WordTimestamp> = serde_json::from_str(
        r#"[{"text":"你好","start":0.0,"end":0.5},{"word":"嗎","startSec":0.5,"endSec":0.7}]"#,
    )
    .unwrap();
    assert_eq!(words[0], WordTimestamp::new("你好", 0.0, 0.5));
    assert_eq!(words[1], WordTimestamp::new("嗎", 0.5, 0.7));
}
