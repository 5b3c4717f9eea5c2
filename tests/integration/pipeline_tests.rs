/*!
 * End-to-end tests of the narration to SRT pipeline
 */

use narrasub::script::normalize;
use narrasub::segmentation::{reconstruct, segment};
use narrasub::style::StyleDescriptor;
use narrasub::subtitle_processor::{export, SubtitleCollection};
use narrasub::timing::{allocate, TimingSource};
use narrasub::validation::{ValidationConfig, ValidationService};
use crate::common;

const EXAMPLE_SRT: &str = "1\n00:00:00,000 --> 00:00:04,118\n今天天氣很好。\n\n2\n00:00:04,118 --> 00:00:08,235\n我們去公園玩，\n\n3\n00:00:08,235 --> 00:00:10,000\n你呢？\n\n";

/// Example 1 from text to SRT
#[test]
fn test_pipeline_withExampleNarration_shouldProduceExpectedSrt() {
    let text = normalize(common::EXAMPLE_NARRATION, true);
    let chunks = segment(&text, 25);
    let cues = allocate(&chunks, 10.0, None);
    let (srt, params) = export(&cues, StyleDescriptor::Default);

    assert_eq!(srt, EXAMPLE_SRT);
    assert_eq!(params.font_name, "Noto Sans CJK TC");
    assert_eq!(params.font_size, 18);
}

/// Example 2 from text to cues
#[test]
fn test_pipeline_withUnpunctuatedRun_shouldSplitIntoTwoCues() {
    let text = normalize(&"好".repeat(30), true);
    let chunks = segment(&text, 25);
    let cues = allocate(&chunks, 6.0, None);

    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].text.chars().count(), 25);
    assert!((cues[0].duration() - 5.0).abs() < 1e-9);
    assert_eq!(cues[1].end_sec, 6.0);
}

/// Example 3 from simplified text to traditional cues
#[test]
fn test_pipeline_withSimplifiedNarration_shouldShowTraditional() {
    let text = normalize("这是简体中文。", true);
    let cues = allocate(&segment(&text, 25), 2.0, None);
    assert_eq!(cues[0].text, "這是簡體中文。");
}

/// Example 4: zero-length audio gives an empty document
#[test]
fn test_pipeline_withZeroDuration_shouldExportNothing() {
    let text = normalize(common::EXAMPLE_NARRATION, true);
    let cues = allocate(&segment(&text, 25), 0.0, None);
    let (srt, _) = export(&cues, StyleDescriptor::Default);
    assert!(cues.is_empty());
    assert!(srt.is_empty());
}

/// Generated cues pass validation and read back from SRT
#[test]
fn test_pipeline_withRandomNarration_shouldValidateAndReadBack() {
    let service = ValidationService::new(
        ValidationConfig {
            max_chars_per_second: f64::INFINITY,
            ..ValidationConfig::default()
        },
        25,
    );

    for seed in 0..50 {
        let text = normalize(&common::random_narration(seed, 60), true);
        let chunks = segment(&text, 25);
        assert_eq!(reconstruct(&text, &chunks), text.text);
        if chunks.is_empty() {
            continue;
        }

        let cues = allocate(&chunks, 30.0, None);
        let report = service.validate(&cues, Some(30.0));
        assert!(
            report.timecodes.as_ref().is_some_and(|r| r.overlap_count == 0),
            "seed {}",
            seed
        );

        let (srt, _) = export(&cues, StyleDescriptor::Boxed);
        let parsed = SubtitleCollection::parse_srt_string(&srt).unwrap();
        assert_eq!(parsed.len(), cues.len(), "seed {}", seed);
        assert!(parsed.iter().all(|c| c.timing == TimingSource::Proportional));
    }
}
