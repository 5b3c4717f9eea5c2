/*!
 * Tests for reading, checking and rewriting SRT files
 */

use anyhow::Result;
use std::fs;

use narrasub::app_controller::Controller;
use narrasub::subtitle_processor::SubtitleCollection;
use crate::common;

/// Generated subtitles pass the check against their audio duration
#[test]
fn test_checkSrt_withGeneratedSubtitles_shouldPass() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_subtitle(temp_dir.path(), "page.srt")?;

    let controller = Controller::new_for_test()?;
    let report = controller.check_srt(&srt, Some(10.0))?;

    assert!(report.passed);
    assert_eq!(report.total_issues(), 0);
    assert!(report.issue_lines().is_empty());
    Ok(())
}

/// Cues that stop short of the audio are reported
#[test]
fn test_checkSrt_withLongerAudio_shouldReportCoverage() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_subtitle(temp_dir.path(), "page.srt")?;

    let controller = Controller::new_for_test()?;
    let report = controller.check_srt(&srt, Some(12.0))?;

    assert!(!report.passed);
    let error = report.timecodes.as_ref().and_then(|t| t.coverage_error_sec).unwrap();
    assert!((error + 2.0).abs() < 1e-6);
    assert!(report.issue_lines().iter().any(|l| l.contains("-2.000s")));
    Ok(())
}

/// Overlapping and overlong cues fail the check
#[test]
fn test_checkSrt_withHandEditedSubtitles_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = format!(
        "1\n00:00:00,000 --> 00:00:05,000\n{}\n\n2\n00:00:04,000 --> 00:00:06,000\n你呢？\n\n",
        "好".repeat(30)
    );
    let srt = common::create_test_file(temp_dir.path(), "edited.srt", &content)?;

    let controller = Controller::new_for_test()?;
    let report = controller.check_srt(&srt, None)?;

    assert!(!report.passed);
    assert_eq!(report.timecodes.as_ref().map(|t| t.overlap_count), Some(1));
    assert_eq!(report.lengths.as_ref().map(|l| l.total_issues), Some(1));
    Ok(())
}

/// A missing file is an error, not an empty report
#[test]
fn test_checkSrt_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;
    assert!(controller.check_srt(temp_dir.path().join("none.srt"), None).is_err());
    Ok(())
}

/// Shifted subtitles keep their text and move in time
#[test]
fn test_writeToSrt_withOffset_shouldShiftCues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_subtitle(temp_dir.path(), "page.srt")?;

    let mut collection = SubtitleCollection::from_srt_file(&srt, "zh-TW")?;
    collection.offset(2.5);
    let shifted_path = temp_dir.path().join("nested").join("shifted.srt");
    collection.write_to_srt(&shifted_path)?;

    let content = fs::read_to_string(&shifted_path)?;
    assert!(content.starts_with("1\n00:00:02,500 --> 00:00:06,618\n今天天氣很好。\n"));

    let reloaded = SubtitleCollection::from_srt_file(&shifted_path, "zh-TW")?;
    assert_eq!(reloaded.cues.len(), 3);
    assert_eq!(reloaded.duration(), 12.5);
    Ok(())
}
