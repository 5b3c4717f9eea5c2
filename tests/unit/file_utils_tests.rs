/*!
 * Tests for file utilities
 */

use anyhow::Result;
use narrasub::file_utils::{FileManager, FileType};
use crate::common;

/// Test output path generation
#[test]
fn test_generate_output_path_withExtension_shouldReplaceIt() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = FileManager::generate_output_path("/tmp/pages/page01.txt", temp_dir.path(), ".srt");
    assert_eq!(path, temp_dir.path().join("page01.srt"));

    let style = FileManager::generate_output_path("book", temp_dir.path(), "style.json");
    assert_eq!(style, temp_dir.path().join("book.style.json"));
}

/// Test page discovery order
#[test]
fn test_find_files_withPages_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "page02.txt", "二")?;
    common::create_test_file(temp_dir.path(), "page01.txt", "一")?;
    common::create_test_file(temp_dir.path(), "notes.md", "skip")?;
    common::create_test_file(temp_dir.path(), "page03.TXT", "三")?;

    let files = FileManager::find_files(temp_dir.path(), "txt")?;
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["page01.txt", "page02.txt", "page03.TXT"]);
    Ok(())
}

/// Test sibling audio lookup
#[test]
fn test_find_sibling_audio_withWav_shouldFindIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let page = common::create_test_file(temp_dir.path(), "page01.txt", "一")?;
    assert!(FileManager::find_sibling_audio(&page).is_none());

    let audio = common::create_test_file(temp_dir.path(), "page01.wav", "")?;
    assert_eq!(FileManager::find_sibling_audio(&page), Some(audio));
    Ok(())
}

/// Test file type detection
#[test]
fn test_detect_file_type_withKnownExtensions_shouldClassify() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let text = common::create_test_file(temp_dir.path(), "a.txt", "x")?;
    let srt = common::create_test_subtitle(temp_dir.path(), "a.srt")?;
    let words = common::create_test_file(temp_dir.path(), "a.json", "[]")?;
    let audio = common::create_test_file(temp_dir.path(), "a.MP3", "")?;
    let other = common::create_test_file(temp_dir.path(), "a.bin", "")?;

    assert_eq!(FileManager::detect_file_type(&text)?, FileType::Narration);
    assert_eq!(FileManager::detect_file_type(&srt)?, FileType::Subtitle);
    assert_eq!(FileManager::detect_file_type(&words)?, FileType::WordTimestamps);
    assert_eq!(FileManager::detect_file_type(&audio)?, FileType::Audio);
    assert_eq!(FileManager::detect_file_type(&other)?, FileType::Unknown);
    assert_eq!(FileManager::detect_file_type(temp_dir.path())?, FileType::Directory);
    assert!(FileManager::detect_file_type(temp_dir.path().join("missing.txt")).is_err());
    Ok(())
}

/// Test writing creates parent directories
#[test]
fn test_write_to_file_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("a").join("b").join("out.srt");
    FileManager::write_to_file(&path, "content")?;
    assert!(FileManager::file_exists(&path));
    assert_eq!(FileManager::read_to_string(&path)?, "content");
    assert_eq!(FileManager::read_bytes(&path)?, b"content");
    Ok(())
}
