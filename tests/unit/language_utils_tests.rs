/*!
 * Tests for language code utilities
 */

use narrasub::language_utils::{
    get_language_name, is_cjk_language, language_codes_match, normalize_to_part1_or_part2t,
    normalize_to_part2t, prefers_traditional, validate_language_code, LanguageCodeType,
};

/// Test language code validation
#[test]
fn test_validate_language_code_withVariousCodes_shouldIdentifyType() {
    assert_eq!(validate_language_code("zh").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("zh-TW").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("zho").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("chi").unwrap(), LanguageCodeType::Part2B);
    assert!(validate_language_code("x").is_err());
    assert!(validate_language_code("").is_err());
}

/// Test normalization in both directions
#[test]
fn test_normalize_withTags_shouldProduceIsoCodes() {
    assert_eq!(normalize_to_part2t("en-US").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("ja").unwrap(), "jpn");
    assert_eq!(normalize_to_part1_or_part2t("zho").unwrap(), "zh");
    assert!(normalize_to_part2t("qq").is_err());
}

/// Test matching across code formats
#[test]
fn test_language_codes_match_withEquivalentCodes_shouldMatch() {
    assert!(language_codes_match("zh", "zh-TW"));
    assert!(language_codes_match("chi", "zho"));
    assert!(!language_codes_match("zh", "ja"));
    assert!(!language_codes_match("zz", "zz"));
}

/// Test language names
#[test]
fn test_get_language_name_withKnownCode_shouldReturnName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("ja-JP").unwrap(), "Japanese");
}

/// Test CJK and traditional detection
#[test]
fn test_script_questions_withTags_shouldAnswer() {
    assert!(is_cjk_language("zh-CN"));
    assert!(is_cjk_language("jpn"));
    assert!(!is_cjk_language("en"));
    assert!(prefers_traditional("zh-Hant-TW"));
    assert!(prefers_traditional("zh_MO"));
    assert!(!prefers_traditional("zh-Hans"));
}
