use anyhow::{anyhow, Result};
use isolang::Language;

/// Language utilities for narration language tags
///
/// Tags may carry a region or script subtag (`zh-TW`, `zh_Hant`, `en-US`);
/// only the primary subtag is an ISO 639 code. These helpers validate and
/// normalize that code and answer the script questions the pipeline asks.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

// @const: ISO 639-2/B codes and their 639-2/T equivalents
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("chi", "zho"),
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("cze", "ces"),
    ("bur", "mya"),
    ("per", "fas"),
    ("may", "msa"),
    ("tib", "bod"),
];

// @const: Region and script subtags written in traditional characters
const TRADITIONAL_SUBTAGS: &[&str] = &["tw", "hk", "mo", "hant"];

fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    PART2B_TO_PART2T
        .iter()
        .find(|(b, _)| *b == code)
        .map(|(_, t)| *t)
}

/// Primary language subtag of a tag, lowercased
pub fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Validate the primary subtag as an ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(tag: &str) -> Result<LanguageCodeType> {
    let code = primary_subtag(tag);

    match code.len() {
        2 if Language::from_639_1(&code).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&code).is_some() => Ok(LanguageCodeType::Part2T),
        3 if part2b_to_part2t(&code).is_some() => Ok(LanguageCodeType::Part2B),
        _ => Err(anyhow!("Invalid language code: {}", tag)),
    }
}

fn to_language(tag: &str) -> Result<Language> {
    let code = primary_subtag(tag);
    let language = match code.len() {
        2 => Language::from_639_1(&code),
        3 => Language::from_639_3(part2b_to_part2t(&code).unwrap_or(code.as_str())),
        _ => None,
    };
    language.ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", tag))
}

/// Normalize a tag to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(tag: &str) -> Result<String> {
    Ok(to_language(tag)?.to_639_3().to_string())
}

/// Normalize a tag to ISO 639-1 (2-letter) format if possible
/// Falls back to ISO 639-2/T if no ISO 639-1 code exists
pub fn normalize_to_part1_or_part2t(tag: &str) -> Result<String> {
    let language = to_language(tag)?;
    Ok(language
        .to_639_1()
        .unwrap_or_else(|| language.to_639_3())
        .to_string())
}

/// Check if two tags name the same language
pub fn language_codes_match(tag1: &str, tag2: &str) -> bool {
    match (normalize_to_part2t(tag1), normalize_to_part2t(tag2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name for a tag
pub fn get_language_name(tag: &str) -> Result<String> {
    Ok(to_language(tag)?.to_name().to_string())
}

/// Whether the language is written without spaces in CJK characters
pub fn is_cjk_language(tag: &str) -> bool {
    matches!(
        normalize_to_part2t(tag).as_deref(),
        Ok("zho" | "jpn" | "yue" | "cmn")
    )
}

/// Whether the tag asks for traditional Chinese characters
pub fn prefers_traditional(tag: &str) -> bool {
    let lowered = tag.trim().to_lowercase();
    let mut subtags = lowered.split(['-', '_']);
    let Some(primary) = subtags.next() else {
        return false;
    };
    language_codes_match(primary, "zh") && subtags.any(|s| TRADITIONAL_SUBTAGS.contains(&s))
}
