use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::language_utils;
use crate::segmentation::{PunctuationSet, SegmenterConfig, DEFAULT_MAX_LINE_CHARS};
use crate::style::{StyleConfig, StyleDescriptor};
use crate::timing::TimingConfig;
use crate::validation::ValidationConfig;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and resolving per-language settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language tag of the narration (e.g. "zh-TW", "en")
    #[serde(default = "default_language")]
    pub language: String,

    /// Convert simplified characters to traditional ones
    #[serde(default = "default_true")]
    pub convert_to_traditional: bool,

    /// Segmentation defaults for languages without a profile
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Timing allocation settings
    #[serde(default)]
    pub timing: TimingConfig,

    /// Per-language overrides
    #[serde(default = "default_language_profiles")]
    pub language_profiles: Vec<LanguageProfile>,

    /// Subtitle style and font
    #[serde(default)]
    pub style: StyleConfig,

    /// Cue validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Audio duration probing
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Global segmentation settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SegmentationConfig {
    /// Maximum characters per cue line
    #[serde(default = "default_max_line_chars")]
    pub max_line_chars: usize,

    /// Chunks shorter than this are merged with the next one (0 = off)
    #[serde(default)]
    pub min_chunk_chars: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            max_line_chars: default_max_line_chars(),
            min_chunk_chars: 0,
        }
    }
}

/// Settings applied to one language
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LanguageProfile {
    // @field: Primary language subtag this profile applies to
    pub language: String,

    // @field: Maximum characters per cue line
    pub max_line_chars: usize,

    // @field: Break punctuation
    #[serde(default)]
    pub punctuation: PunctuationSet,

    // @field: Overrides the global conversion flag
    #[serde(default)]
    pub convert_to_traditional: Option<bool>,
}

impl LanguageProfile {
    pub fn cjk(language: &str, convert_to_traditional: Option<bool>) -> Self {
        Self {
            language: language.to_string(),
            max_line_chars: DEFAULT_MAX_LINE_CHARS,
            punctuation: PunctuationSet::cjk(),
            convert_to_traditional,
        }
    }

    pub fn latin(language: &str, max_line_chars: usize) -> Self {
        Self {
            language: language.to_string(),
            max_line_chars,
            punctuation: PunctuationSet::latin(),
            convert_to_traditional: Some(false),
        }
    }
}

/// Settings for the external duration probe
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProbeConfig {
    /// ffprobe executable
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: String,

    /// Probe timeout in seconds
    #[serde(default = "default_probe_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: default_ffprobe_path(),
            timeout_secs: default_probe_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "zh-TW".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_line_chars() -> usize {
    DEFAULT_MAX_LINE_CHARS
}

fn default_language_profiles() -> Vec<LanguageProfile> {
    vec![
        LanguageProfile::cjk("zh", None),
        LanguageProfile::cjk("ja", Some(false)),
        LanguageProfile::latin("en", 42),
    ]
}

fn default_ffprobe_path() -> String {
    "ffprobe".to_string()
}

fn default_probe_timeout_secs() -> u64 {
    60
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        language_utils::get_language_name(&self.language)?;

        if self.segmentation.max_line_chars == 0 {
            return Err(anyhow!("segmentation.max_line_chars must be positive"));
        }

        for profile in &self.language_profiles {
            language_utils::get_language_name(&profile.language)
                .map_err(|e| anyhow!("Invalid language profile: {}", e))?;
            if profile.max_line_chars == 0 {
                return Err(anyhow!(
                    "max_line_chars must be positive for language profile '{}'",
                    profile.language
                ));
            }
        }

        let timing = &self.timing;
        if !timing.min_cue_duration_sec.is_finite() || timing.min_cue_duration_sec < 0.0 {
            return Err(anyhow!("timing.min_cue_duration_sec must not be negative"));
        }
        if !timing.alignment_tolerance.is_finite() || timing.alignment_tolerance < 0.0 {
            return Err(anyhow!("timing.alignment_tolerance must not be negative"));
        }

        if self.probe.timeout_secs == 0 {
            return Err(anyhow!("probe.timeout_secs must be positive"));
        }

        // Any style can be picked on the command line
        for style in StyleDescriptor::all() {
            style
                .parameters(&self.style.font_name, self.style.font_size)
                .validate()
                .map_err(|e| anyhow!("Invalid style settings for '{}': {}", style, e))?;
        }

        Ok(())
    }

    /// Profile matching the primary subtag of `language`
    pub fn profile_for(&self, language: &str) -> Option<&LanguageProfile> {
        self.language_profiles
            .iter()
            .find(|p| language_utils::language_codes_match(&p.language, language))
    }

    /// Whether narration in `language` is converted to traditional characters
    ///
    /// A profile flag wins, then a traditional-script region tag, then the
    /// global flag.
    pub fn should_convert(&self, language: &str) -> bool {
        if let Some(flag) = self.profile_for(language).and_then(|p| p.convert_to_traditional) {
            return flag;
        }
        language_utils::prefers_traditional(language) || self.convert_to_traditional
    }

    /// Segmentation settings for `language`
    pub fn segmenter_config(&self, language: &str) -> SegmenterConfig {
        let (max_line_chars, punctuation) = match self.profile_for(language) {
            Some(profile) => (profile.max_line_chars, profile.punctuation.clone()),
            None if language_utils::is_cjk_language(language) => {
                (self.segmentation.max_line_chars, PunctuationSet::cjk())
            }
            None => (self.segmentation.max_line_chars, PunctuationSet::default()),
        };

        SegmenterConfig {
            max_line_chars,
            min_chunk_chars: self.segmentation.min_chunk_chars,
            punctuation,
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            convert_to_traditional: true,
            segmentation: SegmentationConfig::default(),
            timing: TimingConfig::default(),
            language_profiles: default_language_profiles(),
            style: StyleConfig::default(),
            validation: ValidationConfig::default(),
            probe: ProbeConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
