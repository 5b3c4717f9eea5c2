use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::style::{StyleConfig, StyleDescriptor, StyleParameters};
use crate::timing::{Cue, TimingSource};

// @module: SRT export, read-back and page assembly

// @const: SRT timestamp regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2,}):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d{2,}):(\d{2}):(\d{2})[,.](\d{3})").unwrap()
});

// @const: Reserved SRT token and its replacement inside cue text
const RESERVED_ARROW: &str = "-->";
const ARROW_REPLACEMENT: &str = "→";

// @const: Shown for cues whose text is empty
const NO_BREAK_SPACE: &str = "\u{00A0}";

/// Round seconds to whole milliseconds, clamping negatives to zero
pub fn seconds_to_ms(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    }
}

/// Format seconds as an SRT timestamp (HH:MM:SS,mmm)
pub fn format_timestamp(seconds: f64) -> String {
    format_ms(seconds_to_ms(seconds))
}

fn format_ms(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Parse an SRT timestamp into seconds
pub fn parse_timestamp(timestamp: &str) -> Result<f64> {
    let parts: Vec<&str> = timestamp.trim().split(&[':', ',', '.'][..]).collect();

    if parts.len() != 4 {
        return Err(anyhow!("Invalid timestamp format: {}", timestamp));
    }

    let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
    let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
    let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
    let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

    if minutes >= 60 || seconds >= 60 || millis >= 1000 {
        return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
    }

    let total_ms = hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis;
    Ok(total_ms as f64 / 1000.0)
}

/// Make cue text safe for an SRT block.
///
/// The reserved arrow is replaced, blank lines are dropped and an empty text
/// becomes a no-break space so the block keeps its shape.
pub fn sanitize_cue_text(text: &str) -> String {
    let replaced = text.replace(RESERVED_ARROW, ARROW_REPLACEMENT);
    let lines: Vec<&str> = replaced
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.is_empty() {
        NO_BREAK_SPACE.to_string()
    } else {
        lines.join("\n")
    }
}

/// SRT block for a cue
pub struct SrtBlock<'a>(pub &'a Cue);

impl fmt::Display for SrtBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cue = self.0;
        // Sub-millisecond cues still get an end after their start
        let start_ms = seconds_to_ms(cue.start_sec);
        let end_ms = seconds_to_ms(cue.end_sec).max(start_ms + 1);

        writeln!(f, "{}", cue.index)?;
        writeln!(f, "{} --> {}", format_ms(start_ms), format_ms(end_ms))?;
        writeln!(f, "{}", sanitize_cue_text(&cue.text))?;
        writeln!(f)
    }
}

/// Render cues as an SRT stream
pub fn to_srt_string(cues: &[Cue]) -> String {
    cues.iter().map(|cue| SrtBlock(cue).to_string()).collect()
}

/// Export cues as SRT together with the renderer parameters for `style`
pub fn export(cues: &[Cue], style: StyleDescriptor) -> (String, StyleParameters) {
    export_with(cues, style, &StyleConfig::default())
}

/// Export cues applying the configured font overrides
pub fn export_with(
    cues: &[Cue],
    style: StyleDescriptor,
    config: &StyleConfig,
) -> (String, StyleParameters) {
    debug!("Exporting {} cues with style {}", cues.len(), style);
    (to_srt_string(cues), config.resolve(style))
}

/// Concatenate per-page cues into one document.
///
/// Each page is shifted by the summed durations of the pages before it and
/// indices are renumbered from 1.
pub fn combine_pages(pages: &[(Vec<Cue>, f64)]) -> Vec<Cue> {
    let mut combined = Vec::with_capacity(pages.iter().map(|(cues, _)| cues.len()).sum());
    let mut page_start = 0.0;

    for (cues, duration) in pages {
        for cue in cues {
            combined.push(Cue {
                index: combined.len() + 1,
                start_sec: cue.start_sec + page_start,
                end_sec: cue.end_sec + page_start,
                text: cue.text.clone(),
                timing: cue.timing,
            });
        }
        if duration.is_finite() && *duration > 0.0 {
            page_start += duration;
        }
    }

    combined
}

/// Collection of cues with metadata
#[derive(Debug, Clone)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// Timed cues
    pub cues: Vec<Cue>,

    /// Language tag of the text
    pub language: String,
}

impl SubtitleCollection {
    /// Create an empty collection
    pub fn new(source_file: PathBuf, language: String) -> Self {
        SubtitleCollection {
            source_file,
            cues: Vec::new(),
            language,
        }
    }

    /// Create a collection holding the given cues
    pub fn from_cues(source_file: PathBuf, language: String, cues: Vec<Cue>) -> Self {
        SubtitleCollection {
            source_file,
            cues,
            language,
        }
    }

    /// Load an SRT file
    pub fn from_srt_file<P: AsRef<Path>>(path: P, language: &str) -> Result<Self> {
        let path = path.as_ref();
        let cues = Self::parse_srt_file(path)?;
        Ok(Self::from_cues(path.to_path_buf(), language.to_string(), cues))
    }

    /// Render the collection as an SRT stream
    pub fn to_srt_string(&self) -> String {
        to_srt_string(&self.cues)
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        for cue in &self.cues {
            write!(file, "{}", SrtBlock(cue))?;
        }

        Ok(())
    }

    /// Shift every cue by `seconds`, dropping time that falls before zero
    pub fn offset(&mut self, seconds: f64) {
        for cue in &mut self.cues {
            cue.start_sec = (cue.start_sec + seconds).max(0.0);
            cue.end_sec = (cue.end_sec + seconds).max(0.0);
        }
    }

    /// End of the last cue in seconds
    pub fn duration(&self) -> f64 {
        self.cues.last().map(|c| c.end_sec).unwrap_or(0.0)
    }

    fn parse_srt_file(path: &Path) -> Result<Vec<Cue>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;
        Self::parse_srt_string(&content)
    }

    /// Parse SRT content into cues.
    ///
    /// Malformed blocks are skipped with a warning. Cues come back sorted by
    /// start time and renumbered; their timing source is unknown and reported
    /// as proportional.
    pub fn parse_srt_string(content: &str) -> Result<Vec<Cue>> {
        let mut cues = Vec::new();

        let mut current_index: Option<usize> = None;
        let mut current_times: Option<(f64, f64)> = None;
        let mut current_text = String::new();

        let finish = |index: usize, (start, end): (f64, f64), text: &str, cues: &mut Vec<Cue>| {
            if end <= start {
                warn!("Skipping subtitle entry {} with invalid time range", index);
                return;
            }
            let text = trim_keep_nbsp(text);
            if text.is_empty() {
                warn!("Skipping empty subtitle entry {}", index);
                return;
            }
            cues.push(Cue {
                index,
                start_sec: start,
                end_sec: end,
                text: text.to_string(),
                timing: TimingSource::Proportional,
            });
        };

        for (line_number, line) in content.lines().enumerate() {
            let trimmed = trim_keep_nbsp(line.trim_start_matches('\u{FEFF}'));

            if trimmed.is_empty() {
                if let (Some(index), Some(times)) = (current_index, current_times) {
                    if !current_text.is_empty() {
                        finish(index, times, &current_text, &mut cues);
                        current_index = None;
                        current_times = None;
                        current_text.clear();
                    }
                }
                continue;
            }

            if current_index.is_none() && current_text.is_empty() {
                if let Ok(num) = trimmed.parse::<usize>() {
                    current_index = Some(num);
                    continue;
                }
            }

            if current_index.is_some() && current_times.is_none() {
                if let Some(caps) = TIMESTAMP_REGEX.captures(trimmed) {
                    current_times = Some((captured_seconds(&caps, 1), captured_seconds(&caps, 5)));
                    continue;
                }
            }

            if current_index.is_some() && current_times.is_some() {
                if !current_text.is_empty() {
                    current_text.push('\n');
                }
                current_text.push_str(trimmed);
            } else {
                warn!(
                    "Unexpected text at line {} before sequence number or timestamp: {}",
                    line_number + 1,
                    trimmed
                );
            }
        }

        if let (Some(index), Some(times)) = (current_index, current_times) {
            if !current_text.is_empty() {
                finish(index, times, &current_text, &mut cues);
            }
        }

        if cues.is_empty() {
            return Err(anyhow!("No valid subtitle entries were found in the SRT content"));
        }

        cues.sort_by(|a, b| a.start_sec.total_cmp(&b.start_sec));

        let overlap_count = cues
            .windows(2)
            .filter(|pair| pair[0].end_sec > pair[1].start_sec)
            .count();
        if overlap_count > 0 {
            warn!("Found {} overlapping subtitle entries", overlap_count);
        }

        for (i, cue) in cues.iter_mut().enumerate() {
            cue.index = i + 1;
        }

        Ok(cues)
    }
}

// A lone no-break space stands for an empty cue and must survive trimming
fn trim_keep_nbsp(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() && c != '\u{00A0}')
}

fn captured_seconds(caps: &regex::Captures, start_idx: usize) -> f64 {
    let field = |offset: usize| -> u64 {
        caps.get(start_idx + offset)
            .map_or(0, |m| m.as_str().parse().unwrap_or(0))
    };
    let ms = (field(0) * 3600 + field(1) * 60 + field(2)) * 1000 + field(3);
    ms as f64 / 1000.0
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Language: {}", self.language)?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        Ok(())
    }
}
