use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::process::Command;

use crate::app_config::Config;
use crate::errors::{AppError, Degradation, ProbeError};
use crate::file_utils::{FileManager, FileType};
use crate::script;
use crate::segmentation::Segmenter;
use crate::style::{StyleDescriptor, StyleParameters};
use crate::subtitle_processor::{self, SubtitleCollection};
use crate::timing::{Allocator, Cue, WordTimestamp};
use crate::validation::{ValidationReport, ValidationService};

// @module: Application controller for narration subtitle generation

// @const: Extension of narration page files
const PAGE_EXTENSION: &str = "txt";

/// Cues built from one narration page
#[derive(Debug, Clone)]
pub struct PageResult {
    /// Timed cues, numbered from 1 within the page
    pub cues: Vec<Cue>,

    /// Audio duration the cues were allocated over
    pub duration_sec: f64,

    /// Recoverable conditions met while building the page
    pub degradations: Vec<Degradation>,
}

/// Options for one generation run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Explicit page durations in seconds, one per page
    pub durations: Option<Vec<f64>>,

    /// Audio file to probe when a single page is processed
    pub audio: Option<PathBuf>,

    /// Recognizer word timestamps for a single page
    pub words: Option<PathBuf>,

    /// Style overriding the configured one
    pub style: Option<StyleDescriptor>,

    /// Overwrite existing output
    pub force_overwrite: bool,
}

/// What a generation run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub srt_path: PathBuf,
    pub style_path: PathBuf,
    pub page_count: usize,
    pub cue_count: usize,
    pub degradation_count: usize,
    pub validation: ValidationReport,
}

/// Style file written next to the SRT output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleFile {
    pub style: StyleDescriptor,
    pub parameters: StyleParameters,
    pub force_style: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WordTimestampFile {
    Flat(Vec<WordTimestamp>),
    Segmented { segments: Vec<WordSegment> },
    Words { words: Vec<WordTimestamp> },
}

#[derive(Deserialize)]
struct WordSegment {
    #[serde(default)]
    words: Vec<WordTimestamp>,
}

/// Parse recognizer output: a word array or a Whisper-style segment list
pub fn parse_word_timestamps(content: &str) -> Result<Vec<WordTimestamp>> {
    let parsed: WordTimestampFile =
        serde_json::from_str(content).context("Failed to parse word timestamps")?;

    Ok(match parsed {
        WordTimestampFile::Flat(words) | WordTimestampFile::Words { words } => words,
        WordTimestampFile::Segmented { segments } => {
            segments.into_iter().flat_map(|s| s.words).collect()
        }
    })
}

/// Load recognizer word timestamps from a JSON file
pub fn load_word_timestamps<P: AsRef<Path>>(path: P) -> Result<Vec<WordTimestamp>> {
    let content = FileManager::read_to_string(&path)?;
    let words = parse_word_timestamps(&content)
        .with_context(|| format!("Invalid word timestamp file: {:?}", path.as_ref()))?;
    debug!("Loaded {} word timestamps", words.len());
    Ok(words)
}

/// Build cues for one page of narration bytes.
///
/// Never fails: decoding problems, conversion misses and infeasible timing are
/// returned as degradations.
pub fn build_page(
    config: &Config,
    bytes: &[u8],
    duration_sec: f64,
    words: Option<&[WordTimestamp]>,
) -> PageResult {
    let language = config.language.as_str();
    let (normalized, malformed) = script::normalize_bytes(bytes, config.should_convert(language));

    let mut degradations = Vec::new();
    if let Some(degradation) = malformed {
        degradation.log("Normalization");
        degradations.push(degradation);
    }
    if let Some(miss) = normalized.conversion_miss() {
        miss.log("Normalization");
        degradations.push(miss);
    }

    let chunks = Segmenter::new(config.segmenter_config(language)).segment(&normalized);
    let (cues, timing_degradations) = Allocator::new(config.timing.clone())
        .allocate_with_report(&chunks, duration_sec, words);
    degradations.extend(timing_degradations);

    PageResult {
        cues,
        duration_sec,
        degradations,
    }
}

/// Main application controller for subtitle generation
pub struct Controller {
    // @field: App configuration
    config: Arc<Config>,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build cues for narration text already in memory
    pub fn process_text(
        &self,
        text: &str,
        duration_sec: f64,
        words: Option<&[WordTimestamp]>,
    ) -> PageResult {
        build_page(&self.config, text.as_bytes(), duration_sec, words)
    }

    /// Measure an audio file's duration with ffprobe
    pub async fn probe_duration(&self, audio_path: &Path) -> Result<f64, ProbeError> {
        if !audio_path.is_file() {
            return Err(ProbeError::CommandFailed(format!(
                "Audio file not found: {:?}",
                audio_path
            )));
        }

        let ffprobe_future = Command::new(&self.config.probe.ffprobe_path)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(audio_path)
            .kill_on_drop(true)
            .output();

        let timeout_secs = self.config.probe.timeout_secs;
        let timeout_duration = std::time::Duration::from_secs(timeout_secs);
        let output = tokio::select! {
            result = ffprobe_future => {
                result.map_err(|e| ProbeError::CommandFailed(e.to_string()))?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(ProbeError::Timeout(timeout_secs));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("ffprobe failed: {}", stderr.trim());
            return Err(ProbeError::CommandFailed(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_probe_output(&stdout)
    }

    /// Run the generation workflow for a page file or a directory of pages
    ///
    /// Returns `None` when the output already exists and overwriting is off.
    pub async fn run(
        &self,
        input_path: PathBuf,
        output_dir: PathBuf,
        options: &RunOptions,
    ) -> Result<Option<RunSummary>> {
        let start_time = std::time::Instant::now();

        let pages = match FileManager::detect_file_type(&input_path)? {
            FileType::Directory => FileManager::find_files(&input_path, PAGE_EXTENSION)?,
            FileType::Narration => vec![input_path.clone()],
            other => {
                return Err(anyhow!(
                    "Unsupported input {:?} ({:?}), expected narration text or a directory",
                    input_path,
                    other
                ));
            }
        };
        if pages.is_empty() {
            return Err(anyhow!("No narration pages found in {:?}", input_path));
        }

        let srt_path = FileManager::generate_output_path(&input_path, &output_dir, "srt");
        let style_path = FileManager::generate_output_path(&input_path, &output_dir, "style.json");
        if srt_path.exists() && !options.force_overwrite {
            warn!("Skipping, subtitles already exist (use -f to force overwrite)");
            return Ok(None);
        }

        let durations = self.page_durations(&pages, options).await?;
        let words = match &options.words {
            Some(_) if pages.len() > 1 => {
                return Err(anyhow!("Word timestamps can only be used with a single page"));
            }
            Some(path) => Some(load_word_timestamps(path)?),
            None => None,
        };

        let results = self.process_pages(&pages, &durations, words).await?;

        let degradation_count = results.iter().map(|r| r.degradations.len()).sum();
        let page_cues: Vec<(Vec<Cue>, f64)> = results
            .into_iter()
            .map(|r| (r.cues, r.duration_sec))
            .collect();
        let cues = subtitle_processor::combine_pages(&page_cues);
        let total_duration: f64 = durations.iter().filter(|d| d.is_finite() && **d > 0.0).sum();

        let style = options.style.unwrap_or(self.config.style.style);
        let (srt, parameters) = subtitle_processor::export_with(&cues, style, &self.config.style);
        FileManager::write_to_file(&srt_path, &srt)?;

        let style_file = StyleFile {
            style,
            force_style: parameters.to_force_style(),
            parameters,
        };
        let style_json = serde_json::to_string_pretty(&style_file)
            .context("Failed to serialize style parameters")?;
        FileManager::write_to_file(&style_path, &style_json)?;

        let validation = self.validation_service().validate(&cues, Some(total_duration));
        for line in validation.issue_lines() {
            warn!("{}", line);
        }

        info!(
            "Wrote {} cues from {} page(s) to {} in {}",
            cues.len(),
            pages.len(),
            srt_path.display(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(Some(RunSummary {
            srt_path,
            style_path,
            page_count: pages.len(),
            cue_count: cues.len(),
            degradation_count,
            validation,
        }))
    }

    /// Validate an existing SRT file against the configured limits
    pub fn check_srt<P: AsRef<Path>>(
        &self,
        path: P,
        total_duration_sec: Option<f64>,
    ) -> Result<ValidationReport> {
        let subtitles = SubtitleCollection::from_srt_file(&path, &self.config.language)
            .with_context(|| format!("Failed to read subtitles: {:?}", path.as_ref()))?;
        info!("Checking {} cues in {}", subtitles.cues.len(), path.as_ref().display());
        Ok(self
            .validation_service()
            .validate(&subtitles.cues, total_duration_sec))
    }

    fn validation_service(&self) -> ValidationService {
        let max_line_chars = self
            .config
            .segmenter_config(&self.config.language)
            .max_line_chars;
        ValidationService::new(self.config.validation.clone(), max_line_chars)
    }

    async fn page_durations(&self, pages: &[PathBuf], options: &RunOptions) -> Result<Vec<f64>> {
        if let Some(durations) = &options.durations {
            if durations.len() != pages.len() {
                return Err(anyhow!(
                    "Got {} duration(s) for {} page(s)",
                    durations.len(),
                    pages.len()
                ));
            }
            return Ok(durations.clone());
        }

        let mut durations = Vec::with_capacity(pages.len());
        for page in pages {
            let audio = match (&options.audio, pages.len()) {
                (Some(audio), 1) => Some(audio.clone()),
                _ => FileManager::find_sibling_audio(page),
            };
            let audio = audio.ok_or_else(|| {
                anyhow!("No duration or audio file for page {:?}", page)
            })?;
            let duration = self
                .probe_duration(&audio)
                .await
                .map_err(AppError::from)
                .with_context(|| format!("Failed to measure duration of {:?}", audio))?;
            debug!("Probed {:?}: {:.3}s", audio, duration);
            durations.push(duration);
        }
        Ok(durations)
    }

    async fn process_pages(
        &self,
        pages: &[PathBuf],
        durations: &[f64],
        words: Option<Vec<WordTimestamp>>,
    ) -> Result<Vec<PageResult>> {
        let progress_bar = if pages.len() > 1 {
            let pb = ProgressBar::new(pages.len() as u64);
            let template_result = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            pb.set_style(template_result.progress_chars("█▓▒░"));
            pb.set_message("Segmenting pages");
            Some(pb)
        } else {
            None
        };

        let words = words.map(Arc::new);
        let mut tasks = Vec::with_capacity(pages.len());
        for (page, &duration) in pages.iter().zip(durations) {
            let bytes = FileManager::read_bytes(page)?;
            let config = Arc::clone(&self.config);
            let words = words.clone();
            let pb = progress_bar.clone();
            let name = page
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            tasks.push(tokio::task::spawn_blocking(move || {
                let result = build_page(&config, &bytes, duration, words.as_deref().map(Vec::as_slice));
                info!(
                    "Page {}: {} cue(s), {} degradation(s)",
                    name,
                    result.cues.len(),
                    result.degradations.len()
                );
                if let Some(pb) = pb {
                    pb.inc(1);
                }
                result
            }));
        }

        let mut results = Vec::with_capacity(tasks.len());
        for joined in futures::future::join_all(tasks).await {
            results.push(joined.context("Page processing task failed")?);
        }

        if let Some(pb) = progress_bar {
            pb.finish_with_message("Pages segmented");
        }
        Ok(results)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

/// Read the duration printed by ffprobe
pub fn parse_probe_output(output: &str) -> Result<f64, ProbeError> {
    let value = output.trim();
    let duration: f64 = value
        .parse()
        .map_err(|_| ProbeError::ParseError(value.to_string()))?;
    if !duration.is_finite() {
        return Err(ProbeError::ParseError(value.to_string()));
    }
    Ok(duration)
}
