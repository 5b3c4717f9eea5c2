/*!
 * # narrasub - narration to subtitle cues
 *
 * A Rust library that turns narration text and a known audio duration into
 * timed, readable subtitle cues.
 *
 * ## Features
 *
 * - Whitespace normalization and simplified to traditional Chinese conversion
 * - Segmentation at punctuation, then whitespace, then a hard character limit
 *   that never splits a grapheme cluster
 * - Proportional timing that covers the whole audio duration
 * - Hybrid timing anchored to recognizer word timestamps when available
 * - SRT export with renderer style parameters for burn-in
 * - Multi-page documents and SRT validation
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `script`: Script normalizer and the bundled conversion table
 * - `segmentation`: Segmentation engine producing display chunks
 * - `timing`: Timing allocator:
 *   - `timing::proportional`: Weight-based allocation
 *   - `timing::hybrid`: Word timestamp alignment
 * - `subtitle_processor`: SRT export, read-back and page assembly
 * - `style`: Style descriptors and renderer parameters
 * - `validation`: Timecode and line length checks
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Degradations and error types for the application
 *
 * ## Example
 *
 * ```
 * use narrasub::{normalize, segment, allocate, export, StyleDescriptor};
 *
 * let text = normalize("今天天氣很好。我們去公園玩，你呢？", true);
 * let chunks = segment(&text, 25);
 * let cues = allocate(&chunks, 10.0, None);
 * let (srt, style) = export(&cues, StyleDescriptor::Default);
 *
 * assert_eq!(cues.len(), 3);
 * assert!(srt.starts_with("1\n00:00:00,000 --> "));
 * assert_eq!(style.font_size, 18);
 * ```
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod script;
pub mod segmentation;
pub mod style;
pub mod subtitle_processor;
pub mod timing;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, Degradation, ProbeError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use script::{normalize, NormalizedText};
pub use segmentation::{reconstruct, segment, Chunk, Segmenter, SegmenterConfig};
pub use style::{StyleDescriptor, StyleParameters};
pub use subtitle_processor::{export, SubtitleCollection};
pub use timing::{allocate, Allocator, Cue, TimingConfig, TimingSource, WordTimestamp};
