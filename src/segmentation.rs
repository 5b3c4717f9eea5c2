/*!
 * Segmentation of normalized narration into display chunks.
 *
 * Text is first split after sentence and clause punctuation, then any piece
 * still wider than the line limit is hard-split on grapheme cluster
 * boundaries, preferring whitespace. Chunks keep their char offset inside the
 * normalized text so the input can always be rebuilt with [`reconstruct`].
 */

use log::debug;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::script::NormalizedText;

// @const: Default maximum characters per subtitle line
pub const DEFAULT_MAX_LINE_CHARS: usize = 25;

// @const: Closing quotes and brackets that stay with the preceding punctuation
const CLOSING_MARKS: &[char] = &[
    '」', '』', '”', '’', '"', '\'', ')', '）', ']', '］', '】', '》', '〉', '〕', '}', '｝',
];

// @struct: Punctuation marks that end a piece
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunctuationSet {
    // @field: Sentence-terminal marks
    pub sentence: Vec<char>,

    // @field: Clause marks
    pub clause: Vec<char>,
}

impl PunctuationSet {
    /// Full-width marks used in Chinese and Japanese text
    pub fn cjk() -> Self {
        PunctuationSet {
            sentence: vec!['。', '！', '？', '…', '｡', '．'],
            clause: vec!['，', '、', '；', '：'],
        }
    }

    /// ASCII marks used in Latin-script text
    pub fn latin() -> Self {
        PunctuationSet {
            sentence: vec!['.', '!', '?', '…'],
            clause: vec![',', ';', ':'],
        }
    }

    /// Check whether a character ends a sentence
    pub fn is_sentence_end(&self, c: char) -> bool {
        self.sentence.contains(&c)
    }

    /// Check whether a character is a break point of any kind
    pub fn is_break(&self, c: char) -> bool {
        self.sentence.contains(&c) || self.clause.contains(&c)
    }

    /// Check whether a character counts as punctuation for orphan avoidance
    pub fn is_punctuation(&self, c: char) -> bool {
        self.is_break(c)
            || CLOSING_MARKS.contains(&c)
            || c.is_ascii_punctuation()
            || matches!(c as u32, 0x2010..=0x2027 | 0x3000..=0x303F | 0xFF01..=0xFF0F | 0xFF1A..=0xFF20 | 0xFF5B..=0xFF65)
    }
}

impl Default for PunctuationSet {
    fn default() -> Self {
        let mut set = Self::cjk();
        for c in Self::latin().sentence {
            if !set.sentence.contains(&c) {
                set.sentence.push(c);
            }
        }
        set.clause.extend(Self::latin().clause);
        set
    }
}

// @struct: One displayable unit of narration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    // @field: 0-based position in the segment
    pub order: usize,

    // @field: Chunk text
    pub text: String,

    // @field: Number of Unicode scalar values
    pub char_count: usize,

    // @field: Char offset inside the normalized text
    pub offset: usize,
}

impl Chunk {
    /// Create a chunk, counting its characters
    pub fn new(order: usize, text: impl Into<String>, offset: usize) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        Chunk {
            order,
            text,
            char_count,
            offset,
        }
    }

    /// Char offset just past the end of the chunk
    pub fn end(&self) -> usize {
        self.offset + self.char_count
    }
}

// @struct: Segmentation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Maximum characters per chunk; 0 is treated as 1
    pub max_line_chars: usize,

    /// Chunks shorter than this are merged into their successor; 0 disables merging
    #[serde(default)]
    pub min_chunk_chars: usize,

    /// Break punctuation
    #[serde(default)]
    pub punctuation: PunctuationSet,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        SegmenterConfig {
            max_line_chars: DEFAULT_MAX_LINE_CHARS,
            min_chunk_chars: 0,
            punctuation: PunctuationSet::default(),
        }
    }
}

impl SegmenterConfig {
    pub fn with_max_line_chars(max_line_chars: usize) -> Self {
        SegmenterConfig {
            max_line_chars,
            ..Self::default()
        }
    }
}

/// Splits normalized text into chunks
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

type Span = (usize, usize);

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Segmenter { config }
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    fn max_chars(&self) -> usize {
        self.config.max_line_chars.max(1)
    }

    /// Segment normalized text into ordered chunks
    pub fn segment(&self, text: &NormalizedText) -> Vec<Chunk> {
        let chars: Vec<char> = text.text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let max = self.max_chars();
        let mut spans = Vec::new();

        for (start, end) in self.split_pieces(&chars) {
            let Some((start, end)) = trim_span(&chars, start, end) else {
                continue;
            };

            if end - start <= max {
                spans.push((start, end));
            } else {
                debug!(
                    "Piece at offset {} has {} chars, hard-splitting at {}",
                    start,
                    end - start,
                    max
                );
                spans.extend(self.hard_split(&chars, start, end));
            }
        }

        let spans = self.merge_short(spans);

        let chunks: Vec<Chunk> = spans
            .into_iter()
            .enumerate()
            .map(|(order, (start, end))| Chunk {
                order,
                text: chars[start..end].iter().collect(),
                char_count: end - start,
                offset: start,
            })
            .collect();

        debug!(
            "Segmented {} chars into {} chunks (max {} per line)",
            chars.len(),
            chunks.len(),
            max
        );
        chunks
    }

    // Split after every maximal run of break marks and any closing marks that follow
    fn split_pieces(&self, chars: &[char]) -> Vec<Span> {
        let mut pieces = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            if !self.is_break_at(chars, i) {
                i += 1;
                continue;
            }

            let mut end = i + 1;
            while end < chars.len() && self.is_break_at(chars, end) {
                end += 1;
            }
            while end < chars.len() && CLOSING_MARKS.contains(&chars[end]) {
                end += 1;
            }

            pieces.push((start, end));
            start = end;
            i = end;
        }

        if start < chars.len() {
            pieces.push((start, chars.len()));
        }
        pieces
    }

    fn is_break_at(&self, chars: &[char], i: usize) -> bool {
        let c = chars[i];
        if !self.config.punctuation.is_break(c) {
            return false;
        }

        // 3.14, 1,000 and 10:30 stay whole
        let between_digits = i > 0
            && i + 1 < chars.len()
            && chars[i - 1].is_ascii_digit()
            && chars[i + 1].is_ascii_digit();
        !(matches!(c, '.' | ',' | ':') && between_digits)
    }

    fn hard_split(&self, chars: &[char], start: usize, end: usize) -> Vec<Span> {
        let max = self.max_chars();
        let piece: String = chars[start..end].iter().collect();

        // Absolute char offset of every grapheme boundary
        let mut bounds = Vec::with_capacity(piece.len() + 1);
        bounds.push(start);
        for grapheme in piece.graphemes(true) {
            let last = bounds[bounds.len() - 1];
            bounds.push(last + grapheme.chars().count());
        }
        let count = bounds.len() - 1;
        let width = |g: usize| bounds[g + 1] - bounds[g];
        let is_space = |g: usize| chars[bounds[g]].is_whitespace();

        let mut spans = Vec::new();
        let mut g = 0;

        while g < count {
            if is_space(g) {
                g += 1;
                continue;
            }

            let mut j = g;
            let mut used = 0;
            while j < count && used + width(j) <= max {
                used += width(j);
                j += 1;
            }

            if j == g {
                debug!(
                    "Grapheme at offset {} is wider than the line limit, emitting it alone",
                    bounds[g]
                );
                spans.push((bounds[g], bounds[g + 1]));
                g += 1;
                continue;
            }

            let mut cut = j;
            let mut next = j;
            if j < count {
                let rest: Vec<char> = (bounds[j]..bounds[count])
                    .map(|i| chars[i])
                    .filter(|c| !c.is_whitespace())
                    .collect();
                let rest_is_punctuation =
                    rest.iter().all(|&c| self.config.punctuation.is_punctuation(c));
                // Back off only when the carried grapheme is text and the
                // next line can hold it together with the punctuation
                let carried_is_text = (bounds[j - 1]..bounds[j])
                    .any(|i| !self.config.punctuation.is_punctuation(chars[i]));
                if rest_is_punctuation
                    && carried_is_text
                    && j - g > 1
                    && rest.len() + width(j - 1) <= max
                {
                    cut = j - 1;
                    next = j - 1;
                }

                if let Some(space) = (g + 1..=cut).rev().find(|&k| k < count && is_space(k)) {
                    cut = space;
                    next = space + 1;
                }
            }

            if let Some(span) = trim_span(chars, bounds[g], bounds[cut]) {
                spans.push(span);
            }
            g = next;
        }

        spans
    }

    fn merge_short(&self, spans: Vec<Span>) -> Vec<Span> {
        let min = self.config.min_chunk_chars;
        if min == 0 {
            return spans;
        }

        let max = self.max_chars();
        let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
        for span in spans {
            if let Some(last) = merged.last_mut() {
                if last.1 - last.0 < min && span.1 - last.0 <= max {
                    last.1 = span.1;
                    continue;
                }
            }
            merged.push(span);
        }
        merged
    }
}

fn trim_span(chars: &[char], mut start: usize, mut end: usize) -> Option<Span> {
    while start < end && chars[start].is_whitespace() {
        start += 1;
    }
    while end > start && chars[end - 1].is_whitespace() {
        end -= 1;
    }
    (start < end).then_some((start, end))
}

/// Segment text with the default punctuation set
pub fn segment(text: &NormalizedText, max_line_chars: usize) -> Vec<Chunk> {
    Segmenter::new(SegmenterConfig::with_max_line_chars(max_line_chars)).segment(text)
}

/// Rebuild the normalized text from its chunks.
///
/// Separators dropped between chunks are copied back from `text`.
pub fn reconstruct(text: &NormalizedText, chunks: &[Chunk]) -> String {
    let chars: Vec<char> = text.text.chars().collect();
    let mut result = String::with_capacity(text.text.len());
    let mut cursor = 0;

    for chunk in chunks {
        let gap_end = chunk.offset.min(chars.len());
        if gap_end > cursor {
            result.extend(&chars[cursor..gap_end]);
        }
        result.push_str(&chunk.text);
        cursor = chunk.end();
    }

    if cursor < chars.len() {
        result.extend(&chars[cursor..]);
    }
    result
}
