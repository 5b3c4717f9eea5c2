/*!
 * Hybrid timing against recognizer word timestamps.
 *
 * Chunk text and recognized words are compared on their alphanumeric
 * characters only. Each chunk's character range is mapped onto the word
 * stream; when the span of the overlapping words is close to the chunk's
 * proportional estimate the chunk is anchored to it. Chunks between anchors
 * share the remaining room proportionally, and the result always covers the
 * full duration.
 */

use log::{debug, info};

use super::proportional::{self, chunk_weights, distribute, estimate_durations};
use super::{Cue, TimingConfig, TimingSource, WordTimestamp};
use crate::errors::Degradation;
use crate::segmentation::Chunk;

// @const: Minimum room per chunk between two anchors, in seconds
const MIN_RUN_SLICE_SEC: f64 = 0.1;

// @const: Tolerated overlap between consecutive anchors
const ANCHOR_OVERLAP_EPSILON: f64 = 1e-6;

/// Characters used to match chunk text against recognized words
pub fn comparable_chars(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
}

pub fn comparable_len(text: &str) -> usize {
    comparable_chars(text).count()
}

/// Repair or drop malformed word timestamps.
///
/// Non-finite and inverted entries are dropped, negative starts and ends past
/// the duration are clamped, and overlapping words are trimmed so the stream
/// is ordered and disjoint. Returns the usable words and the number dropped.
pub fn sanitize_words(words: &[WordTimestamp], total_duration_sec: f64) -> (Vec<WordTimestamp>, usize) {
    let mut usable: Vec<WordTimestamp> = words
        .iter()
        .filter(|w| w.start_sec.is_finite() && w.end_sec.is_finite())
        .map(|w| WordTimestamp {
            word: w.word.clone(),
            start_sec: w.start_sec.max(0.0),
            end_sec: w.end_sec.min(total_duration_sec),
        })
        .filter(|w| w.end_sec > w.start_sec)
        .collect();

    usable.sort_by(|a, b| a.start_sec.total_cmp(&b.start_sec));

    let mut result: Vec<WordTimestamp> = Vec::with_capacity(usable.len());
    for mut word in usable {
        if let Some(previous) = result.last() {
            if word.start_sec < previous.end_sec {
                word.start_sec = previous.end_sec;
            }
        }
        if word.end_sec > word.start_sec {
            result.push(word);
        }
    }

    let dropped = words.len() - result.len();
    (result, dropped)
}

fn mismatch(order: usize, reason: impl Into<String>) -> Degradation {
    Degradation::AlignmentMismatch {
        order,
        reason: reason.into(),
    }
}

/// Time chunks using word timestamps where they agree with the estimate
pub fn allocate(
    chunks: &[Chunk],
    total_duration_sec: f64,
    words: &[WordTimestamp],
    config: &TimingConfig,
) -> (Vec<Cue>, Vec<Degradation>) {
    let (words, dropped) = sanitize_words(words, total_duration_sec);
    if dropped > 0 {
        debug!("Dropped {} malformed word timestamp(s)", dropped);
    }

    let weights = chunk_weights(chunks, total_duration_sec, config.weight_model);
    let chunk_lens: Vec<usize> = chunks.iter().map(|c| comparable_len(&c.text)).collect();
    let word_lens: Vec<usize> = words.iter().map(|w| comparable_len(&w.word)).collect();
    let chunk_total: usize = chunk_lens.iter().sum();
    let word_total: usize = word_lens.iter().sum();

    if word_total == 0 || chunk_total == 0 {
        let (cues, mut degradations) =
            proportional::allocate(chunks, total_duration_sec, config);
        degradations.extend(
            chunks
                .iter()
                .map(|c| mismatch(c.order, "no usable word timestamps")),
        );
        return (cues, degradations);
    }

    let mut degradations = Vec::new();
    let mut anchors = match_anchors(
        chunks,
        &chunk_lens,
        &words,
        &word_lens,
        &estimate_durations(&weights, total_duration_sec),
        config.alignment_tolerance,
        &mut degradations,
    );
    drop_overlapping_anchors(chunks, &mut anchors, &mut degradations);
    drop_crowding_anchors(chunks, &mut anchors, total_duration_sec, &mut degradations);

    let spans = fill_spans(&anchors, &weights, total_duration_sec, config.min_cue_duration_sec);

    let cues: Vec<Cue> = chunks
        .iter()
        .zip(spans)
        .zip(&anchors)
        .enumerate()
        .map(|(i, ((chunk, (start, end)), anchor))| Cue {
            index: i + 1,
            start_sec: start,
            end_sec: end,
            text: chunk.text.clone(),
            timing: if anchor.is_some() {
                TimingSource::Aligned
            } else {
                TimingSource::Proportional
            },
        })
        .collect();

    info!(
        "Aligned {} of {} chunks to word timestamps",
        anchors.iter().filter(|a| a.is_some()).count(),
        chunks.len()
    );
    (cues, degradations)
}

fn match_anchors(
    chunks: &[Chunk],
    chunk_lens: &[usize],
    words: &[WordTimestamp],
    word_lens: &[usize],
    estimates: &[f64],
    tolerance: f64,
    degradations: &mut Vec<Degradation>,
) -> Vec<Option<(f64, f64)>> {
    let chunk_total: usize = chunk_lens.iter().sum();
    let word_total: usize = word_lens.iter().sum();

    let length_gap = (word_total as f64 - chunk_total as f64).abs() / chunk_total as f64;
    let scale = if length_gap <= tolerance {
        word_total as f64 / chunk_total as f64
    } else {
        debug!(
            "Word stream has {} comparable chars for {} in the text, mapping without scaling",
            word_total, chunk_total
        );
        1.0
    };

    let mut word_offsets = Vec::with_capacity(word_lens.len());
    let mut acc = 0;
    for len in word_lens {
        word_offsets.push(acc);
        acc += len;
    }

    let mut anchors = vec![None; chunks.len()];
    let mut cursor = 0;

    for (i, chunk) in chunks.iter().enumerate() {
        let len = chunk_lens[i];
        let low = cursor as f64 * scale;
        let high = (cursor + len) as f64 * scale;
        cursor += len;

        if len == 0 {
            degradations.push(mismatch(chunk.order, "no comparable characters"));
            continue;
        }

        let mut matched = words
            .iter()
            .zip(word_offsets.iter().zip(word_lens))
            .filter(|(_, (offset, len))| {
                **len > 0 && (**offset as f64) < high && ((**offset + **len) as f64) > low
            })
            .map(|(word, _)| word);

        let Some(first) = matched.next() else {
            degradations.push(mismatch(chunk.order, "no overlapping words"));
            continue;
        };
        let last = matched.last().unwrap_or(first);

        let span = last.end_sec - first.start_sec;
        let estimate = estimates[i];
        let deviation = if estimate > 0.0 {
            (span - estimate).abs() / estimate
        } else {
            f64::INFINITY
        };

        if span > 0.0 && deviation <= tolerance {
            debug!(
                "Chunk {} anchored at {:.3}s-{:.3}s (estimate {:.3}s)",
                chunk.order, first.start_sec, last.end_sec, estimate
            );
            anchors[i] = Some((first.start_sec, last.end_sec));
        } else {
            degradations.push(mismatch(
                chunk.order,
                format!(
                    "matched span {:.2}s deviates {:.0}% from estimate {:.2}s",
                    span,
                    deviation * 100.0,
                    estimate
                ),
            ));
        }
    }

    anchors
}

// Anchors must be in order and disjoint
fn drop_overlapping_anchors(
    chunks: &[Chunk],
    anchors: &mut [Option<(f64, f64)>],
    degradations: &mut Vec<Degradation>,
) {
    let mut last_end = 0.0;
    for (i, anchor) in anchors.iter_mut().enumerate() {
        if let Some((start, end)) = *anchor {
            if start < last_end - ANCHOR_OVERLAP_EPSILON {
                *anchor = None;
                degradations.push(mismatch(chunks[i].order, "overlaps the previous anchor"));
            } else {
                last_end = end;
            }
        }
    }
}

// Demote anchors until every run of unanchored chunks has room to be shown
fn drop_crowding_anchors(
    chunks: &[Chunk],
    anchors: &mut [Option<(f64, f64)>],
    total_duration_sec: f64,
    degradations: &mut Vec<Degradation>,
) {
    loop {
        let mut crowding = None;
        let mut previous: Option<usize> = None;
        let mut run_start = 0;

        for idx in 0..=anchors.len() {
            let boundary = if idx == anchors.len() {
                Some(total_duration_sec)
            } else {
                anchors[idx].map(|(start, _)| start)
            };
            let Some(boundary) = boundary else {
                continue;
            };

            let run_len = idx - run_start;
            let room_start = previous
                .and_then(|p| anchors[p])
                .map(|(_, end)| end)
                .unwrap_or(0.0);
            if run_len > 0 && boundary - room_start < run_len as f64 * MIN_RUN_SLICE_SEC {
                crowding = if idx < anchors.len() { Some(idx) } else { previous };
                if crowding.is_some() {
                    break;
                }
            }

            previous = Some(idx);
            run_start = idx + 1;
        }

        match crowding {
            Some(idx) => {
                anchors[idx] = None;
                degradations.push(mismatch(
                    chunks[idx].order,
                    "anchor leaves no room for neighbouring chunks",
                ));
            }
            None => break,
        }
    }
}

fn fill_spans(
    anchors: &[Option<(f64, f64)>],
    weights: &[f64],
    total_duration_sec: f64,
    floor: f64,
) -> Vec<(f64, f64)> {
    let count = anchors.len();
    let mut spans = vec![(0.0, 0.0); count];
    let mut room_start = 0.0;
    let mut run_start = 0;

    for idx in 0..=count {
        let anchor = anchors.get(idx).copied().flatten();
        let boundary = match anchor {
            Some((start, _)) => start,
            None if idx == count => total_duration_sec,
            None => continue,
        };

        if run_start < idx {
            let run = distribute(&weights[run_start..idx], room_start, boundary, floor);
            spans[run_start..idx].copy_from_slice(&run);
        }
        if let Some((start, end)) = anchor {
            spans[idx] = (start, end);
            room_start = end;
            run_start = idx + 1;
        }
    }

    // Close silences so the cues cover [0, total]
    if let Some(first) = spans.first_mut() {
        first.0 = 0.0;
    }
    for i in 1..count {
        spans[i - 1].1 = spans[i].0;
    }
    if let Some(last) = spans.last_mut() {
        last.1 = total_duration_sec;
    }
    spans
}
