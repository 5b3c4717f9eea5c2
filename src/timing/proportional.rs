/*!
 * Proportional timing.
 *
 * Each chunk receives a share of the duration proportional to its weight.
 * A minimum cue duration is enforced by pinning short cues at the floor and
 * taking the difference from the others in proportion to their weight.
 */

use log::debug;

use super::{Cue, MIN_SLICE_SEC, TimingConfig, TimingSource, WeightModel};
use crate::errors::Degradation;
use crate::segmentation::Chunk;

// @const: Pause after trailing punctuation, in seconds
const PUNCTUATION_PAUSES: &[(char, f64)] = &[
    ('。', 0.5),
    ('！', 0.5),
    ('？', 0.5),
    ('；', 0.3),
    ('：', 0.25),
    ('，', 0.2),
    ('、', 0.15),
    ('…', 0.4),
];

// @const: Pause for chunks ending without listed punctuation
const DEFAULT_PAUSE_SEC: f64 = 0.1;

// @const: Share of the duration assumed spoken when pauses exceed it
const SPOKEN_SHARE_FALLBACK: f64 = 0.8;

fn pause_for(c: char) -> Option<f64> {
    PUNCTUATION_PAUSES
        .iter()
        .find(|(mark, _)| *mark == c)
        .map(|(_, pause)| *pause)
}

/// Characters that take time to speak
pub fn effective_chars(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphanumeric() || *c == '_').count()
}

/// Pause implied by the last character of a chunk
pub fn trailing_pause(text: &str) -> f64 {
    text.chars()
        .last()
        .and_then(pause_for)
        .unwrap_or(DEFAULT_PAUSE_SEC)
}

/// Speaking rate in effective characters per second
pub fn speech_rate(chunks: &[Chunk], total_duration_sec: f64) -> f64 {
    let effective: usize = chunks.iter().map(|c| effective_chars(&c.text)).sum();
    let pauses: f64 = chunks
        .iter()
        .flat_map(|c| c.text.chars())
        .filter_map(pause_for)
        .sum();

    let mut spoken = total_duration_sec - pauses;
    if spoken <= 0.0 {
        spoken = total_duration_sec * SPOKEN_SHARE_FALLBACK;
    }

    debug!(
        "Speech rate: {} effective chars, {:.2}s pauses, {:.2}s spoken",
        effective, pauses, spoken
    );
    effective as f64 / spoken
}

/// Weight of every chunk under the given model
pub fn chunk_weights(chunks: &[Chunk], total_duration_sec: f64, model: WeightModel) -> Vec<f64> {
    match model {
        WeightModel::Characters => chunks.iter().map(|c| c.char_count as f64).collect(),
        WeightModel::SpeechRate => {
            let rate = speech_rate(chunks, total_duration_sec);
            chunks
                .iter()
                .map(|chunk| {
                    let effective = effective_chars(&chunk.text);
                    let speaking = if effective > 0 && rate > 0.0 {
                        effective as f64 / rate
                    } else {
                        DEFAULT_PAUSE_SEC
                    };
                    speaking + trailing_pause(&chunk.text)
                })
                .collect()
        }
    }
}

/// Raw proportional durations without any floor
pub fn estimate_durations(weights: &[f64], total_duration_sec: f64) -> Vec<f64> {
    let total_weight: f64 = weights.iter().sum();
    if total_weight <= 0.0 {
        return vec![0.0; weights.len()];
    }
    weights
        .iter()
        .map(|w| total_duration_sec * w / total_weight)
        .collect()
}

/// Durations summing to `total`, none shorter than the effective floor.
///
/// The floor is lowered to `total / n` when the cues cannot all reach it.
pub fn apply_floor(weights: &[f64], total: f64, floor: f64) -> Vec<f64> {
    let n = weights.len();
    if n == 0 {
        return Vec::new();
    }

    let floor = floor.max(MIN_SLICE_SEC).min(total / n as f64);
    let mut pinned = vec![false; n];

    loop {
        let pinned_count = pinned.iter().filter(|&&p| p).count();
        let free_count = n - pinned_count;
        let free_total = total - floor * pinned_count as f64;
        let free_weight: f64 = weights
            .iter()
            .zip(&pinned)
            .filter(|(_, p)| !**p)
            .map(|(w, _)| w.max(0.0))
            .sum();

        let shares: Vec<f64> = weights
            .iter()
            .zip(&pinned)
            .map(|(w, p)| {
                if *p {
                    floor
                } else if free_weight > 0.0 {
                    free_total * w.max(0.0) / free_weight
                } else {
                    free_total / free_count.max(1) as f64
                }
            })
            .collect();

        let mut changed = false;
        for (i, share) in shares.iter().enumerate() {
            if !pinned[i] && *share < floor - f64::EPSILON {
                pinned[i] = true;
                changed = true;
            }
        }

        if !changed {
            return shares;
        }
    }
}

/// Spread weighted slices over `[start, end]` back to back
pub(crate) fn distribute(weights: &[f64], start: f64, end: f64, floor: f64) -> Vec<(f64, f64)> {
    let durations = apply_floor(weights, end - start, floor);
    let mut spans = Vec::with_capacity(durations.len());
    let mut cursor = start;

    for (i, duration) in durations.iter().enumerate() {
        let slice_end = if i + 1 == durations.len() {
            end
        } else {
            (cursor + duration).min(end)
        };
        spans.push((cursor, slice_end));
        cursor = slice_end;
    }
    spans
}

/// Time every chunk proportionally over `[0, total]`
pub fn allocate(
    chunks: &[Chunk],
    total_duration_sec: f64,
    config: &TimingConfig,
) -> (Vec<Cue>, Vec<Degradation>) {
    let weights = chunk_weights(chunks, total_duration_sec, config.weight_model);
    let total_weight: f64 = weights.iter().sum();
    if !total_weight.is_finite() || total_weight <= 0.0 {
        return (
            Vec::new(),
            vec![Degradation::TimingInfeasible {
                reason: "chunks carry no weight".to_string(),
            }],
        );
    }

    let spans = distribute(
        &weights,
        0.0,
        total_duration_sec,
        config.min_cue_duration_sec,
    );

    let cues = chunks
        .iter()
        .zip(spans)
        .enumerate()
        .map(|(i, (chunk, (start, end)))| {
            debug!(
                "Cue {}: {:.3}s-{:.3}s proportional ({} chars)",
                i + 1,
                start,
                end,
                chunk.char_count
            );
            Cue {
                index: i + 1,
                start_sec: start,
                end_sec: end,
                text: chunk.text.clone(),
                timing: TimingSource::Proportional,
            }
        })
        .collect();

    (cues, Vec::new())
}
