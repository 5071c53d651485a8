//! Greedy diversity selection
//!
//! Grows a palette from the most frequent candidate by repeatedly adding the
//! candidate that best combines distance from everything already chosen,
//! saturation and frequency. This is a greedy approximation; its tie-break
//! (earliest candidate wins) is part of the contract.

use crate::constants::diversity::*;
use crate::constants::sampling::MAX_COLORS;
use crate::{ColorSample, PaletteError, Result};

/// Weighted difference between two colors
///
/// Euclidean RGB distance plus absolute hue, saturation and lightness
/// differences on their native scales (degrees, percent). RGB dominates.
pub fn color_difference(a: &ColorSample, b: &ColorSample) -> f64 {
    let rgb = a
        .rgb
        .iter()
        .zip(&b.rgb)
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum::<f64>()
        .sqrt();

    let hue = (f64::from(a.hsl.h) - f64::from(b.hsl.h)).abs();
    let saturation = (f64::from(a.hsl.s) - f64::from(b.hsl.s)).abs();
    let lightness = (f64::from(a.hsl.l) - f64::from(b.hsl.l)).abs();

    rgb * RGB_WEIGHT + hue * HUE_WEIGHT + saturation * SATURATION_WEIGHT + lightness * LIGHTNESS_WEIGHT
}

/// Selection score of a candidate given its minimum difference to the selection
pub fn diversity_score(candidate: &ColorSample, min_difference: f64) -> f64 {
    DIFFERENCE_SCORE_WEIGHT * (min_difference / DIFFERENCE_NORMALIZER)
        + SATURATION_SCORE_WEIGHT * (f64::from(candidate.hsl.s) / 100.0)
        + FREQUENCY_SCORE_WEIGHT * (candidate.percentage / 100.0)
}

/// Picks a bounded, mutually dissimilar subset of ranked candidates
#[derive(Debug, Clone, Copy)]
pub struct DiversitySelector {
    max_colors: usize,
}

impl Default for DiversitySelector {
    fn default() -> Self {
        Self {
            max_colors: MAX_COLORS as usize,
        }
    }
}

impl DiversitySelector {
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidParameter`] if `max_colors` is zero.
    pub fn new(max_colors: usize) -> Result<Self> {
        if max_colors == 0 {
            return Err(PaletteError::invalid_parameter("MAX_COLORS", max_colors));
        }
        Ok(Self { max_colors })
    }

    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    /// Select up to `max_colors` candidates
    ///
    /// `candidates` must be sorted by percentage, descending (as produced by
    /// [`CandidateBuilder`](super::CandidateBuilder)). Lists that already fit
    /// are returned unchanged. The result is sorted by percentage, descending.
    pub fn select(&self, candidates: Vec<ColorSample>) -> Vec<ColorSample> {
        if candidates.len() <= self.max_colors {
            return candidates;
        }

        let mut used = vec![false; candidates.len()];
        let mut selected: Vec<usize> = Vec::with_capacity(self.max_colors);
        selected.push(0);
        used[0] = true;

        while selected.len() < self.max_colors {
            let mut best: Option<(usize, f64)> = None;

            for (idx, candidate) in candidates.iter().enumerate() {
                if used[idx] {
                    continue;
                }
                let min_difference = selected
                    .iter()
                    .map(|&s| color_difference(candidate, &candidates[s]))
                    .fold(f64::INFINITY, f64::min);
                let score = diversity_score(candidate, min_difference);

                if best.map_or(true, |(_, top)| score > top) {
                    best = Some((idx, score));
                }
            }

            let Some((idx, _)) = best else {
                break;
            };
            selected.push(idx);
            used[idx] = true;
        }

        // Pad with the most frequent leftovers if the greedy pass stopped short
        for idx in 0..candidates.len() {
            if selected.len() >= self.max_colors {
                break;
            }
            if !used[idx] {
                selected.push(idx);
                used[idx] = true;
            }
        }

        let mut slots: Vec<Option<ColorSample>> = candidates.into_iter().map(Some).collect();
        let mut palette: Vec<ColorSample> = selected
            .into_iter()
            .filter_map(|idx| slots[idx].take())
            .collect();
        palette.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
        palette
    }
}
