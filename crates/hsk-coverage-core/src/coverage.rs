//! Cumulative text-coverage curves.
//!
//! Estimates what share of running text a vocabulary recognizes, assuming
//! word occurrence follows Zipf's law truncated at `rank_bound`. Each curve
//! point compares four vocabularies at the same rank threshold: the ideal
//! "know every word up to rank n", HSK 1-6, all HSK levels, and the tracked
//! words.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::word::{TrackedSet, Word};
use crate::zipf::{WeightedRankIndex, harmonic_number, round1};

/// Default upper rank considered by the curve.
pub const RANK_BOUND: u32 = 10_000;

/// Largest accepted `rank_bound`. Larger bounds are clamped to it.
pub const MAX_RANK_BOUND: u32 = 1_000_000;

/// Sampling schedule as `(segment end, step)` pairs, applied in order.
const SAMPLING_SEGMENTS: &[(u32, u32)] = &[(1000, 50), (3000, 100), (5000, 250), (10_000, 500)];

/// Tunables for [`compute_coverage_curve_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoverageOptions {
    /// Highest rank that contributes to any curve, at most [`MAX_RANK_BOUND`].
    pub rank_bound: u32,
}

impl Default for CoverageOptions {
    fn default() -> Self {
        Self {
            rank_bound: RANK_BOUND,
        }
    }
}

/// Coverage percentages at one sampled rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoveragePoint {
    /// Sampled rank threshold.
    pub rank: u32,
    /// Coverage of a vocabulary holding every word up to `rank`.
    pub zipf_percent: f64,
    /// Coverage of HSK 1-6 words ranked up to `rank`.
    pub hsk16_percent: f64,
    /// Coverage of all HSK words ranked up to `rank`.
    pub hsk_all_percent: f64,
    /// Coverage of tracked words ranked up to `rank`.
    pub tracked_percent: f64,
}

/// A sampled coverage curve plus its end-point summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoverageCurveData {
    /// Points in increasing rank order.
    pub points: Vec<CoveragePoint>,
    /// Coverage of all tracked words, to one decimal place.
    pub tracked_final_percent: f64,
    /// Coverage of all HSK 1-6 words, to one decimal place.
    pub hsk16_final_percent: f64,
    /// Coverage of all HSK words, to one decimal place.
    pub hsk_all_final_percent: f64,
}

/// Rank thresholds at which the curve is sampled.
///
/// Dense near the origin, where most coverage is gained, and sparse in the
/// tail. Always starts at `0` and ends exactly at `rank_bound`.
pub fn sample_ranks(rank_bound: u32) -> Vec<u32> {
    let mut ranks = vec![0];
    let mut current = 0;

    for &(end, step) in SAMPLING_SEGMENTS {
        while current < end && current < rank_bound {
            current = current.saturating_add(step).min(end).min(rank_bound);
            ranks.push(current);
        }
    }

    // Bounds beyond the last segment continue at the coarsest step.
    let tail_step = SAMPLING_SEGMENTS.last().map_or(500, |&(_, step)| step);
    while current < rank_bound {
        current = current.saturating_add(tail_step).min(rank_bound);
        ranks.push(current);
    }

    ranks
}

/// Compute the coverage curve over the default rank bound.
///
/// See [`compute_coverage_curve_with`].
pub fn compute_coverage_curve(words: &[Word], tracked: &TrackedSet) -> CoverageCurveData {
    compute_coverage_curve_with(words, tracked, &CoverageOptions::default())
}

/// Compute the coverage curve.
///
/// Only words ranked within `1..=rank_bound` contribute. Tracked words count
/// whether or not they carry an HSK level. A bound above [`MAX_RANK_BOUND`]
/// is clamped to it.
#[tracing::instrument(skip(words, tracked), fields(words = words.len(), tracked = tracked.len()))]
pub fn compute_coverage_curve_with(
    words: &[Word],
    tracked: &TrackedSet,
    options: &CoverageOptions,
) -> CoverageCurveData {
    let bound = options.rank_bound.min(MAX_RANK_BOUND);

    let mut core_ranks = Vec::new();
    let mut all_ranks = Vec::new();
    let mut tracked_ranks = Vec::new();

    for word in words {
        let Some(rank) = word.rank().filter(|&r| r <= bound) else {
            continue;
        };
        if word.is_core() {
            core_ranks.push(rank);
            all_ranks.push(rank);
        } else if word.is_extended() {
            all_ranks.push(rank);
        }
        if tracked.contains(&word.id) {
            tracked_ranks.push(rank);
        }
    }

    let core = WeightedRankIndex::from_ranks(core_ranks);
    let all = WeightedRankIndex::from_ranks(all_ranks);
    let known = WeightedRankIndex::from_ranks(tracked_ranks);

    let norm = harmonic_number(bound);
    let percent = |weight: f64| {
        if norm > 0.0 {
            (weight / norm * 100.0).min(100.0)
        } else {
            0.0
        }
    };

    // Sampled ranks ascend, so H(rank) is extended from the previous sample.
    let mut zipf_rank = 0;
    let mut zipf_weight = 0.0;
    let points: Vec<CoveragePoint> = sample_ranks(bound)
        .into_iter()
        .map(|rank| {
            while zipf_rank < rank {
                zipf_rank += 1;
                zipf_weight += 1.0 / f64::from(zipf_rank);
            }
            CoveragePoint {
                rank,
                zipf_percent: percent(zipf_weight),
                hsk16_percent: percent(core.weight_through(rank)),
                hsk_all_percent: percent(all.weight_through(rank)),
                tracked_percent: percent(known.weight_through(rank)),
            }
        })
        .collect();

    let data = CoverageCurveData {
        points,
        tracked_final_percent: round1(percent(known.total())),
        hsk16_final_percent: round1(percent(core.total())),
        hsk_all_final_percent: round1(percent(all.total())),
    };

    tracing::debug!(
        points = data.points.len(),
        tracked_final = data.tracked_final_percent,
        hsk_all_final = data.hsk_all_final_percent,
        "coverage curve computed"
    );

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(ids: std::ops::RangeInclusive<u32>, level: u8) -> Vec<Word> {
        ids.map(|rank| Word::new(format!("w{rank}"), Some(level), Some(rank)))
            .collect()
    }

    #[test]
    fn default_schedule_shape() {
        let ranks = sample_ranks(RANK_BOUND);
        assert_eq!(ranks.first(), Some(&0));
        assert_eq!(ranks.last(), Some(&10_000));
        assert_eq!(&ranks[..4], &[0, 50, 100, 150]);
        assert!(ranks.contains(&1000));
        assert!(ranks.contains(&1100));
        assert!(ranks.contains(&3250));
        assert!(ranks.contains(&5500));
        assert!(!ranks.contains(&1050));
        // 1 + 20 + 20 + 8 + 10
        assert_eq!(ranks.len(), 59);
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn schedule_truncates_at_small_bound() {
        let ranks = sample_ranks(120);
        assert_eq!(ranks, vec![0, 50, 100, 120]);
    }

    #[test]
    fn schedule_extends_past_last_segment() {
        let ranks = sample_ranks(11_200);
        assert_eq!(&ranks[ranks.len() - 4..], &[10_000, 10_500, 11_000, 11_200]);
    }

    #[test]
    fn empty_input_gives_flat_curves() {
        let data = compute_coverage_curve(&[], &TrackedSet::new());
        assert!(data.points.iter().all(|p| {
            p.hsk16_percent == 0.0 && p.hsk_all_percent == 0.0 && p.tracked_percent == 0.0
        }));
        assert_eq!(data.tracked_final_percent, 0.0);
        assert_eq!(data.hsk16_final_percent, 0.0);
        assert_eq!(data.hsk_all_final_percent, 0.0);
    }

    #[test]
    fn zipf_curve_runs_from_zero_to_hundred() {
        let data = compute_coverage_curve(&[], &TrackedSet::new());
        let first = data.points.first().unwrap();
        let last = data.points.last().unwrap();
        assert_eq!(first.zipf_percent, 0.0);
        assert!((last.zipf_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn curves_are_monotonic_and_bounded() {
        let mut words = ranked(1..=4000, 3);
        words.extend((4001..=9000).map(|r| Word::new(format!("w{r}"), Some(7), Some(r))));
        words.push(Word::new("rare", Some(2), Some(50_000)));
        let tracked: TrackedSet = (1..=9000).step_by(4).map(|r| format!("w{r}")).collect();

        let data = compute_coverage_curve(&words, &tracked);
        for pair in data.points.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.zipf_percent <= b.zipf_percent);
            assert!(a.hsk16_percent <= b.hsk16_percent);
            assert!(a.hsk_all_percent <= b.hsk_all_percent);
            assert!(a.tracked_percent <= b.tracked_percent);
        }
        for p in &data.points {
            for v in [
                p.zipf_percent,
                p.hsk16_percent,
                p.hsk_all_percent,
                p.tracked_percent,
            ] {
                assert!((0.0..=100.0).contains(&v), "{v} out of range");
            }
            assert!(p.hsk16_percent <= p.hsk_all_percent);
        }
    }

    #[test]
    fn tracking_every_word_matches_hsk_curve() {
        let words = ranked(1..=2000, 2);
        let all: TrackedSet = words.iter().map(|w| w.id.clone()).collect();
        let data = compute_coverage_curve(&words, &all);

        for p in &data.points {
            assert_eq!(p.tracked_percent, p.hsk16_percent);
            assert_eq!(p.tracked_percent, p.hsk_all_percent);
        }
        assert_eq!(data.tracked_final_percent, data.hsk16_final_percent);
    }

    #[test]
    fn complete_vocabulary_matches_zipf() {
        let words = ranked(1..=RANK_BOUND, 1);
        let data = compute_coverage_curve(&words, &TrackedSet::new());
        for p in &data.points {
            assert!((p.hsk16_percent - p.zipf_percent).abs() < 1e-9);
        }
        assert_eq!(data.hsk16_final_percent, 100.0);
    }

    #[test]
    fn final_percentages_are_rounded_to_tenths() {
        let words = vec![Word::new("top", Some(1), Some(1))];
        let tracked: TrackedSet = ["top"].into_iter().collect();
        let data = compute_coverage_curve(&words, &tracked);
        // 1 / H(10000) ~= 10.217%
        assert_eq!(data.tracked_final_percent, 10.2);
        assert_eq!(data.hsk16_final_percent, 10.2);
    }

    #[test]
    fn words_beyond_bound_or_unranked_are_skipped() {
        let words = vec![
            Word::new("far", Some(1), Some(10_001)),
            Word::new("none", Some(1), None),
            Word::new("zero", Some(1), Some(0)),
        ];
        let tracked: TrackedSet = ["far", "none", "zero"].into_iter().collect();
        let data = compute_coverage_curve(&words, &tracked);
        assert_eq!(data.tracked_final_percent, 0.0);
        assert_eq!(data.hsk_all_final_percent, 0.0);
    }

    #[test]
    fn extended_words_only_affect_all_levels_curve() {
        let words = vec![Word::new("ext", Some(7), Some(2))];
        let data = compute_coverage_curve(&words, &TrackedSet::new());
        assert_eq!(data.hsk16_final_percent, 0.0);
        assert!(data.hsk_all_final_percent > 0.0);
    }

    #[test]
    fn unleveled_tracked_words_count() {
        let words = vec![Word::new("custom", None, Some(3))];
        let tracked: TrackedSet = ["custom"].into_iter().collect();
        let data = compute_coverage_curve(&words, &tracked);
        assert!(data.tracked_final_percent > 0.0);
        assert_eq!(data.hsk_all_final_percent, 0.0);
    }

    #[test]
    fn zipf_column_matches_harmonic_numbers() {
        let data = compute_coverage_curve(&[], &TrackedSet::new());
        let norm = harmonic_number(RANK_BOUND);
        for p in &data.points {
            let expected = harmonic_number(p.rank) / norm * 100.0;
            assert!((p.zipf_percent - expected).abs() < 1e-9, "rank {}", p.rank);
        }
    }

    #[test]
    fn oversized_bound_is_clamped() {
        let options = CoverageOptions {
            rank_bound: u32::MAX,
        };
        let data = compute_coverage_curve_with(&[], &TrackedSet::new(), &options);
        assert_eq!(data.points.last().map(|p| p.rank), Some(MAX_RANK_BOUND));
        assert!((data.points.last().unwrap().zipf_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn report_serializes_camel_case() {
        let data = compute_coverage_curve(&[], &TrackedSet::new());
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("trackedFinalPercent").is_some());
        assert!(json["points"][1].get("hsk16Percent").is_some());
        assert!(json["points"][1].get("hskAllPercent").is_some());
    }

    #[test]
    fn repeated_calls_are_identical() {
        let words = ranked(1..=300, 5);
        let tracked: TrackedSet = ["w7", "w200"].into_iter().collect();
        assert_eq!(
            compute_coverage_curve(&words, &tracked),
            compute_coverage_curve(&words, &tracked)
        );
    }
}
