//! Frequency-bucket statistics.
//!
//! Splits the frequency-rank axis into fixed-width buckets and counts, for
//! each bucket, how many in-scope words fall into it and how many of those
//! are tracked. Also reports how much of the top-N most frequent words the
//! learner tracks.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::word::{EXTENDED_LEVEL, TrackedSet, Word};

/// Default width of one bucket, in ranks.
pub const BUCKET_SIZE: u32 = 500;

/// Default number of buckets.
pub const NUM_BUCKETS: u32 = 20;

/// Default cutoff for the "top-N" coverage figure.
pub const TOP_N: u32 = 5000;

/// Tunables for [`compute_frequency_stats_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsOptions {
    /// Width of each bucket in ranks.
    pub bucket_size: u32,
    /// Number of buckets, starting at rank 1.
    pub num_buckets: u32,
    /// Words with rank `<= top_n` count toward the coverage percentage.
    pub top_n: u32,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            bucket_size: BUCKET_SIZE,
            num_buckets: NUM_BUCKETS,
            top_n: TOP_N,
        }
    }
}

/// One slice of the frequency-rank axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyBucket {
    /// Display label, e.g. `"1-500"`.
    pub label: String,
    /// Lowest rank in the bucket (inclusive).
    pub min: u32,
    /// Highest rank in the bucket (inclusive).
    pub max: u32,
    /// In-scope words whose rank falls in this bucket.
    pub hsk_count: usize,
    /// Tracked words among `hsk_count`.
    pub tracked_count: usize,
}

/// Aggregate frequency statistics for one word list and tracked set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyStats {
    /// Buckets in rank order.
    pub buckets: Vec<FrequencyBucket>,
    /// Number of in-scope words.
    pub total_words: usize,
    /// Number of in-scope words that are tracked.
    pub total_tracked: usize,
    /// Rank cutoff used for the top-N figures.
    pub top_n: u32,
    /// In-scope words ranked within the top N.
    pub top_n_words: usize,
    /// Tracked words among `top_n_words`.
    pub top_n_tracked: usize,
    /// `top_n_tracked / top_n_words` as a whole percentage.
    pub coverage_percent: u32,
    /// Extended-tier word count, reported only in extended mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_words: Option<usize>,
    /// Tracked extended-tier words, reported only in extended mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_tracked: Option<usize>,
}

/// Compute frequency statistics with the default bucket layout.
///
/// See [`compute_frequency_stats_with`].
pub fn compute_frequency_stats(
    words: &[Word],
    tracked: &TrackedSet,
    level_filter: Option<u8>,
) -> FrequencyStats {
    compute_frequency_stats_with(words, tracked, level_filter, &StatsOptions::default())
}

/// Compute frequency statistics.
///
/// # Arguments
///
/// * `words` - The word list, in any order.
/// * `tracked` - Identifiers the learner tracks.
/// * `level_filter` - `Some(EXTENDED_LEVEL)` scopes the statistics to every
///   ranked word and additionally reports extended-tier counts. Any other
///   value scopes them to HSK levels 1 through 6.
/// * `options` - Bucket width, bucket count and top-N cutoff.
#[tracing::instrument(skip(words, tracked), fields(words = words.len(), tracked = tracked.len()))]
pub fn compute_frequency_stats_with(
    words: &[Word],
    tracked: &TrackedSet,
    level_filter: Option<u8>,
    options: &StatsOptions,
) -> FrequencyStats {
    let extended = level_filter == Some(EXTENDED_LEVEL);
    let bucket_size = options.bucket_size.max(1);

    let mut buckets: Vec<FrequencyBucket> = (0..options.num_buckets)
        .map(|i| {
            let min = i.saturating_mul(bucket_size).saturating_add(1);
            let max = (i + 1).saturating_mul(bucket_size);
            FrequencyBucket {
                label: format!("{min}-{max}"),
                min,
                max,
                hsk_count: 0,
                tracked_count: 0,
            }
        })
        .collect();

    let mut total_words = 0;
    let mut total_tracked = 0;
    let mut top_n_words = 0;
    let mut top_n_tracked = 0;
    let mut level_words = 0;
    let mut level_tracked = 0;

    let in_scope = words.iter().filter(|w| {
        if extended {
            w.rank().is_some()
        } else {
            w.is_core()
        }
    });

    for word in in_scope {
        let is_tracked = tracked.contains(&word.id);

        total_words += 1;
        if is_tracked {
            total_tracked += 1;
        }

        if let Some(rank) = word.rank() {
            let index = ((rank - 1) / bucket_size) as usize;
            if let Some(bucket) = buckets.get_mut(index) {
                bucket.hsk_count += 1;
                if is_tracked {
                    bucket.tracked_count += 1;
                }
            }

            if rank <= options.top_n {
                top_n_words += 1;
                if is_tracked {
                    top_n_tracked += 1;
                }
            }
        }

        if extended && word.hsk_level == Some(EXTENDED_LEVEL) {
            level_words += 1;
            if is_tracked {
                level_tracked += 1;
            }
        }
    }

    let coverage_percent = if top_n_words == 0 {
        0
    } else {
        (top_n_tracked as f64 / top_n_words as f64 * 100.0).round() as u32
    };

    tracing::debug!(
        total_words,
        total_tracked,
        coverage_percent,
        extended,
        "frequency stats computed"
    );

    FrequencyStats {
        buckets,
        total_words,
        total_tracked,
        top_n: options.top_n,
        top_n_words,
        top_n_tracked,
        coverage_percent,
        level_words: extended.then_some(level_words),
        level_tracked: extended.then_some(level_tracked),
    }
}
