//! Zipfian weighting helpers.
//!
//! Under Zipf's law a word of rank `r` accounts for a share of running text
//! proportional to `1/r`. Truncated at rank `R`, the total weight is the
//! harmonic number `H(R)`, so the coverage of any set of ranks is the sum of
//! their reciprocals divided by `H(R)`.

/// Harmonic number `H(n) = 1 + 1/2 + ... + 1/n`, summed directly.
///
/// `H(0)` is `0`.
pub fn harmonic_number(n: u32) -> f64 {
    (1..=n).map(|k| 1.0 / f64::from(k)).sum()
}

/// Round to the nearest tenth.
pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Sorted ranks with a parallel array of cumulative `1/rank` weights.
///
/// Answers "total weight of all ranks `<= n`" with one binary search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedRankIndex {
    sorted: Vec<u32>,
    cumulative: Vec<f64>,
}

impl WeightedRankIndex {
    /// Build an index from ranks in any order. Duplicates are kept and each
    /// contributes its own weight. Zero ranks are ignored.
    pub fn from_ranks<I: IntoIterator<Item = u32>>(ranks: I) -> Self {
        let mut sorted: Vec<u32> = ranks.into_iter().filter(|&r| r > 0).collect();
        sorted.sort_unstable();

        let mut running = 0.0;
        let cumulative = sorted
            .iter()
            .map(|&rank| {
                running += 1.0 / f64::from(rank);
                running
            })
            .collect();

        Self { sorted, cumulative }
    }

    /// Cumulative weight of every rank `<= n`, or `0` if there is none.
    pub fn weight_through(&self, n: u32) -> f64 {
        match self.sorted.partition_point(|&rank| rank <= n) {
            0 => 0.0,
            end => self.cumulative[end - 1],
        }
    }

    /// Weight of every rank in the index.
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Number of ranks in the index.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Whether the index holds no ranks.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}
