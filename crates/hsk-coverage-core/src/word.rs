//! Vocabulary data model.
//!
//! A [`Word`] is one entry of the graded HSK list (or a user-added word with
//! no level). A [`TrackedSet`] holds the identifiers the learner has marked;
//! every computation in this crate takes it by shared reference and only
//! performs membership tests.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Highest level of the core graded list (HSK 1 through 6).
pub const CORE_MAX_LEVEL: u8 = 6;

/// Level assigned to the extended tier (HSK 7-9).
///
/// Passing this as a level filter switches frequency statistics into
/// extended-tier mode.
pub const EXTENDED_LEVEL: u8 = 7;

/// One vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    /// Stable identifier, normally the simplified written form.
    pub id: String,
    /// HSK level. `None` means the word is not on the graded list.
    #[serde(default)]
    pub hsk_level: Option<u8>,
    /// Corpus frequency rank, 1 = most frequent. `None` means unranked.
    ///
    /// Any JSON number is accepted; values that are not positive integers
    /// deserialize as unranked.
    #[serde(default, deserialize_with = "deserialize_rank")]
    #[schemars(with = "Option<f64>")]
    pub frequency: Option<u32>,
    /// Romanized pronunciation, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<String>,
    /// English gloss, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

impl Word {
    /// Create a word with an id, level and frequency rank.
    pub fn new(id: impl Into<String>, hsk_level: Option<u8>, frequency: Option<u32>) -> Self {
        Self {
            id: id.into(),
            hsk_level,
            frequency,
            pinyin: None,
            meaning: None,
        }
    }

    /// Frequency rank, or `None` when absent or zero.
    pub fn rank(&self) -> Option<u32> {
        self.frequency.filter(|&rank| rank > 0)
    }

    /// Whether the word belongs to HSK levels 1 through 6.
    pub fn is_core(&self) -> bool {
        self.hsk_level
            .is_some_and(|level| (1..=CORE_MAX_LEVEL).contains(&level))
    }

    /// Whether the word belongs to the extended tier (level 7 and above).
    pub fn is_extended(&self) -> bool {
        self.hsk_level.is_some_and(|level| level >= EXTENDED_LEVEL)
    }
}

/// Convert a raw frequency into a rank. Only positive integers are ranks.
pub(crate) fn rank_from_number(frequency: Option<f64>) -> Option<u32> {
    frequency
        .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= f64::from(u32::MAX))
        .map(|f| f as u32)
}

fn deserialize_rank<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(rank_from_number)
}

/// Set of word identifiers the learner is tracking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrackedSet {
    tracked: HashSet<String>,
}

impl TrackedSet {
    /// Create an empty tracked set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is tracked.
    pub fn contains(&self, id: &str) -> bool {
        self.tracked.contains(id)
    }

    /// Number of tracked identifiers.
    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    /// Whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Iterate over tracked identifiers in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tracked.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for TrackedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tracked: iter.into_iter().map(Into::into).collect(),
        }
    }
}
