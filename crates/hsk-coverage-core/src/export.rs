//! Flashcard export planning.
//!
//! Decides which tracked words go into an Anki deck, which note model to
//! use, and a stable GUID per note so that re-importing a regenerated deck
//! keeps existing review history. Writing the `.apkg` itself is left to
//! the deck builder.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ExportError, ExportResult};
use crate::word::{TrackedSet, Word};

/// Tracked-word count below which the beginner model is used.
pub const BEGINNER_THRESHOLD: usize = 200;

/// Number of hex characters kept from the GUID digest.
const GUID_LEN: usize = 10;

/// Note model for the exported deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ExportMode {
    /// Three cards per word, including pinyin-first recall.
    Beginner,
    /// One character-to-meaning card per word.
    Advanced,
}

impl ExportMode {
    /// Pick the mode for a deck of `word_count` words.
    pub const fn for_count(word_count: usize, beginner_threshold: usize) -> Self {
        if word_count < beginner_threshold {
            Self::Beginner
        } else {
            Self::Advanced
        }
    }

    /// Lowercase name, also used as the GUID salt.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Advanced => "advanced",
        }
    }

    /// Card templates generated for each note, in order.
    pub const fn card_templates(&self) -> &'static [&'static str] {
        match self {
            Self::Beginner => &[
                "Pinyin → Meaning",
                "Character → Pronunciation",
                "Character → Meaning",
            ],
            Self::Advanced => &["Character → Meaning"],
        }
    }
}

impl std::fmt::Display for ExportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One note in the planned deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportNote {
    /// Word identifier (the character field).
    pub id: String,
    /// Stable note GUID.
    pub guid: String,
    /// HSK level shown on the card.
    pub hsk_level: u8,
    /// Pinyin field, empty when unknown.
    pub pinyin: String,
    /// Meaning field, empty when unknown.
    pub meaning: String,
}

/// The full export plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportPlan {
    /// Selected note model.
    pub mode: ExportMode,
    /// Cards generated per note.
    pub cards_per_word: usize,
    /// Number of notes.
    pub word_count: usize,
    /// Card template names for the selected model.
    pub card_templates: Vec<String>,
    /// Notes in word-list order.
    pub notes: Vec<ExportNote>,
}

/// Stable GUID for a word under a given mode.
///
/// The first ten hex digits of `SHA-256("{id}:{mode}")`.
pub fn stable_guid(word_id: &str, mode: ExportMode) -> String {
    let digest = Sha256::digest(format!("{word_id}:{}", mode.as_str()).as_bytes());
    let mut hex = format!("{digest:x}");
    hex.truncate(GUID_LEN);
    hex
}

/// Plan an export of the tracked HSK 1-6 words.
///
/// # Arguments
///
/// * `words` - The word list; export order follows it.
/// * `tracked` - Identifiers the learner tracks.
/// * `mode` - Force a note model instead of choosing by count.
/// * `beginner_threshold` - Decks smaller than this use the beginner model.
///
/// # Errors
///
/// Returns [`ExportError::NoTrackedWords`] if no tracked word is in HSK 1-6.
#[tracing::instrument(skip(words, tracked), fields(words = words.len(), tracked = tracked.len()))]
pub fn plan_export(
    words: &[Word],
    tracked: &TrackedSet,
    mode: Option<ExportMode>,
    beginner_threshold: usize,
) -> ExportResult<ExportPlan> {
    let selected: Vec<&Word> = words
        .iter()
        .filter(|w| w.is_core() && tracked.contains(&w.id))
        .collect();

    if selected.is_empty() {
        return Err(ExportError::NoTrackedWords);
    }

    let mode = mode.unwrap_or_else(|| ExportMode::for_count(selected.len(), beginner_threshold));
    let templates = mode.card_templates();

    let notes: Vec<ExportNote> = selected
        .into_iter()
        .map(|w| ExportNote {
            id: w.id.clone(),
            guid: stable_guid(&w.id, mode),
            hsk_level: w.hsk_level.unwrap_or_default(),
            pinyin: w.pinyin.clone().unwrap_or_default(),
            meaning: w.meaning.clone().unwrap_or_default(),
        })
        .collect();

    tracing::info!(mode = %mode, notes = notes.len(), "export planned");

    Ok(ExportPlan {
        mode,
        cards_per_word: templates.len(),
        word_count: notes.len(),
        card_templates: templates.iter().map(|t| (*t).to_string()).collect(),
        notes,
    })
}
