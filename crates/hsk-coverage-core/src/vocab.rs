//! Loading word lists and tracked sets from JSON files.
//!
//! Two word-list layouts are accepted in the same array:
//!
//! - Flat records: `{"id": "爱", "hskLevel": 1, "frequency": 261}`
//! - Entries of the complete HSK vocabulary dataset:
//!   `{"simplified": "爱", "level": ["new-1", "old-1"], "frequency": 261,
//!   "forms": [{"transcriptions": {"pinyin": "ài"}, "meanings": ["to love"]}]}`
//!
//! Tracked sets are either `{"tracked": ["爱", ...]}` or a bare array.

use std::collections::HashSet;

use camino::Utf8Path;
use serde::Deserialize;

use crate::error::{DataError, DataResult};
use crate::word::{TrackedSet, Word, rank_from_number};

/// Prefix of the level tags that belong to the current HSK standard.
const NEW_LEVEL_PREFIX: &str = "new-";

/// A word-list element in either supported layout.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Flat(Word),
    Dataset(DatasetEntry),
}

#[derive(Debug, Deserialize)]
struct DatasetEntry {
    simplified: String,
    #[serde(default)]
    level: Vec<String>,
    #[serde(default)]
    frequency: Option<f64>,
    #[serde(default)]
    forms: Vec<DatasetForm>,
}

#[derive(Debug, Deserialize)]
struct DatasetForm {
    #[serde(default)]
    transcriptions: Option<Transcriptions>,
    #[serde(default)]
    meanings: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Transcriptions {
    #[serde(default)]
    pinyin: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTracked {
    Wrapped { tracked: Vec<String> },
    Bare(Vec<String>),
}

/// Parse a level tag such as `"new-3"` into its number.
///
/// Tags from the older standard (`"old-3"`) and malformed tags yield `None`.
pub fn parse_level(tag: &str) -> Option<u8> {
    tag.strip_prefix(NEW_LEVEL_PREFIX)?.parse().ok()
}

impl From<RawEntry> for Word {
    fn from(entry: RawEntry) -> Self {
        match entry {
            RawEntry::Flat(word) => word,
            RawEntry::Dataset(entry) => {
                let form = entry.forms.first();
                Self {
                    hsk_level: entry.level.iter().find_map(|tag| parse_level(tag)),
                    frequency: rank_from_number(entry.frequency),
                    pinyin: form
                        .and_then(|f| f.transcriptions.as_ref())
                        .and_then(|t| t.pinyin.clone()),
                    meaning: form
                        .filter(|f| !f.meanings.is_empty())
                        .map(|f| f.meanings.join("; ")),
                    id: entry.simplified,
                }
            }
        }
    }
}

/// Parse a word list from JSON text.
///
/// Duplicate ids keep their first occurrence.
pub fn parse_words(json: &str) -> serde_json::Result<Vec<Word>> {
    let raw: Vec<RawEntry> = serde_json::from_str(json)?;
    let total = raw.len();

    let mut seen = HashSet::with_capacity(total);
    let words: Vec<Word> = raw
        .into_iter()
        .map(Word::from)
        .filter(|w| seen.insert(w.id.clone()))
        .collect();

    if words.len() < total {
        tracing::debug!(dropped = total - words.len(), "dropped duplicate word ids");
    }
    Ok(words)
}

/// Parse a tracked set from JSON text.
pub fn parse_tracked(json: &str) -> serde_json::Result<TrackedSet> {
    let ids = match serde_json::from_str(json)? {
        RawTracked::Wrapped { tracked } | RawTracked::Bare(tracked) => tracked,
    };
    Ok(ids.into_iter().collect())
}

/// Load a word list from a JSON file.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn load_words(path: &Utf8Path) -> DataResult<Vec<Word>> {
    let text = read(path)?;
    let words = parse_words(&text).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(count = words.len(), "word list loaded");
    Ok(words)
}

/// Load a tracked set from a JSON file.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn load_tracked(path: &Utf8Path) -> DataResult<TrackedSet> {
    let text = read(path)?;
    let tracked = parse_tracked(&text).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(count = tracked.len(), "tracked set loaded");
    Ok(tracked)
}

fn read(path: &Utf8Path) -> DataResult<String> {
    std::fs::read_to_string(path.as_std_path()).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn parse_level_tags() {
        assert_eq!(parse_level("new-1"), Some(1));
        assert_eq!(parse_level("new-7"), Some(7));
        assert_eq!(parse_level("old-3"), None);
        assert_eq!(parse_level("new-x"), None);
        assert_eq!(parse_level(""), None);
    }

    #[test]
    fn parses_flat_records() {
        let json = r#"[
            {"id": "a", "hskLevel": 1, "frequency": 1},
            {"id": "b", "hskLevel": null, "frequency": null},
            {"id": "c"}
        ]"#;
        let words = parse_words(json).unwrap();
        assert_eq!(words.len(), 3);
        assert_eq!(words[0], Word::new("a", Some(1), Some(1)));
        assert_eq!(words[1], Word::new("b", None, None));
        assert_eq!(words[2], Word::new("c", None, None));
    }

    #[test]
    fn non_positive_frequency_becomes_unranked() {
        let json = r#"[
            {"id": "neg", "hskLevel": 2, "frequency": -4},
            {"id": "zero", "hskLevel": 2, "frequency": 0},
            {"id": "frac", "hskLevel": 2, "frequency": 2.5}
        ]"#;
        let words = parse_words(json).unwrap();
        assert!(words.iter().all(|w| w.frequency.is_none()));
    }

    #[test]
    fn parses_dataset_entries() {
        let json = r#"[{
            "simplified": "爱",
            "radical": "爫",
            "level": ["old-1", "new-1"],
            "frequency": 261,
            "pos": ["v"],
            "forms": [{
                "traditional": "愛",
                "transcriptions": {"pinyin": "ài", "numeric": "ai4"},
                "meanings": ["to love", "affection"]
            }]
        }]"#;
        let words = parse_words(json).unwrap();
        let word = &words[0];
        assert_eq!(word.id, "爱");
        assert_eq!(word.hsk_level, Some(1));
        assert_eq!(word.frequency, Some(261));
        assert_eq!(word.pinyin.as_deref(), Some("ài"));
        assert_eq!(word.meaning.as_deref(), Some("to love; affection"));
    }

    #[test]
    fn dataset_entry_without_new_level_is_unleveled() {
        let json = r#"[{"simplified": "旧", "level": ["old-4"], "frequency": 900, "forms": []}]"#;
        let words = parse_words(json).unwrap();
        assert!(words[0].hsk_level.is_none());
        assert!(words[0].pinyin.is_none());
        assert!(words[0].meaning.is_none());
    }

    #[test]
    fn mixed_layouts_in_one_list() {
        let json = r#"[
            {"id": "a", "hskLevel": 3, "frequency": 10},
            {"simplified": "b", "level": ["new-7"], "frequency": 20}
        ]"#;
        let words = parse_words(json).unwrap();
        assert_eq!(words[1], Word::new("b", Some(7), Some(20)));
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let json = r#"[
            {"id": "a", "hskLevel": 1, "frequency": 10},
            {"id": "a", "hskLevel": 2, "frequency": 20}
        ]"#;
        let words = parse_words(json).unwrap();
        assert_eq!(words, vec![Word::new("a", Some(1), Some(10))]);
    }

    #[test]
    fn rejects_non_array() {
        assert!(parse_words(r#"{"id": "a"}"#).is_err());
    }

    #[test]
    fn parses_wrapped_and_bare_tracked_sets() {
        let wrapped = parse_tracked(r#"{"tracked": ["a", "b"]}"#).unwrap();
        let bare = parse_tracked(r#"["a", "b"]"#).unwrap();
        assert_eq!(wrapped, bare);
        assert!(wrapped.contains("b"));
    }

    #[test]
    fn load_from_files() {
        let tmp = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        std::fs::write(
            dir.join("words.json"),
            r#"[{"id": "a", "hskLevel": 1, "frequency": 5}]"#,
        )
        .unwrap();
        std::fs::write(dir.join("tracked.json"), r#"{"tracked": ["a"]}"#).unwrap();

        let words = load_words(&dir.join("words.json")).unwrap();
        let tracked = load_tracked(&dir.join("tracked.json")).unwrap();
        assert_eq!(words.len(), 1);
        assert!(tracked.contains("a"));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = load_words(Utf8Path::new("/nonexistent/words.json")).unwrap_err();
        assert!(matches!(err, DataError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        std::fs::write(dir.join("bad.json"), "not json").unwrap();
        let err = load_tracked(&dir.join("bad.json")).unwrap_err();
        assert!(matches!(err, DataError::Parse { .. }));
    }
}
