use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Raw first row that marks a header mistakenly read as data.
pub const HEADER_SENTINEL: (&str, &str) = ("?", "I have a question");

/// Keys never admitted into a dictionary. `it` collides with the English pronoun.
pub const DENYLIST: &[&str] = &["it"];

/// Lowercase and trim a raw field.
pub fn clean_field(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Strip leading/trailing ASCII punctuation from a token.
pub fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| c.is_ascii_punctuation())
}

/// A single slang → meaning pair, already cleaned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlangEntry {
    pub slang: String,
    pub meaning: String,
}

impl SlangEntry {
    /// Clean both fields (lowercase, trimmed).
    pub fn new(slang: impl AsRef<str>, meaning: impl AsRef<str>) -> Self {
        Self {
            slang: clean_field(slang.as_ref()),
            meaning: clean_field(meaning.as_ref()),
        }
    }

    pub fn has_key(&self) -> bool {
        !self.slang.is_empty()
    }

    pub fn is_denylisted(&self) -> bool {
        DENYLIST.contains(&self.slang.as_str())
    }

    /// True when this is the header sentinel after cleaning.
    pub fn is_header_sentinel(&self) -> bool {
        self.slang == clean_field(HEADER_SENTINEL.0) && self.meaning == clean_field(HEADER_SENTINEL.1)
    }

    /// Whether the entry may live in a dictionary at all.
    pub fn is_admissible(&self) -> bool {
        self.has_key() && !self.is_denylisted() && !self.is_header_sentinel()
    }
}

impl fmt::Display for SlangEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.slang, self.meaning)
    }
}

/// Cleaned slang → meaning mapping with unique keys.
///
/// Ordered by key so iteration (and anything built from it) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlangDictionary {
    entries: BTreeMap<String, String>,
}

impl SlangDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slang: &str) -> Option<&str> {
        self.entries.get(slang).map(String::as_str)
    }

    pub fn contains(&self, slang: &str) -> bool {
        self.entries.contains_key(slang)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Insert without overwriting. Returns `false` when the key exists
    /// or the entry is not admissible.
    pub fn try_insert(&mut self, entry: SlangEntry) -> bool {
        if !entry.is_admissible() || self.entries.contains_key(&entry.slang) {
            return false;
        }
        self.entries.insert(entry.slang, entry.meaning);
        true
    }

    /// No meaning contains a token that is itself a key, so a second
    /// whitespace-token pass over normalized output changes nothing.
    pub fn is_closed_under_expansion(&self) -> bool {
        self.entries.values().all(|meaning| {
            meaning
                .split_whitespace()
                .map(|t| strip_punctuation(t).to_lowercase())
                .all(|t| !self.entries.contains_key(&t))
        })
    }

    pub fn to_entries(&self) -> Vec<SlangEntry> {
        self.entries
            .iter()
            .map(|(slang, meaning)| SlangEntry { slang: slang.clone(), meaning: meaning.clone() })
            .collect()
    }
}

/// First occurrence of a key wins; inadmissible entries are skipped.
impl FromIterator<SlangEntry> for SlangDictionary {
    fn from_iter<I: IntoIterator<Item = SlangEntry>>(iter: I) -> Self {
        let mut dict = SlangDictionary::new();
        for entry in iter {
            dict.try_insert(entry);
        }
        dict
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for SlangDictionary {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter().map(|(s, m)| SlangEntry::new(s, m)).collect()
    }
}

/// How the normalizer matches dictionary keys against text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Split on whitespace, strip punctuation, look up each token.
    #[default]
    WhitespaceToken,
    /// One case-insensitive alternation of every key, word-bounded.
    DictionaryRegex,
}

impl MatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhitespaceToken => "whitespace_token",
            Self::DictionaryRegex => "dictionary_regex",
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "whitespace_token" | "token" => Ok(Self::WhitespaceToken),
            "dictionary_regex" | "regex" => Ok(Self::DictionaryRegex),
            other => Err(format!("unknown match policy: {other}")),
        }
    }
}
