//! Whole-dictionary regex policy.

use regex::{Captures, Regex, RegexBuilder};
use sd_core::error::{Result, SdError};
use sd_core::SlangDictionary;

const REGEX_SIZE_LIMIT: usize = 64 * 1024 * 1024;

/// Compiled alternation over every key of one dictionary snapshot.
///
/// Keys are ordered longest first (ties lexicographic), so when one key is a
/// prefix of another at the same position the longer one wins.
#[derive(Debug, Clone)]
pub struct DictionaryPattern {
    regex: Option<Regex>,
}

impl DictionaryPattern {
    pub fn new(dict: &SlangDictionary) -> Result<Self> {
        if dict.is_empty() {
            return Ok(Self { regex: None });
        }
        let mut keys: Vec<&str> = dict.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let alternation = keys.iter().map(|k| regex::escape(k)).collect::<Vec<_>>().join("|");
        let regex = RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
            .case_insensitive(true)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|e| SdError::Other(anyhow::anyhow!("slang pattern: {e}")))?;
        Ok(Self { regex: Some(regex) })
    }

    /// Replace matched spans with their meanings; everything else untouched.
    pub fn replace(&self, text: &str, dict: &SlangDictionary) -> (String, usize) {
        let Some(re) = &self.regex else {
            return (text.to_string(), 0);
        };
        let mut replaced = 0;
        let output = re.replace_all(text, |caps: &Captures| {
            let matched = &caps[0];
            match dict.get(&matched.to_lowercase()) {
                Some(meaning) => {
                    replaced += 1;
                    meaning.to_string()
                }
                None => matched.to_string(),
            }
        });
        (output.into_owned(), replaced)
    }
}
