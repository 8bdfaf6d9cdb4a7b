//! Normalizer — dispatches one request to exactly one matching policy.

use crate::pattern::DictionaryPattern;
use crate::token;
use sd_core::error::{Result, SdError};
use sd_core::{MatchPolicy, SlangDictionary};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Normalized text with statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Normalization {
    pub output: String,
    pub replacements: usize,
    pub policy: MatchPolicy,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    pub policy: MatchPolicy,
}

impl Normalizer {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn whitespace_token() -> Self {
        Self::new(MatchPolicy::WhitespaceToken)
    }

    pub fn dictionary_regex() -> Self {
        Self::new(MatchPolicy::DictionaryRegex)
    }

    /// Normalize `text` against a dictionary snapshot.
    ///
    /// Refuses to run without a dictionary; never mutates it.
    pub fn normalize(&self, text: &str, dict: Option<&SlangDictionary>) -> Result<String> {
        self.normalize_detailed(text, dict).map(|n| n.output)
    }

    pub fn normalize_detailed(
        &self,
        text: &str,
        dict: Option<&SlangDictionary>,
    ) -> Result<Normalization> {
        self.normalize_compiled(text, dict, None)
    }

    /// Like `normalize_detailed`, reusing `pattern` for the regex policy.
    /// `pattern` must have been compiled from `dict`; without one it is
    /// compiled for this call only.
    pub fn normalize_compiled(
        &self,
        text: &str,
        dict: Option<&SlangDictionary>,
        pattern: Option<&DictionaryPattern>,
    ) -> Result<Normalization> {
        let dict = dict.ok_or(SdError::DictionaryUnavailable)?;
        if text.is_empty() {
            return Ok(Normalization { output: String::new(), replacements: 0, policy: self.policy });
        }

        let (output, replacements) = match self.policy {
            MatchPolicy::WhitespaceToken => token::expand(text, dict),
            MatchPolicy::DictionaryRegex => match pattern {
                Some(pattern) => pattern.replace(text, dict),
                None => DictionaryPattern::new(dict)?.replace(text, dict),
            },
        };
        debug!(policy = %self.policy, replacements, "text normalized");

        Ok(Normalization { output, replacements, policy: self.policy })
    }
}

/// Normalize with the default whitespace-token policy.
pub fn normalize(text: &str, dict: Option<&SlangDictionary>) -> Result<String> {
    Normalizer::default().normalize(text, dict)
}
