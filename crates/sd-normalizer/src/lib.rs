//! Text Normalizer — rewrites slang tokens using a `SlangDictionary`.
//!
//! Policies:
//! - Whitespace-token (default): split, strip punctuation, case-fold, look up.
//!   Inter-word whitespace collapses to a single space.
//! - Dictionary regex: one word-bounded alternation over every key; only the
//!   matched spans change.

pub mod normalizer;
pub mod pattern;
pub mod token;

pub use normalizer::{normalize, Normalization, Normalizer};
pub use pattern::DictionaryPattern;

#[cfg(test)]
mod tests;
