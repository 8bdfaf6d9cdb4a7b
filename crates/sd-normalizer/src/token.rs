//! Whitespace-token policy.

use sd_core::{strip_punctuation, SlangDictionary};

/// Meaning for `token` if its punctuation-stripped, lowercased form is a key.
pub fn lookup<'a>(token: &str, dict: &'a SlangDictionary) -> Option<&'a str> {
    let key = strip_punctuation(token).to_lowercase();
    if key.is_empty() {
        return None;
    }
    dict.get(&key)
}

/// Replace every known token, keep unknown tokens verbatim, rejoin with
/// single spaces. Returns the output and the replacement count.
pub fn expand(text: &str, dict: &SlangDictionary) -> (String, usize) {
    let mut replaced = 0;
    let words: Vec<&str> = text
        .split_whitespace()
        .map(|word| match lookup(word, dict) {
            Some(meaning) => {
                replaced += 1;
                meaning
            }
            None => word,
        })
        .collect();
    (words.join(" "), replaced)
}
