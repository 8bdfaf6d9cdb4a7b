use crate::*;
use sd_core::{MatchPolicy, SdError, SlangDictionary};

fn dict(pairs: &[(&str, &str)]) -> SlangDictionary {
    pairs.iter().copied().collect()
}

fn chat_dict() -> SlangDictionary {
    dict(&[
        ("wyd", "what you doing"),
        ("lol", "laughing out loud"),
        ("gr8", "great"),
        ("brb", "be right back"),
    ])
}

// ========== Whitespace-token policy ==========

#[test]
fn test_token_basic() {
    let d = chat_dict();
    assert_eq!(normalize("wyd", Some(&d)).unwrap(), "what you doing");
}

#[test]
fn test_token_case_and_punctuation() {
    let d = dict(&[("lol", "laughing out loud")]);
    assert_eq!(normalize("LOL!", Some(&d)).unwrap(), "laughing out loud");
    assert_eq!(normalize("(lol)", Some(&d)).unwrap(), "laughing out loud");
}

#[test]
fn test_token_punctuation_discarded_on_match() {
    let d = dict(&[("wyd", "what you doing"), ("lol", "laughing out loud")]);
    assert_eq!(
        normalize("wyd lol, ttyl!", Some(&d)).unwrap(),
        "what you doing laughing out loud ttyl!"
    );
}

#[test]
fn test_token_unknown_passthrough_verbatim() {
    let d = chat_dict();
    assert_eq!(normalize("Hello, World!", Some(&d)).unwrap(), "Hello, World!");
}

#[test]
fn test_token_whitespace_collapses() {
    let d = chat_dict();
    assert_eq!(normalize("  see\tyou \n\n later  ", Some(&d)).unwrap(), "see you later");
    assert_eq!(normalize("brb   gr8", Some(&d)).unwrap(), "be right back great");
}

#[test]
fn test_token_unknown_only_equals_collapsed_input() {
    let d = chat_dict();
    for s in ["nothing to see here", "Rust is fun.", "a  b\tc", "it is what it is"] {
        let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(normalize(s, Some(&d)).unwrap(), collapsed);
    }
}

#[test]
fn test_token_punctuation_only_token() {
    let d = dict(&[("?", "what do you mean"), ("lol", "laughing out loud")]);
    assert_eq!(normalize("?? !!", Some(&d)).unwrap(), "?? !!");
}

#[test]
fn test_token_inner_punctuation_kept() {
    let d = dict(&[("can't", "cannot")]);
    assert_eq!(normalize("I CAN'T.", Some(&d)).unwrap(), "I cannot");
}

#[test]
fn test_token_no_substring_match() {
    let d = chat_dict();
    assert_eq!(normalize("lollipop", Some(&d)).unwrap(), "lollipop");
}

#[test]
fn test_empty_input() {
    let d = chat_dict();
    assert_eq!(normalize("", Some(&d)).unwrap(), "");
    assert_eq!(normalize("   ", Some(&d)).unwrap(), "");
    assert_eq!(Normalizer::dictionary_regex().normalize("", Some(&d)).unwrap(), "");
}

#[test]
fn test_missing_dictionary_refused() {
    assert!(matches!(normalize("lol", None), Err(SdError::DictionaryUnavailable)));
    assert!(matches!(normalize("", None), Err(SdError::DictionaryUnavailable)));
    assert!(matches!(
        Normalizer::dictionary_regex().normalize("lol", None),
        Err(SdError::DictionaryUnavailable)
    ));
}

#[test]
fn test_empty_dictionary_passthrough() {
    let d = SlangDictionary::new();
    assert_eq!(normalize("lol  ok", Some(&d)).unwrap(), "lol ok");
    assert_eq!(Normalizer::dictionary_regex().normalize("lol  ok", Some(&d)).unwrap(), "lol  ok");
}

#[test]
fn test_dictionary_not_mutated() {
    let d = chat_dict();
    let before = d.clone();
    normalize("wyd lol gr8", Some(&d)).unwrap();
    Normalizer::dictionary_regex().normalize("wyd lol gr8", Some(&d)).unwrap();
    assert_eq!(d, before);
}

#[test]
fn test_idempotent_when_closed() {
    let d = chat_dict();
    assert!(d.is_closed_under_expansion());
    for s in ["wyd lol", "brb, gr8 day!", "plain text"] {
        let once = normalize(s, Some(&d)).unwrap();
        let twice = normalize(&once, Some(&d)).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn test_not_idempotent_when_open() {
    let d = dict(&[("imo", "in my opinion lol"), ("lol", "laughing out loud")]);
    assert!(!d.is_closed_under_expansion());
    let once = normalize("imo", Some(&d)).unwrap();
    let twice = normalize(&once, Some(&d)).unwrap();
    assert_ne!(once, twice);
}

#[test]
fn test_detailed_counts() {
    let d = chat_dict();
    let n = Normalizer::default().normalize_detailed("wyd lol lol ok", Some(&d)).unwrap();
    assert_eq!(n.replacements, 3);
    assert_eq!(n.policy, MatchPolicy::WhitespaceToken);
}

// ========== Dictionary regex policy ==========

#[test]
fn test_regex_preserves_surroundings() {
    let d = dict(&[("wyd", "what you doing"), ("lol", "laughing out loud")]);
    let out = Normalizer::dictionary_regex().normalize("wyd lol, ttyl!", Some(&d)).unwrap();
    assert_eq!(out, "what you doing laughing out loud, ttyl!");
}

#[test]
fn test_regex_keeps_whitespace() {
    let d = chat_dict();
    let out = Normalizer::dictionary_regex().normalize("brb\t\tLOL\n", Some(&d)).unwrap();
    assert_eq!(out, "be right back\t\tlaughing out loud\n");
}

#[test]
fn test_regex_word_boundary() {
    let d = chat_dict();
    let out = Normalizer::dictionary_regex().normalize("lollipop lol", Some(&d)).unwrap();
    assert_eq!(out, "lollipop laughing out loud");
}

#[test]
fn test_regex_longest_key_wins() {
    let d = dict(&[("lol", "laughing out loud"), ("lolz", "laughs")]);
    let out = Normalizer::dictionary_regex().normalize("lolz lol", Some(&d)).unwrap();
    assert_eq!(out, "laughs laughing out loud");
}

#[test]
fn test_regex_escapes_metacharacters() {
    let d = dict(&[("a.b", "alpha beta"), ("ab", "absolutely")]);
    let out = Normalizer::dictionary_regex().normalize("axb a.b ab", Some(&d)).unwrap();
    assert_eq!(out, "axb alpha beta absolutely");
}

#[test]
fn test_regex_counts() {
    let d = chat_dict();
    let n = Normalizer::dictionary_regex().normalize_detailed("LOL lol Lol", Some(&d)).unwrap();
    assert_eq!(n.replacements, 3);
    assert_eq!(n.output, "laughing out loud laughing out loud laughing out loud");
}

#[test]
fn test_pattern_reusable() {
    let d = chat_dict();
    let p = DictionaryPattern::new(&d).unwrap();
    assert_eq!(p.replace("gr8!", &d).0, "great!");
    assert_eq!(p.replace("brb", &d).0, "be right back");
}

#[test]
fn test_policies_differ() {
    let d = chat_dict();
    let text = "lol,  gr8";
    let a = Normalizer::whitespace_token().normalize(text, Some(&d)).unwrap();
    let b = Normalizer::dictionary_regex().normalize(text, Some(&d)).unwrap();
    assert_eq!(a, "laughing out loud great");
    assert_eq!(b, "laughing out loud,  great");
}
