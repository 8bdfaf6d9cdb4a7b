use crate::*;

// ========== Entry cleaning ==========

#[test]
fn test_entry_cleans_fields() {
    let e = SlangEntry::new("  FTW ", " For The Win\t");
    assert_eq!(e.slang, "ftw");
    assert_eq!(e.meaning, "for the win");
}

#[test]
fn test_entry_blank_slang_has_no_key() {
    assert!(!SlangEntry::new("   ", "something").has_key());
}

#[test]
fn test_entry_denylisted() {
    assert!(SlangEntry::new("IT", "pronoun").is_denylisted());
    assert!(!SlangEntry::new("itz", "it is").is_denylisted());
}

#[test]
fn test_entry_header_sentinel() {
    assert!(SlangEntry::new("?", "I have a question").is_header_sentinel());
    assert!(!SlangEntry::new("?", "what").is_header_sentinel());
}

#[test]
fn test_strip_punctuation() {
    assert_eq!(strip_punctuation("LOL!"), "LOL");
    assert_eq!(strip_punctuation("...wyd?!"), "wyd");
    assert_eq!(strip_punctuation("gr8"), "gr8");
    assert_eq!(strip_punctuation("!!!"), "");
}

// ========== Dictionary ==========

#[test]
fn test_try_insert_no_overwrite() {
    let mut d = SlangDictionary::new();
    assert!(d.try_insert(SlangEntry::new("lol", "laughing out loud")));
    assert!(!d.try_insert(SlangEntry::new("LOL", "lots of love")));
    assert_eq!(d.get("lol"), Some("laughing out loud"));
    assert_eq!(d.len(), 1);
}

#[test]
fn test_try_insert_rejects_inadmissible() {
    let mut d = SlangDictionary::new();
    assert!(!d.try_insert(SlangEntry::new("it", "pronoun")));
    assert!(!d.try_insert(SlangEntry::new("", "nothing")));
    assert!(!d.try_insert(SlangEntry::new("?", "I have a question")));
    assert!(d.is_empty());
}

#[test]
fn test_from_pairs_first_wins() {
    let d: SlangDictionary = [("brb", "be right back"), ("BRB", "big red bus")].into_iter().collect();
    assert_eq!(d.len(), 1);
    assert_eq!(d.get("brb"), Some("be right back"));
}

#[test]
fn test_iteration_sorted() {
    let d: SlangDictionary = [("ttyl", "talk to you later"), ("afk", "away from keyboard")].into_iter().collect();
    let keys: Vec<_> = d.keys().collect();
    assert_eq!(keys, vec!["afk", "ttyl"]);
}

#[test]
fn test_closed_under_expansion() {
    let closed: SlangDictionary = [("lol", "laughing out loud")].into_iter().collect();
    assert!(closed.is_closed_under_expansion());
    let open: SlangDictionary = [("lol", "laughing out loud"), ("imo", "in my opinion, lol")].into_iter().collect();
    assert!(!open.is_closed_under_expansion());
}

#[test]
fn test_dictionary_serde_transparent() {
    let d: SlangDictionary = [("idk", "i don't know")].into_iter().collect();
    let json = serde_json::to_string(&d).unwrap();
    assert_eq!(json, r#"{"idk":"i don't know"}"#);
    let back: SlangDictionary = serde_json::from_str(&json).unwrap();
    assert_eq!(back, d);
}

// ========== Match policy ==========

#[test]
fn test_policy_default_is_token() {
    assert_eq!(MatchPolicy::default(), MatchPolicy::WhitespaceToken);
}

#[test]
fn test_policy_from_str() {
    assert_eq!("regex".parse::<MatchPolicy>().unwrap(), MatchPolicy::DictionaryRegex);
    assert_eq!("whitespace-token".parse::<MatchPolicy>().unwrap(), MatchPolicy::WhitespaceToken);
    assert!("fuzzy".parse::<MatchPolicy>().is_err());
}

#[test]
fn test_policy_serde() {
    let json = serde_json::to_string(&MatchPolicy::DictionaryRegex).unwrap();
    assert_eq!(json, "\"dictionary_regex\"");
}

// ========== Config ==========

#[test]
fn test_config_defaults() {
    let cfg = SlangDecoderConfig::default();
    assert_eq!(cfg.normalizer.policy, MatchPolicy::WhitespaceToken);
    assert!(cfg.persistence.enabled);
    assert!(cfg.cache_ttl().is_none());
    assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
}

#[test]
fn test_config_partial_json() {
    let cfg = SlangDecoderConfig::from_json(
        r#"{"source":{"path":"/tmp/slang.csv"},"cache":{"ttl_secs":3600},"normalizer":{"policy":"dictionary_regex"}}"#,
    )
    .unwrap();
    assert_eq!(cfg.source.path, std::path::PathBuf::from("/tmp/slang.csv"));
    assert_eq!(cfg.cache_ttl(), Some(std::time::Duration::from_secs(3600)));
    assert_eq!(cfg.normalizer.policy, MatchPolicy::DictionaryRegex);
    assert_eq!(cfg.server.port, 8080);
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"persistence":{"enabled":false}}"#).unwrap();
    let cfg = SlangDecoderConfig::from_file(&path).unwrap();
    assert!(!cfg.persistence.enabled);
}

#[test]
fn test_config_bad_json() {
    let err = SlangDecoderConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, SdError::Config(_)));
}

// ========== Errors ==========

#[test]
fn test_build_error_classification() {
    assert!(SdError::SourceNotFound { path: "x".into() }.is_build_error());
    assert!(SdError::MalformedSource("x".into()).is_build_error());
    assert!(!SdError::DictionaryUnavailable.is_build_error());
    assert!(!SdError::AlreadyExists { slang: "lol".into() }.is_build_error());
}

#[test]
fn test_error_display() {
    let e = SdError::AlreadyExists { slang: "ftw".into() };
    assert_eq!(e.to_string(), "Slang already exists: ftw");
}
