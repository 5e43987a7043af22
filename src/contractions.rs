use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const WHOLE_WORDS: &[(&str, &str)] = &[
    ("won't", "will not"),
    ("can't", "cannot"),
    ("shan't", "shall not"),
    ("ain't", "is not"),
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("isn't", "is not"),
    ("let's", "let us"),
    ("i'm", "I am"),
    ("it's", "it is"),
    ("that's", "that is"),
    ("what's", "what is"),
    ("there's", "there is"),
    ("here's", "here is"),
    ("he's", "he is"),
    ("she's", "she is"),
    ("who's", "who is"),
    ("where's", "where is"),
];

/// Suffixes that expand after any word. Bare "'s" is left alone because
/// it is usually a possessive.
const SUFFIXES: &[(&str, &str)] = &[
    ("n't", "not"),
    ("'re", "are"),
    ("'ll", "will"),
    ("'ve", "have"),
    ("'d", "would"),
    ("'m", "am"),
];

struct Rule {
    key_len: usize,
    pattern: Regex,
    expansion: &'static str,
    suffix: bool,
}

fn key_pattern(key: &str) -> String {
    regex::escape(key).replace('\'', "['\u{2019}]")
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let mut rules: Vec<Rule> = WHOLE_WORDS
        .iter()
        .map(|&(key, expansion)| Rule {
            key_len: key.len(),
            pattern: Regex::new(&format!(r"(?i)\b{}\b", key_pattern(key))).unwrap(),
            expansion,
            suffix: false,
        })
        .chain(SUFFIXES.iter().map(|&(key, expansion)| Rule {
            key_len: key.len(),
            pattern: Regex::new(&format!(r"(?i)\b(\p{{L}}+){}\b", key_pattern(key))).unwrap(),
            expansion,
            suffix: true,
        }))
        .collect();
    rules.sort_by(|a, b| b.key_len.cmp(&a.key_len));
    rules
});

fn is_all_caps(s: &str) -> bool {
    let letters: Vec<char> = s.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|c| c.is_uppercase())
}

fn match_case(matched: &str, expansion: &str) -> String {
    if is_all_caps(matched) {
        return expansion.to_uppercase();
    }
    let mut chars = expansion.chars();
    match (matched.chars().next(), chars.next()) {
        (Some(m), Some(first)) if m.is_uppercase() => {
            first.to_uppercase().chain(chars).collect()
        }
        _ => expansion.to_string(),
    }
}

pub fn expand(sentence: &str) -> String {
    let mut text: Cow<'_, str> = Cow::Borrowed(sentence);
    for rule in RULES.iter() {
        if !rule.pattern.is_match(&text) {
            continue;
        }
        let replaced = rule.pattern.replace_all(&text, |caps: &Captures<'_>| {
            let matched = &caps[0];
            if rule.suffix {
                let stem = &caps[1];
                let expansion = if is_all_caps(matched) {
                    rule.expansion.to_uppercase()
                } else {
                    rule.expansion.to_string()
                };
                format!("{stem} {expansion}")
            } else {
                match_case(matched, rule.expansion)
            }
        });
        text = Cow::Owned(replaced.into_owned());
    }
    text.into_owned()
}
