use once_cell::sync::Lazy;
use rand::seq::IndexedRandom;
use rand::Rng;
use regex::Regex;

use crate::lexicon::Lexicon;
use crate::pipeline::StepOutcome;

pub const TRANSITIONS: &[&str] = &[
    "Moreover",
    "Additionally",
    "Furthermore",
    "However",
    "Therefore",
    "Consequently",
    "Notably",
    "Importantly",
    "Specifically",
    "In contrast",
    "Conversely",
    "Hence",
];

static TRANSITION_ALTERNATION: Lazy<String> = Lazy::new(|| {
    TRANSITIONS
        .iter()
        .map(|t| t.to_lowercase().replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|")
});

static LEADING_TRANSITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^\s*(?:{})\b", *TRANSITION_ALTERNATION)).unwrap()
});

static REPEATED_TRANSITION_RE: Lazy<Regex> = Lazy::new(|| {
    let t = &*TRANSITION_ALTERNATION;
    Regex::new(&format!(
        r"(?i)\b((?:{t})\s*,\s*)(?:(?:{t})\s*,\s*)+"
    ))
    .unwrap()
});

pub fn starts_with_transition(sentence: &str) -> bool {
    LEADING_TRANSITION_RE.is_match(sentence)
}

pub fn leading_transition_end(sentence: &str) -> Option<usize> {
    LEADING_TRANSITION_RE.find(sentence).map(|m| m.end())
}

pub fn is_transition_word(word: &str) -> bool {
    TRANSITIONS
        .iter()
        .any(|t| !t.contains(' ') && t.eq_ignore_ascii_case(word))
}

pub fn inject<R: Rng + ?Sized>(
    sentence: &str,
    index: usize,
    probability: f64,
    skip_first: bool,
    lexicon: &Lexicon,
    rng: &mut R,
) -> StepOutcome {
    let sentence = sentence.trim();
    if !sentence.chars().any(char::is_alphanumeric)
        || (skip_first && index == 0)
        || starts_with_transition(sentence)
    {
        return StepOutcome::Unchanged;
    }
    if rng.random::<f64>() >= probability {
        return StepOutcome::Unchanged;
    }
    let Some(transition) = TRANSITIONS.choose(rng) else {
        return StepOutcome::Unchanged;
    };
    StepOutcome::Changed(format!("{}, {}", transition, decapitalize_common(sentence, lexicon)))
}

/// Lowercase a title-cased first word when it is an ordinary lexicon word,
/// so "The method" becomes "the method" but "I", "NASA" and "Smith" stay.
fn decapitalize_common(sentence: &str, lexicon: &Lexicon) -> String {
    let word_end = sentence
        .find(|c: char| !c.is_alphabetic())
        .unwrap_or(sentence.len());
    let word = &sentence[..word_end];
    let mut chars = word.chars();
    let title_case = chars.next().is_some_and(char::is_uppercase) && chars.all(char::is_lowercase);
    if word == "I" || !title_case {
        return sentence.to_string();
    }
    let lower = word.to_lowercase();
    if !lexicon.is_known(&lower) {
        return sentence.to_string();
    }
    format!("{}{}", lower, &sentence[word_end..])
}

pub fn collapse_repeated(text: &str) -> String {
    REPEATED_TRANSITION_RE.replace_all(text, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lexicon() -> Lexicon {
        Lexicon::builtin()
    }

    fn forced(sentence: &str, index: usize) -> StepOutcome {
        let mut rng = StdRng::seed_from_u64(1);
        inject(sentence, index, 1.0, true, &lexicon(), &mut rng)
    }

    #[test]
    fn detects_leading_transitions() {
        assert!(starts_with_transition("However, the data disagree."));
        assert!(starts_with_transition("in   contrast, nothing changed."));
        assert!(!starts_with_transition("Howevering is not a word."));
        assert!(!starts_with_transition("The result holds."));
        assert_eq!(leading_transition_end("In contrast, it fails."), Some(11));
    }

    #[test]
    fn first_sentence_is_skipped() {
        assert_eq!(forced("The method works.", 0), StepOutcome::Unchanged);
    }

    #[test]
    fn forced_injection_prefixes_and_lowercases() {
        let StepOutcome::Changed(out) = forced("The method works.", 1) else {
            panic!("expected a transition");
        };
        let (prefix, rest) = out.split_once(", ").unwrap();
        assert!(TRANSITIONS.contains(&prefix), "unexpected prefix {prefix}");
        assert_eq!(rest, "the method works.");
    }

    #[test]
    fn names_and_pronoun_i_keep_their_case() {
        for sentence in ["I agree with this.", "Smith disagrees.", "NASA funded it."] {
            let StepOutcome::Changed(out) = forced(sentence, 2) else {
                panic!("expected a transition");
            };
            assert!(out.ends_with(sentence), "{out}");
        }
    }

    #[test]
    fn existing_transition_blocks_injection() {
        assert_eq!(forced("Moreover, it works.", 3), StepOutcome::Unchanged);
    }

    #[test]
    fn zero_probability_never_injects() {
        let mut rng = StdRng::seed_from_u64(9);
        for i in 1..50 {
            assert_eq!(
                inject("The method works.", i, 0.0, false, &lexicon(), &mut rng),
                StepOutcome::Unchanged
            );
        }
    }

    #[test]
    fn repeated_connectives_collapse() {
        assert_eq!(
            collapse_repeated("Moreover, However, the result holds."),
            "Moreover, the result holds."
        );
        assert_eq!(
            collapse_repeated("Hence, in contrast,  therefore, it fails."),
            "Hence, it fails."
        );
        assert_eq!(collapse_repeated("However, it works."), "However, it works.");
    }
}
