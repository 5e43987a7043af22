use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::StepError;
use crate::lexicon::Lexicon;
use crate::morphology::{self, VerbForm};
use crate::pipeline::StepOutcome;
use crate::resources::LanguageResources;
use crate::tagger::{ContentClass, PosTag, TaggedToken};
use crate::transitions;

pub const SYNONYM_POOL_CAP: usize = 4;

/// Shortest word the thesaurus may replace or supply; curated entries
/// such as "use" are exempt.
const MIN_WORD_CHARS: usize = 4;

pub fn substitute<R: Rng + ?Sized>(
    sentence: &str,
    probability: f64,
    word_acceptance: f64,
    resources: &LanguageResources,
    rng: &mut R,
) -> Result<StepOutcome, StepError> {
    if rng.random::<f64>() >= probability {
        return Ok(StepOutcome::Unchanged);
    }

    let tokens = resources.tag(sentence);
    let protected = transitions::leading_transition_end(sentence).unwrap_or(0);

    let mut edits: Vec<(usize, usize, String)> = Vec::new();
    for token in &tokens {
        let Some(class) = token.tag.content_class() else {
            continue;
        };
        if token.start < protected
            || !token.is_alphabetic()
            || transitions::is_transition_word(&token.text)
        {
            continue;
        }
        if rng.random::<f64>() >= word_acceptance {
            continue;
        }

        let pool = candidates(token, class, resources);
        let Some(choice) = pool.choose(rng) else {
            continue;
        };
        let inflected = inflect(resources.lexicon(), choice, token.tag);
        edits.push((token.start, token.end, match_case(&token.text, &inflected)));
    }

    if edits.is_empty() {
        return Ok(StepOutcome::Unchanged);
    }
    let mut out = sentence.to_string();
    for (start, end, replacement) in edits.into_iter().rev() {
        out.replace_range(start..end, &replacement);
    }
    Ok(StepOutcome::Changed(out))
}

fn candidates(token: &TaggedToken, class: ContentClass, resources: &LanguageResources) -> Vec<String> {
    let original = token.lower();
    let lemma = token.lemma.to_lowercase();
    let usable = |candidate: &str| {
        let lower = candidate.to_lowercase();
        !candidate.is_empty()
            && candidate.chars().all(char::is_alphabetic)
            && lower != original
            && lower != lemma
    };

    if let Some(curated) = resources.academic_alternatives(&lemma) {
        let pool: Vec<String> = curated
            .iter()
            .filter(|c| usable(c))
            .map(|c| c.to_string())
            .collect();
        if !pool.is_empty() {
            return pool;
        }
    }

    if token.text.chars().count() < MIN_WORD_CHARS {
        return Vec::new();
    }
    resources
        .thesaurus()
        .synonyms(&lemma, class)
        .into_iter()
        .filter(|c| usable(c) && c.chars().count() >= MIN_WORD_CHARS)
        .take(SYNONYM_POOL_CAP)
        .collect()
}

fn inflect(lexicon: &Lexicon, base: &str, tag: PosTag) -> String {
    match tag {
        PosTag::Verb(VerbForm::Base) => base.to_string(),
        PosTag::Verb(form) => morphology::inflect_verb(lexicon, base, form),
        PosTag::PluralNoun => morphology::plural(lexicon, base),
        _ => base.to_string(),
    }
}

pub fn match_case(original: &str, replacement: &str) -> String {
    let letters: Vec<char> = original.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        return replacement.to_uppercase();
    }
    if letters.first().is_some_and(|c| c.is_uppercase()) {
        let lower = replacement.to_lowercase();
        let mut chars = lower.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => lower,
        };
    }
    replacement.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::TableThesaurus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn forced(sentence: &str) -> String {
        let resources = LanguageResources::shared();
        let mut rng = StdRng::seed_from_u64(11);
        match substitute(sentence, 1.0, 1.0, &resources, &mut rng).unwrap() {
            StepOutcome::Changed(s) => s,
            StepOutcome::Unchanged => sentence.to_string(),
        }
    }

    #[test]
    fn case_patterns_are_copied() {
        assert_eq!(match_case("Use", "utilize"), "Utilize");
        assert_eq!(match_case("USE", "utilize"), "UTILIZE");
        assert_eq!(match_case("use", "Utilize"), "utilize");
    }

    #[test]
    fn title_case_word_gets_title_case_replacement() {
        let out = forced("Use this method.");
        let first = out.split_whitespace().next().unwrap();
        assert!(
            ["Utilize", "Employ", "Apply", "Leverage"].contains(&first),
            "unexpected first word in {out:?}"
        );
        assert!(out.ends_with('.'));
    }

    #[test]
    fn replacements_keep_verb_inflection() {
        let out = forced("It shows the pattern.");
        let verb = out.split_whitespace().nth(1).unwrap();
        assert!(
            ["demonstrates", "illustrates", "reveals"].contains(&verb),
            "unexpected verb in {out:?}"
        );
    }

    #[test]
    fn transitions_and_short_words_are_kept() {
        let out = forced("Moreover, we ran it.");
        assert!(out.starts_with("Moreover, we ran it"), "{out}");
        let out = forced("In contrast, it is.");
        assert!(out.starts_with("In contrast,"), "{out}");
    }

    #[test]
    fn punctuation_between_tokens_is_untouched() {
        let out = forced("The big problem, clearly, remains.");
        assert_eq!(out.matches(", ").count(), 2, "{out}");
        assert!(out.ends_with("remains."), "{out}");
    }

    #[test]
    fn short_thesaurus_words_are_skipped() {
        let mut table = TableThesaurus::default();
        table.insert(ContentClass::Noun, "method", ["way", "technique"]);
        table.insert(ContentClass::Verb, "run", ["operate"]);
        let resources = LanguageResources::builtin().with_thesaurus(Box::new(table));
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = substitute("We run the method.", 1.0, 1.0, &resources, &mut rng).unwrap();
            let StepOutcome::Changed(out) = outcome else {
                panic!("expected a substitution");
            };
            assert_eq!(out, "We run the technique.");
        }
    }

    #[test]
    fn zero_acceptance_changes_nothing() {
        let resources = LanguageResources::shared();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(
            substitute("Use this method.", 1.0, 0.0, &resources, &mut rng).unwrap(),
            StepOutcome::Unchanged
        );
    }
}
