use rand::Rng;

use crate::error::StepError;
use crate::lexicon::Lexicon;
use crate::morphology::{self, VerbForm};
use crate::parser::{Dependency, Parse};
use crate::pipeline::StepOutcome;
use crate::resources::LanguageResources;
use crate::tagger::{self, PosTag, TokenKind};

pub const MIN_PASSIVE_WORDS: usize = 4;

pub const FALLBACK_CLAUSE: &str = ", a point that is supported by the evidence";

const PROMOTABLE_PRONOUNS: &[&str] = &["it", "this", "that"];

fn word_count(sentence: &str) -> usize {
    tagger::tokenize(sentence)
        .iter()
        .filter(|t| t.kind == TokenKind::Word)
        .count()
}

pub fn rewrite<R: Rng + ?Sized>(
    sentence: &str,
    probability: f64,
    resources: &LanguageResources,
    rng: &mut R,
) -> Result<StepOutcome, StepError> {
    if rng.random::<f64>() >= probability {
        return Ok(StepOutcome::Unchanged);
    }
    if word_count(sentence) < MIN_PASSIVE_WORDS {
        return Ok(StepOutcome::Unchanged);
    }

    match resources.parser() {
        Some(parser) => {
            let parse = parser.parse(sentence)?;
            Ok(restructure(sentence, &parse, resources.lexicon())
                .map_or(StepOutcome::Unchanged, StepOutcome::Changed))
        }
        None => Ok(append_fallback(sentence)),
    }
}

/// Additive fallback: only for plain declarative sentences
fn append_fallback(sentence: &str) -> StepOutcome {
    let trimmed = sentence.trim_end();
    let body = match trimmed.chars().last() {
        Some('.') => &trimmed[..trimmed.len() - 1],
        Some(c) if c.is_alphanumeric() => trimmed,
        _ => return StepOutcome::Unchanged,
    };
    if body.ends_with(FALLBACK_CLAUSE) {
        return StepOutcome::Unchanged;
    }
    StepOutcome::Changed(format!("{body}{FALLBACK_CLAUSE}."))
}

fn restructure(sentence: &str, parse: &Parse, lexicon: &Lexicon) -> Option<String> {
    if sentence.trim_end().ends_with('?') {
        return None;
    }

    let root = parse.root()?;
    let verb = &parse.tokens[root].token;
    let past = match verb.tag {
        PosTag::Verb(VerbForm::Past) => true,
        PosTag::Verb(VerbForm::Base | VerbForm::ThirdPerson) => false,
        _ => return None,
    };
    if parse.has_auxiliary(root) {
        return None;
    }

    let subj = parse.first(Dependency::Subject)?;
    let obj = parse.first(Dependency::Object)?;
    if parse.tokens[subj].head != Some(root) || parse.tokens[obj].head != Some(root) {
        return None;
    }
    let subj_range = parse.phrase(subj);
    let obj_range = parse.phrase(obj);
    // Only the verb may sit between the two phrases.
    if subj_range.end != root || obj_range.start != root + 1 {
        return None;
    }

    let obj_head = &parse.tokens[obj].token;
    if obj_head.tag == PosTag::Pronoun && !PROMOTABLE_PRONOUNS.contains(&obj_head.lower().as_str())
    {
        return None;
    }

    let subj_span = parse.byte_span(subj_range.clone())?;
    let obj_span = parse.byte_span(obj_range)?;
    let original = sentence.get(subj_span.start..obj_span.end)?;
    let subject_text = sentence.get(subj_span.clone())?;
    let object_text = sentence.get(obj_span)?;

    let plural = obj_head.tag == PosTag::PluralNoun;
    let be = match (past, plural) {
        (false, false) => "is",
        (false, true) => "are",
        (true, false) => "was",
        (true, true) => "were",
    };
    let participle = morphology::past_participle(lexicon, &verb.lemma);

    let subj_head = &parse.tokens[subj].token;
    let agent = if subj_head.tag == PosTag::Pronoun && subj_range.len() == 1 {
        let lower = subj_head.lower();
        lexicon
            .object_case(&lower)
            .map(str::to_string)
            .unwrap_or(lower)
    } else {
        lowercase_common_start(subject_text, lexicon)
    };

    let opens_sentence = !sentence[..subj_span.start].chars().any(char::is_alphanumeric);
    let patient = if opens_sentence {
        capitalize(object_text)
    } else {
        object_text.to_string()
    };

    let passive = format!("{patient} {be} {participle} by {agent}");
    Some(sentence.replacen(original, &passive, 1))
}

/// "The team" -> "the team"; names and acronyms are kept
fn lowercase_common_start(phrase: &str, lexicon: &Lexicon) -> String {
    let end = phrase
        .find(|c: char| !c.is_alphabetic())
        .unwrap_or(phrase.len());
    let first = &phrase[..end];
    let mut chars = first.chars();
    let title_case = chars.next().is_some_and(char::is_uppercase) && chars.all(char::is_lowercase);
    if title_case && lexicon.is_known(&first.to_lowercase()) {
        format!("{}{}", first.to_lowercase(), &phrase[end..])
    } else {
        phrase.to_string()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceOptions;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn forced(sentence: &str, resources: &LanguageResources) -> StepOutcome {
        let mut rng = StdRng::seed_from_u64(3);
        rewrite(sentence, 1.0, resources, &mut rng).unwrap()
    }

    fn changed(outcome: StepOutcome) -> String {
        match outcome {
            StepOutcome::Changed(s) => s,
            StepOutcome::Unchanged => panic!("expected a rewrite"),
        }
    }

    #[test]
    fn simple_clause_becomes_passive() {
        let resources = LanguageResources::shared();
        assert_eq!(
            changed(forced("The researchers use a new method.", &resources)),
            "A new method is used by the researchers."
        );
    }

    #[test]
    fn tense_and_number_agree() {
        let resources = LanguageResources::shared();
        assert_eq!(
            changed(forced("The team wrote the reports.", &resources)),
            "The reports were written by the team."
        );
    }

    #[test]
    fn subject_pronoun_takes_object_case() {
        let resources = LanguageResources::shared();
        assert_eq!(
            changed(forced("We made this decision quickly.", &resources)),
            "This decision was made by us quickly."
        );
    }

    #[test]
    fn clause_without_object_is_unchanged() {
        let resources = LanguageResources::shared();
        assert_eq!(
            forced("It shows that the approach works well.", &resources),
            StepOutcome::Unchanged
        );
    }

    #[test]
    fn double_object_clause_is_unchanged() {
        let resources = LanguageResources::shared();
        assert_eq!(
            forced("The teacher gave the students a test.", &resources),
            StepOutcome::Unchanged
        );
    }

    #[test]
    fn short_and_already_passive_sentences_are_unchanged() {
        let resources = LanguageResources::shared();
        assert_eq!(forced("We use it.", &resources), StepOutcome::Unchanged);
        assert_eq!(
            forced("The method was used by the team.", &resources),
            StepOutcome::Unchanged
        );
    }

    #[test]
    fn without_parser_a_clause_is_appended() {
        let resources = LanguageResources::load(&ResourceOptions {
            use_parser: false,
            thesaurus_path: None,
        });
        assert_eq!(
            changed(forced("The researchers use a new method.", &resources)),
            "The researchers use a new method, a point that is supported by the evidence."
        );
        assert_eq!(
            forced("Does this method work at all?", &resources),
            StepOutcome::Unchanged
        );
    }

    #[test]
    fn zero_probability_is_a_no_op() {
        let resources = LanguageResources::shared();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            rewrite("The researchers use a new method.", 0.0, &resources, &mut rng).unwrap(),
            StepOutcome::Unchanged
        );
    }
}
