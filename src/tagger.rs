use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::{LexClass, Lexicon};
use crate::morphology::{self, VerbForm};

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Noun,
    PluralNoun,
    ProperNoun,
    Verb(VerbForm),
    Auxiliary,
    Modal,
    Adjective,
    Adverb,
    Determiner,
    Pronoun,
    Preposition,
    Conjunction,
    Numeral,
    Punctuation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentClass {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl ContentClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "noun" | "n" => Some(Self::Noun),
            "verb" | "v" => Some(Self::Verb),
            "adjective" | "adj" | "a" => Some(Self::Adjective),
            "adverb" | "adv" | "r" => Some(Self::Adverb),
            _ => None,
        }
    }
}

impl PosTag {
    /// Content class for substitution. Proper nouns are never substituted.
    pub fn content_class(&self) -> Option<ContentClass> {
        match self {
            Self::Noun | Self::PluralNoun => Some(ContentClass::Noun),
            Self::Verb(_) => Some(ContentClass::Verb),
            Self::Adjective => Some(ContentClass::Adjective),
            Self::Adverb => Some(ContentClass::Adverb),
            _ => None,
        }
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::Noun | Self::PluralNoun | Self::ProperNoun)
    }

    pub fn is_verb(&self) -> bool {
        matches!(self, Self::Verb(_))
    }

    fn from_class(class: LexClass) -> Self {
        match class {
            LexClass::Determiner => Self::Determiner,
            LexClass::Pronoun => Self::Pronoun,
            LexClass::Preposition => Self::Preposition,
            LexClass::Conjunction => Self::Conjunction,
            LexClass::Auxiliary => Self::Auxiliary,
            LexClass::Modal => Self::Modal,
            LexClass::Adverb => Self::Adverb,
            LexClass::Adjective => Self::Adjective,
            LexClass::Verb => Self::Verb(VerbForm::Base),
            LexClass::Noun => Self::Noun,
        }
    }
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Number,
    Punct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub tag: PosTag,
    pub lemma: String,
}

impl TaggedToken {
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn is_alphabetic(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_alphabetic)
    }
}

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\p{L}+(?:['\u{2019}]\p{L}+)*(?:-\p{L}+)*|\p{N}+(?:[.,]\p{N}+)*|\S").unwrap()
});

pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| {
            let s = m.as_str();
            let kind = match s.chars().next() {
                Some(c) if c.is_alphabetic() => TokenKind::Word,
                Some(c) if c.is_numeric() => TokenKind::Number,
                _ => TokenKind::Punct,
            };
            Token {
                text: s,
                start: m.start(),
                end: m.end(),
                kind,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tagger
// ---------------------------------------------------------------------------

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "al", "ic", "less", "ary", "ant", "ent",
];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ism", "ance", "ence", "ship", "er", "or", "ist",
];

type Candidate = (PosTag, String);

#[derive(Debug, Clone)]
pub struct Tagger {
    lexicon: Arc<Lexicon>,
}

impl Tagger {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let tokens = tokenize(text);
        let candidates: Vec<Vec<Candidate>> = tokens
            .iter()
            .enumerate()
            .map(|(i, tok)| self.candidates(tok, is_sentence_initial(&tokens, i)))
            .collect();

        let mut tagged: Vec<TaggedToken> = Vec::with_capacity(tokens.len());
        for (i, tok) in tokens.iter().enumerate() {
            let prev = tagged.last().map(|t: &TaggedToken| (t.tag, t.lower()));
            let next = candidates.get(i + 1).map(Vec::as_slice).unwrap_or(&[]);
            let (tag, lemma) = self.resolve(tok, &candidates[i], prev, next);
            tagged.push(TaggedToken {
                text: tok.text.to_string(),
                start: tok.start,
                end: tok.end,
                tag,
                lemma,
            });
        }
        tagged
    }

    fn candidates(&self, tok: &Token<'_>, initial: bool) -> Vec<Candidate> {
        match tok.kind {
            TokenKind::Punct => return vec![(PosTag::Punctuation, tok.text.to_string())],
            TokenKind::Number => return vec![(PosTag::Numeral, tok.text.to_string())],
            TokenKind::Word => {}
        }

        let lower = tok.text.to_lowercase();
        let lex = &*self.lexicon;

        if lower == "i" {
            return vec![(PosTag::Pronoun, lower)];
        }
        if let Some(stem) = possessive_stem(&lower) {
            return vec![(PosTag::Noun, stem.to_string())];
        }

        let mut out: Vec<Candidate> = lex
            .classes(&lower)
            .iter()
            .map(|&class| (PosTag::from_class(class), lower.clone()))
            .collect();
        if let Some((lemma, form)) = morphology::verb_lemma(lex, &lower) {
            if form != VerbForm::Base && !out.iter().any(|(t, _)| *t == PosTag::Auxiliary) {
                out.push((PosTag::Verb(form), lemma));
            }
        }
        if let Some(lemma) = morphology::known_plural(lex, &lower) {
            out.push((PosTag::PluralNoun, lemma));
        }
        if !out.is_empty() {
            return out;
        }

        vec![self.guess(tok.text, &lower, initial)]
    }

    fn guess(&self, text: &str, lower: &str, initial: bool) -> Candidate {
        let capitalized = text.chars().next().is_some_and(char::is_uppercase);
        let acronym = text.chars().count() > 1 && text.chars().all(|c| c.is_uppercase());
        if acronym || (capitalized && !initial) {
            return (PosTag::ProperNoun, text.to_string());
        }
        let len = lower.chars().count();
        if lower.ends_with("ly") && len > 4 {
            return (PosTag::Adverb, lower.to_string());
        }
        if len > 5 && lower.ends_with("ing") {
            return (PosTag::Verb(VerbForm::Gerund), morphology::guess_verb_lemma(lower));
        }
        if len > 4 && lower.ends_with("ed") {
            return (PosTag::Verb(VerbForm::Past), morphology::guess_verb_lemma(lower));
        }
        if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return (PosTag::Adjective, lower.to_string());
        }
        if morphology::looks_plural(lower) {
            let (lemma, _) = morphology::noun_lemma(&self.lexicon, lower);
            return (PosTag::PluralNoun, lemma);
        }
        if NOUN_SUFFIXES.iter().any(|s| lower.ends_with(s)) || !capitalized {
            return (PosTag::Noun, lower.to_string());
        }
        (PosTag::ProperNoun, text.to_string())
    }

    /// Pick one reading using the previous (resolved) and next (unresolved) tokens
    fn resolve(
        &self,
        tok: &Token<'_>,
        candidates: &[Candidate],
        prev: Option<(PosTag, String)>,
        next: &[Candidate],
    ) -> Candidate {
        let first = candidates
            .first()
            .cloned()
            .unwrap_or((PosTag::Noun, tok.text.to_lowercase()));
        if candidates.len() == 1 {
            return fix_participle(first, prev.as_ref());
        }

        let lower = tok.text.to_lowercase();
        let next_tag = next.first().map(|(t, _)| *t);
        let next_is_nominal = next_tag.is_some_and(|t| {
            t.is_nominal() || matches!(t, PosTag::Adjective | PosTag::Numeral)
        });

        // Demonstratives and "her": determiner before a noun phrase.
        if matches!(lower.as_str(), "this" | "that" | "these" | "those" | "her") {
            let pick = if next_is_nominal {
                PosTag::Determiner
            } else if lower == "that" {
                PosTag::Conjunction
            } else {
                PosTag::Pronoun
            };
            return (pick, lower);
        }

        let noun = candidates.iter().find(|(t, _)| t.is_nominal()).cloned();
        let verb = candidates.iter().find(|(t, _)| t.is_verb()).cloned();
        let (Some(noun), Some(verb)) = (noun, verb) else {
            return fix_participle(first, prev.as_ref());
        };

        let next_can_be_verb = next.iter().any(|(t, _)| t.is_verb());
        let next_opens_phrase = next_tag.is_some_and(|t| {
            matches!(
                t,
                PosTag::Determiner
                    | PosTag::Pronoun
                    | PosTag::Numeral
                    | PosTag::ProperNoun
                    | PosTag::Adjective
                    | PosTag::Adverb
                    | PosTag::Preposition
                    | PosTag::Conjunction
                    | PosTag::Punctuation
            )
        });

        let pick_verb = match prev {
            None => verb.0 == PosTag::Verb(VerbForm::Base) && next_opens_phrase,
            Some((_, ref word)) if word == "to" => verb.0 == PosTag::Verb(VerbForm::Base),
            Some((tag, _)) => match tag {
                PosTag::Determiner | PosTag::Adjective | PosTag::Preposition | PosTag::Numeral => {
                    false
                }
                PosTag::Modal | PosTag::Auxiliary | PosTag::Pronoun | PosTag::Adverb => true,
                PosTag::Noun | PosTag::PluralNoun | PosTag::ProperNoun => {
                    !(next_can_be_verb && !next_opens_phrase)
                }
                _ => first.0.is_verb(),
            },
        };

        let chosen = if pick_verb { verb } else { noun };
        fix_participle(chosen, prev.as_ref())
    }
}

/// Past after a be/have auxiliary is a participle
fn fix_participle(candidate: Candidate, prev: Option<&(PosTag, String)>) -> Candidate {
    match (candidate.0, prev) {
        (PosTag::Verb(VerbForm::Past), Some((PosTag::Auxiliary, _))) => {
            (PosTag::Verb(VerbForm::Participle), candidate.1)
        }
        _ => candidate,
    }
}

fn is_sentence_initial(tokens: &[Token<'_>], index: usize) -> bool {
    tokens[..index]
        .iter()
        .all(|t| t.kind == TokenKind::Punct && !matches!(t.text, "," | ";" | ":"))
}

fn possessive_stem(lower: &str) -> Option<&str> {
    lower
        .strip_suffix("'s")
        .or_else(|| lower.strip_suffix("\u{2019}s"))
        .filter(|stem| !stem.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<(String, PosTag)> {
        Tagger::new(Arc::new(Lexicon::builtin()))
            .tag(text)
            .into_iter()
            .map(|t| (t.text, t.tag))
            .collect()
    }

    fn tag_of(text: &str, word: &str) -> PosTag {
        tags(text)
            .into_iter()
            .find(|(w, _)| w == word)
            .map(|(_, t)| t)
            .unwrap()
    }

    #[test]
    fn tokenizer_keeps_offsets_and_contractions() {
        let toks = tokenize("It's 3.5 times, ok?");
        let texts: Vec<&str> = toks.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["It's", "3.5", "times", ",", "ok", "?"]);
        assert_eq!(toks[1].start, 5);
        assert_eq!(toks[1].kind, TokenKind::Number);
    }

    #[test]
    fn verb_after_plural_subject() {
        let text = "The researchers use a new method.";
        assert_eq!(tag_of(text, "researchers"), PosTag::PluralNoun);
        assert_eq!(tag_of(text, "use"), PosTag::Verb(VerbForm::Base));
        assert_eq!(tag_of(text, "new"), PosTag::Adjective);
        assert_eq!(tag_of(text, "method"), PosTag::Noun);
    }

    #[test]
    fn noun_after_determiner() {
        assert_eq!(tag_of("The use of tools is common.", "use"), PosTag::Noun);
        assert_eq!(
            tag_of("It shows that the approach works well.", "shows"),
            PosTag::Verb(VerbForm::ThirdPerson)
        );
        assert_eq!(
            tag_of("It shows that the approach works well.", "that"),
            PosTag::Conjunction
        );
        assert_eq!(
            tag_of("It shows that the approach works well.", "works"),
            PosTag::Verb(VerbForm::ThirdPerson)
        );
    }

    #[test]
    fn compound_noun_before_verb() {
        let text = "The test results show a trend.";
        assert_eq!(tag_of(text, "results"), PosTag::PluralNoun);
        assert_eq!(tag_of(text, "show"), PosTag::Verb(VerbForm::Base));
    }

    #[test]
    fn imperative_opening_is_a_verb() {
        assert_eq!(tag_of("Use this method.", "Use"), PosTag::Verb(VerbForm::Base));
        assert_eq!(tag_of("Use this method.", "this"), PosTag::Determiner);
    }

    #[test]
    fn participle_after_auxiliary() {
        assert_eq!(
            tag_of("The method was used here.", "used"),
            PosTag::Verb(VerbForm::Participle)
        );
    }

    #[test]
    fn unknown_words_fall_back_to_suffixes() {
        let text = "Marie carefully catalogued luminous specimens.";
        assert_eq!(tag_of(text, "carefully"), PosTag::Adverb);
        assert_eq!(tag_of(text, "catalogued"), PosTag::Verb(VerbForm::Past));
        assert_eq!(tag_of(text, "luminous"), PosTag::Adjective);
        assert_eq!(tag_of(text, "specimens"), PosTag::PluralNoun);
        assert_eq!(tag_of("We met Marie today.", "Marie"), PosTag::ProperNoun);
    }
}
