use std::ops::Range;
use std::sync::Arc;

use crate::error::StepError;
use crate::lexicon::Lexicon;
use crate::morphology::VerbForm;
use crate::tagger::{PosTag, TaggedToken, Tagger};

/// Longest sentence (in tokens) the built-in parser accepts
pub const MAX_PARSE_TOKENS: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    Root,
    Subject,
    /// Subject of a clause that is already passive
    PassiveSubject,
    Object,
    Auxiliary,
    Modifier,
    Punct,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedToken {
    pub token: TaggedToken,
    pub dep: Dependency,
    pub head: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parse {
    pub tokens: Vec<ParsedToken>,
}

impl Parse {
    pub fn root(&self) -> Option<usize> {
        self.first(Dependency::Root)
    }

    pub fn first(&self, dep: Dependency) -> Option<usize> {
        self.tokens.iter().position(|t| t.dep == dep)
    }

    pub fn phrase(&self, head: usize) -> Range<usize> {
        let mut start = head;
        let mut end = head;
        for (i, t) in self.tokens.iter().enumerate() {
            if t.dep == Dependency::Modifier && t.head == Some(head) {
                start = start.min(i);
                end = end.max(i);
            }
        }
        start..end + 1
    }

    pub fn byte_span(&self, range: Range<usize>) -> Option<Range<usize>> {
        let first = self.tokens.get(range.start)?;
        let last = self.tokens.get(range.end.checked_sub(1)?)?;
        Some(first.token.start..last.token.end)
    }

    pub fn has_auxiliary(&self, head: usize) -> bool {
        self.tokens
            .iter()
            .any(|t| t.dep == Dependency::Auxiliary && t.head == Some(head))
    }

    pub fn tagged(self) -> Vec<TaggedToken> {
        self.tokens.into_iter().map(|t| t.token).collect()
    }
}

pub trait DependencyParser: Send + Sync {
    fn name(&self) -> &'static str;

    fn split_sentences(&self, text: &str) -> Result<Vec<String>, StepError>;

    fn parse(&self, sentence: &str) -> Result<Parse, StepError>;
}

// ---------------------------------------------------------------------------
// Built-in chunk parser
// ---------------------------------------------------------------------------

const ABBREVIATIONS: &[&str] = &[
    "dr", "mr", "mrs", "ms", "prof", "sr", "jr", "vs", "etc", "e.g", "i.e", "approx", "cf",
    "inc", "ltd", "corp", "dept", "eds",
];

/// Abbreviations that are also ordinary words; they only hold a sentence
/// together when a number follows ("no. 5", "ca. 1900").
const NUMBERED_ABBREVIATIONS: &[&str] = &["no", "vol", "fig", "eq", "pp", "ca"];

const BE_FORMS: &[&str] = &["be", "is", "am", "are", "was", "were", "been", "being"];

#[derive(Debug, Clone)]
pub struct ChunkParser {
    tagger: Tagger,
}

impl ChunkParser {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            tagger: Tagger::new(lexicon),
        }
    }

    fn phrase_ending_at(tokens: &[TaggedToken], end: usize) -> Option<(usize, usize)> {
        let head = end.checked_sub(1)?;
        let tag = tokens[head].tag;
        if tag == PosTag::Pronoun {
            return Some((head, head));
        }
        if !tag.is_nominal() {
            return None;
        }
        let mut start = head;
        while start > 0 && is_phrase_member(tokens[start - 1].tag) {
            start -= 1;
        }
        Some((start, head))
    }

    /// Head of the noun phrase starting at `start`. A second phrase right
    /// behind the first ("gave the students a test") yields no head.
    fn phrase_starting_at(tokens: &[TaggedToken], start: usize) -> Option<usize> {
        let first = tokens.get(start)?;
        if first.tag == PosTag::Pronoun {
            return Some(start);
        }
        let mut head = None;
        let mut i = start;
        while i < tokens.len() && is_phrase_member(tokens[i].tag) {
            let tag = tokens[i].tag;
            if tag.is_nominal() {
                head = Some(i);
            } else if head.is_some() {
                return None;
            }
            i += 1;
        }
        head
    }
}

fn is_phrase_member(tag: PosTag) -> bool {
    tag.is_nominal() || matches!(tag, PosTag::Determiner | PosTag::Adjective | PosTag::Numeral)
}

impl DependencyParser for ChunkParser {
    fn name(&self) -> &'static str {
        "chunk"
    }

    fn split_sentences(&self, text: &str) -> Result<Vec<String>, StepError> {
        Ok(split_sentences_smart(text))
    }

    fn parse(&self, sentence: &str) -> Result<Parse, StepError> {
        let tagged = self.tagger.tag(sentence);
        if tagged.len() > MAX_PARSE_TOKENS {
            return Err(StepError::TooManyTokens {
                limit: MAX_PARSE_TOKENS,
                actual: tagged.len(),
            });
        }

        let mut deps: Vec<(Dependency, Option<usize>)> = tagged
            .iter()
            .map(|t| {
                if t.tag == PosTag::Punctuation {
                    (Dependency::Punct, None)
                } else {
                    (Dependency::Other, None)
                }
            })
            .collect();

        let root = tagged
            .iter()
            .position(|t| matches!(t.tag, PosTag::Verb(form) if form != VerbForm::Gerund))
            .or_else(|| tagged.iter().position(|t| t.tag == PosTag::Auxiliary));

        if let Some(root) = root {
            deps[root] = (Dependency::Root, None);

            // Auxiliaries, modals and adverbs directly before the root.
            let mut passive_aux = false;
            let mut verb_start = root;
            while verb_start > 0
                && matches!(
                    tagged[verb_start - 1].tag,
                    PosTag::Auxiliary | PosTag::Modal | PosTag::Adverb
                )
            {
                let aux = &tagged[verb_start - 1];
                if matches!(aux.tag, PosTag::Auxiliary | PosTag::Modal) {
                    deps[verb_start - 1] = (Dependency::Auxiliary, Some(root));
                    if BE_FORMS.contains(&aux.lower().as_str()) {
                        passive_aux = true;
                    }
                }
                verb_start -= 1;
            }

            // A phrase governed by a preposition ("the team from Alpha") is
            // not the subject.
            let subject = Self::phrase_ending_at(&tagged, verb_start).filter(|&(start, _)| {
                start == 0 || tagged[start - 1].tag != PosTag::Preposition
            });
            if let Some((start, head)) = subject {
                let passive = passive_aux
                    && matches!(
                        tagged[root].tag,
                        PosTag::Verb(VerbForm::Participle) | PosTag::Verb(VerbForm::Past)
                    );
                let dep = if passive {
                    Dependency::PassiveSubject
                } else {
                    Dependency::Subject
                };
                deps[head] = (dep, Some(root));
                for d in deps.iter_mut().take(head).skip(start) {
                    *d = (Dependency::Modifier, Some(head));
                }
            }

            if tagged[root].tag.is_verb() {
                if let Some(head) = Self::phrase_starting_at(&tagged, root + 1) {
                    deps[head] = (Dependency::Object, Some(root));
                    for d in deps.iter_mut().take(head).skip(root + 1) {
                        *d = (Dependency::Modifier, Some(head));
                    }
                }
            }
        }

        let tokens = tagged
            .into_iter()
            .zip(deps)
            .map(|(token, (dep, head))| ParsedToken { token, dep, head })
            .collect();
        Ok(Parse { tokens })
    }
}

/// Whether the period at byte `period` closes an abbreviation or initial.
/// `next` is the first character after the following whitespace.
fn is_abbreviation(text: &str, period: usize, next: Option<char>) -> bool {
    let before = &text[..period];
    let word = before
        .char_indices()
        .rev()
        .find(|&(_, c)| c.is_whitespace() || c == '(')
        .map(|(i, c)| &before[i + c.len_utf8()..])
        .unwrap_or(before);
    let lower = word.to_lowercase();
    if ABBREVIATIONS.contains(&lower.as_str()) {
        return true;
    }
    if NUMBERED_ABBREVIATIONS.contains(&lower.as_str()) {
        return next.is_some_and(|c| c.is_ascii_digit());
    }
    if lower == "al" {
        return before[..before.len() - word.len()]
            .trim_end()
            .to_lowercase()
            .ends_with("et");
    }
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

/// Split on `.`, `!`, `?` (plus closing quotes/brackets) followed by
/// whitespace and an uppercase letter, digit or opening quote.
fn split_sentences_smart(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;

    let mut i = 0;
    while i < chars.len() {
        let (pos, ch) = chars[i];
        if !matches!(ch, '.' | '!' | '?') {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() && matches!(chars[j].1, '.' | '!' | '?') {
            j += 1;
        }
        while j < chars.len() && matches!(chars[j].1, '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}')
        {
            j += 1;
        }
        let boundary_end = chars.get(j).map(|&(p, _)| p).unwrap_or(text.len());

        let next_is_space = chars.get(j).is_some_and(|&(_, c)| c.is_whitespace());
        let mut k = j;
        while k < chars.len() && chars[k].1.is_whitespace() {
            k += 1;
        }
        let next_starts_sentence = chars.get(k).is_some_and(|&(_, c)| {
            c.is_uppercase() || c.is_ascii_digit() || matches!(c, '"' | '\u{201C}' | '(' | '\'')
        });

        let abbreviation = ch == '.' && is_abbreviation(text, pos, chars.get(k).map(|&(_, c)| c));
        if next_is_space && next_starts_sentence && !abbreviation {
            let sentence = text[start..boundary_end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = boundary_end;
        }
        i = j.max(i + 1);
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ChunkParser {
        ChunkParser::new(Arc::new(Lexicon::builtin()))
    }

    fn text_of(parse: &Parse, range: Range<usize>) -> String {
        parse.tokens[range]
            .iter()
            .map(|t| t.token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn finds_subject_verb_object() {
        let parse = parser().parse("The researchers use a new method.").unwrap();
        let root = parse.root().unwrap();
        let subj = parse.first(Dependency::Subject).unwrap();
        let obj = parse.first(Dependency::Object).unwrap();
        assert_eq!(parse.tokens[root].token.text, "use");
        assert_eq!(text_of(&parse, parse.phrase(subj)), "The researchers");
        assert_eq!(text_of(&parse, parse.phrase(obj)), "a new method");
    }

    #[test]
    fn clause_complement_has_no_object() {
        let parse = parser().parse("It shows that the approach works well.").unwrap();
        assert_eq!(parse.tokens[parse.root().unwrap()].token.text, "shows");
        assert!(parse.first(Dependency::Object).is_none());
    }

    #[test]
    fn already_passive_subject_is_marked() {
        let parse = parser().parse("The method was used by the team.").unwrap();
        assert!(parse.first(Dependency::PassiveSubject).is_some());
        assert!(parse.first(Dependency::Subject).is_none());
        assert!(parse.has_auxiliary(parse.root().unwrap()));
    }

    #[test]
    fn prepositional_object_is_not_a_subject() {
        let parse = parser().parse("The team from Alpha uses a new method.").unwrap();
        assert_eq!(parse.tokens[parse.root().unwrap()].token.text, "uses");
        assert!(parse.first(Dependency::Subject).is_none());
    }

    #[test]
    fn double_object_clause_has_no_object() {
        let parse = parser().parse("The teacher gave the students a test.").unwrap();
        assert_eq!(parse.tokens[parse.root().unwrap()].token.text, "gave");
        assert!(parse.first(Dependency::Subject).is_some());
        assert!(parse.first(Dependency::Object).is_none());
    }

    #[test]
    fn long_sentences_are_refused() {
        let long = "word ".repeat(MAX_PARSE_TOKENS + 1);
        assert!(matches!(
            parser().parse(&long),
            Err(StepError::TooManyTokens { .. })
        ));
    }

    #[test]
    fn splitter_respects_abbreviations() {
        let text = "Dr. Smith use a new method, e.g. sampling. It works! Does it? Yes.";
        assert_eq!(
            split_sentences_smart(text),
            vec![
                "Dr. Smith use a new method, e.g. sampling.",
                "It works!",
                "Does it?",
                "Yes."
            ]
        );
    }

    #[test]
    fn ordinary_words_end_sentences() {
        let text = "The answer was no. We tried again. It is co. Done.";
        assert_eq!(
            split_sentences_smart(text),
            vec!["The answer was no.", "We tried again.", "It is co.", "Done."]
        );
        let text = "See fig. 3 and no. 12 of Smith et al. The rest is noise.";
        assert_eq!(
            split_sentences_smart(text),
            vec!["See fig. 3 and no. 12 of Smith et al. The rest is noise."]
        );
    }

    #[test]
    fn splitter_keeps_closing_quotes() {
        let text = "He said \"stop.\" Then he left.";
        assert_eq!(
            split_sentences_smart(text),
            vec!["He said \"stop.\"", "Then he left."]
        );
    }

    #[test]
    fn splitter_without_terminal_punctuation() {
        assert_eq!(split_sentences_smart("no punctuation here"), vec!["no punctuation here"]);
    }
}
