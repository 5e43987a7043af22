use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::StepError;
use crate::resources::LanguageResources;

pub trait SentenceSegmenter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Split trimmed, non-empty text into trimmed, non-empty sentences
    fn split(&self, text: &str) -> Result<Vec<String>, StepError>;
}

fn trimmed_nonempty<'a, I>(pieces: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct ParserSegmenter {
    resources: Arc<LanguageResources>,
}

impl ParserSegmenter {
    pub fn new(resources: Arc<LanguageResources>) -> Self {
        Self { resources }
    }
}

impl SentenceSegmenter for ParserSegmenter {
    fn name(&self) -> &'static str {
        "parser"
    }

    fn split(&self, text: &str) -> Result<Vec<String>, StepError> {
        let parser = self.resources.parser().ok_or(StepError::NoParse)?;
        let sentences = parser.split_sentences(text)?;
        Ok(trimmed_nonempty(sentences.iter().map(String::as_str)))
    }
}

pub struct UnicodeSegmenter;

impl SentenceSegmenter for UnicodeSegmenter {
    fn name(&self) -> &'static str {
        "unicode"
    }

    fn split(&self, text: &str) -> Result<Vec<String>, StepError> {
        Ok(trimmed_nonempty(text.unicode_sentences()))
    }
}

static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

pub struct RegexSegmenter;

impl SentenceSegmenter for RegexSegmenter {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn split(&self, text: &str) -> Result<Vec<String>, StepError> {
        let mut pieces = Vec::new();
        let mut start = 0;
        for m in SENTENCE_END_RE.find_iter(text) {
            // Keep the punctuation mark, drop the whitespace.
            pieces.push(&text[start..m.start() + 1]);
            start = m.end();
        }
        pieces.push(&text[start..]);
        Ok(trimmed_nonempty(pieces))
    }
}

pub struct SegmenterChain {
    tiers: Vec<Box<dyn SentenceSegmenter>>,
}

impl SegmenterChain {
    pub fn new(tiers: Vec<Box<dyn SentenceSegmenter>>) -> Self {
        Self { tiers }
    }

    pub fn for_resources(resources: &Arc<LanguageResources>) -> Self {
        let mut tiers: Vec<Box<dyn SentenceSegmenter>> = Vec::with_capacity(3);
        if resources.parser().is_some() {
            tiers.push(Box::new(ParserSegmenter::new(resources.clone())));
        }
        tiers.push(Box::new(UnicodeSegmenter));
        tiers.push(Box::new(RegexSegmenter));
        Self { tiers }
    }

    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    /// Ordered sentences of `text`; empty only for blank input
    pub fn segment(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        for tier in &self.tiers {
            match tier.split(text) {
                Ok(sentences) if !sentences.is_empty() => return sentences,
                Ok(_) => tracing::debug!("Segmenter {} found no sentences", tier.name()),
                Err(e) => tracing::debug!("Segmenter {} failed: {}", tier.name(), e),
            }
        }
        vec![text.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceOptions;

    struct Failing;

    impl SentenceSegmenter for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn split(&self, _text: &str) -> Result<Vec<String>, StepError> {
            Err(StepError::parse("boom"))
        }
    }

    #[test]
    fn blank_input_yields_no_sentences() {
        let chain = SegmenterChain::for_resources(&LanguageResources::shared());
        assert!(chain.segment("   \n\t ").is_empty());
    }

    #[test]
    fn parser_tier_comes_first_when_loaded() {
        let chain = SegmenterChain::for_resources(&LanguageResources::shared());
        assert_eq!(chain.tier_names(), vec!["parser", "unicode", "regex"]);

        let bare = Arc::new(LanguageResources::load(&ResourceOptions {
            use_parser: false,
            thesaurus_path: None,
        }));
        let chain = SegmenterChain::for_resources(&bare);
        assert_eq!(chain.tier_names(), vec!["unicode", "regex"]);
    }

    #[test]
    fn unicode_tier_splits_sentences() {
        let out = UnicodeSegmenter.split("First one. Second one! Third?").unwrap();
        assert_eq!(out, vec!["First one.", "Second one!", "Third?"]);
    }

    #[test]
    fn regex_tier_keeps_terminal_punctuation() {
        let out = RegexSegmenter.split("One.  Two!\nThree").unwrap();
        assert_eq!(out, vec!["One.", "Two!", "Three"]);
    }

    #[test]
    fn failing_tier_falls_through() {
        let chain = SegmenterChain::new(vec![Box::new(Failing), Box::new(RegexSegmenter)]);
        assert_eq!(chain.segment("A b. C d."), vec!["A b.", "C d."]);
    }

    #[test]
    fn exhausted_chain_returns_whole_text() {
        let chain = SegmenterChain::new(vec![Box::new(Failing)]);
        assert_eq!(chain.segment("  no punctuation here  "), vec!["no punctuation here"]);
    }
}
