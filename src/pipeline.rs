use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;

use crate::config::{HumanizeOptions, HumanizerConfig, OverflowPolicy};
use crate::contractions;
use crate::error::{StepError, ValidationError};
use crate::passive;
use crate::resources::{LanguageResources, ResourceOptions};
use crate::segment::SegmenterChain;
use crate::synonyms;
use crate::transitions;

pub const TRUNCATION_MARKER: &str = " [output truncated]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Changed(String),
    Unchanged,
}

// ---------------------------------------------------------------------------
// Cleanup
// ---------------------------------------------------------------------------

static SPACE_BEFORE_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([,.;:!?])").unwrap());
static REPEATED_COMMA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",(?:\s*,)+").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201D}', '\u{2019}'];

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// Per-sentence cleanup: whitespace, punctuation spacing, leading capital,
/// terminal punctuation.
pub fn clean_sentence(sentence: &str) -> String {
    let collapsed = collapse_whitespace(sentence);
    let mut out = SPACE_BEFORE_PUNCT_RE.replace_all(&collapsed, "$1").into_owned();
    if out.is_empty() {
        return out;
    }

    if let Some((i, c)) = out.char_indices().find(|(_, c)| c.is_alphanumeric()) {
        if c.is_lowercase() {
            let upper: String = c.to_uppercase().collect();
            out.replace_range(i..i + c.len_utf8(), &upper);
        }
    }

    let body = out.trim_end_matches(CLOSERS);
    let closers = out[body.len()..].to_string();
    let body = body.trim_end_matches([',', ';', ':']);
    if !body.ends_with(['.', '!', '?', '\u{2026}']) {
        out = format!("{body}.{closers}");
    }
    out
}

pub fn post_process(text: &str) -> String {
    let text = SPACE_BEFORE_PUNCT_RE.replace_all(text, "$1");
    let text = REPEATED_COMMA_RE.replace_all(&text, ",");
    let text = transitions::collapse_repeated(&text);
    collapse_whitespace(&text)
}

// ---------------------------------------------------------------------------
// Humanizer
// ---------------------------------------------------------------------------

/// A configured pipeline. Read-only after construction and safe to share
/// between threads; every call draws from its own random generator.
pub struct Humanizer {
    config: HumanizerConfig,
    resources: Arc<LanguageResources>,
    segmenter: SegmenterChain,
}

impl std::fmt::Debug for Humanizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Humanizer")
            .field("config", &self.config)
            .field("resources", &self.resources)
            .field("segmenter", &self.segmenter.tier_names())
            .finish()
    }
}

impl Humanizer {
    /// Build with resources matching the config. The default setup reuses
    /// the process-wide shared resources.
    pub fn new(config: HumanizerConfig) -> Self {
        let resources = if config.use_parser && config.thesaurus_path.is_none() {
            LanguageResources::shared()
        } else {
            Arc::new(LanguageResources::load(&ResourceOptions {
                use_parser: config.use_parser,
                thesaurus_path: config.thesaurus_path.clone(),
            }))
        };
        Self::with_resources(config, resources)
    }

    pub fn with_resources(config: HumanizerConfig, resources: Arc<LanguageResources>) -> Self {
        let segmenter = SegmenterChain::for_resources(&resources);
        Self {
            config: config.clamped(),
            resources,
            segmenter,
        }
    }

    pub fn config(&self) -> &HumanizerConfig {
        &self.config
    }

    pub fn resources(&self) -> &Arc<LanguageResources> {
        &self.resources
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    pub fn humanize(&self, text: &str, options: HumanizeOptions) -> Result<String, ValidationError> {
        let started = Instant::now();
        let text = text.trim();
        if text.is_empty() {
            return Ok(String::new());
        }
        self.validate_input(text)?;

        let sentences = self.segmenter.segment(text);
        tracing::debug!("Humanizing {} sentences", sentences.len());

        let budget = Duration::from_millis(self.config.limits.time_budget_ms);
        let mut rng = self.rng();
        let mut over_budget = false;
        let mut rewritten = Vec::with_capacity(sentences.len());
        for (index, sentence) in sentences.iter().enumerate() {
            if !over_budget && started.elapsed() >= budget {
                tracing::warn!(
                    "Time budget exceeded after {:?} (budget {:?}); passing remaining sentences through",
                    started.elapsed(),
                    budget
                );
                over_budget = true;
            }
            let out = if over_budget {
                clean_sentence(&contractions::expand(sentence))
            } else {
                self.transform_sentence(index, sentence, options, &mut rng)
            };
            rewritten.push(out);
        }

        let output = post_process(&rewritten.join(" "));
        tracing::debug!("Humanized in {:?}", started.elapsed());
        self.bound_output(output)
    }

    fn validate_input(&self, text: &str) -> Result<(), ValidationError> {
        let limits = &self.config.limits;
        let chars = text.chars().count();
        if chars > limits.max_input_chars {
            return Err(ValidationError::InputTooLong {
                limit: limits.max_input_chars,
                actual: chars,
            });
        }
        let words = text.split_whitespace().count();
        if words > limits.max_input_words {
            return Err(ValidationError::TooManyWords {
                limit: limits.max_input_words,
                actual: words,
            });
        }
        Ok(())
    }

    fn transform_sentence(
        &self,
        index: usize,
        sentence: &str,
        options: HumanizeOptions,
        rng: &mut StdRng,
    ) -> String {
        let config = &self.config;
        let resources = &*self.resources;

        let mut current = contractions::expand(sentence);
        current = run_step("transition", index, current, |s| {
            Ok(transitions::inject(
                s,
                index,
                config.p_transition,
                config.skip_first_sentence,
                resources.lexicon(),
                rng,
            ))
        });
        if options.enable_passive {
            current = run_step("passive", index, current, |s| {
                passive::rewrite(s, config.p_passive, resources, rng)
            });
        }
        if options.enable_synonyms {
            current = run_step("synonyms", index, current, |s| {
                synonyms::substitute(s, config.p_synonym, config.word_acceptance, resources, rng)
            });
        }
        clean_sentence(&current)
    }

    fn bound_output(&self, output: String) -> Result<String, ValidationError> {
        let limit = self.config.limits.max_output_chars;
        let actual = output.chars().count();
        if actual <= limit {
            return Ok(output);
        }
        match self.config.limits.on_overflow {
            OverflowPolicy::Reject => Err(ValidationError::OutputTooLong { limit, actual }),
            OverflowPolicy::Truncate => {
                tracing::warn!("Output truncated from {} to {} characters", actual, limit);
                let marker_len = TRUNCATION_MARKER.chars().count();
                // A limit shorter than the marker gets a bare cut.
                if limit <= marker_len {
                    let cut: String = output.chars().take(limit).collect();
                    return Ok(cut.trim_end().to_string());
                }
                let cut: String = output.chars().take(limit - marker_len).collect();
                Ok(format!("{}{}", cut.trim_end(), TRUNCATION_MARKER))
            }
        }
    }
}

fn run_step<F>(name: &str, index: usize, current: String, step: F) -> String
where
    F: FnOnce(&str) -> Result<StepOutcome, StepError>,
{
    let result = panic::catch_unwind(AssertUnwindSafe(|| step(&current))).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic".to_string());
        Err(StepError::parse(message))
    });

    match result {
        Ok(StepOutcome::Changed(next)) if next.trim().is_empty() => {
            tracing::debug!("Step {} on sentence {} failed: {}", name, index, StepError::EmptyResult);
            current
        }
        Ok(StepOutcome::Changed(next)) => next,
        Ok(StepOutcome::Unchanged) => current,
        Err(e) => {
            tracing::debug!("Step {} on sentence {} failed: {}", name, index, e);
            current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Limits;

    fn quiet() -> HumanizerConfig {
        HumanizerConfig {
            p_transition: 0.0,
            p_passive: 0.0,
            p_synonym: 0.0,
            ..HumanizerConfig::default()
        }
        .with_seed(1)
    }

    #[test]
    fn sentence_cleanup() {
        assert_eq!(clean_sentence("  the  result ,holds "), "The result,holds.");
        assert_eq!(clean_sentence("it works ;"), "It works.");
        assert_eq!(clean_sentence("he said \"stop\""), "He said \"stop.\"");
        assert_eq!(clean_sentence("Really?"), "Really?");
        assert_eq!(clean_sentence("\"quoted.\""), "\"Quoted.\"");
    }

    #[test]
    fn text_cleanup() {
        assert_eq!(
            post_process("Moreover, However, it works ,, well .  Done."),
            "Moreover, it works, well. Done."
        );
    }

    #[test]
    fn failing_step_keeps_previous_text() {
        let out = run_step("test", 0, "kept".to_string(), |_| Err(StepError::NoParse));
        assert_eq!(out, "kept");
        let out = run_step("test", 0, "kept".to_string(), |_| {
            Ok(StepOutcome::Changed("   ".to_string()))
        });
        assert_eq!(out, "kept");
    }

    #[test]
    fn panicking_step_keeps_previous_text() {
        let out = run_step("test", 0, "kept".to_string(), |_| panic!("tagger exploded"));
        assert_eq!(out, "kept");
    }

    #[test]
    fn blank_input_is_empty_output() {
        let humanizer = Humanizer::new(quiet());
        assert_eq!(humanizer.humanize(" \n ", HumanizeOptions::all()).unwrap(), "");
    }

    #[test]
    fn exhausted_budget_passes_sentences_through() {
        let config = HumanizerConfig {
            p_transition: 1.0,
            skip_first_sentence: false,
            limits: Limits {
                time_budget_ms: 0,
                ..Limits::default()
            },
            ..quiet()
        };
        let out = Humanizer::new(config)
            .humanize("It's late. We can't stay", HumanizeOptions::all())
            .unwrap();
        assert_eq!(out, "It is late. We cannot stay.");
    }

    #[test]
    fn overflow_truncates_with_marker_or_rejects() {
        let mut config = quiet();
        config.limits.max_output_chars = 40;
        let text = "The method works well in practice. The results hold up across samples.";

        let out = Humanizer::new(config.clone())
            .humanize(text, HumanizeOptions::default())
            .unwrap();
        assert!(out.ends_with(TRUNCATION_MARKER), "{out}");
        assert!(out.chars().count() <= 40);

        config.limits.on_overflow = OverflowPolicy::Reject;
        let err = Humanizer::new(config)
            .humanize(text, HumanizeOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutputTooLong {
                limit: 40,
                actual: text.chars().count()
            }
        );
    }

    #[test]
    fn tiny_output_limit_is_never_exceeded() {
        let mut config = quiet();
        config.limits.max_output_chars = 10;
        let out = Humanizer::new(config)
            .humanize("The method works well in practice.", HumanizeOptions::default())
            .unwrap();
        assert_eq!(out, "The method");
    }

    #[test]
    fn probabilities_are_clamped_on_construction() {
        let config = HumanizerConfig {
            p_transition: 3.0,
            ..HumanizerConfig::default()
        };
        assert_eq!(Humanizer::new(config).config().p_transition, 1.0);
    }
}
