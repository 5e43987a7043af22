pub mod config;
pub mod contractions;
pub mod error;
pub mod lexicon;
pub mod morphology;
pub mod parser;
pub mod passive;
pub mod pipeline;
pub mod resources;
pub mod segment;
pub mod synonyms;
pub mod tagger;
pub mod transitions;

pub use config::{HumanizeOptions, HumanizerConfig, Limits, OverflowPolicy};
pub use error::{ConfigError, ResourceError, StepError, ValidationError};
pub use pipeline::{Humanizer, StepOutcome, TRUNCATION_MARKER};
pub use resources::{LanguageResources, ResourceOptions, TableThesaurus, Thesaurus};

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Rewrite `text` in a more academic register.
///
/// Builds a [`Humanizer`] for `config` and runs it once. Blank input gives
/// an empty string; input over the configured limits gives a
/// [`ValidationError`] naming the limit.
pub fn humanize(
    text: &str,
    options: HumanizeOptions,
    config: &HumanizerConfig,
) -> Result<String, ValidationError> {
    Humanizer::new(config.clone()).humanize(text, options)
}
