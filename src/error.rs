use thiserror::Error;

/// Longest internal message that may end up in a log line or error string.
const MAX_MESSAGE_CHARS: usize = 120;

/// A limit on the input (or output) was violated.
///
/// These are the only errors a caller of [`crate::humanize`] ever sees. The
/// messages echo the configured limit and the observed size.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Input too long: {actual} characters (maximum: {limit})")]
    InputTooLong { limit: usize, actual: usize },

    #[error("Input has too many words: {actual} words (maximum: {limit})")]
    TooManyWords { limit: usize, actual: usize },

    #[error("Output too long: {actual} characters (maximum: {limit})")]
    OutputTooLong { limit: usize, actual: usize },
}

/// Failure of a single per-sentence rewrite step.
///
/// The pipeline recovers from these by keeping the pre-step sentence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("sentence has {actual} tokens (parser ceiling: {limit})")]
    TooManyTokens { limit: usize, actual: usize },

    #[error("no dependency parser loaded")]
    NoParse,

    #[error("step produced an empty sentence")]
    EmptyResult,

    #[error("parse failed: {0}")]
    Parse(String),
}

impl StepError {
    pub(crate) fn parse(message: impl AsRef<str>) -> Self {
        Self::Parse(cap_message(message.as_ref()))
    }
}

/// Failure to load an optional language resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed resource {path}: {message}")]
    Format { path: String, message: String },
}

/// Failure to load a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config from {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub(crate) fn cap_message(message: &str) -> String {
    if message.chars().count() <= MAX_MESSAGE_CHARS {
        return message.to_string();
    }
    let mut capped: String = message.chars().take(MAX_MESSAGE_CHARS).collect();
    capped.push_str("...");
    capped
}
