use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Inclusive ceiling on input characters (after trimming)
    pub max_input_chars: usize,
    /// Inclusive ceiling on whitespace-separated input words
    pub max_input_words: usize,
    /// Inclusive ceiling on output characters
    pub max_output_chars: usize,
    pub on_overflow: OverflowPolicy,
    pub time_budget_ms: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_chars: 10_000,
            max_input_words: 2_000,
            max_output_chars: 20_000,
            on_overflow: OverflowPolicy::Truncate,
            time_budget_ms: 2_000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    #[default]
    Truncate,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanizerConfig {
    pub p_transition: f64,
    pub p_passive: f64,
    pub p_synonym: f64,
    pub word_acceptance: f64,
    pub seed: Option<u64>,
    pub skip_first_sentence: bool,
    /// Load the dependency parser; `false` forces the fallback tiers
    pub use_parser: bool,
    pub thesaurus_path: Option<PathBuf>,
    pub limits: Limits,
}

impl Default for HumanizerConfig {
    fn default() -> Self {
        Self {
            p_transition: 0.3,
            p_passive: 0.2,
            p_synonym: 0.3,
            word_acceptance: 0.5,
            seed: None,
            skip_first_sentence: true,
            use_parser: true,
            thesaurus_path: None,
            limits: Limits::default(),
        }
    }
}

impl HumanizerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })?;
        tracing::debug!("Loaded humanizer config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        config.check_limits()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn check_limits(&self) -> Result<(), ConfigError> {
        if self.limits.max_input_chars == 0 {
            return Err(ConfigError::Invalid("max_input_chars must be positive".into()));
        }
        if self.limits.max_output_chars == 0 {
            return Err(ConfigError::Invalid("max_output_chars must be positive".into()));
        }
        Ok(())
    }

    pub(crate) fn clamped(&self) -> Self {
        let mut out = self.clone();
        out.p_transition = clamp_probability("p_transition", self.p_transition);
        out.p_passive = clamp_probability("p_passive", self.p_passive);
        out.p_synonym = clamp_probability("p_synonym", self.p_synonym);
        out.word_acceptance = clamp_probability("word_acceptance", self.word_acceptance);
        out
    }
}

fn clamp_probability(name: &str, value: f64) -> f64 {
    if value.is_nan() {
        tracing::warn!("{} is NaN, using 0.0", name);
        return 0.0;
    }
    let clamped = value.clamp(0.0, 1.0);
    if clamped != value {
        tracing::warn!("{} = {} is outside [0, 1], clamped to {}", name, value, clamped);
    }
    clamped
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanizeOptions {
    pub enable_passive: bool,
    pub enable_synonyms: bool,
}

impl HumanizeOptions {
    pub fn all() -> Self {
        Self {
            enable_passive: true,
            enable_synonyms: true,
        }
    }
}
