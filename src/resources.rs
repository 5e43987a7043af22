use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};

use crate::error::ResourceError;
use crate::lexicon::Lexicon;
use crate::parser::{ChunkParser, DependencyParser};
use crate::tagger::{ContentClass, TaggedToken, Tagger};

// ---------------------------------------------------------------------------
// Curated academic vocabulary
// ---------------------------------------------------------------------------

static ACADEMIC_WORDS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let entries: [(&str, &[&str]); 12] = [
        ("use", &["utilize", "employ", "apply", "leverage"]),
        ("make", &["produce", "create", "construct"]),
        ("get", &["obtain", "acquire", "attain"]),
        ("show", &["demonstrate", "illustrate", "reveal"]),
        ("help", &["assist", "facilitate", "support"]),
        ("start", &["initiate", "commence", "undertake"]),
        ("change", &["modify", "alter", "transform"]),
        ("good", &["effective", "beneficial", "advantageous"]),
        ("important", &["crucial", "essential", "paramount"]),
        ("problem", &["issue", "challenge", "obstacle"]),
        ("way", &["method", "approach", "technique"]),
        ("result", &["outcome", "finding", "consequence"]),
    ];
    entries.into_iter().collect()
});

// ---------------------------------------------------------------------------
// Thesaurus
// ---------------------------------------------------------------------------

pub trait Thesaurus: Send + Sync {
    fn name(&self) -> &str;

    fn synonyms(&self, lemma: &str, class: ContentClass) -> Vec<String>;
}

/// Built-in synonym sets as (class, lemma, synonyms).
const BUILTIN_SYNONYMS: &[(ContentClass, &str, &[&str])] = &[
    (ContentClass::Noun, "method", &["approach", "technique", "procedure"]),
    (ContentClass::Noun, "approach", &["method", "strategy", "technique"]),
    (ContentClass::Noun, "study", &["investigation", "inquiry", "analysis"]),
    (ContentClass::Noun, "idea", &["notion", "concept", "proposition"]),
    (ContentClass::Noun, "reason", &["rationale", "basis", "justification"]),
    (ContentClass::Noun, "part", &["component", "element", "portion"]),
    (ContentClass::Noun, "effect", &["impact", "influence", "consequence"]),
    (ContentClass::Noun, "goal", &["objective", "aim", "purpose"]),
    (ContentClass::Noun, "answer", &["response", "reply", "solution"]),
    (ContentClass::Noun, "question", &["inquiry", "query", "issue"]),
    (ContentClass::Noun, "test", &["trial", "examination", "assessment"]),
    (ContentClass::Noun, "team", &["group", "unit", "collective"]),
    (ContentClass::Noun, "people", &["individuals", "persons", "populace"]),
    (ContentClass::Noun, "amount", &["quantity", "volume", "magnitude"]),
    (ContentClass::Noun, "area", &["domain", "field", "region"]),
    (ContentClass::Noun, "view", &["perspective", "standpoint", "position"]),
    (ContentClass::Noun, "proof", &["evidence", "confirmation", "verification"]),
    (ContentClass::Noun, "outcome", &["result", "consequence", "upshot"]),
    (ContentClass::Noun, "finding", &["result", "discovery", "observation"]),
    (ContentClass::Verb, "find", &["discover", "identify", "detect"]),
    (ContentClass::Verb, "look", &["examine", "inspect", "observe"]),
    (ContentClass::Verb, "think", &["consider", "contemplate", "believe"]),
    (ContentClass::Verb, "say", &["state", "assert", "claim"]),
    (ContentClass::Verb, "need", &["require", "necessitate", "demand"]),
    (ContentClass::Verb, "try", &["attempt", "endeavor", "seek"]),
    (ContentClass::Verb, "work", &["function", "operate", "perform"]),
    (ContentClass::Verb, "check", &["verify", "examine", "inspect"]),
    (ContentClass::Verb, "build", &["construct", "develop", "assemble"]),
    (ContentClass::Verb, "study", &["examine", "investigate", "analyze"]),
    (ContentClass::Verb, "test", &["evaluate", "assess", "examine"]),
    (ContentClass::Verb, "improve", &["enhance", "refine", "strengthen"]),
    (ContentClass::Verb, "explain", &["clarify", "elucidate", "describe"]),
    (ContentClass::Verb, "keep", &["maintain", "retain", "preserve"]),
    (ContentClass::Verb, "give", &["provide", "offer", "supply"]),
    (ContentClass::Verb, "believe", &["maintain", "hold", "contend"]),
    (ContentClass::Verb, "suggest", &["indicate", "propose", "imply"]),
    (ContentClass::Verb, "increase", &["raise", "augment", "expand"]),
    (ContentClass::Verb, "reduce", &["decrease", "diminish", "lessen"]),
    (ContentClass::Verb, "buy", &["purchase", "acquire", "procure"]),
    (ContentClass::Verb, "end", &["conclude", "terminate", "finish"]),
    (ContentClass::Adjective, "big", &["substantial", "considerable", "large"]),
    (ContentClass::Adjective, "large", &["substantial", "considerable", "extensive"]),
    (ContentClass::Adjective, "small", &["minor", "modest", "limited"]),
    (ContentClass::Adjective, "new", &["novel", "recent", "modern"]),
    (ContentClass::Adjective, "clear", &["evident", "apparent", "explicit"]),
    (ContentClass::Adjective, "hard", &["difficult", "challenging", "demanding"]),
    (ContentClass::Adjective, "easy", &["straightforward", "simple", "effortless"]),
    (ContentClass::Adjective, "main", &["primary", "principal", "central"]),
    (ContentClass::Adjective, "whole", &["entire", "complete", "total"]),
    (ContentClass::Adjective, "different", &["distinct", "divergent", "dissimilar"]),
    (ContentClass::Adjective, "enough", &["sufficient", "adequate", "ample"]),
    (ContentClass::Adjective, "strong", &["robust", "powerful", "compelling"]),
    (ContentClass::Adjective, "simple", &["straightforward", "basic", "elementary"]),
    (ContentClass::Adjective, "useful", &["valuable", "beneficial", "practical"]),
    (ContentClass::Adjective, "quick", &["rapid", "swift", "prompt"]),
    (ContentClass::Adverb, "often", &["frequently", "commonly", "regularly"]),
    (ContentClass::Adverb, "really", &["genuinely", "truly", "indeed"]),
    (ContentClass::Adverb, "quickly", &["rapidly", "swiftly", "promptly"]),
    (ContentClass::Adverb, "clearly", &["evidently", "plainly", "manifestly"]),
    (ContentClass::Adverb, "mostly", &["largely", "predominantly", "chiefly"]),
    (ContentClass::Adverb, "usually", &["typically", "generally", "ordinarily"]),
    (ContentClass::Adverb, "also", &["additionally", "likewise", "furthermore"]),
    (ContentClass::Adverb, "about", &["approximately", "roughly", "nearly"]),
];

#[derive(Debug, Clone, Default)]
pub struct TableThesaurus {
    name: String,
    entries: HashMap<(ContentClass, String), Vec<String>>,
}

impl TableThesaurus {
    pub fn builtin() -> Self {
        let mut thesaurus = Self {
            name: "builtin".to_string(),
            entries: HashMap::new(),
        };
        for &(class, lemma, synonyms) in BUILTIN_SYNONYMS {
            thesaurus.insert(class, lemma, synonyms.iter().map(|s| s.to_string()));
        }
        thesaurus
    }

    pub fn from_toml(name: &str, contents: &str) -> Result<Self, ResourceError> {
        let sections: BTreeMap<String, BTreeMap<String, Vec<String>>> = toml::from_str(contents)
            .map_err(|e| ResourceError::Format {
                path: name.to_string(),
                message: e.to_string(),
            })?;

        let mut thesaurus = Self {
            name: name.to_string(),
            entries: HashMap::new(),
        };
        for (section, words) in sections {
            let class = ContentClass::parse(&section).ok_or_else(|| ResourceError::Format {
                path: name.to_string(),
                message: format!("unknown word class [{section}]"),
            })?;
            for (lemma, synonyms) in words {
                thesaurus.insert(class, &lemma, synonyms);
            }
        }
        Ok(thesaurus)
    }

    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ResourceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&path.display().to_string(), &contents)
    }

    pub fn insert<I, S>(&mut self, class: ContentClass, lemma: &str, synonyms: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self
            .entries
            .entry((class, lemma.to_lowercase()))
            .or_default();
        for synonym in synonyms {
            let synonym = synonym.into();
            if !entry.contains(&synonym) {
                entry.push(synonym);
            }
        }
    }

    pub fn merge(&mut self, other: TableThesaurus) {
        for ((class, lemma), synonyms) in other.entries {
            self.insert(class, &lemma, synonyms);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Thesaurus for TableThesaurus {
    fn name(&self) -> &str {
        &self.name
    }

    fn synonyms(&self, lemma: &str, class: ContentClass) -> Vec<String> {
        self.entries
            .get(&(class, lemma.to_lowercase()))
            .cloned()
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Resource bundle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceOptions {
    pub use_parser: bool,
    pub thesaurus_path: Option<PathBuf>,
}

impl Default for ResourceOptions {
    fn default() -> Self {
        Self {
            use_parser: true,
            thesaurus_path: None,
        }
    }
}

pub struct LanguageResources {
    lexicon: Arc<Lexicon>,
    tagger: Tagger,
    thesaurus: Box<dyn Thesaurus>,
    parser: Option<Box<dyn DependencyParser>>,
}

impl std::fmt::Debug for LanguageResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageResources")
            .field("thesaurus", &self.thesaurus.name())
            .field("parser", &self.parser.as_ref().map(|p| p.name()))
            .finish()
    }
}

static SHARED: OnceCell<Arc<LanguageResources>> = OnceCell::new();

impl LanguageResources {
    /// Assemble resources. Never fails: optional pieces that cannot be
    /// loaded are skipped with a warning.
    pub fn load(options: &ResourceOptions) -> Self {
        let lexicon = Arc::new(Lexicon::builtin());

        let mut thesaurus = TableThesaurus::builtin();
        if let Some(path) = &options.thesaurus_path {
            match TableThesaurus::load_file(path) {
                Ok(extra) => {
                    tracing::info!("Loaded {} thesaurus entries from {:?}", extra.len(), path);
                    thesaurus.merge(extra);
                }
                Err(e) => {
                    tracing::warn!("Thesaurus unavailable ({}); using built-in table only", e);
                }
            }
        }

        let parser: Option<Box<dyn DependencyParser>> = if options.use_parser {
            Some(Box::new(ChunkParser::new(lexicon.clone())))
        } else {
            tracing::warn!("Dependency parser disabled; passive rewrites fall back to additive phrasing");
            None
        };

        Self {
            tagger: Tagger::new(lexicon.clone()),
            lexicon,
            thesaurus: Box::new(thesaurus),
            parser,
        }
    }

    pub fn builtin() -> Self {
        Self::load(&ResourceOptions::default())
    }

    pub fn shared() -> Arc<Self> {
        SHARED
            .get_or_init(|| {
                tracing::debug!("Initializing shared language resources");
                Arc::new(Self::builtin())
            })
            .clone()
    }

    pub fn with_thesaurus(mut self, thesaurus: Box<dyn Thesaurus>) -> Self {
        self.thesaurus = thesaurus;
        self
    }

    pub fn with_parser(mut self, parser: Option<Box<dyn DependencyParser>>) -> Self {
        self.parser = parser;
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn tagger(&self) -> &Tagger {
        &self.tagger
    }

    pub fn thesaurus(&self) -> &dyn Thesaurus {
        self.thesaurus.as_ref()
    }

    pub fn parser(&self) -> Option<&dyn DependencyParser> {
        self.parser.as_deref()
    }

    pub fn academic_alternatives(&self, lemma: &str) -> Option<&'static [&'static str]> {
        ACADEMIC_WORDS.get(lemma).copied()
    }

    /// Tag a sentence with the parser when it is loaded and accepts the
    /// sentence, else with the tagger
    pub fn tag(&self, sentence: &str) -> Vec<TaggedToken> {
        if let Some(parser) = &self.parser {
            match parser.parse(sentence) {
                Ok(parse) => return parse.tagged(),
                Err(e) => {
                    tracing::debug!("Parser {} declined, tagging directly: {}", parser.name(), e)
                }
            }
        }
        self.tagger.tag(sentence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_resources_are_initialized_once() {
        let a = LanguageResources::shared();
        let b = LanguageResources::shared();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.parser().is_some());
    }

    #[test]
    fn toml_thesaurus_merges_into_builtin() {
        let extra = TableThesaurus::from_toml(
            "inline",
            "[noun]\nmethod = [\"methodology\"]\n\n[adj]\nshiny = [\"lustrous\"]\n",
        )
        .unwrap();
        let mut thesaurus = TableThesaurus::builtin();
        thesaurus.merge(extra);
        let methods = thesaurus.synonyms("method", ContentClass::Noun);
        assert_eq!(methods.first().map(String::as_str), Some("approach"));
        assert!(methods.contains(&"methodology".to_string()));
        assert_eq!(
            thesaurus.synonyms("Shiny", ContentClass::Adjective),
            vec!["lustrous".to_string()]
        );
    }

    #[test]
    fn unknown_class_section_is_a_format_error() {
        let err = TableThesaurus::from_toml("inline", "[pronoun]\nit = [\"this\"]\n").unwrap_err();
        assert!(matches!(err, ResourceError::Format { .. }));
    }

    #[test]
    fn missing_thesaurus_file_downgrades_to_builtin() {
        let resources = LanguageResources::load(&ResourceOptions {
            use_parser: false,
            thesaurus_path: Some(PathBuf::from("/nonexistent/thesaurus.toml")),
        });
        assert!(resources.parser().is_none());
        assert!(!resources
            .thesaurus()
            .synonyms("method", ContentClass::Noun)
            .is_empty());
    }

    #[test]
    fn builders_swap_parser_and_thesaurus() {
        let mut table = TableThesaurus::default();
        table.insert(ContentClass::Verb, "run", ["operate"]);
        let resources = LanguageResources::builtin()
            .with_parser(None)
            .with_thesaurus(Box::new(table));
        assert!(resources.parser().is_none());
        assert!(resources.thesaurus().synonyms("method", ContentClass::Noun).is_empty());
        assert_eq!(
            resources.thesaurus().synonyms("run", ContentClass::Verb),
            vec!["operate".to_string()]
        );
        // Without a parser, tagging goes through the tagger alone.
        let tagged = resources.tag("We run tests.");
        assert_eq!(tagged.len(), 4);
    }

    #[test]
    fn overlong_sentence_is_tagged_without_the_parser() {
        let resources = LanguageResources::shared();
        let sentence = format!("{}.", "the method ".repeat(70).trim_end());
        assert!(resources.parser().is_some());
        let tagged = resources.tag(&sentence);
        assert_eq!(tagged.len(), 141);
        assert_eq!(tagged[1].tag.content_class(), Some(ContentClass::Noun));
    }

    #[test]
    fn curated_table_is_lemma_keyed() {
        let resources = LanguageResources::builtin();
        assert_eq!(
            resources.academic_alternatives("use"),
            Some(&["utilize", "employ", "apply", "leverage"][..])
        );
        assert!(resources.academic_alternatives("uses").is_none());
    }
}
