use std::collections::HashMap;

/// Lexical class of a dictionary entry. Open-class entries are stored in
/// their base form (verb lemma, singular noun).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexClass {
    Determiner,
    Pronoun,
    Preposition,
    Conjunction,
    Auxiliary,
    Modal,
    Adverb,
    Adjective,
    Verb,
    Noun,
}

// ---------------------------------------------------------------------------
// Word lists
// ---------------------------------------------------------------------------

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "all", "both", "either", "neither", "another", "such", "my", "our", "your", "his", "her",
    "its", "their", "whose", "which", "what", "many", "much", "few", "several", "most", "more",
];

const PRONOUNS: &[&str] = &[
    "i", "we", "you", "he", "she", "it", "they", "me", "us", "him", "her", "them", "this",
    "that", "these", "those", "who", "whom", "someone", "everyone", "anyone", "something",
    "everything", "anything", "nothing", "one", "ours", "yours", "theirs", "mine", "itself",
    "themselves", "ourselves", "himself", "herself",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "to", "for", "with", "by", "from", "about", "into", "over", "after",
    "before", "between", "through", "during", "without", "within", "under", "above", "across",
    "against", "among", "around", "behind", "below", "beside", "beyond", "despite", "inside",
    "near", "since", "toward", "towards", "upon", "via", "per", "throughout", "onto",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "because", "although", "though", "while", "whereas", "if",
    "unless", "that", "whether", "when", "where", "as", "than", "once", "until",
];

const AUXILIARIES: &[&str] = &[
    "be", "is", "am", "are", "was", "were", "been", "being", "have", "has", "had", "having",
    "do", "does", "did",
];

const MODALS: &[&str] = &[
    "can", "cannot", "could", "may", "might", "must", "shall", "should", "will", "would",
];

const ADVERBS: &[&str] = &[
    "well", "also", "very", "often", "always", "never", "sometimes", "usually", "already",
    "still", "just", "only", "even", "really", "quickly", "clearly", "however", "therefore",
    "moreover", "furthermore", "additionally", "consequently", "hence", "thus", "notably",
    "importantly", "specifically", "conversely", "nevertheless", "nonetheless", "subsequently",
    "similarly", "significantly", "rather", "quite", "almost", "perhaps", "together", "again",
    "here", "there", "now", "then", "soon", "today", "yet", "too", "not", "fully", "largely",
    "mostly", "widely", "generally", "particularly", "especially", "directly", "recently",
    "finally", "first", "easily", "carefully", "simply", "probably", "certainly", "indeed",
];

const ADJECTIVES: &[&str] = &[
    "good", "bad", "new", "old", "important", "significant", "large", "small", "big", "high",
    "low", "different", "similar", "same", "clear", "strong", "weak", "simple", "complex",
    "difficult", "easy", "possible", "likely", "effective", "useful", "key", "main", "major",
    "minor", "common", "general", "specific", "recent", "current", "early", "late", "long",
    "short", "whole", "full", "real", "true", "free", "able", "necessary", "available",
    "critical", "relevant", "rapid", "slow", "quick", "fast", "great", "little", "various",
    "positive", "negative", "accurate", "reliable", "robust", "novel", "interesting", "obvious",
    "wide", "broad", "deep", "young", "right", "wrong", "hard", "certain", "public", "social",
    "economic", "political", "human", "natural", "traditional", "previous", "final", "global",
    "local", "basic", "primary", "modern", "essential", "crucial", "beneficial", "valuable",
    "careful", "precise", "strange", "happy", "sad", "big", "tiny", "huge", "vast", "open",
];

/// Verb lemmas. Words also listed in [`NOUNS`] are noun/verb ambiguous.
const VERBS: &[&str] = &[
    "use", "make", "get", "show", "help", "start", "change", "take", "give", "find", "see",
    "know", "write", "read", "hear", "build", "create", "develop", "provide", "study",
    "analyze", "analyse", "test", "work", "improve", "measure", "produce", "require", "include",
    "suggest", "indicate", "demonstrate", "describe", "examine", "explore", "present",
    "propose", "support", "explain", "reveal", "identify", "compare", "determine", "observe",
    "obtain", "perform", "apply", "affect", "increase", "reduce", "consider", "discuss",
    "report", "collect", "design", "evaluate", "assess", "investigate", "need", "want", "like",
    "think", "believe", "say", "tell", "ask", "try", "call", "keep", "let", "begin", "seem",
    "run", "move", "play", "bring", "hold", "turn", "lead", "meet", "learn", "understand",
    "offer", "follow", "allow", "add", "grow", "walk", "win", "spend", "buy", "pay", "send",
    "expect", "stay", "fall", "cut", "reach", "remain", "serve", "raise", "pass", "sell",
    "decide", "return", "pull", "throw", "catch", "choose", "cause", "drive", "answer", "solve",
    "address", "achieve", "enable", "ensure", "establish", "form", "generate", "implement",
    "involve", "maintain", "represent", "select", "share", "define", "focus", "handle", "cover",
    "check", "fix", "train", "verify", "confirm", "predict", "estimate", "calculate",
    "publish", "review", "shape", "adopt", "love", "eat", "drink", "speak", "teach", "prefer",
    "note", "discover", "deliver", "prepare", "complete", "continue", "utilize", "employ",
    "construct", "acquire", "attain", "illustrate", "assist", "facilitate", "initiate",
    "commence", "undertake", "modify", "alter", "transform", "leverage", "go", "come", "put",
    "set", "stand", "lose", "break", "choose", "draw", "drive", "feel", "fly", "forget",
    "hide", "lay", "leave", "lend", "light", "mean", "ride", "ring", "rise", "seek", "shake",
    "shoot", "shut", "sing", "sit", "sleep", "steal", "strike", "swim", "wear", "prove",
    "think", "conduct", "highlight", "outline", "summarize", "interpret", "reflect",
];

const NOUNS: &[&str] = &[
    "method", "approach", "result", "study", "researcher", "research", "data", "analysis",
    "problem", "way", "model", "system", "process", "theory", "evidence", "experiment",
    "sample", "participant", "paper", "article", "author", "team", "student", "teacher",
    "school", "university", "company", "government", "person", "group", "time", "year", "day",
    "work", "world", "life", "hand", "part", "place", "case", "point", "number", "fact",
    "idea", "question", "answer", "issue", "challenge", "change", "effect", "impact", "factor",
    "role", "level", "rate", "value", "test", "use", "help", "start", "show", "report",
    "finding", "outcome", "technique", "tool", "design", "structure", "framework", "concept",
    "field", "area", "topic", "literature", "review", "survey", "interview", "measure",
    "variable", "population", "reason", "information", "knowledge", "language", "text",
    "word", "sentence", "book", "policy", "market", "cost", "price", "service", "product",
    "development", "performance", "quality", "growth", "support", "discussion", "conclusion",
    "hypothesis", "observation", "purpose", "goal", "task", "project", "software", "code",
    "computer", "network", "user", "customer", "patient", "doctor", "child", "man", "woman",
    "bridge", "house", "car", "ball", "dog", "cat", "food", "water", "city", "country",
    "state", "community", "family", "example", "procedure", "obstacle", "consequence",
    "strategy", "solution", "benefit", "difference", "relationship", "trend", "pattern",
    "feature", "property", "response", "decision", "experience", "practice", "program",
    "software", "algorithm", "paper", "reader", "writer", "scientist", "expert", "method",
];

const IRREGULAR_VERBS: &[(&str, &str, &str)] = &[
    ("be", "was", "been"),
    ("have", "had", "had"),
    ("do", "did", "done"),
    ("go", "went", "gone"),
    ("make", "made", "made"),
    ("take", "took", "taken"),
    ("give", "gave", "given"),
    ("find", "found", "found"),
    ("show", "showed", "shown"),
    ("see", "saw", "seen"),
    ("know", "knew", "known"),
    ("get", "got", "gotten"),
    ("write", "wrote", "written"),
    ("read", "read", "read"),
    ("hear", "heard", "heard"),
    ("build", "built", "built"),
    ("think", "thought", "thought"),
    ("say", "said", "said"),
    ("tell", "told", "told"),
    ("keep", "kept", "kept"),
    ("let", "let", "let"),
    ("begin", "began", "begun"),
    ("run", "ran", "run"),
    ("bring", "brought", "brought"),
    ("hold", "held", "held"),
    ("lead", "led", "led"),
    ("meet", "met", "met"),
    ("understand", "understood", "understood"),
    ("grow", "grew", "grown"),
    ("win", "won", "won"),
    ("spend", "spent", "spent"),
    ("buy", "bought", "bought"),
    ("pay", "paid", "paid"),
    ("send", "sent", "sent"),
    ("fall", "fell", "fallen"),
    ("cut", "cut", "cut"),
    ("sell", "sold", "sold"),
    ("throw", "threw", "thrown"),
    ("catch", "caught", "caught"),
    ("choose", "chose", "chosen"),
    ("drive", "drove", "driven"),
    ("undertake", "undertook", "undertaken"),
    ("come", "came", "come"),
    ("put", "put", "put"),
    ("set", "set", "set"),
    ("stand", "stood", "stood"),
    ("lose", "lost", "lost"),
    ("break", "broke", "broken"),
    ("draw", "drew", "drawn"),
    ("eat", "ate", "eaten"),
    ("drink", "drank", "drunk"),
    ("speak", "spoke", "spoken"),
    ("teach", "taught", "taught"),
    ("feel", "felt", "felt"),
    ("fly", "flew", "flown"),
    ("forget", "forgot", "forgotten"),
    ("hide", "hid", "hidden"),
    ("lay", "laid", "laid"),
    ("leave", "left", "left"),
    ("lend", "lent", "lent"),
    ("mean", "meant", "meant"),
    ("ride", "rode", "ridden"),
    ("ring", "rang", "rung"),
    ("rise", "rose", "risen"),
    ("seek", "sought", "sought"),
    ("shake", "shook", "shaken"),
    ("shoot", "shot", "shot"),
    ("shut", "shut", "shut"),
    ("sing", "sang", "sung"),
    ("sit", "sat", "sat"),
    ("sleep", "slept", "slept"),
    ("steal", "stole", "stolen"),
    ("strike", "struck", "struck"),
    ("swim", "swam", "swum"),
    ("wear", "wore", "worn"),
    ("prove", "proved", "proven"),
];

const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("person", "people"),
    ("analysis", "analyses"),
    ("hypothesis", "hypotheses"),
    ("criterion", "criteria"),
    ("phenomenon", "phenomena"),
    ("datum", "data"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("mouse", "mice"),
];

const OBJECT_CASE: &[(&str, &str)] = &[
    ("i", "me"),
    ("we", "us"),
    ("he", "him"),
    ("she", "her"),
    ("they", "them"),
    ("who", "whom"),
];

// ---------------------------------------------------------------------------
// Lexicon
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Lexicon {
    classes: HashMap<&'static str, Vec<LexClass>>,
    irregular_by_lemma: HashMap<&'static str, (&'static str, &'static str)>,
    irregular_forms: HashMap<&'static str, &'static str>,
    plural_by_singular: HashMap<&'static str, &'static str>,
    singular_by_plural: HashMap<&'static str, &'static str>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Lexicon {
    pub fn builtin() -> Self {
        let mut classes: HashMap<&'static str, Vec<LexClass>> = HashMap::new();
        // Insertion order is lookup priority.
        let lists: [(&[&'static str], LexClass); 10] = [
            (AUXILIARIES, LexClass::Auxiliary),
            (MODALS, LexClass::Modal),
            (DETERMINERS, LexClass::Determiner),
            (PRONOUNS, LexClass::Pronoun),
            (PREPOSITIONS, LexClass::Preposition),
            (CONJUNCTIONS, LexClass::Conjunction),
            (VERBS, LexClass::Verb),
            (NOUNS, LexClass::Noun),
            (ADJECTIVES, LexClass::Adjective),
            (ADVERBS, LexClass::Adverb),
        ];
        for (words, class) in lists {
            for &word in words {
                let entry = classes.entry(word).or_default();
                if !entry.contains(&class) {
                    entry.push(class);
                }
            }
        }

        let mut irregular_by_lemma = HashMap::new();
        let mut irregular_forms = HashMap::new();
        for &(lemma, past, participle) in IRREGULAR_VERBS {
            irregular_by_lemma.insert(lemma, (past, participle));
            irregular_forms.entry(past).or_insert(lemma);
            irregular_forms.entry(participle).or_insert(lemma);
        }

        let mut plural_by_singular = HashMap::new();
        let mut singular_by_plural = HashMap::new();
        for &(singular, plural) in IRREGULAR_NOUNS {
            plural_by_singular.insert(singular, plural);
            singular_by_plural.insert(plural, singular);
        }

        Self {
            classes,
            irregular_by_lemma,
            irregular_forms,
            plural_by_singular,
            singular_by_plural,
        }
    }

    pub fn classes(&self, word: &str) -> &[LexClass] {
        self.classes.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_class(&self, word: &str, class: LexClass) -> bool {
        self.classes(word).contains(&class)
    }

    pub fn is_known(&self, word: &str) -> bool {
        self.classes.contains_key(word)
    }

    pub fn is_verb_lemma(&self, word: &str) -> bool {
        self.has_class(word, LexClass::Verb)
    }

    pub fn is_noun_lemma(&self, word: &str) -> bool {
        self.has_class(word, LexClass::Noun)
    }

    pub fn irregular_verb(&self, lemma: &str) -> Option<(&'static str, &'static str)> {
        self.irregular_by_lemma.get(lemma).copied()
    }

    pub fn irregular_lemma(&self, form: &str) -> Option<&'static str> {
        self.irregular_forms.get(form).copied()
    }

    pub fn irregular_plural(&self, singular: &str) -> Option<&'static str> {
        self.plural_by_singular.get(singular).copied()
    }

    pub fn irregular_singular(&self, plural: &str) -> Option<&'static str> {
        self.singular_by_plural.get(plural).copied()
    }

    pub fn object_case(&self, pronoun: &str) -> Option<&'static str> {
        OBJECT_CASE
            .iter()
            .find(|(subject, _)| *subject == pronoun)
            .map(|(_, object)| *object)
    }
}
