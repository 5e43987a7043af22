use crate::lexicon::Lexicon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerbForm {
    Base,
    ThirdPerson,
    Past,
    Participle,
    Gerund,
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Ends in a consonant followed by `y` ("study", not "play")
fn consonant_y(word: &str) -> bool {
    let mut rev = word.chars().rev();
    matches!((rev.next(), rev.next()), (Some('y'), Some(c)) if !is_vowel(c)) && word.len() > 2
}

fn sibilant_ending(word: &str) -> bool {
    ["s", "x", "z", "ch", "sh"].iter().any(|end| word.ends_with(end))
}

pub fn past_participle(lexicon: &Lexicon, lemma: &str) -> String {
    if let Some((_, participle)) = lexicon.irregular_verb(lemma) {
        return participle.to_string();
    }
    regular_past(lemma)
}

pub fn past_tense(lexicon: &Lexicon, lemma: &str) -> String {
    if let Some((past, _)) = lexicon.irregular_verb(lemma) {
        return past.to_string();
    }
    regular_past(lemma)
}

fn regular_past(lemma: &str) -> String {
    if lemma.is_empty() {
        return "ed".to_string();
    }
    if lemma.ends_with('e') {
        return format!("{lemma}d");
    }
    if consonant_y(lemma) {
        return format!("{}ied", &lemma[..lemma.len() - 1]);
    }
    format!("{lemma}ed")
}

pub fn third_person(lemma: &str) -> String {
    match lemma {
        "be" => return "is".to_string(),
        "have" => return "has".to_string(),
        "do" => return "does".to_string(),
        "go" => return "goes".to_string(),
        _ => {}
    }
    if consonant_y(lemma) {
        return format!("{}ies", &lemma[..lemma.len() - 1]);
    }
    if sibilant_ending(lemma) || lemma.ends_with('o') {
        return format!("{lemma}es");
    }
    format!("{lemma}s")
}

pub fn gerund(lemma: &str) -> String {
    if let Some(stem) = lemma.strip_suffix("ie") {
        return format!("{stem}ying");
    }
    if lemma.len() > 2
        && lemma.ends_with('e')
        && !["ee", "ye", "oe"].iter().any(|end| lemma.ends_with(end))
    {
        return format!("{}ing", &lemma[..lemma.len() - 1]);
    }
    format!("{lemma}ing")
}

pub fn plural(lexicon: &Lexicon, noun: &str) -> String {
    if let Some(plural) = lexicon.irregular_plural(noun) {
        return plural.to_string();
    }
    if consonant_y(noun) {
        return format!("{}ies", &noun[..noun.len() - 1]);
    }
    if sibilant_ending(noun) {
        return format!("{noun}es");
    }
    format!("{noun}s")
}

pub fn inflect_verb(lexicon: &Lexicon, lemma: &str, form: VerbForm) -> String {
    match form {
        VerbForm::Base => lemma.to_string(),
        VerbForm::ThirdPerson => third_person(lemma),
        VerbForm::Past => past_tense(lexicon, lemma),
        VerbForm::Participle => past_participle(lexicon, lemma),
        VerbForm::Gerund => gerund(lemma),
    }
}

fn strip_candidates(word: &str, suffix: &str) -> Vec<String> {
    let Some(stem) = word.strip_suffix(suffix) else {
        return Vec::new();
    };
    if stem.len() < 2 {
        return Vec::new();
    }
    let mut out = vec![stem.to_string(), format!("{stem}e")];
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 3
        && bytes[n - 1].is_ascii_alphabetic()
        && bytes[n - 1] == bytes[n - 2]
        && !is_vowel(bytes[n - 1] as char)
    {
        out.push(stem[..n - 1].to_string());
    }
    out
}

pub fn verb_lemma(lexicon: &Lexicon, word: &str) -> Option<(String, VerbForm)> {
    if lexicon.is_verb_lemma(word) {
        return Some((word.to_string(), VerbForm::Base));
    }
    if let Some(lemma) = lexicon.irregular_lemma(word) {
        if let Some((past, _)) = lexicon.irregular_verb(lemma) {
            let form = if past == word {
                VerbForm::Past
            } else {
                VerbForm::Participle
            };
            return Some((lemma.to_string(), form));
        }
    }

    let mut candidates: Vec<(String, VerbForm)> = Vec::new();
    if let Some(stem) = word.strip_suffix("ies") {
        candidates.push((format!("{stem}y"), VerbForm::ThirdPerson));
    }
    if let Some(stem) = word.strip_suffix("es") {
        candidates.push((stem.to_string(), VerbForm::ThirdPerson));
    }
    if let Some(stem) = word.strip_suffix('s') {
        candidates.push((stem.to_string(), VerbForm::ThirdPerson));
    }
    if let Some(stem) = word.strip_suffix("ied") {
        candidates.push((format!("{stem}y"), VerbForm::Past));
    }
    if let Some(stem) = word.strip_suffix('d') {
        candidates.push((stem.to_string(), VerbForm::Past));
    }
    for stem in strip_candidates(word, "ed") {
        candidates.push((stem, VerbForm::Past));
    }
    for stem in strip_candidates(word, "ing") {
        candidates.push((stem, VerbForm::Gerund));
    }

    candidates
        .into_iter()
        .find(|(lemma, _)| lexicon.is_verb_lemma(lemma))
}

pub fn guess_verb_lemma(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ied") {
        return format!("{stem}y");
    }
    if let Some(stem) = word.strip_suffix("ed") {
        if stem.len() >= 2 {
            return stem.to_string();
        }
    }
    if let Some(stem) = word.strip_suffix("ing") {
        if stem.len() >= 2 {
            return stem.to_string();
        }
    }
    word.to_string()
}

pub fn noun_lemma(lexicon: &Lexicon, word: &str) -> (String, bool) {
    if lexicon.is_noun_lemma(word) {
        return (word.to_string(), false);
    }
    if let Some(singular) = lexicon.irregular_singular(word) {
        return (singular.to_string(), true);
    }
    let mut candidates = Vec::new();
    if let Some(stem) = word.strip_suffix("ies") {
        candidates.push(format!("{stem}y"));
    }
    if let Some(stem) = word.strip_suffix("es") {
        candidates.push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix('s') {
        candidates.push(stem.to_string());
    }
    if let Some(found) = candidates.iter().find(|c| lexicon.is_noun_lemma(c)) {
        return (found.clone(), true);
    }
    if looks_plural(word) {
        if let Some(stem) = word.strip_suffix("ies") {
            return (format!("{stem}y"), true);
        }
        return (word[..word.len() - 1].to_string(), true);
    }
    (word.to_string(), false)
}

pub fn known_plural(lexicon: &Lexicon, word: &str) -> Option<String> {
    let (lemma, is_plural) = noun_lemma(lexicon, word);
    (is_plural && lexicon.is_noun_lemma(&lemma)).then_some(lemma)
}

pub fn looks_plural(word: &str) -> bool {
    word.len() > 3
        && word.ends_with('s')
        && !["ss", "us", "is"].iter().any(|end| word.ends_with(end))
}
