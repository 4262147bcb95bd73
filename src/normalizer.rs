//! Token-level cleanup of article bodies: stopword removal plus dictionary
//! lemmatization. Feeds the persisted cleaned-content view, NOT the
//! sentiment scorer, which needs the raw text intact.

use std::collections::{HashMap, HashSet};

/// English stopwords dropped during normalization.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your",
    "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers",
    "herself", "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what",
    "which", "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were",
    "be", "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "would",
    "should", "could", "ought", "might", "must", "shall", "will", "can", "may", "at", "by", "for",
    "from", "in", "into", "of", "on", "to", "with", "about", "against", "between", "during",
    "before", "after", "above", "below", "up", "down", "out", "off", "over", "under", "again",
    "further", "then", "once", "and", "but", "or", "nor", "so", "yet", "both", "either",
    "neither", "not", "only", "than", "when", "where", "while", "if", "because", "as", "until",
    "although", "here", "there", "all", "each", "few", "more", "most", "other", "some", "such",
    "no", "any", "own", "same", "too", "very", "just", "also", "now", "how", "why", "s", "t",
];

/// Inflected form → dictionary base form. Lookup-only lemmatization: a token
/// absent from this table passes through unchanged, no suffix stripping.
/// Skewed toward the vocabulary of financial news wires.
const LEMMAS: &[(&str, &str)] = &[
    // irregular verbs common in market copy
    ("said", "say"),
    ("says", "say"),
    ("rose", "rise"),
    ("risen", "rise"),
    ("rises", "rise"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("falls", "fall"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("bought", "buy"),
    ("sold", "sell"),
    ("made", "make"),
    ("took", "take"),
    ("taken", "take"),
    ("went", "go"),
    ("gone", "go"),
    ("saw", "see"),
    ("seen", "see"),
    ("led", "lead"),
    ("held", "hold"),
    ("beat", "beat"),
    ("met", "meet"),
    ("cut", "cut"),
    ("came", "come"),
    ("got", "get"),
    ("gave", "give"),
    ("given", "give"),
    ("lost", "lose"),
    ("won", "win"),
    // plural nouns from the same register
    ("shares", "share"),
    ("stocks", "stock"),
    ("markets", "market"),
    ("investors", "investor"),
    ("traders", "trader"),
    ("analysts", "analyst"),
    ("companies", "company"),
    ("prices", "price"),
    ("gains", "gain"),
    ("losses", "loss"),
    ("profits", "profit"),
    ("revenues", "revenue"),
    ("estimates", "estimate"),
    ("forecasts", "forecast"),
    ("targets", "target"),
    ("quarters", "quarter"),
    ("results", "result"),
    ("reports", "report"),
    ("chips", "chip"),
    ("rates", "rate"),
    ("points", "point"),
    ("sales", "sale"),
    ("costs", "cost"),
    ("funds", "fund"),
    ("bonds", "bond"),
    ("indices", "index"),
    ("indexes", "index"),
    ("analyses", "analysis"),
    ("earnings", "earnings"),
    // irregular plurals worth having even in this domain
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
];

pub struct TextNormalizer {
    stop_words: HashSet<&'static str>,
    lemmas: HashMap<&'static str, &'static str>,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            lemmas: LEMMAS.iter().copied().collect(),
        }
    }

    /// Tokenizes on whitespace, drops stopwords, reduces known inflections
    /// to their base form and rejoins with single spaces. Pure and
    /// deterministic for a fixed dictionary.
    pub fn normalize(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|token| !self.stop_words.contains(token.to_lowercase().as_str()))
            .map(|token| {
                self.lemmas
                    .get(token.to_lowercase().as_str())
                    .copied()
                    .unwrap_or(token)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
