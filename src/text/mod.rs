//! Text normalization pipeline.
//!
//! `normalize` is the single entry point: lowercase, tokenize on word
//! boundaries, drop stopwords, reduce to lemma form. It is pure and total -
//! identical input always yields identical output, and empty or non-textual
//! input yields an empty sequence. The vector index and per-query projection
//! both depend on this function producing the same vocabulary mapping, so
//! nothing here may consult external state.

use std::collections::HashSet;
use std::sync::LazyLock;

/// English stopwords dropped during normalization. Fixed set; extending it
/// changes the index vocabulary and requires a rebuild.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "following", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "him", "his", "how", "however", "i", "if", "in", "into", "is", "it", "its", "itself",
    "just", "may", "me", "might", "more", "most", "much", "my", "new", "no", "nor", "not", "now",
    "of", "off", "on", "once", "only", "or", "other", "our", "ours", "out", "over", "own", "per",
    "said", "same", "she", "should", "since", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "toward", "under", "until", "up", "upon", "us", "very", "was", "we", "were",
    "what", "when", "where", "whereas", "which", "while", "who", "whom", "whose", "why", "will",
    "with", "within", "without", "would", "you", "your", "yours",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Irregular plural forms the suffix rules would mangle.
const IRREGULAR_LEMMAS: &[(&str, &str)] = &[
    ("mice", "mouse"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("women", "woman"),
    ("men", "man"),
    ("children", "child"),
    ("larvae", "larva"),
    ("fungi", "fungus"),
    ("nuclei", "nucleus"),
    ("mitochondria", "mitochondrion"),
    ("bacteria", "bacterium"),
    ("analyses", "analysis"),
    ("hypotheses", "hypothesis"),
];

/// Normalize raw text into an ordered token sequence.
///
/// Steps: lowercase, split on non-alphabetic boundaries, keep alphabetic
/// tokens of two or more characters, drop stopwords, lemmatize.
#[must_use]
pub fn normalize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !c.is_alphabetic())
        .filter(|token| token.len() >= 2 && !STOPWORD_SET.contains(*token))
        .map(lemmatize)
        .collect()
}

/// Reduce a token to its lemma: irregular table first, then deterministic
/// noun-plural suffix rules.
fn lemmatize(token: &str) -> String {
    if let Some((_, lemma)) = IRREGULAR_LEMMAS.iter().find(|(plural, _)| *plural == token) {
        return (*lemma).to_string();
    }

    if let Some(stem) = token.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{stem}y");
        }
    }
    if token.ends_with("sses") || token.ends_with("xes") || token.ends_with("ches")
        || token.ends_with("shes")
    {
        return token[..token.len() - 2].to_string();
    }
    if let Some(stem) = token.strip_suffix('s') {
        // Keep -ss, -us, -is words intact (loss, locus, analysis).
        if stem.len() >= 3 && !stem.ends_with('s') && !stem.ends_with('u') && !stem.ends_with('i') {
            return stem.to_string();
        }
    }

    token.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        let tokens = normalize("Bone loss in microgravity");
        assert_eq!(tokens, vec!["bone", "loss", "microgravity"]);
    }

    #[test]
    fn test_normalize_is_pure() {
        let text = "Plant growth responses to microgravity conditions";
        assert_eq!(normalize(text), normalize(text));
    }

    #[test]
    fn test_normalize_empty_input() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \t\n  ").is_empty());
        assert!(normalize("123 456 !!").is_empty());
    }

    #[test]
    fn test_stopwords_dropped() {
        let tokens = normalize("the effects of spaceflight on the immune system");
        assert!(!tokens.contains(&"the".to_string()));
        assert!(!tokens.contains(&"of".to_string()));
        assert!(tokens.contains(&"spaceflight".to_string()));
        assert!(tokens.contains(&"immune".to_string()));
    }

    #[test]
    fn test_plural_lemmatization() {
        assert_eq!(normalize("osteoclasts"), vec!["osteoclast"]);
        assert_eq!(normalize("studies"), vec!["study"]);
        assert_eq!(normalize("branches"), vec!["branch"]);
        assert_eq!(normalize("stresses"), vec!["stress"]);
    }

    #[test]
    fn test_irregular_lemmas() {
        assert_eq!(normalize("mice"), vec!["mouse"]);
        assert_eq!(normalize("mitochondria"), vec!["mitochondrion"]);
        assert_eq!(normalize("analyses"), vec!["analysis"]);
    }

    #[test]
    fn test_suffix_rule_guards() {
        // -ss, -us, -is words must not lose their final s.
        assert_eq!(normalize("loss"), vec!["loss"]);
        assert_eq!(normalize("locus"), vec!["locus"]);
        assert_eq!(normalize("analysis"), vec!["analysis"]);
    }

    #[test]
    fn test_order_preserved() {
        let tokens = normalize("radiation effects on bone density");
        assert_eq!(tokens, vec!["radiation", "effect", "bone", "density"]);
    }

    #[test]
    fn test_punctuation_and_case() {
        let tokens = normalize("Micro-gravity: Bone/Loss?");
        assert_eq!(tokens, vec!["micro", "gravity", "bone", "loss"]);
    }
}
