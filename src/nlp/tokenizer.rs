//! Word tokenization and normalization.
//!
//! Turns a sentence into the normalized terms the scorers compare:
//! lower-cased, punctuation-free, stopword-free and stemmed.

use super::registry::LanguageResources;

/// Whitespace-delimited word count, the unit used for summary statistics.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn is_url(chunk: &str) -> bool {
    let lower = chunk.trim_start_matches(|c: char| !c.is_alphanumeric());
    let lower = lower.to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www.")
}

/// Lower-cased alphanumeric words of `text`, URLs dropped.
///
/// Any non-alphanumeric character separates words, so "state-of-the-art"
/// yields four words and "don't" yields "don" and "t".
pub fn words(text: &str) -> Vec<String> {
    let mut out = Vec::new();

    for chunk in text.split_whitespace() {
        if is_url(chunk) {
            continue;
        }
        let lower = chunk.to_lowercase();
        out.extend(
            lower
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
                .map(str::to_string),
        );
    }

    out
}

/// Normalize a sentence into terms using a language's resources.
pub fn tokenize(text: &str, resources: &LanguageResources) -> Vec<String> {
    words(text)
        .into_iter()
        .filter(|w| !resources.stopwords().is_stopword(w))
        .map(|w| resources.stemmer().stem(&w))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("  one two\tthree\nfour "), 4);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_words_strip_punctuation_and_case() {
        assert_eq!(
            words("Hello, World! (Rust)"),
            vec!["hello", "world", "rust"]
        );
    }

    #[test]
    fn test_words_drop_urls() {
        assert_eq!(
            words("See https://example.com/a.b and www.rust-lang.org now"),
            vec!["see", "and", "now"]
        );
    }

    #[test]
    fn test_words_keep_unicode_letters() {
        assert_eq!(words("Größe café"), vec!["größe", "café"]);
    }

    #[test]
    fn test_tokenize_removes_stopwords_and_stems() {
        let resources = LanguageResources::load(Language::English);
        let tokens = tokenize("The cats are sleeping.", &resources);

        assert!(!tokens.iter().any(|t| t == "the" || t == "are"));
        assert!(tokens.contains(&"cat".to_string()));
        assert!(tokens.contains(&"sleep".to_string()));
    }
}
