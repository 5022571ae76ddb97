//! Snowball stemming per language (via `rust-stemmers`).

use rust_stemmers::{Algorithm, Stemmer};

use crate::types::Language;

/// Reduces lower-cased words to their Snowball stem.
pub struct WordStemmer {
    language: Language,
    stemmer: Stemmer,
}

impl std::fmt::Debug for WordStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordStemmer")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl WordStemmer {
    pub fn new(language: Language) -> Self {
        let algorithm = match language {
            Language::English => Algorithm::English,
            Language::Spanish => Algorithm::Spanish,
            Language::French => Algorithm::French,
            Language::German => Algorithm::German,
            Language::Italian => Algorithm::Italian,
        };
        Self {
            language,
            stemmer: Stemmer::create(algorithm),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_inflections_share_a_stem() {
        let stemmer = WordStemmer::new(Language::English);
        assert_eq!(stemmer.stem("running"), stemmer.stem("runs"));
        assert_eq!(stemmer.stem("connection"), stemmer.stem("connections"));
    }

    #[test]
    fn test_spanish_plural() {
        let stemmer = WordStemmer::new(Language::Spanish);
        assert_eq!(stemmer.stem("gatos"), stemmer.stem("gato"));
    }

    #[test]
    fn test_language_is_recorded() {
        assert_eq!(WordStemmer::new(Language::Italian).language(), Language::Italian);
    }
}
