//! Stopword filtering
//!
//! Per-language stopword sets loaded from the `stop-words` crate, with
//! support for custom lists.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use crate::types::Language;

/// A filter for removing stopwords from normalized tokens
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new(Language::English)
    }
}

impl StopwordFilter {
    /// Load the stopword list for a supported language
    pub fn new(language: Language) -> Self {
        let lang = match language {
            Language::English => LANGUAGE::English,
            Language::Spanish => LANGUAGE::Spanish,
            Language::French => LANGUAGE::French,
            Language::German => LANGUAGE::German,
            Language::Italian => LANGUAGE::Italian,
        };

        let stopwords = get(lang).iter().map(|s| s.to_lowercase()).collect();
        Self { stopwords }
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        let stopwords = words.iter().map(|w| w.to_lowercase()).collect();
        Self { stopwords }
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(word.to_lowercase());
        }
    }

    /// Remove stopwords from the filter
    pub fn remove_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.remove(&word.to_lowercase());
        }
    }

    /// Check if an already lower-cased word is a stopword
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_stopwords() {
        let filter = StopwordFilter::new(Language::English);

        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("is"));
        assert!(filter.is_stopword("a"));
        assert!(!filter.is_stopword("machine"));
        assert!(!filter.is_stopword("photosynthesis"));
    }

    #[test]
    fn test_every_language_has_a_list() {
        for lang in Language::ALL {
            assert!(!StopwordFilter::new(lang).is_empty(), "{lang} has no stopwords");
        }
    }

    #[test]
    fn test_european_stopwords() {
        assert!(StopwordFilter::new(Language::German).is_stopword("und"));
        assert!(StopwordFilter::new(Language::Spanish).is_stopword("el"));
        assert!(StopwordFilter::new(Language::French).is_stopword("les"));
        assert!(StopwordFilter::new(Language::Italian).is_stopword("della"));
    }

    #[test]
    fn test_custom_stopwords() {
        let mut filter = StopwordFilter::from_list(&["Custom", "words"]);

        assert!(filter.is_stopword("custom"));
        assert!(filter.is_stopword("words"));
        assert!(!filter.is_stopword("the"));

        filter.add_stopwords(&["extra"]);
        assert!(filter.is_stopword("extra"));

        filter.remove_stopwords(&["custom"]);
        assert!(!filter.is_stopword("custom"));
    }

    #[test]
    fn test_empty_filter() {
        let filter = StopwordFilter::empty();

        assert!(!filter.is_stopword("the"));
        assert!(filter.is_empty());
        assert_eq!(filter.len(), 0);
    }
}
