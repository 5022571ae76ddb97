//! Language resource registry
//!
//! Holds the stopword set, stemmer and sentence splitter of every configured
//! language. The registry is built once at startup and only read afterwards,
//! so a single instance can be shared across threads (e.g. behind an `Arc`)
//! without locking.

use rustc_hash::FxHashMap;

use super::sentences::{RawSentence, SentenceSplitter};
use super::stemmer::WordStemmer;
use super::stopwords::StopwordFilter;
use super::tokenizer;
use crate::errors::{Result, SummarizeError};
use crate::types::{Language, Sentence};

/// Normalization resources for one language.
#[derive(Debug)]
pub struct LanguageResources {
    language: Language,
    stopwords: StopwordFilter,
    stemmer: WordStemmer,
    splitter: SentenceSplitter,
}

impl LanguageResources {
    /// Load the built-in resources for `language`.
    pub fn load(language: Language) -> Self {
        Self {
            language,
            stopwords: StopwordFilter::new(language),
            stemmer: WordStemmer::new(language),
            splitter: SentenceSplitter::new(language),
        }
    }

    /// Replace the stopword list (e.g. with a domain-specific one).
    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    pub fn stemmer(&self) -> &WordStemmer {
        &self.stemmer
    }

    /// Split text into sentences.
    pub fn sentences<'a>(&self, text: &'a str) -> Vec<RawSentence<'a>> {
        self.splitter.split(text)
    }

    /// Normalize a sentence into terms.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        tokenizer::tokenize(text, self)
    }

    /// Segment and normalize a document into indexed sentences.
    ///
    /// Indices are contiguous from 0 in source order. A sentence whose words
    /// are all stopwords is kept with an empty token list.
    pub fn preprocess(&self, text: &str) -> Vec<Sentence> {
        self.sentences(text)
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                Sentence::new(index, raw.paragraph, raw.text, self.normalize(raw.text))
            })
            .collect()
    }
}

/// Immutable map from language to its resources.
#[derive(Debug)]
pub struct LanguageRegistry {
    resources: FxHashMap<Language, LanguageResources>,
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageRegistry {
    /// Load every supported language.
    pub fn new() -> Self {
        Self::with_languages(&Language::ALL)
    }

    /// Load only the given languages; lookups for others fail.
    pub fn with_languages(languages: &[Language]) -> Self {
        let resources = languages
            .iter()
            .map(|&lang| (lang, LanguageResources::load(lang)))
            .collect();
        Self { resources }
    }

    /// Build from pre-assembled resources.
    pub fn from_resources(resources: impl IntoIterator<Item = LanguageResources>) -> Self {
        Self {
            resources: resources.into_iter().map(|r| (r.language(), r)).collect(),
        }
    }

    pub fn get(&self, language: Language) -> Result<&LanguageResources> {
        self.resources
            .get(&language)
            .ok_or_else(|| SummarizeError::UnsupportedLanguage(language.as_str().to_string()))
    }

    /// Resolve a language tag such as `"english"` or `"de"`.
    pub fn resolve(&self, tag: &str) -> Result<&LanguageResources> {
        self.get(tag.parse::<Language>()?)
    }

    /// Configured languages in a fixed order.
    pub fn languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|l| self.resources.contains_key(l))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_loads_all_languages() {
        let registry = LanguageRegistry::new();
        assert_eq!(registry.languages(), Language::ALL.to_vec());
        for lang in Language::ALL {
            assert_eq!(registry.get(lang).unwrap().language(), lang);
        }
    }

    #[test]
    fn test_resolve_by_tag() {
        let registry = LanguageRegistry::new();
        assert_eq!(
            registry.resolve("French").unwrap().language(),
            Language::French
        );
    }

    #[test]
    fn test_unknown_tag_is_unsupported() {
        let registry = LanguageRegistry::new();
        let err = registry.resolve("klingon").unwrap_err();
        assert!(matches!(err, SummarizeError::UnsupportedLanguage(_)));
    }

    #[test]
    fn test_unloaded_language_is_unsupported() {
        let registry = LanguageRegistry::with_languages(&[Language::English]);
        assert!(registry.get(Language::English).is_ok());
        assert!(matches!(
            registry.get(Language::German),
            Err(SummarizeError::UnsupportedLanguage(ref t)) if t == "german"
        ));
    }

    #[test]
    fn test_custom_stopwords() {
        let resources = LanguageResources::load(Language::English)
            .with_stopwords(StopwordFilter::from_list(&["rust"]));
        let registry = LanguageRegistry::from_resources([resources]);

        let tokens = registry
            .get(Language::English)
            .unwrap()
            .normalize("Rust compilers");
        assert!(!tokens.iter().any(|t| t == "rust"));
        assert!(!tokens.is_empty());
    }

    #[test]
    fn test_preprocess_indexes_sentences() {
        let registry = LanguageRegistry::new();
        let resources = registry.get(Language::English).unwrap();
        let sentences =
            resources.preprocess("The cats are sleeping. Dogs bark!\n\nA new paragraph.");

        assert_eq!(sentences.len(), 3);
        for (i, s) in sentences.iter().enumerate() {
            assert_eq!(s.index, i);
        }
        assert_eq!(sentences[0].raw, "The cats are sleeping.");
        assert!(sentences[0].tokens.contains(&"cat".to_string()));
        assert_eq!(sentences[1].paragraph, 0);
        assert_eq!(sentences[2].paragraph, 1);
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LanguageRegistry>();
    }
}
