//! Natural Language Processing components
//!
//! Sentence segmentation, tokenization, stopword filtering and stemming,
//! bundled per language by the [`registry::LanguageRegistry`].

pub mod registry;
pub mod sentences;
pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;

pub use registry::{LanguageRegistry, LanguageResources};
