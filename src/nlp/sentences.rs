//! Sentence boundary detection
//!
//! Splits text into paragraphs (blank-line separated) and then into sentences
//! at `.`, `!`, `?` and `…`. A terminator only ends a sentence when it is
//! followed by whitespace or the end of the paragraph, so decimals, URLs and
//! dotted abbreviations stay intact. A single period after a known
//! abbreviation does not end a sentence, nor does one after a name initial
//! (`J. R. R. Tolkien`, `John F. Kennedy`) that is followed by a capitalized
//! word. Pronoun `I`, Roman numerals and letter grades still end sentences.

use rustc_hash::FxHashSet;

use crate::types::Language;

/// A sentence span of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSentence<'a> {
    /// Trimmed source text.
    pub text: &'a str,
    /// Paragraph ordinal.
    pub paragraph: usize,
    /// Byte offset of `text` in the source.
    pub start: usize,
}

const COMMON_ABBREVIATIONS: &[&str] = &["dr", "prof", "e.g", "i.e", "vs", "fig", "approx"];

fn language_abbreviations(language: Language) -> &'static [&'static str] {
    match language {
        Language::English => &[
            "mr", "mrs", "ms", "st", "jr", "sr", "inc", "ltd", "dept", "mt", "gen", "gov", "jan",
            "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
        ],
        Language::Spanish => &[
            "sr", "sra", "srta", "dra", "ud", "uds", "pág", "núm", "p.ej", "ej", "lic", "ing",
        ],
        Language::French => &["mme", "mlle", "pr", "p.ex", "cf", "av", "bd", "chap", "env"],
        Language::German => &[
            "z.b", "bzw", "usw", "nr", "ca", "vgl", "evtl", "ggf", "u.a", "d.h", "str", "hr",
            "fr",
        ],
        Language::Italian => &["sig", "sigg", "sig.ra", "dott", "ing", "avv", "pag", "es"],
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

/// Single letters that read as Roman numerals after a capitalized word.
fn is_roman_numeral(c: char) -> bool {
    matches!(c, 'I' | 'V' | 'X')
}

/// `X.` with one uppercase letter.
fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(c), Some('.'), None) if c.is_uppercase()
    )
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '”' | '’' | '»')
}

/// Language-aware sentence splitter
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    language: Language,
    abbreviations: FxHashSet<&'static str>,
}

impl SentenceSplitter {
    pub fn new(language: Language) -> Self {
        let abbreviations = COMMON_ABBREVIATIONS
            .iter()
            .chain(language_abbreviations(language))
            .copied()
            .collect();
        Self {
            language,
            abbreviations,
        }
    }

    /// Split `text` into trimmed sentences in source order.
    ///
    /// Segments with no alphanumeric character are dropped.
    pub fn split<'a>(&self, text: &'a str) -> Vec<RawSentence<'a>> {
        let mut sentences = Vec::new();

        for (paragraph, (p_start, p_end)) in paragraph_spans(text).into_iter().enumerate() {
            let body = &text[p_start..p_end];
            for (s, e) in self.sentence_spans(body) {
                push_trimmed(&mut sentences, text, p_start + s, p_start + e, paragraph);
            }
        }

        sentences
    }

    fn sentence_spans(&self, body: &str) -> Vec<(usize, usize)> {
        let chars: Vec<(usize, char)> = body.char_indices().collect();
        let mut spans = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (pos, c) = chars[i];
            if !is_terminator(c) {
                i += 1;
                continue;
            }

            let mut j = i + 1;
            while j < chars.len() && is_terminator(chars[j].1) {
                j += 1;
            }
            let single_period = c == '.' && j == i + 1;
            while j < chars.len() && is_closer(chars[j].1) {
                j += 1;
            }

            let at_boundary = j == chars.len() || chars[j].1.is_whitespace();
            let end = chars.get(j).map_or(body.len(), |&(b, _)| b);
            if !at_boundary
                || (single_period && self.is_abbreviation(&body[start..pos], &body[end..]))
            {
                i = j;
                continue;
            }

            spans.push((start, end));
            start = end;
            i = j;
        }

        if start < body.len() {
            spans.push((start, body.len()));
        }

        spans
    }

    /// Whether the period between `before` and `after` follows an
    /// abbreviation or a name initial rather than ending the sentence.
    fn is_abbreviation(&self, before: &str, after: &str) -> bool {
        let mut words = before.split_whitespace().rev();
        let word = words
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| !c.is_alphanumeric());

        let mut chars = word.chars();
        if let (Some(letter), None) = (chars.next(), chars.next()) {
            if letter.is_uppercase() {
                return self.is_name_initial(letter, words.next(), after);
            }
        }

        self.abbreviations.contains(word.to_lowercase().as_str())
    }

    fn is_name_initial(&self, letter: char, previous: Option<&str>, after: &str) -> bool {
        if self.language == Language::English && letter == 'I' {
            return false;
        }
        let next_capitalized = after
            .trim_start()
            .chars()
            .find(|c| c.is_alphanumeric())
            .is_some_and(char::is_uppercase);
        if !next_capitalized {
            return false;
        }

        match previous {
            None => true,
            Some(prev) if is_initial(prev) => true,
            Some(prev) => {
                prev.chars().next().is_some_and(char::is_uppercase)
                    && prev.chars().all(char::is_alphabetic)
                    && !is_roman_numeral(letter)
            }
        }
    }
}

fn push_trimmed<'a>(
    out: &mut Vec<RawSentence<'a>>,
    text: &'a str,
    start: usize,
    end: usize,
    paragraph: usize,
) {
    let segment = &text[start..end];
    let trimmed = segment.trim();
    if !trimmed.chars().any(char::is_alphanumeric) {
        return;
    }
    let offset = segment.len() - segment.trim_start().len();
    out.push(RawSentence {
        text: trimmed,
        paragraph,
        start: start + offset,
    });
}

/// Byte spans of blank-line separated paragraphs.
fn paragraph_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut current: Option<usize> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            if let Some(start) = current.take() {
                spans.push((start, offset));
            }
        } else if current.is_none() {
            current = Some(offset);
        }
        offset += line.len();
    }
    if let Some(start) = current {
        spans.push((start, text.len()));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<&str> {
        SentenceSplitter::new(Language::English)
            .split(text)
            .into_iter()
            .map(|s| s.text)
            .collect()
    }

    #[test]
    fn test_basic_split() {
        assert_eq!(
            split("Sentence one is here. Sentence two follows. Sentence three ends it."),
            vec![
                "Sentence one is here.",
                "Sentence two follows.",
                "Sentence three ends it."
            ]
        );
    }

    #[test]
    fn test_abbreviation_guard() {
        assert_eq!(
            split("Dr. Smith arrived late. He sat down."),
            vec!["Dr. Smith arrived late.", "He sat down."]
        );
    }

    #[test]
    fn test_initials_are_not_boundaries() {
        assert_eq!(
            split("J. R. R. Tolkien wrote books. They sold well."),
            vec!["J. R. R. Tolkien wrote books.", "They sold well."]
        );
    }

    #[test]
    fn test_middle_initial_is_not_boundary() {
        assert_eq!(
            split("John F. Kennedy gave a speech. It was short."),
            vec!["John F. Kennedy gave a speech.", "It was short."]
        );
    }

    #[test]
    fn test_roman_numeral_ends_sentence() {
        assert_eq!(
            split("World War I. It ended in 1918."),
            vec!["World War I.", "It ended in 1918."]
        );
    }

    #[test]
    fn test_letter_grade_ends_sentence() {
        assert_eq!(
            split("The answer is B. The next question is harder."),
            vec!["The answer is B.", "The next question is harder."]
        );
    }

    #[test]
    fn test_pronoun_i_ends_sentence() {
        assert_eq!(
            split("Nobody came except I. Then it rained."),
            vec!["Nobody came except I.", "Then it rained."]
        );
    }

    #[test]
    fn test_initial_before_lowercase_word_ends_sentence() {
        assert_eq!(split("Plan A. then failed."), vec!["Plan A.", "then failed."]);
    }

    #[test]
    fn test_dotted_abbreviation() {
        assert_eq!(
            split("Use a tool, e.g. a hammer. Then stop."),
            vec!["Use a tool, e.g. a hammer.", "Then stop."]
        );
    }

    #[test]
    fn test_decimals_and_urls_stay_whole() {
        assert_eq!(
            split("Pi is 3.14 today. Visit example.com later!"),
            vec!["Pi is 3.14 today.", "Visit example.com later!"]
        );
    }

    #[test]
    fn test_terminator_runs_and_closers() {
        assert_eq!(
            split("Wait... what?! He said \"stop.\" Then he left"),
            vec!["Wait...", "what?!", "He said \"stop.\"", "Then he left"]
        );
    }

    #[test]
    fn test_paragraphs_force_boundaries() {
        let sentences = SentenceSplitter::new(Language::English)
            .split("A heading without a period\n\n  Body text here. More body.\n");
        let texts: Vec<_> = sentences.iter().map(|s| s.text).collect();
        let paragraphs: Vec<_> = sentences.iter().map(|s| s.paragraph).collect();

        assert_eq!(
            texts,
            vec!["A heading without a period", "Body text here.", "More body."]
        );
        assert_eq!(paragraphs, vec![0, 1, 1]);
    }

    #[test]
    fn test_offsets_point_into_source() {
        let text = "First one.   Second one.";
        for s in SentenceSplitter::new(Language::English).split(text) {
            assert_eq!(&text[s.start..s.start + s.text.len()], s.text);
        }
    }

    #[test]
    fn test_punctuation_only_is_dropped() {
        assert!(split("... !!! ???").is_empty());
        assert!(split("").is_empty());
    }

    #[test]
    fn test_german_abbreviations() {
        let sentences: Vec<_> = SentenceSplitter::new(Language::German)
            .split("Das ist z.B. ein Test. Noch einer.")
            .into_iter()
            .map(|s| s.text)
            .collect();
        assert_eq!(sentences, vec!["Das ist z.B. ein Test.", "Noch einer."]);
    }
}
