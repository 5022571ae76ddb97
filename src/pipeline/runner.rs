//! Pipeline runner: orchestrates stage execution for one document.
//!
//! Stages run strictly forward:
//!
//! 1. Preprocess (segment + normalize)
//! 2. Score: TextRank, TF-IDF, or both followed by ensemble fusion
//! 3. Select and assemble
//!
//! A [`PipelineObserver`] is notified at each stage boundary. The reported
//! `processing_time` is the wall-clock time of the whole run, from the
//! empty-input check to the finished result.

use crate::errors::{Result, SummarizeError};
use crate::nlp::tokenizer::word_count;
use crate::nlp::LanguageResources;
use crate::pipeline::observer::{
    PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_ENSEMBLE,
    STAGE_PREPROCESS, STAGE_SELECT, STAGE_TEXTRANK, STAGE_TFIDF,
};
use crate::scoring::{fuse, SentenceScorer, TextRankScorer, TfIdfScorer};
use crate::summarizer::selector::{compression_ratio, target_count, SentenceSelector};
use crate::types::{ModelType, ScoreVector, Sentence, SummarizerConfig, SummaryResult};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Stage-boundary bookkeeping shared by every stage of one run.
struct StageLog<'o, O: PipelineObserver> {
    observer: &'o mut O,
}

impl<'o, O: PipelineObserver> StageLog<'o, O> {
    fn start(&mut self, stage: &'static str) -> StageClock {
        self.observer.on_stage_start(stage);
        StageClock::start()
    }

    fn end(&mut self, stage: &'static str, report: StageReport) {
        self.observer.on_stage_end(stage, &report);
    }
}

/// The summarization pipeline, built once from a [`SummarizerConfig`] and
/// reusable across documents.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    pub textrank: TextRankScorer,
    pub tfidf: TfIdfScorer,
    pub selector: SentenceSelector,
}

impl Pipeline {
    pub fn new(config: &SummarizerConfig) -> Self {
        Self {
            textrank: TextRankScorer::new(config.textrank.clone()),
            tfidf: TfIdfScorer::new(config.tfidf.clone()),
            selector: SentenceSelector::new().with_preserve_paragraphs(config.preserve_paragraphs),
        }
    }

    /// Summarize `text` with an already-resolved `ratio`.
    ///
    /// Fails with `EmptyContent` for blank input and `EmptyDocument` when
    /// segmentation yields no sentence. A single-sentence document skips
    /// scoring and is returned whole.
    pub fn run(
        &self,
        text: &str,
        resources: &LanguageResources,
        model: ModelType,
        ratio: f64,
        observer: &mut impl PipelineObserver,
    ) -> Result<SummaryResult> {
        let run_clock = StageClock::start();
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyContent);
        }

        let mut log = StageLog { observer };

        // Stage 1: Preprocess
        let sentences = {
            trace_stage!(STAGE_PREPROCESS);
            let clock = log.start(STAGE_PREPROCESS);
            let sentences = resources.preprocess(text);
            let report = StageReportBuilder::new(clock.elapsed())
                .sentences(sentences.len())
                .build();
            log.end(STAGE_PREPROCESS, report);
            sentences
        };
        if sentences.is_empty() {
            return Err(SummarizeError::EmptyDocument);
        }
        log.observer.on_sentences(&sentences);

        // Stage 2: Score
        let scores = if sentences.len() == 1 {
            ScoreVector::uniform(1, 1.0)
        } else {
            self.score(model, &sentences, &mut log)
        };

        // Stage 3: Select
        let n = sentences.len();
        let selection = {
            trace_stage!(STAGE_SELECT);
            let clock = log.start(STAGE_SELECT);
            let k = target_count(ratio, n);
            let selection = self.selector.select(&sentences, &scores.ranked(), k);
            log.end(STAGE_SELECT, StageReport::new(clock.elapsed()));
            selection
        };

        let original_length = word_count(text);
        let compression = compression_ratio(original_length, selection.summary_length);
        let result = SummaryResult {
            compression_ratio: compression,
            sentences: selection.sentences,
            selected: selection.indices,
            summary: selection.summary,
            original_length,
            summary_length: selection.summary_length,
            model,
            ratio,
            total_sentences: n,
            processing_time: run_clock.elapsed(),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            model = model.as_str(),
            language = resources.language().as_str(),
            sentences = n,
            selected = result.selected.len(),
            original_length = result.original_length,
            summary_length = result.summary_length,
            compression_ratio = result.compression_ratio,
            elapsed_us = result.processing_time.as_micros() as u64,
            "summarized document"
        );

        Ok(result)
    }

    fn score<O: PipelineObserver>(
        &self,
        model: ModelType,
        sentences: &[Sentence],
        log: &mut StageLog<'_, O>,
    ) -> ScoreVector {
        match model {
            ModelType::TextRank => self.score_textrank(sentences, log),
            ModelType::TfIdf => self.score_tfidf(sentences, log),
            ModelType::Ensemble => {
                let textrank = self.score_textrank(sentences, log);
                let tfidf = self.score_tfidf(sentences, log);

                trace_stage!(STAGE_ENSEMBLE);
                let clock = log.start(STAGE_ENSEMBLE);
                let fused = fuse(&[&textrank, &tfidf]);
                log.end(STAGE_ENSEMBLE, StageReport::new(clock.elapsed()));
                log.observer.on_scores(STAGE_ENSEMBLE, &fused);
                fused
            }
        }
    }

    fn score_textrank<O: PipelineObserver>(
        &self,
        sentences: &[Sentence],
        log: &mut StageLog<'_, O>,
    ) -> ScoreVector {
        trace_stage!(STAGE_TEXTRANK);
        let clock = log.start(STAGE_TEXTRANK);
        let output = self.textrank.rank(sentences);
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(output.nodes)
            .edges(output.edges)
            .iterations(output.iterations)
            .converged(output.converged)
            .build();
        log.end(STAGE_TEXTRANK, report);
        log.observer.on_scores(STAGE_TEXTRANK, &output.scores);
        output.scores
    }

    fn score_tfidf<O: PipelineObserver>(
        &self,
        sentences: &[Sentence],
        log: &mut StageLog<'_, O>,
    ) -> ScoreVector {
        trace_stage!(STAGE_TFIDF);
        let clock = log.start(STAGE_TFIDF);
        let scores = self.tfidf.score(sentences);
        log.end(STAGE_TFIDF, StageReport::new(clock.elapsed()));
        log.observer.on_scores(STAGE_TFIDF, &scores);
        scores
    }
}

// ============================================================================
// Tests
// ============================================================================
