//! Validation engine for summarization requests.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`SummarizationRequest`] and collects every diagnostic into a
//! [`ValidationReport`]. It never short-circuits on the first error, so
//! callers see all problems at once.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use rapid_summarizer::pipeline::validation::{RequestValidator, ValidationContext};
//!
//! let validator = RequestValidator::with_defaults();
//! let report = validator.validate(&request, &ValidationContext::new(&registry, &config));
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use std::fmt;

use serde::Serialize;

use super::request::SummarizationRequest;
use crate::errors::ErrorCode;
use crate::nlp::LanguageRegistry;
use crate::types::{ModelType, SummarizerConfig};

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Issue ──────────────────────────────────────────────────────────────────

/// A problem found in a request: code, JSON pointer, message and hint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestIssue {
    pub code: ErrorCode,
    /// JSON pointer of the offending field, e.g. `/ratio`.
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl RequestIssue {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for RequestIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding: a [`RequestIssue`] with its severity.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub issue: RequestIssue,
}

impl ValidationDiagnostic {
    pub fn error(issue: RequestIssue) -> Self {
        Self {
            severity: Severity::Error,
            issue,
        }
    }

    pub fn warning(issue: RequestIssue) -> Self {
        Self {
            severity: Severity::Warning,
            issue,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &RequestIssue> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.issue)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &RequestIssue> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.issue)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Context ────────────────────────────────────────────────────────────────

/// Read-only state the rules check a request against.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub registry: &'a LanguageRegistry,
    pub config: &'a SummarizerConfig,
}

impl<'a> ValidationContext<'a> {
    pub fn new(registry: &'a LanguageRegistry, config: &'a SummarizerConfig) -> Self {
        Self { registry, config }
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a request and returns zero or
/// more diagnostics.
///
/// Rules are stateless and must be `Send + Sync` so a validator can be
/// shared across worker threads.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"ratio_bounds"`).
    fn name(&self) -> &str;

    fn validate(
        &self,
        request: &SummarizationRequest,
        ctx: &ValidationContext<'_>,
    ) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s and collects all diagnostics.
pub struct RequestValidator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl RequestValidator {
    /// Create an empty validator with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a validator pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(EmptyTextRule));
        validator.add_rule(Box::new(ModelTypeRule));
        validator.add_rule(Box::new(LanguageRule));
        validator.add_rule(Box::new(RatioRule));
        validator.add_rule(Box::new(UnknownFieldsRule));
        validator
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn validate(
        &self,
        request: &SummarizationRequest,
        ctx: &ValidationContext<'_>,
    ) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(request, ctx));
        }
        report
    }
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Text must not be blank ──────────────────────────────────────────────

struct EmptyTextRule;

impl ValidationRule for EmptyTextRule {
    fn name(&self) -> &str {
        "empty_text"
    }

    fn validate(
        &self,
        request: &SummarizationRequest,
        _ctx: &ValidationContext<'_>,
    ) -> Vec<ValidationDiagnostic> {
        if request.text.trim().is_empty() {
            vec![ValidationDiagnostic::error(
                RequestIssue::new(ErrorCode::EmptyContent, "/text", "text is empty")
                    .with_hint("Provide text or upload a document with readable content"),
            )]
        } else {
            vec![]
        }
    }
}

// ─── 2. Known model type ────────────────────────────────────────────────────

struct ModelTypeRule;

impl ValidationRule for ModelTypeRule {
    fn name(&self) -> &str {
        "model_type"
    }

    fn validate(
        &self,
        request: &SummarizationRequest,
        _ctx: &ValidationContext<'_>,
    ) -> Vec<ValidationDiagnostic> {
        if request.model_type.parse::<ModelType>().is_ok() {
            return vec![];
        }
        let known: Vec<&str> = ModelType::ALL.iter().map(|m| m.as_str()).collect();
        vec![ValidationDiagnostic::error(
            RequestIssue::new(
                ErrorCode::InvalidModelType,
                "/model_type",
                format!("unknown model type \"{}\"", request.model_type),
            )
            .with_hint(format!("Use one of: {}", known.join(", "))),
        )]
    }
}

// ─── 3. Language loaded in the registry ─────────────────────────────────────

struct LanguageRule;

impl ValidationRule for LanguageRule {
    fn name(&self) -> &str {
        "language"
    }

    fn validate(
        &self,
        request: &SummarizationRequest,
        ctx: &ValidationContext<'_>,
    ) -> Vec<ValidationDiagnostic> {
        if ctx.registry.resolve(&request.language).is_ok() {
            return vec![];
        }
        let known: Vec<&str> = ctx
            .registry
            .languages()
            .iter()
            .map(|l| l.as_str())
            .collect();
        vec![ValidationDiagnostic::error(
            RequestIssue::new(
                ErrorCode::UnsupportedLanguage,
                "/language",
                format!("unsupported language \"{}\"", request.language),
            )
            .with_hint(format!("Use one of: {}", known.join(", "))),
        )]
    }
}

// ─── 4. Ratio finite (error) and within bounds (warning) ────────────────────

struct RatioRule;

impl ValidationRule for RatioRule {
    fn name(&self) -> &str {
        "ratio_bounds"
    }

    fn validate(
        &self,
        request: &SummarizationRequest,
        ctx: &ValidationContext<'_>,
    ) -> Vec<ValidationDiagnostic> {
        let ratio = request.ratio;
        let cfg = ctx.config;

        if !ratio.is_finite() {
            return vec![ValidationDiagnostic::error(RequestIssue::new(
                ErrorCode::InvalidRatio,
                "/ratio",
                format!("ratio must be a finite number, got {ratio}"),
            ))];
        }
        if !cfg.ratio_in_bounds(ratio) {
            let clamped = ratio.clamp(cfg.min_ratio, cfg.max_ratio);
            return vec![ValidationDiagnostic::warning(
                RequestIssue::new(
                    ErrorCode::InvalidRatio,
                    "/ratio",
                    format!(
                        "ratio {ratio} is outside [{}, {}] and will be clamped to {clamped}",
                        cfg.min_ratio, cfg.max_ratio
                    ),
                )
                .with_hint(format!(
                    "Use a ratio between {} and {}",
                    cfg.min_ratio, cfg.max_ratio
                )),
            )];
        }
        vec![]
    }
}

// ─── 5. Unknown fields are warnings ─────────────────────────────────────────

struct UnknownFieldsRule;

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(
        &self,
        request: &SummarizationRequest,
        _ctx: &ValidationContext<'_>,
    ) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<&String> = request.unknown_fields.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                ValidationDiagnostic::warning(
                    RequestIssue::new(
                        ErrorCode::UnknownField,
                        format!("/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;

    /// Helper: build a request from JSON.
    fn request(json: &str) -> SummarizationRequest {
        serde_json::from_str(json).unwrap()
    }

    fn validate(req: &SummarizationRequest) -> ValidationReport {
        let registry = LanguageRegistry::with_languages(&[Language::English, Language::German]);
        let config = SummarizerConfig::default();
        let ctx = ValidationContext::new(&registry, &config);
        RequestValidator::with_defaults().validate(req, &ctx)
    }

    // ─── Valid requests ─────────────────────────────────────────────────

    #[test]
    fn test_minimal_request_is_valid() {
        let report = validate(&request(r#"{ "text": "Some text." }"#));
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_full_request_is_valid() {
        let report = validate(&request(
            r#"{ "text": "Text.", "model_type": "textrank", "ratio": 0.5, "language": "de" }"#,
        ));
        assert!(report.is_empty());
    }

    // ─── Errors ─────────────────────────────────────────────────────────

    #[test]
    fn test_empty_text_fails() {
        let report = validate(&request(r#"{ "text": "   " }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::EmptyContent);
        assert_eq!(errs[0].path, "/text");
    }

    #[test]
    fn test_unknown_model_fails() {
        let report = validate(&request(r#"{ "text": "Text.", "model_type": "bert" }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::InvalidModelType);
        assert!(errs[0].hint.as_deref().unwrap().contains("ensemble"));
    }

    #[test]
    fn test_unloaded_language_fails() {
        let report = validate(&request(r#"{ "text": "Text.", "language": "italian" }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::UnsupportedLanguage);
        assert_eq!(errs[0].hint.as_deref(), Some("Use one of: english, german"));
    }

    #[test]
    fn test_non_finite_ratio_fails() {
        let req = SummarizationRequest::new("Text.").with_ratio(f64::NAN);
        let report = validate(&req);
        assert!(report.has_errors());
        assert_eq!(report.errors().next().unwrap().code, ErrorCode::InvalidRatio);
    }

    // ─── Warnings ───────────────────────────────────────────────────────

    #[test]
    fn test_out_of_bounds_ratio_warns() {
        let report = validate(&request(r#"{ "text": "Text.", "ratio": 0.8 }"#));
        assert!(report.is_valid());
        let warns: Vec<_> = report.warnings().collect();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].code, ErrorCode::InvalidRatio);
        assert!(warns[0].message.contains("clamped to 0.5"));
    }

    #[test]
    fn test_unknown_fields_warn() {
        let report = validate(&request(r#"{ "text": "Text.", "zeta": 1, "alpha": true }"#));
        assert!(report.is_valid());
        let paths: Vec<_> = report.warnings().map(|w| w.path.as_str()).collect();
        assert_eq!(paths, vec!["/alpha", "/zeta"]);
    }

    // ─── Collection ─────────────────────────────────────────────────────

    #[test]
    fn test_all_problems_reported_at_once() {
        let report = validate(&request(
            r#"{ "text": "", "model_type": "gpt", "language": "klingon", "ratio": 0.9, "x": 0 }"#,
        ));
        assert_eq!(report.errors().count(), 3);
        assert_eq!(report.warnings().count(), 2);
        assert_eq!(report.len(), 5);
    }

    #[test]
    fn test_custom_rule() {
        struct MaxWordsRule;
        impl ValidationRule for MaxWordsRule {
            fn name(&self) -> &str {
                "max_words"
            }
            fn validate(
                &self,
                request: &SummarizationRequest,
                _ctx: &ValidationContext<'_>,
            ) -> Vec<ValidationDiagnostic> {
                if request.text.split_whitespace().count() > 3 {
                    vec![ValidationDiagnostic::warning(RequestIssue::new(
                        ErrorCode::SizeExceeded,
                        "/text",
                        "too long",
                    ))]
                } else {
                    vec![]
                }
            }
        }

        let mut validator = RequestValidator::new();
        validator.add_rule(Box::new(MaxWordsRule));
        assert_eq!(validator.rule_names(), vec!["max_words"]);

        let registry = LanguageRegistry::with_languages(&[Language::English]);
        let config = SummarizerConfig::default();
        let ctx = ValidationContext::new(&registry, &config);
        let report = validator.validate(&SummarizationRequest::new("one two three four"), &ctx);
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_issue_display() {
        let issue =
            RequestIssue::new(ErrorCode::InvalidRatio, "/ratio", "bad").with_hint("fix it");
        assert_eq!(issue.to_string(), "[invalid_ratio] /ratio: bad (hint: fix it)");
    }
}
