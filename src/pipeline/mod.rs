//! Stage orchestration and the serving-layer boundary
//!
//! [`runner::Pipeline`] executes the summarization stages for one document,
//! reporting to a [`observer::PipelineObserver`]. [`request`] and
//! [`validation`] hold the request/response records a serving layer
//! exchanges with the core.

pub mod observer;
pub mod request;
pub mod runner;
pub mod validation;

pub use observer::{NoopObserver, PipelineObserver, StageReport, StageTimingObserver};
pub use request::{SummarizationRequest, SummarizationResponse};
pub use runner::Pipeline;
pub use validation::{RequestValidator, ValidationContext, ValidationReport};
