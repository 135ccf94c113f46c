//! Pipeline and configuration behind the courtroom simulator CLI.

pub mod config;
pub mod pipeline;

pub use config::TrialConfig;
pub use pipeline::{CasePipeline, PipelineError};
