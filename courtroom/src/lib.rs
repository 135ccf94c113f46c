//! Legal Multi-Agent Courtroom Simulator
//!
//! This library provides:
//! - Role-bound courtroom agents (plaintiff lawyer, defendant lawyer,
//!   judge, auditor) over a shared chat-completion client
//! - A debate orchestrator that runs structured argument rounds and
//!   extracts a structured verdict with a deterministic fallback
//! - A bias auditor with a lexicon-based fallback scan
//! - A keyword baseline classifier for comparison against debate verdicts
//! - Document ingestion, case-detail extraction, and JSON case storage
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use courtroom::{CaseDetails, DebateOrchestrator, GroqClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(GroqClient::new("api-key".to_string()));
//! let orchestrator = DebateOrchestrator::new(client);
//! let details = CaseDetails::new("facts", "issues", "holding");
//! let outcome = orchestrator.run_simulation(&details, 2).await?;
//! println!("{}", outcome.summary_line());
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod audit;
pub mod case;
pub mod classifier;
pub mod client;
pub mod extract;
pub mod ingest;
pub mod mock;
pub mod orchestrator;
pub mod processor;
pub mod prompt;
pub mod store;
pub mod verdict;

// Re-export key agent types
pub use agent::{Agent, AgentReply, AgentRole};

// Re-export key case types
pub use case::{CaseContext, CaseDetails, Speaker, TranscriptEntry};

// Re-export key client types
pub use client::{
    GenerationRequest, GroqClient, ModelClient, ModelError, DEFAULT_GROQ_BASE_URL,
    DEFAULT_GROQ_MODEL,
};

// Re-export key orchestration types
pub use orchestrator::{DebateOrchestrator, SimulationResult, TrialPhase, DEFAULT_ROUNDS};

// Re-export key verdict types
pub use verdict::{extract_verdict, Verdict, VerdictSide};

// Re-export key audit types
pub use audit::{scan_bias, AuditReport, BiasAuditor, BiasCategory};

// Re-export key classifier types
pub use classifier::{predict_baseline, BaselinePrediction};

// Re-export key processing and storage types
pub use ingest::{clean_text, extract_text, DocumentFormat, IngestError};
pub use processor::CaseProcessor;
pub use prompt::PromptError;
pub use store::{CaseRecord, CaseStore, FsCaseStore, StoreError};
