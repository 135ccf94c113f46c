//! Staged case pipeline: the per-case operations behind the CLI.
//!
//! Stages run in order for a case: upload, process, then simulate and
//! audit; predict can run any time after upload. Later stages check that
//! the stage they build on has run and persist their output back onto
//! the case record.

use std::sync::Arc;

use thiserror::Error;

use courtroom::{
    clean_text, extract_text, predict_baseline, BiasAuditor, CaseProcessor, CaseRecord, CaseStore,
    DebateOrchestrator, DocumentFormat, IngestError, ModelClient, PromptError, StoreError,
};

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A stage ran before the stage it builds on.
    #[error("{0}")]
    Precondition(&'static str),
    #[error("{0}")]
    Store(#[from] StoreError),
    #[error("{0}")]
    Ingest(#[from] IngestError),
    #[error("{0}")]
    Prompt(#[from] PromptError),
}

/// Per-case operations over a store and a shared model client.
///
/// One pipeline keeps at most one model call in flight; callers wanting
/// concurrency across cases hold the pipeline behind an `Arc`.
pub struct CasePipeline<S: CaseStore> {
    store: S,
    processor: CaseProcessor,
    orchestrator: DebateOrchestrator,
    auditor: BiasAuditor,
}

impl<S: CaseStore> CasePipeline<S> {
    pub fn new(store: S, model: Arc<dyn ModelClient>) -> Self {
        Self {
            processor: CaseProcessor::new(model.clone()),
            orchestrator: DebateOrchestrator::new(model.clone()),
            auditor: BiasAuditor::new(model),
            store,
        }
    }

    /// Ingest an uploaded document and persist a fresh case record.
    pub fn upload(&self, filename: &str, bytes: &[u8]) -> Result<CaseRecord, PipelineError> {
        let format = DocumentFormat::from_filename(filename)?;
        let raw = extract_text(bytes, format)?;
        let cleaned = clean_text(&raw);

        let record = CaseRecord::new(filename, cleaned);
        self.store.save(&record)?;
        tracing::info!(case_id = %record.case_id, filename, "case uploaded");
        Ok(record)
    }

    /// Extract facts, issues, and holding; persist them on the record.
    pub async fn process(&self, case_id: &str) -> Result<CaseRecord, PipelineError> {
        let record = self.store.load(case_id)?;
        let details = self.processor.extract_case_details(&record.raw_text).await;
        tracing::info!(case_id, "case processed");
        Ok(self
            .store
            .update(case_id, &mut |r| r.details = Some(details.clone()))?)
    }

    /// Baseline keyword classification over whatever details exist.
    ///
    /// Runs even on an unprocessed case; absent details classify as
    /// empty text.
    pub fn predict(&self, case_id: &str) -> Result<CaseRecord, PipelineError> {
        let record = self.store.load(case_id)?;
        let details = record.details.unwrap_or_default();
        let prediction = predict_baseline(&details);
        tracing::info!(case_id, prediction = %prediction.prediction, "baseline predicted");
        Ok(self.store.update(case_id, &mut |r| {
            r.baseline_prediction = Some(prediction.clone())
        })?)
    }

    /// Run the courtroom debate and persist the simulation outcome.
    pub async fn simulate(&self, case_id: &str, rounds: u32) -> Result<CaseRecord, PipelineError> {
        let record = self.store.load(case_id)?;
        let details = record.details.ok_or(PipelineError::Precondition(
            "Case must be processed before simulation",
        ))?;

        let simulation = self.orchestrator.run_simulation(&details, rounds).await?;
        tracing::info!(case_id, verdict = %simulation.verdict.verdict, "simulation complete");
        Ok(self
            .store
            .update(case_id, &mut |r| r.simulation = Some(simulation.clone()))?)
    }

    /// Audit the delivered verdict and persist the fairness report.
    pub async fn audit(&self, case_id: &str) -> Result<CaseRecord, PipelineError> {
        let record = self.store.load(case_id)?;
        let simulation = record.simulation.ok_or(PipelineError::Precondition(
            "Simulation must be run before audit",
        ))?;
        let facts = record.details.map(|d| d.facts).unwrap_or_default();

        let report = self.auditor.audit_case(&facts, &simulation.verdict).await?;
        tracing::info!(case_id, fairness = report.fairness_score, "audit complete");
        Ok(self
            .store
            .update(case_id, &mut |r| r.audit = Some(report.clone()))?)
    }

    /// The full case record as stored.
    pub fn show(&self, case_id: &str) -> Result<CaseRecord, PipelineError> {
        Ok(self.store.load(case_id)?)
    }
}
