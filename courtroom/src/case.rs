//! Core case data model: processed details, prompt contexts, transcripts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Processed summary of a legal case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseDetails {
    /// Factual background of the dispute.
    pub facts: String,
    /// Legal issues under contention.
    pub issues: String,
    /// Holding or judgment language found in the source document.
    pub holding: String,
}

impl CaseDetails {
    pub fn new(facts: &str, issues: &str, holding: &str) -> Self {
        Self {
            facts: facts.to_string(),
            issues: issues.to_string(),
            holding: holding.to_string(),
        }
    }
}

/// Named text fields handed to an agent for one invocation.
///
/// Built fresh per turn and never mutated across turns; prompt templates
/// reference fields by name.
#[derive(Debug, Clone, Default)]
pub struct CaseContext {
    fields: BTreeMap<String, String>,
}

impl CaseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a context with the three processed case fields.
    pub fn from_details(details: &CaseDetails) -> Self {
        Self::new()
            .with("facts", &details.facts)
            .with("issues", &details.issues)
            .with("holding", &details.holding)
    }

    /// Add or overwrite a field.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Side speaking in the debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    PlaintiffLawyer,
    DefendantLawyer,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlaintiffLawyer => write!(f, "plaintiff_lawyer"),
            Self::DefendantLawyer => write!(f, "defendant_lawyer"),
        }
    }
}

/// One argument delivered during the debate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Round number (1-indexed).
    pub round: u32,
    /// Who delivered the argument.
    pub speaker: Speaker,
    /// Argument text as produced (degraded turns carry the error line).
    pub argument: String,
}
