//! Case persistence: one pretty-printed JSON document per case id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

use crate::audit::AuditReport;
use crate::case::CaseDetails;
use crate::classifier::BaselinePrediction;
use crate::orchestrator::SimulationResult;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Case {case_id} not found")]
    NotFound { case_id: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The persisted unit: an uploaded document plus whatever stages have run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    pub case_id: String,
    pub filename: String,
    pub raw_text: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<CaseDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_prediction: Option<BaselinePrediction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit: Option<AuditReport>,
}

impl CaseRecord {
    /// Fresh record with a minted case id and upload timestamp.
    pub fn new(filename: &str, raw_text: String) -> Self {
        Self {
            case_id: Uuid::new_v4().to_string(),
            filename: filename.to_string(),
            raw_text,
            uploaded_at: Utc::now(),
            details: None,
            baseline_prediction: None,
            simulation: None,
            audit: None,
        }
    }
}

/// Storage seam for case records.
pub trait CaseStore: Send + Sync {
    fn save(&self, record: &CaseRecord) -> Result<(), StoreError>;

    fn load(&self, case_id: &str) -> Result<CaseRecord, StoreError>;

    /// Ids of every stored case.
    fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Load, apply `mutate`, save. Returns the updated record.
    fn update(
        &self,
        case_id: &str,
        mutate: &mut dyn FnMut(&mut CaseRecord),
    ) -> Result<CaseRecord, StoreError> {
        let mut record = self.load(case_id)?;
        mutate(&mut record);
        self.save(&record)?;
        Ok(record)
    }
}

/// Filesystem store: `{cases_dir}/{case_id}.json` per record.
pub struct FsCaseStore {
    cases_dir: PathBuf,
}

impl FsCaseStore {
    /// Open a store rooted at `cases_dir`, creating the directory if needed.
    pub fn new(cases_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let cases_dir = cases_dir.into();
        std::fs::create_dir_all(&cases_dir)?;
        Ok(Self { cases_dir })
    }

    /// Ids are minted as uuid v4; anything path-like is treated as unknown.
    fn case_path(&self, case_id: &str) -> Result<PathBuf, StoreError> {
        if case_id.is_empty() || case_id.contains(['/', '\\']) || case_id.contains("..") {
            return Err(StoreError::NotFound {
                case_id: case_id.to_string(),
            });
        }
        Ok(self.cases_dir.join(format!("{case_id}.json")))
    }
}

impl CaseStore for FsCaseStore {
    fn save(&self, record: &CaseRecord) -> Result<(), StoreError> {
        let path = self.case_path(&record.case_id)?;
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn load(&self, case_id: &str) -> Result<CaseRecord, StoreError> {
        let path = self.case_path(case_id)?;
        if !path.exists() {
            return Err(StoreError::NotFound {
                case_id: case_id.to_string(),
            });
        }
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.cases_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::{Verdict, VerdictSide};

    fn temp_store() -> (tempfile::TempDir, FsCaseStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsCaseStore::new(dir.path().join("cases")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (_dir, store) = temp_store();
        let record = CaseRecord::new("contract.pdf", "The supplier delivered late.".to_string());
        let case_id = record.case_id.clone();

        store.save(&record).unwrap();
        let loaded = store.load(&case_id).unwrap();

        assert_eq!(loaded.case_id, case_id);
        assert_eq!(loaded.filename, "contract.pdf");
        assert_eq!(loaded.raw_text, "The supplier delivered late.");
        assert_eq!(loaded.uploaded_at, record.uploaded_at);
        assert!(loaded.details.is_none());
        assert!(loaded.simulation.is_none());
    }

    #[test]
    fn test_load_missing_case() {
        let (_dir, store) = temp_store();
        let err = store.load("no-such-case").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(err.to_string(), "Case no-such-case not found");
    }

    #[test]
    fn test_update_overwrites_named_fields_only() {
        let (_dir, store) = temp_store();
        let record = CaseRecord::new("note.txt", "raw".to_string());
        let case_id = record.case_id.clone();
        store.save(&record).unwrap();

        let details = CaseDetails::new("facts", "issues", "holding");
        let updated = store
            .update(&case_id, &mut |r| r.details = Some(details.clone()))
            .unwrap();
        assert_eq!(updated.details.as_ref().unwrap().facts, "facts");

        let reloaded = store.load(&case_id).unwrap();
        assert_eq!(reloaded.raw_text, "raw");
        assert_eq!(reloaded.details.unwrap().issues, "issues");
        assert!(reloaded.baseline_prediction.is_none());
    }

    #[test]
    fn test_update_missing_case() {
        let (_dir, store) = temp_store();
        let err = store.update("ghost", &mut |_| {}).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_list_returns_sorted_ids() {
        let (_dir, store) = temp_store();
        let mut a = CaseRecord::new("a.txt", String::new());
        a.case_id = "bbb".to_string();
        let mut b = CaseRecord::new("b.txt", String::new());
        b.case_id = "aaa".to_string();
        store.save(&a).unwrap();
        store.save(&b).unwrap();

        assert_eq!(store.list().unwrap(), vec!["aaa", "bbb"]);
    }

    #[test]
    fn test_list_ignores_foreign_files() {
        let (_dir, store) = temp_store();
        std::fs::write(store.cases_dir.join("notes.md"), "scratch").unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_path_like_id_is_rejected() {
        let (_dir, store) = temp_store();
        let err = store.load("../escape").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_simulation_stage_survives_roundtrip() {
        let (_dir, store) = temp_store();
        let mut record = CaseRecord::new("case.txt", "text".to_string());
        record.simulation = Some(SimulationResult {
            debate_transcript: vec![],
            verdict: Verdict {
                verdict: VerdictSide::FavorPlaintiff,
                confidence: 88.0,
                reasoning: vec!["point".to_string()],
                supporting_evidence: vec![],
            },
            rounds_completed: 2,
        });
        store.save(&record).unwrap();

        let loaded = store.load(&record.case_id).unwrap();
        let simulation = loaded.simulation.unwrap();
        assert_eq!(simulation.rounds_completed, 2);
        assert_eq!(simulation.verdict.verdict, VerdictSide::FavorPlaintiff);
    }
}
