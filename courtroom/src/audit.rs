//! Bias auditing of delivered verdicts.
//!
//! The auditor agent is asked for a structured fairness report; anything
//! unusable resolves to the deterministic lexicon scan, so auditing never
//! fails.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::agent::{Agent, AgentRole};
use crate::case::CaseContext;
use crate::client::ModelClient;
use crate::extract::extract_struct;
use crate::prompt::PromptError;
use crate::verdict::Verdict;

/// Bias category checked by the lexicon scan, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasCategory {
    Gender,
    Regional,
    Religious,
    Caste,
}

impl BiasCategory {
    /// Scan order; also the order category tags appear in reports.
    pub const ALL: [BiasCategory; 4] = [
        Self::Gender,
        Self::Regional,
        Self::Religious,
        Self::Caste,
    ];

    /// Terms that flag this category. Matching is substring-based, not
    /// word-bounded, so "the" flags `he`; the score floor absorbs the
    /// resulting noise.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Gender => &["he", "she", "his", "her", "man", "woman", "male", "female"],
            Self::Regional => &["north", "south", "rural", "urban", "village"],
            Self::Religious => &["hindu", "muslim", "christian", "sikh"],
            Self::Caste => &["caste", "scheduled", "tribe", "backward"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Regional => "regional",
            Self::Religious => "religious",
            Self::Caste => "caste",
        }
    }
}

impl std::fmt::Display for BiasCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fairness report for one verdict.
///
/// Model-reported values pass through; fallback reports keep
/// `fairness_score` in [50, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub fairness_score: f64,
    #[serde(default)]
    pub biased_terms: Vec<String>,
    #[serde(default)]
    pub bias_types: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

/// At most this many matched terms are listed in a fallback report.
const MAX_REPORTED_TERMS: usize = 10;

/// Penalty per distinct matched term.
const PENALTY_PER_TERM: i64 = 5;

/// Score floor for fallback reports.
const SCORE_FLOOR: i64 = 50;

/// Fixed advice attached to every fallback report.
const FALLBACK_RECOMMENDATIONS: [&str; 3] = [
    "Use gender-neutral language where possible",
    "Avoid stereotypical assumptions",
    "Focus on facts and legal precedents",
];

/// Deterministic lexicon scan over the audit text.
///
/// Pure and idempotent: the same input always yields the same report.
pub fn scan_bias(text: &str) -> AuditReport {
    let lower = text.to_lowercase();
    let mut found_terms: Vec<&'static str> = Vec::new();
    let mut categories: Vec<BiasCategory> = Vec::new();

    for category in BiasCategory::ALL {
        for keyword in category.keywords().iter().copied() {
            if lower.contains(keyword) {
                if !found_terms.contains(&keyword) {
                    found_terms.push(keyword);
                }
                if !categories.contains(&category) {
                    categories.push(category);
                }
            }
        }
    }

    let total = found_terms.len();
    let fairness_score = (100 - PENALTY_PER_TERM * total as i64).max(SCORE_FLOOR) as f64;

    AuditReport {
        fairness_score,
        biased_terms: found_terms
            .iter()
            .take(MAX_REPORTED_TERMS)
            .map(|t| t.to_string())
            .collect(),
        bias_types: categories.iter().map(|c| c.as_str().to_string()).collect(),
        recommendations: FALLBACK_RECOMMENDATIONS
            .iter()
            .map(|r| r.to_string())
            .collect(),
        summary: format!(
            "Found {} potentially biased terms. Fairness score: {}/100",
            total, fairness_score
        ),
    }
}

/// Audits verdicts through the auditor agent, scanning locally when the
/// model gives nothing usable.
pub struct BiasAuditor {
    auditor: Agent,
}

impl BiasAuditor {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self {
            auditor: Agent::new(AgentRole::Auditor, model),
        }
    }

    /// Audit a delivered verdict against the case facts.
    ///
    /// `fairness_score` is the one required field in the model's reply;
    /// replies without it (or without JSON at all) resolve to the lexicon
    /// scan over the same facts, verdict text, and reasoning the agent saw.
    pub async fn audit_case(
        &self,
        facts: &str,
        verdict: &Verdict,
    ) -> Result<AuditReport, PromptError> {
        let verdict_text = verdict.verdict.to_string();
        let reasoning = verdict.reasoning.join(" ");

        let context = CaseContext::new()
            .with("facts", facts)
            .with("verdict", verdict_text.as_str())
            .with("reasoning", reasoning.as_str());

        let reply = self.auditor.invoke(&context).await?;
        let raw = reply.transcript_text();

        let report = extract_struct(&raw).unwrap_or_else(|| {
            tracing::debug!("audit reply had no usable report, scanning locally");
            scan_bias(&format!("{} {} {}", facts, verdict_text, reasoning))
        });
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockModel;
    use crate::verdict::VerdictSide;

    fn verdict_with_reasoning(reasoning: &[&str]) -> Verdict {
        Verdict {
            verdict: VerdictSide::FavorDefendant,
            confidence: 75.0,
            reasoning: reasoning.iter().map(|r| r.to_string()).collect(),
            supporting_evidence: vec![],
        }
    }

    #[test]
    fn test_scan_clean_text_scores_100() {
        let report = scan_bias("Contract dispute over unpaid invoices.");
        assert_eq!(report.fairness_score, 100.0);
        assert!(report.biased_terms.is_empty());
        assert!(report.bias_types.is_empty());
        assert_eq!(
            report.summary,
            "Found 0 potentially biased terms. Fairness score: 100/100"
        );
    }

    #[test]
    fn test_scan_flags_gender_and_regional() {
        let report =
            scan_bias("The tenant (a woman from a rural village) filed against her landlord.");
        // Substring matching flags: he (in "the"), her, man (in "woman"),
        // woman, rural, village.
        assert_eq!(report.biased_terms.len(), 6);
        assert_eq!(report.fairness_score, 70.0);
        assert_eq!(report.bias_types, vec!["gender", "regional"]);
        assert_eq!(
            report.summary,
            "Found 6 potentially biased terms. Fairness score: 70/100"
        );
    }

    #[test]
    fn test_scan_floors_at_50_and_caps_reported_terms() {
        // One hit from every keyword in the gender and regional lexicons,
        // plus religious and caste terms: more than ten distinct matches.
        let text = "he she his her man woman male female north south rural \
                    urban village hindu muslim christian sikh caste scheduled tribe backward";
        let report = scan_bias(text);
        assert!(report.biased_terms.len() <= 10);
        assert_eq!(report.fairness_score, 50.0);
        assert_eq!(
            report.bias_types,
            vec!["gender", "regional", "religious", "caste"]
        );
        // The summary counts every distinct match, not just the listed ones.
        assert!(report.summary.starts_with("Found 21 potentially biased terms."));
    }

    #[test]
    fn test_scan_is_idempotent() {
        let text = "A woman from the south appealed.";
        let first = scan_bias(text);
        let second = scan_bias(text);
        assert_eq!(first.fairness_score, second.fairness_score);
        assert_eq!(first.biased_terms, second.biased_terms);
        assert_eq!(first.bias_types, second.bias_types);
        assert_eq!(first.summary, second.summary);
    }

    #[test]
    fn test_scan_recommendations_are_fixed() {
        let report = scan_bias("anything");
        assert_eq!(
            report.recommendations,
            vec![
                "Use gender-neutral language where possible",
                "Avoid stereotypical assumptions",
                "Focus on facts and legal precedents",
            ]
        );
    }

    #[tokio::test]
    async fn test_audit_uses_model_report_when_valid() {
        let model = Arc::new(MockModel::constant(
            "Here is my audit: {\"fairness_score\": 82, \"biased_terms\": [\"her\"], \
             \"bias_types\": [\"gender\"], \"recommendations\": [\"rephrase\"], \
             \"summary\": \"minor gender bias\"}",
        ));
        let auditor = BiasAuditor::new(model);

        let report = auditor
            .audit_case("facts", &verdict_with_reasoning(&["reason"]))
            .await
            .unwrap();
        assert_eq!(report.fairness_score, 82.0);
        assert_eq!(report.biased_terms, vec!["her"]);
        assert_eq!(report.summary, "minor gender bias");
    }

    #[tokio::test]
    async fn test_audit_without_fairness_score_falls_back_to_scan() {
        let model = Arc::new(MockModel::constant(
            "{\"biased_terms\": [\"woman\"], \"bias_types\": [\"gender\"]}",
        ));
        let auditor = BiasAuditor::new(model);

        let report = auditor
            .audit_case(
                "The tenant, a woman from a rural village, sued.",
                &verdict_with_reasoning(&["the defence held"]),
            )
            .await
            .unwrap();
        // Fallback scanned the audit context, not the model reply.
        assert!(report.bias_types.contains(&"gender".to_string()));
        assert!(report.bias_types.contains(&"regional".to_string()));
        assert!(report.fairness_score >= 50.0 && report.fairness_score < 100.0);
    }

    #[tokio::test]
    async fn test_audit_with_failing_model_scans_locally() {
        let model = Arc::new(MockModel::failing("no backend"));
        let auditor = BiasAuditor::new(model);

        let report = auditor
            .audit_case("Clean commercial facts.", &verdict_with_reasoning(&[]))
            .await
            .unwrap();
        assert_eq!(report.recommendations.len(), 3);
        assert!(report.fairness_score >= 50.0);
    }

    #[tokio::test]
    async fn test_audit_context_carries_verdict_and_reasoning() {
        let model = Arc::new(MockModel::constant("{\"fairness_score\": 90}"));
        let auditor = BiasAuditor::new(model.clone());

        auditor
            .audit_case(
                "facts here",
                &verdict_with_reasoning(&["first point", "second point"]),
            )
            .await
            .unwrap();

        let request = &model.requests()[0];
        assert!(request.prompt.contains("FAVOR_DEFENDANT"));
        assert!(request.prompt.contains("first point second point"));
        assert_eq!(request.system, "You are a auditor in an Indian courtroom.");
    }
}
