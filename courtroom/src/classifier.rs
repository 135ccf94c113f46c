//! Keyword baseline classifier for comparison against simulated verdicts.

use serde::{Deserialize, Serialize};

use crate::case::CaseDetails;
use crate::verdict::VerdictSide;

/// Keywords suggesting the plaintiff prevails.
const PLAINTIFF_KEYWORDS: [&str; 10] = [
    "violation",
    "breach",
    "negligence",
    "damages",
    "injury",
    "rights",
    "compensation",
    "liability",
    "guilty",
    "proved",
];

/// Keywords suggesting the defendant prevails. Phrases count as one hit.
const DEFENDANT_KEYWORDS: [&str; 8] = [
    "dismissed",
    "lack of evidence",
    "not proved",
    "innocent",
    "compliance",
    "proper procedure",
    "no violation",
    "acquitted",
];

/// Method tag carried in every baseline prediction.
pub const BASELINE_METHOD: &str = "baseline_keyword_classifier";

/// Non-LLM outcome prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselinePrediction {
    pub prediction: VerdictSide,
    /// Percent confidence, rounded to two decimals.
    pub confidence: f64,
    pub method: String,
    pub plaintiff_keywords_found: usize,
    pub defendant_keywords_found: usize,
}

/// Predict an outcome from keyword counts over the processed case text.
///
/// With no keyword signal at all, confidence jitters around 50 instead of
/// pinning to it, so repeated runs over keyword-free cases do not look
/// artificially certain. That jitter is the only randomness in the
/// system. Ties go to the plaintiff.
pub fn predict_baseline(details: &CaseDetails) -> BaselinePrediction {
    let text = format!("{} {} {}", details.facts, details.issues, details.holding);
    let text_lower = text.to_lowercase();

    let plaintiff_score = PLAINTIFF_KEYWORDS
        .iter()
        .filter(|kw| text_lower.contains(*kw))
        .count();
    let defendant_score = DEFENDANT_KEYWORDS
        .iter()
        .filter(|kw| text_lower.contains(*kw))
        .count();

    let total = plaintiff_score + defendant_score;
    let plaintiff_confidence = if total > 0 {
        plaintiff_score as f64 / total as f64 * 100.0
    } else {
        50.0 + (rand::random::<f64>() * 20.0 - 10.0)
    };

    let (prediction, confidence) = if plaintiff_confidence >= 50.0 {
        (VerdictSide::FavorPlaintiff, plaintiff_confidence)
    } else {
        (VerdictSide::FavorDefendant, 100.0 - plaintiff_confidence)
    };

    BaselinePrediction {
        prediction,
        confidence: (confidence * 100.0).round() / 100.0,
        method: BASELINE_METHOD.to_string(),
        plaintiff_keywords_found: plaintiff_score,
        defendant_keywords_found: defendant_score,
    }
}
