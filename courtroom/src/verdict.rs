//! Judge verdicts: structured form, extraction, deterministic fallback.

use crate::extract::extract_struct;
use serde::{Deserialize, Serialize};

/// Which side the ruling favors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictSide {
    FavorPlaintiff,
    FavorDefendant,
}

impl std::fmt::Display for VerdictSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FavorPlaintiff => write!(f, "FAVOR_PLAINTIFF"),
            Self::FavorDefendant => write!(f, "FAVOR_DEFENDANT"),
        }
    }
}

/// Structured ruling from the judge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub verdict: VerdictSide,
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: Vec<String>,
    #[serde(default)]
    pub supporting_evidence: Vec<String>,
}

/// Confidence assigned to every fallback verdict.
const FALLBACK_CONFIDENCE: f64 = 75.0;

/// How much raw text the fallback keeps as its single reasoning entry.
const FALLBACK_REASONING_CHARS: usize = 200;

/// Recover a verdict from raw judge output.
///
/// `verdict` and `confidence` are required; reasoning and evidence default
/// to empty. Unparseable output resolves to [`fallback_verdict`], so this
/// never fails.
pub fn extract_verdict(raw: &str) -> Verdict {
    extract_struct(raw).unwrap_or_else(|| fallback_verdict(raw))
}

/// Deterministic verdict when the judge's reply carries no usable object.
///
/// Side selection keys on the literal word "plaintiff" anywhere in the
/// text; a reply that only discusses the defendant resolves against the
/// plaintiff. Confidence is fixed, and the opening of the raw text stands
/// in for reasoning.
pub fn fallback_verdict(raw: &str) -> Verdict {
    let side = if raw.to_lowercase().contains("plaintiff") {
        VerdictSide::FavorPlaintiff
    } else {
        VerdictSide::FavorDefendant
    };

    Verdict {
        verdict: side,
        confidence: FALLBACK_CONFIDENCE,
        reasoning: vec![raw.chars().take(FALLBACK_REASONING_CHARS).collect()],
        supporting_evidence: vec!["Evidence from case facts".to_string()],
    }
}
