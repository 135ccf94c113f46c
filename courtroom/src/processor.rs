//! Case-detail extraction: an analyzer model call with a header-pattern
//! fallback, so processing always produces usable details.

use regex::Regex;
use serde::Deserialize;
use std::sync::{Arc, LazyLock};

use crate::case::CaseDetails;
use crate::client::{GenerationRequest, ModelClient};
use crate::extract::extract_struct;

/// At most this much of the document is sent for analysis.
const ANALYSIS_CHAR_LIMIT: usize = 4000;

const ANALYZER_SYSTEM: &str =
    "You are a legal document analyzer. Always respond with valid JSON only.";
const ANALYZER_TEMPERATURE: f32 = 0.3;
const ANALYZER_MAX_TOKENS: u32 = 1000;

/// Facts section headers tried in order over the lower-cased document.
static FACTS_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"facts?[:\s]+([^\n]{100,500})").expect("FACTS_PATTERNS regex should compile"),
        Regex::new(r"background[:\s]+([^\n]{100,500})")
            .expect("FACTS_PATTERNS regex should compile"),
    ]
});

/// Issues section headers.
static ISSUES_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"issues?[:\s]+([^\n]{50,400})").expect("ISSUES_PATTERNS regex should compile"),
        Regex::new(r"questions?[:\s]+([^\n]{50,400})")
            .expect("ISSUES_PATTERNS regex should compile"),
    ]
});

/// Holding/judgment section headers.
static HOLDING_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"holding[:\s]+([^\n]{50,400})").expect("HOLDING_PATTERNS regex should compile"),
        Regex::new(r"judgment[:\s]+([^\n]{50,400})")
            .expect("HOLDING_PATTERNS regex should compile"),
        Regex::new(r"decision[:\s]+([^\n]{50,400})")
            .expect("HOLDING_PATTERNS regex should compile"),
    ]
});

/// Analyzer reply shape. Every field defaults, so any JSON object is
/// accepted and absent fields carry an explicit placeholder.
#[derive(Debug, Deserialize)]
struct AnalyzedDetails {
    #[serde(default = "facts_placeholder")]
    facts: String,
    #[serde(default = "issues_placeholder")]
    issues: String,
    #[serde(default = "holding_placeholder")]
    holding: String,
}

fn facts_placeholder() -> String {
    "Facts could not be extracted".to_string()
}

fn issues_placeholder() -> String {
    "Issues could not be extracted".to_string()
}

fn holding_placeholder() -> String {
    "Holding could not be extracted".to_string()
}

/// Extracts facts, issues, and holding from raw case text.
pub struct CaseProcessor {
    model: Arc<dyn ModelClient>,
}

impl CaseProcessor {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model }
    }

    /// Analyze a document into processed case details.
    ///
    /// The analyzer model is asked for a three-field JSON object; missing
    /// fields take per-field placeholders. On a failed call or an
    /// unparseable reply, header-pattern extraction over the document
    /// itself applies, so this never fails.
    pub async fn extract_case_details(&self, case_text: &str) -> CaseDetails {
        let excerpt: String = case_text.chars().take(ANALYSIS_CHAR_LIMIT).collect();
        let request = GenerationRequest {
            system: ANALYZER_SYSTEM.to_string(),
            prompt: analyzer_prompt(&excerpt),
            temperature: ANALYZER_TEMPERATURE,
            max_tokens: ANALYZER_MAX_TOKENS,
        };

        match self.model.generate(&request).await {
            Ok(reply) => match extract_struct::<AnalyzedDetails>(&reply) {
                Some(analyzed) => CaseDetails {
                    facts: analyzed.facts,
                    issues: analyzed.issues,
                    holding: analyzed.holding,
                },
                None => {
                    tracing::warn!("analyzer reply had no usable JSON, using pattern extraction");
                    fallback_extraction(case_text)
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "analyzer call failed, using pattern extraction");
                fallback_extraction(case_text)
            }
        }
    }
}

fn analyzer_prompt(excerpt: &str) -> String {
    format!(
        "You are a legal AI assistant analyzing an Indian legal case document.\n\
         \n\
         Case Document:\n\
         {excerpt}\n\
         \n\
         Extract the following information from the case:\n\
         1. FACTS: Key facts and background of the case (3-5 sentences)\n\
         2. ISSUES: Main legal issues or questions presented (2-4 points)\n\
         3. HOLDING: The court's decision or main conclusions (2-3 sentences)\n\
         \n\
         Provide your response in the following JSON format:\n\
         {{\n\
         \x20 \"facts\": \"facts text here\",\n\
         \x20 \"issues\": \"issues text here\",\n\
         \x20 \"holding\": \"holding text here\"\n\
         }}\n\
         \n\
         Only return valid JSON, no additional text."
    )
}

/// Header-pattern extraction over the lower-cased document. Captures stay
/// lower-cased.
fn fallback_extraction(case_text: &str) -> CaseDetails {
    let text_lower = case_text.to_lowercase();

    let facts = first_capture(&*FACTS_PATTERNS, &text_lower, 500)
        .unwrap_or_else(|| "Facts not clearly identifiable in document.".to_string());
    let issues = first_capture(&*ISSUES_PATTERNS, &text_lower, 400)
        .unwrap_or_else(|| "Legal issues not clearly specified.".to_string());
    let holding = first_capture(&*HOLDING_PATTERNS, &text_lower, 400)
        .unwrap_or_else(|| "Holding/judgment not clearly specified.".to_string());

    CaseDetails {
        facts,
        issues,
        holding,
    }
}

/// First capture group of the first pattern that matches, trimmed and
/// capped at `limit` characters.
fn first_capture(patterns: &[Regex], text: &str, limit: usize) -> Option<String> {
    for pattern in patterns {
        if let Some(captures) = pattern.captures(text) {
            if let Some(group) = captures.get(1) {
                return Some(group.as_str().trim().chars().take(limit).collect());
            }
        }
    }
    None
}
