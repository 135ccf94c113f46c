//! Prompt templates for each courtroom role, plus placeholder rendering.
//!
//! Templates reference context fields as `{field}`; rendering is pure
//! substitution with no logic. `{{` and `}}` produce literal braces so a
//! template can show example JSON.

use crate::case::CaseContext;
use thiserror::Error;

/// Argument prompt for the plaintiff's lawyer.
pub const PLAINTIFF_TEMPLATE: &str = "\
You are arguing on behalf of the plaintiff.

Case facts:
{facts}

Legal issues:
{issues}

Lower court holding:
{holding}

Present a persuasive argument for why the court should rule in favor of the \
plaintiff. Ground every claim in the facts, address the legal issues in order, \
and anticipate the defence's strongest counterpoints. Keep the argument under \
300 words.
";

/// Argument prompt for the defendant's lawyer.
pub const DEFENDANT_TEMPLATE: &str = "\
You are arguing on behalf of the defendant.

Case facts:
{facts}

Legal issues:
{issues}

Lower court holding:
{holding}

Present a persuasive argument for why the court should rule in favor of the \
defendant. Challenge the plaintiff's reading of the facts, address the legal \
issues in order, and highlight any failure to meet the burden of proof. Keep \
the argument under 300 words.
";

/// Verdict prompt for the judge. Asks for JSON only; the extraction layer
/// tolerates surrounding prose anyway.
pub const JUDGE_TEMPLATE: &str = "\
You have heard closing arguments in this case.

Case facts:
{facts}

Legal issues:
{issues}

Lower court holding:
{holding}

Plaintiff's arguments:
{plaintiff_arguments}

Defendant's arguments:
{defendant_arguments}

Weigh both sides on the legal merits and deliver your verdict. Respond with \
valid JSON only, using exactly this schema:
{{
  \"verdict\": \"FAVOR_PLAINTIFF\" or \"FAVOR_DEFENDANT\",
  \"confidence\": <number 0-100>,
  \"reasoning\": [\"point 1\", \"point 2\"],
  \"supporting_evidence\": [\"evidence 1\", \"evidence 2\"]
}}
";

/// Bias-review prompt for the auditor.
pub const AUDITOR_TEMPLATE: &str = "\
Review the following verdict for potential bias.

Case facts:
{facts}

Verdict:
{verdict}

Judge's reasoning:
{reasoning}

Check whether gender, regional, religious, or caste considerations influenced \
how the facts were weighed or how the verdict was reasoned. Respond with valid \
JSON only, using exactly this schema:
{{
  \"fairness_score\": <number 0-100>,
  \"biased_terms\": [\"term 1\", \"term 2\"],
  \"bias_types\": [\"gender\", \"regional\", \"religious\", \"caste\"],
  \"recommendations\": [\"recommendation 1\"],
  \"summary\": \"one-line assessment\"
}}
";

/// Errors from template rendering. All variants indicate a bug in the
/// template or the calling code, never in model output, so they propagate
/// instead of degrading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("no context field for placeholder `{field}`")]
    MissingField { field: String },
    #[error("unterminated placeholder in template")]
    UnterminatedPlaceholder,
    #[error("unmatched `}}` in template")]
    UnmatchedBrace,
}

/// Substitute `{field}` placeholders from the context.
pub fn render(template: &str, context: &CaseContext) -> Result<String, PromptError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => field.push(ch),
                        None => return Err(PromptError::UnterminatedPlaceholder),
                    }
                }
                match context.get(&field) {
                    Some(value) => out.push_str(value),
                    None => return Err(PromptError::MissingField { field }),
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(PromptError::UnmatchedBrace);
                }
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
