//! Courtroom agents: roles, sampling parameters, and invocation.

use crate::case::CaseContext;
use crate::client::{GenerationRequest, ModelClient, ModelError};
use crate::prompt::{self, PromptError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Role an agent plays in the courtroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    PlaintiffLawyer,
    DefendantLawyer,
    Judge,
    Auditor,
}

impl AgentRole {
    /// Human-readable title used in the system instruction.
    pub fn title(&self) -> &'static str {
        match self {
            Self::PlaintiffLawyer => "plaintiff lawyer",
            Self::DefendantLawyer => "defendant lawyer",
            Self::Judge => "judge",
            Self::Auditor => "auditor",
        }
    }

    /// System instruction framing the role.
    pub fn system_instruction(&self) -> String {
        format!("You are a {} in an Indian courtroom.", self.title())
    }

    /// Prompt template for this role.
    pub fn template(&self) -> &'static str {
        match self {
            Self::PlaintiffLawyer => prompt::PLAINTIFF_TEMPLATE,
            Self::DefendantLawyer => prompt::DEFENDANT_TEMPLATE,
            Self::Judge => prompt::JUDGE_TEMPLATE,
            Self::Auditor => prompt::AUDITOR_TEMPLATE,
        }
    }

    /// Sampling temperature. Argument-producing roles run warmer than
    /// verdict- and audit-producing ones.
    pub fn temperature(&self) -> f32 {
        match self {
            Self::PlaintiffLawyer | Self::DefendantLawyer => 0.7,
            Self::Judge | Self::Auditor => 0.3,
        }
    }

    /// Completion token limit per reply.
    pub fn max_tokens(&self) -> u32 {
        match self {
            Self::PlaintiffLawyer | Self::DefendantLawyer => 800,
            Self::Judge => 1000,
            Self::Auditor => 900,
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlaintiffLawyer => write!(f, "plaintiff_lawyer"),
            Self::DefendantLawyer => write!(f, "defendant_lawyer"),
            Self::Judge => write!(f, "judge"),
            Self::Auditor => write!(f, "auditor"),
        }
    }
}

/// Outcome of one agent invocation.
///
/// A model failure is a value, not an error: the simulation records the
/// failure line and keeps going. Only template/context mismatches, which
/// are bugs in the calling code, surface as `PromptError`.
#[derive(Debug)]
pub enum AgentReply {
    /// Model produced text.
    Completed(String),
    /// Model call failed; the failure is preserved for the transcript.
    Degraded(ModelError),
}

impl AgentReply {
    /// Text as it appears in the transcript. Degraded turns keep the
    /// failure visible instead of silently dropping the turn.
    pub fn transcript_text(&self) -> String {
        match self {
            Self::Completed(text) => text.clone(),
            Self::Degraded(err) => format!("Error generating response: {err}"),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

/// One courtroom participant bound to a shared model client.
pub struct Agent {
    role: AgentRole,
    model: Arc<dyn ModelClient>,
}

impl Agent {
    pub fn new(role: AgentRole, model: Arc<dyn ModelClient>) -> Self {
        Self { role, model }
    }

    pub fn role(&self) -> AgentRole {
        self.role
    }

    /// Render this role's template against the context and issue exactly
    /// one generation call.
    pub async fn invoke(&self, context: &CaseContext) -> Result<AgentReply, PromptError> {
        let prompt = prompt::render(self.role.template(), context)?;
        let request = GenerationRequest {
            system: self.role.system_instruction(),
            prompt,
            temperature: self.role.temperature(),
            max_tokens: self.role.max_tokens(),
        };

        match self.model.generate(&request).await {
            Ok(text) => Ok(AgentReply::Completed(text)),
            Err(err) => {
                tracing::warn!(role = %self.role, error = %err, "model call failed, degrading turn");
                Ok(AgentReply::Degraded(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::CaseDetails;
    use crate::mock::MockModel;

    fn argument_context() -> CaseContext {
        let details = CaseDetails::new("facts", "issues", "holding");
        CaseContext::from_details(&details)
    }

    #[test]
    fn test_role_parameters() {
        assert_eq!(AgentRole::PlaintiffLawyer.temperature(), 0.7);
        assert_eq!(AgentRole::PlaintiffLawyer.max_tokens(), 800);
        assert_eq!(AgentRole::Judge.temperature(), 0.3);
        assert_eq!(AgentRole::Judge.max_tokens(), 1000);
        assert_eq!(AgentRole::Auditor.max_tokens(), 900);
    }

    #[test]
    fn test_system_instruction_uses_title() {
        assert_eq!(
            AgentRole::DefendantLawyer.system_instruction(),
            "You are a defendant lawyer in an Indian courtroom."
        );
        assert_eq!(
            AgentRole::Judge.system_instruction(),
            "You are a judge in an Indian courtroom."
        );
    }

    #[tokio::test]
    async fn test_invoke_completes_with_model_text() {
        let model = Arc::new(MockModel::constant("The breach is plain."));
        let agent = Agent::new(AgentRole::PlaintiffLawyer, model.clone());

        let reply = agent.invoke(&argument_context()).await.unwrap();
        assert!(!reply.is_degraded());
        assert_eq!(reply.transcript_text(), "The breach is plain.");

        let requests = model.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].system,
            "You are a plaintiff lawyer in an Indian courtroom."
        );
        assert!(requests[0].prompt.contains("Case facts:\nfacts"));
    }

    #[tokio::test]
    async fn test_invoke_degrades_on_model_failure() {
        let model = Arc::new(MockModel::failing("socket closed"));
        let agent = Agent::new(AgentRole::DefendantLawyer, model);

        let reply = agent.invoke(&argument_context()).await.unwrap();
        assert!(reply.is_degraded());
        let text = reply.transcript_text();
        assert!(text.starts_with("Error generating response: "));
        assert!(text.contains("socket closed"));
    }

    #[tokio::test]
    async fn test_invoke_propagates_missing_context_field() {
        let model = Arc::new(MockModel::constant("unused"));
        let agent = Agent::new(AgentRole::Judge, model);

        // The judge template needs the joined arguments too; a bare case
        // context is a caller bug, not a degraded turn.
        let details = CaseDetails::new("f", "i", "h");
        let err = agent
            .invoke(&CaseContext::from_details(&details))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PromptError::MissingField {
                field: "plaintiff_arguments".to_string()
            }
        );
    }
}
