//! Scripted model client for deterministic tests.

use crate::client::{GenerationRequest, ModelClient, ModelError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A scripted turn: either model text or a simulated call failure.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Text(String),
    Failure(String),
}

/// Replays a fixed script of replies, one per `generate` call, and records
/// every request it receives. The final scripted reply repeats once the
/// script is exhausted, so a single-entry script acts as a constant model.
pub struct MockModel {
    script: Vec<ScriptedReply>,
    cursor: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockModel {
    pub fn with_script(script: Vec<ScriptedReply>) -> Self {
        Self {
            script,
            cursor: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Replies with the given texts in order.
    pub fn sequence(texts: &[&str]) -> Self {
        Self::with_script(
            texts
                .iter()
                .map(|t| ScriptedReply::Text(t.to_string()))
                .collect(),
        )
    }

    /// Replies with the same text on every call.
    pub fn constant(text: &str) -> Self {
        Self::sequence(&[text])
    }

    /// Fails every call with the given message.
    pub fn failing(message: &str) -> Self {
        Self::with_script(vec![ScriptedReply::Failure(message.to_string())])
    }

    /// All requests seen so far, in call order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().expect("mock request log poisoned").clone()
    }

    /// Number of `generate` calls made.
    pub fn calls(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelClient for MockModel {
    fn model_name(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, ModelError> {
        self.requests
            .lock()
            .expect("mock request log poisoned")
            .push(request.clone());

        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        let reply = match self.script.get(index).or_else(|| self.script.last()) {
            Some(reply) => reply,
            None => return Err(ModelError::RequestFailed("empty mock script".to_string())),
        };

        match reply {
            ScriptedReply::Text(text) => Ok(text.clone()),
            ScriptedReply::Failure(message) => {
                Err(ModelError::RequestFailed(message.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str) -> GenerationRequest {
        GenerationRequest {
            system: "system".to_string(),
            prompt: prompt.to_string(),
            temperature: 0.7,
            max_tokens: 800,
        }
    }

    #[tokio::test]
    async fn test_sequence_replays_in_order_then_repeats_last() {
        let model = MockModel::sequence(&["first", "second"]);
        assert_eq!(model.generate(&request("a")).await.unwrap(), "first");
        assert_eq!(model.generate(&request("b")).await.unwrap(), "second");
        assert_eq!(model.generate(&request("c")).await.unwrap(), "second");
        assert_eq!(model.calls(), 3);
    }

    #[tokio::test]
    async fn test_failing_returns_error() {
        let model = MockModel::failing("connection refused");
        let err = model.generate(&request("a")).await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_requests_are_recorded() {
        let model = MockModel::constant("ok");
        model.generate(&request("one")).await.unwrap();
        model.generate(&request("two")).await.unwrap();
        let seen = model.requests();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].prompt, "one");
        assert_eq!(seen[1].prompt, "two");
    }
}
