//! Debate orchestrator: drives the plaintiff/defendant rounds and the
//! judge's ruling for one simulated trial.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::agent::{Agent, AgentRole};
use crate::case::{CaseContext, CaseDetails, Speaker, TranscriptEntry};
use crate::client::ModelClient;
use crate::prompt::PromptError;
use crate::verdict::{extract_verdict, Verdict};

/// Rounds argued when the caller does not choose a count.
pub const DEFAULT_ROUNDS: u32 = 2;

/// Phase of a simulated trial. Phases only advance; `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrialPhase {
    /// Argument round `n` of the configured total (1-indexed).
    Round(u32),
    /// All rounds argued; the judge is ruling.
    Judging,
    /// Verdict delivered.
    Done,
}

impl TrialPhase {
    /// Opening phase for a trial with the given round count.
    pub fn start(total_rounds: u32) -> Self {
        if total_rounds == 0 {
            Self::Judging
        } else {
            Self::Round(1)
        }
    }

    /// The phase that follows this one.
    pub fn advance(self, total_rounds: u32) -> Self {
        match self {
            Self::Round(n) if n < total_rounds => Self::Round(n + 1),
            Self::Round(_) => Self::Judging,
            Self::Judging | Self::Done => Self::Done,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl std::fmt::Display for TrialPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Round(n) => write!(f, "round_{}", n),
            Self::Judging => write!(f, "judging"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Completed simulation: full transcript plus the judge's ruling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Every argument in delivery order.
    pub debate_transcript: Vec<TranscriptEntry>,
    /// The judge's ruling (extracted or fallback).
    pub verdict: Verdict,
    /// Rounds argued; always the configured count, degraded turns included.
    pub rounds_completed: u32,
}

impl SimulationResult {
    /// Compact summary line.
    pub fn summary_line(&self) -> String {
        format!(
            "[{}] {} rounds | {} arguments | confidence {}",
            self.verdict.verdict,
            self.rounds_completed,
            self.debate_transcript.len(),
            self.verdict.confidence
        )
    }
}

/// Runs the full debate cycle: alternating argument rounds, then judgment.
///
/// Each turn builds a fresh context from the case details, so arguments
/// depend only on the case, never on earlier turns; the judge is the one
/// participant who sees the accumulated transcript.
pub struct DebateOrchestrator {
    plaintiff: Agent,
    defendant: Agent,
    judge: Agent,
}

impl DebateOrchestrator {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self {
            plaintiff: Agent::new(AgentRole::PlaintiffLawyer, model.clone()),
            defendant: Agent::new(AgentRole::DefendantLawyer, model.clone()),
            judge: Agent::new(AgentRole::Judge, model),
        }
    }

    /// Run `rounds` argument rounds and deliver a verdict.
    ///
    /// Model failures degrade into recorded error lines; the simulation
    /// always completes with a full transcript and a verdict. Only a
    /// template/context mismatch errors out.
    pub async fn run_simulation(
        &self,
        details: &CaseDetails,
        rounds: u32,
    ) -> Result<SimulationResult, PromptError> {
        let mut transcript: Vec<TranscriptEntry> = Vec::with_capacity(rounds as usize * 2);
        let mut phase = TrialPhase::start(rounds);

        while let TrialPhase::Round(round) = phase {
            tracing::info!(round, total = rounds, "arguing round");

            for speaker in [Speaker::PlaintiffLawyer, Speaker::DefendantLawyer] {
                // Both turns of a round see the same case framing; neither
                // side is shown the opponent's earlier arguments.
                let context = CaseContext::from_details(details);
                let reply = self.arguer(speaker).invoke(&context).await?;
                if reply.is_degraded() {
                    tracing::warn!(round, speaker = %speaker, "turn degraded, recording error line");
                }
                transcript.push(TranscriptEntry {
                    round,
                    speaker,
                    argument: reply.transcript_text(),
                });
            }

            phase = phase.advance(rounds);
        }

        tracing::info!(phase = %phase, entries = transcript.len(), "arguments closed");
        let verdict = self.deliver_verdict(details, &transcript).await?;
        phase = phase.advance(rounds);
        debug_assert!(phase.is_terminal());

        tracing::info!(verdict = %verdict.verdict, confidence = verdict.confidence, "simulation complete");
        Ok(SimulationResult {
            debate_transcript: transcript,
            verdict,
            rounds_completed: rounds,
        })
    }

    /// Ask the judge for a ruling over the accumulated transcript.
    async fn deliver_verdict(
        &self,
        details: &CaseDetails,
        transcript: &[TranscriptEntry],
    ) -> Result<Verdict, PromptError> {
        let context = CaseContext::from_details(details)
            .with(
                "plaintiff_arguments",
                join_arguments(transcript, Speaker::PlaintiffLawyer),
            )
            .with(
                "defendant_arguments",
                join_arguments(transcript, Speaker::DefendantLawyer),
            );

        let reply = self.judge.invoke(&context).await?;
        Ok(extract_verdict(&reply.transcript_text()))
    }

    fn arguer(&self, speaker: Speaker) -> &Agent {
        match speaker {
            Speaker::PlaintiffLawyer => &self.plaintiff,
            Speaker::DefendantLawyer => &self.defendant,
        }
    }
}

/// One speaker's arguments in transcript order, double-newline separated.
fn join_arguments(transcript: &[TranscriptEntry], speaker: Speaker) -> String {
    transcript
        .iter()
        .filter(|entry| entry.speaker == speaker)
        .map(|entry| entry.argument.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
