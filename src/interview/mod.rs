//! QuestionOrchestrator - the bounded interview state machine
//!
//! Produces the next question given the accumulated transcript. The
//! transcript lives with the caller; the orchestrator holds no per-interview
//! state and one instance safely serves many concurrent interviews.
//!
//! The machine is total: generation or parsing failures fall back to the
//! fixed question bank, and the hard cap is checked before any remote call,
//! so every interview starts, progresses, and terminates within five rounds.

pub mod fallback;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{InterviewContext, MAX_QUESTIONS, QuestionRecord, Transcript};
use crate::llm::{ChatRequest, LlmClient, temperature};
use crate::parser::{self, ParseFailure};
use crate::prompts::{PromptBuilder, PromptPair};

/// Result of asking for the next question
#[derive(Debug, Clone)]
pub enum InterviewStep {
    /// Ask the user this question, then record the answer and call again
    Question(QuestionRecord),
    /// The interview is over; synthesize the plan
    Complete,
}

impl InterviewStep {
    pub fn is_complete(&self) -> bool {
        matches!(self, InterviewStep::Complete)
    }
}

/// Drives the bounded question sequence
pub struct QuestionOrchestrator {
    llm: Arc<dyn LlmClient>,
    prompts: PromptBuilder,
}

impl QuestionOrchestrator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            prompts: PromptBuilder::new(),
        }
    }

    /// Produce the next interview question, or `Complete` when done
    ///
    /// With `n` answered questions: `n >= 5` terminates before any remote
    /// call; `n == 0` asks the opening question (default question on any
    /// failure - the interview never fails to start); otherwise the next
    /// question is generated from the full history, with the fixed bank as
    /// fallback for position `n + 1`.
    pub async fn next_question(&self, ctx: &InterviewContext, transcript: &Transcript) -> InterviewStep {
        let answered = transcript.len();
        debug!(answered, locale = %ctx.locale, "next_question: called");

        if answered >= MAX_QUESTIONS {
            debug!(answered, "next_question: cap reached, interview complete");
            return InterviewStep::Complete;
        }

        let position = answered + 1;
        let (pair, context_label) = if answered == 0 {
            (self.prompts.first_question(ctx), "first_question")
        } else {
            (self.prompts.next_question(ctx, transcript, position), "next_question")
        };

        match self.generate_question(pair, context_label, position, &ctx.locale).await {
            Ok(question) => InterviewStep::Question(question),
            Err(reason) => {
                warn!(position, %reason, "next_question: generation failed, using fallback");
                if position == 1 {
                    InterviewStep::Question(fallback::default_first_question(&ctx.locale))
                } else {
                    match fallback::bank_question(position, &ctx.locale) {
                        Some(question) => InterviewStep::Question(question),
                        // No pre-written question for this position: end the
                        // interview instead of stalling on a broken model.
                        None => InterviewStep::Complete,
                    }
                }
            }
        }
    }

    /// One generation attempt: remote call, JSON extraction, validation
    async fn generate_question(
        &self,
        pair: PromptPair,
        context_label: &'static str,
        position: usize,
        locale: &str,
    ) -> Result<QuestionRecord, GenerationFailure> {
        let request = ChatRequest::new(context_label, pair.system, pair.user, 512, temperature::QUESTION);
        let raw = self.llm.complete(request).await?;
        let value = parser::extract_json(&raw).inspect_err(|e| {
            warn!(position, error = %e, raw = %raw, "generate_question: unparseable response");
        })?;
        Ok(parser::validate_question(&value, fallback::default_category(position, locale))?)
    }
}

/// Why one generation attempt produced no usable question
#[derive(Debug, thiserror::Error)]
enum GenerationFailure {
    #[error("gateway: {0}")]
    Gateway(#[from] crate::llm::LlmError),
    #[error("parse: {0}")]
    Parse(#[from] ParseFailure),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::{MockLlmClient, MockReply};

    fn ctx() -> InterviewContext {
        InterviewContext::new("coffee subscription box", "en")
    }

    fn answered(count: usize) -> Transcript {
        let mut transcript = Transcript::new();
        for i in 0..count {
            transcript.record(fallback::default_first_question("en"), format!("answer {}", i + 1));
        }
        transcript
    }

    fn orchestrator(replies: Vec<MockReply>) -> QuestionOrchestrator {
        QuestionOrchestrator::new(Arc::new(MockLlmClient::new(replies)))
    }

    #[tokio::test]
    async fn test_first_question_from_valid_response() {
        let orchestrator = orchestrator(vec![MockReply::text(
            r#"{"question": "What problem does the box solve?", "type": "text", "keywords": ["problem"], "category": "strategy"}"#,
        )]);

        let step = orchestrator.next_question(&ctx(), &Transcript::new()).await;
        match step {
            InterviewStep::Question(q) => {
                assert_eq!(q.text, "What problem does the box solve?");
                assert_eq!(q.keywords, vec!["problem"]);
            }
            InterviewStep::Complete => panic!("expected a question"),
        }
    }

    #[tokio::test]
    async fn test_first_question_malformed_falls_back_to_default() {
        let orchestrator = orchestrator(vec![MockReply::text("I'd love to help! Let me think about that...")]);

        let step = orchestrator.next_question(&ctx(), &Transcript::new()).await;
        match step {
            InterviewStep::Question(q) => assert_eq!(q.text, "What is the main goal of this project?"),
            InterviewStep::Complete => panic!("the interview must never fail to start"),
        }
    }

    #[tokio::test]
    async fn test_first_question_gateway_error_falls_back_to_default() {
        let orchestrator = orchestrator(vec![MockReply::Timeout]);

        let step = orchestrator.next_question(&ctx(), &Transcript::new()).await;
        match step {
            InterviewStep::Question(q) => assert_eq!(q.text, "What is the main goal of this project?"),
            InterviewStep::Complete => panic!("the interview must never fail to start"),
        }
    }

    #[tokio::test]
    async fn test_cap_checked_before_any_remote_call() {
        let client = Arc::new(MockLlmClient::new(vec![]));
        let orchestrator = QuestionOrchestrator::new(client.clone());

        let step = orchestrator.next_question(&ctx(), &answered(5)).await;
        assert!(step.is_complete());
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mid_interview_failure_uses_bank_for_position() {
        let orchestrator = orchestrator(vec![MockReply::Server]);

        let step = orchestrator.next_question(&ctx(), &answered(2)).await;
        match step {
            InterviewStep::Question(q) => {
                // Position 3 in the bank is the competition question
                assert_eq!(q.category, crate::domain::QuestionCategory::Competition);
            }
            InterviewStep::Complete => panic!("bank entry exists for position 3"),
        }
    }

    #[tokio::test]
    async fn test_spanish_fallbacks() {
        let orchestrator = orchestrator(vec![MockReply::Server]);
        let ctx = InterviewContext::new("caja de suscripción de café", "es");

        let step = orchestrator.next_question(&ctx, &Transcript::new()).await;
        match step {
            InterviewStep::Question(q) => {
                assert_eq!(q.text, "¿Cuál es el objetivo principal de este proyecto?");
            }
            InterviewStep::Complete => panic!("expected a question"),
        }
    }

    #[tokio::test]
    async fn test_full_interview_terminates_in_five_rounds() {
        // Every generation fails; the bank must still carry the interview to
        // exactly five questions.
        let orchestrator = orchestrator(vec![
            MockReply::Server,
            MockReply::Timeout,
            MockReply::text("not json"),
            MockReply::Server,
            MockReply::text("{\"type\": \"text\"}"),
        ]);

        let ctx = ctx();
        let mut transcript = Transcript::new();
        let mut rounds = 0;
        loop {
            match orchestrator.next_question(&ctx, &transcript).await {
                InterviewStep::Question(q) => {
                    rounds += 1;
                    assert!(rounds <= 5, "question count must never exceed 5");
                    transcript.record(q, "an answer");
                }
                InterviewStep::Complete => break,
            }
        }
        assert_eq!(rounds, 5);
        assert_eq!(transcript.len(), 5);
    }
}
