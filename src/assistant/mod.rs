//! AnswerAssistant - drafts and polishes single interview answers
//!
//! Independent of the interview state machine; shares the prompt builder,
//! gateway, and text-cleaning rules. Both operations are total: `suggest`
//! degrades to a typed-aware default and `improve` returns the user's
//! original answer untouched, so a failed call can never destroy content.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{AnswerKind, InterviewContext, Transcript};
use crate::llm::{ChatRequest, LlmClient, temperature};
use crate::parser;
use crate::prompts::{PromptBuilder, embedded};

pub struct AnswerAssistant {
    llm: Arc<dyn LlmClient>,
    prompts: PromptBuilder,
}

impl AnswerAssistant {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            prompts: PromptBuilder::new(),
        }
    }

    /// Draft a candidate answer for one question
    ///
    /// On any failure returns `"0"` for numeric questions and a
    /// locale-specific generic sentence otherwise.
    pub async fn suggest(
        &self,
        question: &str,
        kind: AnswerKind,
        ctx: &InterviewContext,
        transcript: &Transcript,
    ) -> String {
        debug!(locale = %ctx.locale, ?kind, "suggest: called");
        let pair = self.prompts.suggest_answer(question, ctx, transcript);
        let request = ChatRequest::new("suggest_answer", pair.system, pair.user, 256, temperature::ASSISTANT);

        match self.llm.complete(request).await {
            Ok(raw) => {
                let cleaned = parser::clean_text(&raw);
                if cleaned.is_empty() {
                    self.default_answer(kind, &ctx.locale)
                } else {
                    cleaned
                }
            }
            Err(e) => {
                warn!(error = %e, "suggest: gateway failed, using default answer");
                self.default_answer(kind, &ctx.locale)
            }
        }
    }

    /// Improve the user's existing answer
    ///
    /// On any failure returns the original answer unchanged.
    pub async fn improve(&self, question: &str, answer: &str, ctx: &InterviewContext) -> String {
        debug!(locale = %ctx.locale, "improve: called");
        let pair = self.prompts.improve_answer(question, answer, ctx);
        let request = ChatRequest::new("improve_answer", pair.system, pair.user, 512, temperature::ASSISTANT);

        match self.llm.complete(request).await {
            Ok(raw) => {
                let cleaned = parser::clean_text(&raw);
                if cleaned.is_empty() {
                    answer.to_string()
                } else {
                    cleaned
                }
            }
            Err(e) => {
                warn!(error = %e, "improve: gateway failed, keeping original answer");
                answer.to_string()
            }
        }
    }

    fn default_answer(&self, kind: AnswerKind, locale: &str) -> String {
        match kind {
            AnswerKind::Number => "0".to_string(),
            AnswerKind::Text => embedded::table_for(locale).generic_answer.to_string(),
        }
    }
}
