//! PlanSynthesizer - turns a completed transcript into the plan document
//!
//! Four independent steps: structured section synthesis, text-recovery of
//! sections when the structured parse fails, title generation, and
//! suggestion generation. A failure in any step degrades to a deterministic
//! fallback instead of propagating - the returned document always has six
//! populated sections, a sanitized non-empty title, and at least one
//! suggestion.

pub mod fallback;

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{InterviewContext, PlanDocument, PlanSections, Priority, SectionKey, Suggestion, SuggestionType, Transcript};
use crate::llm::{ChatRequest, LlmClient, temperature};
use crate::parser;
use crate::prompts::{PromptBuilder, embedded};

/// Titles longer than this fall back to the deterministic title
const MAX_TITLE_CHARS: usize = 100;

/// Target number of suggestions per synthesis
const SUGGESTION_TARGET: usize = 5;

/// Synthesizes the final plan from the interview transcript
pub struct PlanSynthesizer {
    llm: Arc<dyn LlmClient>,
    prompts: PromptBuilder,
}

impl PlanSynthesizer {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            prompts: PromptBuilder::new(),
        }
    }

    /// Produce the complete plan document
    ///
    /// Steps are independent: a failed title call does not affect sections,
    /// and vice versa.
    pub async fn synthesize(&self, ctx: &InterviewContext, transcript: &Transcript) -> PlanDocument {
        debug!(locale = %ctx.locale, answered = transcript.len(), "synthesize: called");

        let sections = self.sections(ctx, transcript).await;
        let title = self.title(ctx).await;
        let suggestions = self.suggestions(ctx, transcript).await;

        PlanDocument {
            title,
            sections,
            suggestions,
        }
    }

    /// Step 1 + 2: structured section synthesis with text recovery
    async fn sections(&self, ctx: &InterviewContext, transcript: &Transcript) -> PlanSections {
        let pair = self.prompts.plan_sections(ctx, transcript);
        let request = ChatRequest::new("plan_sections", pair.system, pair.user, 2048, temperature::SECTIONS);

        let raw = match self.llm.complete(request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "sections: gateway failed, all sections pending");
                return PlanSections::from_fn(|key| fallback::section_placeholder(key, &ctx.locale));
            }
        };

        match parser::extract_json(&raw) {
            Ok(value) => sections_from_value(&value, &ctx.locale),
            Err(e) => {
                warn!(error = %e, "sections: structured parse failed, recovering from text");
                sections_from_text(&raw, &ctx.locale)
            }
        }
    }

    /// Step 3: short title, sanitized, deterministic fallback
    async fn title(&self, ctx: &InterviewContext) -> String {
        let pair = self.prompts.plan_title(ctx);
        let request = ChatRequest::new("plan_title", pair.system, pair.user, 64, temperature::TITLE);

        let candidate = match self.llm.complete(request).await {
            Ok(raw) => parser::clean_text(&raw),
            Err(e) => {
                warn!(error = %e, "title: gateway failed, using fallback title");
                String::new()
            }
        };

        if title_is_usable(&candidate) {
            candidate
        } else {
            fallback::fallback_title(ctx.project.name.as_deref(), &ctx.locale)
        }
    }

    /// Step 4: ranked suggestions, fixed fallback list
    async fn suggestions(&self, ctx: &InterviewContext, transcript: &Transcript) -> Vec<Suggestion> {
        let pair = self.prompts.suggestions(ctx, transcript);
        let request = ChatRequest::new("plan_suggestions", pair.system, pair.user, 1024, temperature::SUGGESTIONS);

        let parsed = match self.llm.complete(request).await {
            Ok(raw) => match parser::extract_json(&raw) {
                Ok(value) => suggestions_from_value(&value),
                Err(e) => {
                    warn!(error = %e, raw = %raw, "suggestions: unparseable response");
                    vec![]
                }
            },
            Err(e) => {
                warn!(error = %e, "suggestions: gateway failed");
                vec![]
            }
        };

        if parsed.is_empty() {
            fallback::fallback_suggestions(&ctx.locale)
        } else {
            parsed
        }
    }
}

/// Whether a sanitized title can be shown as-is
fn title_is_usable(title: &str) -> bool {
    !title.is_empty() && title.chars().count() <= MAX_TITLE_CHARS && !title.contains(['{', '}'])
}

/// Pull the six sections out of a decoded JSON object
///
/// Missing or empty keys get the locale placeholder; partial success is
/// acceptable, total failure never reaches the caller.
fn sections_from_value(value: &Value, locale: &str) -> PlanSections {
    PlanSections::from_fn(|key| {
        value
            .get(key.as_str())
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback::section_placeholder(key, locale))
    })
}

/// Recover sections from non-JSON text by heading boundaries
///
/// Locates each known section heading (locale name or raw key) and captures
/// text until the next known heading or end of text.
fn sections_from_text(raw: &str, locale: &str) -> PlanSections {
    let table = embedded::table_for(locale);
    let lower = raw.to_lowercase();

    // Start offset of every heading that actually occurs
    let mut marks: Vec<(usize, SectionKey, usize)> = Vec::new();
    for key in SectionKey::ALL {
        for heading in [table.section_heading(key).to_lowercase(), key.as_str().to_string()] {
            if let Some(at) = lower.find(&heading) {
                marks.push((at, key, heading.len()));
                break;
            }
        }
    }
    marks.sort_by_key(|(at, _, _)| *at);

    let mut sections = PlanSections::from_fn(|key| fallback::section_placeholder(key, locale));
    for (idx, (at, key, heading_len)) in marks.iter().enumerate() {
        let body_start = at + heading_len;
        let body_end = marks.get(idx + 1).map(|(next, _, _)| *next).unwrap_or(raw.len());
        // Offsets come from the lowercased copy; guard the slice in case
        // lowercasing changed byte lengths somewhere in the text.
        let body = raw
            .get(body_start..body_end)
            .unwrap_or("")
            .trim_matches(|c: char| c.is_whitespace() || c == ':' || c == '#' || c == '*' || c == '-')
            .trim();
        if !body.is_empty() {
            sections.set(*key, body);
        }
    }
    sections
}

/// Decode a suggestions array, skipping malformed entries
fn suggestions_from_value(value: &Value) -> Vec<Suggestion> {
    let Some(items) = value.as_array() else {
        return vec![];
    };

    items
        .iter()
        .filter_map(|item| {
            let content = item.get("content").and_then(Value::as_str).map(str::trim)?;
            if content.is_empty() {
                return None;
            }
            let kind = item
                .get("type")
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<SuggestionType>().ok())
                .unwrap_or_default();
            let priority = item
                .get("priority")
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<Priority>().ok())
                .unwrap_or_default();
            Some(Suggestion {
                kind,
                content: content.to_string(),
                priority,
            })
        })
        .take(SUGGESTION_TARGET)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::{MockLlmClient, MockReply};

    fn ctx() -> InterviewContext {
        let mut ctx = InterviewContext::new("coffee subscription box", "en");
        ctx.project.name = Some("Beanpost".to_string());
        ctx
    }

    fn synthesizer(replies: Vec<MockReply>) -> PlanSynthesizer {
        PlanSynthesizer::new(Arc::new(MockLlmClient::new(replies)))
    }

    fn full_sections_json() -> String {
        serde_json::json!({
            "executive_summary": "A monthly coffee box.",
            "market_analysis": "Growing subscription market.",
            "swot_analysis": "Strong brand, small team.",
            "marketing_strategy": "Social first.",
            "financial_plan": "Break even in year one.",
            "operational_plan": "Roast, pack, ship."
        })
        .to_string()
    }

    #[test]
    fn test_title_is_usable() {
        assert!(title_is_usable("Beanpost Monthly"));
        assert!(!title_is_usable(""));
        assert!(!title_is_usable(&"x".repeat(101)));
        assert!(!title_is_usable("{\"title\": \"oops\"}"));
    }

    #[test]
    fn test_sections_from_value_partial() {
        let value = serde_json::json!({
            "executive_summary": "Summary here.",
            "market_analysis": "   ",
            "swot_analysis": 42
        });
        let sections = sections_from_value(&value, "en");
        assert_eq!(sections.executive_summary, "Summary here.");
        // Empty, wrong-typed, and missing keys all get placeholders
        assert!(sections.market_analysis.contains("could not be generated"));
        assert!(sections.swot_analysis.contains("could not be generated"));
        assert!(sections.financial_plan.contains("could not be generated"));
    }

    #[test]
    fn test_sections_from_text_heading_recovery() {
        let raw = "\
## Executive Summary\nA monthly coffee box for enthusiasts.\n\n\
## Market Analysis\nThe market is growing.\n\n\
## Operational Plan\nRoast, pack, ship.";
        let sections = sections_from_text(raw, "en");
        assert_eq!(sections.executive_summary, "A monthly coffee box for enthusiasts.");
        assert_eq!(sections.market_analysis, "The market is growing.");
        assert_eq!(sections.operational_plan, "Roast, pack, ship.");
        // Sections with no heading in the text stay pending
        assert!(sections.swot_analysis.contains("could not be generated"));
    }

    #[test]
    fn test_suggestions_from_value_skips_malformed() {
        let value = serde_json::json!([
            {"type": "marketing", "content": "Run ads", "priority": "high"},
            {"type": "nonsense-type", "content": "Still kept", "priority": "nope"},
            {"type": "financial", "priority": "low"},
            {"content": "   "}
        ]);
        let suggestions = suggestions_from_value(&value);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].kind, SuggestionType::Marketing);
        assert_eq!(suggestions[0].priority, Priority::High);
        // Unknown enum values fall back to defaults, entry is kept
        assert_eq!(suggestions[1].kind, SuggestionType::Other);
        assert_eq!(suggestions[1].priority, Priority::Medium);
    }

    #[test]
    fn test_suggestions_from_value_caps_at_target() {
        let items: Vec<_> = (0..8)
            .map(|i| serde_json::json!({"type": "other", "content": format!("s{}", i), "priority": "low"}))
            .collect();
        let suggestions = suggestions_from_value(&Value::Array(items));
        assert_eq!(suggestions.len(), 5);
    }

    #[tokio::test]
    async fn test_synthesize_happy_path() {
        let synthesizer = synthesizer(vec![
            MockReply::text(full_sections_json()),
            MockReply::text("\"Beanpost Monthly\""),
            MockReply::text(
                serde_json::json!([
                    {"type": "business", "content": "a", "priority": "high"},
                    {"type": "marketing", "content": "b", "priority": "high"},
                    {"type": "financial", "content": "c", "priority": "medium"},
                    {"type": "operational", "content": "d", "priority": "medium"},
                    {"type": "other", "content": "e", "priority": "low"}
                ])
                .to_string(),
            ),
        ]);

        let plan = synthesizer.synthesize(&ctx(), &Transcript::new()).await;
        assert_eq!(plan.title, "Beanpost Monthly");
        assert_eq!(plan.sections.executive_summary, "A monthly coffee box.");
        assert_eq!(plan.suggestions.len(), 5);
    }

    #[tokio::test]
    async fn test_synthesize_total_failure_still_complete() {
        // Every remote call fails; the document must still be fully formed.
        let synthesizer = synthesizer(vec![MockReply::Server, MockReply::Timeout, MockReply::Server]);

        let plan = synthesizer.synthesize(&ctx(), &Transcript::new()).await;
        for key in SectionKey::ALL {
            assert!(!plan.sections.get(key).is_empty());
        }
        assert_eq!(plan.title, "Business Plan: Beanpost");
        assert_eq!(plan.suggestions.len(), 5);
    }

    #[tokio::test]
    async fn test_synthesize_steps_independent() {
        // Sections succeed, title fails, suggestions fail
        let synthesizer = synthesizer(vec![
            MockReply::text(full_sections_json()),
            MockReply::Timeout,
            MockReply::text("no array here"),
        ]);

        let plan = synthesizer.synthesize(&ctx(), &Transcript::new()).await;
        assert_eq!(plan.sections.operational_plan, "Roast, pack, ship.");
        assert_eq!(plan.title, "Business Plan: Beanpost");
        assert_eq!(plan.suggestions.len(), 5);
    }

    #[tokio::test]
    async fn test_title_too_long_or_braced_falls_back() {
        let long_title = "A ".repeat(80);
        let synthesizer = synthesizer(vec![
            MockReply::Server,
            MockReply::text(long_title),
            MockReply::Server,
        ]);
        let plan = synthesizer.synthesize(&ctx(), &Transcript::new()).await;
        assert_eq!(plan.title, "Business Plan: Beanpost");
    }
}
