//! PromptBuilder - renders locale-aware prompts from embedded templates
//!
//! Pure string rendering, no I/O. Every referenced template variable is
//! guaranteed a value before rendering: anything the caller did not supply is
//! replaced with the locale's "not specified" string, never left as a raw
//! placeholder token.

use handlebars::Handlebars;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::embedded::{self, LocaleTable};
use crate::domain::{InterviewContext, MAX_QUESTIONS, Transcript};

/// A rendered system/user prompt pair
#[derive(Debug, Clone)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Renders prompts from per-locale template tables
pub struct PromptBuilder {
    hbs: Handlebars<'static>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self { hbs: Handlebars::new() }
    }

    /// Render one template for a locale
    ///
    /// Variables the template references but `vars` does not supply are
    /// filled with the locale's "not specified" string. Unknown locales fall
    /// back to English. Never errors: a template that fails to render (which
    /// embedded templates do not) is returned verbatim.
    pub fn render(&self, template: &str, locale: &str, vars: &Map<String, Value>) -> String {
        let table = embedded::table_for(locale);
        let mut filled = vars.clone();
        for name in referenced_variables(template) {
            filled
                .entry(name)
                .or_insert_with(|| Value::String(table.not_specified.to_string()));
        }

        match self.hbs.render_template(template, &Value::Object(filled)) {
            Ok(rendered) => rendered,
            Err(e) => {
                warn!(error = %e, "render: template failed to render, using raw template");
                template.to_string()
            }
        }
    }

    /// First-question prompt, built from the context only
    pub fn first_question(&self, ctx: &InterviewContext) -> PromptPair {
        debug!(locale = %ctx.locale, "first_question: called");
        let table = embedded::table_for(&ctx.locale);
        let vars = context_vars(ctx);
        PromptPair {
            system: self.render(table.first_question_system, &ctx.locale, &vars),
            user: self.render(table.first_question_user, &ctx.locale, &vars),
        }
    }

    /// Next-question prompt: context, full history, and "n of 5" progress
    pub fn next_question(&self, ctx: &InterviewContext, transcript: &Transcript, position: usize) -> PromptPair {
        debug!(locale = %ctx.locale, position, "next_question: called");
        let table = embedded::table_for(&ctx.locale);
        let mut vars = context_vars(ctx);
        vars.insert("history".to_string(), Value::String(history_block(transcript, table)));
        vars.insert("position".to_string(), Value::String(position.to_string()));
        vars.insert("total".to_string(), Value::String(MAX_QUESTIONS.to_string()));
        PromptPair {
            system: self.render(table.next_question_system, &ctx.locale, &vars),
            user: self.render(table.next_question_user, &ctx.locale, &vars),
        }
    }

    /// All-six-sections synthesis prompt
    pub fn plan_sections(&self, ctx: &InterviewContext, transcript: &Transcript) -> PromptPair {
        debug!(locale = %ctx.locale, "plan_sections: called");
        let table = embedded::table_for(&ctx.locale);
        let mut vars = context_vars(ctx);
        vars.insert("history".to_string(), Value::String(history_block(transcript, table)));
        PromptPair {
            system: self.render(table.sections_system, &ctx.locale, &vars),
            user: self.render(table.sections_user, &ctx.locale, &vars),
        }
    }

    /// Short-title prompt
    pub fn plan_title(&self, ctx: &InterviewContext) -> PromptPair {
        debug!(locale = %ctx.locale, "plan_title: called");
        let table = embedded::table_for(&ctx.locale);
        let vars = context_vars(ctx);
        PromptPair {
            system: self.render(table.title_system, &ctx.locale, &vars),
            user: self.render(table.title_user, &ctx.locale, &vars),
        }
    }

    /// Ranked-suggestions prompt
    pub fn suggestions(&self, ctx: &InterviewContext, transcript: &Transcript) -> PromptPair {
        debug!(locale = %ctx.locale, "suggestions: called");
        let table = embedded::table_for(&ctx.locale);
        let mut vars = context_vars(ctx);
        vars.insert("history".to_string(), Value::String(history_block(transcript, table)));
        PromptPair {
            system: self.render(table.suggestions_system, &ctx.locale, &vars),
            user: self.render(table.suggestions_user, &ctx.locale, &vars),
        }
    }

    /// Prompt for drafting a candidate answer to one question
    pub fn suggest_answer(&self, question: &str, ctx: &InterviewContext, transcript: &Transcript) -> PromptPair {
        debug!(locale = %ctx.locale, "suggest_answer: called");
        let table = embedded::table_for(&ctx.locale);
        let mut vars = context_vars(ctx);
        vars.insert("history".to_string(), Value::String(history_block(transcript, table)));
        vars.insert("question".to_string(), Value::String(question.to_string()));
        PromptPair {
            system: self.render(table.suggest_answer_system, &ctx.locale, &vars),
            user: self.render(table.suggest_answer_user, &ctx.locale, &vars),
        }
    }

    /// Prompt for improving the user's existing answer
    pub fn improve_answer(&self, question: &str, answer: &str, ctx: &InterviewContext) -> PromptPair {
        debug!(locale = %ctx.locale, "improve_answer: called");
        let table = embedded::table_for(&ctx.locale);
        let mut vars = context_vars(ctx);
        vars.insert("question".to_string(), Value::String(question.to_string()));
        vars.insert("answer".to_string(), Value::String(answer.to_string()));
        PromptPair {
            system: self.render(table.improve_answer_system, &ctx.locale, &vars),
            user: self.render(table.improve_answer_user, &ctx.locale, &vars),
        }
    }
}

/// Build the variable map for an interview context
///
/// Absent attributes are simply omitted; `render` fills them with the
/// locale's "not specified" string.
fn context_vars(ctx: &InterviewContext) -> Map<String, Value> {
    let mut vars = Map::new();
    vars.insert("idea".to_string(), Value::String(ctx.idea.clone()));

    let attrs = [
        ("name", &ctx.project.name),
        ("description", &ctx.project.description),
        ("industry", &ctx.project.industry),
        ("business_type", &ctx.project.business_type),
        ("target_audience", &ctx.project.target_audience),
        ("location", &ctx.project.location),
        ("revenue_model", &ctx.project.revenue_model),
        ("main_product", &ctx.project.main_product),
    ];
    for (key, value) in attrs {
        if let Some(v) = value {
            vars.insert(key.to_string(), Value::String(v.clone()));
        }
    }
    vars
}

/// Render the previous-Q&A block in transcript order
///
/// One question line, one answer line, blank line between pairs. This block
/// is the only conversation history the model receives, so order matters.
fn history_block(transcript: &Transcript, table: &LocaleTable) -> String {
    if transcript.is_empty() {
        return table.no_history.to_string();
    }

    transcript
        .answers()
        .map(|a| {
            format!(
                "{} {}\n{} {}",
                table.question_prefix, a.question_text, table.answer_prefix, a.answer_text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Collect variable names a template references
///
/// Embedded templates only use simple `{{name}}` / `{{{name}}}` tokens, so a
/// linear scan is enough - no helpers, no blocks.
fn referenced_variables(template: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let after = after.strip_prefix('{').unwrap_or(after);
        match after.find("}}") {
            Some(end) => {
                let name = after[..end].trim_end_matches('}').trim();
                if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                    names.push(name.to_string());
                }
                rest = &after[end + 2..];
            }
            None => break,
        }
    }

    names
}
