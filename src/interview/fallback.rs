//! Fixed fallback question bank
//!
//! Pure functions of (position, locale) - no network, no state. Whenever
//! remote generation or parsing fails, the orchestrator pulls the question
//! for the current position from here, so the interview always starts and
//! always terminates.

use crate::domain::{AnswerKind, QuestionCategory, QuestionRecord};

fn is_spanish(locale: &str) -> bool {
    locale.split(['-', '_']).next() == Some("es")
}

/// The fixed default first question, used when first-question generation
/// fails for any reason
pub fn default_first_question(locale: &str) -> QuestionRecord {
    let (text, keywords) = if is_spanish(locale) {
        (
            "¿Cuál es el objetivo principal de este proyecto?",
            vec!["objetivo", "meta", "propósito"],
        )
    } else {
        (
            "What is the main goal of this project?",
            vec!["goal", "objective", "purpose"],
        )
    };

    QuestionRecord {
        text: text.to_string(),
        kind: AnswerKind::Text,
        keywords: keywords.into_iter().map(str::to_string).collect(),
        category: QuestionCategory::Strategy,
    }
}

/// Pre-written question for positions 2-5
///
/// Returns None outside that range; the orchestrator treats a missing entry
/// as an early-termination signal rather than stalling.
pub fn bank_question(position: usize, locale: &str) -> Option<QuestionRecord> {
    let es = is_spanish(locale);
    let (text, kind, keywords, category): (&str, AnswerKind, &[&str], QuestionCategory) = match (position, es) {
        (2, false) => (
            "Who is your target customer, and how will you reach them?",
            AnswerKind::Text,
            &["customer", "audience", "channels"],
            QuestionCategory::Marketing,
        ),
        (2, true) => (
            "¿Quién es su cliente objetivo y cómo llegará a él?",
            AnswerKind::Text,
            &["cliente", "audiencia", "canales"],
            QuestionCategory::Marketing,
        ),
        (3, false) => (
            "Who are your main competitors, and what sets you apart from them?",
            AnswerKind::Text,
            &["competitors", "differentiation"],
            QuestionCategory::Competition,
        ),
        (3, true) => (
            "¿Quiénes son sus principales competidores y qué lo diferencia de ellos?",
            AnswerKind::Text,
            &["competidores", "diferenciación"],
            QuestionCategory::Competition,
        ),
        (4, false) => (
            "What does day-to-day operation look like: staff, suppliers, and key processes?",
            AnswerKind::Text,
            &["staff", "suppliers", "processes"],
            QuestionCategory::Operations,
        ),
        (4, true) => (
            "¿Cómo es la operación diaria: personal, proveedores y procesos clave?",
            AnswerKind::Text,
            &["personal", "proveedores", "procesos"],
            QuestionCategory::Operations,
        ),
        (5, false) => (
            "How much initial funding do you need to launch, as a single number in your local currency?",
            AnswerKind::Number,
            &["funding", "budget", "costs"],
            QuestionCategory::Finance,
        ),
        (5, true) => (
            "¿Cuánto financiamiento inicial necesita para lanzar, como un solo número en su moneda local?",
            AnswerKind::Number,
            &["financiamiento", "presupuesto", "costos"],
            QuestionCategory::Finance,
        ),
        _ => return None,
    };

    Some(QuestionRecord {
        text: text.to_string(),
        kind,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        category,
    })
}

/// Category a generated question defaults to when the model omits one
///
/// Aligned with the bank so generated and fallback questions stay on the
/// same topic per round.
pub fn default_category(position: usize, locale: &str) -> QuestionCategory {
    bank_question(position, locale)
        .map(|q| q.category)
        .unwrap_or(QuestionCategory::Strategy)
}
