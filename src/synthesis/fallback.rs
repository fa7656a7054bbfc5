//! Deterministic synthesis fallbacks
//!
//! Pure functions of (failure context, locale). These back the guarantee
//! that `synthesize` always returns six populated sections, a non-empty
//! title, and a non-empty suggestion list no matter how many remote calls
//! fail.

use crate::domain::{Priority, SectionKey, Suggestion, SuggestionType};
use crate::prompts::embedded;

/// Locale-specific "content pending" placeholder for one section
pub fn section_placeholder(key: SectionKey, locale: &str) -> String {
    embedded::table_for(locale).section_placeholder(key)
}

/// Deterministic title built from the project name
pub fn fallback_title(project_name: Option<&str>, locale: &str) -> String {
    let table = embedded::table_for(locale);
    let name = project_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(table.untitled_business);
    format!("{}: {}", table.title_prefix, name)
}

/// Fixed list of five generic suggestions, one per type, ranked
pub fn fallback_suggestions(locale: &str) -> Vec<Suggestion> {
    let es = locale.split(['-', '_']).next() == Some("es");

    let entries: [(&str, SuggestionType, Priority); 5] = if es {
        [
            (
                "Valide la idea con clientes reales antes de invertir a gran escala.",
                SuggestionType::Business,
                Priority::High,
            ),
            (
                "Defina un plan de marketing con canales y presupuesto concretos.",
                SuggestionType::Marketing,
                Priority::High,
            ),
            (
                "Prepare una proyección financiera para los primeros doce meses.",
                SuggestionType::Financial,
                Priority::Medium,
            ),
            (
                "Documente los procesos operativos clave y sus responsables.",
                SuggestionType::Operational,
                Priority::Medium,
            ),
            (
                "Revise el plan con un mentor o asesor externo.",
                SuggestionType::Other,
                Priority::Low,
            ),
        ]
    } else {
        [
            (
                "Validate the idea with real customers before investing at scale.",
                SuggestionType::Business,
                Priority::High,
            ),
            (
                "Define a marketing plan with concrete channels and budget.",
                SuggestionType::Marketing,
                Priority::High,
            ),
            (
                "Prepare a financial projection for the first twelve months.",
                SuggestionType::Financial,
                Priority::Medium,
            ),
            (
                "Document the key operational processes and who owns them.",
                SuggestionType::Operational,
                Priority::Medium,
            ),
            (
                "Review the plan with a mentor or outside advisor.",
                SuggestionType::Other,
                Priority::Low,
            ),
        ]
    };

    entries
        .into_iter()
        .map(|(content, kind, priority)| Suggestion {
            kind,
            content: content.to_string(),
            priority,
        })
        .collect()
}
