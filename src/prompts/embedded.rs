//! Embedded per-locale prompt templates and fixed strings
//!
//! Templates are compiled into the binary, keyed by locale. English is the
//! fallback locale: an unknown tag silently gets the English table. Variables
//! use handlebars triple-brace tokens so content is substituted verbatim.

use crate::domain::SectionKey;

/// All templates and fixed strings for one locale
pub struct LocaleTable {
    pub not_specified: &'static str,

    /// Section headings in `SectionKey::ALL` order
    section_headings: [&'static str; 6],

    /// "content pending" placeholder template; `{section}` is replaced with
    /// the section heading
    section_pending: &'static str,

    pub first_question_system: &'static str,
    pub first_question_user: &'static str,
    pub next_question_system: &'static str,
    pub next_question_user: &'static str,

    pub sections_system: &'static str,
    pub sections_user: &'static str,
    pub title_system: &'static str,
    pub title_user: &'static str,
    pub suggestions_system: &'static str,
    pub suggestions_user: &'static str,

    pub suggest_answer_system: &'static str,
    pub suggest_answer_user: &'static str,
    pub improve_answer_system: &'static str,
    pub improve_answer_user: &'static str,

    /// Line prefixes for the previous-Q&A block
    pub question_prefix: &'static str,
    pub answer_prefix: &'static str,

    /// Stand-in for the previous-Q&A block when nothing has been answered
    pub no_history: &'static str,

    /// Generic fallback sentence for a failed text-answer suggestion
    pub generic_answer: &'static str,

    /// Label used by the fallback title when the project has no name
    pub untitled_business: &'static str,

    /// Prefix for the deterministic fallback title
    pub title_prefix: &'static str,
}

impl LocaleTable {
    /// Human-readable heading for a section, used both in prompts and for
    /// recovering sections from non-JSON responses
    pub fn section_heading(&self, key: SectionKey) -> &'static str {
        let idx = SectionKey::ALL.iter().position(|k| *k == key).unwrap_or(0);
        self.section_headings[idx]
    }

    /// Deterministic "content pending" placeholder for one section
    pub fn section_placeholder(&self, key: SectionKey) -> String {
        self.section_pending.replace("{section}", self.section_heading(key))
    }
}

/// Look up the template table for a locale, falling back to English
pub fn table_for(locale: &str) -> &'static LocaleTable {
    match locale.split(['-', '_']).next().unwrap_or("") {
        "es" => &ES,
        _ => &EN,
    }
}

pub static EN: LocaleTable = LocaleTable {
    not_specified: "not specified",

    section_headings: [
        "Executive Summary",
        "Market Analysis",
        "SWOT Analysis",
        "Marketing Strategy",
        "Financial Plan",
        "Operational Plan",
    ],

    section_pending: "The {section} section could not be generated yet. \
Please regenerate the plan to fill it in.",

    first_question_system: "You are a business consultant interviewing an entrepreneur to gather the information \
needed for a business plan. Ask one sharp, concrete question at a time. \
Respond ONLY with a JSON object: {\"question\": string, \"type\": \"text\"|\"number\", \
\"keywords\": [string], \"category\": \"strategy\"|\"finance\"|\"operations\"|\"marketing\"|\"competition\"}.",

    first_question_user: "Business idea: {{{idea}}}\n\
Project name: {{{name}}}\n\
Description: {{{description}}}\n\
Industry: {{{industry}}}\n\
Business type: {{{business_type}}}\n\
Target audience: {{{target_audience}}}\n\
Location: {{{location}}}\n\
Revenue model: {{{revenue_model}}}\n\
Main product or service: {{{main_product}}}\n\n\
Ask the single most important first question to understand this business.",

    next_question_system: "You are a business consultant conducting a short interview about a business idea. \
You have the answers so far; ask the next most valuable question, avoiding anything already answered. \
Respond ONLY with a JSON object: {\"question\": string, \"type\": \"text\"|\"number\", \
\"keywords\": [string], \"category\": \"strategy\"|\"finance\"|\"operations\"|\"marketing\"|\"competition\"}.",

    next_question_user: "Business idea: {{{idea}}}\n\
Project name: {{{name}}}\n\
Industry: {{{industry}}}\n\
Target audience: {{{target_audience}}}\n\
Location: {{{location}}}\n\n\
Answers so far:\n{{{history}}}\n\
This is question {{{position}}} of {{{total}}}. Ask the next question.",

    sections_system: "You are a business-plan writer. Using the interview transcript, write the six sections of \
a business plan. Respond ONLY with a JSON object with exactly these keys, each a string of flowing prose \
(2-4 paragraphs): executive_summary, market_analysis, swot_analysis, marketing_strategy, financial_plan, \
operational_plan.",

    sections_user: "Business idea: {{{idea}}}\n\
Project name: {{{name}}}\n\
Industry: {{{industry}}}\n\
Business type: {{{business_type}}}\n\
Target audience: {{{target_audience}}}\n\
Location: {{{location}}}\n\
Revenue model: {{{revenue_model}}}\n\
Main product or service: {{{main_product}}}\n\n\
Interview transcript:\n{{{history}}}\n\
Write all six sections now.",

    title_system: "You generate short business-plan titles. Respond with the title only: plain text, \
under 10 words, no quotes, no markdown, no JSON.",

    title_user: "Business idea: {{{idea}}}\n\
Project name: {{{name}}}\n\n\
Give this business plan a short, memorable title.",

    suggestions_system: "You are a business advisor. Given an interview about a business idea, propose exactly 5 \
concrete improvement suggestions. Respond ONLY with a JSON array of 5 objects: \
{\"type\": \"business\"|\"marketing\"|\"financial\"|\"operational\"|\"other\", \"content\": string, \
\"priority\": \"high\"|\"medium\"|\"low\"}, ordered from highest to lowest priority.",

    suggestions_user: "Business idea: {{{idea}}}\n\
Project name: {{{name}}}\n\
Industry: {{{industry}}}\n\n\
Interview transcript:\n{{{history}}}\n\
Return the 5 suggestions now.",

    suggest_answer_system: "You are helping an entrepreneur answer an interview question about their business idea. \
Draft a plausible, specific answer in their voice. Respond with the answer text only - no quotes, no markdown, \
no JSON. If the question asks for a number, respond with just the number.",

    suggest_answer_user: "Business idea: {{{idea}}}\n\
Project name: {{{name}}}\n\n\
Answers so far:\n{{{history}}}\n\
Question: {{{question}}}\n\
Draft an answer.",

    improve_answer_system: "You are helping an entrepreneur polish an interview answer about their business idea. \
Keep their meaning and facts; improve clarity, specificity, and tone. Respond with the improved answer text \
only - no quotes, no markdown, no JSON.",

    improve_answer_user: "Business idea: {{{idea}}}\n\
Question: {{{question}}}\n\
Their answer: {{{answer}}}\n\
Improve the answer.",

    question_prefix: "Q:",
    answer_prefix: "A:",
    no_history: "(no answers yet)",

    generic_answer: "I have not decided yet; I plan to research this further.",
    untitled_business: "New Business",
    title_prefix: "Business Plan",
};

pub static ES: LocaleTable = LocaleTable {
    not_specified: "no especificado",

    section_headings: [
        "Resumen Ejecutivo",
        "Análisis de Mercado",
        "Análisis FODA",
        "Estrategia de Marketing",
        "Plan Financiero",
        "Plan Operativo",
    ],

    section_pending: "La sección {section} aún no pudo generarse. \
Vuelva a generar el plan para completarla.",

    first_question_system: "Eres un consultor de negocios entrevistando a un emprendedor para reunir la \
información necesaria para un plan de negocio. Haz una sola pregunta concreta a la vez. \
Responde SOLO con un objeto JSON: {\"question\": string, \"type\": \"text\"|\"number\", \
\"keywords\": [string], \"category\": \"strategy\"|\"finance\"|\"operations\"|\"marketing\"|\"competition\"}. \
La pregunta debe estar en español.",

    first_question_user: "Idea de negocio: {{{idea}}}\n\
Nombre del proyecto: {{{name}}}\n\
Descripción: {{{description}}}\n\
Industria: {{{industry}}}\n\
Tipo de negocio: {{{business_type}}}\n\
Público objetivo: {{{target_audience}}}\n\
Ubicación: {{{location}}}\n\
Modelo de ingresos: {{{revenue_model}}}\n\
Producto o servicio principal: {{{main_product}}}\n\n\
Haz la primera pregunta más importante para entender este negocio.",

    next_question_system: "Eres un consultor de negocios realizando una entrevista corta sobre una idea de \
negocio. Tienes las respuestas hasta ahora; haz la siguiente pregunta más valiosa, evitando lo ya respondido. \
Responde SOLO con un objeto JSON: {\"question\": string, \"type\": \"text\"|\"number\", \
\"keywords\": [string], \"category\": \"strategy\"|\"finance\"|\"operations\"|\"marketing\"|\"competition\"}. \
La pregunta debe estar en español.",

    next_question_user: "Idea de negocio: {{{idea}}}\n\
Nombre del proyecto: {{{name}}}\n\
Industria: {{{industry}}}\n\
Público objetivo: {{{target_audience}}}\n\
Ubicación: {{{location}}}\n\n\
Respuestas hasta ahora:\n{{{history}}}\n\
Esta es la pregunta {{{position}}} de {{{total}}}. Haz la siguiente pregunta.",

    sections_system: "Eres un redactor de planes de negocio. Usando la transcripción de la entrevista, escribe \
las seis secciones de un plan de negocio en español. Responde SOLO con un objeto JSON con exactamente estas \
claves, cada una un texto corrido (2-4 párrafos): executive_summary, market_analysis, swot_analysis, \
marketing_strategy, financial_plan, operational_plan.",

    sections_user: "Idea de negocio: {{{idea}}}\n\
Nombre del proyecto: {{{name}}}\n\
Industria: {{{industry}}}\n\
Tipo de negocio: {{{business_type}}}\n\
Público objetivo: {{{target_audience}}}\n\
Ubicación: {{{location}}}\n\
Modelo de ingresos: {{{revenue_model}}}\n\
Producto o servicio principal: {{{main_product}}}\n\n\
Transcripción de la entrevista:\n{{{history}}}\n\
Escribe las seis secciones ahora.",

    title_system: "Generas títulos cortos para planes de negocio. Responde solo con el título: texto plano, \
menos de 10 palabras, sin comillas, sin markdown, sin JSON, en español.",

    title_user: "Idea de negocio: {{{idea}}}\n\
Nombre del proyecto: {{{name}}}\n\n\
Dale a este plan de negocio un título corto y memorable.",

    suggestions_system: "Eres un asesor de negocios. Dada una entrevista sobre una idea de negocio, propone \
exactamente 5 sugerencias concretas de mejora en español. Responde SOLO con un array JSON de 5 objetos: \
{\"type\": \"business\"|\"marketing\"|\"financial\"|\"operational\"|\"other\", \"content\": string, \
\"priority\": \"high\"|\"medium\"|\"low\"}, ordenados de mayor a menor prioridad.",

    suggestions_user: "Idea de negocio: {{{idea}}}\n\
Nombre del proyecto: {{{name}}}\n\
Industria: {{{industry}}}\n\n\
Transcripción de la entrevista:\n{{{history}}}\n\
Devuelve las 5 sugerencias ahora.",

    suggest_answer_system: "Estás ayudando a un emprendedor a responder una pregunta de entrevista sobre su idea \
de negocio. Redacta una respuesta plausible y específica con su voz, en español. Responde solo con el texto de \
la respuesta - sin comillas, sin markdown, sin JSON. Si la pregunta pide un número, responde solo con el número.",

    suggest_answer_user: "Idea de negocio: {{{idea}}}\n\
Nombre del proyecto: {{{name}}}\n\n\
Respuestas hasta ahora:\n{{{history}}}\n\
Pregunta: {{{question}}}\n\
Redacta una respuesta.",

    improve_answer_system: "Estás ayudando a un emprendedor a pulir una respuesta de entrevista sobre su idea de \
negocio. Conserva su significado y sus datos; mejora la claridad, la especificidad y el tono. Responde solo con \
el texto mejorado - sin comillas, sin markdown, sin JSON.",

    improve_answer_user: "Idea de negocio: {{{idea}}}\n\
Pregunta: {{{question}}}\n\
Su respuesta: {{{answer}}}\n\
Mejora la respuesta.",

    question_prefix: "P:",
    answer_prefix: "R:",
    no_history: "(aún sin respuestas)",

    generic_answer: "Aún no lo he decidido; planeo investigarlo más a fondo.",
    untitled_business: "Nuevo Negocio",
    title_prefix: "Plan de Negocio",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_for_fallback() {
        assert!(std::ptr::eq(table_for("en"), &EN));
        assert!(std::ptr::eq(table_for("en-US"), &EN));
        assert!(std::ptr::eq(table_for("es"), &ES));
        assert!(std::ptr::eq(table_for("es_MX"), &ES));
        // Unknown locales never error, they fall back
        assert!(std::ptr::eq(table_for("fr"), &EN));
        assert!(std::ptr::eq(table_for(""), &EN));
    }

    #[test]
    fn test_section_headings_differ_by_locale() {
        assert_eq!(EN.section_heading(SectionKey::SwotAnalysis), "SWOT Analysis");
        assert_eq!(ES.section_heading(SectionKey::SwotAnalysis), "Análisis FODA");
    }

    #[test]
    fn test_section_placeholder_nonempty_for_all_keys() {
        for table in [&EN, &ES] {
            for key in SectionKey::ALL {
                assert!(!table.section_placeholder(key).is_empty());
            }
        }
    }
}
