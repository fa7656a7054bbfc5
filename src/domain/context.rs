//! Interview input bundle

use serde::{Deserialize, Serialize};

/// Immutable input bundle for one interview
///
/// Created once by the caller before the first question and read-only
/// thereafter. The locale tag selects prompt templates and default strings;
/// unknown tags fall back to English.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewContext {
    /// The business idea in the user's own words
    pub idea: String,

    /// Optional project attributes gathered before the interview
    #[serde(default)]
    pub project: ProjectAttributes,

    /// Locale tag ("en", "es", ...)
    pub locale: String,
}

impl InterviewContext {
    /// Create a context with just an idea and locale
    pub fn new(idea: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            idea: idea.into(),
            project: ProjectAttributes::default(),
            locale: locale.into(),
        }
    }
}

/// Optional attributes describing the project behind the idea
///
/// Every field is optional; missing values are rendered as a
/// locale-appropriate "not specified" string in prompts, never as a raw
/// placeholder token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectAttributes {
    pub name: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
    #[serde(rename = "business-type")]
    pub business_type: Option<String>,
    #[serde(rename = "target-audience")]
    pub target_audience: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "revenue-model")]
    pub revenue_model: Option<String>,
    #[serde(rename = "main-product")]
    pub main_product: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_new_defaults_project() {
        let ctx = InterviewContext::new("coffee subscription box", "en");
        assert_eq!(ctx.idea, "coffee subscription box");
        assert_eq!(ctx.locale, "en");
        assert!(ctx.project.name.is_none());
    }

    #[test]
    fn test_project_attributes_deserialize_partial() {
        let yaml = "name: Beanpost\nindustry: food";
        let attrs: ProjectAttributes = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(attrs.name.as_deref(), Some("Beanpost"));
        assert_eq!(attrs.industry.as_deref(), Some("food"));
        assert!(attrs.location.is_none());
    }
}
