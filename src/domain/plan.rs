//! Synthesized plan types

use serde::{Deserialize, Serialize};

/// The six required plan sections, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    ExecutiveSummary,
    MarketAnalysis,
    SwotAnalysis,
    MarketingStrategy,
    FinancialPlan,
    OperationalPlan,
}

impl SectionKey {
    /// All six keys in presentation order
    pub const ALL: [SectionKey; 6] = [
        SectionKey::ExecutiveSummary,
        SectionKey::MarketAnalysis,
        SectionKey::SwotAnalysis,
        SectionKey::MarketingStrategy,
        SectionKey::FinancialPlan,
        SectionKey::OperationalPlan,
    ];

    /// The JSON object key the model is asked to produce
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "executive_summary",
            Self::MarketAnalysis => "market_analysis",
            Self::SwotAnalysis => "swot_analysis",
            Self::MarketingStrategy => "marketing_strategy",
            Self::FinancialPlan => "financial_plan",
            Self::OperationalPlan => "operational_plan",
        }
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed mapping of all six plan sections, always fully populated
///
/// A section that could not be synthesized holds a deterministic
/// locale-specific placeholder, never an empty string and never a missing
/// key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSections {
    pub executive_summary: String,
    pub market_analysis: String,
    pub swot_analysis: String,
    pub marketing_strategy: String,
    pub financial_plan: String,
    pub operational_plan: String,
}

impl PlanSections {
    pub fn get(&self, key: SectionKey) -> &str {
        match key {
            SectionKey::ExecutiveSummary => &self.executive_summary,
            SectionKey::MarketAnalysis => &self.market_analysis,
            SectionKey::SwotAnalysis => &self.swot_analysis,
            SectionKey::MarketingStrategy => &self.marketing_strategy,
            SectionKey::FinancialPlan => &self.financial_plan,
            SectionKey::OperationalPlan => &self.operational_plan,
        }
    }

    pub fn set(&mut self, key: SectionKey, content: impl Into<String>) {
        let slot = match key {
            SectionKey::ExecutiveSummary => &mut self.executive_summary,
            SectionKey::MarketAnalysis => &mut self.market_analysis,
            SectionKey::SwotAnalysis => &mut self.swot_analysis,
            SectionKey::MarketingStrategy => &mut self.marketing_strategy,
            SectionKey::FinancialPlan => &mut self.financial_plan,
            SectionKey::OperationalPlan => &mut self.operational_plan,
        };
        *slot = content.into();
    }

    /// Build from a per-key lookup, applying the closure to all six keys
    pub fn from_fn(mut fill: impl FnMut(SectionKey) -> String) -> Self {
        Self {
            executive_summary: fill(SectionKey::ExecutiveSummary),
            market_analysis: fill(SectionKey::MarketAnalysis),
            swot_analysis: fill(SectionKey::SwotAnalysis),
            marketing_strategy: fill(SectionKey::MarketingStrategy),
            financial_plan: fill(SectionKey::FinancialPlan),
            operational_plan: fill(SectionKey::OperationalPlan),
        }
    }
}

/// Improvement suggestion type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Business,
    Marketing,
    Financial,
    Operational,
    #[default]
    Other,
}

impl std::str::FromStr for SuggestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "business" => Ok(Self::Business),
            "marketing" => Ok(Self::Marketing),
            "financial" => Ok(Self::Financial),
            "operational" => Ok(Self::Operational),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown suggestion type: {}", s)),
        }
    }
}

/// Suggestion priority rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// One ranked improvement suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub content: String,
    pub priority: Priority,
}

/// Assembled synthesis result: always six populated sections, a non-empty
/// sanitized title, and at least one suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDocument {
    pub title: String,
    pub sections: PlanSections,
    pub suggestions: Vec<Suggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_keys_in_order() {
        let keys: Vec<_> = SectionKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "executive_summary",
                "market_analysis",
                "swot_analysis",
                "marketing_strategy",
                "financial_plan",
                "operational_plan"
            ]
        );
    }

    #[test]
    fn test_sections_get_set() {
        let mut sections = PlanSections::from_fn(|k| format!("[{}]", k.as_str()));
        assert_eq!(sections.get(SectionKey::SwotAnalysis), "[swot_analysis]");

        sections.set(SectionKey::SwotAnalysis, "strengths and weaknesses");
        assert_eq!(sections.get(SectionKey::SwotAnalysis), "strengths and weaknesses");
        // Other keys untouched
        assert_eq!(sections.get(SectionKey::FinancialPlan), "[financial_plan]");
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }

    #[test]
    fn test_suggestion_serde_uses_type_key() {
        let suggestion = Suggestion {
            kind: SuggestionType::Marketing,
            content: "Run a launch campaign".to_string(),
            priority: Priority::High,
        };
        let json = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(json["type"], "marketing");
        assert_eq!(json["priority"], "high");
    }
}
