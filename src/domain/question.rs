//! Question, answer, and transcript types

use serde::{Deserialize, Serialize};

/// Hard cap on interview length, checked before any remote call
pub const MAX_QUESTIONS: usize = 5;

/// Kind of answer a question expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKind {
    #[default]
    Text,
    Number,
}

impl std::str::FromStr for AnswerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            _ => Err(format!("Unknown answer kind: {}", s)),
        }
    }
}

/// Topic bucket a question belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    #[default]
    Strategy,
    Finance,
    Operations,
    Marketing,
    Competition,
}

impl std::fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strategy => write!(f, "strategy"),
            Self::Finance => write!(f, "finance"),
            Self::Operations => write!(f, "operations"),
            Self::Marketing => write!(f, "marketing"),
            Self::Competition => write!(f, "competition"),
        }
    }
}

impl std::str::FromStr for QuestionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strategy" => Ok(Self::Strategy),
            "finance" => Ok(Self::Finance),
            "operations" => Ok(Self::Operations),
            "marketing" => Ok(Self::Marketing),
            "competition" => Ok(Self::Competition),
            _ => Err(format!("Unknown question category: {}", s)),
        }
    }
}

/// One interview question, immutable once emitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// The question shown to the user
    pub text: String,

    /// Expected answer kind
    #[serde(default)]
    pub kind: AnswerKind,

    /// Ordered keywords the caller may use for highlighting/tagging
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Topic bucket
    #[serde(default)]
    pub category: QuestionCategory,
}

/// The user's answer to one question
///
/// Carries the question text verbatim so a transcript entry is
/// self-describing when rendered back into later prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    #[serde(rename = "question-text")]
    pub question_text: String,
    #[serde(rename = "answer-text")]
    pub answer_text: String,
}

/// One completed question/answer round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub question: QuestionRecord,
    pub answer: AnswerRecord,
}

/// Ordered list of completed exchanges, owned by the caller
///
/// The engine only ever borrows a transcript; it never mutates one. Order is
/// load-bearing: it is the only conversation history the model ever sees,
/// since the engine is stateless across remote calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    exchanges: Vec<Exchange>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of answered questions so far
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Append one completed round
    pub fn record(&mut self, question: QuestionRecord, answer_text: impl Into<String>) {
        let answer = AnswerRecord {
            question_text: question.text.clone(),
            answer_text: answer_text.into(),
        };
        self.exchanges.push(Exchange { question, answer });
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    /// Answers in transcript order
    pub fn answers(&self) -> impl Iterator<Item = &AnswerRecord> {
        self.exchanges.iter().map(|e| &e.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str) -> QuestionRecord {
        QuestionRecord {
            text: text.to_string(),
            kind: AnswerKind::Text,
            keywords: vec![],
            category: QuestionCategory::Strategy,
        }
    }

    #[test]
    fn test_transcript_record_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.record(question("First?"), "one");
        transcript.record(question("Second?"), "two");

        assert_eq!(transcript.len(), 2);
        let answers: Vec<_> = transcript.answers().map(|a| a.answer_text.as_str()).collect();
        assert_eq!(answers, vec!["one", "two"]);
        assert_eq!(transcript.exchanges()[0].answer.question_text, "First?");
    }

    #[test]
    fn test_answer_kind_parse() {
        assert_eq!("number".parse::<AnswerKind>().unwrap(), AnswerKind::Number);
        assert_eq!("TEXT".parse::<AnswerKind>().unwrap(), AnswerKind::Text);
        assert!("integer".parse::<AnswerKind>().is_err());
    }

    #[test]
    fn test_category_roundtrip() {
        for cat in [
            QuestionCategory::Strategy,
            QuestionCategory::Finance,
            QuestionCategory::Operations,
            QuestionCategory::Marketing,
            QuestionCategory::Competition,
        ] {
            assert_eq!(cat.to_string().parse::<QuestionCategory>().unwrap(), cat);
        }
    }

    #[test]
    fn test_question_record_serde_defaults() {
        let record: QuestionRecord = serde_json::from_str(r#"{"text": "How big is the market?"}"#).unwrap();
        assert_eq!(record.kind, AnswerKind::Text);
        assert!(record.keywords.is_empty());
        assert_eq!(record.category, QuestionCategory::Strategy);
    }
}
