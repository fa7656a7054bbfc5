//! Planwright - adaptive business-plan interview and synthesis engine
//!
//! Planwright turns a short business idea into a structured business plan.
//! It drives a remote LLM endpoint through a bounded adaptive interview
//! (at most five questions), then synthesizes the transcript into a
//! six-section plan, a title, and a ranked list of improvement suggestions.
//!
//! # Core Guarantees
//!
//! - **Bounded**: the interview always terminates within five rounds; the
//!   cap is checked before any remote call.
//! - **Total**: every public operation returns a usable value even when
//!   every remote call fails, via fixed question banks, section
//!   placeholders, and fallback suggestion lists.
//! - **Stateless**: the caller owns the transcript; each call is a pure
//!   function of its inputs plus one remote round-trip, so one engine
//!   instance serves many concurrent interviews.
//!
//! # Modules
//!
//! - [`domain`] - plain data types exchanged with the caller
//! - [`llm`] - gateway trait, HTTP client, and error taxonomy
//! - [`prompts`] - locale-aware prompt rendering
//! - [`parser`] - robust extraction of structure from model text
//! - [`interview`] - the bounded question state machine
//! - [`synthesis`] - plan, title, and suggestion synthesis
//! - [`assistant`] - single-answer drafting and polishing
//! - [`config`] - configuration types and loading

pub mod assistant;
pub mod cli;
pub mod config;
pub mod domain;
pub mod interview;
pub mod llm;
pub mod parser;
pub mod prompts;
pub mod synthesis;

// Re-export commonly used types
pub use assistant::AnswerAssistant;
pub use config::{Config, InterviewConfig, LlmConfig};
pub use domain::{
    AnswerKind, AnswerRecord, Exchange, InterviewContext, MAX_QUESTIONS, PlanDocument, PlanSections, Priority,
    ProjectAttributes, QuestionCategory, QuestionRecord, SectionKey, Suggestion, SuggestionType, Transcript,
};
pub use interview::{InterviewStep, QuestionOrchestrator};
pub use llm::{ChatRequest, LlmClient, LlmError, OpenAiClient, create_client};
pub use parser::{ParseFailure, clean_text, extract_json, validate_question};
pub use prompts::{PromptBuilder, PromptPair};
pub use synthesis::PlanSynthesizer;
