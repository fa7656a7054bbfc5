//! Domain types for the interview and synthesis engine
//!
//! Plain data passed between the caller and the engine. The engine never
//! persists any of these - the caller owns the transcript and stores
//! whatever it wants to keep.

mod context;
mod plan;
mod question;

pub use context::{InterviewContext, ProjectAttributes};
pub use plan::{PlanDocument, PlanSections, Priority, SectionKey, Suggestion, SuggestionType};
pub use question::{AnswerKind, AnswerRecord, Exchange, MAX_QUESTIONS, QuestionCategory, QuestionRecord, Transcript};
