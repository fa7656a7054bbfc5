//! Prompt rendering module
//!
//! Embedded per-locale templates plus the builder that renders them.

mod builder;
pub mod embedded;

pub use builder::{PromptBuilder, PromptPair};
