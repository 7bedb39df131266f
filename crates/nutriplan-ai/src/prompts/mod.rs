//! System prompts loaded at compile time.

/// Default instructions for drafting a plan in the keyword format the
/// plan reader understands.
pub const DEFAULT_SYSTEM_PROMPT: &str = include_str!("system_prompt.md");
