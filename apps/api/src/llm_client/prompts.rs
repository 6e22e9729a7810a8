// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// Instruction that keeps completions embeddable in an HTML document body.
pub const HTML_ONLY_INSTRUCTION: &str = "Respond with clean, professional HTML suitable for \
    embedding inside an existing <body> element. \
    Do NOT include <html>, <head> or <body> tags. \
    Do NOT use markdown, asterisks or code fences.";
