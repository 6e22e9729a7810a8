// Team productivity report: aggregate task rows, have the LLM narrate them,
// render the narrative to PDF.
// All LLM calls go through llm_client; all PDF output goes through render.

pub mod aggregate;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod template;
