// ATS checker: upload handling, rule-based scoring and optional AI suggestions.
// All LLM calls go through llm_client; scoring itself lives in `scoring`.

pub mod handlers;
pub mod prompts;
pub mod suggestions;
