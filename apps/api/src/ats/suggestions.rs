//! AI suggestions — pluggable, trait-based provider layered on top of the rule-based score.
//!
//! Default: `GeminiSuggestions` (calls the external model through `LlmClient`).
//! The deterministic `AnalysisResult` is never modified here; when the provider is
//! missing or fails, callers get the rule-based result alone.
//!
//! `AppState` holds an `Option<Arc<dyn SuggestionProvider>>`, set at startup from config.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::ats::prompts::{MAX_RESUME_CHARS, SUGGESTIONS_PROMPT_TEMPLATE, SUGGESTIONS_SYSTEM};
use crate::llm_client::prompts::{render, truncate_chars, JSON_ONLY_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};
use crate::scoring::{AnalysisInput, AnalysisResult};

const MAX_SUGGESTIONS: usize = 7;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AiStatus {
    Ok,
    /// No provider configured.
    Disabled,
    /// Provider configured but the call failed.
    Unavailable,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedAnalysis {
    pub analysis: AnalysisResult,
    pub ai_suggestions: Vec<String>,
    pub ai_status: AiStatus,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(
        &self,
        input: &AnalysisInput,
        analysis: &AnalysisResult,
    ) -> Result<Vec<String>, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiSuggestions
// ────────────────────────────────────────────────────────────────────────────

pub struct GeminiSuggestions(pub LlmClient);

#[async_trait]
impl SuggestionProvider for GeminiSuggestions {
    async fn suggest(
        &self,
        input: &AnalysisInput,
        analysis: &AnalysisResult,
    ) -> Result<Vec<String>, LlmError> {
        let prompt = build_prompt(input, analysis);
        let system = format!("{SUGGESTIONS_SYSTEM} {JSON_ONLY_SYSTEM}");
        self.0.call_json::<Vec<String>>(&prompt, &system).await
    }
}

fn build_prompt(input: &AnalysisInput, analysis: &AnalysisResult) -> String {
    let job_description = input
        .job_description
        .as_deref()
        .map(str::trim)
        .filter(|jd| !jd.is_empty())
        .unwrap_or("None provided");

    let feedback = if analysis.feedback.is_empty() {
        "- (none)".to_string()
    } else {
        analysis
            .feedback
            .iter()
            .map(|f| format!("- {f}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let score = analysis.score.to_string();

    render(
        SUGGESTIONS_PROMPT_TEMPLATE,
        &[
            ("resume_text", truncate_chars(input.text.trim(), MAX_RESUME_CHARS)),
            ("job_description", job_description),
            ("score", score.as_str()),
            ("feedback", feedback.as_str()),
        ],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Enhancement with graceful fallback
// ────────────────────────────────────────────────────────────────────────────

/// Attaches AI suggestions to a finished rule-based analysis.
///
/// Never fails: a missing provider yields `Disabled`, a failing one `Unavailable`,
/// and in both cases the analysis is returned untouched with no suggestions.
pub async fn enhance_analysis(
    provider: Option<&dyn SuggestionProvider>,
    input: &AnalysisInput,
    analysis: AnalysisResult,
) -> EnhancedAnalysis {
    let Some(provider) = provider else {
        return EnhancedAnalysis {
            analysis,
            ai_suggestions: vec![],
            ai_status: AiStatus::Disabled,
        };
    };

    match provider.suggest(input, &analysis).await {
        Ok(raw) => {
            let ai_suggestions: Vec<String> = raw
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .take(MAX_SUGGESTIONS)
                .collect();
            info!("AI suggestions attached: {}", ai_suggestions.len());
            EnhancedAnalysis {
                analysis,
                ai_suggestions,
                ai_status: AiStatus::Ok,
            }
        }
        Err(e) => {
            warn!("AI suggestions unavailable, returning rule-based analysis only: {e}");
            EnhancedAnalysis {
                analysis,
                ai_suggestions: vec![],
                ai_status: AiStatus::Unavailable,
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
