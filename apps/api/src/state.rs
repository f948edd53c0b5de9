use std::sync::Arc;

use crate::ats::suggestions::SuggestionProvider;
use crate::config::Config;
use crate::scoring::ResumeScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Rule-based scorer, built once with the configured vocabulary.
    pub scorer: Arc<ResumeScorer>,
    /// AI suggestion backend. `None` when no API key is configured.
    pub suggestions: Option<Arc<dyn SuggestionProvider>>,
}
