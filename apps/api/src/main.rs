mod ats;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ats::suggestions::{GeminiSuggestions, SuggestionProvider};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::scoring::ResumeScorer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting UpResume ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize scorer (built-in vocabulary unless ATS_KEYWORDS overrides it)
    let scorer = match &config.ats_keywords {
        Some(keywords) => ResumeScorer::new(keywords.clone()),
        None => ResumeScorer::default(),
    };
    info!("Resume scorer vocabulary: {:?}", scorer.vocabulary());

    // Initialize AI suggestions (optional)
    let suggestions: Option<Arc<dyn SuggestionProvider>> = match &config.gemini_api_key {
        Some(api_key) => {
            let llm = LlmClient::new(api_key.clone(), config.gemini_model.clone());
            info!("LLM client initialized (model: {})", llm.model());
            let provider: Arc<dyn SuggestionProvider> = Arc::new(GeminiSuggestions(llm));
            Some(provider)
        }
        None => {
            info!("GEMINI_API_KEY not set, AI suggestions disabled");
            None
        }
    };

    let state = AppState {
        config: config.clone(),
        scorer: Arc::new(scorer),
        suggestions,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the frontend origin once it is configurable

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!(
        "Listening on {addr} (upload limit {} bytes)",
        config.max_upload_bytes
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
