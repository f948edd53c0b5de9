//! Axum route handlers for the ATS checker API.

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::ats::suggestions::{enhance_analysis, EnhancedAnalysis};
use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::scoring::{AnalysisInput, AnalysisResult};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELDS: &[&str] = &["job_description", "jobDescription"];

// ────────────────────────────────────────────────────────────────────────────
// Multipart upload
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct ResumeUpload {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
    job_description: Option<String>,
}

/// Reads the `resume` file part and the optional job description text part.
/// Unknown parts are skipped.
async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut file: Option<(Option<String>, Option<String>, Bytes)> = None;
    let mut job_description = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == RESUME_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await?;
            file = Some((file_name, content_type, bytes));
        } else if JOB_DESCRIPTION_FIELDS.contains(&name.as_str()) {
            job_description = Some(field.text().await?);
        }
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    Ok(ResumeUpload {
        file_name,
        content_type,
        bytes,
        job_description,
    })
}

/// Upload → extracted text → scorer input.
async fn input_from_upload(multipart: Multipart) -> Result<AnalysisInput, AppError> {
    let upload = read_upload(multipart).await?;
    let file_name = upload.file_name.as_deref().unwrap_or("<unnamed>").to_string();

    let text = extract_text(
        upload.file_name.as_deref(),
        upload.content_type.as_deref(),
        upload.bytes,
    )
    .await?;

    info!(
        "Extracted {} chars from '{}'",
        text.chars().count(),
        file_name
    );

    Ok(AnalysisInput {
        text,
        job_description: upload.job_description,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/analyze
///
/// Multipart upload of a PDF or DOCX resume, scored by the rule-based checker.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let input = input_from_upload(multipart).await?;
    let result = state.scorer.score(&input)?;
    info!("Resume scored {}/100", result.score);
    Ok(Json(result))
}

/// POST /api/v1/ats/analyze/text
///
/// Same scoring for callers that already hold the extracted text.
/// Malformed or incomplete bodies are reported as validation errors.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisInput>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(input) = payload?;
    let result = state.scorer.score(&input)?;
    info!("Resume text scored {}/100", result.score);
    Ok(Json(result))
}

/// POST /api/v1/ats/analyze/ai
///
/// Rule-based score plus free-form AI suggestions. The AI part is best effort:
/// when it is disabled or fails the response still carries the full analysis.
pub async fn handle_analyze_ai(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EnhancedAnalysis>, AppError> {
    let input = input_from_upload(multipart).await?;
    let result = state.scorer.score(&input)?;
    info!("Resume scored {}/100, requesting AI suggestions", result.score);

    let enhanced = enhance_analysis(state.suggestions.as_deref(), &input, result).await;
    Ok(Json(enhanced))
}
