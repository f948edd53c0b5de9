pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ats::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // ATS checker
        .route("/api/v1/ats/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/ats/analyze/text",
            post(handlers::handle_analyze_text),
        )
        .route("/api/v1/ats/analyze/ai", post(handlers::handle_analyze_ai))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::ats::suggestions::SuggestionProvider;
    use crate::config::Config;
    use crate::extraction::docx_fixture;
    use crate::llm_client::LlmError;
    use crate::scoring::{AnalysisInput, AnalysisResult, ResumeScorer};

    const BOUNDARY: &str = "----upresume-test-boundary";

    struct FixedSuggestions;

    #[async_trait]
    impl SuggestionProvider for FixedSuggestions {
        async fn suggest(
            &self,
            _input: &AnalysisInput,
            _analysis: &AnalysisResult,
        ) -> Result<Vec<String>, LlmError> {
            Ok(vec!["Lead with a summary".to_string()])
        }
    }

    fn test_state(suggestions: Option<Arc<dyn SuggestionProvider>>) -> AppState {
        AppState {
            config: Config::default(),
            scorer: Arc::new(ResumeScorer::default()),
            suggestions,
        }
    }

    fn app() -> Router {
        build_router(test_state(None))
    }

    /// (field name, optional file name + content type, body)
    struct Part<'a> {
        name: &'a str,
        file: Option<(&'a str, &'a str)>,
        body: &'a [u8],
    }

    fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part.file {
                Some((file_name, content_type)) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{file_name}\"\r\n\
                             Content-Type: {content_type}\r\n\r\n",
                            part.name
                        )
                        .as_bytes(),
                    );
                }
                None => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                            part.name
                        )
                        .as_bytes(),
                    );
                }
            }
            body.extend_from_slice(part.body);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn docx_resume() -> Vec<u8> {
        docx_fixture(&[
            "Jane Doe",
            "jane@example.com | 555-123-4567",
            "Experience",
            "Backend developer on the payments team",
            "Education",
            "BSc Computer Science, State University",
        ])
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_text_returns_analysis() {
        let request = json_request(
            "/api/v1/ats/analyze/text",
            json!({ "text": "EXPERIENCE\nContact: a@b.co" }),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["criteria"]["contactInfo"], 7.5);
        assert_eq!(body["criteria"]["experience"], 15.0);
        assert!(body["feedback"].as_array().is_some_and(|f| !f.is_empty()));
        assert!(body.get("jobMatch").is_none());
    }

    #[tokio::test]
    async fn test_analyze_text_with_job_description_reports_job_match() {
        let request = json_request(
            "/api/v1/ats/analyze/text",
            json!({ "text": "Rust developer", "jobDescription": "Rust Kubernetes" }),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jobMatch"]["keywordsFound"], json!(["rust"]));
        assert_eq!(body["jobMatch"]["matchPercent"], 50);
    }

    #[tokio::test]
    async fn test_analyze_text_rejects_blank_text() {
        let request = json_request("/api/v1/ats/analyze/text", json!({ "text": "  \n " }));
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_text_missing_text_field_is_validation_error() {
        let request = json_request("/api/v1/ats/analyze/text", json!({}));
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .is_some_and(|m| m.contains("text")));
    }

    #[tokio::test]
    async fn test_analyze_text_malformed_json_is_validation_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/ats/analyze/text")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("not json"))
            .unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_docx_upload() {
        let docx = docx_resume();
        let request = multipart_request(
            "/api/v1/ats/analyze",
            &[
                Part {
                    name: "resume",
                    file: Some(("resume.docx", "application/octet-stream")),
                    body: &docx,
                },
                Part {
                    name: "job_description",
                    file: None,
                    body: b"Payments backend developer",
                },
            ],
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["criteria"]["contactInfo"], 15.0);
        assert_eq!(body["criteria"]["education"], 15.0);
        assert_eq!(body["criteria"]["experience"], 15.0);
        assert!(body["jobMatch"]["keywordsFound"]
            .as_array()
            .is_some_and(|k| k.contains(&json!("payments"))));
    }

    #[tokio::test]
    async fn test_analyze_rejects_unsupported_format() {
        let request = multipart_request(
            "/api/v1/ats/analyze",
            &[Part {
                name: "resume",
                file: Some(("resume.txt", "text/plain")),
                body: b"Experience Education",
            }],
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_analyze_requires_resume_part() {
        let request = multipart_request(
            "/api/v1/ats/analyze",
            &[Part {
                name: "job_description",
                file: None,
                body: b"Rust engineer",
            }],
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "No file uploaded");
    }

    #[tokio::test]
    async fn test_analyze_empty_document_is_bad_request() {
        let docx = docx_fixture(&[" "]);
        let request = multipart_request(
            "/api/v1/ats/analyze",
            &[Part {
                name: "resume",
                file: Some(("resume.docx", "application/octet-stream")),
                body: &docx,
            }],
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_ai_without_provider_is_disabled() {
        let docx = docx_resume();
        let request = multipart_request(
            "/api/v1/ats/analyze/ai",
            &[Part {
                name: "resume",
                file: Some(("resume.docx", "application/octet-stream")),
                body: &docx,
            }],
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["aiStatus"], "disabled");
        assert_eq!(body["aiSuggestions"], json!([]));
        assert!(body["analysis"]["score"].as_u64().is_some());
    }

    #[tokio::test]
    async fn test_analyze_ai_with_provider_attaches_suggestions() {
        let provider: Arc<dyn SuggestionProvider> = Arc::new(FixedSuggestions);
        let app = build_router(test_state(Some(provider)));
        let docx = docx_resume();
        let request = multipart_request(
            "/api/v1/ats/analyze/ai",
            &[Part {
                name: "resume",
                file: Some(("resume.docx", "application/octet-stream")),
                body: &docx,
            }],
        );
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["aiStatus"], "ok");
        assert_eq!(body["aiSuggestions"], json!(["Lead with a summary"]));
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let mut state = test_state(None);
        state.config.max_upload_bytes = 1024;
        let big = vec![b'a'; 4096];
        let request = multipart_request(
            "/api/v1/ats/analyze",
            &[Part {
                name: "resume",
                file: Some(("resume.pdf", "application/pdf")),
                body: &big,
            }],
        );
        let (status, _) = send(build_router(state), request).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
