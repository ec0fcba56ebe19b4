use anyhow::anyhow;
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    Json,
};

use crate::analysis::skills;
use crate::config::AnalysisMode;
use crate::errors::AppError;
use crate::extract::{preview, text_from_upload, PREVIEW_LIMIT};
use crate::models::analysis::{AnalyzeRequest, AnalyzeResponse};
use crate::state::AppState;

/// Upload size cap, carried over from the original 10 MB multer limit.
pub const BODY_LIMIT: usize = 10 * 1024 * 1024;

/// POST /api/analyze
///
/// Accepts either multipart/form-data with a `resume` file field or a JSON
/// body `{"resume": "..."}`. Both forms funnel into the same analysis,
/// selected by `Config::analysis_mode`.
pub async fn analyze_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let (filename, text) = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?;
        let (filename, text) = read_upload(multipart).await?;
        (Some(filename), text)
    } else if content_type.starts_with("application/json") {
        let bytes = axum::body::to_bytes(request.into_body(), BODY_LIMIT)
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read request body: {e}")))?;
        let payload: AnalyzeRequest = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))?;
        let resume = payload
            .resume
            .ok_or_else(|| AppError::Validation("No resume text provided".to_string()))?;
        (None, resume)
    } else {
        return Err(AppError::Validation(
            "Expected multipart/form-data or application/json".to_string(),
        ));
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::Validation("Empty resume content".to_string()));
    }

    let preview_text = preview(&text, PREVIEW_LIMIT);

    let response = match state.config.analysis_mode {
        AnalysisMode::Skills => {
            let analysis = skills::analyze(&text);
            AnalyzeResponse {
                filename,
                preview: preview_text,
                skills: Some(analysis.skills),
                recommendations: Some(analysis.recommendations),
                summary: Some(analysis.summary),
                feedback: None,
            }
        }
        AnalysisMode::Feedback => {
            let client = state
                .inference
                .as_ref()
                .ok_or_else(|| AppError::Internal(anyhow!("inference client not configured")))?;
            let feedback = client.feedback(&preview_text).await?;
            AnalyzeResponse {
                filename,
                preview: preview_text,
                skills: None,
                recommendations: None,
                summary: None,
                feedback: Some(feedback),
            }
        }
    };

    Ok(Json(response))
}

/// Pulls the `resume` file field out of the multipart stream and extracts its
/// text. The upload lives only in memory and is never written to disk.
async fn read_upload(mut multipart: Multipart) -> Result<(String, String), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("resume") {
            continue;
        }

        let filename = field.file_name().unwrap_or("").to_string();
        if filename.is_empty() {
            return Err(AppError::Validation("No selected file".to_string()));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        let text = text_from_upload(&bytes)?;
        return Ok((filename, text));
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::{AnalysisMode, Config};
    use crate::routes::build_router;
    use crate::state::AppState;

    fn test_app(mode: AnalysisMode) -> axum::Router {
        let config = Config {
            port: 0,
            analysis_mode: mode,
            huggingface_api_key: None,
            allowed_origin: None,
            rust_log: "info".to_string(),
        };
        build_router(AppState::new(config))
    }

    async fn response_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn json_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(filename: &str, content: &str) -> Request<Body> {
        let boundary = "X-TEST-BOUNDARY";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"resume\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {content}\r\n\
             --{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_skills_analysis() {
        let app = test_app(AnalysisMode::Skills);
        let request = json_request(r#"{"resume": "Experienced in Python, SQL, and Leadership."}"#);

        let (status, body) = response_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["skills"],
            serde_json::json!(["Leadership", "Python", "Sql"])
        );
        assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);
        assert_eq!(
            body["preview"],
            "Experienced in Python, SQL, and Leadership."
        );
        assert!(body.get("filename").is_none());
        assert!(body.get("feedback").is_none());
    }

    #[tokio::test]
    async fn test_json_missing_resume_field_is_400() {
        let app = test_app(AnalysisMode::Skills);
        let request = json_request(r#"{"text": "wrong key"}"#);

        let (status, body) = response_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("error").is_some());
    }

    #[tokio::test]
    async fn test_json_whitespace_only_resume_is_400() {
        let app = test_app(AnalysisMode::Skills);
        let request = json_request(r#"{"resume": "   \n\t  "}"#);

        let (status, body) = response_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Empty resume content");
    }

    #[tokio::test]
    async fn test_multipart_text_upload_returns_preview_and_filename() {
        let app = test_app(AnalysisMode::Skills);
        let request = multipart_request("resume.txt", "Rust and Docker experience");

        let (status, body) = response_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["filename"], "resume.txt");
        assert_eq!(body["preview"], "Rust and Docker experience");
        assert_eq!(body["skills"], serde_json::json!(["Docker", "Rust"]));
    }

    #[tokio::test]
    async fn test_multipart_without_resume_field_is_400() {
        let app = test_app(AnalysisMode::Skills);
        let boundary = "X-TEST-BOUNDARY";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"other\"; filename=\"a.txt\"\r\n\r\n\
             hello\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, body) = response_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No file uploaded");
    }

    #[tokio::test]
    async fn test_multipart_empty_filename_is_400() {
        let app = test_app(AnalysisMode::Skills);
        let request = multipart_request("", "content");

        let (status, body) = response_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No selected file");
    }

    #[tokio::test]
    async fn test_unsupported_content_type_is_400() {
        let app = test_app(AnalysisMode::Skills);
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(CONTENT_TYPE, "text/plain")
            .body(Body::from("raw text"))
            .unwrap();

        let (status, body) = response_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("error").is_some());
    }

    #[tokio::test]
    async fn test_long_input_preview_is_truncated_to_limit() {
        let app = test_app(AnalysisMode::Skills);
        let text = "a".repeat(1500);
        let request = json_request(&format!(r#"{{"resume": "{text}"}}"#));

        let (status, body) = response_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        let preview = body["preview"].as_str().unwrap();
        assert_eq!(preview.chars().count(), 1000);
        assert_eq!(preview, &text[..1000]);
        let summary = body["summary"].as_str().unwrap();
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), 253);
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = test_app(AnalysisMode::Skills);
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = response_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let app = test_app(AnalysisMode::Skills);
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, body) = response_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.get("message").is_some());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_with_error_key() {
        let app = test_app(AnalysisMode::Skills);
        let request = Request::builder()
            .uri("/api/nope")
            .body(Body::empty())
            .unwrap();

        let (status, body) = response_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Endpoint not found");
    }
}
