pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::export::handlers as export;
use crate::generation::handlers as generation;
use crate::intake::handlers as intake;
use crate::state::AppState;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API
        .route("/api/v1/keywords", post(generation::handle_extract_keywords))
        .route("/api/v1/packages", post(generation::handle_generate_package))
        .route(
            "/api/v1/packages/:id",
            get(generation::handle_get_package).delete(generation::handle_delete_package),
        )
        // Export API
        .route(
            "/api/v1/packages/:id/documents/:kind",
            get(export::handle_download_document),
        )
        .route("/api/v1/export/docx", post(export::handle_export_docx))
        // Intake API
        .route(
            "/api/v1/intake/resume",
            post(intake::handle_resume_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::export::DOCX_MIME;
    use crate::generation::handlers::API_KEY_HEADER;
    use crate::intake::docx::tests::docx_with_paragraphs;
    use crate::llm_client::{LlmError, TextGenerator};

    const JD: &str = "Seeking a Supply Chain Analyst to manage inventory control, vendor \
                      negotiations, procurement planning and ERP reporting across three \
                      regional warehouses.";

    struct FakeLlm;

    #[async_trait]
    impl TextGenerator for FakeLlm {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            if prompt.contains("ATS analyst") {
                Ok(r#"["Inventory Control", "Vendor Negotiation", "ERP Reporting"]"#.to_string())
            } else {
                Ok("# Jane Doe\n## Summary\n* Managed **$15M** in equipment".to_string())
            }
        }
    }

    fn test_state() -> AppState {
        let config = Config {
            google_api_key: Some("server-key".to_string()),
            package_store_capacity: 8,
            ..Config::default()
        };
        AppState {
            llm: Some(Arc::new(FakeLlm)),
            ..AppState::new(config).unwrap()
        }
    }

    fn keyless_state(config: Config) -> AppState {
        AppState::new(Config {
            google_api_key: None,
            ..config
        })
        .unwrap()
    }

    fn multipart_request(boundary: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/intake/resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn package_body() -> Value {
        json!({
            "profile": { "rank": "E-6 (SSG)", "years_of_service": 12 },
            "target": {
                "industry": "Corporate (General)",
                "title": "Supply Chain Analyst",
                "job_description": JD
            },
            "keywords": ["Inventory Control", "  ", "Vendor Negotiation"],
            "extra_keyword": "SAP"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "autopilot-api");
    }

    #[tokio::test]
    async fn test_extract_keywords() {
        let app = build_router(test_state());
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/keywords",
                json!({ "job_description": JD, "target_title": "Supply Chain Analyst" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["keywords"][0], "Inventory Control");
        assert_eq!(json["keywords"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_short_job_description_is_rejected() {
        let app = build_router(test_state());
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/keywords",
                json!({ "job_description": "Supply analyst", "target_title": "Analyst" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            json["error"]["message"],
            "Job Description is too short. Paste the full JD (minimum ~15 words)."
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_without_server_key() {
        let app = build_router(keyless_state(Config::default()));
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/keywords",
                json!({ "job_description": JD, "target_title": "Supply Chain Analyst" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "API Key is required.");
    }

    #[tokio::test]
    async fn test_package_lifecycle() {
        let app = build_router(test_state());

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/v1/packages", package_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let package = body_json(response).await;
        assert_eq!(
            package["keywords"],
            json!(["Inventory Control", "Vendor Negotiation", "SAP"])
        );
        assert!(package["resume_md"].as_str().unwrap().starts_with("# Jane Doe"));
        let id = package["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/packages/{id}/documents/resume"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], DOCX_MIME);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Resume_Supply_Chain_Analyst.docx\""
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.starts_with(b"PK"));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!(
                        "/api/v1/packages/{id}/documents/cover_letter?format=md"
                    ))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Cover_Letter.md\""
        );

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/v1/packages/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/packages/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_package_requires_a_keyword() {
        let mut body = package_body();
        body["keywords"] = json!(["", " "]);
        body["extra_keyword"] = Value::Null;

        let app = build_router(test_state());
        let response = app
            .oneshot(json_request("POST", "/api/v1/packages", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_years_out_of_range() {
        let mut body = package_body();
        body["profile"]["years_of_service"] = json!(31);

        let app = build_router(test_state());
        let response = app
            .oneshot(json_request("POST", "/api/v1/packages", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_markdown_to_docx() {
        let app = build_router(test_state());
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/export/docx",
                json!({ "markdown": "# Jane Doe\n* Bullet", "file_name": "Edited Resume" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Edited Resume.docx\""
        );
    }

    #[tokio::test]
    async fn test_resume_upload() {
        let boundary = "autopilot-boundary";
        let docx = docx_with_paragraphs(&["SSG Jane Doe", "Property book NCO"]);

        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"resume.docx\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(&docx);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let app = build_router(test_state());
        let response = app
            .oneshot(multipart_request(boundary, body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["word_count"], 6);
        assert_eq!(json["message"], "Loaded 6 words from resume.docx");
    }

    #[tokio::test]
    async fn test_unsupported_upload_is_unprocessable() {
        let boundary = "autopilot-boundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"resume.txt\"\r\n\r\nplain text\r\n--{boundary}--\r\n"
        )
        .into_bytes();

        let app = build_router(test_state());
        let response = app
            .oneshot(multipart_request(boundary, body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "Unsupported file type: resume.txt");
    }

    #[tokio::test]
    async fn test_header_api_key_reaches_gemini_once_per_key() {
        use httpmock::prelude::*;

        let server = MockServer::start_async().await;
        let models = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1beta/models")
                    .header("x-goog-api-key", "user-key");
                then.status(200).json_body(json!({
                    "models": [
                        {"name": "models/gemini-2.0-flash", "supportedGenerationMethods": ["generateContent"]}
                    ]
                }));
            })
            .await;
        let generate = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-2.0-flash:generateContent")
                    .header("x-goog-api-key", "user-key");
                then.status(200).json_body(json!({
                    "candidates": [{
                        "content": {"parts": [{
                            "text": "[\"Inventory Control\", \"Vendor Negotiation\", \"ERP Reporting\"]"
                        }]}
                    }]
                }));
            })
            .await;

        let app = build_router(keyless_state(Config {
            gemini_api_base: server.base_url(),
            ..Config::default()
        }));

        for _ in 0..2 {
            let mut request = json_request(
                "POST",
                "/api/v1/keywords",
                json!({ "job_description": JD, "target_title": "Supply Chain Analyst" }),
            );
            request
                .headers_mut()
                .insert(API_KEY_HEADER, "user-key".parse().unwrap());

            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let json = body_json(response).await;
            assert_eq!(
                json["keywords"],
                json!(["Inventory Control", "Vendor Negotiation", "ERP Reporting"])
            );
        }

        models.assert_hits_async(1).await;
        generate.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn test_oversized_upload_is_payload_too_large() {
        let boundary = "autopilot-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"resume.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(&vec![b'a'; 200 * 1024]);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let app = build_router(keyless_state(Config {
            max_upload_bytes: 1024,
            ..Config::default()
        }));
        let response = app
            .oneshot(multipart_request(boundary, body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "PAYLOAD_TOO_LARGE");
    }
}
