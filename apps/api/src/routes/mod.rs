pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Profile-based recommendation
        .route("/recommend/:user_id", get(handlers::handle_recommend))
        // Document-based matching
        .route("/match-cv", post(handlers::handle_match_cv))
        .route("/match-cv/:job_id", post(handlers::handle_match_cv_to_job))
        .route("/debug/users", get(handlers::handle_debug_users))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use chrono::Utc;
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::config::Config;
    use crate::documents::{build_docx, DOCX_MIME, PDF_MIME};
    use crate::matching::lexicon::Lexicon;
    use crate::models::{JobPostingRow, JobSeekerRow};
    use crate::store::InMemoryStore;

    const BOUNDARY: &str = "matcher-test-boundary";

    fn posting(title: &str, skills: &[&str], experience: i32, status: &str) -> JobPostingRow {
        JobPostingRow {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: Some("Acme".to_string()),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience,
            industries: vec!["finance".to_string()],
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    fn app(store: InMemoryStore) -> Router {
        app_with_limit(store, 1024 * 1024)
    }

    fn app_with_limit(store: InMemoryStore, max_upload_bytes: usize) -> Router {
        build_router(AppState {
            store: Arc::new(store),
            lexicon: Arc::new(Lexicon::embedded().unwrap()),
            config: Config {
                database_url: String::new(),
                port: 0,
                rust_log: "info".to_string(),
                lexicon_path: None,
                max_upload_bytes,
            },
        })
    }

    fn multipart_request(uri: &str, field: &str, content_type: &str, payload: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"cv\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(payload);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

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

    fn cv_docx() -> Vec<u8> {
        build_docx(
            r#"<w:document><w:body>
                <w:p><w:r><w:t>Python and SQL developer</w:t></w:r></w:p>
                <w:p><w:r><w:t>4 years of experience in finance</w:t></w:r></w:p>
            </w:body></w:document>"#,
        )
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(InMemoryStore::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_recommend_unknown_user_returns_message() {
        let uri = format!("/recommend/{}", Uuid::new_v4());
        let response = app(InMemoryStore::default())
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["message"], "User not found");
    }

    #[tokio::test]
    async fn test_recommend_returns_ranked_jobs() {
        let seeker = JobSeekerRow {
            id: Uuid::new_v4(),
            skills: vec!["python".to_string(), "sql".to_string()],
            created_at: Utc::now(),
        };
        let job = posting("Python Engineer", &["python", "sql"], 2, "active");
        let store = InMemoryStore::new(vec![job.clone()], vec![seeker.clone()]);

        let response = app(store)
            .oneshot(
                Request::get(format!("/recommend/{}", seeker.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0]["job_id"], job.id.to_string());
        assert_eq!(recs[0]["title"], "Python Engineer");
    }

    #[tokio::test]
    async fn test_match_cv_with_docx_upload() {
        let job = posting("Data Engineer", &["python", "sql"], 4, "active");
        let store = InMemoryStore::new(vec![job.clone()], vec![]);

        let response = app(store)
            .oneshot(multipart_request("/match-cv", "file", DOCX_MIME, &cv_docx()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["cv_info"]["experience"], 4);
        assert!(body["cv_info"].get("text").is_none());
        assert_eq!(body["matches"][0]["job_id"], job.id.to_string());
        assert_eq!(body["matches"][0]["score"], 1.0);
    }

    #[tokio::test]
    async fn test_match_cv_to_job_with_docx_upload() {
        let job = posting("Data Engineer", &["python", "sql", "spark"], 2, "active");
        let store = InMemoryStore::new(vec![job.clone()], vec![]);

        let response = app(store)
            .oneshot(multipart_request(
                &format!("/match-cv/{}", job.id),
                "file",
                DOCX_MIME,
                &cv_docx(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["job_details"]["title"], "Data Engineer");
        assert_eq!(body["matching_scores"]["experience_match"], 33.3);
        assert_eq!(body["matching_details"]["experience_difference"], 2);
        assert_eq!(body["matching_details"]["missing_skills"][0], "spark");
    }

    #[tokio::test]
    async fn test_match_cv_to_inactive_job_is_404() {
        let job = posting("Closed Role", &["python"], 1, "inactive");
        let store = InMemoryStore::new(vec![job.clone()], vec![]);

        let response = app(store)
            .oneshot(multipart_request(
                &format!("/match-cv/{}", job.id),
                "file",
                DOCX_MIME,
                &cv_docx(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unsupported_upload_type_is_400() {
        let response = app(InMemoryStore::default())
            .oneshot(multipart_request("/match-cv", "file", "text/plain", b"python"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"]["code"],
            "UNSUPPORTED_MEDIA_TYPE"
        );
    }

    #[tokio::test]
    async fn test_missing_file_field_is_400() {
        let response = app(InMemoryStore::default())
            .oneshot(multipart_request("/match-cv", "resume", DOCX_MIME, &cv_docx()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_corrupt_docx_is_500_with_message() {
        let response = app(InMemoryStore::default())
            .oneshot(multipart_request("/match-cv", "file", DOCX_MIME, b"not a zip"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "EXTRACTION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("DOCX"));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_500_with_message() {
        let response = app(InMemoryStore::default())
            .oneshot(multipart_request("/match-cv", "file", PDF_MIME, b"%PDF-1.4 garbage"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "EXTRACTION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Failed to read PDF"));
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_413() {
        let payload = vec![b'a'; 4096];
        let response = app_with_limit(InMemoryStore::default(), 1024)
            .oneshot(multipart_request("/match-cv", "file", PDF_MIME, &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json_body(response).await["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_debug_users_without_seekers() {
        let response = app(InMemoryStore::default())
            .oneshot(Request::get("/debug/users").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            json_body(response).await["message"],
            "No users found in database"
        );
    }

    #[tokio::test]
    async fn test_debug_users() {
        let seeker = JobSeekerRow {
            id: Uuid::new_v4(),
            skills: vec!["rust".to_string()],
            created_at: Utc::now(),
        };
        let store = InMemoryStore::new(vec![], vec![seeker.clone()]);
        let response = app(store)
            .oneshot(Request::get("/debug/users").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["total_users"], 1);
        assert_eq!(body["id_field_example"], "id");

        let mut keys: Vec<&str> = body["sample_user_keys"]
            .as_array()
            .unwrap()
            .iter()
            .map(|k| k.as_str().unwrap())
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, ["created_at", "id", "skills"]);
    }
}
