//! Axum route handlers for the Matching API.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::documents::{extract_text, DocumentKind};
use crate::errors::AppError;
use crate::matching::service::{
    match_cv, match_cv_to_job, recommend, MatchCvResponse, MatchCvToJobResponse,
    RecommendOutcome,
};
use crate::state::AppState;

/// Multipart field carrying the résumé.
const UPLOAD_FIELD: &str = "file";

struct UploadedDocument {
    file_name: Option<String>,
    content_type: String,
    bytes: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /recommend/:user_id
///
/// Top job postings for a stored seeker's skills. Unknown users get a 404 with
/// a plain `message` body rather than the error envelope.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, AppError> {
    match recommend(state.store.as_ref(), &user_id).await? {
        RecommendOutcome::Recommendations(recommendations) => {
            Ok(Json(json!({ "recommendations": recommendations })).into_response())
        }
        RecommendOutcome::UserNotFound => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "User not found" })),
        )
            .into_response()),
    }
}

/// POST /match-cv
///
/// Scores an uploaded PDF/DOCX résumé against every active posting.
pub async fn handle_match_cv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchCvResponse>, AppError> {
    let text = read_document_text(multipart).await?;
    let response = match_cv(state.store.as_ref(), &state.lexicon, &text).await?;
    Ok(Json(response))
}

/// POST /match-cv/:job_id
///
/// Scores an uploaded résumé against one active posting with a full breakdown.
pub async fn handle_match_cv_to_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<MatchCvToJobResponse>, AppError> {
    let text = read_document_text(multipart).await?;
    let response = match_cv_to_job(state.store.as_ref(), &state.lexicon, &job_id, &text).await?;
    Ok(Json(response))
}

/// GET /debug/users
///
/// Seeker count plus the field names of one stored profile, for checking
/// what the store holds.
pub async fn handle_debug_users(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let total_users = state.store.count_seekers().await?;
    let Some(sample) = state.store.sample_seeker().await? else {
        return Ok(Json(json!({ "message": "No users found in database" })));
    };

    let sample_user_keys: Vec<String> = match serde_json::to_value(&sample) {
        Ok(Value::Object(fields)) => fields.keys().cloned().collect(),
        _ => Vec::new(),
    };
    let id_field_example = sample_user_keys
        .iter()
        .find(|k| k.as_str() == "id")
        .or_else(|| sample_user_keys.first())
        .cloned();

    Ok(Json(json!({
        "total_users": total_users,
        "sample_user_keys": sample_user_keys,
        "id_field_example": id_field_example,
    })))
}

// ────────────────────────────────────────────────────────────────────────────
// Upload plumbing
// ────────────────────────────────────────────────────────────────────────────

async fn read_document_text(multipart: Multipart) -> Result<String, AppError> {
    let upload = read_upload(multipart).await?;
    // Reject unsupported types before paying for a blocking task.
    DocumentKind::from_mime(&upload.content_type)?;

    info!(
        file_name = upload.file_name.as_deref().unwrap_or("<unnamed>"),
        content_type = %upload.content_type,
        bytes = upload.bytes.len(),
        "Decoding uploaded CV"
    );

    tokio::task::spawn_blocking(move || extract_text(&upload.bytes, &upload.content_type))
        .await
        .map_err(|e| AppError::Extraction(format!("Document decoder aborted: {e}")))?
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadedDocument, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart body", e))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read upload", e))?;

        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }

        return Ok(UploadedDocument {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(AppError::Validation(format!(
        "Multipart field '{UPLOAD_FIELD}' is required"
    )))
}

/// Body-limit overruns keep their 413; anything else is a malformed request.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{context}: {}", err.body_text()))
    } else {
        AppError::Validation(format!("{context}: {}", err.body_text()))
    }
}
