use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::{AppError, AppJson};
use crate::models::records::{
    Collection, ParsedResumeRecord, ResumeRecord, StoredDocument, UploadedFileMetadata,
};
use crate::state::AppState;
use crate::storage::{BlobError, RecordStoreExt};

/// Multipart part that carries the uploaded file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveResumeResponse {
    pub message: String,
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResumeListResponse {
    pub resumes: Vec<StoredDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResumeResponse {
    pub message: String,
    pub file_path: String,
}

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    pub file_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResumeResponse {
    pub message: String,
    pub resume_text: String,
}

/// POST /save_resume/
pub async fn handle_save_resume(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> Result<Json<SaveResumeResponse>, AppError> {
    let record = ResumeRecord::from_payload(&payload);
    let inserted = state
        .records
        .insert_record(Collection::Resumes, &record)
        .await
        .map_err(|e| AppError::Storage(format!("Error saving resume: {e}")))?;

    info!("Saved resume {}", inserted.id);
    Ok(Json(SaveResumeResponse {
        message: "Resume saved successfully".to_string(),
        id: inserted.id,
    }))
}

/// GET /get_resumes/
pub async fn handle_get_resumes(
    State(state): State<AppState>,
) -> Result<Json<ResumeListResponse>, AppError> {
    let resumes = state
        .records
        .list(Collection::Resumes)
        .await
        .map_err(|e| AppError::Storage(format!("Error retrieving resumes: {e}")))?;

    debug!("Listed {} resume(s)", resumes.len());
    Ok(Json(ResumeListResponse { resumes }))
}

/// POST /upload_resume/
///
/// Streams the first part named `file` or carrying a filename into the blob
/// store, then records its metadata. Other parts are ignored. If the metadata
/// insert fails the stored file stays on disk.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let mut multipart = multipart?;
    let malformed_upload = |e: MultipartError| upload_read_failed(e, state.max_upload_bytes);

    while let Some(mut field) = multipart.next_field().await.map_err(malformed_upload)? {
        if field.name() != Some(FILE_FIELD) && field.file_name().is_none() {
            debug!("Ignoring multipart field {:?}", field.name());
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest("Uploaded file has no file name".to_string()))?;

        let mut writer = state.blobs.create(&file_name).await.map_err(upload_failed)?;
        while let Some(chunk) = field.chunk().await.map_err(malformed_upload)? {
            writer.write_chunk(&chunk).await.map_err(upload_failed)?;
        }
        let blob = writer.finish().await.map_err(upload_failed)?;

        let stored_name = blob
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(file_name);
        let file_path = blob.path.display().to_string();

        let metadata = UploadedFileMetadata {
            file_name: stored_name,
            file_path: file_path.clone(),
            file_size: blob.size_bytes,
            upload_time: Utc::now(),
        };
        let inserted = state
            .records
            .insert_record(Collection::UploadedResumes, &metadata)
            .await
            .map_err(|e| AppError::Storage(format!("Error uploading resume: {e}")))?;

        info!(
            "Uploaded {} ({} bytes), metadata {}",
            file_path, blob.size_bytes, inserted.id
        );
        return Ok(Json(UploadResumeResponse {
            message: "File uploaded successfully".to_string(),
            file_path,
        }));
    }

    Err(AppError::BadRequest(format!(
        "No file provided in the '{FILE_FIELD}' field"
    )))
}

/// POST /parse_resume/
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    AppJson(req): AppJson<ParseResumeRequest>,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let not_found = || AppError::NotFound(format!("File '{}' not found", req.file_name));

    let path = state.blobs.resolve(&req.file_name).map_err(|_| not_found())?;
    let exists = tokio::fs::try_exists(&path)
        .await
        .map_err(|e| AppError::Storage(format!("Error parsing resume: {e}")))?;
    if !exists {
        return Err(not_found());
    }

    let resume_text = state
        .extractor
        .extract_text(&path)
        .await
        .map_err(|e| AppError::Extraction(format!("Error parsing resume: {e}")))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| req.file_name.clone());
    let record = ParsedResumeRecord {
        file_name,
        resume_text,
    };
    let inserted = state
        .records
        .insert_record(Collection::ParsedResumes, &record)
        .await
        .map_err(|e| AppError::Storage(format!("Error parsing resume: {e}")))?;

    info!(
        "Parsed {} into {} chars, record {}",
        path.display(),
        record.resume_text.len(),
        inserted.id
    );
    Ok(Json(ParseResumeResponse {
        message: "Resume parsed successfully".to_string(),
        resume_text: record.resume_text,
    }))
}

fn upload_read_failed(e: MultipartError, limit_bytes: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "Upload exceeds the size limit of {limit_bytes} bytes"
        ))
    } else {
        AppError::BadRequest(format!("Malformed upload: {}", e.body_text()))
    }
}

fn upload_failed(e: BlobError) -> AppError {
    match e {
        BlobError::InvalidName(_) => AppError::BadRequest(e.to_string()),
        BlobError::Io(_) => AppError::Storage(format!("Error uploading resume: {e}")),
    }
}
