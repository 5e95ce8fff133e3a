//! File, version, diff, merge, and conflict handlers.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};

use localgit_core::error::AppError;
use localgit_core::types::FileId;
use localgit_entity::file::{File, FileVersion};

use crate::dto::request::{
    CreateFileRequest, DiffQuery, MergeRequest, ResolveConflictRequest, UpdateFileRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{ValidatedJson, parse_id};
use crate::state::AppState;

/// POST /api/files
pub async fn create_file(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateFileRequest>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let file = state
        .file_service
        .create_file(req.folder_id, &req.name, &req.content)
        .await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let id: FileId = parse_id(&id)?;
    let file = state.file_service.get_file(id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// PUT /api/files/{id}
pub async fn update_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateFileRequest>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let id: FileId = parse_id(&id)?;
    let file = state.file_service.update_file(id, &req.content).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id: FileId = parse_id(&id)?;
    state.file_service.delete_file(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("File deleted"))))
}

/// GET /api/files/{id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<FileVersion>>>, ApiError> {
    let id: FileId = parse_id(&id)?;
    let versions = state.version_service.list(id).await?;
    Ok(Json(ApiResponse::ok(versions)))
}

/// GET /api/files/{id}/versions/{number}
pub async fn get_version(
    State(state): State<AppState>,
    Path((id, number)): Path<(String, String)>,
) -> Result<Json<ApiResponse<FileVersion>>, ApiError> {
    let id: FileId = parse_id(&id)?;
    let number: i32 = parse_id(&number)?;
    let version = state.version_service.get_by_number(id, number).await?;
    Ok(Json(ApiResponse::ok(version)))
}

/// GET /api/files/{id}/diff?from=a&to=b
pub async fn diff_versions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<DiffQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let id: FileId = parse_id(&id)?;
    let Query(query) = query.map_err(|e| AppError::validation(e.body_text()))?;
    let lines = state.diff_engine.diff(id, query.from, query.to).await?;
    Ok(Json(ApiResponse::ok(lines)))
}

/// POST /api/files/{id}/merge
pub async fn merge_files(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<MergeRequest>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let id: FileId = parse_id(&id)?;
    let file = state.merge_service.merge(id, req.source_file_id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// POST /api/files/{id}/resolve
pub async fn resolve_conflict(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ResolveConflictRequest>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let id: FileId = parse_id(&id)?;
    let file = state
        .conflict_service
        .resolve_conflict(id, &req.resolved_content)
        .await?;
    Ok(Json(ApiResponse::ok(file)))
}
