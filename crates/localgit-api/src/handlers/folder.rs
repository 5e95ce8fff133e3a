//! Folder CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};

use localgit_core::types::FolderId;
use localgit_entity::file::File;
use localgit_entity::folder::Folder;

use crate::dto::request::FolderNameRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Folder>>>, ApiError> {
    let folders = state.folder_service.list_folders().await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<FolderNameRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = state.folder_service.create_folder(&req.name).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let id: FolderId = parse_id(&id)?;
    let folder = state.folder_service.get_folder(id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /api/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<FolderNameRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let id: FolderId = parse_id(&id)?;
    let folder = state.folder_service.update_folder(id, &req.name).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id: FolderId = parse_id(&id)?;
    state.folder_service.delete_folder(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Folder deleted"))))
}

/// GET /api/folders/{id}/files
pub async fn list_files(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    let id: FolderId = parse_id(&id)?;
    let files = state.file_service.list_files(id).await?;
    Ok(Json(ApiResponse::ok(files)))
}
