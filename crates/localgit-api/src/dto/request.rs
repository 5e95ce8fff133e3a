//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use localgit_core::types::{FileId, FolderId};

/// Create or rename a folder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FolderNameRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name is required"))]
    pub name: String,
}

/// Create a file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFileRequest {
    /// Owning folder.
    pub folder_id: FolderId,
    /// File name.
    #[validate(length(min = 1, max = 255, message = "File name is required"))]
    pub name: String,
    /// Initial content.
    #[serde(default)]
    pub content: String,
}

/// Replace a file's content.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateFileRequest {
    /// New content.
    pub content: String,
}

/// Merge another file into the target.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MergeRequest {
    /// File whose content is appended.
    pub source_file_id: FileId,
}

/// Resolve a conflict with explicit content.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResolveConflictRequest {
    /// Content that replaces the file's current content.
    pub resolved_content: String,
}

/// Query string for `GET /api/files/{id}/diff`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffQuery {
    /// Old side version number.
    pub from: i32,
    /// New side version number.
    pub to: i32,
}
