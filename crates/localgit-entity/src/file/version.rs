//! File version entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use localgit_core::types::{FileId, FileVersionId};

use super::model::File;

/// An immutable snapshot of a file's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FileVersion {
    /// Unique version identifier.
    pub id: FileVersionId,
    /// The file this version belongs to.
    pub file_id: FileId,
    /// Sequential version number, starting at 1.
    pub version_number: i32,
    /// Content at this version.
    pub content: String,
    /// When this version was created.
    pub created_at: DateTime<Utc>,
}

/// The pair of rows written by one content-changing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The file after its content was updated.
    pub file: File,
    /// The version appended for that content.
    pub version: FileVersion,
}

impl Commit {
    /// Whether the file row and the version row agree on content.
    pub fn is_consistent(&self) -> bool {
        self.file.id == self.version.file_id && self.file.content == self.version.content
    }
}
