//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use localgit_core::types::{FileId, FolderId};

/// A text file tracked by LocalGit.
///
/// `content` always equals the content of the file's highest-numbered
/// version; stores only change the two together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// The owning folder.
    pub folder_id: FolderId,
    /// The file name.
    pub name: String,
    /// Current content.
    pub content: String,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the content last changed.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The folder to place the file in.
    pub folder_id: FolderId,
    /// The file name.
    pub name: String,
    /// Initial content, recorded as version 1.
    pub content: String,
}
