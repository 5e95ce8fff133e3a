//! Conflict resolution: overwrite with caller-supplied content.

use tracing::info;

use localgit_core::result::AppResult;
use localgit_core::types::FileId;
use localgit_entity::file::File;

use crate::version::VersionService;

/// Records a manually resolved file state.
#[derive(Debug, Clone)]
pub struct ConflictService {
    versions: VersionService,
}

impl ConflictService {
    /// Creates a new conflict service.
    pub fn new(versions: VersionService) -> Self {
        Self { versions }
    }

    /// Replaces the file's content with `resolved` and records it as the
    /// next version. Earlier versions are untouched.
    pub async fn resolve_conflict(&self, file_id: FileId, resolved: &str) -> AppResult<File> {
        let commit = self.versions.append(file_id, resolved).await?;

        info!(
            file_id = %file_id,
            version = commit.version.version_number,
            "Conflict resolved"
        );

        Ok(commit.file)
    }
}
