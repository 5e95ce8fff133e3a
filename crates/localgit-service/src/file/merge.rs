//! File merge: the target gains the source's content as a new version.
//!
//! There is no common-ancestor analysis. The merged content is always the
//! target's content, a newline, then the source's content.

use std::sync::Arc;

use tracing::info;

use localgit_core::error::AppError;
use localgit_core::result::AppResult;
use localgit_core::types::FileId;
use localgit_database::FileStore;
use localgit_entity::file::File;

use crate::version::VersionService;

/// Concatenates `target` and `source` with a newline between them.
pub fn merge_content(target: &str, source: &str) -> String {
    let mut merged = String::with_capacity(target.len() + 1 + source.len());
    merged.push_str(target);
    merged.push('\n');
    merged.push_str(source);
    merged
}

/// Merges one file's content into another.
#[derive(Debug, Clone)]
pub struct MergeService {
    files: Arc<dyn FileStore>,
    versions: VersionService,
}

impl MergeService {
    /// Creates a new merge service.
    pub fn new(files: Arc<dyn FileStore>, versions: VersionService) -> Self {
        Self { files, versions }
    }

    /// Appends the source file's content to the target file, recording the
    /// result as the target's next version. The source is left unchanged.
    ///
    /// Merging a file into itself doubles its content.
    pub async fn merge(&self, target_id: FileId, source_id: FileId) -> AppResult<File> {
        self.require(target_id).await?;
        let source = self.require(source_id).await?;

        let commit = self
            .versions
            .commit_with(target_id, move |target| {
                // A self-merge reads both sides from the locked content.
                let source_content = if source_id == target_id {
                    target.content.as_str()
                } else {
                    source.content.as_str()
                };
                Ok(merge_content(&target.content, source_content))
            })
            .await?;

        info!(
            target_id = %target_id,
            source_id = %source_id,
            version = commit.version.version_number,
            "Files merged"
        );

        Ok(commit.file)
    }

    async fn require(&self, file_id: FileId) -> AppResult<File> {
        self.files
            .find_file(file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))
    }
}
