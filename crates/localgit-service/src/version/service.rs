//! Version log service: append, list, and fetch versions.

use std::sync::Arc;

use tracing::info;

use localgit_core::error::AppError;
use localgit_core::result::AppResult;
use localgit_core::types::FileId;
use localgit_database::{FileStore, Stores, VersionStore};
use localgit_entity::file::{Commit, File, FileVersion};

use super::sequencer::VersionSequencer;

/// Appends and reads file versions.
#[derive(Debug, Clone)]
pub struct VersionService {
    /// File store.
    files: Arc<dyn FileStore>,
    /// Version store.
    versions: Arc<dyn VersionStore>,
    /// Per-file numbering.
    sequencer: Arc<VersionSequencer>,
}

impl VersionService {
    /// Creates a new version service over `stores`.
    pub fn new(stores: &Stores) -> Self {
        Self {
            files: stores.files.clone(),
            versions: stores.versions.clone(),
            sequencer: Arc::new(VersionSequencer::new(stores.versions.clone())),
        }
    }

    /// The sequencer shared by every clone of this service.
    pub fn sequencer(&self) -> &Arc<VersionSequencer> {
        &self.sequencer
    }

    /// Makes `content` the file's current content and records it as the
    /// next version.
    pub async fn append(&self, file_id: FileId, content: &str) -> AppResult<Commit> {
        let content = content.to_string();
        self.commit_with(file_id, move |_| Ok(content)).await
    }

    /// Computes new content from the file's current state and commits it as
    /// the next version.
    ///
    /// `compute` runs while the file's lock is held, so it sees the content
    /// of the latest committed version and nothing can be committed to the
    /// file until this call returns. The version number is read before the
    /// file, so a commit made in between by another process fails the
    /// store's compare-and-swap with `Conflict` instead of being lost.
    pub async fn commit_with<F>(&self, file_id: FileId, compute: F) -> AppResult<Commit>
    where
        F: FnOnce(&File) -> AppResult<String> + Send,
    {
        let result = {
            let _guard = self.sequencer.lock(file_id).await;
            self.commit_locked(file_id, compute).await
        };

        match &result {
            Ok(commit) => info!(
                file_id = %file_id,
                version = commit.version.version_number,
                bytes = commit.version.content.len(),
                "File version committed"
            ),
            Err(e) if e.is_not_found() => self.sequencer.discard_idle(file_id),
            Err(_) => {}
        }

        result
    }

    async fn commit_locked<F>(&self, file_id: FileId, compute: F) -> AppResult<Commit>
    where
        F: FnOnce(&File) -> AppResult<String> + Send,
    {
        let number = self.sequencer.next_number(file_id).await?;
        let file = self.find_file(file_id).await?;
        let content = compute(&file)?;

        self.files.commit_content(file_id, number, &content).await
    }

    /// All versions of a file, newest first.
    pub async fn list(&self, file_id: FileId) -> AppResult<Vec<FileVersion>> {
        self.find_file(file_id).await?;
        self.versions.list_versions(file_id).await
    }

    /// Version `number` of a file.
    pub async fn get_by_number(&self, file_id: FileId, number: i32) -> AppResult<FileVersion> {
        self.versions
            .find_version(file_id, number)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Version {number} of file {file_id} not found"))
            })
    }

    async fn find_file(&self, file_id: FileId) -> AppResult<File> {
        self.files
            .find_file(file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))
    }
}
