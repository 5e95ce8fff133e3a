//! File CRUD. Content changes go through the version log.

use std::sync::Arc;

use tracing::info;

use localgit_core::error::AppError;
use localgit_core::result::AppResult;
use localgit_core::types::{FileId, FolderId};
use localgit_database::{FileStore, FolderStore};
use localgit_entity::file::{CreateFile, File};

use crate::version::VersionService;

/// Manages files within folders.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File store.
    files: Arc<dyn FileStore>,
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// Version log.
    versions: VersionService,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        files: Arc<dyn FileStore>,
        folders: Arc<dyn FolderStore>,
        versions: VersionService,
    ) -> Self {
        Self {
            files,
            folders,
            versions,
        }
    }

    /// Creates a file in `folder_id` with `content` as version 1.
    pub async fn create_file(
        &self,
        folder_id: FolderId,
        name: &str,
        content: &str,
    ) -> AppResult<File> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("File name must not be empty"));
        }

        let commit = self
            .files
            .create_file(&CreateFile {
                folder_id,
                name: name.to_string(),
                content: content.to_string(),
            })
            .await?;

        info!(
            file_id = %commit.file.id,
            folder_id = %folder_id,
            name = %commit.file.name,
            "File created"
        );

        Ok(commit.file)
    }

    /// Replaces the file's content, recording it as the next version.
    pub async fn update_file(&self, file_id: FileId, content: &str) -> AppResult<File> {
        let commit = self.versions.append(file_id, content).await?;
        Ok(commit.file)
    }

    /// Finds a file by ID.
    pub async fn get_file(&self, file_id: FileId) -> AppResult<File> {
        self.files
            .find_file(file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))
    }

    /// Files in a folder, ordered by name.
    pub async fn list_files(&self, folder_id: FolderId) -> AppResult<Vec<File>> {
        if self.folders.find_folder(folder_id).await?.is_none() {
            return Err(AppError::not_found(format!("Folder {folder_id} not found")));
        }
        self.files.list_files_in_folder(folder_id).await
    }

    /// Deletes a file and its whole version history.
    pub async fn delete_file(&self, file_id: FileId) -> AppResult<()> {
        let sequencer = self.versions.sequencer();
        let deleted = {
            let _guard = sequencer.lock(file_id).await;
            self.files.delete_file(file_id).await?
        };

        if !deleted {
            sequencer.discard_idle(file_id);
            return Err(AppError::not_found(format!("File {file_id} not found")));
        }
        sequencer.release(file_id);

        info!(file_id = %file_id, "File deleted");
        Ok(())
    }
}
