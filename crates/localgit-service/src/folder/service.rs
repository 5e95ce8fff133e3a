//! Folder CRUD operations.

use std::sync::Arc;

use tracing::info;

use localgit_core::error::AppError;
use localgit_core::result::AppResult;
use localgit_core::types::FolderId;
use localgit_database::{FileStore, FolderStore};
use localgit_entity::folder::{CreateFolder, Folder};

use crate::version::VersionSequencer;

/// Manages folders.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// File store, for releasing sequencer entries on cascade.
    files: Arc<dyn FileStore>,
    /// Sequencer shared with the version service.
    sequencer: Arc<VersionSequencer>,
}

fn validate_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Folder name must not be empty"));
    }
    Ok(name)
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        sequencer: Arc<VersionSequencer>,
    ) -> Self {
        Self {
            folders,
            files,
            sequencer,
        }
    }

    /// Creates a folder.
    pub async fn create_folder(&self, name: &str) -> AppResult<Folder> {
        let name = validate_name(name)?;
        let folder = self
            .folders
            .create_folder(&CreateFolder {
                name: name.to_string(),
            })
            .await?;

        info!(folder_id = %folder.id, name = %folder.name, "Folder created");
        Ok(folder)
    }

    /// Renames a folder.
    pub async fn update_folder(&self, folder_id: FolderId, name: &str) -> AppResult<Folder> {
        let name = validate_name(name)?;
        let folder = self.folders.rename_folder(folder_id, name).await?;

        info!(folder_id = %folder_id, name = %folder.name, "Folder renamed");
        Ok(folder)
    }

    /// Deletes a folder with every file in it and all of their versions.
    pub async fn delete_folder(&self, folder_id: FolderId) -> AppResult<()> {
        let files = self.files.list_files_in_folder(folder_id).await?;

        if !self.folders.delete_folder(folder_id).await? {
            return Err(AppError::not_found(format!("Folder {folder_id} not found")));
        }
        for file in &files {
            self.sequencer.release(file.id);
        }

        info!(folder_id = %folder_id, files = files.len(), "Folder deleted");
        Ok(())
    }

    /// All folders, oldest first.
    pub async fn list_folders(&self) -> AppResult<Vec<Folder>> {
        self.folders.list_folders().await
    }

    /// Finds a folder by ID.
    pub async fn get_folder(&self, folder_id: FolderId) -> AppResult<Folder> {
        self.folders
            .find_folder(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }
}
