//! Store traits implemented by the PostgreSQL repositories and the
//! in-memory arena.
//!
//! Versions are append-only: no trait here updates or deletes a single
//! version. They disappear only when their file (or the file's folder) is
//! deleted.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use localgit_core::result::AppResult;
use localgit_core::types::{FileId, FolderId};
use localgit_entity::file::{Commit, CreateFile, File, FileVersion};
use localgit_entity::folder::{CreateFolder, Folder};

use crate::memory::MemoryStore;
use crate::repositories::{FileRepository, FolderRepository, VersionRepository};

/// Folder persistence.
#[async_trait]
pub trait FolderStore: Debug + Send + Sync + 'static {
    /// Insert a new folder.
    async fn create_folder(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Find a folder by ID.
    async fn find_folder(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// All folders, oldest first.
    async fn list_folders(&self) -> AppResult<Vec<Folder>>;

    /// Rename a folder. Fails with `NotFound` if it does not exist.
    async fn rename_folder(&self, id: FolderId, name: &str) -> AppResult<Folder>;

    /// Delete a folder together with its files and their versions.
    /// Returns `true` if the folder existed.
    async fn delete_folder(&self, id: FolderId) -> AppResult<bool>;
}

/// File persistence, including the atomic content/version commit.
#[async_trait]
pub trait FileStore: Debug + Send + Sync + 'static {
    /// Insert a file and its version 1 as one unit.
    ///
    /// Fails with `NotFound` if the folder does not exist.
    async fn create_file(&self, data: &CreateFile) -> AppResult<Commit>;

    /// Find a file by ID.
    async fn find_file(&self, id: FileId) -> AppResult<Option<File>>;

    /// Files owned by a folder, ordered by name.
    async fn list_files_in_folder(&self, folder_id: FolderId) -> AppResult<Vec<File>>;

    /// Delete a file together with its versions. Returns `true` if the file
    /// existed.
    async fn delete_file(&self, id: FileId) -> AppResult<bool>;

    /// Append version `version_number` with `content` and set the file's
    /// current content to match, as one unit.
    ///
    /// This is a compare-and-swap on the version sequence: it fails with
    /// `Conflict` unless `version_number` is exactly one past the file's
    /// current maximum, and with `NotFound` if the file does not exist.
    async fn commit_content(
        &self,
        file_id: FileId,
        version_number: i32,
        content: &str,
    ) -> AppResult<Commit>;
}

/// Read access to the version log.
#[async_trait]
pub trait VersionStore: Debug + Send + Sync + 'static {
    /// Highest version number recorded for the file, or 0 if none.
    async fn max_version_number(&self, file_id: FileId) -> AppResult<i32>;

    /// All versions of a file, highest number first.
    async fn list_versions(&self, file_id: FileId) -> AppResult<Vec<FileVersion>>;

    /// A specific version of a file.
    async fn find_version(
        &self,
        file_id: FileId,
        version_number: i32,
    ) -> AppResult<Option<FileVersion>>;
}

/// The set of stores a running service is wired against.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Folder store.
    pub folders: Arc<dyn FolderStore>,
    /// File store.
    pub files: Arc<dyn FileStore>,
    /// Version store.
    pub versions: Arc<dyn VersionStore>,
}

impl Stores {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            folders: Arc::new(FolderRepository::new(pool.clone())),
            files: Arc::new(FileRepository::new(pool.clone())),
            versions: Arc::new(VersionRepository::new(pool)),
        }
    }

    /// A fresh, empty in-memory arena.
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            folders: store.clone(),
            files: store.clone(),
            versions: store,
        }
    }
}
