//! In-memory store backed by an ownership arena.
//!
//! Folders own their files and files own their versions, so removing an
//! entry drops everything beneath it. A single `RwLock` guards the arena:
//! a commit updates `File.content` and pushes the version under one write
//! guard, and readers never observe one without the other.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use localgit_core::error::AppError;
use localgit_core::result::AppResult;
use localgit_core::types::{FileId, FileVersionId, FolderId};
use localgit_entity::file::{Commit, CreateFile, File, FileVersion};
use localgit_entity::folder::{CreateFolder, Folder};

use crate::store::{FileStore, FolderStore, VersionStore};

/// In-memory implementation of every store trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    arena: RwLock<Arena>,
}

#[derive(Debug, Default)]
struct Arena {
    folders: HashMap<FolderId, FolderEntry>,
    /// Reverse index from a file to the folder that owns it.
    owners: HashMap<FileId, FolderId>,
    next_seq: u64,
}

#[derive(Debug)]
struct FolderEntry {
    seq: u64,
    folder: Folder,
    files: HashMap<FileId, FileEntry>,
}

#[derive(Debug)]
struct FileEntry {
    file: File,
    /// Ascending; `versions[i].version_number == i + 1`.
    versions: Vec<FileVersion>,
}

impl FileEntry {
    fn latest_number(&self) -> i32 {
        self.versions.last().map_or(0, |v| v.version_number)
    }
}

impl Arena {
    fn file(&self, id: FileId) -> Option<&FileEntry> {
        let folder_id = self.owners.get(&id)?;
        self.folders.get(folder_id)?.files.get(&id)
    }

    fn file_mut(&mut self, id: FileId) -> Option<&mut FileEntry> {
        let folder_id = self.owners.get(&id)?;
        self.folders.get_mut(folder_id)?.files.get_mut(&id)
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of version records currently held, across all files.
    pub async fn version_count(&self) -> usize {
        let arena = self.arena.read().await;
        arena
            .folders
            .values()
            .flat_map(|f| f.files.values())
            .map(|f| f.versions.len())
            .sum()
    }
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn create_folder(&self, data: &CreateFolder) -> AppResult<Folder> {
        let now = Utc::now();
        let folder = Folder {
            id: FolderId::new(),
            name: data.name.clone(),
            created_at: now,
            updated_at: now,
        };

        let mut arena = self.arena.write().await;
        let seq = arena.next_seq;
        arena.next_seq += 1;
        arena.folders.insert(
            folder.id,
            FolderEntry {
                seq,
                folder: folder.clone(),
                files: HashMap::new(),
            },
        );
        Ok(folder)
    }

    async fn find_folder(&self, id: FolderId) -> AppResult<Option<Folder>> {
        let arena = self.arena.read().await;
        Ok(arena.folders.get(&id).map(|e| e.folder.clone()))
    }

    async fn list_folders(&self) -> AppResult<Vec<Folder>> {
        let arena = self.arena.read().await;
        let mut entries: Vec<&FolderEntry> = arena.folders.values().collect();
        entries.sort_by_key(|e| e.seq);
        Ok(entries.into_iter().map(|e| e.folder.clone()).collect())
    }

    async fn rename_folder(&self, id: FolderId, name: &str) -> AppResult<Folder> {
        let mut arena = self.arena.write().await;
        let entry = arena
            .folders
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        entry.folder.name = name.to_string();
        entry.folder.updated_at = Utc::now();
        Ok(entry.folder.clone())
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<bool> {
        let mut arena = self.arena.write().await;
        let Some(entry) = arena.folders.remove(&id) else {
            return Ok(false);
        };
        for file_id in entry.files.keys() {
            arena.owners.remove(file_id);
        }
        debug!(folder_id = %id, files = entry.files.len(), "Folder removed from arena");
        Ok(true)
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn create_file(&self, data: &CreateFile) -> AppResult<Commit> {
        let now = Utc::now();
        let file = File {
            id: FileId::new(),
            folder_id: data.folder_id,
            name: data.name.clone(),
            content: data.content.clone(),
            created_at: now,
            updated_at: now,
        };
        let version = FileVersion {
            id: FileVersionId::new(),
            file_id: file.id,
            version_number: 1,
            content: data.content.clone(),
            created_at: now,
        };

        let mut arena = self.arena.write().await;
        let folder = arena
            .folders
            .get_mut(&data.folder_id)
            .ok_or_else(|| AppError::not_found(format!("Folder {} not found", data.folder_id)))?;
        folder.files.insert(
            file.id,
            FileEntry {
                file: file.clone(),
                versions: vec![version.clone()],
            },
        );
        arena.owners.insert(file.id, data.folder_id);

        Ok(Commit { file, version })
    }

    async fn find_file(&self, id: FileId) -> AppResult<Option<File>> {
        let arena = self.arena.read().await;
        Ok(arena.file(id).map(|e| e.file.clone()))
    }

    async fn list_files_in_folder(&self, folder_id: FolderId) -> AppResult<Vec<File>> {
        let arena = self.arena.read().await;
        let mut files: Vec<File> = arena
            .folders
            .get(&folder_id)
            .map(|f| f.files.values().map(|e| e.file.clone()).collect())
            .unwrap_or_default();
        files.sort_by(|a, b| a.name.cmp(&b.name).then(a.created_at.cmp(&b.created_at)));
        Ok(files)
    }

    async fn delete_file(&self, id: FileId) -> AppResult<bool> {
        let mut arena = self.arena.write().await;
        let Some(folder_id) = arena.owners.remove(&id) else {
            return Ok(false);
        };
        Ok(arena
            .folders
            .get_mut(&folder_id)
            .and_then(|f| f.files.remove(&id))
            .is_some())
    }

    async fn commit_content(
        &self,
        file_id: FileId,
        version_number: i32,
        content: &str,
    ) -> AppResult<Commit> {
        let mut arena = self.arena.write().await;
        let entry = arena
            .file_mut(file_id)
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))?;

        let current = entry.latest_number();
        if version_number != current + 1 {
            warn!(
                file_id = %file_id,
                expected = current + 1,
                requested = version_number,
                "Stale version number rejected"
            );
            return Err(AppError::conflict(format!(
                "File {file_id} is at version {current}; cannot write version {version_number}"
            )));
        }

        let now = Utc::now();
        let version = FileVersion {
            id: FileVersionId::new(),
            file_id,
            version_number,
            content: content.to_string(),
            created_at: now,
        };
        entry.versions.push(version.clone());
        entry.file.content = content.to_string();
        entry.file.updated_at = now;

        Ok(Commit {
            file: entry.file.clone(),
            version,
        })
    }
}

#[async_trait]
impl VersionStore for MemoryStore {
    async fn max_version_number(&self, file_id: FileId) -> AppResult<i32> {
        let arena = self.arena.read().await;
        Ok(arena.file(file_id).map_or(0, FileEntry::latest_number))
    }

    async fn list_versions(&self, file_id: FileId) -> AppResult<Vec<FileVersion>> {
        let arena = self.arena.read().await;
        Ok(arena
            .file(file_id)
            .map(|e| e.versions.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_version(
        &self,
        file_id: FileId,
        version_number: i32,
    ) -> AppResult<Option<FileVersion>> {
        let arena = self.arena.read().await;
        Ok(arena
            .file(file_id)
            .and_then(|e| e.versions.iter().find(|v| v.version_number == version_number))
            .cloned())
    }
}
