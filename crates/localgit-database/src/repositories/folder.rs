//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use localgit_core::error::{AppError, ErrorKind};
use localgit_core::result::AppResult;
use localgit_core::types::FolderId;
use localgit_entity::folder::{CreateFolder, Folder};

use crate::store::FolderStore;

/// Repository for folder CRUD.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn create_folder(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>("INSERT INTO folders (id, name) VALUES ($1, $2) RETURNING *")
            .bind(FolderId::new())
            .bind(&data.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))
    }

    async fn find_folder(&self, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn list_folders(&self) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders ORDER BY created_at ASC, name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    async fn rename_folder(&self, id: FolderId, name: &str) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename folder", e))?
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    /// Files and versions go with it through `ON DELETE CASCADE`.
    async fn delete_folder(&self, id: FolderId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
