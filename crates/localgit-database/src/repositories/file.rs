//! File repository implementation.
//!
//! Every write that touches `files.content` also inserts the matching
//! `file_versions` row inside the same transaction.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::warn;
use uuid::Uuid;

use localgit_core::error::{AppError, ErrorKind};
use localgit_core::result::AppResult;
use localgit_core::types::{FileId, FileVersionId, FolderId};
use localgit_entity::file::{Commit, CreateFile, File, FileVersion};

use crate::store::FileStore;

const VERSION_NUMBER_KEY: &str = "file_versions_file_id_version_number_key";

/// Repository for file CRUD and content commits.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    async fn insert_version(
        tx: &mut Transaction<'static, Postgres>,
        file_id: FileId,
        version_number: i32,
        content: &str,
    ) -> AppResult<FileVersion> {
        sqlx::query_as::<_, FileVersion>(
            "INSERT INTO file_versions (id, file_id, version_number, content) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(FileVersionId::new())
        .bind(file_id)
        .bind(version_number)
        .bind(content)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(VERSION_NUMBER_KEY) => {
                warn!(file_id = %file_id, version = version_number, "Version number already taken");
                AppError::conflict(format!(
                    "Version {version_number} of file {file_id} was written concurrently"
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create file version", e),
        })
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn create_file(&self, data: &CreateFile) -> AppResult<Commit> {
        let mut tx = self.begin().await?;

        // Holds the folder in place until the file row is committed.
        let folder: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM folders WHERE id = $1 FOR SHARE")
                .bind(data.folder_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to find folder", e)
                })?;
        if folder.is_none() {
            return Err(AppError::not_found(format!(
                "Folder {} not found",
                data.folder_id
            )));
        }

        let file = sqlx::query_as::<_, File>(
            "INSERT INTO files (id, folder_id, name, content) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(FileId::new())
        .bind(data.folder_id)
        .bind(&data.name)
        .bind(&data.content)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))?;

        let version = Self::insert_version(&mut tx, file.id, 1, &data.content).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit new file", e)
        })?;

        Ok(Commit { file, version })
    }

    async fn find_file(&self, id: FileId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn list_files_in_folder(&self, folder_id: FolderId) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE folder_id = $1 ORDER BY name ASC, created_at ASC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn delete_file(&self, id: FileId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn commit_content(
        &self,
        file_id: FileId,
        version_number: i32,
        content: &str,
    ) -> AppResult<Commit> {
        let mut tx = self.begin().await?;

        // The row lock serializes writers to this file across processes.
        let locked: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM files WHERE id = $1 FOR UPDATE")
                .bind(file_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock file", e))?;
        if locked.is_none() {
            return Err(AppError::not_found(format!("File {file_id} not found")));
        }

        let current: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(version_number), 0) FROM file_versions WHERE file_id = $1",
        )
        .bind(file_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read latest version", e)
        })?;

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

        let version = Self::insert_version(&mut tx, file_id, version_number, content).await?;

        let file = sqlx::query_as::<_, File>(
            "UPDATE files SET content = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(file_id)
        .bind(content)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update file", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit file content", e)
        })?;

        Ok(Commit { file, version })
    }
}
