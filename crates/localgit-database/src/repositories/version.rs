//! Version log queries.

use async_trait::async_trait;
use sqlx::PgPool;

use localgit_core::error::{AppError, ErrorKind};
use localgit_core::result::AppResult;
use localgit_core::types::FileId;
use localgit_entity::file::FileVersion;

use crate::store::VersionStore;

/// Read-only repository over `file_versions`.
#[derive(Debug, Clone)]
pub struct VersionRepository {
    pool: PgPool,
}

impl VersionRepository {
    /// Create a new version repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VersionStore for VersionRepository {
    async fn max_version_number(&self, file_id: FileId) -> AppResult<i32> {
        sqlx::query_scalar(
            "SELECT COALESCE(MAX(version_number), 0) FROM file_versions WHERE file_id = $1",
        )
        .bind(file_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read latest version", e))
    }

    async fn list_versions(&self, file_id: FileId) -> AppResult<Vec<FileVersion>> {
        sqlx::query_as::<_, FileVersion>(
            "SELECT * FROM file_versions WHERE file_id = $1 ORDER BY version_number DESC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list file versions", e))
    }

    async fn find_version(
        &self,
        file_id: FileId,
        version_number: i32,
    ) -> AppResult<Option<FileVersion>> {
        sqlx::query_as::<_, FileVersion>(
            "SELECT * FROM file_versions WHERE file_id = $1 AND version_number = $2",
        )
        .bind(file_id)
        .bind(version_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file version", e))
    }
}
