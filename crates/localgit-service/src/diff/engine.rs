//! Diffs between two stored versions of a file.

use tracing::debug;

use localgit_core::result::AppResult;
use localgit_core::types::FileId;

use super::unified::unified_diff;
use crate::version::VersionService;

/// Computes unified diffs between versions of the same file.
#[derive(Debug, Clone)]
pub struct DiffEngine {
    versions: VersionService,
}

impl DiffEngine {
    /// Creates a diff engine reading through `versions`.
    pub fn new(versions: VersionService) -> Self {
        Self { versions }
    }

    /// Diff from version `from` to version `to` of `file_id`, sides
    /// labeled `v{from}` and `v{to}`.
    ///
    /// Fails with `NotFound` if either version does not exist.
    pub async fn diff(&self, file_id: FileId, from: i32, to: i32) -> AppResult<Vec<String>> {
        let old = self.versions.get_by_number(file_id, from).await?;
        let new = self.versions.get_by_number(file_id, to).await?;

        let lines = unified_diff(
            &format!("v{from}"),
            &format!("v{to}"),
            &old.content,
            &new.content,
        );
        debug!(file_id = %file_id, from, to, lines = lines.len(), "Diff computed");
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{seed_file, stores_with_folder};

    #[tokio::test]
    async fn test_diff_between_versions() {
        let (stores, folder) = stores_with_folder().await;
        let file = seed_file(&stores, &folder, "abc.txt", "a\nb\nc").await;
        let versions = VersionService::new(&stores);
        versions.append(file.id, "a\nx\nc").await.unwrap();
        let engine = DiffEngine::new(versions);

        let diff = engine.diff(file.id, 1, 2).await.unwrap();
        assert_eq!(diff, vec!["--- v1", "+++ v2", "@@ -2,1 +2,1 @@", "-b", "+x"]);
    }

    #[tokio::test]
    async fn test_self_diff_is_empty() {
        let (stores, folder) = stores_with_folder().await;
        let file = seed_file(&stores, &folder, "same.txt", "a\nb").await;
        let engine = DiffEngine::new(VersionService::new(&stores));

        assert!(engine.diff(file.id, 1, 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_version() {
        let (stores, folder) = stores_with_folder().await;
        let file = seed_file(&stores, &folder, "one.txt", "a").await;
        let engine = DiffEngine::new(VersionService::new(&stores));

        assert!(engine.diff(file.id, 1, 2).await.unwrap_err().is_not_found());
        assert!(engine.diff(file.id, 0, 1).await.unwrap_err().is_not_found());
        assert!(engine.diff(FileId::new(), 1, 1).await.unwrap_err().is_not_found());
    }
}
