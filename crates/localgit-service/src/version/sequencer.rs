//! Per-file version numbering.
//!
//! The next number is always `max + 1`. Callers hold the guard returned by
//! [`VersionSequencer::lock`] from the moment they read the maximum until
//! the new version is committed, so two writers in this process can never
//! compute the same number. Writers in other processes are caught by the
//! store's compare-and-swap and surface as `Conflict`.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use localgit_core::result::AppResult;
use localgit_core::types::FileId;
use localgit_database::VersionStore;

/// Assigns version numbers and serializes writers per file.
#[derive(Debug)]
pub struct VersionSequencer {
    versions: Arc<dyn VersionStore>,
    locks: DashMap<FileId, Arc<Mutex<()>>>,
}

impl VersionSequencer {
    /// Creates a sequencer reading maxima from `versions`.
    pub fn new(versions: Arc<dyn VersionStore>) -> Self {
        Self {
            versions,
            locks: DashMap::new(),
        }
    }

    /// Waits for exclusive write access to `file_id`.
    pub async fn lock(&self, file_id: FileId) -> OwnedMutexGuard<()> {
        let mutex = self.locks.entry(file_id).or_default().clone();
        mutex.lock_owned().await
    }

    /// The number the next version of `file_id` must carry.
    ///
    /// Only meaningful while the caller holds the guard from [`Self::lock`].
    pub async fn next_number(&self, file_id: FileId) -> AppResult<i32> {
        let current = self.versions.max_version_number(file_id).await?;
        debug!(file_id = %file_id, current, "Computed next version number");
        Ok(current + 1)
    }

    /// Drops the lock entry of a deleted file.
    pub fn release(&self, file_id: FileId) {
        self.locks.remove(&file_id);
    }

    /// Drops the lock entry of a file that turned out not to exist, unless
    /// another writer still holds or waits on it.
    ///
    /// Call after the guard from [`Self::lock`] has been dropped.
    pub fn discard_idle(&self, file_id: FileId) {
        self.locks
            .remove_if(&file_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }

    /// Number of files with a lock entry.
    pub fn tracked_files(&self) -> usize {
        self.locks.len()
    }
}
