//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use localgit_core::config::AppConfig;
use localgit_database::Stores;
use localgit_service::{
    ConflictService, DiffEngine, FileService, FolderService, MergeService, VersionService,
};

/// Shared application state, cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// When the state was built.
    pub started_at: Instant,
    /// Folder service.
    pub folder_service: Arc<FolderService>,
    /// File service.
    pub file_service: Arc<FileService>,
    /// Version service.
    pub version_service: Arc<VersionService>,
    /// Diff engine.
    pub diff_engine: Arc<DiffEngine>,
    /// Merge service.
    pub merge_service: Arc<MergeService>,
    /// Conflict service.
    pub conflict_service: Arc<ConflictService>,
}

impl AppState {
    /// Wires every service against `stores`.
    ///
    /// All services share one version sequencer, so writers from any
    /// endpoint are serialized per file.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let versions = VersionService::new(&stores);

        let folder_service = FolderService::new(
            stores.folders.clone(),
            stores.files.clone(),
            Arc::clone(versions.sequencer()),
        );
        let file_service = FileService::new(
            stores.files.clone(),
            stores.folders.clone(),
            versions.clone(),
        );
        let merge_service = MergeService::new(stores.files.clone(), versions.clone());
        let conflict_service = ConflictService::new(versions.clone());
        let diff_engine = DiffEngine::new(versions.clone());

        Self {
            config: Arc::new(config),
            started_at: Instant::now(),
            folder_service: Arc::new(folder_service),
            file_service: Arc::new(file_service),
            version_service: Arc::new(versions),
            diff_engine: Arc::new(diff_engine),
            merge_service: Arc::new(merge_service),
            conflict_service: Arc::new(conflict_service),
        }
    }
}
