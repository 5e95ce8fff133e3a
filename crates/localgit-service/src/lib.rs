//! # localgit-service
//!
//! Business logic for LocalGit. Services are built against the store
//! traits from `localgit-database` and share dependencies through `Arc`.
//!
//! Every content-changing operation funnels through
//! [`VersionService::commit_with`], which holds the file's sequencer lock
//! while it reads the current maximum version, computes the next number,
//! and commits the new content.

pub mod diff;
pub mod file;
pub mod folder;
pub mod version;

pub use diff::DiffEngine;
pub use file::{ConflictService, FileService, MergeService};
pub use folder::FolderService;
pub use version::{VersionSequencer, VersionService};

#[cfg(test)]
pub(crate) mod testing {
    use localgit_database::Stores;
    use localgit_entity::file::{CreateFile, File};
    use localgit_entity::folder::{CreateFolder, Folder};

    /// A memory-backed store set holding one folder.
    pub async fn stores_with_folder() -> (Stores, Folder) {
        let stores = Stores::memory();
        let folder = stores
            .folders
            .create_folder(&CreateFolder {
                name: "workspace".to_string(),
            })
            .await
            .unwrap();
        (stores, folder)
    }

    /// Insert a file through the store, bypassing services.
    pub async fn seed_file(stores: &Stores, folder: &Folder, name: &str, content: &str) -> File {
        stores
            .files
            .create_file(&CreateFile {
                folder_id: folder.id,
                name: name.to_string(),
                content: content.to_string(),
            })
            .await
            .unwrap()
            .file
    }
}
