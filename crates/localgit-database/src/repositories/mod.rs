//! PostgreSQL repository implementations of the store traits.

pub mod file;
pub mod folder;
pub mod version;

pub use file::FileRepository;
pub use folder::FolderRepository;
pub use version::VersionRepository;
