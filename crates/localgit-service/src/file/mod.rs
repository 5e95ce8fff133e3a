//! File services: CRUD, merge, and conflict resolution.

pub mod conflict;
pub mod merge;
pub mod service;

pub use conflict::ConflictService;
pub use merge::{MergeService, merge_content};
pub use service::FileService;
