//! # localgit-database
//!
//! Persistence for LocalGit. Defines the store traits the services depend
//! on and provides two implementations: PostgreSQL repositories built on
//! sqlx, and a process-local arena used for development and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{FileStore, FolderStore, Stores, VersionStore};
