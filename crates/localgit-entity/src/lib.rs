//! # localgit-entity
//!
//! Domain entity models for LocalGit. Every struct in this crate represents
//! a database row or the input needed to create one. Row types derive
//! `sqlx::FromRow` so the PostgreSQL store can decode them directly.

pub mod file;
pub mod folder;
