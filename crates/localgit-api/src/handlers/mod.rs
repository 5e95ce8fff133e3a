//! HTTP handlers, one module per resource.

pub mod file;
pub mod folder;
pub mod health;
