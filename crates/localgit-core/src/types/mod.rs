//! Core type definitions used across the LocalGit workspace.

pub mod id;

pub use id::*;
