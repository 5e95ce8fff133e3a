//! HTTP-level integration tests against the in-memory backend.

mod file_test;
mod folder_test;
mod helpers;
