//! Convenience result type alias for LocalGit.

use crate::error::AppError;

/// A specialized `Result` type for LocalGit operations.
pub type AppResult<T> = Result<T, AppError>;
