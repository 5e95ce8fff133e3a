//! Typed path parameter helpers.

use std::str::FromStr;

use localgit_core::error::AppError;

use crate::error::ApiError;

/// Parses an identifier from a path segment.
pub fn parse_id<T: FromStr>(s: &str) -> Result<T, ApiError> {
    s.parse::<T>()
        .map_err(|_| AppError::validation(format!("Invalid identifier: {s}")).into())
}

#[cfg(test)]
mod tests {
    use localgit_core::types::FileId;

    use super::*;

    #[test]
    fn test_parse_id() {
        let id = FileId::new();
        assert_eq!(parse_id::<FileId>(&id.to_string()).unwrap(), id);
        assert!(parse_id::<FileId>("not-a-uuid").is_err());
        assert!(parse_id::<i32>("7").is_ok());
    }
}
