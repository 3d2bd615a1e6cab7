//! Expired-id list loader.
//!
//! The source is a text stream of comma-separated integers, optionally
//! surrounded by whitespace. Unlike the numeric fields inside invoice
//! records, this list gets no OCR normalization and no silent recovery: any
//! non-integer token (including an empty one, and therefore an empty file)
//! is a fatal parse error.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{ExtractError, ExtractResult};

/// Load the expired-id set from a file.
pub fn load_expired_from_path(path: impl AsRef<Path>) -> ExtractResult<HashSet<i64>> {
    let text = fs::read_to_string(path)?;
    load_expired_from_str(&text)
}

/// Load the expired-id set from an in-memory string.
pub fn load_expired_from_str(input: &str) -> ExtractResult<HashSet<i64>> {
    let mut ids = HashSet::new();
    for token in input.trim().split(',') {
        let token = token.trim();
        let id = token
            .parse::<i64>()
            .map_err(|e| ExtractError::ExpiredList {
                token: token.to_string(),
                message: e.to_string(),
            })?;
        ids.insert(id);
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::load_expired_from_str;

    #[test]
    fn parses_comma_separated_ids_with_whitespace() {
        let ids = load_expired_from_str(" 1, 2 ,3,1\n").unwrap();
        assert_eq!(ids, HashSet::from([1, 2, 3]));
    }

    #[test]
    fn single_id() {
        assert_eq!(load_expired_from_str("42").unwrap(), HashSet::from([42]));
    }

    #[test]
    fn garbage_token_is_fatal() {
        let err = load_expired_from_str("1,two,3").unwrap_err();
        assert!(err.to_string().contains("token 'two'"));
    }

    #[test]
    fn trailing_comma_is_fatal() {
        assert!(load_expired_from_str("1,2,").is_err());
    }

    #[test]
    fn empty_input_is_fatal() {
        assert!(load_expired_from_str("").is_err());
        assert!(load_expired_from_str("  \n").is_err());
    }
}
