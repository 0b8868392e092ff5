//! Shared key validation for storage backends.

use crate::{StorageError, StorageResult};

/// Reject keys that are empty, absolute, use `\` separators, or contain `..`
/// segments.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }

    if storage_key.starts_with('/') || storage_key.contains('\\') {
        return Err(StorageError::InvalidKey(format!(
            "Storage key must be a relative '/'-separated path: {}",
            storage_key
        )));
    }

    if storage_key.split('/').any(|segment| segment == ".." || segment.is_empty()) {
        return Err(StorageError::InvalidKey(format!(
            "Storage key contains invalid segments: {}",
            storage_key
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_nested_relative_keys() {
        assert!(validate_key("shoe.glb").is_ok());
        assert!(validate_key("models/oxford/shoe.glb").is_ok());
        assert!(validate_key("models/..hidden.glb").is_ok());
    }

    #[test]
    fn rejects_traversal_and_absolute_keys() {
        for key in ["", "/etc/passwd", "../secret", "models/../../x", "a//b", "a\\b"] {
            assert!(
                matches!(validate_key(key), Err(StorageError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }
}
