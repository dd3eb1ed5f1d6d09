//! Client-side file validation, run before any network phase.

use crate::error::UploadError;
use crate::types::UploadSource;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Reject unsupported or oversized files without touching the network.
pub fn validate(source: &UploadSource) -> Result<(), UploadError> {
    let content_type = source.content_type.to_ascii_lowercase();
    if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
        return Err(UploadError::Validation("unsupported image type"));
    }
    if source.bytes.is_empty() {
        return Err(UploadError::Validation("empty file"));
    }
    if source.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(UploadError::Validation("file exceeds 5 MiB"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn source(content_type: &str, len: usize) -> UploadSource {
        UploadSource {
            content_type: content_type.to_string(),
            bytes: Bytes::from(vec![0u8; len]),
        }
    }

    #[test]
    fn accepts_supported_image_types() {
        for content_type in ["image/jpeg", "image/jpg", "image/png", "IMAGE/PNG"] {
            assert!(validate(&source(content_type, 16)).is_ok(), "{content_type}");
        }
    }

    #[test]
    fn rejects_other_types() {
        for content_type in ["image/gif", "application/pdf", "text/plain", ""] {
            assert!(validate(&source(content_type, 16)).is_err(), "{content_type}");
        }
    }

    #[test]
    fn rejects_empty_and_oversized_files() {
        assert!(validate(&source("image/png", 0)).is_err());
        assert!(validate(&source("image/png", MAX_UPLOAD_BYTES)).is_ok());
        assert!(validate(&source("image/png", MAX_UPLOAD_BYTES + 1)).is_err());
    }
}
