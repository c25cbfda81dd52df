//! Pre-dispatch validation.
//!
//! Each record is validated right before its backend call, so a file that
//! vanished or bad options become a per-record error instead of failing the
//! whole batch.

use std::path::Path;
use tokio::fs;

use crate::core::FileRecord;
use crate::utils::{OptimizerResult, ValidationError};

/// Validates a record's source path and options before dispatch.
pub async fn validate_record(record: &FileRecord) -> OptimizerResult<()> {
    validate_source_path(&record.path).await?;
    if record.kind.is_image() {
        validate_quality(record.options.quality)?;
    }
    Ok(())
}

/// Validates that the source file still exists and is a regular file.
pub async fn validate_source_path(path: &Path) -> OptimizerResult<()> {
    let meta = fs::metadata(path)
        .await
        .map_err(|_| ValidationError::path_not_found(path))?;

    if !meta.is_file() {
        return Err(ValidationError::not_a_file(path).into());
    }
    Ok(())
}

/// Validates a re-encode quality value.
pub fn validate_quality(quality: u8) -> OptimizerResult<()> {
    if quality == 0 || quality > 100 {
        return Err(ValidationError::options(format!(
            "Invalid quality value: {}. Must be between 1 and 100",
            quality
        ))
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::FileKind;

    #[test]
    fn quality_bounds() {
        assert!(validate_quality(0).is_err());
        assert!(validate_quality(101).is_err());
        assert!(validate_quality(1).is_ok());
        assert!(validate_quality(100).is_ok());
    }

    #[tokio::test]
    async fn missing_source_is_invalid() {
        let record = FileRecord::new("/nope/gone.js", FileKind::Js, 1);
        assert!(validate_record(&record).await.is_err());
    }

    #[tokio::test]
    async fn existing_source_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.js");
        std::fs::write(&path, b"1").unwrap();

        let record = FileRecord::new(&path, FileKind::Js, 1);
        assert!(validate_record(&record).await.is_ok());
    }
}
