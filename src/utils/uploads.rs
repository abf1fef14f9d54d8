use bytes::Bytes;
use std::path::Path as StdPath;
use tokio::fs;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Opaque blob store over a local uploads directory. Stored blobs are keyed
/// by the relative path returned from `save`; swapping a user's file is
/// save-new-then-remove-old, with removal best-effort.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: String,
}

pub const IMAGE_EXTS: &[&str] = &["jpg", "jpeg", "png", "webp"];
pub const RESUME_EXTS: &[&str] = &["pdf", "doc", "docx", "txt", "rtf"];

impl BlobStore {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    pub async fn save(
        &self,
        subdir: &str,
        filename: &str,
        allowed_exts: &[&str],
        data: &Bytes,
    ) -> Result<String> {
        let ext = StdPath::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_else(|| "bin".to_string());

        if !allowed_exts.contains(&ext.as_str()) {
            return Err(Error::BadRequest(format!(
                "File type .{} is not allowed",
                ext
            )));
        }

        if ext == "pdf" && !data.starts_with(b"%PDF") {
            return Err(Error::BadRequest("Invalid PDF file content".into()));
        }
        if (ext == "jpg" || ext == "jpeg") && !data.starts_with(&[0xFF, 0xD8]) {
            return Err(Error::BadRequest("Invalid JPEG file content".into()));
        }
        if ext == "png" && !data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Err(Error::BadRequest("Invalid PNG file content".into()));
        }

        let dir = format!("{}/{}", self.root, subdir);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| Error::Internal(e.to_string()))?;

        let file_id = Uuid::new_v4();
        let file_path = format!("{}/{}.{}", dir, file_id, ext);

        fs::write(&file_path, data).await.map_err(|e| {
            tracing::error!("Failed to write uploaded file: {}", e);
            Error::Internal(e.to_string())
        })?;

        Ok(file_path)
    }

    /// Best-effort removal of a superseded blob. Failure is logged, never
    /// surfaced to the caller.
    pub async fn remove(&self, path: &str) {
        if let Err(e) = fs::remove_file(path).await {
            tracing::warn!(path, "Failed to remove stale upload: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_disallowed_extension() {
        let store = BlobStore::new("./target/test-uploads");
        let err = store
            .save("cv", "malware.exe", RESUME_EXTS, &Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[tokio::test]
    async fn rejects_mismatched_magic_bytes() {
        let store = BlobStore::new("./target/test-uploads");
        let err = store
            .save("cv", "resume.pdf", RESUME_EXTS, &Bytes::from_static(b"plain text"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[tokio::test]
    async fn saves_and_removes_a_valid_file() {
        let store = BlobStore::new("./target/test-uploads");
        let path = store
            .save(
                "cv",
                "resume.pdf",
                RESUME_EXTS,
                &Bytes::from_static(b"%PDF-1.4 fake"),
            )
            .await
            .unwrap();
        assert!(tokio::fs::metadata(&path).await.is_ok());
        store.remove(&path).await;
        assert!(tokio::fs::metadata(&path).await.is_err());
    }
}
