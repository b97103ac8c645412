//! Local object store for student photos.
//!
//! Uploaded files are written under a configured directory with UUID-derived
//! names; the client-supplied filename is never trusted. Paths handed back to
//! clients are relative (`photos/<uuid>.<ext>`) and resolve to public URLs by
//! prefixing the configured URL prefix.

use std::path::{Path, PathBuf};

use regis_core::error::CoreError;
use uuid::Uuid;

/// A stored photo: the opaque storage path plus its public URL.
#[derive(Debug, Clone)]
pub struct StoredPhoto {
    pub path: String,
    pub public_url: String,
}

/// Filesystem-backed photo store.
#[derive(Debug)]
pub struct PhotoStore {
    root: PathBuf,
    url_prefix: String,
}

impl PhotoStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into(),
        }
    }

    /// Write photo bytes under a fresh UUID-derived name.
    ///
    /// The extension is derived from the validated MIME type, not from the
    /// upload's filename.
    pub async fn store(&self, bytes: &[u8], mime: &str) -> Result<StoredPhoto, CoreError> {
        let ext = extension_for_mime(mime);
        let name = format!("{}.{ext}", Uuid::new_v4());

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to create photo dir: {e}")))?;
        tokio::fs::write(self.root.join(&name), bytes)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to store photo: {e}")))?;

        Ok(StoredPhoto {
            public_url: self.public_url(&name),
            path: name,
        })
    }

    /// Remove a stored object by path. Returns `Ok(false)` if it was already
    /// gone. Paths that escape the store root are rejected.
    pub async fn remove(&self, path: &str) -> Result<bool, CoreError> {
        if !is_safe_path(path) {
            return Err(CoreError::Validation("Invalid photo path.".into()));
        }
        match tokio::fs::remove_file(self.root.join(path)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CoreError::Internal(format!("Failed to remove photo: {e}"))),
        }
    }

    /// Public URL for a stored path.
    pub fn public_url(&self, path: &str) -> String {
        format!("{}/{path}", self.url_prefix.trim_end_matches('/'))
    }

    /// Best-effort removal for cleanup paths where failure is logged, never
    /// surfaced (detach/replace/delete flows).
    pub async fn remove_quietly(&self, path: &str) {
        if let Err(e) = self.remove(path).await {
            tracing::warn!(path, error = %e, "Failed to remove stored photo");
        }
    }
}

/// Reject absolute paths and parent-directory traversal.
fn is_safe_path(path: &str) -> bool {
    let p = Path::new(path);
    !path.is_empty()
        && !p.is_absolute()
        && p.components()
            .all(|c| matches!(c, std::path::Component::Normal(_)))
}

fn extension_for_mime(mime: &str) -> &'static str {
    match mime.split(';').next().unwrap_or("").trim() {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsafe_paths_are_rejected() {
        assert!(!is_safe_path("../etc/passwd"));
        assert!(!is_safe_path("/etc/passwd"));
        assert!(!is_safe_path(""));
        assert!(is_safe_path("abc123.png"));
    }

    #[test]
    fn extension_follows_mime_not_filename() {
        assert_eq!(extension_for_mime("image/jpeg"), "jpg");
        assert_eq!(extension_for_mime("image/png; charset=binary"), "png");
        assert_eq!(extension_for_mime("application/pdf"), "bin");
    }

    #[test]
    fn public_url_joins_prefix_and_path() {
        let store = PhotoStore::new("/tmp/photos", "/static/photos/");
        assert_eq!(store.public_url("a.png"), "/static/photos/a.png");
    }

    #[tokio::test]
    async fn store_and_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(dir.path(), "/static/photos");

        let stored = store.store(b"fake-bytes", "image/png").await.unwrap();
        assert!(stored.path.ends_with(".png"));
        assert!(stored.public_url.starts_with("/static/photos/"));
        assert!(dir.path().join(&stored.path).exists());

        assert!(store.remove(&stored.path).await.unwrap());
        assert!(!store.remove(&stored.path).await.unwrap());
    }
}
