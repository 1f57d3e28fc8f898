use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Blob storage on local disk, served back under `/uploads/`.
///
/// The application only needs "store bytes, get a URL back"; swapping in an
/// object store means reimplementing these three methods.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
    public_base: String,
}

/// Result of storing a blob.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    /// File name under the upload root, unique per upload.
    pub storage_id: String,
    /// Public URL the blob is served at.
    pub url: String,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>, public_base: &str) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Write a blob to disk under a unique name and resolve its public URL.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> std::io::Result<StoredBlob> {
        let storage_id = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(original_name));
        tokio::fs::write(self.root.join(&storage_id), bytes).await?;
        let url = format!("{}/uploads/{}", self.public_base, storage_id);
        Ok(StoredBlob { storage_id, url })
    }

    /// Remove a stored blob. Callers treat failures as best-effort.
    pub async fn remove(&self, storage_id: &str) -> std::io::Result<()> {
        tokio::fs::remove_file(self.root.join(storage_id)).await
    }

    /// Extract the storage id from a public URL previously returned by
    /// [`store`], if it points into this store.
    pub fn storage_id_from_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.rsplit_once("/uploads/")
            .map(|(_, id)| id)
            .filter(|id| !id.is_empty() && !id.contains('/'))
    }
}

/// Keep alphanumerics, dots, hyphens and underscores; everything else
/// becomes a hyphen so client-supplied names cannot escape the upload dir.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '-');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(sanitize_file_name("photo.jpg"), "photo.jpg");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "etc-passwd");
        assert_eq!(sanitize_file_name("été à l'école.png"), "t----l--cole.png");
        assert_eq!(sanitize_file_name("..."), "file");
    }

    #[test]
    fn storage_id_round_trips_through_url() {
        let store = LocalStorage::new("/tmp/uploads", "http://localhost:3030/");
        assert_eq!(
            store.storage_id_from_url("http://localhost:3030/uploads/abc-photo.jpg"),
            Some("abc-photo.jpg")
        );
        assert_eq!(store.storage_id_from_url("http://elsewhere/img.jpg"), None);
    }

    #[tokio::test]
    async fn store_and_remove_blob() {
        let dir = std::env::temp_dir().join(format!("ecole-storage-{}", Uuid::new_v4()));
        let store = LocalStorage::new(&dir, "http://localhost:3030");
        store.ensure_root().await.unwrap();

        let blob = store.store("hello.txt", b"bonjour").await.unwrap();
        assert!(blob.url.ends_with(&blob.storage_id));
        assert_eq!(
            tokio::fs::read(dir.join(&blob.storage_id)).await.unwrap(),
            b"bonjour"
        );

        store.remove(&blob.storage_id).await.unwrap();
        assert!(!dir.join(&blob.storage_id).exists());
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
