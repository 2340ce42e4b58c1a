use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::models::{RepositoryResult, UploadedImage};

/// On-disk image storage serving files under the `/images` URL prefix
pub struct DiskImageStore {
    root: PathBuf,
}

impl DiskImageStore {
    /// Open the store, creating the directory when missing
    pub async fn open(root: PathBuf) -> RepositoryResult<Self> {
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Directory the HTTP layer serves static files from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write one uploaded file under a collision-free name and return its
    /// public `/images/...` path
    #[instrument(skip(self, image), fields(original = %image.original_name))]
    pub async fn save(&self, image: &UploadedImage) -> RepositoryResult<String> {
        let filename = Self::unique_filename(&image.original_name);
        let path = self.root.join(&filename);
        tokio::fs::write(&path, &image.bytes).await?;
        debug!(filename, bytes = image.bytes.len(), "stored image");
        Ok(format!("/images/{filename}"))
    }

    /// Save all given images, returning their public paths in input order
    pub async fn save_all(&self, images: &[UploadedImage]) -> RepositoryResult<Vec<String>> {
        let mut paths = Vec::with_capacity(images.len());
        for image in images {
            paths.push(self.save(image).await?);
        }
        Ok(paths)
    }

    /// Sum the on-disk sizes of the given public paths, in bytes.
    ///
    /// Paths whose file is missing are skipped rather than failing the whole
    /// summary.
    pub async fn total_size(&self, public_paths: &[&str]) -> u64 {
        let mut total = 0;
        for public_path in public_paths {
            let Some(path) = self.resolve(public_path) else {
                warn!(path = public_path, "refusing image path outside the store");
                continue;
            };
            match tokio::fs::metadata(&path).await {
                Ok(metadata) => total += metadata.len(),
                Err(_) => debug!(path = public_path, "image file missing, skipping"),
            }
        }
        total
    }

    /// Map a public `/images/...` path back onto the storage directory,
    /// rejecting anything that would escape it
    fn resolve(&self, public_path: &str) -> Option<PathBuf> {
        let filename = public_path.strip_prefix("/images/")?;
        if filename.is_empty() || filename.contains('/') || filename.contains("..") {
            return None;
        }
        Some(self.root.join(filename))
    }

    fn unique_filename(original_name: &str) -> String {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("bin");
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "{}-{}.{}",
            Utc::now().timestamp_millis(),
            &suffix[..8],
            extension
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str, size: usize) -> UploadedImage {
        UploadedImage {
            original_name: name.to_string(),
            bytes: vec![1u8; size],
        }
    }

    #[tokio::test]
    async fn test_save_returns_public_path_and_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskImageStore::open(dir.path().to_path_buf()).await.unwrap();

        let path = store.save(&image("photo.jpg", 100)).await.unwrap();
        assert!(path.starts_with("/images/"));
        assert!(path.ends_with(".jpg"));

        let filename = path.strip_prefix("/images/").unwrap();
        let on_disk = std::fs::read(dir.path().join(filename)).unwrap();
        assert_eq!(on_disk.len(), 100);
    }

    #[tokio::test]
    async fn test_filenames_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskImageStore::open(dir.path().to_path_buf()).await.unwrap();

        let a = store.save(&image("a.png", 1)).await.unwrap();
        let b = store.save(&image("a.png", 1)).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_total_size_skips_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskImageStore::open(dir.path().to_path_buf()).await.unwrap();

        let stored = store.save(&image("a.jpg", 1024)).await.unwrap();
        let total = store.total_size(&[&stored, "/images/gone.jpg"]).await;
        assert_eq!(total, 1024);
    }

    #[tokio::test]
    async fn test_total_size_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskImageStore::open(dir.path().to_path_buf()).await.unwrap();

        assert_eq!(store.total_size(&["/images/../secret"]).await, 0);
        assert_eq!(store.total_size(&["/etc/passwd"]).await, 0);
    }

    #[tokio::test]
    async fn test_missing_extension_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskImageStore::open(dir.path().to_path_buf()).await.unwrap();

        let path = store.save(&image("noext", 1)).await.unwrap();
        assert!(path.ends_with(".bin"));
    }
}
