use std::fs;
use std::path::PathBuf;

use crate::error::{GalleryError, GalleryResult};

/// Image bytes on disk, addressed by generated keys like `<uuid>.png`.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>) -> GalleryResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(BlobStore { root })
    }

    /// Store an uploaded image and return its key. Empty or unrecognised
    /// payloads are rejected before anything touches the disk.
    pub fn put(&self, bytes: &[u8]) -> GalleryResult<String> {
        if bytes.is_empty() {
            return Err(GalleryError::validation("image payload is empty"));
        }
        let format = image::guess_format(bytes)
            .map_err(|_| GalleryError::validation("payload is not a supported image"))?;
        let ext = format.extensions_str().first().copied().unwrap_or("img");

        let key = format!("{}.{}", uuid::Uuid::new_v4(), ext);
        fs::write(self.root.join(&key), bytes)?;
        log::info!("Stored blob {} ({} bytes)", key, bytes.len());
        Ok(key)
    }

    pub fn path(&self, key: &str) -> Option<PathBuf> {
        if !is_valid_key(key) {
            return None;
        }
        let path = self.root.join(key);
        path.is_file().then_some(path)
    }

    pub fn serving_url(key: &str) -> String {
        format!("/view_art/{}", key)
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}
