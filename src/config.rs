use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILE: &str = "gallery.toml";
pub const CONFIG_ENV: &str = "GALLERY_CONFIG";

/// Paths and limits read from `gallery.toml`. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub database_path: String,
    pub uploads_dir: String,
    pub templates_dir: String,
    pub static_dir: String,
    pub max_upload_mb: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            database_path: "website/db/gallery.db".to_string(),
            uploads_dir: "website/uploads".to_string(),
            templates_dir: "website/templates".to_string(),
            static_dir: "website/static".to_string(),
            max_upload_mb: 10,
        }
    }
}

impl GalleryConfig {
    /// Load from `$GALLERY_CONFIG` or `./gallery.toml`; a missing file means defaults.
    pub fn load() -> Result<Self, String> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| CONFIG_FILE.to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            log::info!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::parse(&raw).map_err(|e| format!("{}: {}", path.display(), e))
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb.max(1) * 1024 * 1024
    }
}
