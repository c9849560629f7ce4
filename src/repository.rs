use std::sync::Arc;

use crate::cache::tags::TagIndex;
use crate::error::{GalleryError, GalleryResult};
use crate::models::art::{Art, ArtForm};
use crate::store::ArtStore;

/// Art records plus the tag index they feed. Every create/update goes through
/// here so the cached index picks up new tags.
#[derive(Clone)]
pub struct ArtRepository {
    store: Arc<dyn ArtStore>,
    tags: TagIndex,
}

impl ArtRepository {
    pub fn new(store: Arc<dyn ArtStore>, tags: TagIndex) -> Self {
        ArtRepository { store, tags }
    }

    pub fn store(&self) -> &Arc<dyn ArtStore> {
        &self.store
    }

    pub fn tag_index(&self) -> &TagIndex {
        &self.tags
    }

    pub fn create(
        &self,
        title: &str,
        image_key: &str,
        image_url: &str,
        tags: Vec<String>,
    ) -> GalleryResult<Art> {
        let form = ArtForm {
            title: title.to_string(),
            image_key: image_key.to_string(),
            image_url: image_url.to_string(),
            tags,
        };
        let id = self.store.art_create(&form)?;
        self.tags.merge_on_write(&form.tags)?;
        log::info!("Created art {} ({:?})", id, form.title);
        self.store.art_find_by_id(id)
    }

    pub fn get(&self, id: i64) -> GalleryResult<Art> {
        self.store.art_find_by_id(id)
    }

    pub fn update(&self, id: i64, title: &str, tags: &[String], score: f64) -> GalleryResult<()> {
        self.store.art_update(id, title, tags, score)?;
        self.tags.merge_on_write(tags)?;
        log::info!("Updated art {}", id);
        Ok(())
    }

    /// Read, add one, write back. Concurrent views can overwrite each other.
    pub fn increment_score(&self, id: i64) -> GalleryResult<f64> {
        let art = self.store.art_find_by_id(id)?;
        let score = art.score + 1.0;
        self.store.art_set_score(id, score)?;
        Ok(score)
    }

    pub fn reset_all_scores(&self) -> GalleryResult<usize> {
        let count = self.store.art_reset_scores()?;
        log::info!("Reset score of {} records", count);
        Ok(count)
    }

    pub fn list_all(&self) -> GalleryResult<Vec<Art>> {
        self.store.art_list_all()
    }
}

/// Path keys that are not record ids resolve to nothing.
pub fn parse_art_id(key: &str) -> GalleryResult<i64> {
    key.parse::<i64>().map_err(|_| GalleryError::NotFound)
}
