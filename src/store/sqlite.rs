use crate::db::DbPool;
use crate::error::GalleryResult;
use crate::models::art::{Art, ArtForm, ScoreKey};

use super::ArtStore;

/// SQLite-backed implementation of the ArtStore trait.
/// Wraps the r2d2 connection pool and delegates to model methods.
pub struct SqliteStore {
    pub pool: DbPool,
}

impl SqliteStore {
    pub fn new_at(path: &str) -> GalleryResult<Self> {
        let pool = crate::db::init_pool_at(path)?;
        Ok(Self { pool })
    }
}

impl ArtStore for SqliteStore {
    // ── Lifecycle ───────────────────────────────────────────────────

    fn run_migrations(&self) -> GalleryResult<()> {
        crate::db::run_migrations(&self.pool)
    }

    // ── Point lookup and scans ──────────────────────────────────────

    fn art_find_by_id(&self, id: i64) -> GalleryResult<Art> {
        Art::find_by_id(&self.pool, id)
    }

    fn art_list_all(&self) -> GalleryResult<Vec<Art>> {
        Art::list_all(&self.pool)
    }

    fn art_ids(&self) -> GalleryResult<Vec<i64>> {
        Art::ids(&self.pool)
    }

    // ── Writes ──────────────────────────────────────────────────────

    fn art_create(&self, form: &ArtForm) -> GalleryResult<i64> {
        Art::create(&self.pool, form)
    }

    fn art_update(&self, id: i64, title: &str, tags: &[String], score: f64) -> GalleryResult<()> {
        Art::update(&self.pool, id, title, tags, score)
    }

    fn art_set_score(&self, id: i64, score: f64) -> GalleryResult<()> {
        Art::set_score(&self.pool, id, score)
    }

    fn art_reset_scores(&self) -> GalleryResult<usize> {
        Art::reset_scores(&self.pool)
    }

    // ── Gallery queries ─────────────────────────────────────────────

    fn art_page_by_score(&self, after: Option<ScoreKey>, limit: i64) -> GalleryResult<Vec<Art>> {
        Art::page_by_score(&self.pool, after, limit)
    }

    fn art_page_by_tag(
        &self,
        tag: &str,
        after_id: Option<i64>,
        limit: i64,
    ) -> GalleryResult<Vec<Art>> {
        Art::page_by_tag(&self.pool, tag, after_id, limit)
    }
}
