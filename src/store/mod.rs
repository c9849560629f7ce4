use crate::error::GalleryResult;
use crate::models::art::{Art, ArtForm, ScoreKey};

pub mod sqlite;

/// Data-access trait for art records. Everything above the store goes through here.
/// Implementation: `SqliteStore` (wraps rusqlite/r2d2).
pub trait ArtStore: Send + Sync {
    // ── Lifecycle ───────────────────────────────────────────────────
    fn run_migrations(&self) -> GalleryResult<()>;

    // ── Point lookup and scans ──────────────────────────────────────
    fn art_find_by_id(&self, id: i64) -> GalleryResult<Art>;
    fn art_list_all(&self) -> GalleryResult<Vec<Art>>;
    fn art_ids(&self) -> GalleryResult<Vec<i64>>;

    // ── Writes ──────────────────────────────────────────────────────
    fn art_create(&self, form: &ArtForm) -> GalleryResult<i64>;
    fn art_update(&self, id: i64, title: &str, tags: &[String], score: f64) -> GalleryResult<()>;
    fn art_set_score(&self, id: i64, score: f64) -> GalleryResult<()>;
    fn art_reset_scores(&self) -> GalleryResult<usize>;

    // ── Gallery queries ─────────────────────────────────────────────
    fn art_page_by_score(&self, after: Option<ScoreKey>, limit: i64) -> GalleryResult<Vec<Art>>;
    fn art_page_by_tag(
        &self,
        tag: &str,
        after_id: Option<i64>,
        limit: i64,
    ) -> GalleryResult<Vec<Art>>;
}
