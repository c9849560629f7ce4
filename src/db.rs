use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::error::GalleryResult;

pub type DbPool = Pool<SqliteConnectionManager>;

pub fn init_pool_at(path: &str) -> GalleryResult<DbPool> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let manager = SqliteConnectionManager::file(path);
    let pool = Pool::builder().max_size(10).build(manager)?;

    // WAL keeps gallery reads from blocking on admin writes
    let conn = pool.get()?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    Ok(pool)
}

pub fn run_migrations(pool: &DbPool) -> GalleryResult<()> {
    let conn = pool.get()?;

    conn.execute_batch(
        "
        -- Art records; tags_json keeps the ordered tag list as entered
        CREATE TABLE IF NOT EXISTS arts (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL DEFAULT '',
            image_key TEXT NOT NULL,
            image_url TEXT NOT NULL,
            tags_json TEXT NOT NULL DEFAULT '[]',
            score REAL NOT NULL DEFAULT 1,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        -- Tag membership, used for filtered gallery pages
        CREATE TABLE IF NOT EXISTS art_tags (
            art_id INTEGER NOT NULL,
            tag TEXT NOT NULL,
            UNIQUE(art_id, tag),
            FOREIGN KEY (art_id) REFERENCES arts(id)
        );

        CREATE INDEX IF NOT EXISTS idx_arts_score ON arts(score DESC, id);
        CREATE INDEX IF NOT EXISTS idx_art_tags_tag ON art_tags(tag, art_id);
        ",
    )?;

    Ok(())
}
