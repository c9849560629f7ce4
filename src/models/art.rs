use rusqlite::{params, Connection, Row};
use serde::Serialize;

use crate::db::DbPool;
use crate::error::GalleryResult;

pub const INITIAL_SCORE: f64 = 1.0;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Art {
    pub id: i64,
    pub title: String,
    pub image_key: String,
    pub image_url: String,
    pub tags: Vec<String>,
    pub score: f64,
}

/// Fields supplied when a new record is uploaded.
#[derive(Debug, Clone)]
pub struct ArtForm {
    pub title: String,
    pub image_key: String,
    pub image_url: String,
    pub tags: Vec<String>,
}

/// Resume position for score-ordered scans: strictly after this (score, id).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreKey {
    pub score: f64,
    pub id: i64,
}

impl Art {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let tags_raw: String = row.get("tags_json")?;
        Ok(Art {
            id: row.get("id")?,
            title: row.get("title")?,
            image_key: row.get("image_key")?,
            image_url: row.get("image_url")?,
            tags: serde_json::from_str(&tags_raw).unwrap_or_default(),
            score: row.get("score")?,
        })
    }

    pub fn find_by_id(pool: &DbPool, id: i64) -> GalleryResult<Self> {
        let conn = pool.get()?;
        Ok(conn.query_row(
            "SELECT * FROM arts WHERE id = ?1",
            params![id],
            Self::from_row,
        )?)
    }

    pub fn list_all(pool: &DbPool) -> GalleryResult<Vec<Self>> {
        let conn = pool.get()?;
        let mut stmt = conn.prepare("SELECT * FROM arts")?;
        let rows = stmt.query_map([], Self::from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn ids(pool: &DbPool) -> GalleryResult<Vec<i64>> {
        let conn = pool.get()?;
        let mut stmt = conn.prepare("SELECT id FROM arts")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<i64>>>()?)
    }

    pub fn create(pool: &DbPool, form: &ArtForm) -> GalleryResult<i64> {
        let mut conn = pool.get()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO arts (title, image_key, image_url, tags_json, score)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                form.title,
                form.image_key,
                form.image_url,
                serde_json::to_string(&form.tags)?,
                INITIAL_SCORE,
            ],
        )?;
        let id = tx.last_insert_rowid();
        write_tag_rows(&tx, id, &form.tags)?;

        tx.commit()?;
        Ok(id)
    }

    /// Overwrites title, tags and score. Errors with `NotFound` if `id` is unknown.
    pub fn update(
        pool: &DbPool,
        id: i64,
        title: &str,
        tags: &[String],
        score: f64,
    ) -> GalleryResult<()> {
        let mut conn = pool.get()?;
        let tx = conn.transaction()?;

        let changed = tx.execute(
            "UPDATE arts SET title = ?1, tags_json = ?2, score = ?3 WHERE id = ?4",
            params![title, serde_json::to_string(tags)?, score, id],
        )?;
        if changed == 0 {
            return Err(rusqlite::Error::QueryReturnedNoRows.into());
        }
        tx.execute("DELETE FROM art_tags WHERE art_id = ?1", params![id])?;
        write_tag_rows(&tx, id, tags)?;

        tx.commit()?;
        Ok(())
    }

    pub fn set_score(pool: &DbPool, id: i64, score: f64) -> GalleryResult<()> {
        let conn = pool.get()?;
        let changed = conn.execute(
            "UPDATE arts SET score = ?1 WHERE id = ?2",
            params![score, id],
        )?;
        if changed == 0 {
            return Err(rusqlite::Error::QueryReturnedNoRows.into());
        }
        Ok(())
    }

    pub fn reset_scores(pool: &DbPool) -> GalleryResult<usize> {
        let conn = pool.get()?;
        Ok(conn.execute("UPDATE arts SET score = ?1", params![INITIAL_SCORE])?)
    }

    /// Highest score first; ties broken by ascending id so positions are total.
    pub fn page_by_score(
        pool: &DbPool,
        after: Option<ScoreKey>,
        limit: i64,
    ) -> GalleryResult<Vec<Self>> {
        let conn = pool.get()?;
        let rows = match after {
            Some(key) => {
                let mut stmt = conn.prepare(
                    "SELECT * FROM arts
                     WHERE score < ?1 OR (score = ?1 AND id > ?2)
                     ORDER BY score DESC, id ASC LIMIT ?3",
                )?;
                let rows = stmt.query_map(params![key.score, key.id, limit], Self::from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt =
                    conn.prepare("SELECT * FROM arts ORDER BY score DESC, id ASC LIMIT ?1")?;
                let rows = stmt.query_map(params![limit], Self::from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };
        Ok(rows)
    }

    pub fn page_by_tag(
        pool: &DbPool,
        tag: &str,
        after_id: Option<i64>,
        limit: i64,
    ) -> GalleryResult<Vec<Self>> {
        let conn = pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT a.* FROM arts a
             JOIN art_tags t ON t.art_id = a.id
             WHERE t.tag = ?1 AND a.id > ?2
             ORDER BY a.id ASC LIMIT ?3",
        )?;
        let rows = stmt.query_map(params![tag, after_id.unwrap_or(0), limit], Self::from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

fn write_tag_rows(conn: &Connection, art_id: i64, tags: &[String]) -> rusqlite::Result<()> {
    for tag in tags {
        conn.execute(
            "INSERT OR IGNORE INTO art_tags (art_id, tag) VALUES (?1, ?2)",
            params![art_id, tag],
        )?;
    }
    Ok(())
}
