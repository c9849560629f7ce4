use crate::blobs::BlobStore;
use crate::error::{GalleryError, GalleryResult};
use crate::models::art::Art;
use crate::repository::ArtRepository;

pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Scores must be finite and non-negative.
pub fn parse_score(raw: &str) -> GalleryResult<f64> {
    let score: f64 = raw
        .trim()
        .parse()
        .map_err(|_| GalleryError::validation(format!("score {:?} is not a number", raw)))?;
    if !score.is_finite() || score < 0.0 {
        return Err(GalleryError::validation(format!(
            "score {} must be a finite, non-negative number",
            score
        )));
    }
    Ok(score)
}

/// Store the image, then create its record. A failed create leaves the blob behind.
pub fn upload(
    repo: &ArtRepository,
    blobs: &BlobStore,
    title: &str,
    image: &[u8],
    raw_tags: &str,
) -> GalleryResult<Art> {
    let key = blobs.put(image)?;
    repo.create(title, &key, &BlobStore::serving_url(&key), split_tags(raw_tags))
}

pub fn modify(
    repo: &ArtRepository,
    id: i64,
    title: &str,
    raw_tags: &str,
    raw_score: &str,
) -> GalleryResult<()> {
    let score = parse_score(raw_score)?;
    repo.update(id, title, &split_tags(raw_tags), score)
}

pub fn reset_scores(repo: &ArtRepository) -> GalleryResult<usize> {
    repo.reset_all_scores()
}

/// Fetch a record for its detail page and count the view.
pub fn view(repo: &ArtRepository, id: i64) -> GalleryResult<Art> {
    let mut art = repo.get(id)?;
    art.score = repo.increment_score(id)?;
    Ok(art)
}
