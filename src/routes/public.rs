use rocket::fs::NamedFile;
use rocket::State;
use rocket_dyn_templates::Template;
use serde_json::json;

use super::render_gallery;
use crate::admin;
use crate::blobs::BlobStore;
use crate::cache::featured::FeaturedCache;
use crate::error::{GalleryError, GalleryResult};
use crate::gallery::GalleryService;
use crate::repository::{parse_art_id, ArtRepository};

// ── Homepage ───────────────────────────────────────────

#[get("/")]
pub fn homepage(featured: &State<FeaturedCache>) -> GalleryResult<Template> {
    let (image_name, image_url) = match featured.get_featured() {
        Ok(f) => (f.title, f.image_url),
        Err(GalleryError::EmptyCollection) => (String::new(), String::new()),
        Err(e) => return Err(e),
    };

    let context = json!({
        "image_name": image_name,
        "image_url": image_url,
    });

    Ok(Template::render("home", &context))
}

// ── Images ─────────────────────────────────────────────

#[get("/view_art/<key>")]
pub async fn view_art(blobs: &State<BlobStore>, key: &str) -> Option<NamedFile> {
    let path = blobs.path(key)?;
    NamedFile::open(path).await.ok()
}

#[get("/view_image/<key>")]
pub fn view_image(repo: &State<ArtRepository>, key: &str) -> GalleryResult<Template> {
    let art = admin::view(repo, parse_art_id(key)?)?;

    let context = json!({
        "image_url": art.image_url,
        "image_name": art.title,
        "key_urlsafe": art.id,
        "score": art.score,
        "tags": art.tags,
    });

    Ok(Template::render("view_image", &context))
}

// ── Gallery ────────────────────────────────────────────

#[get("/gallery?<cursor>&<select_tag>")]
pub fn gallery(
    repo: &State<ArtRepository>,
    gallery: &State<GalleryService>,
    cursor: Option<&str>,
    select_tag: Option<&str>,
) -> GalleryResult<Template> {
    render_gallery(repo, gallery, cursor, select_tag, "")
}

// ── Static pages ───────────────────────────────────────

#[get("/contact")]
pub fn contact() -> Template {
    Template::render("contact", json!({}))
}

#[get("/questions")]
pub fn questions() -> Template {
    Template::render("question", json!({}))
}

#[get("/don")]
pub fn don() -> Template {
    Template::render("don", json!({}))
}

#[get("/exemple")]
pub fn exemple() -> Template {
    Template::render("exemple", json!({}))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        homepage, view_art, view_image, gallery, contact, questions, don, exemple
    ]
}
