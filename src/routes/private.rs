use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::response::Redirect;
use rocket::State;
use rocket_dyn_templates::Template;
use serde_json::json;

use super::{read_upload, render_gallery, PRIVATE_PREFIX};
use crate::admin;
use crate::blobs::BlobStore;
use crate::error::GalleryResult;
use crate::gallery::GalleryService;
use crate::repository::{parse_art_id, ArtRepository};

// Mounted under /private, except `upload` which lives at the root.

#[get("/gallery?<cursor>&<select_tag>")]
pub fn private_gallery(
    repo: &State<ArtRepository>,
    gallery: &State<GalleryService>,
    cursor: Option<&str>,
    select_tag: Option<&str>,
) -> GalleryResult<Template> {
    render_gallery(repo, gallery, cursor, select_tag, PRIVATE_PREFIX)
}

// ── Modify ─────────────────────────────────────────────

#[get("/modify_form/<key>")]
pub fn modify_form(repo: &State<ArtRepository>, key: &str) -> GalleryResult<Template> {
    let art = repo.get(parse_art_id(key)?)?;

    let context = json!({
        "art_title": art.title,
        "art_tags": art.tags.join(" "),
        "art_image": art.image_url,
        "art_key": art.id,
        "art_score": art.score.to_string(),
    });

    Ok(Template::render("modify_form", &context))
}

#[derive(FromForm)]
pub struct ModifyFormData {
    pub image_name: Option<String>,
    pub image_tags: Option<String>,
    pub image_score: Option<String>,
}

#[post("/modify/<key>", data = "<form>")]
pub fn modify(
    repo: &State<ArtRepository>,
    key: &str,
    form: Form<ModifyFormData>,
) -> GalleryResult<Redirect> {
    admin::modify(
        repo,
        parse_art_id(key)?,
        form.image_name.as_deref().unwrap_or(""),
        form.image_tags.as_deref().unwrap_or(""),
        form.image_score.as_deref().unwrap_or(""),
    )?;
    Ok(Redirect::to(format!("{}/gallery", PRIVATE_PREFIX)))
}

// ── Upload ─────────────────────────────────────────────

#[get("/upload_form")]
pub fn upload_form() -> Template {
    Template::render("upload_form", json!({ "upload_url": "/upload" }))
}

#[derive(FromForm)]
pub struct UploadFormData<'f> {
    pub image_name: Option<String>,
    pub image_tags: Option<String>,
    pub image: Option<TempFile<'f>>,
}

#[post("/upload", data = "<form>")]
pub async fn upload(
    repo: &State<ArtRepository>,
    blobs: &State<BlobStore>,
    form: Form<UploadFormData<'_>>,
) -> GalleryResult<Redirect> {
    let bytes = read_upload(form.image.as_ref()).await?;
    admin::upload(
        repo,
        blobs,
        form.image_name.as_deref().unwrap_or(""),
        &bytes,
        form.image_tags.as_deref().unwrap_or(""),
    )?;
    Ok(Redirect::to(format!("{}/upload_form", PRIVATE_PREFIX)))
}

// ── Maintenance ────────────────────────────────────────

#[get("/reset_score")]
pub fn reset_score(repo: &State<ArtRepository>) -> GalleryResult<Redirect> {
    admin::reset_scores(repo)?;
    Ok(Redirect::to(format!("{}/gallery", PRIVATE_PREFIX)))
}

#[get("/refresh_tags")]
pub fn refresh_tags(repo: &State<ArtRepository>) -> GalleryResult<Redirect> {
    repo.tag_index().refresh()?;
    Ok(Redirect::to(format!("{}/gallery", PRIVATE_PREFIX)))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        private_gallery,
        modify_form,
        modify,
        upload_form,
        reset_score,
        refresh_tags
    ]
}

pub fn upload_routes() -> Vec<rocket::Route> {
    routes![upload]
}
