use rocket::fs::TempFile;
use rocket::tokio::io::AsyncReadExt;
use rocket_dyn_templates::Template;
use serde_json::json;

use crate::error::GalleryResult;
use crate::gallery::GalleryService;
use crate::repository::ArtRepository;

pub mod private;
pub mod public;

pub const PRIVATE_PREFIX: &str = "/private";

/// Shared by the public and private galleries; `private` prefixes the item links.
pub(crate) fn render_gallery(
    repo: &ArtRepository,
    gallery: &GalleryService,
    cursor: Option<&str>,
    select_tag: Option<&str>,
    private: &str,
) -> GalleryResult<Template> {
    let select_tag = select_tag.unwrap_or("");
    let page = gallery.list_page(cursor.unwrap_or(""), select_tag)?;
    let list_tags = repo.tag_index().get_or_rebuild()?;

    let context = json!({
        "list_image": page.items,
        "more": page.has_more,
        "next_cursor": page.next_cursor,
        "private": private,
        "list_tags": list_tags,
        "select_tag": select_tag,
    });

    Ok(Template::render("gallery", &context))
}

/// Pull an uploaded file into memory. A missing file reads as no bytes.
pub(crate) async fn read_upload(file: Option<&TempFile<'_>>) -> GalleryResult<Vec<u8>> {
    let Some(file) = file else {
        return Ok(Vec::new());
    };
    let mut bytes = Vec::with_capacity(file.len() as usize);
    if file.len() == 0 {
        return Ok(bytes);
    }
    let mut reader = std::pin::pin!(file.open().await?);
    reader.read_to_end(&mut bytes).await?;
    Ok(bytes)
}
