use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cache::tags::ALL_TAGS;
use crate::error::{GalleryError, GalleryResult};
use crate::models::art::{Art, ScoreKey};
use crate::store::ArtStore;

pub const PAGE_SIZE: i64 = 12;

/// What a gallery tile needs.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct GalleryItem {
    pub image_url: String,
    pub id: i64,
    pub tags: Vec<String>,
    pub score: f64,
}

impl From<Art> for GalleryItem {
    fn from(art: Art) -> Self {
        GalleryItem {
            image_url: art.image_url,
            id: art.id,
            tags: art.tags,
            score: art.score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GalleryPage {
    pub items: Vec<GalleryItem>,
    pub has_more: bool,
    /// Empty when there is nothing after this page.
    pub next_cursor: String,
}

/// Resume position of the last item handed out. `s` is only set for
/// score-ordered listings and carries the raw bits of the score, since the
/// keyset query compares it for exact equality.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Cursor {
    #[serde(
        rename = "s",
        default,
        skip_serializing_if = "Option::is_none",
        with = "score_bits"
    )]
    pub score: Option<f64>,
    pub id: i64,
}

mod score_bits {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(score: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        score.map(f64::to_bits).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(f64::from_bits))
    }
}

impl Cursor {
    pub fn encode(&self) -> String {
        // a struct of plain numbers always serializes
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    pub fn decode(token: &str) -> GalleryResult<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| GalleryError::validation("malformed cursor"))?;
        serde_json::from_slice(&bytes).map_err(|_| GalleryError::validation("malformed cursor"))
    }
}

pub fn is_unfiltered(tag: &str) -> bool {
    tag.is_empty() || tag == ALL_TAGS
}

#[derive(Clone)]
pub struct GalleryService {
    store: Arc<dyn ArtStore>,
}

impl GalleryService {
    pub fn new(store: Arc<dyn ArtStore>) -> Self {
        GalleryService { store }
    }

    /// One page of the gallery: by score when unfiltered, by id within a tag.
    pub fn list_page(&self, cursor: &str, tag_filter: &str) -> GalleryResult<GalleryPage> {
        let after = match cursor {
            "" => None,
            token => Some(Cursor::decode(token)?),
        };
        let fetch = PAGE_SIZE + 1;

        let mut arts = if is_unfiltered(tag_filter) {
            let after = match after {
                Some(Cursor {
                    score: Some(score),
                    id,
                }) if score.is_finite() => Some(ScoreKey { score, id }),
                Some(_) => return Err(GalleryError::validation("cursor is not a score position")),
                None => None,
            };
            self.store.art_page_by_score(after, fetch)?
        } else {
            self.store
                .art_page_by_tag(tag_filter, after.map(|c| c.id), fetch)?
        };

        let has_more = arts.len() as i64 > PAGE_SIZE;
        arts.truncate(PAGE_SIZE as usize);

        let next_cursor = match arts.last() {
            Some(last) if has_more => Cursor {
                score: is_unfiltered(tag_filter).then_some(last.score),
                id: last.id,
            }
            .encode(),
            _ => String::new(),
        };

        Ok(GalleryPage {
            items: arts.into_iter().map(GalleryItem::from).collect(),
            has_more,
            next_cursor,
        })
    }
}
