use std::collections::BTreeSet;
use std::sync::Arc;

use super::Cache;
use crate::error::GalleryResult;
use crate::store::ArtStore;

/// Sentinel heading the tag index; selecting it means "no filter".
pub const ALL_TAGS: &str = "All";

const TAG_INDEX_KEY: &str = "tag_index";

/// Cached `["All", ...sorted distinct tags]` across every art record.
///
/// Writes only ever add tags. A tag whose last record was retagged stays listed
/// until the index is rebuilt from a cold cache or through [`TagIndex::refresh`].
#[derive(Clone)]
pub struct TagIndex {
    cache: Cache,
    store: Arc<dyn ArtStore>,
}

impl TagIndex {
    pub fn new(cache: Cache, store: Arc<dyn ArtStore>) -> Self {
        TagIndex { cache, store }
    }

    pub fn get_or_rebuild(&self) -> GalleryResult<Vec<String>> {
        match self.cache.get_json::<Vec<String>>(TAG_INDEX_KEY) {
            Some(index) => Ok(index),
            None => self.rebuild(),
        }
    }

    /// Fold a record's tags into the cached index without scanning the store.
    pub fn merge_on_write(&self, tags: &[String]) -> GalleryResult<Vec<String>> {
        let Some(mut index) = self.cache.get_json::<Vec<String>>(TAG_INDEX_KEY) else {
            return self.rebuild();
        };

        for tag in tags {
            if !index.contains(tag) {
                log::info!("Tag index gained {:?}", tag);
                index.push(tag.clone());
            }
        }

        let index = sorted_index(index.iter().map(String::as_str));
        self.cache.set_json(TAG_INDEX_KEY, &index)?;
        Ok(index)
    }

    pub fn invalidate(&self) {
        self.cache.invalidate(TAG_INDEX_KEY);
    }

    /// Drop the cached index and recompute it from the records present now.
    pub fn refresh(&self) -> GalleryResult<Vec<String>> {
        self.invalidate();
        self.rebuild()
    }

    fn rebuild(&self) -> GalleryResult<Vec<String>> {
        let arts = self.store.art_list_all()?;
        let index = sorted_index(arts.iter().flat_map(|a| a.tags.iter().map(String::as_str)));
        self.cache.set_json(TAG_INDEX_KEY, &index)?;
        log::info!(
            "Rebuilt tag index from {} records: {} tags",
            arts.len(),
            index.len() - 1
        );
        Ok(index)
    }
}

fn sorted_index<'a>(tags: impl Iterator<Item = &'a str>) -> Vec<String> {
    let distinct: BTreeSet<&str> = tags.filter(|t| *t != ALL_TAGS).collect();
    std::iter::once(ALL_TAGS)
        .chain(distinct)
        .map(str::to_string)
        .collect()
}
