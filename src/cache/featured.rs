use chrono::NaiveDate;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::Cache;
use crate::error::{GalleryError, GalleryResult};
use crate::store::ArtStore;

const FEATURED_KEY: &str = "featured_image";

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FeaturedImage {
    pub title: String,
    pub image_url: String,
    pub refreshed_on: NaiveDate,
}

/// Image of the day: one record picked at random, kept until the date changes.
pub struct FeaturedCache {
    cache: Cache,
    store: Arc<dyn ArtStore>,
    clock: Arc<dyn Clock>,
}

impl FeaturedCache {
    pub fn new(cache: Cache, store: Arc<dyn ArtStore>, clock: Arc<dyn Clock>) -> Self {
        FeaturedCache {
            cache,
            store,
            clock,
        }
    }

    pub fn get_featured(&self) -> GalleryResult<FeaturedImage> {
        let today = self.clock.today();
        if let Some(current) = self.cache.get_json::<FeaturedImage>(FEATURED_KEY) {
            if current.refreshed_on >= today {
                return Ok(current);
            }
        }

        let ids = self.store.art_ids()?;
        let id = *ids
            .choose(&mut rand::thread_rng())
            .ok_or(GalleryError::EmptyCollection)?;
        let art = self.store.art_find_by_id(id)?;

        let featured = FeaturedImage {
            title: art.title,
            image_url: art.image_url,
            refreshed_on: today,
        };
        self.cache.set_json(FEATURED_KEY, &featured)?;
        log::info!("Featured image for {} is art {}", today, id);
        Ok(featured)
    }
}
