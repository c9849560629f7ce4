#[macro_use]
extern crate rocket;

use std::sync::Arc;

use rocket::data::{Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::fs::FileServer;
use rocket::http::Header;
use rocket::response::content::RawHtml;
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;

mod admin;
mod blobs;
mod boot;
mod cache;
mod config;
mod db;
mod error;
mod gallery;
mod models;
mod repository;
mod routes;
mod store;


use blobs::BlobStore;
use cache::featured::{Clock, FeaturedCache, SystemClock};
use cache::tags::TagIndex;
use cache::Cache;
use config::GalleryConfig;
use error::GalleryResult;
use gallery::GalleryService;
use repository::ArtRepository;
use store::sqlite::SqliteStore;
use store::ArtStore;

pub struct NoCachePrivate;

#[rocket::async_trait]
impl Fairing for NoCachePrivate {
    fn info(&self) -> Info {
        Info { name: "No-Cache Private Pages", kind: Kind::Response }
    }

    async fn on_response<'r>(&self, req: &'r rocket::Request<'_>, res: &mut rocket::Response<'r>) {
        if req.uri().path().starts_with(routes::PRIVATE_PREFIX) {
            res.set_header(Header::new("Cache-Control", "no-store, no-cache, must-revalidate, max-age=0"));
            res.set_header(Header::new("Pragma", "no-cache"));
        }
    }
}

#[catch(400)]
fn bad_request() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>400</h1><p>That request could not be understood.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Home</a></body></html>".to_string())
}

/// Open the configured database and assemble the application.
pub fn build(config: GalleryConfig, clock: Arc<dyn Clock>) -> GalleryResult<Rocket<Build>> {
    let store: Arc<dyn ArtStore> = Arc::new(SqliteStore::new_at(&config.database_path)?);
    store.run_migrations()?;
    build_with_store(config, store, clock)
}

pub fn build_with_store(
    config: GalleryConfig,
    store: Arc<dyn ArtStore>,
    clock: Arc<dyn Clock>,
) -> GalleryResult<Rocket<Build>> {
    let cache = Cache::in_memory();
    let tags = TagIndex::new(cache.clone(), store.clone());
    let repo = ArtRepository::new(store.clone(), tags);
    let featured = FeaturedCache::new(cache, store.clone(), clock);
    let gallery = GalleryService::new(store);
    let blobs = BlobStore::new(&config.uploads_dir)?;
    // FileServer refuses a missing root
    std::fs::create_dir_all(&config.static_dir)?;

    let upload_limit = config.max_upload_bytes();
    let limits = Limits::default()
        .limit("file", upload_limit.bytes())
        .limit("data-form", upload_limit.bytes() + 1.mebibytes());
    let figment = rocket::Config::figment()
        .merge(("template_dir", config.templates_dir.clone()))
        .merge(("limits", limits));

    Ok(rocket::custom(figment)
        .manage(repo)
        .manage(featured)
        .manage(gallery)
        .manage(blobs)
        .attach(Template::fairing())
        .attach(NoCachePrivate)
        .mount("/static", FileServer::from(&config.static_dir))
        .mount("/", routes::public::routes())
        .mount(routes::PRIVATE_PREFIX, routes::private::routes())
        .mount("/", routes::private::upload_routes())
        .register("/", catchers![bad_request, not_found, server_error]))
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let config = match GalleryConfig::load() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Boot check: create data directories, report missing templates
    boot::run(&config);

    match build(config, Arc::new(SystemClock)) {
        Ok(rocket) => rocket,
        Err(e) => {
            log::error!("Failed to start gallery: {}", e);
            std::process::exit(1);
        }
    }
}
