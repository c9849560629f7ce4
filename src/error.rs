use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use thiserror::Error;

/// Every failure the gallery can surface to a handler.
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("art not found")]
    NotFound,

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("no art to choose from")]
    EmptyCollection,

    #[error("storage error: {0}")]
    Storage(String),
}

pub type GalleryResult<T> = Result<T, GalleryError>;

impl GalleryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        GalleryError::Validation(msg.into())
    }

    pub fn status(&self) -> Status {
        match self {
            GalleryError::NotFound | GalleryError::EmptyCollection => Status::NotFound,
            GalleryError::Validation(_) => Status::BadRequest,
            GalleryError::Storage(_) => Status::InternalServerError,
        }
    }
}

impl From<rusqlite::Error> for GalleryError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::QueryReturnedNoRows => GalleryError::NotFound,
            other => GalleryError::Storage(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for GalleryError {
    fn from(e: r2d2::Error) -> Self {
        GalleryError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(e: serde_json::Error) -> Self {
        GalleryError::Storage(e.to_string())
    }
}

impl From<std::io::Error> for GalleryError {
    fn from(e: std::io::Error) -> Self {
        GalleryError::Storage(e.to_string())
    }
}

impl<'r> Responder<'r, 'static> for GalleryError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        if status.code >= 500 {
            log::error!("{} {} failed: {}", req.method(), req.uri(), self);
        } else {
            log::warn!("{} {} rejected: {}", req.method(), req.uri(), self);
        }
        Err(status)
    }
}
