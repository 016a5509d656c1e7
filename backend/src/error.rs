use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::SlugError;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum InternalError {
    #[error("Invalid Request: {0}")]
    InvalidRequest(String),

    #[error("Invalid Slug: {0}")]
    InvalidSlug(#[from] SlugError),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Serde Json Error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Store Error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for InternalError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidRequest(e) => {
                tracing::info!("invalid request: {e}");
                (StatusCode::BAD_REQUEST, "").into_response()
            }

            Self::InvalidSlug(e) => {
                tracing::info!("invalid slug: {e}");
                (StatusCode::BAD_REQUEST, "").into_response()
            }

            Self::SerdeJson(e) => {
                tracing::info!("serde error: {e}");
                (StatusCode::BAD_REQUEST, "").into_response()
            }

            //Note: do not trace this as error
            Self::NotFound(slug) => {
                tracing::info!("not found: {slug}");
                (StatusCode::NOT_FOUND, "").into_response()
            }

            Self::Store(e) => {
                tracing::error!("store unavailable: {e}");
                (StatusCode::SERVICE_UNAVAILABLE, "").into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, InternalError>;
