use axum::{
    body::Bytes,
    extract::{Path, Query},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    Extension, Json,
};
use serde::Deserialize;
use shared::{IncrRequest, Slug};

use crate::{
    app::App,
    client_ip::ExtractClientIp,
    error::{InternalError, Result},
    GIT_HASH,
};

#[derive(Debug, Deserialize)]
pub struct ViewsQuery {
    slugs: Option<String>,
}

pub async fn incr_handler(
    Extension(app): Extension<App>,
    ExtractClientIp(client): ExtractClientIp,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode> {
    if !is_json(&headers) {
        return Err(InternalError::InvalidRequest(String::from("must be json")));
    }

    let request: IncrRequest = serde_json::from_slice(&body)?;

    let slug = request
        .slug
        .ok_or_else(|| InternalError::InvalidRequest(String::from("slug not found")))?;
    let slug = Slug::parse(slug)?;

    let outcome = app.record_view(&slug, client.as_deref()).await?;

    tracing::debug!(%slug, ?outcome, "incr");

    Ok(StatusCode::ACCEPTED)
}

pub async fn views_handler(
    Path(slug): Path<String>,
    Extension(app): Extension<App>,
) -> Result<impl IntoResponse> {
    let slug = Slug::parse(slug)?;

    Ok(Json(app.views(slug).await?))
}

pub async fn views_batch_handler(
    Query(query): Query<ViewsQuery>,
    Extension(app): Extension<App>,
) -> Result<impl IntoResponse> {
    let slugs = query
        .slugs
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|slug| !slug.is_empty())
        .map(Slug::parse)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if slugs.is_empty() {
        return Err(InternalError::InvalidRequest(String::from("no slugs")));
    }

    Ok(Json(app.views_batch(&slugs).await?))
}

pub async fn projects_handler(Extension(app): Extension<App>) -> Result<impl IntoResponse> {
    Ok(Json(app.projects_page().await?))
}

pub async fn project_handler(
    Path(slug): Path<String>,
    Extension(app): Extension<App>,
) -> Result<impl IntoResponse> {
    let slug = Slug::parse(slug)?;

    Ok(Json(app.project(&slug).await?))
}

pub async fn ping_handler() -> Html<&'static str> {
    Html("pong")
}

pub async fn version_handler() -> &'static str {
    GIT_HASH
}

/// Accepts `application/json` with or without parameters such as charset.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .is_some_and(|mime| mime.essence_str() == mime::APPLICATION_JSON.essence_str())
}
