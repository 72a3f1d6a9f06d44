use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::ApiError;
use crate::{
    constants::{UUID_HYPHEN_OFFSETS, UUID_STR_LEN},
    models::quotes::QuoteDto,
    repository::QuoteRepository,
    service::QuoteService,
};

type Service<R> = State<Arc<QuoteService<R>>>;

/// the first `author` value in the query string, if any. repeated keys are not an error.
fn author_filter(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "author")
        .map(|(_, value)| value.as_str())
}

/// `GET /quotes`, optionally filtered with `?author=`.
#[tracing::instrument(skip(service))]
pub async fn list_quotes<R: QuoteRepository>(
    State(service): Service<R>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<QuoteDto>>, ApiError> {
    let Query(pairs) = query.map_err(|e| {
        tracing::debug!(err = ?e, "rejected malformed query string");
        ApiError::bad_request("Invalid query string")
    })?;

    let result = match author_filter(&pairs) {
        Some(author) if !author.is_empty() => service.get_quotes_by_author(author).await,
        _ => service.get_all_quotes().await,
    };

    result
        .map(Json)
        .map_err(|e| ApiError::from_quote_error(e, "Failed to retrieve quotes"))
}

/// `POST /quotes`. the body is decoded whatever the content type says.
#[tracing::instrument(skip_all)]
pub async fn create_quote<R: QuoteRepository>(
    State(service): Service<R>,
    body: Bytes,
) -> Result<(StatusCode, Json<QuoteDto>), ApiError> {
    let dto = parse_quote_body(&body).ok_or(ApiError::bad_request("Invalid JSON format"))?;

    if is_blank(dto.author.as_deref()) {
        return Err(ApiError::bad_request("Author is required"));
    }

    if is_blank(dto.text.as_deref()) {
        return Err(ApiError::bad_request("Text is required"));
    }

    let created = service
        .create_quote(dto)
        .await
        .map_err(|e| ApiError::from_quote_error(e, "Failed to create quote"))?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /quotes/random`.
#[tracing::instrument(skip_all)]
pub async fn get_random_quote<R: QuoteRepository>(
    State(service): Service<R>,
) -> Result<Json<QuoteDto>, ApiError> {
    service
        .get_random_quote()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_quote_error(e, "Failed to retrieve random quote"))
}

/// `DELETE /quotes/{id}`. the id is checked before the service is touched.
#[tracing::instrument(skip(service))]
pub async fn delete_quote<R: QuoteRepository>(
    State(service): Service<R>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id.map_err(|e| {
        tracing::debug!(err = ?e, "rejected undecodable quote id");
        ApiError::bad_request("Invalid UUID format")
    })?;

    if id.trim().is_empty() {
        return Err(ApiError::bad_request("Quote ID is required"));
    }

    let id = parse_quote_id(&id).ok_or(ApiError::bad_request("Invalid UUID format"))?;

    service
        .delete_quote(id)
        .await
        .map_err(|e| ApiError::from_quote_error(e, "Failed to delete quote"))?;

    Ok(StatusCode::NO_CONTENT)
}

/// decodes a quote body. only a json object is a quote; arrays and scalars are rejected.
fn parse_quote_body(body: &[u8]) -> Option<QuoteDto> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .inspect_err(|e| tracing::debug!(err = ?e, "rejected malformed quote body"))
        .ok()?;

    if !value.is_object() {
        tracing::debug!("rejected non-object quote body");
        return None;
    }

    serde_json::from_value(value)
        .inspect_err(|e| tracing::debug!(err = ?e, "rejected malformed quote body"))
        .ok()
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// accepts only the canonical 36 character form, hyphens included.
fn parse_quote_id(raw: &str) -> Option<Uuid> {
    let raw = raw.trim();
    let bytes = raw.as_bytes();

    if bytes.len() != UUID_STR_LEN || UUID_HYPHEN_OFFSETS.iter().any(|&i| bytes[i] != b'-') {
        return None;
    }

    Uuid::try_parse(raw).ok()
}
