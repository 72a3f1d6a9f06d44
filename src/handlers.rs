use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::{error::QuoteError, repository::QuoteRepository, service::QuoteService};

pub mod quotes;

pub fn router<R: QuoteRepository>(service: Arc<QuoteService<R>>) -> Router {
    Router::new()
        .route(
            "/quotes",
            get(quotes::list_quotes::<R>).post(quotes::create_quote::<R>),
        )
        .route("/quotes/random", get(quotes::get_random_quote::<R>))
        .route("/quotes/{id}", delete(quotes::delete_quote::<R>))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

/// an error as the client sees it: a status code and a message, nothing internal.
#[derive(Debug, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl ApiError {
    pub fn bad_request(message: &'static str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    /// maps a service error, using `fallback` for storage failures.
    pub fn from_quote_error(err: QuoteError, fallback: &'static str) -> Self {
        match err {
            QuoteError::MissingField("author") => Self::bad_request("Author is required"),
            QuoteError::MissingField("text") => Self::bad_request("Text is required"),
            QuoteError::MissingField(_) => Self::bad_request("Missing required field"),
            QuoteError::NotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: "Quote not found",
            },
            QuoteError::Empty => Self {
                status: StatusCode::NOT_FOUND,
                message: "No quotes available",
            },
            QuoteError::Database(_) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: fallback,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn storage_errors_hide_detail() {
        let err = ApiError::from_quote_error(
            QuoteError::Database(sqlx::Error::PoolTimedOut),
            "Failed to retrieve quotes",
        );

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to retrieve quotes");
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from_quote_error(QuoteError::NotFound(Uuid::nil()), "unused");
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = ApiError::from_quote_error(QuoteError::Empty, "unused");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn missing_fields_map_to_400() {
        assert_eq!(
            ApiError::from_quote_error(QuoteError::MissingField("author"), "unused"),
            ApiError::bad_request("Author is required")
        );
        assert_eq!(
            ApiError::from_quote_error(QuoteError::MissingField("text"), "unused"),
            ApiError::bad_request("Text is required")
        );
    }
}
