use uuid::Uuid;

/// errors surfaced by the quote service.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("quote {0} does not exist")]
    NotFound(Uuid),
    #[error("there are no quotes in the database")]
    Empty,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
