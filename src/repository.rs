//! Storage access for quotes.
//!
//! [`QuoteRepository`] is implemented by [`SqliteQuoteRepository`] in production and by
//! an in-memory store in tests. Methods return `impl Future + Send` so the service can
//! be shared across axum's request tasks without boxing.

use std::future::Future;

use uuid::Uuid;

use crate::models::quotes::Quote;

#[cfg(test)]
pub mod memory;
pub mod sqlite;

pub use sqlite::SqliteQuoteRepository;

/// One method per SQL statement. Storage errors are returned as-is.
pub trait QuoteRepository: Send + Sync + 'static {
    fn create_quote(&self, quote: &Quote) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Succeeds even if no row matched.
    fn delete_quote(&self, id: Uuid) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    fn get_all_quotes(&self) -> impl Future<Output = Result<Vec<Quote>, sqlx::Error>> + Send;

    /// Exact, case-sensitive match on `author`.
    fn get_quotes_by_author(
        &self,
        author: &str,
    ) -> impl Future<Output = Result<Vec<Quote>, sqlx::Error>> + Send;

    /// `None` when the table is empty.
    fn get_random_quote(
        &self,
    ) -> impl Future<Output = Result<Option<Quote>, sqlx::Error>> + Send;

    fn get_quote_by_id(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<Quote>, sqlx::Error>> + Send;
}
