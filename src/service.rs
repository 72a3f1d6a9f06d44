use uuid::Uuid;

use crate::{
    error::QuoteError,
    models::quotes::{Quote, QuoteDto},
    repository::QuoteRepository,
};

/// business rules between the http handlers and the repository.
pub struct QuoteService<R> {
    repo: R,
}

impl<R: QuoteRepository> QuoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    #[cfg(test)]
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// persists a new quote under a freshly generated id. any `id` on `dto` is ignored.
    #[tracing::instrument(skip(self))]
    pub async fn create_quote(&self, dto: QuoteDto) -> Result<QuoteDto, QuoteError> {
        let author = dto.author.ok_or(QuoteError::MissingField("author"))?;
        let text = dto.text.ok_or(QuoteError::MissingField("text"))?;

        let quote = Quote {
            id: Uuid::new_v4(),
            author,
            text,
        };

        self.repo.create_quote(&quote).await.inspect_err(
            |e| tracing::error!(err = ?e, id = %quote.id, "an error occurred when adding quote"),
        )?;

        tracing::info!(id = %quote.id, "added quote");
        Ok(quote.into())
    }

    /// deletes an existing quote. an unknown id is reported as [`QuoteError::NotFound`]
    /// and no delete is issued.
    #[tracing::instrument(skip(self))]
    pub async fn delete_quote(&self, id: Uuid) -> Result<(), QuoteError> {
        let existing = self.repo.get_quote_by_id(id).await.inspect_err(
            |e| tracing::error!(err = ?e, id = %id, "an error occurred when fetching quote"),
        )?;

        if existing.is_none() {
            return Err(QuoteError::NotFound(id));
        }

        self.repo.delete_quote(id).await.inspect_err(
            |e| tracing::error!(err = ?e, id = %id, "an error occurred when deleting quote"),
        )?;

        tracing::info!(id = %id, "deleted quote");
        Ok(())
    }

    #[tracing::instrument(skip_all)]
    pub async fn get_all_quotes(&self) -> Result<Vec<QuoteDto>, QuoteError> {
        let quotes = self.repo.get_all_quotes().await.inspect_err(
            |e| tracing::error!(err = ?e, "an error occurred when fetching quotes from database"),
        )?;

        Ok(quotes.into_iter().map(QuoteDto::from).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_quotes_by_author(&self, author: &str) -> Result<Vec<QuoteDto>, QuoteError> {
        let quotes = self.repo.get_quotes_by_author(author).await.inspect_err(|e| {
            tracing::error!(err = ?e, author = %author, "an error occurred when fetching quotes by author");
        })?;

        Ok(quotes.into_iter().map(QuoteDto::from).collect())
    }

    #[tracing::instrument(skip_all)]
    pub async fn get_random_quote(&self) -> Result<QuoteDto, QuoteError> {
        let quote = self.repo.get_random_quote().await.inspect_err(
            |e| tracing::error!(err = ?e, "an error occurred when fetching random quote"),
        )?;

        quote.map(QuoteDto::from).ok_or(QuoteError::Empty)
    }
}
