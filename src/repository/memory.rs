use std::sync::Mutex;

use rand::seq::SliceRandom;
use uuid::Uuid;

use super::QuoteRepository;
use crate::models::quotes::Quote;

/// `Vec`-backed repository for exercising the service and handlers without sqlite.
#[derive(Default)]
pub struct InMemoryQuoteRepository {
    quotes: Mutex<Vec<Quote>>,
}

impl InMemoryQuoteRepository {
    pub fn with_quotes(quotes: Vec<Quote>) -> Self {
        Self {
            quotes: Mutex::new(quotes),
        }
    }

    pub fn count(&self) -> usize {
        self.quotes.lock().unwrap().len()
    }
}

impl QuoteRepository for InMemoryQuoteRepository {
    async fn create_quote(&self, quote: &Quote) -> Result<(), sqlx::Error> {
        let mut quotes = self.quotes.lock().unwrap();
        if quotes.iter().any(|q| q.id == quote.id) {
            return Err(sqlx::Error::Protocol(format!(
                "duplicate primary key {}",
                quote.id
            )));
        }

        quotes.push(quote.clone());
        Ok(())
    }

    async fn delete_quote(&self, id: Uuid) -> Result<(), sqlx::Error> {
        self.quotes.lock().unwrap().retain(|q| q.id != id);
        Ok(())
    }

    async fn get_all_quotes(&self) -> Result<Vec<Quote>, sqlx::Error> {
        Ok(self.quotes.lock().unwrap().clone())
    }

    async fn get_quotes_by_author(&self, author: &str) -> Result<Vec<Quote>, sqlx::Error> {
        Ok(self
            .quotes
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.author == author)
            .cloned()
            .collect())
    }

    async fn get_random_quote(&self) -> Result<Option<Quote>, sqlx::Error> {
        Ok(self
            .quotes
            .lock()
            .unwrap()
            .choose(&mut rand::thread_rng())
            .cloned())
    }

    async fn get_quote_by_id(&self, id: Uuid) -> Result<Option<Quote>, sqlx::Error> {
        Ok(self
            .quotes
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned())
    }
}

/// every call fails, as if the database were unreachable.
pub struct FailingQuoteRepository;

fn unavailable() -> sqlx::Error {
    sqlx::Error::PoolTimedOut
}

impl QuoteRepository for FailingQuoteRepository {
    async fn create_quote(&self, _quote: &Quote) -> Result<(), sqlx::Error> {
        Err(unavailable())
    }

    async fn delete_quote(&self, _id: Uuid) -> Result<(), sqlx::Error> {
        Err(unavailable())
    }

    async fn get_all_quotes(&self) -> Result<Vec<Quote>, sqlx::Error> {
        Err(unavailable())
    }

    async fn get_quotes_by_author(&self, _author: &str) -> Result<Vec<Quote>, sqlx::Error> {
        Err(unavailable())
    }

    async fn get_random_quote(&self) -> Result<Option<Quote>, sqlx::Error> {
        Err(unavailable())
    }

    async fn get_quote_by_id(&self, _id: Uuid) -> Result<Option<Quote>, sqlx::Error> {
        Err(unavailable())
    }
}
