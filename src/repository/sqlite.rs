use sqlx::SqlitePool;
use uuid::{fmt::Hyphenated, Uuid};

use super::QuoteRepository;
use crate::models::quotes::Quote;

/// ids are stored as hyphenated text so the table stays readable from the sqlite shell.
#[derive(sqlx::FromRow)]
struct QuoteRow {
    id: Hyphenated,
    author: String,
    text: String,
}

impl From<QuoteRow> for Quote {
    fn from(row: QuoteRow) -> Self {
        Quote {
            id: row.id.into_uuid(),
            author: row.author,
            text: row.text,
        }
    }
}

#[derive(Clone)]
pub struct SqliteQuoteRepository {
    pool: SqlitePool,
}

impl SqliteQuoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl QuoteRepository for SqliteQuoteRepository {
    async fn create_quote(&self, quote: &Quote) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
                INSERT INTO
                    quotes (id, author, text)
                VALUES
                    ($1, $2, $3);
            "#,
        )
        .bind(quote.id.hyphenated())
        .bind(&quote.author)
        .bind(&quote.text)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_quote(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
                DELETE FROM quotes
                WHERE id = $1;
            "#,
        )
        .bind(id.hyphenated())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_all_quotes(&self) -> Result<Vec<Quote>, sqlx::Error> {
        let rows: Vec<QuoteRow> = sqlx::query_as(
            r#"
                SELECT
                    id, author, text
                FROM quotes;
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Quote::from).collect())
    }

    async fn get_quotes_by_author(&self, author: &str) -> Result<Vec<Quote>, sqlx::Error> {
        let rows: Vec<QuoteRow> = sqlx::query_as(
            r#"
                SELECT
                    id, author, text
                FROM quotes
                WHERE author = $1;
            "#,
        )
        .bind(author)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Quote::from).collect())
    }

    async fn get_random_quote(&self) -> Result<Option<Quote>, sqlx::Error> {
        // fine for a small table, sorts every row.
        let row: Option<QuoteRow> = sqlx::query_as(
            r#"
                SELECT
                    id, author, text
                FROM quotes
                ORDER BY RANDOM()
                LIMIT 1;
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Quote::from))
    }

    async fn get_quote_by_id(&self, id: Uuid) -> Result<Option<Quote>, sqlx::Error> {
        let row: Option<QuoteRow> = sqlx::query_as(
            r#"
                SELECT
                    id, author, text
                FROM quotes
                WHERE id = $1;
            "#,
        )
        .bind(id.hyphenated())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Quote::from))
    }
}

/// single-connection in-memory database with migrations applied.
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    let opts = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(opts)
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}
