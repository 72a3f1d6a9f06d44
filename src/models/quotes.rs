use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// a fully populated quote as it lives in the `quotes` table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quote {
    pub id: Uuid,
    pub author: String,
    pub text: String,
}

/// request / response body for quotes.
///
/// every field is optional so a missing field can be told apart from a blank one
/// while validating. `None` serializes as `null`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl From<Quote> for QuoteDto {
    fn from(quote: Quote) -> Self {
        QuoteDto {
            id: Some(quote.id),
            author: Some(quote.author),
            text: Some(quote.text),
        }
    }
}
