//! Thin client for the quote list, nickname and translation endpoints.
//!
//! These are one-shot request/response calls without retries. Login itself
//! happens in the browser; the client only reports what the backend says.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    config::BoardConfig,
    core::{
        expect_success, http_client, DELETE_QUOTES_ENDPOINT, NICKNAME_ENDPOINT, QUOTES_ENDPOINT,
        TRANSLATE_ENDPOINT,
    },
    error::BoardError,
    models::{Quote, QuoteEnvelope},
};

#[derive(Debug, Clone)]
pub struct PortfolioClient {
    client: reqwest::Client,
    config: BoardConfig,
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "loggedIn", default)]
    logged_in: Value,
    #[serde(rename = "redirectUrl", default)]
    redirect_url: Option<String>,
    #[serde(default)]
    nickname: Option<String>,
    #[serde(rename = "Quote", default)]
    quote: Option<String>,
}

/// Decodes the `/data` body. The quote list arrives as a JSON document
/// encoded inside a string field, holding either an array or an object whose
/// values are the quotes.
pub fn decode_quote_envelope(body: &str) -> Result<QuoteEnvelope, BoardError> {
    let raw: RawEnvelope =
        serde_json::from_str(body).map_err(|e| BoardError::malformed(QUOTES_ENDPOINT, e))?;

    let logged_in = match raw.logged_in {
        Value::String(s) => s == "true",
        Value::Bool(b) => b,
        _ => false,
    };

    let quotes = match raw.quote.as_deref().map(str::trim) {
        None | Some("") => Vec::new(),
        Some(encoded) => {
            let value: Value = serde_json::from_str(encoded)
                .map_err(|e| BoardError::malformed(QUOTES_ENDPOINT, e))?;
            let items = match value {
                Value::Array(items) => items,
                Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
                Value::Null => Vec::new(),
                other => {
                    return Err(BoardError::malformed(
                        QUOTES_ENDPOINT,
                        format!("expected a list of quotes, got {}", other),
                    ));
                }
            };
            items
                .into_iter()
                .map(serde_json::from_value::<Quote>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| BoardError::malformed(QUOTES_ENDPOINT, e))?
        }
    };

    Ok(QuoteEnvelope {
        logged_in,
        redirect_url: raw.redirect_url.unwrap_or_default(),
        nickname: raw.nickname.filter(|n| !n.is_empty()),
        quotes,
    })
}

impl PortfolioClient {
    pub fn new(config: BoardConfig) -> Result<Self, BoardError> {
        Ok(Self {
            client: http_client(&config)?,
            config,
        })
    }

    pub async fn fetch_quotes(&self, count: u32) -> Result<QuoteEnvelope, BoardError> {
        let url = self.config.endpoint(QUOTES_ENDPOINT);
        debug!(%url, count, "fetching quotes");
        let response = self
            .client
            .get(&url)
            .query(&[("numToDisplay", count)])
            .send()
            .await
            .map_err(BoardError::network(QUOTES_ENDPOINT))?;
        let body = expect_success(QUOTES_ENDPOINT, response)?
            .text()
            .await
            .map_err(BoardError::network(QUOTES_ENDPOINT))?;
        let envelope = decode_quote_envelope(&body)?;
        info!(
            quotes = envelope.quotes.len(),
            logged_in = envelope.logged_in,
            "fetched quotes"
        );
        Ok(envelope)
    }

    pub async fn submit_quote(&self, text: &str) -> Result<(), BoardError> {
        if text.is_empty() {
            return Err(BoardError::EmptyInput);
        }
        self.post_form(QUOTES_ENDPOINT, &[("quote", text)]).await
    }

    /// Deletes every quote the logged in user submitted.
    pub async fn delete_quotes(&self) -> Result<(), BoardError> {
        self.post_form(DELETE_QUOTES_ENDPOINT, &[]).await
    }

    pub async fn set_nickname(&self, nickname: &str) -> Result<(), BoardError> {
        if nickname.is_empty() {
            return Err(BoardError::EmptyInput);
        }
        self.post_form(NICKNAME_ENDPOINT, &[("nickname", nickname)])
            .await
    }

    pub async fn translate(
        &self,
        element_id: &str,
        text: &str,
        language_code: &str,
    ) -> Result<String, BoardError> {
        let url = self.config.endpoint(TRANSLATE_ENDPOINT);
        debug!(%url, element_id, language_code, "translating");
        let response = self
            .client
            .post(&url)
            .form(&[
                ("elementId", element_id),
                ("textToTranslate", text),
                ("languageCode", language_code),
            ])
            .send()
            .await
            .map_err(BoardError::network(TRANSLATE_ENDPOINT))?;
        let body = expect_success(TRANSLATE_ENDPOINT, response)?
            .text()
            .await
            .map_err(BoardError::network(TRANSLATE_ENDPOINT))?;
        Ok(trim_line_end(&body).to_string())
    }

    async fn post_form(
        &self,
        endpoint: &'static str,
        form: &[(&str, &str)],
    ) -> Result<(), BoardError> {
        let url = self.config.endpoint(endpoint);
        info!(%url, "posting");
        let response = self
            .client
            .post(&url)
            .form(form)
            .send()
            .await
            .map_err(BoardError::network(endpoint))?;
        expect_success(endpoint, response)?;
        Ok(())
    }
}

/// The translate servlet prints its answer followed by a line break.
fn trim_line_end(body: &str) -> &str {
    body.trim_end_matches(['\r', '\n'])
}
