pub mod portfolio;
pub mod store;

use tracing::warn;

use crate::error::BoardError;

pub const MARKER_ENDPOINT: &str = "/marker";
pub const DELETE_MARKERS_ENDPOINT: &str = "/deleteMarker";
pub const QUOTES_ENDPOINT: &str = "/data";
pub const DELETE_QUOTES_ENDPOINT: &str = "/deleteQuote";
pub const NICKNAME_ENDPOINT: &str = "/nickname";
pub const TRANSLATE_ENDPOINT: &str = "/translate";

pub use portfolio::PortfolioClient;
pub use store::{HttpMarkerStore, MarkerStore, SqliteMarkerStore};

/// Builds the shared HTTP client with the configured timeout.
pub(crate) fn http_client(
    config: &crate::config::BoardConfig,
) -> Result<reqwest::Client, BoardError> {
    reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(BoardError::network("client setup"))
}

/// Turns a non-2xx answer into [`BoardError::Status`].
///
/// Redirects are followed by the client, so a login redirect ends up here as
/// whatever the final page answered.
pub(crate) fn expect_success(
    endpoint: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, BoardError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        warn!(endpoint, status = status.as_u16(), "request rejected");
        Err(BoardError::Status {
            endpoint,
            status: status.as_u16(),
        })
    }
}
