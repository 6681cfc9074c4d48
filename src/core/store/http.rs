use tracing::{debug, info};

use crate::{
    config::BoardConfig,
    core::{expect_success, http_client, DELETE_MARKERS_ENDPOINT, MARKER_ENDPOINT},
    error::BoardError,
    models::Marker,
};

use super::MarkerStore;

/// Marker store backed by the portfolio backend's `/marker` and
/// `/deleteMarker` endpoints.
#[derive(Debug, Clone)]
pub struct HttpMarkerStore {
    client: reqwest::Client,
    config: BoardConfig,
}

impl HttpMarkerStore {
    pub fn new(config: BoardConfig) -> Result<Self, BoardError> {
        Ok(Self {
            client: http_client(&config)?,
            config,
        })
    }

    pub fn with_client(client: reqwest::Client, config: BoardConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }
}

/// Form fields for a create request. Floats use their shortest round-trip
/// rendering so the server parses back the exact value.
pub(crate) fn marker_form(marker: &Marker) -> [(&'static str, String); 3] {
    [
        ("lat", marker.position.lat.to_string()),
        ("lng", marker.position.lng.to_string()),
        ("content", marker.content.clone()),
    ]
}

pub(crate) fn decode_markers(body: &str) -> Result<Vec<Marker>, BoardError> {
    serde_json::from_str(body).map_err(|e| BoardError::malformed(MARKER_ENDPOINT, e))
}

impl MarkerStore for HttpMarkerStore {
    async fn list(&self) -> Result<Vec<Marker>, BoardError> {
        let url = self.config.endpoint(MARKER_ENDPOINT);
        debug!(%url, "fetching markers");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(BoardError::network(MARKER_ENDPOINT))?;
        let body = expect_success(MARKER_ENDPOINT, response)?
            .text()
            .await
            .map_err(BoardError::network(MARKER_ENDPOINT))?;
        let markers = decode_markers(&body)?;
        info!(count = markers.len(), "fetched markers");
        Ok(markers)
    }

    async fn create(&self, marker: &Marker) -> Result<(), BoardError> {
        let url = self.config.endpoint(MARKER_ENDPOINT);
        debug!(%url, position = %marker.position, "posting marker");
        let response = self
            .client
            .post(&url)
            .form(&marker_form(marker))
            .send()
            .await
            .map_err(BoardError::network(MARKER_ENDPOINT))?;
        expect_success(MARKER_ENDPOINT, response)?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), BoardError> {
        let url = self.config.endpoint(DELETE_MARKERS_ENDPOINT);
        info!(%url, "deleting all markers");
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(BoardError::network(DELETE_MARKERS_ENDPOINT))?;
        expect_success(DELETE_MARKERS_ENDPOINT, response)?;
        Ok(())
    }
}
