use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::models::LatLng;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
/// Midway Island, so both sides of the Pacific show.
pub const DEFAULT_CENTER: LatLng = LatLng::new(28.2072, -177.3735);
pub const DEFAULT_ZOOM: u8 = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_QUOTE_COUNT: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    pub base_url: String,
    pub center: LatLng,
    pub zoom: u8,
    pub request_timeout: Duration,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl BoardConfig {
    /// Defaults overridden by `MARKERBOARD_*` environment variables.
    /// Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: var("MARKERBOARD_URL").unwrap_or(defaults.base_url),
            center: LatLng::new(
                try_load("MARKERBOARD_CENTER_LAT", defaults.center.lat),
                try_load("MARKERBOARD_CENTER_LNG", defaults.center.lng),
            ),
            zoom: try_load("MARKERBOARD_ZOOM", defaults.zoom),
            request_timeout: Duration::from_secs(try_load(
                "MARKERBOARD_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Joins an endpoint path onto the base url.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match var(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => {
                info!("{key} set to {value}");
                value
            }
            Err(e) => {
                warn!("Invalid {key} value {raw:?}: {e}, using default {default}");
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let config = BoardConfig::default().with_base_url("http://example.test/");
        assert_eq!(config.endpoint("/marker"), "http://example.test/marker");
        assert_eq!(config.endpoint("deleteMarker"), "http://example.test/deleteMarker");
    }

    #[test]
    fn defaults_center_on_midway() {
        let config = BoardConfig::default();
        assert_eq!(config.center, LatLng::new(28.2072, -177.3735));
        assert_eq!(config.zoom, 3);
    }

    #[test]
    fn try_load_falls_back_on_missing_key() {
        let zoom: u8 = try_load("MARKERBOARD_TEST_KEY_THAT_IS_NEVER_SET", 7);
        assert_eq!(zoom, 7);
    }
}
