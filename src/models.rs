use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A geographic coordinate, serialized with the `lat`/`lng` field names the
/// backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Latitude clamped to the poles and longitude wrapped into `[-180, 180)`.
    pub fn normalized(self) -> Self {
        let lat = self.lat.clamp(-90.0, 90.0);
        let lng = (self.lng + 180.0).rem_euclid(360.0) - 180.0;
        Self { lat, lng }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// A user marker as it travels to and from the marker store.
///
/// The server also sends an `id`; the client identifies markers by position
/// and content only, so unknown fields are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(flatten)]
    pub position: LatLng,
    pub content: String,
}

impl Marker {
    pub fn new(position: LatLng, content: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
        }
    }

    /// The text line shown in the list below the map.
    pub fn list_line(&self) -> String {
        format!(
            "{}: Latitude: {}, Longitude: {}",
            self.content, self.position.lat, self.position.lng
        )
    }
}

/// Read-only markers placed on every map. They are not part of the user
/// marker collection and survive a bulk delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landmark {
    Providence,
    Byfield,
    Beijing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkInfo {
    pub position: LatLng,
    pub description: &'static str,
}

impl Landmark {
    pub const ALL: [Landmark; 3] = [Landmark::Providence, Landmark::Byfield, Landmark::Beijing];

    pub const fn info(self) -> LandmarkInfo {
        match self {
            Landmark::Providence => LandmarkInfo {
                position: LatLng::new(41.8268, -71.4025),
                description: "Where I am right now: Providence, RI",
            },
            Landmark::Byfield => LandmarkInfo {
                position: LatLng::new(42.75, -70.8983),
                description: "Where I went to high school: Byfield, MA",
            },
            Landmark::Beijing => LandmarkInfo {
                position: LatLng::new(39.9042, 116.4074),
                description: "Where I grew up: Beijing, China",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default)]
    pub nickname: Option<String>,
    /// Milliseconds since the unix epoch, when the server includes it.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl Quote {
    pub fn posted_at(&self) -> Option<OffsetDateTime> {
        let millis = self.timestamp?;
        OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000).ok()
    }

    pub fn display_line(&self) -> String {
        match self.nickname.as_deref() {
            Some(nickname) if !nickname.is_empty() => format!("{}: {}", nickname, self.text),
            _ => format!("Unknown user: {}", self.text),
        }
    }
}

/// Decoded body of the quotes endpoint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuoteEnvelope {
    pub logged_in: bool,
    pub redirect_url: String,
    pub nickname: Option<String>,
    pub quotes: Vec<Quote>,
}

impl QuoteEnvelope {
    pub fn login_status(&self) -> LoginStatus {
        match (self.logged_in, self.nickname.as_deref()) {
            (true, Some(nickname)) if !nickname.is_empty() => {
                LoginStatus::LoggedIn(nickname.to_string())
            }
            (true, _) => LoginStatus::NeedsNickname,
            (false, _) => LoginStatus::LoggedOut,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStatus {
    LoggedIn(String),
    NeedsNickname,
    LoggedOut,
}

impl LoginStatus {
    pub fn status_line(&self) -> String {
        match self {
            LoginStatus::LoggedIn(nickname) => format!("Logged in as {}", nickname),
            LoginStatus::NeedsNickname => "Logged in (no nickname set yet)".to_string(),
            LoginStatus::LoggedOut => "Not logged in yet".to_string(),
        }
    }

    /// Label for the link pointing at the redirect url.
    pub fn redirect_label(&self) -> &'static str {
        match self {
            LoginStatus::LoggedOut => "Log in",
            _ => "Log out",
        }
    }

    pub fn can_submit(&self) -> bool {
        !matches!(self, LoginStatus::LoggedOut)
    }
}
