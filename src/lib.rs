pub mod config;
pub mod core;
pub mod error;
pub mod map;
pub mod models;

pub use config::BoardConfig;
pub use crate::core::{HttpMarkerStore, MarkerStore, PortfolioClient, SqliteMarkerStore};
pub use error::{BoardError, Notice, NoticeKind};
pub use map::{Board, HeadlessSurface, MapSurface, MapView};
pub use models::{LatLng, Landmark, LoginStatus, Marker, Quote, QuoteEnvelope};

#[cfg(feature = "gui")]
pub mod gui;
