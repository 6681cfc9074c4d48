mod fixtures;
mod server;
pub use fixtures::*;
pub use server::*;

// Re-export commonly used types from markerboard for tests
pub use markerboard::{
    Board, BoardConfig, BoardError, HeadlessSurface, HttpMarkerStore, LatLng, LoginStatus,
    MapSurface, Marker, MarkerStore, NoticeKind, PortfolioClient, SqliteMarkerStore,
    map::{PinStyle, SessionState, SubmitResult},
};
