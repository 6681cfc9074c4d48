mod http;
mod sqlite;

use std::future::Future;

use crate::{error::BoardError, models::Marker};

pub use http::HttpMarkerStore;
pub use sqlite::SqliteMarkerStore;

/// The source of truth for persisted markers.
///
/// Markers are immutable once stored: there is no per-marker update or
/// delete, only create and a bulk delete.
pub trait MarkerStore {
    /// Every stored marker, in store order.
    fn list(&self) -> impl Future<Output = Result<Vec<Marker>, BoardError>> + Send;
    fn create(&self, marker: &Marker) -> impl Future<Output = Result<(), BoardError>> + Send;
    fn delete_all(&self) -> impl Future<Output = Result<(), BoardError>> + Send;
}
