use tracing::{debug, info};

use crate::{
    config::BoardConfig,
    core::store::MarkerStore,
    error::BoardError,
    models::{LatLng, LoginStatus, Marker},
};

use super::{
    surface::{MapSurface, PinId},
    view::{CommitOutcome, MapView},
};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult {
    Committed(Marker),
    Cancelled,
    NoSession,
}

/// A [`MapView`] bound to a [`MarkerStore`].
///
/// Every store call is awaited before the method returns: the map is updated
/// optimistically first and rolled back when the store reports a failure.
pub struct Board<S, R> {
    store: S,
    view: MapView<R>,
    config: BoardConfig,
}

impl<S: MarkerStore, R: MapSurface> Board<S, R> {
    pub fn new(store: S, surface: R, config: BoardConfig) -> Self {
        Self {
            store,
            view: MapView::new(surface),
            config,
        }
    }

    /// Sets up the map and renders what the store holds.
    pub async fn initialize(&mut self) -> Result<usize, BoardError> {
        self.view.initialize(&self.config);
        self.load_persisted_markers().await
    }

    pub async fn load_persisted_markers(&mut self) -> Result<usize, BoardError> {
        if !self.view.is_initialized() {
            return Err(BoardError::NotInitialized);
        }
        match self.store.list().await {
            Ok(markers) => self.view.apply_loaded(markers),
            Err(e) => {
                self.view.report("Could not load markers", &e);
                Err(e)
            }
        }
    }

    /// See [`MapView::set_login_status`].
    pub fn set_login_status(&mut self, status: Option<LoginStatus>) {
        self.view.set_login_status(status);
    }

    pub fn on_map_click(&mut self, position: LatLng) -> Result<PinId, BoardError> {
        self.view.on_map_click(position)
    }

    pub fn close_edit(&mut self) -> bool {
        self.view.close_edit()
    }

    /// Submits the edit session's text.
    pub async fn submit_edit(&mut self, text: &str) -> Result<SubmitResult, BoardError> {
        match self.view.begin_commit(text) {
            CommitOutcome::Idle => Ok(SubmitResult::NoSession),
            CommitOutcome::Cancelled => {
                debug!("edit session cancelled");
                Ok(SubmitResult::Cancelled)
            }
            CommitOutcome::Pending(pending) => {
                let result = self.store.create(pending.marker()).await;
                let marker = pending.marker().clone();
                self.view.settle_commit(pending, result.as_ref().copied());
                result?;
                info!(position = %marker.position, "marker committed");
                Ok(SubmitResult::Committed(marker))
            }
        }
    }

    /// Removes every user marker from the map and the store. Issues exactly
    /// one delete request, even when nothing is rendered.
    pub async fn clear_all(&mut self) -> Result<usize, BoardError> {
        if !self.view.is_initialized() {
            return Err(BoardError::NotInitialized);
        }
        let pending = self.view.begin_clear();
        let removed = pending.removed().len();
        let result = self.store.delete_all().await;
        self.view.settle_clear(pending, result.as_ref().copied());
        result.map(|()| removed)
    }

    pub fn teardown(&mut self) {
        self.view.teardown();
    }

    pub fn view(&self) -> &MapView<R> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut MapView<R> {
        &mut self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }
}
