use tracing::{debug, info, warn};

use crate::{
    config::BoardConfig,
    error::{BoardError, Notice, NoticeKind},
    models::{LatLng, Landmark, LoginStatus, Marker},
};

use super::{
    collection::{MarkerCollection, MarkerList},
    session::{EditSession, SessionEnd},
    surface::{MapSurface, PinId, PinStyle},
};

/// A marker that is on the map but whose save has not been confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCommit {
    pin: PinId,
    marker: Marker,
}

impl PendingCommit {
    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Rendered optimistically; hand the marker to the store and settle.
    Pending(PendingCommit),
    /// Empty text: the edit pin is gone and nothing is saved.
    Cancelled,
    /// There was no session to submit.
    Idle,
}

/// What a bulk clear took off the map, kept until the store answers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PendingClear {
    removed: Vec<Marker>,
}

impl PendingClear {
    pub fn removed(&self) -> &[Marker] {
        &self.removed
    }
}

/// The map model: premade pins, rendered user markers, the visible list and
/// the edit session. It never talks to the store; callers run the request
/// between a `begin_*` and the matching `settle_*`.
#[derive(Debug)]
pub struct MapView<R> {
    surface: R,
    initialized: bool,
    landmarks: Vec<(Landmark, PinId)>,
    markers: MarkerCollection,
    list: MarkerList,
    session: EditSession,
    /// Pins of commits the store has not answered yet.
    unsaved: Vec<PinId>,
    /// `None` when the store needs no login.
    login: Option<LoginStatus>,
    notices: Vec<Notice>,
}

impl<R: MapSurface> MapView<R> {
    pub fn new(surface: R) -> Self {
        Self {
            surface,
            initialized: false,
            landmarks: Vec::new(),
            markers: MarkerCollection::default(),
            list: MarkerList::default(),
            session: EditSession::default(),
            unsaved: Vec::new(),
            login: None,
            notices: Vec::new(),
        }
    }

    /// Centers the map and places the premade pins.
    pub fn initialize(&mut self, config: &BoardConfig) {
        if self.initialized {
            warn!("map view already initialized");
            return;
        }
        self.surface.set_viewport(config.center, config.zoom);
        for landmark in Landmark::ALL {
            let info = landmark.info();
            let pin = self.surface.add_pin(info.position, PinStyle::Landmark);
            self.surface.attach_info(pin, info.description);
            self.landmarks.push((landmark, pin));
        }
        self.initialized = true;
        info!(center = %config.center, zoom = config.zoom, "map view initialized");
    }

    /// Removes everything this view placed and returns it to the
    /// uninitialized state.
    pub fn teardown(&mut self) {
        if let Some(pin) = self.session.close() {
            self.surface.remove_pin(pin);
        }
        for entry in self.markers.take_all() {
            self.surface.remove_pin(entry.pin);
        }
        for (_, pin) in self.landmarks.drain(..) {
            self.surface.remove_pin(pin);
        }
        self.unsaved.clear();
        self.list.clear();
        self.initialized = false;
        debug!("map view torn down");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn ensure_initialized(&self) -> Result<(), BoardError> {
        if self.initialized {
            Ok(())
        } else {
            Err(BoardError::NotInitialized)
        }
    }

    /// Adds a permanent pin with its info text, a collection entry and a
    /// list line.
    pub fn render_marker(&mut self, marker: Marker) -> Result<PinId, BoardError> {
        self.ensure_initialized()?;
        let pin = self.surface.add_pin(marker.position, PinStyle::User);
        self.surface.attach_info(pin, &marker.content);
        self.list.push(pin, marker.list_line());
        self.markers.push(pin, marker);
        Ok(pin)
    }

    /// Renders loaded records in the order given. Loading twice renders
    /// twice; nothing is deduplicated.
    pub fn apply_loaded(&mut self, markers: Vec<Marker>) -> Result<usize, BoardError> {
        self.ensure_initialized()?;
        let count = markers.len();
        for marker in markers {
            self.render_marker(marker)?;
        }
        debug!(count, "rendered loaded markers");
        Ok(count)
    }

    /// Records what the backend said about the current user. New markers
    /// can only be started while the status allows submitting.
    pub fn set_login_status(&mut self, status: Option<LoginStatus>) {
        debug!(?status, "login status updated");
        self.login = status;
    }

    pub fn login_status(&self) -> Option<&LoginStatus> {
        self.login.as_ref()
    }

    /// Starts an edit session at `position`, dropping the previous one.
    pub fn on_map_click(&mut self, position: LatLng) -> Result<PinId, BoardError> {
        self.ensure_initialized()?;
        if self.login.as_ref().is_some_and(|status| !status.can_submit()) {
            let err = BoardError::LoginRequired;
            self.report("Could not start a marker", &err);
            return Err(err);
        }
        let pin = self.surface.add_pin(position, PinStyle::Editing);
        if let Some(previous) = self.session.start(position, pin) {
            debug!(?previous, "discarding previous edit session");
            self.surface.remove_pin(previous);
        }
        self.surface.open_input(pin);
        Ok(pin)
    }

    /// The input was closed without submitting.
    pub fn close_edit(&mut self) -> bool {
        match self.session.close() {
            Some(pin) => {
                self.surface.remove_pin(pin);
                true
            }
            None => false,
        }
    }

    /// Ends the edit session. Non-empty text is rendered right away and
    /// returned as pending.
    pub fn begin_commit(&mut self, text: &str) -> CommitOutcome {
        let Some((edit_pin, end)) = self.session.submit(text) else {
            return CommitOutcome::Idle;
        };
        self.surface.remove_pin(edit_pin);
        match end {
            SessionEnd::Cancelled => CommitOutcome::Cancelled,
            SessionEnd::Committed(marker) => match self.render_marker(marker.clone()) {
                Ok(pin) => {
                    self.unsaved.push(pin);
                    CommitOutcome::Pending(PendingCommit { pin, marker })
                }
                Err(e) => {
                    self.report("Could not place marker", &e);
                    CommitOutcome::Cancelled
                }
            },
        }
    }

    /// Applies the store's answer for a pending commit. A failed save takes
    /// the optimistic pin and list line back off. Returns whether anything
    /// was rolled back.
    pub fn settle_commit(
        &mut self,
        pending: PendingCommit,
        result: Result<(), &BoardError>,
    ) -> bool {
        self.unsaved.retain(|pin| *pin != pending.pin);
        let Err(e) = result else {
            debug!(position = %pending.marker.position, "marker saved");
            return false;
        };
        warn!(error = %e, "rolling back unsaved marker");
        let was_rendered = self.markers.remove_pin(pending.pin).is_some();
        self.list.remove_pin(pending.pin);
        if was_rendered && !self.surface.remove_pin(pending.pin) {
            self.push_notice(Notice::new(
                NoticeKind::MissingTarget,
                "Unsaved marker was already gone from the map",
            ));
        }
        self.report("Could not save marker", e);
        was_rendered
    }

    /// Takes every saved user marker off the map along with its list line.
    /// Markers whose save is still pending stay until their commit settles,
    /// so a failed clear never brings back a marker the store lacks.
    pub fn begin_clear(&mut self) -> PendingClear {
        let taken = self
            .markers
            .take_where(|entry| !self.unsaved.contains(&entry.pin));
        let removed = taken
            .into_iter()
            .map(|entry| {
                self.surface.remove_pin(entry.pin);
                self.list.remove_pin(entry.pin);
                entry.marker
            })
            .collect();
        PendingClear { removed }
    }

    /// Applies the store's answer for a bulk delete. On failure the removed
    /// markers are rendered again, after anything added in the meantime.
    /// Returns how many were restored.
    pub fn settle_clear(&mut self, pending: PendingClear, result: Result<(), &BoardError>) -> usize {
        let count = pending.removed.len();
        let Err(e) = result else {
            info!(count, "markers deleted");
            return 0;
        };
        warn!(error = %e, count, "restoring markers after failed delete");
        let mut restored = 0;
        for marker in pending.removed {
            if self.render_marker(marker).is_ok() {
                restored += 1;
            }
        }
        self.report("Could not delete markers", e);
        restored
    }

    /// Queues a notice describing `err`.
    pub fn report(&mut self, action: &str, err: &BoardError) {
        self.push_notice(Notice::from_error(action, err));
    }

    fn push_notice(&mut self, notice: Notice) {
        warn!(kind = ?notice.kind, "{}", notice.message);
        self.notices.push(notice);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn markers(&self) -> &MarkerCollection {
        &self.markers
    }

    pub fn list(&self) -> &MarkerList {
        &self.list
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn landmarks(&self) -> impl Iterator<Item = &(Landmark, PinId)> {
        self.landmarks.iter()
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }
}
