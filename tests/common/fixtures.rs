use std::sync::{Arc, Mutex, MutexGuard};

use markerboard::{Board, BoardConfig, BoardError, HeadlessSurface, LatLng, Marker, MarkerStore};

/// What a [`RecordingStore`] has seen.
#[derive(Debug, Default)]
pub struct Recorded {
    /// Markers `list` answers with. Successful creates append here.
    pub stored: Vec<Marker>,
    /// Every create request, in order, including failed ones.
    pub create_requests: Vec<Marker>,
    pub list_calls: usize,
    pub delete_calls: usize,
    pub failing: bool,
    /// Fails only `list`, leaving writes working.
    pub failing_list: bool,
}

/// In-memory store that records every request. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingStore {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_markers(markers: Vec<Marker>) -> Self {
        let store = Self::new();
        store.record().stored = markers;
        store
    }

    /// A store whose every request fails.
    pub fn failing() -> Self {
        let store = Self::new();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.record().failing = failing;
    }

    pub fn set_failing_list(&self, failing: bool) {
        self.record().failing_list = failing;
    }

    pub fn record(&self) -> MutexGuard<'_, Recorded> {
        self.inner.lock().expect("recording store poisoned")
    }

    pub fn create_requests(&self) -> Vec<Marker> {
        self.record().create_requests.clone()
    }

    pub fn delete_calls(&self) -> usize {
        self.record().delete_calls
    }

    pub fn stored(&self) -> Vec<Marker> {
        self.record().stored.clone()
    }
}

fn unavailable(endpoint: &'static str) -> BoardError {
    BoardError::Status {
        endpoint,
        status: 503,
    }
}

impl MarkerStore for RecordingStore {
    async fn list(&self) -> Result<Vec<Marker>, BoardError> {
        let mut record = self.record();
        record.list_calls += 1;
        if record.failing || record.failing_list {
            return Err(unavailable("/marker"));
        }
        Ok(record.stored.clone())
    }

    async fn create(&self, marker: &Marker) -> Result<(), BoardError> {
        let mut record = self.record();
        record.create_requests.push(marker.clone());
        if record.failing {
            return Err(unavailable("/marker"));
        }
        record.stored.push(marker.clone());
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), BoardError> {
        let mut record = self.record();
        record.delete_calls += 1;
        if record.failing {
            return Err(unavailable("/deleteMarker"));
        }
        record.stored.clear();
        Ok(())
    }
}

pub fn marker(lat: f64, lng: f64, content: &str) -> Marker {
    Marker::new(LatLng::new(lat, lng), content)
}

/// Three markers in a known store order.
pub fn sample_markers() -> Vec<Marker> {
    vec![
        marker(41.824, -71.4128, "first"),
        marker(42.7526, -70.9231, "second"),
        marker(39.9042, 116.4074, "third"),
    ]
}

pub type TestBoard = Board<RecordingStore, HeadlessSurface>;

/// A board over `store` that has not been initialized yet.
pub fn board_with(store: RecordingStore) -> TestBoard {
    Board::new(store, HeadlessSurface::new(), BoardConfig::default())
}

/// A board over `store` that has been initialized and has loaded.
pub async fn loaded_board(store: RecordingStore) -> anyhow::Result<TestBoard> {
    let mut board = board_with(store);
    board.initialize().await?;
    Ok(board)
}

pub fn list_lines(board: &TestBoard) -> Vec<String> {
    board.view().list().lines().map(str::to_string).collect()
}
