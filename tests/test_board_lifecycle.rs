//! Integration tests for setting up, loading and tearing down the board.
//!
//! Tests cover:
//! - Premade pins and the initial viewport
//! - Rendering persisted markers in store order
//! - Repeated loads and failed loads
//! - Operations on a board that was never initialized

mod common;

use common::*;

#[tokio::test]
async fn test_initialize_places_landmarks_and_centers_map() -> anyhow::Result<()> {
    let board = loaded_board(RecordingStore::new()).await?;

    let surface = board.view().surface();
    assert_eq!(surface.landmark_count(), 3);
    assert_eq!(surface.count_style(PinStyle::User), 0);
    assert_eq!(surface.viewport(), Some((LatLng::new(28.2072, -177.3735), 3)));

    let infos: Vec<_> = board
        .view()
        .landmarks()
        .filter_map(|(_, pin)| surface.click_pin(*pin))
        .collect();
    assert_eq!(infos.len(), 3);
    assert!(infos.iter().all(|info| !info.is_empty()));

    Ok(())
}

#[tokio::test]
async fn test_load_renders_markers_in_store_order() -> anyhow::Result<()> {
    let store = RecordingStore::with_markers(sample_markers());
    let board = loaded_board(store).await?;

    assert_eq!(board.view().markers().len(), 3);
    assert_eq!(
        list_lines(&board),
        [
            "first: Latitude: 41.824, Longitude: -71.4128",
            "second: Latitude: 42.7526, Longitude: -70.9231",
            "third: Latitude: 39.9042, Longitude: 116.4074",
        ]
    );
    let contents: Vec<_> = board
        .view()
        .markers()
        .markers()
        .map(|m| m.content.clone())
        .collect();
    assert_eq!(contents, ["first", "second", "third"]);
    assert_eq!(board.view().surface().count_style(PinStyle::User), 3);

    Ok(())
}

#[tokio::test]
async fn test_rendered_marker_info_is_its_content() -> anyhow::Result<()> {
    let board = loaded_board(RecordingStore::with_markers(sample_markers())).await?;

    let surface = board.view().surface();
    for entry in board.view().markers().iter() {
        assert_eq!(surface.click_pin(entry.pin), Some(entry.marker.content.as_str()));
    }

    Ok(())
}

#[tokio::test]
async fn test_loading_twice_duplicates_markers() -> anyhow::Result<()> {
    let store = RecordingStore::with_markers(sample_markers());
    let mut board = loaded_board(store.clone()).await?;

    let count = board.load_persisted_markers().await?;

    assert_eq!(count, 3);
    assert_eq!(board.view().markers().len(), 6);
    assert_eq!(board.view().list().len(), 6);
    assert_eq!(store.record().list_calls, 2);

    Ok(())
}

#[tokio::test]
async fn test_failed_load_leaves_map_usable() -> anyhow::Result<()> {
    let store = RecordingStore::failing();
    let mut board = board_with(store.clone());

    let result = board.initialize().await;

    assert!(result.is_err());
    assert!(board.view().is_initialized());
    assert!(board.view().markers().is_empty());
    let notices = board.view_mut().take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Network);

    store.set_failing(false);
    board.on_map_click(LatLng::new(1.0, 2.0))?;
    assert!(board.view().session().is_editing());

    Ok(())
}

#[tokio::test]
async fn test_operations_require_initialize() -> anyhow::Result<()> {
    let store = RecordingStore::with_markers(sample_markers());
    let mut board = board_with(store.clone());

    assert!(matches!(
        board.load_persisted_markers().await,
        Err(BoardError::NotInitialized)
    ));
    assert!(matches!(
        board.on_map_click(LatLng::new(0.0, 0.0)),
        Err(BoardError::NotInitialized)
    ));
    assert!(matches!(board.clear_all().await, Err(BoardError::NotInitialized)));
    assert_eq!(store.record().list_calls, 0);
    assert_eq!(store.delete_calls(), 0);

    Ok(())
}

#[tokio::test]
async fn test_teardown_then_initialize_again() -> anyhow::Result<()> {
    let store = RecordingStore::with_markers(sample_markers());
    let mut board = loaded_board(store).await?;
    board.on_map_click(LatLng::new(5.0, 5.0))?;

    board.teardown();

    assert_eq!(board.view().surface().pin_count(), 0);
    assert!(board.view().list().is_empty());
    assert!(!board.view().is_initialized());

    board.initialize().await?;
    assert_eq!(board.view().surface().landmark_count(), 3);
    assert_eq!(board.view().markers().len(), 3);

    Ok(())
}
