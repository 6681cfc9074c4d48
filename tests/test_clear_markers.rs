//! Integration tests for deleting every marker.

mod common;

use common::*;

#[tokio::test]
async fn test_clear_removes_markers_with_one_request() -> anyhow::Result<()> {
    let store = RecordingStore::with_markers(sample_markers());
    let mut board = loaded_board(store.clone()).await?;

    let removed = board.clear_all().await?;

    assert_eq!(removed, 3);
    assert_eq!(store.delete_calls(), 1);
    assert!(store.stored().is_empty());
    assert_eq!(board.view().markers().len(), 0);
    assert!(board.view().list().is_empty());
    assert_eq!(board.view().surface().count_style(PinStyle::User), 0);
    // premade pins stay
    assert_eq!(board.view().surface().landmark_count(), 3);

    Ok(())
}

#[tokio::test]
async fn test_clear_on_empty_map_still_sends_request() -> anyhow::Result<()> {
    let store = RecordingStore::new();
    let mut board = loaded_board(store.clone()).await?;

    assert_eq!(board.clear_all().await?, 0);
    assert_eq!(store.delete_calls(), 1);

    Ok(())
}

#[tokio::test]
async fn test_clear_keeps_open_edit_session() -> anyhow::Result<()> {
    let store = RecordingStore::with_markers(sample_markers());
    let mut board = loaded_board(store.clone()).await?;
    board.on_map_click(LatLng::new(7.0, 8.0))?;

    board.clear_all().await?;

    assert!(board.view().session().is_editing());
    assert_eq!(board.view().surface().count_style(PinStyle::Editing), 1);

    Ok(())
}

#[tokio::test]
async fn test_failed_clear_restores_markers() -> anyhow::Result<()> {
    let store = RecordingStore::with_markers(sample_markers());
    let mut board = loaded_board(store.clone()).await?;
    store.set_failing(true);

    assert!(board.clear_all().await.is_err());

    assert_eq!(store.delete_calls(), 1);
    assert_eq!(board.view().markers().len(), 3);
    assert_eq!(board.view().list().len(), 3);
    assert_eq!(board.view().notices().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_clear_after_failed_load_still_deletes() -> anyhow::Result<()> {
    let store = RecordingStore::with_markers(sample_markers());
    store.set_failing_list(true);
    let mut board = board_with(store.clone());

    assert!(board.initialize().await.is_err());
    let removed = board.clear_all().await?;

    // nothing was shown, but the stored markers still go
    assert_eq!(removed, 0);
    assert_eq!(store.delete_calls(), 1);
    assert!(store.stored().is_empty());

    Ok(())
}
