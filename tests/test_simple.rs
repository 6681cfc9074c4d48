mod common;

use common::*;

#[tokio::test]
async fn test_simple() -> anyhow::Result<()> {
    let store = RecordingStore::new();
    let board = loaded_board(store.clone()).await?;

    assert!(board.view().markers().is_empty());
    assert!(board.view().list().is_empty());
    assert_eq!(board.view().surface().landmark_count(), 3);
    assert_eq!(store.record().list_calls, 1);

    Ok(())
}
