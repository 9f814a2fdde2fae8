//! Integration tests for the membership slice
//!
//! - Append positions (max + 1, starting at 1)
//! - Duplicate detection
//! - Removal without renumbering
//! - Missing collection / track references


use tempo_core::{types::*, TempoError};
use tempo_storage::{memberships, positions};
use test_helpers::*;

#[tokio::test]
async fn test_first_item_gets_position_one() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = UserId::new("alice");
    let playlist = create_test_playlist(pool, "Empty", &user).await;
    let track = create_test_track(pool, "Track 1", None).await;

    assert_eq!(positions::next_position(pool, &playlist).await.unwrap(), 1);

    let membership = memberships::add_item(pool, &playlist, &track, &user)
        .await
        .expect("Failed to add track");

    assert_eq!(membership.position, 1);
    assert_eq!(membership.collection_id, playlist);
    assert_eq!(membership.track_id, track);
    assert_eq!(membership.added_by, user);
}

#[tokio::test]
async fn test_append_goes_after_current_max() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = UserId::new("alice");
    let playlist = create_test_playlist(pool, "Test", &user).await;
    let tracks = create_test_tracks(pool, "Track", 3).await;

    add_all(pool, &playlist, &tracks[..2], &user).await;

    // Leave a gap at the top: only position 2 remains
    memberships::remove_item(pool, &playlist, &tracks[0]).await.unwrap();
    assert_eq!(positions::next_position(pool, &playlist).await.unwrap(), 3);

    let membership = memberships::add_item(pool, &playlist, &tracks[2], &user)
        .await
        .unwrap();
    assert_eq!(membership.position, 3);

    let order = read_order(pool, &playlist).await;
    assert_eq!(order.last().unwrap().0, tracks[2]);
}

#[tokio::test]
async fn test_added_membership_matches_stored_row() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = UserId::new("alice");
    let playlist = create_test_playlist(pool, "Test", &user).await;
    let track = create_test_track(pool, "Track", None).await;

    let added = memberships::add_item(pool, &playlist, &track, &user)
        .await
        .unwrap();
    let stored = memberships::get(pool, &playlist, &track)
        .await
        .unwrap()
        .expect("membership should exist");

    assert_eq!(added, stored);
}

#[tokio::test]
async fn test_duplicate_add_is_rejected_and_leaves_collection_unchanged() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = UserId::new("alice");
    let playlist = create_test_playlist(pool, "Test", &user).await;
    let tracks = create_test_tracks(pool, "Track", 2).await;
    add_all(pool, &playlist, &tracks, &user).await;

    let before = snapshot(pool, &playlist).await;

    let result = memberships::add_item(pool, &playlist, &tracks[0], &UserId::new("bob")).await;
    match result {
        Err(TempoError::DuplicateMembership {
            collection_id,
            track_id,
        }) => {
            assert_eq!(collection_id, playlist);
            assert_eq!(track_id, tracks[0]);
        }
        other => panic!("expected DuplicateMembership, got {:?}", other),
    }

    assert_eq!(snapshot(pool, &playlist).await, before);

    // The original adder is kept
    let membership = memberships::get(pool, &playlist, &tracks[0])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(membership.added_by, user);
}

#[tokio::test]
async fn test_same_track_in_two_collections() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = UserId::new("alice");
    let first = create_test_playlist(pool, "First", &user).await;
    let second = create_test_playlist(pool, "Second", &user).await;
    let track = create_test_track(pool, "Shared", None).await;

    memberships::add_item(pool, &first, &track, &user).await.unwrap();
    let membership = memberships::add_item(pool, &second, &track, &user)
        .await
        .unwrap();

    // Positions are per collection
    assert_eq!(membership.position, 1);
}

#[tokio::test]
async fn test_remove_keeps_gaps() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = UserId::new("alice");
    let playlist = create_test_playlist(pool, "Test", &user).await;
    let tracks = create_test_tracks(pool, "Track", 3).await;
    add_all(pool, &playlist, &tracks, &user).await;

    let removed = memberships::remove_item(pool, &playlist, &tracks[1])
        .await
        .expect("Failed to remove track");
    assert!(removed);

    assert_eq!(
        snapshot(pool, &playlist).await,
        vec![(tracks[0].clone(), 1), (tracks[2].clone(), 3)]
    );
}

#[tokio::test]
async fn test_remove_non_member_returns_false() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = UserId::new("alice");
    let playlist = create_test_playlist(pool, "Test", &user).await;
    let tracks = create_test_tracks(pool, "Track", 2).await;
    add_all(pool, &playlist, &tracks[..1], &user).await;

    let before = snapshot(pool, &playlist).await;

    assert!(!memberships::remove_item(pool, &playlist, &tracks[1]).await.unwrap());
    assert_eq!(snapshot(pool, &playlist).await, before);

    // Removing twice is the same as removing once
    assert!(memberships::remove_item(pool, &playlist, &tracks[0]).await.unwrap());
    assert!(!memberships::remove_item(pool, &playlist, &tracks[0]).await.unwrap());
}

#[tokio::test]
async fn test_operations_on_missing_collection_are_quiet() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let missing = CollectionId::new("does-not-exist");
    let track = create_test_track(pool, "Track", None).await;

    assert!(!memberships::remove_item(pool, &missing, &track).await.unwrap());
    assert!(!memberships::is_member(pool, &missing, &track).await.unwrap());
    assert_eq!(memberships::item_count(pool, &missing).await.unwrap(), 0);
    assert_eq!(positions::next_position(pool, &missing).await.unwrap(), 1);
}

#[tokio::test]
async fn test_add_to_missing_collection_fails() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let missing = CollectionId::new("does-not-exist");
    let track = create_test_track(pool, "Track", None).await;

    let result = memberships::add_item(pool, &missing, &track, &UserId::new("alice")).await;
    assert!(matches!(result, Err(TempoError::CollectionNotFound(id)) if id == missing));
}

#[tokio::test]
async fn test_add_unknown_track_fails() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = UserId::new("alice");
    let playlist = create_test_playlist(pool, "Test", &user).await;
    let unknown = TrackId::new("not-in-catalog");

    let result = memberships::add_item(pool, &playlist, &unknown, &user).await;
    assert!(matches!(result, Err(TempoError::TrackNotFound(id)) if id == unknown));
    assert_eq!(memberships::item_count(pool, &playlist).await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_after_largest_position_fails_cleanly() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = UserId::new("alice");
    let playlist = create_test_playlist(pool, "Test", &user).await;
    let tracks = create_test_tracks(pool, "Track", 2).await;
    add_all(pool, &playlist, &tracks[..1], &user).await;

    // Only reachable by writing the row directly; reorders stop at MAX_POSITION
    sqlx::query("UPDATE collection_items SET position = ? WHERE collection_id = ? AND track_id = ?")
        .bind(i64::MAX)
        .bind(&playlist)
        .bind(&tracks[0])
        .execute(pool)
        .await
        .unwrap();

    let result = memberships::add_item(pool, &playlist, &tracks[1], &user).await;
    assert!(matches!(result, Err(TempoError::InvalidInput(_))));

    assert_eq!(
        snapshot(pool, &playlist).await,
        vec![(tracks[0].clone(), i64::MAX)]
    );
    assert_eq!(
        read_order(pool, &playlist).await,
        vec![(tracks[0].clone(), i64::MAX)]
    );
    assert!(!memberships::is_member(pool, &playlist, &tracks[1]).await.unwrap());
}

#[tokio::test]
async fn test_non_integer_position_is_refused_by_schema() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = UserId::new("alice");
    let playlist = create_test_playlist(pool, "Test", &user).await;
    let tracks = create_test_tracks(pool, "Track", 1).await;
    add_all(pool, &playlist, &tracks, &user).await;

    let result = sqlx::query(
        "UPDATE collection_items SET position = 1.5 WHERE collection_id = ? AND track_id = ?",
    )
    .bind(&playlist)
    .bind(&tracks[0])
    .execute(pool)
    .await;

    assert!(result.is_err());
    assert_eq!(snapshot(pool, &playlist).await, vec![(tracks[0].clone(), 1)]);
}

#[tokio::test]
async fn test_is_member_and_count() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = UserId::new("alice");
    let playlist = create_test_playlist(pool, "Test", &user).await;
    let tracks = create_test_tracks(pool, "Track", 3).await;
    add_all(pool, &playlist, &tracks[..2], &user).await;

    assert!(memberships::is_member(pool, &playlist, &tracks[0]).await.unwrap());
    assert!(memberships::is_member(pool, &playlist, &tracks[1]).await.unwrap());
    assert!(!memberships::is_member(pool, &playlist, &tracks[2]).await.unwrap());
    assert_eq!(memberships::item_count(pool, &playlist).await.unwrap(), 2);
}

#[tokio::test]
async fn test_membership_changes_bump_updated_at() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = UserId::new("alice");
    let playlist = create_test_playlist(pool, "Test", &user).await;
    let track = create_test_track(pool, "Track", None).await;

    let before = tempo_storage::collections::get_by_id(pool, &playlist)
        .await
        .unwrap()
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    memberships::add_item(pool, &playlist, &track, &user).await.unwrap();

    let after = tempo_storage::collections::get_by_id(pool, &playlist)
        .await
        .unwrap()
        .unwrap();

    assert!(after.updated_at > before.updated_at);
    assert_eq!(after.created_at, before.created_at);
}
