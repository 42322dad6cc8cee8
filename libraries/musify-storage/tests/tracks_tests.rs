//! Integration tests for the tracks vertical slice


use musify_core::{Catalog, MusifyError, TrackId, TrackScope, UserId, Visibility};
use musify_storage::tracks;
use test_helpers::*;

#[tokio::test]
async fn test_create_and_get_track() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let created = tracks::create(pool, new_track("Blank", "Disfigure", "Dubstep"))
        .await
        .expect("Failed to create track");

    assert_eq!(created.title, "Blank");
    assert_eq!(created.duration_seconds, 180);
    assert_eq!(created.visibility, Visibility::Public);
    assert!(created.is_playable());
    assert_eq!(created.audio_asset_id.as_deref(), Some("blank-audio"));

    let fetched = tracks::get_by_id(pool, &created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_rejects_missing_fields() {
    let test_db = TestDb::new().await;

    let mut incomplete = new_track("Blank", "Disfigure", "Dubstep");
    incomplete.cover_url = String::new();

    let result = tracks::create(test_db.pool(), incomplete).await;
    assert!(matches!(result, Err(MusifyError::InvalidInput(_))));
    assert!(tracks::get_all_public(test_db.pool()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_scopes() {
    let test_db = TestDb::new().await;
    let db = &test_db.db;

    let dubstep = create_test_track(db.pool(), "Blank", "Dubstep").await;
    let house = create_test_track(db.pool(), "Sky High", "House").await;

    let all = db.list_tracks(&TrackScope::All).await.unwrap();
    assert_eq!(all.len(), 2);

    let by_genre = db
        .list_tracks(&TrackScope::Genre("House".to_string()))
        .await
        .unwrap();
    assert_eq!(by_genre, vec![house]);

    let by_id = db.list_tracks(&TrackScope::Id(dubstep.id.clone())).await.unwrap();
    assert_eq!(by_id, vec![dubstep]);

    let missing = db
        .list_tracks(&TrackScope::Id(TrackId::new("nope")))
        .await
        .unwrap();
    assert!(missing.is_empty());

    let unknown_genre = db
        .list_tracks(&TrackScope::Genre("Polka".to_string()))
        .await
        .unwrap();
    assert!(unknown_genre.is_empty());
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    tracks::create(pool, new_track("Nekozilla", "Different Heaven", "Electronic"))
        .await
        .unwrap();
    tracks::create(pool, new_track("Invincible", "DEAF KEV", "Dubstep"))
        .await
        .unwrap();

    let by_title = tracks::search(pool, "NEKO").await.unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].title, "Nekozilla");

    let by_artist = tracks::search(pool, "deaf").await.unwrap();
    assert_eq!(by_artist[0].title, "Invincible");

    let by_genre = tracks::search(pool, "electro").await.unwrap();
    assert_eq!(by_genre[0].title, "Nekozilla");

    assert!(tracks::search(pool, "100%").await.unwrap().is_empty());
    assert_eq!(tracks::search(pool, "  ").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_folds_ascii_case_only() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    tracks::create(pool, new_track("ÉTÉ", "Odezenne", "Chanson"))
        .await
        .unwrap();

    assert_eq!(tracks::search(pool, "ÉTÉ").await.unwrap().len(), 1);
    assert_eq!(tracks::search(pool, "Ét").await.unwrap().len(), 1);
    assert!(tracks::search(pool, "été").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unregistered_owner_can_upload() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let owner = UserId::new("not-registered-yet");

    let mut upload = new_track("Demo", "Bedroom Producer", "Lo-fi");
    upload.owner_id = Some(owner.clone());
    let track = tracks::create(pool, upload).await.unwrap();

    assert_eq!(track.owner_id, Some(owner.clone()));
    assert_eq!(tracks::get_by_owner(pool, &owner).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_private_track_is_not_listed_by_id() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let mut upload = new_track("Demo", "Bedroom Producer", "Lo-fi");
    upload.owner_id = Some(UserId::new("uploader"));
    upload.visibility = Visibility::Private;
    let track = tracks::create(pool, upload).await.unwrap();

    let listed = tracks::list(pool, &TrackScope::Id(track.id.clone())).await.unwrap();
    assert!(listed.is_empty());
    assert!(tracks::get_by_id(pool, &track.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_private_tracks_are_hidden_from_catalog() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let owner = create_test_user(pool, "uploader").await;

    let mut upload = new_track("Demo", "Bedroom Producer", "Lo-fi");
    upload.owner_id = Some(owner.id.clone());
    upload.visibility = Visibility::Private;
    let track = tracks::create(pool, upload).await.unwrap();

    assert!(tracks::get_all_public(pool).await.unwrap().is_empty());
    assert!(tracks::search(pool, "demo").await.unwrap().is_empty());
    assert_eq!(tracks::get_by_owner(pool, &owner.id).await.unwrap().len(), 1);

    let published = tracks::set_visibility(pool, &owner.id, &track.id, Visibility::Public)
        .await
        .unwrap();
    assert_eq!(published.visibility, Visibility::Public);
    assert_eq!(tracks::get_all_public(pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_set_visibility_requires_owner() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let owner = create_test_user(pool, "uploader").await;

    let mut upload = new_track("Demo", "Bedroom Producer", "Lo-fi");
    upload.owner_id = Some(owner.id.clone());
    let track = tracks::create(pool, upload).await.unwrap();

    let result =
        tracks::set_visibility(pool, &UserId::new("someone-else"), &track.id, Visibility::Private)
            .await;
    assert!(matches!(
        result,
        Err(MusifyError::PermissionDeniedWithContext(_))
    ));
}

#[tokio::test]
async fn test_delete_track() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let track = create_test_track(pool, "Blank", "Dubstep").await;

    tracks::delete(pool, &track.id).await.unwrap();
    assert!(tracks::get_by_id(pool, &track.id).await.unwrap().is_none());

    let again = tracks::delete(pool, &track.id).await;
    assert!(matches!(again, Err(MusifyError::NotFound { .. })));
}
