//! Integration tests for the comments vertical slice


use musify_core::{
    CommentId, CommentStore, MusifyError, NewComment, TrackId, UserId, MAX_COMMENTS_PER_TRACK,
};
use musify_storage::comments;
use test_helpers::*;

fn comment_on(track_id: &TrackId, user_id: &UserId, text: &str) -> NewComment {
    NewComment {
        track_id: track_id.clone(),
        user_id: user_id.clone(),
        username: "listener".to_string(),
        text: text.to_string(),
    }
}

#[tokio::test]
async fn test_create_comment() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = create_test_user(pool, "listener").await;
    let track = create_test_track(pool, "Blank", "Dubstep").await;

    let comment = comments::create(pool, comment_on(&track.id, &user.id, "  banger "))
        .await
        .unwrap();

    assert_eq!(comment.text, "banger");
    assert_eq!(comment.track_id, track.id);
    assert!(!comment.created_at.is_empty());
}

#[tokio::test]
async fn test_create_requires_existing_track_and_user() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = create_test_user(pool, "listener").await;
    let track = create_test_track(pool, "Blank", "Dubstep").await;

    let unknown_track =
        comments::create(pool, comment_on(&TrackId::new("nope"), &user.id, "hi")).await;
    assert!(matches!(unknown_track, Err(MusifyError::NotFound { .. })));

    let unknown_user =
        comments::create(pool, comment_on(&track.id, &UserId::new("ghost"), "hi")).await;
    assert!(matches!(unknown_user, Err(MusifyError::NotFound { .. })));

    let blank = comments::create(pool, comment_on(&track.id, &user.id, " ")).await;
    assert!(matches!(blank, Err(MusifyError::InvalidInput(_))));
}

#[tokio::test]
async fn test_listing_caps_per_track_newest_first() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = create_test_user(pool, "listener").await;
    let busy = create_test_track(pool, "Blank", "Dubstep").await;
    let quiet = create_test_track(pool, "Sky High", "House").await;

    for i in 0..12 {
        comments::create(pool, comment_on(&busy.id, &user.id, &format!("comment {i}")))
            .await
            .unwrap();
    }
    comments::create(pool, comment_on(&quiet.id, &user.id, "only one"))
        .await
        .unwrap();

    let grouped = test_db.db.list_comments().await.unwrap();

    let busy_comments = &grouped[&busy.id];
    assert_eq!(busy_comments.len(), MAX_COMMENTS_PER_TRACK);
    assert_eq!(busy_comments[0].text, "comment 11");
    assert_eq!(busy_comments[9].text, "comment 2");
    assert_eq!(grouped[&quiet.id].len(), 1);
}

#[tokio::test]
async fn test_delete_comment() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = create_test_user(pool, "listener").await;
    let track = create_test_track(pool, "Blank", "Dubstep").await;
    let comment = comments::create(pool, comment_on(&track.id, &user.id, "hi"))
        .await
        .unwrap();

    comments::delete(pool, &comment.id).await.unwrap();
    assert!(comments::get_by_id(pool, &comment.id).await.unwrap().is_none());

    let missing = comments::delete(pool, &CommentId::new("gone")).await;
    assert!(matches!(missing, Err(MusifyError::NotFound { .. })));
}
