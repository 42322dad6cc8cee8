//! Integration tests for the users vertical slice


use musify_core::{MusifyError, PlaylistStore, RegisterUser, UserId, UserStore};
use test_helpers::*;

#[tokio::test]
async fn test_register_creates_user_and_default_playlist() {
    let test_db = TestDb::new().await;
    let user = create_test_user(test_db.pool(), "listener").await;

    assert_eq!(user.email, "listener@example.com");
    assert!(!user.is_admin);

    let playlists = test_db.db.list_playlists(&user.id).await.unwrap();
    assert_eq!(playlists.len(), 1);
    assert!(playlists[0].is_default);
}

#[tokio::test]
async fn test_register_is_an_upsert() {
    let test_db = TestDb::new().await;
    let first = create_test_user(test_db.pool(), "listener").await;

    let updated = test_db
        .db
        .register_user(RegisterUser {
            id: first.id.clone(),
            email: "new@example.com".to_string(),
            image_url: Some("https://cdn.example.com/me.png".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(updated.email, "new@example.com");
    assert_eq!(updated.created_at, first.created_at);
    assert_eq!(test_db.db.list_playlists(&first.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_requires_email() {
    let test_db = TestDb::new().await;
    let result = test_db
        .db
        .register_user(RegisterUser {
            id: UserId::new("listener"),
            email: String::new(),
            image_url: None,
        })
        .await;

    assert!(matches!(result, Err(MusifyError::InvalidInput(_))));
}

#[tokio::test]
async fn test_set_admin() {
    let test_db = TestDb::new().await;
    let user = create_test_user(test_db.pool(), "boss").await;

    test_db.db.set_admin(&user.id, true).await.unwrap();
    let fetched = test_db.db.get_user(&user.id).await.unwrap().unwrap();
    assert!(fetched.is_admin);

    let missing = test_db.db.set_admin(&UserId::new("ghost"), true).await;
    assert!(matches!(missing, Err(MusifyError::NotFound { .. })));
}
