// SPDX-License-Identifier: MIT

//! Credential store integration tests against an in-memory database.

use auth_service::db::UserStore;
use auth_service::error::AppError;
use auth_service::models::user::{NewUser, Role};

mod common;

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: "$2b$04$placeholderplaceholderpl".to_string(),
        first_name: Some("Pat".to_string()),
        last_name: None,
    }
}

#[tokio::test]
async fn test_create_and_fetch() {
    let store = UserStore::new(common::test_pool().await);

    let created = store.create(new_user("user@example.com")).await.unwrap();
    assert_eq!(created.role, Role::User);
    assert!(created.is_active);
    assert!(created.last_login_at.is_none());

    let by_email = store.get_by_email("user@example.com").await.unwrap();
    assert_eq!(by_email.id, created.id);

    let by_id = store.get_by_id(&created.id).await.unwrap();
    assert_eq!(by_id.email, "user@example.com");
}

#[tokio::test]
async fn test_unique_constraint_maps_to_conflict() {
    let store = UserStore::new(common::test_pool().await);

    store.create(new_user("user@example.com")).await.unwrap();
    let err = store.create(new_user("user@example.com")).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict));
}

#[tokio::test]
async fn test_lookup_is_case_insensitive() {
    let store = UserStore::new(common::test_pool().await);

    store.create(new_user("user@example.com")).await.unwrap();
    let found = store.get_by_email("USER@Example.Com").await.unwrap();
    assert_eq!(found.email, "user@example.com");
}

#[tokio::test]
async fn test_create_normalizes_email_and_conflicts_across_case() {
    let store = UserStore::new(common::test_pool().await);

    // The store lowercases on insert even when the caller does not
    let created = store.create(new_user("A@x.com")).await.unwrap();
    assert_eq!(created.email, "a@x.com");

    let err = store.create(new_user("a@X.COM")).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict));
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let store = UserStore::new(common::test_pool().await);

    let err = store.get_by_email("ghost@x.com").await.unwrap_err();
    assert!(matches!(err, AppError::UserNotFound));

    let err = store.get_by_id("no-such-id").await.unwrap_err();
    assert!(matches!(err, AppError::UserNotFound));
}

#[tokio::test]
async fn test_deactivated_user_is_disabled() {
    let store = UserStore::new(common::test_pool().await);

    let user = store.create(new_user("user@example.com")).await.unwrap();
    store.deactivate(&user.id).await.unwrap();

    let err = store.get_by_email("user@example.com").await.unwrap_err();
    assert!(matches!(err, AppError::Disabled));

    let err = store.get_by_id(&user.id).await.unwrap_err();
    assert!(matches!(err, AppError::Disabled));
}

#[tokio::test]
async fn test_last_login_updates_timestamps() {
    let store = UserStore::new(common::test_pool().await);

    let user = store.create(new_user("user@example.com")).await.unwrap();
    store.update_last_login(&user.id).await;

    let fetched = store.get_by_id(&user.id).await.unwrap();
    assert!(fetched.last_login_at.is_some());
    assert!(fetched.updated_at >= user.updated_at);

    // Unknown id is swallowed, not an error
    store.update_last_login("no-such-id").await;
}

#[tokio::test]
async fn test_update_password_hash() {
    let store = UserStore::new(common::test_pool().await);

    let user = store.create(new_user("user@example.com")).await.unwrap();
    store
        .update_password_hash(&user.id, "$2b$04$anotherhashanotherhash")
        .await
        .unwrap();

    let fetched = store.get_by_id(&user.id).await.unwrap();
    assert_eq!(fetched.password_hash, "$2b$04$anotherhashanotherhash");

    let err = store
        .update_password_hash("no-such-id", "$2b$04$x")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UserNotFound));
}
