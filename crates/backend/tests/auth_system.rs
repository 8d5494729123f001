//! Integration tests for the account subsystem: user store, credential
//! verification, default-account bootstrap and session tokens.

use backend::shared::data::db;
use backend::system::auth::jwt;
use backend::system::users::service as user_service;
use backend::system::{initialization, users::repository};
use contracts::system::users::CreateUserDto;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

async fn setup() -> (DatabaseConnection, TempDir) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let conn = db::initialize_database(&temp.path().join("news.db"))
        .await
        .expect("Failed to initialize database");
    (conn, temp)
}

fn reader_dto(username: &str) -> CreateUserDto {
    CreateUserDto {
        username: username.to_string(),
        password: "Reader123".to_string(),
        email: None,
        full_name: None,
        is_admin: false,
    }
}

#[tokio::test]
async fn created_user_can_log_in_with_the_right_password() {
    let (conn, _temp) = setup().await;

    user_service::create(&conn, reader_dto("reader"), None)
        .await
        .expect("create user");

    let user = user_service::verify_credentials(&conn, "reader", "Reader123")
        .await
        .expect("verify")
        .expect("credentials should match");
    assert_eq!(user.username, "reader");
    assert!(!user.is_admin);

    let rejected = user_service::verify_credentials(&conn, "reader", "wrong")
        .await
        .expect("verify");
    assert!(rejected.is_none());

    let unknown = user_service::verify_credentials(&conn, "ghost", "Reader123")
        .await
        .expect("verify");
    assert!(unknown.is_none());
}

#[tokio::test]
async fn duplicate_usernames_are_rejected() {
    let (conn, _temp) = setup().await;

    user_service::create(&conn, reader_dto("reader"), None)
        .await
        .expect("create user");
    let duplicate = user_service::create(&conn, reader_dto("reader"), None).await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn weak_password_is_rejected_on_create() {
    let (conn, _temp) = setup().await;

    let mut dto = reader_dto("reader");
    dto.password = "123".to_string();
    assert!(user_service::create(&conn, dto, None).await.is_err());
}

#[tokio::test]
async fn default_accounts_are_bootstrapped_once() {
    let (conn, _temp) = setup().await;

    initialization::ensure_default_users(&conn)
        .await
        .expect("bootstrap");

    let admin = repository::get_by_username(&conn, "Admin")
        .await
        .expect("query")
        .expect("admin exists");
    assert!(admin.is_admin);

    let user = repository::get_by_username(&conn, "User")
        .await
        .expect("query")
        .expect("user exists");
    assert!(!user.is_admin);

    // повторный запуск не падает и не создаёт дубликатов
    initialization::ensure_default_users(&conn)
        .await
        .expect("bootstrap again");

    let admin_again = user_service::verify_credentials(&conn, "Admin", "Admin123")
        .await
        .expect("verify")
        .expect("default admin password works");
    assert_eq!(admin_again.id, admin.id);
}

#[tokio::test]
async fn session_token_roundtrip_carries_claims() {
    let (conn, _temp) = setup().await;

    let token = jwt::generate_session_token(&conn, "user-1", "Admin", true)
        .await
        .expect("token");

    let claims = jwt::validate_token(&conn, &token).await.expect("claims");
    assert_eq!(claims.sub, "user-1");
    assert_eq!(claims.username, "Admin");
    assert!(claims.is_admin);
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let (conn, _temp) = setup().await;

    let token = jwt::generate_session_token(&conn, "user-1", "Admin", true)
        .await
        .expect("token");

    let mut tampered = token.clone();
    tampered.push('x');
    assert!(jwt::validate_token(&conn, &tampered).await.is_err());
    assert!(jwt::validate_token(&conn, "garbage").await.is_err());
}
