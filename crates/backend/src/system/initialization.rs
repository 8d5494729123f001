use anyhow::Result;
use contracts::system::users::CreateUserDto;
use sea_orm::DatabaseConnection;

use crate::system::users::{repository, service};

/// Ensure default accounts exist: an administrator and a regular reader.
/// Existing accounts are left untouched.
pub async fn ensure_default_users(conn: &DatabaseConnection) -> Result<()> {
    ensure_user(conn, "Admin", "Admin123", true).await?;
    ensure_user(conn, "User", "User123", false).await?;
    Ok(())
}

async fn ensure_user(
    conn: &DatabaseConnection,
    username: &str,
    password: &str,
    is_admin: bool,
) -> Result<()> {
    if repository::get_by_username(conn, username).await?.is_some() {
        return Ok(());
    }

    tracing::info!("Creating default account '{}'", username);
    tracing::warn!(
        "Account '{}' is created with a well-known default password; change it",
        username
    );

    let dto = CreateUserDto {
        username: username.to_string(),
        password: password.to_string(),
        email: Some(format!("{}@example.com", username)),
        full_name: None,
        is_admin,
    };

    service::create(conn, dto, None).await?;

    Ok(())
}
