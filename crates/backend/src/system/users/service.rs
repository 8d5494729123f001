use anyhow::Result;
use chrono::Utc;
use contracts::system::users::{CreateUserDto, User};
use sea_orm::DatabaseConnection;

use super::repository;
use crate::system::auth::password;

/// Create a new user
pub async fn create(
    conn: &DatabaseConnection,
    dto: CreateUserDto,
    created_by: Option<String>,
) -> Result<String> {
    // Validate username
    if dto.username.trim().is_empty() {
        return Err(anyhow::anyhow!("Username cannot be empty"));
    }

    // Check if username already exists
    if repository::get_by_username(conn, &dto.username).await?.is_some() {
        return Err(anyhow::anyhow!("Username already exists"));
    }

    // Validate email if provided
    if let Some(ref email) = dto.email {
        if !email.trim().is_empty() && !email.contains('@') {
            return Err(anyhow::anyhow!("Invalid email format"));
        }
    }

    // Validate password strength
    password::validate_password_strength(&dto.password)?;

    // Hash password
    let password_hash = password::hash_password(&dto.password)?;

    // Create user
    let user_id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    let user = User {
        id: user_id.clone(),
        username: dto.username,
        email: dto.email,
        full_name: dto.full_name,
        is_active: true,
        is_admin: dto.is_admin,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
        created_by,
    };

    repository::create_with_password(conn, &user, &password_hash).await?;

    Ok(user_id)
}

/// Get user by ID
pub async fn get_by_id(conn: &DatabaseConnection, id: &str) -> Result<Option<User>> {
    repository::get_by_id(conn, id).await
}

/// Verify user credentials (for login)
pub async fn verify_credentials(
    conn: &DatabaseConnection,
    username: &str,
    password_input: &str,
) -> Result<Option<User>> {
    // Get user by username
    let user = match repository::get_by_username(conn, username).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    // Check if user is active
    if !user.is_active {
        return Err(anyhow::anyhow!("User account is inactive"));
    }

    // Get password hash
    let password_hash = repository::get_password_hash(conn, &user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    // Verify password
    if !password::verify_password(password_input, &password_hash)? {
        return Ok(None);
    }

    // Update last login
    let _ = repository::update_last_login(conn, &user.id).await;

    Ok(Some(user))
}
