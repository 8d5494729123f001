use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

/// Open the SQLite database and bootstrap the schema.
///
/// The connection is returned to the caller and threaded explicitly through
/// the application state — there is no process-wide connection cell.
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;

    Ok(conn)
}

/// Ensure required tables and indexes exist (minimal schema bootstrap)
async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    if !table_exists(conn, "articles").await? {
        tracing::info!("Creating articles table");
        let create_articles_sql = r#"
            CREATE TABLE articles (
                id TEXT PRIMARY KEY NOT NULL,
                image_path TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_articles_sql.to_string(),
        ))
        .await?;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "CREATE INDEX idx_articles_created_at ON articles (created_at);".to_string(),
        ))
        .await?;
    }

    if !table_exists(conn, "article_translations").await? {
        tracing::info!("Creating article_translations table");
        let create_translations_sql = r#"
            CREATE TABLE article_translations (
                id TEXT PRIMARY KEY NOT NULL,
                article_id TEXT NOT NULL,
                language TEXT NOT NULL,
                title TEXT NOT NULL,
                subtitle TEXT,
                text TEXT NOT NULL
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_translations_sql.to_string(),
        ))
        .await?;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "CREATE INDEX idx_article_translations_article_language
             ON article_translations (article_id, language);"
                .to_string(),
        ))
        .await?;
    }

    if !table_exists(conn, "sys_users").await? {
        tracing::info!("Creating sys_users table");
        let create_users_sql = r#"
            CREATE TABLE sys_users (
                id TEXT PRIMARY KEY NOT NULL,
                username TEXT NOT NULL UNIQUE,
                email TEXT,
                password_hash TEXT NOT NULL,
                full_name TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                is_admin INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                last_login_at TEXT,
                created_by TEXT
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_users_sql.to_string(),
        ))
        .await?;
    }

    if !table_exists(conn, "sys_settings").await? {
        tracing::info!("Creating sys_settings table");
        let create_settings_sql = r#"
            CREATE TABLE sys_settings (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                description TEXT,
                created_at TEXT,
                updated_at TEXT
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_settings_sql.to_string(),
        ))
        .await?;
    }

    Ok(())
}

async fn table_exists(conn: &DatabaseConnection, name: &str) -> anyhow::Result<bool> {
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?;",
            [name.into()],
        ))
        .await?;
    Ok(!rows.is_empty())
}
