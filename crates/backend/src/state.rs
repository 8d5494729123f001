use sea_orm::DatabaseConnection;

use crate::domain::articles::service::ArticleService;

/// Явно собранное состояние приложения: соединение с БД для системных
/// модулей и сервис статей для контентных обработчиков.
#[derive(Clone)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub articles: ArticleService,
}

impl AppState {
    pub fn new(conn: DatabaseConnection, articles: ArticleService) -> Self {
        Self { conn, articles }
    }
}
