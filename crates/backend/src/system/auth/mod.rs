pub mod cookies;
pub mod csrf;
pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

/// Имя cookie с токеном сессии
pub const SESSION_COOKIE: &str = "news_portal_auth";

/// Имя cookie с CSRF-токеном (double-submit)
pub const CSRF_COOKIE: &str = "news_portal_csrf";
