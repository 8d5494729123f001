pub mod account;
pub mod admin;
pub mod news;

use axum::http::HeaderMap;
use contracts::shared::culture;

use crate::system::auth::cookies;

/// Язык интерфейса текущего запроса — из cookie, с резервным значением
pub fn current_culture(headers: &HeaderMap) -> &'static str {
    culture::resolve(cookies::cookie_value(headers, culture::COOKIE_NAME).as_deref())
}

/// Локальный ли return_url: редиректим только внутрь приложения
pub fn is_local_url(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    #[test]
    fn culture_defaults_to_ru_without_cookie() {
        assert_eq!(current_culture(&HeaderMap::new()), "ru");
    }

    #[test]
    fn culture_is_read_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "culture=en".parse().unwrap());
        assert_eq!(current_culture(&headers), "en");
    }

    #[test]
    fn only_local_urls_are_accepted() {
        assert!(is_local_url("/news/all"));
        assert!(!is_local_url("https://evil.example"));
        assert!(!is_local_url("//evil.example"));
        assert!(!is_local_url(""));
    }
}
