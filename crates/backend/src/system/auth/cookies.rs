use axum::http::HeaderMap;

/// Достать значение cookie из заголовка запроса
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    for pair in header.split(';') {
        if let Some((key, value)) = pair.split_once('=') {
            if key.trim() == name {
                return Some(value.trim().to_string());
            }
        }
    }
    None
}

/// Сессионная cookie: HttpOnly, на всё приложение, живёт как сессия на
/// сервере (сам токен несёт срок действия)
pub fn session_cookie(name: &str, token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}",
        name,
        token,
        2 * 60 * 60
    )
}

/// Сброс сессионной cookie при выходе
pub fn expired_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0", name)
}

/// CSRF-cookie: HttpOnly не нужен самому токену формы, но и вреда нет —
/// форма получает значение на сервере, не из скрипта
pub fn csrf_cookie(name: &str, token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Strict", name, token)
}

/// Cookie выбора языка, хранится год
pub fn culture_cookie(name: &str, culture: &str) -> String {
    format!(
        "{}={}; Path=/; SameSite=Lax; Max-Age={}",
        name,
        culture,
        365 * 24 * 60 * 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    fn headers_with(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie.parse().unwrap());
        headers
    }

    #[test]
    fn finds_cookie_among_several() {
        let headers = headers_with("culture=en; news_portal_auth=abc.def.ghi; other=1");
        assert_eq!(cookie_value(&headers, "culture").as_deref(), Some("en"));
        assert_eq!(
            cookie_value(&headers, "news_portal_auth").as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn missing_cookie_is_none() {
        let headers = headers_with("culture=en");
        assert_eq!(cookie_value(&headers, "news_portal_auth"), None);
        assert_eq!(cookie_value(&HeaderMap::new(), "culture"), None);
    }

    #[test]
    fn whitespace_around_pairs_is_tolerated() {
        let headers = headers_with("  culture = ru ;  x=1");
        assert_eq!(cookie_value(&headers, "culture").as_deref(), Some("ru"));
    }

    #[test]
    fn session_cookie_is_http_only() {
        let cookie = session_cookie("news_portal_auth", "token");
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
    }

    #[test]
    fn expired_cookie_clears_value() {
        let cookie = expired_cookie("news_portal_auth");
        assert!(cookie.starts_with("news_portal_auth=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
