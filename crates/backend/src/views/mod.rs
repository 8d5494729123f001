pub mod account;
pub mod admin;
pub mod news;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Экранировать пользовательский текст перед подстановкой в HTML
pub fn esc(text: &str) -> String {
    ammonia::clean_text(text)
}

/// Подпись интерфейса на языке запроса
pub fn label<'a>(culture: &str, ru: &'a str, en: &'a str) -> &'a str {
    if culture == "en" {
        en
    } else {
        ru
    }
}

/// Общий каркас страницы: шапка с навигацией и переключателем языка
pub fn layout(culture: &str, current_path: &str, title: &str, body: &str) -> Html<String> {
    let switch_base = format!(
        "/news/set-language?return_url={}",
        urlencoding::encode(current_path)
    );
    let html = format!(
        r#"<!DOCTYPE html>
<html lang="{culture}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} — News Portal</title>
<link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet">
</head>
<body class="bg-black text-light">
<nav class="navbar navbar-expand navbar-dark bg-dark mb-4">
  <div class="container">
    <a class="navbar-brand fw-bold text-warning" href="/">News Portal</a>
    <div class="navbar-nav">
      <a class="nav-link" href="/">{home}</a>
      <a class="nav-link" href="/news/all">{all}</a>
    </div>
    <div class="navbar-nav ms-auto">
      <a class="nav-link{ru_active}" href="{switch_base}&amp;culture=ru">RU</a>
      <a class="nav-link{en_active}" href="{switch_base}&amp;culture=en">EN</a>
    </div>
  </div>
</nav>
<main class="container pb-5">
{body}
</main>
</body>
</html>"#,
        culture = culture,
        title = esc(title),
        home = label(culture, "Главная", "Home"),
        all = label(culture, "Все новости", "All news"),
        ru_active = if culture == "ru" { " active fw-bold" } else { "" },
        en_active = if culture == "en" { " active fw-bold" } else { "" },
        switch_base = switch_base,
        body = body,
    );
    Html(html)
}

/// Страница «не найдено»
pub fn not_found(culture: &str, current_path: &str) -> Response {
    let body = format!(
        "<h1 class=\"text-warning\">404</h1><p>{}</p>",
        label(culture, "Страница не найдена.", "Page not found.")
    );
    (
        StatusCode::NOT_FOUND,
        layout(culture, current_path, label(culture, "Не найдено", "Not found"), &body),
    )
        .into_response()
}

/// Общая страница ошибки; внутренние детали наружу не выходят
pub fn server_error(culture: &str, current_path: &str) -> Response {
    let body = format!(
        "<h1 class=\"text-warning\">500</h1><p>{}</p>",
        label(
            culture,
            "Что-то пошло не так. Попробуйте позже.",
            "Something went wrong. Please try again later."
        )
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        layout(culture, current_path, label(culture, "Ошибка", "Error"), &body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn esc_neutralizes_markup() {
        let escaped = esc("<script>alert(1)</script>");
        assert!(!escaped.contains('<'));
    }

    #[test]
    fn layout_marks_active_language() {
        let Html(page) = layout("en", "/", "Test", "<p>body</p>");
        assert!(page.contains("lang=\"en\""));
        assert!(page.contains("<p>body</p>"));
        assert!(page.contains("Home"));
    }
}
