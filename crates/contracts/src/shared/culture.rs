//! Поддерживаемые языки интерфейса. Язык приходит из cookie запроса и
//! передаётся явным параметром вниз по стеку — глобального состояния нет.

/// Поддерживаемые коды языков
pub const SUPPORTED: &[&str] = &["ru", "en"];

/// Язык по умолчанию и резервный язык отображения
pub const FALLBACK: &str = "ru";

/// Имя cookie с выбранным языком
pub const COOKIE_NAME: &str = "culture";

pub fn is_supported(code: &str) -> bool {
    SUPPORTED.contains(&code)
}

/// Привести значение cookie к поддерживаемому коду языка.
/// Неизвестный или отсутствующий код заменяется резервным.
pub fn resolve(cookie_value: Option<&str>) -> &'static str {
    match cookie_value {
        Some(code) => SUPPORTED
            .iter()
            .find(|supported| **supported == code.trim())
            .copied()
            .unwrap_or(FALLBACK),
        None => FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_codes_resolve_to_themselves() {
        assert_eq!(resolve(Some("ru")), "ru");
        assert_eq!(resolve(Some("en")), "en");
    }

    #[test]
    fn unknown_and_missing_codes_fall_back() {
        assert_eq!(resolve(Some("de")), FALLBACK);
        assert_eq!(resolve(Some("")), FALLBACK);
        assert_eq!(resolve(None), FALLBACK);
    }

    #[test]
    fn cookie_value_is_trimmed() {
        assert_eq!(resolve(Some(" en ")), "en");
    }
}
