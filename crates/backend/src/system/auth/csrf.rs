use base64::{engine::general_purpose, Engine as _};
use rand::Rng;
use subtle::ConstantTimeEq;

/// Выпустить свежий CSRF-токен. Токен кладётся и в cookie, и в скрытое
/// поле формы; при POST оба значения обязаны совпасть (double-submit).
pub fn issue_token() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::URL_SAFE_NO_PAD.encode(&random_bytes)
}

/// Сверка токена формы с токеном из cookie за постоянное время
pub fn verify(cookie_token: &str, form_token: &str) -> bool {
    let cookie = cookie_token.as_bytes();
    let form = form_token.as_bytes();
    if cookie.is_empty() || cookie.len() != form.len() {
        return false;
    }
    cookie.ct_eq(form).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_against_itself() {
        let token = issue_token();
        assert!(verify(&token, &token));
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(issue_token(), issue_token());
    }

    #[test]
    fn mismatched_tokens_fail() {
        let token = issue_token();
        let other = issue_token();
        assert!(!verify(&token, &other));
    }

    #[test]
    fn empty_or_truncated_tokens_fail() {
        let token = issue_token();
        assert!(!verify("", ""));
        assert!(!verify(&token, ""));
        assert!(!verify(&token, &token[..token.len() - 1]));
    }
}
