use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use contracts::system::auth::TokenClaims;

/// Проверенные клеймы сессии текущего запроса. Их кладёт в request
/// extensions охрана админки (`require_admin`); обработчик за охраной
/// объявляет параметр `CurrentUser(claims)` и получает имя и роль
/// администратора без повторного разбора cookie.
pub struct CurrentUser(pub TokenClaims);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Отсутствие клеймов значит, что маршрут не прикрыт охраной
        match parts.extensions.get::<TokenClaims>() {
            Some(claims) => Ok(CurrentUser(claims.clone())),
            None => Err(StatusCode::UNAUTHORIZED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn claims() -> TokenClaims {
        TokenClaims {
            sub: "user-1".into(),
            username: "Admin".into(),
            is_admin: true,
            exp: 2_000_000_000,
            iat: 1_000_000_000,
        }
    }

    #[tokio::test]
    async fn extracts_claims_injected_by_the_guard() {
        let mut request = Request::builder().body(()).unwrap();
        request.extensions_mut().insert(claims());
        let (mut parts, _) = request.into_parts();

        let CurrentUser(extracted) = CurrentUser::from_request_parts(&mut parts, &())
            .await
            .expect("claims are present");
        assert_eq!(extracted.username, "Admin");
        assert!(extracted.is_admin);
    }

    #[tokio::test]
    async fn unguarded_request_is_rejected() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();

        let rejection = CurrentUser::from_request_parts(&mut parts, &())
            .await
            .err()
            .expect("no claims without the guard");
        assert_eq!(rejection, StatusCode::UNAUTHORIZED);
    }
}
