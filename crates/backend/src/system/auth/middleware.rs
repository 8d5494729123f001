use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};

use super::{cookies, jwt, SESSION_COOKIE};
use crate::state::AppState;

/// Middleware that requires an authenticated administrator session.
///
/// The session token is read from the cookie; an invalid, expired or
/// non-admin session is redirected to the login page with the original
/// path as return_url (the admin surface is HTML, not an API).
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let requested = req.uri().path().to_string();

    let token = match cookies::cookie_value(req.headers(), SESSION_COOKIE) {
        Some(token) => token,
        None => return redirect_to_login(&requested),
    };

    let claims = match jwt::validate_token(&state.conn, &token).await {
        Ok(claims) => claims,
        Err(_) => return redirect_to_login(&requested),
    };

    if !claims.is_admin {
        return redirect_to_login(&requested);
    }

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);

    next.run(req).await
}

fn redirect_to_login(return_url: &str) -> Response {
    let location = format!(
        "/admin/account/login?return_url={}",
        urlencoding::encode(return_url)
    );
    Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header(header::LOCATION, location)
        .body(axum::body::Body::empty())
        .unwrap_or_default()
}
