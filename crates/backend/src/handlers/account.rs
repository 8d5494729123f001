use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use contracts::system::auth::{LoginForm, RegisterForm};
use contracts::system::users::CreateUserDto;
use serde::Deserialize;

use super::{current_culture, is_local_url};
use crate::state::AppState;
use crate::system::auth::{cookies, csrf, jwt, CSRF_COOKIE, SESSION_COOKIE};
use crate::system::users::service as user_service;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub return_url: Option<String>,
}

/// GET /admin/account/login
pub async fn login_form(headers: HeaderMap, Query(query): Query<LoginQuery>) -> Response {
    let culture = current_culture(&headers);
    let token = csrf::issue_token();
    with_csrf_cookie(
        views::account::login(culture, None, query.return_url.as_deref(), &token).into_response(),
        &token,
    )
}

/// POST /admin/account/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let culture = current_culture(&headers);

    if !csrf_ok(&headers, &form.csrf_token) {
        return rerender_login(culture, &form, "Неверный логин или пароль.");
    }

    let user = match user_service::verify_credentials(&state.conn, &form.username, &form.password)
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!("Failed login attempt for '{}'", form.username);
            return rerender_login(culture, &form, "Неверный логин или пароль.");
        }
        Err(e) => {
            tracing::warn!("Login rejected for '{}': {}", form.username, e);
            return rerender_login(culture, &form, "Неверный логин или пароль.");
        }
    };

    let token = match jwt::generate_session_token(&state.conn, &user.id, &user.username, user.is_admin)
        .await
    {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to issue session token: {}", e);
            return views::server_error(culture, "/admin/account/login");
        }
    };

    tracing::info!("User {} logged in", user.username);

    // Администратор попадает в админку, остальные — на ленту новостей
    let target = form
        .return_url
        .as_deref()
        .filter(|url| is_local_url(url))
        .unwrap_or(if user.is_admin { "/admin/articles" } else { "/" })
        .to_string();

    let mut response = Redirect::to(&target).into_response();
    if let Ok(value) = cookies::session_cookie(SESSION_COOKIE, &token).parse() {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

#[derive(Debug, Deserialize)]
pub struct LogoutForm {
    #[serde(default)]
    pub csrf_token: String,
}

/// POST /admin/account/logout
pub async fn logout(headers: HeaderMap, Form(form): Form<LogoutForm>) -> Response {
    if !csrf_ok(&headers, &form.csrf_token) {
        tracing::warn!("Logout with a stale form token ignored");
        return Redirect::to("/").into_response();
    }

    tracing::info!("User logged out");

    let mut response = Redirect::to("/").into_response();
    if let Ok(value) = cookies::expired_cookie(SESSION_COOKIE).parse() {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

/// GET /admin/account/register
pub async fn register_form(headers: HeaderMap) -> Response {
    let culture = current_culture(&headers);
    let token = csrf::issue_token();
    with_csrf_cookie(
        views::account::register(culture, &[], &token).into_response(),
        &token,
    )
}

/// POST /admin/account/register
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RegisterForm>,
) -> Response {
    let culture = current_culture(&headers);

    if !csrf_ok(&headers, &form.csrf_token) {
        return rerender_register(culture, vec!["Форма устарела, попробуйте ещё раз.".into()]);
    }

    let mut errors = Vec::new();
    if form.username.trim().is_empty() {
        errors.push("Укажите имя пользователя.".to_string());
    }
    if form.password != form.confirm_password {
        errors.push("Пароли не совпадают.".to_string());
    }
    if !errors.is_empty() {
        return rerender_register(culture, errors);
    }

    let dto = CreateUserDto {
        username: form.username.trim().to_string(),
        password: form.password,
        email: None,
        full_name: None,
        is_admin: false,
    };

    let user_id = match user_service::create(&state.conn, dto, None).await {
        Ok(id) => id,
        Err(e) => {
            tracing::info!("Registration rejected: {}", e);
            return rerender_register(culture, vec![e.to_string()]);
        }
    };

    let user = match user_service::get_by_id(&state.conn, &user_id).await {
        Ok(Some(user)) => user,
        _ => return views::server_error(culture, "/admin/account/register"),
    };

    tracing::info!("New user {} registered", user.username);

    // Сразу входим под новым пользователем
    match jwt::generate_session_token(&state.conn, &user.id, &user.username, user.is_admin).await {
        Ok(token) => {
            let mut response = Redirect::to("/").into_response();
            if let Ok(value) = cookies::session_cookie(SESSION_COOKIE, &token).parse() {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            response
        }
        Err(e) => {
            tracing::error!("Failed to issue session token: {}", e);
            views::server_error(culture, "/admin/account/register")
        }
    }
}

// -------- helpers --------

fn csrf_ok(headers: &HeaderMap, form_token: &str) -> bool {
    cookies::cookie_value(headers, CSRF_COOKIE)
        .map(|cookie_token| csrf::verify(&cookie_token, form_token))
        .unwrap_or(false)
}

fn with_csrf_cookie(mut response: Response, token: &str) -> Response {
    if let Ok(value) = cookies::csrf_cookie(CSRF_COOKIE, token).parse() {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

fn rerender_login(culture: &str, form: &LoginForm, message: &str) -> Response {
    let token = csrf::issue_token();
    with_csrf_cookie(
        views::account::login(culture, Some(message), form.return_url.as_deref(), &token)
            .into_response(),
        &token,
    )
}

fn rerender_register(culture: &str, errors: Vec<String>) -> Response {
    let token = csrf::issue_token();
    with_csrf_cookie(
        views::account::register(culture, &errors, &token).into_response(),
        &token,
    )
}
