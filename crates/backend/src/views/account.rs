use axum::response::Html;

use super::{esc, label, layout};

/// Форма входа
pub fn login(
    culture: &str,
    error: Option<&str>,
    return_url: Option<&str>,
    csrf_token: &str,
) -> Html<String> {
    let error_block = error
        .map(|e| format!("<div class=\"alert alert-danger\">{}</div>", esc(e)))
        .unwrap_or_default();

    let return_field = return_url
        .map(|url| {
            format!(
                "<input type=\"hidden\" name=\"return_url\" value=\"{}\">",
                esc(url)
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"<div class="col-md-4 mx-auto">
<h1 class="mb-4">{heading}</h1>
{error_block}
<form method="post" action="/admin/account/login">
  <input type="hidden" name="csrf_token" value="{csrf_token}">
  {return_field}
  <div class="mb-3">
    <label class="form-label" for="username">{username}</label>
    <input class="form-control" type="text" id="username" name="username" autofocus>
  </div>
  <div class="mb-3">
    <label class="form-label" for="password">{password}</label>
    <input class="form-control" type="password" id="password" name="password">
  </div>
  <button class="btn btn-warning fw-bold w-100" type="submit">{submit}</button>
</form>
<p class="mt-3"><a class="link-light" href="/admin/account/register">{register}</a></p>
</div>"#,
        heading = label(culture, "Вход", "Log in"),
        error_block = error_block,
        csrf_token = csrf_token,
        return_field = return_field,
        username = label(culture, "Имя пользователя", "Username"),
        password = label(culture, "Пароль", "Password"),
        submit = label(culture, "Войти", "Log in"),
        register = label(culture, "Регистрация", "Register"),
    );
    layout(
        culture,
        "/admin/account/login",
        label(culture, "Вход", "Log in"),
        &body,
    )
}

/// Форма регистрации читателя
pub fn register(culture: &str, errors: &[String], csrf_token: &str) -> Html<String> {
    let error_block: String = errors
        .iter()
        .map(|e| format!("<div class=\"alert alert-danger\">{}</div>", esc(e)))
        .collect();

    let body = format!(
        r#"<div class="col-md-4 mx-auto">
<h1 class="mb-4">{heading}</h1>
{error_block}
<form method="post" action="/admin/account/register">
  <input type="hidden" name="csrf_token" value="{csrf_token}">
  <div class="mb-3">
    <label class="form-label" for="username">{username}</label>
    <input class="form-control" type="text" id="username" name="username" autofocus>
  </div>
  <div class="mb-3">
    <label class="form-label" for="password">{password}</label>
    <input class="form-control" type="password" id="password" name="password">
  </div>
  <div class="mb-3">
    <label class="form-label" for="confirm_password">{confirm}</label>
    <input class="form-control" type="password" id="confirm_password" name="confirm_password">
  </div>
  <button class="btn btn-warning fw-bold w-100" type="submit">{submit}</button>
</form>
</div>"#,
        heading = label(culture, "Регистрация", "Register"),
        error_block = error_block,
        csrf_token = csrf_token,
        username = label(culture, "Имя пользователя", "Username"),
        password = label(culture, "Пароль", "Password"),
        confirm = label(culture, "Повторите пароль", "Confirm password"),
        submit = label(culture, "Зарегистрироваться", "Sign up"),
    );
    layout(
        culture,
        "/admin/account/register",
        label(culture, "Регистрация", "Register"),
        &body,
    )
}
