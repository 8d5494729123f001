use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use contracts::domain::articles::aggregate::{Article, ArticleId};
use contracts::domain::articles::form::{ArticleEditForm, FieldError};
use serde::Deserialize;
use uuid::Uuid;

use super::current_culture;
use crate::domain::articles::service::ArticleError;
use crate::shared::uploads::UploadedFile;
use crate::state::AppState;
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::{cookies, csrf, CSRF_COOKIE};
use crate::views;

const ADMIN_LIST_TAKE: u64 = 100;

/// GET /admin/articles
pub async fn index(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    headers: HeaderMap,
) -> Response {
    let culture = current_culture(&headers);
    match state.articles.get_paged(0, ADMIN_LIST_TAKE).await {
        Ok(articles) => {
            let token = csrf::issue_token();
            with_csrf_cookie(
                views::admin::list(culture, &articles, &claims.username, &token).into_response(),
                &token,
            )
        }
        Err(e) => {
            tracing::error!("Failed to load admin article list: {}", e);
            views::server_error(culture, "/admin/articles")
        }
    }
}

/// GET /admin/articles/create
pub async fn create_form(headers: HeaderMap) -> Response {
    let culture = current_culture(&headers);
    render_edit_form(
        culture,
        "/admin/articles/create",
        views::label(culture, "Новая статья", "New article"),
        &ArticleEditForm::default(),
        &[],
    )
}

/// POST /admin/articles/create
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let culture = current_culture(&headers);
    let action = "/admin/articles/create";

    let submission = match read_article_form(multipart).await {
        Ok(submission) => submission,
        Err(e) => {
            tracing::warn!("Malformed create form submission: {}", e);
            return bad_request(culture, action);
        }
    };
    if !csrf_ok(&headers, &submission.csrf_token) {
        return bad_request(culture, action);
    }

    if let Err(errors) = submission.form.validate() {
        return render_edit_form(
            culture,
            action,
            views::label(culture, "Новая статья", "New article"),
            &submission.form,
            &errors,
        );
    }

    let mut article = Article::new_for_insert();
    submission.form.apply_to(&mut article);

    match state.articles.create(article, submission.image).await {
        Ok(created) => {
            tracing::info!("Article {} created", created.to_string_id());
            Redirect::to("/admin/articles").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create article: {}", e);
            views::server_error(culture, action)
        }
    }
}

/// GET /admin/articles/edit/:id
pub async fn edit_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let culture = current_culture(&headers);
    let action = format!("/admin/articles/edit/{}", id);

    let id = match Uuid::parse_str(&id) {
        Ok(id) => id,
        Err(_) => return views::not_found(culture, &action),
    };

    match state.articles.get_by_id(id).await {
        Ok(Some(article)) => render_edit_form(
            culture,
            &action,
            views::label(culture, "Редактирование статьи", "Edit article"),
            &ArticleEditForm::from_article(&article),
            &[],
        ),
        Ok(None) => views::not_found(culture, &action),
        Err(e) => {
            tracing::error!("Failed to load article {}: {}", id, e);
            views::server_error(culture, &action)
        }
    }
}

/// POST /admin/articles/edit/:id
pub async fn edit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let culture = current_culture(&headers);
    let action = format!("/admin/articles/edit/{}", id);

    let id = match Uuid::parse_str(&id) {
        Ok(id) => id,
        Err(_) => return views::not_found(culture, &action),
    };

    let mut submission = match read_article_form(multipart).await {
        Ok(submission) => submission,
        Err(e) => {
            tracing::warn!("Malformed edit form submission: {}", e);
            return bad_request(culture, &action);
        }
    };
    if !csrf_ok(&headers, &submission.csrf_token) {
        return bad_request(culture, &action);
    }

    // Существующая статья нужна и для 404, и для превью картинки в форме
    let existing = match state.articles.get_by_id(id).await {
        Ok(Some(article)) => article,
        Ok(None) => return views::not_found(culture, &action),
        Err(e) => {
            tracing::error!("Failed to load article {}: {}", id, e);
            return views::server_error(culture, &action);
        }
    };

    if let Err(errors) = submission.form.validate() {
        submission.form.id = Some(id);
        submission.form.existing_image_path = existing.image_path.clone();
        return render_edit_form(
            culture,
            &action,
            views::label(culture, "Редактирование статьи", "Edit article"),
            &submission.form,
            &errors,
        );
    }

    let mut incoming = Article::with_id(ArticleId::new(id));
    submission.form.apply_to(&mut incoming);

    match state.articles.update(incoming, submission.image).await {
        Ok(()) => {
            tracing::info!("Article {} updated", id);
            Redirect::to("/admin/articles").into_response()
        }
        Err(ArticleError::NotFound) => views::not_found(culture, &action),
        Err(e) => {
            tracing::error!("Failed to update article {}: {}", id, e);
            views::server_error(culture, &action)
        }
    }
}

/// GET /admin/articles/delete/:id — страница подтверждения
pub async fn delete_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let culture = current_culture(&headers);
    let action = format!("/admin/articles/delete/{}", id);

    let id = match Uuid::parse_str(&id) {
        Ok(id) => id,
        Err(_) => return views::not_found(culture, &action),
    };

    match state.articles.get_by_id(id).await {
        Ok(Some(article)) => {
            let token = csrf::issue_token();
            with_csrf_cookie(
                views::admin::delete_confirm(culture, &article, &token).into_response(),
                &token,
            )
        }
        Ok(None) => views::not_found(culture, &action),
        Err(e) => {
            tracing::error!("Failed to load article {}: {}", id, e);
            views::server_error(culture, &action)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConfirmForm {
    pub csrf_token: String,
}

/// POST /admin/articles/delete/:id
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    let culture = current_culture(&headers);
    let action = format!("/admin/articles/delete/{}", id);

    let id = match Uuid::parse_str(&id) {
        Ok(id) => id,
        Err(_) => return views::not_found(culture, &action),
    };

    if !csrf_ok(&headers, &form.csrf_token) {
        return bad_request(culture, &action);
    }

    match state.articles.delete(id).await {
        Ok(()) => {
            tracing::info!("Article {} deleted", id);
            Redirect::to("/admin/articles").into_response()
        }
        Err(ArticleError::NotFound) => views::not_found(culture, &action),
        Err(e) => {
            tracing::error!("Failed to delete article {}: {}", id, e);
            views::server_error(culture, &action)
        }
    }
}

// -------- form plumbing --------

struct ArticleSubmission {
    form: ArticleEditForm,
    image: Option<UploadedFile>,
    csrf_token: String,
}

/// Разобрать multipart-отправку двуязычной формы статьи
async fn read_article_form(mut multipart: Multipart) -> anyhow::Result<ArticleSubmission> {
    let mut form = ArticleEditForm::default();
    let mut image = None;
    let mut csrf_token = String::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title_ru" => form.title_ru = field.text().await?,
            "subtitle_ru" => form.subtitle_ru = non_empty(field.text().await?),
            "text_ru" => form.text_ru = field.text().await?,
            "title_en" => form.title_en = field.text().await?,
            "subtitle_en" => form.subtitle_en = non_empty(field.text().await?),
            "text_en" => form.text_en = field.text().await?,
            "csrf_token" => csrf_token = field.text().await?,
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?.to_vec();
                // Пустое файловое поле браузер всё равно отправляет
                if !file_name.is_empty() && !bytes.is_empty() {
                    image = Some(UploadedFile { file_name, bytes });
                }
            }
            _ => {}
        }
    }

    Ok(ArticleSubmission {
        form,
        image,
        csrf_token,
    })
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn csrf_ok(headers: &HeaderMap, form_token: &str) -> bool {
    cookies::cookie_value(headers, CSRF_COOKIE)
        .map(|cookie_token| csrf::verify(&cookie_token, form_token))
        .unwrap_or(false)
}

/// Отрисовать форму со свежим CSRF-токеном в cookie и скрытом поле
fn render_edit_form(
    culture: &str,
    action: &str,
    heading: &str,
    form: &ArticleEditForm,
    errors: &[FieldError],
) -> Response {
    let token = csrf::issue_token();
    with_csrf_cookie(
        views::admin::edit_form(culture, action, heading, form, errors, &token).into_response(),
        &token,
    )
}

fn with_csrf_cookie(mut response: Response, token: &str) -> Response {
    if let Ok(value) = cookies::csrf_cookie(CSRF_COOKIE, token).parse() {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

fn bad_request(culture: &str, current_path: &str) -> Response {
    let body = format!(
        "<h1 class=\"text-warning\">400</h1><p>{}</p>",
        views::label(
            culture,
            "Форма устарела или заполнена неверно. Вернитесь и попробуйте снова.",
            "The form is stale or malformed. Go back and try again."
        )
    );
    (
        StatusCode::BAD_REQUEST,
        views::layout(
            culture,
            current_path,
            views::label(culture, "Ошибка запроса", "Bad request"),
            &body,
        ),
    )
        .into_response()
}
