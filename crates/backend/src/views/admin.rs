use axum::response::Html;
use contracts::domain::articles::aggregate::Article;
use contracts::domain::articles::form::{ArticleEditForm, FieldError};

use super::{esc, label, layout};

/// Список статей в админке
pub fn list(culture: &str, articles: &[Article], username: &str, csrf_token: &str) -> Html<String> {
    let rows: String = articles
        .iter()
        .map(|article| {
            let view = article.localize(culture);
            format!(
                r#"<tr>
  <td><a class="link-warning" href="/news/details/{id}">{title}</a></td>
  <td>{created}</td>
  <td>{updated}</td>
  <td class="text-end">
    <a class="btn btn-sm btn-outline-light" href="/admin/articles/edit/{id}">{edit}</a>
    <a class="btn btn-sm btn-outline-danger" href="/admin/articles/delete/{id}">{delete}</a>
  </td>
</tr>"#,
                id = view.id,
                title = esc(&view.title),
                created = article.created_at.format("%d.%m.%Y %H:%M"),
                updated = article.updated_at.format("%d.%m.%Y %H:%M"),
                edit = label(culture, "Изменить", "Edit"),
                delete = label(culture, "Удалить", "Delete"),
            )
        })
        .collect();

    let body = format!(
        r#"<div class="d-flex justify-content-between align-items-center mb-4">
  <h1>{heading}</h1>
  <div>
    <span class="text-secondary me-2">{username}</span>
    <a class="btn btn-warning fw-bold" href="/admin/articles/create">{create}</a>
    <form class="d-inline" method="post" action="/admin/account/logout">
      <input type="hidden" name="csrf_token" value="{csrf_token}">
      <button class="btn btn-outline-secondary" type="submit">{logout}</button>
    </form>
  </div>
</div>
<table class="table table-dark table-striped align-middle">
  <thead>
    <tr><th>{title_col}</th><th>{created_col}</th><th>{updated_col}</th><th></th></tr>
  </thead>
  <tbody>{rows}</tbody>
</table>"#,
        heading = label(culture, "Статьи", "Articles"),
        create = label(culture, "Создать", "Create"),
        logout = label(culture, "Выйти", "Log out"),
        title_col = label(culture, "Заголовок", "Title"),
        created_col = label(culture, "Создана", "Created"),
        updated_col = label(culture, "Обновлена", "Updated"),
        rows = rows,
        username = esc(username),
        csrf_token = csrf_token,
    );
    layout(
        culture,
        "/admin/articles",
        label(culture, "Админка", "Admin"),
        &body,
    )
}

fn field_errors(errors: &[FieldError], field: &str) -> String {
    errors
        .iter()
        .filter(|e| e.field == field)
        .map(|e| format!("<div class=\"text-danger small\">{}</div>", esc(&e.message)))
        .collect()
}

fn text_input(field: &str, label_text: &str, value: &str, errors: &[FieldError]) -> String {
    format!(
        r#"<div class="mb-3">
  <label class="form-label" for="{field}">{label_text}</label>
  <input class="form-control" type="text" id="{field}" name="{field}" value="{value}">
  {errors}
</div>"#,
        field = field,
        label_text = label_text,
        value = esc(value),
        errors = field_errors(errors, field),
    )
}

fn text_area(field: &str, label_text: &str, value: &str, errors: &[FieldError]) -> String {
    format!(
        r#"<div class="mb-3">
  <label class="form-label" for="{field}">{label_text}</label>
  <textarea class="form-control" rows="8" id="{field}" name="{field}">{value}</textarea>
  {errors}
</div>"#,
        field = field,
        label_text = label_text,
        value = esc(value),
        errors = field_errors(errors, field),
    )
}

/// Двуязычная форма создания/редактирования статьи
pub fn edit_form(
    culture: &str,
    action: &str,
    heading: &str,
    form: &ArticleEditForm,
    errors: &[FieldError],
    csrf_token: &str,
) -> Html<String> {
    let existing_image = form
        .existing_image_path
        .as_deref()
        .map(|path| {
            format!(
                "<img src=\"{}\" class=\"img-thumbnail mb-2\" style=\"max-width: 240px\" alt=\"\">",
                esc(path)
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"<h1 class="mb-4">{heading}</h1>
<form method="post" action="{action}" enctype="multipart/form-data" class="col-lg-8">
  <input type="hidden" name="csrf_token" value="{csrf_token}">
  <fieldset class="border border-secondary rounded p-3 mb-4">
    <legend class="float-none w-auto px-2 fs-5">Русский</legend>
    {title_ru}
    {subtitle_ru}
    {text_ru}
  </fieldset>
  <fieldset class="border border-secondary rounded p-3 mb-4">
    <legend class="float-none w-auto px-2 fs-5">English</legend>
    {title_en}
    {subtitle_en}
    {text_en}
  </fieldset>
  <div class="mb-4">
    <label class="form-label" for="image">{image_label}</label>
    {existing_image}
    <input class="form-control" type="file" id="image" name="image" accept="image/*">
  </div>
  <button class="btn btn-warning fw-bold" type="submit">{save}</button>
  <a class="btn btn-outline-secondary" href="/admin/articles">{cancel}</a>
</form>"#,
        heading = esc(heading),
        action = action,
        csrf_token = csrf_token,
        title_ru = text_input("title_ru", "Заголовок", &form.title_ru, errors),
        subtitle_ru = text_input(
            "subtitle_ru",
            "Подзаголовок",
            form.subtitle_ru.as_deref().unwrap_or(""),
            errors
        ),
        text_ru = text_area("text_ru", "Текст", &form.text_ru, errors),
        title_en = text_input("title_en", "Title", &form.title_en, errors),
        subtitle_en = text_input(
            "subtitle_en",
            "Subtitle",
            form.subtitle_en.as_deref().unwrap_or(""),
            errors
        ),
        text_en = text_area("text_en", "Text", &form.text_en, errors),
        image_label = label(culture, "Картинка", "Image"),
        existing_image = existing_image,
        save = label(culture, "Сохранить", "Save"),
        cancel = label(culture, "Отмена", "Cancel"),
    );
    layout(culture, action, heading, &body)
}

/// Подтверждение удаления
pub fn delete_confirm(culture: &str, article: &Article, csrf_token: &str) -> Html<String> {
    let view = article.localize(culture);
    let action = format!("/admin/articles/delete/{}", view.id);
    let body = format!(
        r#"<h1 class="mb-4">{heading}</h1>
<p>{question} <strong>{title}</strong>?</p>
<form method="post" action="{action}">
  <input type="hidden" name="csrf_token" value="{csrf_token}">
  <button class="btn btn-danger fw-bold" type="submit">{confirm}</button>
  <a class="btn btn-outline-secondary" href="/admin/articles">{cancel}</a>
</form>"#,
        heading = label(culture, "Удаление статьи", "Delete article"),
        question = label(culture, "Удалить статью", "Delete article"),
        title = esc(&view.title),
        action = action,
        csrf_token = csrf_token,
        confirm = label(culture, "Удалить", "Delete"),
        cancel = label(culture, "Отмена", "Cancel"),
    );
    layout(
        culture,
        &action,
        label(culture, "Удаление", "Delete"),
        &body,
    )
}
