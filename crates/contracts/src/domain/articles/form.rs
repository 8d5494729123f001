use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::articles::aggregate::Article;
use crate::shared::culture;

pub const TITLE_MAX_LEN: usize = 200;
pub const SUBTITLE_MAX_LEN: usize = 300;
pub const TEXT_MAX_LEN: usize = 10_000;

/// Ошибка валидации, привязанная к конкретному полю формы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

// ============================================================================
// Admin Edit Form
// ============================================================================

/// Двуязычная форма статьи: плоские поля ru/en плюс картинка.
/// При загрузке собирается из переводов, при сохранении превращается
/// обратно в upsert-операции над переводами.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleEditForm {
    pub id: Option<Uuid>,

    #[serde(rename = "existingImagePath")]
    pub existing_image_path: Option<String>,

    // RU
    pub title_ru: String,
    pub subtitle_ru: Option<String>,
    pub text_ru: String,

    // EN
    pub title_en: String,
    pub subtitle_en: Option<String>,
    pub text_en: String,
}

impl ArticleEditForm {
    /// Заполнить форму из сохранённой статьи
    pub fn from_article(article: &Article) -> Self {
        let ru = article.translation_for("ru");
        let en = article.translation_for("en");
        Self {
            id: Some(article.id.value()),
            existing_image_path: article.image_path.clone(),
            title_ru: ru.map(|t| t.title.clone()).unwrap_or_default(),
            subtitle_ru: ru.and_then(|t| t.subtitle.clone()),
            text_ru: ru.map(|t| t.text.clone()).unwrap_or_default(),
            title_en: en.map(|t| t.title.clone()).unwrap_or_default(),
            subtitle_en: en.and_then(|t| t.subtitle.clone()),
            text_en: en.map(|t| t.text.clone()).unwrap_or_default(),
        }
    }

    /// Валидация формы. Заголовок и текст обязательны для каждого языка,
    /// подзаголовок необязателен. Сервисный слой это не проверяет —
    /// граница валидации проходит здесь.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        validate_language_block(
            &mut errors,
            ("title_ru", &self.title_ru),
            ("subtitle_ru", self.subtitle_ru.as_deref()),
            ("text_ru", &self.text_ru),
        );
        validate_language_block(
            &mut errors,
            ("title_en", &self.title_en),
            ("subtitle_en", self.subtitle_en.as_deref()),
            ("text_en", &self.text_en),
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Перенести поля формы в статью как upsert переводов ru и en
    pub fn apply_to(&self, article: &mut Article) {
        article.upsert_translation(
            "ru",
            self.title_ru.clone(),
            normalize_subtitle(self.subtitle_ru.as_deref()),
            self.text_ru.clone(),
        );
        article.upsert_translation(
            "en",
            self.title_en.clone(),
            normalize_subtitle(self.subtitle_en.as_deref()),
            self.text_en.clone(),
        );
    }

    /// Языки, которыми управляет форма
    pub fn languages() -> &'static [&'static str] {
        culture::SUPPORTED
    }
}

fn normalize_subtitle(value: Option<&str>) -> Option<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Some(s.to_string()),
        _ => None,
    }
}

fn validate_language_block(
    errors: &mut Vec<FieldError>,
    (title_field, title): (&'static str, &str),
    (subtitle_field, subtitle): (&'static str, Option<&str>),
    (text_field, text): (&'static str, &str),
) {
    if title.trim().is_empty() {
        errors.push(FieldError {
            field: title_field,
            message: "Заголовок обязателен".into(),
        });
    } else if title.chars().count() > TITLE_MAX_LEN {
        errors.push(FieldError {
            field: title_field,
            message: format!("Заголовок не длиннее {} символов", TITLE_MAX_LEN),
        });
    }

    if let Some(subtitle) = subtitle {
        if subtitle.chars().count() > SUBTITLE_MAX_LEN {
            errors.push(FieldError {
                field: subtitle_field,
                message: format!("Подзаголовок не длиннее {} символов", SUBTITLE_MAX_LEN),
            });
        }
    }

    if text.trim().is_empty() {
        errors.push(FieldError {
            field: text_field,
            message: "Текст обязателен".into(),
        });
    } else if text.chars().count() > TEXT_MAX_LEN {
        errors.push(FieldError {
            field: text_field,
            message: format!("Текст не длиннее {} символов", TEXT_MAX_LEN),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ArticleEditForm {
        ArticleEditForm {
            title_ru: "Заголовок".into(),
            subtitle_ru: Some("Подзаголовок".into()),
            text_ru: "Текст".into(),
            title_en: "Title".into(),
            subtitle_en: None,
            text_en: "Text".into(),
            ..Default::default()
        }
    }

    #[test]
    fn filled_form_is_valid() {
        assert!(filled_form().validate().is_ok());
    }

    #[test]
    fn missing_subtitle_is_allowed() {
        let mut form = filled_form();
        form.subtitle_ru = None;
        form.subtitle_en = Some("   ".into());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn empty_title_and_text_are_reported_per_field() {
        let mut form = filled_form();
        form.title_en = "  ".into();
        form.text_ru = String::new();

        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"title_en"));
        assert!(fields.contains(&"text_ru"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn over_limit_fields_are_rejected() {
        let mut form = filled_form();
        form.title_ru = "а".repeat(TITLE_MAX_LEN + 1);
        form.subtitle_en = Some("b".repeat(SUBTITLE_MAX_LEN + 1));
        form.text_en = "c".repeat(TEXT_MAX_LEN + 1);

        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"title_ru"));
        assert!(fields.contains(&"subtitle_en"));
        assert!(fields.contains(&"text_en"));
    }

    #[test]
    fn roundtrip_through_article_preserves_fields() {
        let form = filled_form();
        let mut article = Article::new_for_insert();
        form.apply_to(&mut article);

        let loaded = ArticleEditForm::from_article(&article);
        assert_eq!(loaded.title_ru, form.title_ru);
        assert_eq!(loaded.subtitle_ru, form.subtitle_ru);
        assert_eq!(loaded.text_en, form.text_en);
        // пустой подзаголовок не хранится
        assert_eq!(loaded.subtitle_en, None);
    }

    #[test]
    fn apply_to_overwrites_only_managed_languages() {
        let mut article = Article::new_for_insert();
        article.upsert_translation("de", "Titel".into(), None, "Text".into());

        filled_form().apply_to(&mut article);

        assert_eq!(article.translations.len(), 3);
        assert_eq!(article.translation_for("de").unwrap().title, "Titel");
    }
}
