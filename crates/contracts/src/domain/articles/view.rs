use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::articles::aggregate::Article;
use crate::shared::culture;

/// Заголовок-заглушка для статьи без переводов
pub const MISSING_TITLE: &str = "No title";

// ============================================================================
// Read Projection
// ============================================================================

/// Статья, спроецированная в один язык для отображения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub image_path: Option<String>,
}

impl Article {
    /// Выбор языковой версии для отображения: точное совпадение языка,
    /// иначе резервный язык, иначе заглушка. Статья всегда отображаема,
    /// независимо от полноты переводов.
    pub fn localize(&self, requested: &str) -> ArticleView {
        let tr = self
            .translation_for(requested)
            .or_else(|| self.translation_for(culture::FALLBACK));

        ArticleView {
            id: self.id.value(),
            title: tr.map(|t| t.title.clone()).unwrap_or_else(|| MISSING_TITLE.to_string()),
            subtitle: tr.and_then(|t| t.subtitle.clone()),
            text: tr.map(|t| t.text.clone()).unwrap_or_default(),
            created_at: self.created_at,
            image_path: self.image_path.as_deref().map(normalize_image_path),
        }
    }
}

/// Публичный URL картинки всегда с прямыми слэшами
fn normalize_image_path(stored: &str) -> String {
    stored.trim().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article_with(languages: &[&str]) -> Article {
        let mut article = Article::new_for_insert();
        for lang in languages {
            article.upsert_translation(
                lang,
                format!("title-{}", lang),
                Some(format!("subtitle-{}", lang)),
                format!("text-{}", lang),
            );
        }
        article
    }

    #[test]
    fn exact_language_match_wins() {
        let article = article_with(&["ru", "en"]);
        let view = article.localize("en");
        assert_eq!(view.title, "title-en");
        assert_eq!(view.subtitle.as_deref(), Some("subtitle-en"));
        assert_eq!(view.text, "text-en");
    }

    #[test]
    fn missing_language_falls_back_to_ru() {
        let article = article_with(&["ru"]);
        let view = article.localize("en");
        assert_eq!(view.title, "title-ru");
        assert_eq!(view.text, "text-ru");
    }

    #[test]
    fn no_translations_yields_placeholder() {
        let article = Article::new_for_insert();
        let view = article.localize("en");
        assert_eq!(view.title, MISSING_TITLE);
        assert_eq!(view.subtitle, None);
        assert_eq!(view.text, "");
    }

    #[test]
    fn only_foreign_translation_yields_placeholder_for_other_request() {
        // перевод только en: запрос de не совпадает ни точно, ни с резервным ru
        let article = article_with(&["en"]);
        let view = article.localize("de");
        assert_eq!(view.title, MISSING_TITLE);
        assert_eq!(view.text, "");
    }

    #[test]
    fn image_path_backslashes_are_normalized() {
        let mut article = article_with(&["ru"]);
        article.image_path = Some("\\uploads\\photo.jpg".into());
        let view = article.localize("ru");
        assert_eq!(view.image_path.as_deref(), Some("/uploads/photo.jpg"));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let article = article_with(&["ru"]);
        let json = serde_json::to_value(article.localize("ru")).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("imagePath").is_some());
        assert!(json.get("created_at").is_none());
    }
}
