use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор статьи
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleId(pub Uuid);

impl ArticleId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ArticleId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Translation
// ============================================================================

/// Языковая версия статьи (заголовок, подзаголовок, текст)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleTranslation {
    pub id: Uuid,
    pub language: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub text: String,
}

impl ArticleTranslation {
    pub fn new(language: &str, title: String, subtitle: Option<String>, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            language: language.to_string(),
            title,
            subtitle,
            text,
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Статья со всеми языковыми версиями. Владеет своими переводами:
/// удаление статьи удаляет и переводы, не больше одного перевода на язык.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,

    #[serde(rename = "imagePath")]
    pub image_path: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,

    pub translations: Vec<ArticleTranslation>,
}

impl Article {
    /// Создать новую статью для вставки в БД
    pub fn new_for_insert() -> Self {
        let now = Utc::now();
        Self {
            id: ArticleId::new_v4(),
            image_path: None,
            created_at: now,
            updated_at: now,
            translations: Vec::new(),
        }
    }

    /// Статья с известным идентификатором (например, из маршрута формы)
    pub fn with_id(id: ArticleId) -> Self {
        let mut article = Self::new_for_insert();
        article.id = id;
        article
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    /// Перевод для точного кода языка
    pub fn translation_for(&self, language: &str) -> Option<&ArticleTranslation> {
        self.translations.iter().find(|t| t.language == language)
    }

    /// Обновить или добавить перевод для языка. Существующий перевод
    /// сохраняет свой идентификатор, меняются только title/subtitle/text.
    pub fn upsert_translation(
        &mut self,
        language: &str,
        title: String,
        subtitle: Option<String>,
        text: String,
    ) {
        match self.translations.iter_mut().find(|t| t.language == language) {
            Some(existing) => {
                existing.title = title;
                existing.subtitle = subtitle;
                existing.text = text;
            }
            None => {
                self.translations
                    .push(ArticleTranslation::new(language, title, subtitle, text));
            }
        }
    }

    /// Обновить timestamp
    pub fn touch_updated(&mut self) {
        self.updated_at = Utc::now();
    }
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
    fn new_article_has_no_image_and_equal_timestamps() {
        let article = Article::new_for_insert();
        assert!(article.image_path.is_none());
        assert!(article.translations.is_empty());
        assert_eq!(article.created_at, article.updated_at);
    }

    #[test]
    fn upsert_adds_translation_for_new_language() {
        let mut article = article_with(&["ru"]);
        article.upsert_translation("en", "Title".into(), None, "Text".into());

        assert_eq!(article.translations.len(), 2);
        assert_eq!(article.translation_for("en").unwrap().title, "Title");
        // ru остаётся нетронутым
        assert_eq!(article.translation_for("ru").unwrap().title, "title-ru");
    }

    #[test]
    fn upsert_overwrites_existing_language_preserving_id() {
        let mut article = article_with(&["ru"]);
        let original_id = article.translation_for("ru").unwrap().id;

        article.upsert_translation("ru", "Новый".into(), None, "Текст".into());

        assert_eq!(article.translations.len(), 1);
        let tr = article.translation_for("ru").unwrap();
        assert_eq!(tr.id, original_id);
        assert_eq!(tr.title, "Новый");
        assert_eq!(tr.subtitle, None);
        assert_eq!(tr.text, "Текст");
    }

    #[test]
    fn translation_for_unknown_language_is_none() {
        let article = article_with(&["ru", "en"]);
        assert!(article.translation_for("de").is_none());
    }

    #[test]
    fn article_id_string_roundtrip() {
        let id = ArticleId::new_v4();
        let parsed = ArticleId::from_string(&id.as_string()).unwrap();
        assert_eq!(id, parsed);
        assert!(ArticleId::from_string("not-a-uuid").is_err());
    }
}
