use contracts::domain::articles::aggregate::Article;
use sea_orm::{DatabaseConnection, DbErr};
use uuid::Uuid;

use super::repository;
use crate::shared::uploads::{ImageStore, UploadedFile};

/// Ошибки операций над статьями
#[derive(Debug, thiserror::Error)]
pub enum ArticleError {
    #[error("Статья не найдена")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] DbErr),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Сервис статей — единственная граница чтения и записи над хранилищем
/// статей/переводов и файлами картинок. Собирается явно из соединения с БД
/// и хранилища картинок, без контейнера. Все операции асинхронны; отмена —
/// это сброс future вызывающей стороной.
#[derive(Clone)]
pub struct ArticleService {
    conn: DatabaseConnection,
    images: ImageStore,
}

impl ArticleService {
    pub fn new(conn: DatabaseConnection, images: ImageStore) -> Self {
        Self { conn, images }
    }

    /// Статья по идентификатору со всеми переводами.
    /// Отсутствие — нормальный результат (None), не ошибка.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Article>, ArticleError> {
        Ok(repository::get_by_id(&self.conn, id).await?)
    }

    /// Страница статей по убыванию даты создания, переводы загружены.
    /// Верхняя граница take сервисом не ограничивается — разумные значения
    /// задают обработчики.
    pub async fn get_paged(&self, skip: u64, take: u64) -> Result<Vec<Article>, ArticleError> {
        Ok(repository::list_paged(&self.conn, skip, take).await?)
    }

    /// Последние count статей. Для count <= 0 — пустой список, не ошибка.
    pub async fn get_latest(&self, count: i64) -> Result<Vec<Article>, ArticleError> {
        if count <= 0 {
            return Ok(Vec::new());
        }
        self.get_paged(0, count as u64).await
    }

    /// Создание статьи. Картинка (если есть) сначала сохраняется в
    /// хранилище, её публичный путь попадает в image_path, затем статья
    /// с переводами вставляется одной транзакцией.
    pub async fn create(
        &self,
        mut article: Article,
        image: Option<UploadedFile>,
    ) -> Result<Article, ArticleError> {
        if let Some(image) = image {
            article.image_path = Some(self.images.save(&image).await?);
        }

        repository::insert(&self.conn, &article).await?;
        Ok(article)
    }

    /// Обновление статьи. updated_at обновляется безусловно. Новая картинка
    /// замещает старую (старый файл удаляется). Переводы входящей статьи
    /// вливаются по языку: существующий перезаписывается на месте с
    /// сохранением идентификатора, отсутствующий добавляется; переводы,
    /// которых нет во входе, не трогаются.
    pub async fn update(
        &self,
        incoming: Article,
        image: Option<UploadedFile>,
    ) -> Result<(), ArticleError> {
        let mut existing = repository::get_by_id(&self.conn, incoming.id.value())
            .await?
            .ok_or(ArticleError::NotFound)?;

        existing.touch_updated();

        if let Some(image) = image {
            if let Some(old_path) = existing.image_path.take() {
                self.images.delete_if_exists(&old_path).await?;
            }
            existing.image_path = Some(self.images.save(&image).await?);
        }

        for tr in incoming.translations {
            existing.upsert_translation(&tr.language, tr.title, tr.subtitle, tr.text);
        }

        repository::update(&self.conn, &existing).await?;
        Ok(())
    }

    /// Удаление статьи вместе с переводами и файлом картинки
    pub async fn delete(&self, id: Uuid) -> Result<(), ArticleError> {
        let existing = repository::get_by_id(&self.conn, id)
            .await?
            .ok_or(ArticleError::NotFound)?;

        if let Some(image_path) = &existing.image_path {
            self.images.delete_if_exists(image_path).await?;
        }

        repository::delete(&self.conn, id).await?;
        Ok(())
    }
}
