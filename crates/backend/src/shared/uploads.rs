use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Файл, принятый из multipart-формы
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Хранилище загруженных картинок под публичным каталогом.
/// Возвращает пути, пригодные для прямой подстановки в URL.
#[derive(Debug, Clone)]
pub struct ImageStore {
    public_root: PathBuf,
}

const UPLOADS_SEGMENT: &str = "uploads";

impl ImageStore {
    pub fn new(public_root: impl Into<PathBuf>) -> Self {
        Self {
            public_root: public_root.into(),
        }
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.public_root.join(UPLOADS_SEGMENT)
    }

    /// Сохранить файл под свежим уникальным именем, сохранив расширение
    /// оригинала. Каталог создаётся при необходимости. Возвращает
    /// публичный путь вида `/uploads/<имя>`.
    pub async fn save(&self, file: &UploadedFile) -> io::Result<String> {
        let uploads_dir = self.uploads_dir();
        tokio::fs::create_dir_all(&uploads_dir).await?;

        let extension = Path::new(&file.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        let file_name = format!("{}{}", Uuid::new_v4(), extension);

        tokio::fs::write(uploads_dir.join(&file_name), &file.bytes).await?;

        Ok(format!("/{}/{}", UPLOADS_SEGMENT, file_name))
    }

    /// Удалить файл по публичному пути. Пустой путь и уже отсутствующий
    /// файл — не ошибка.
    pub async fn delete_if_exists(&self, relative_path: &str) -> io::Result<()> {
        let trimmed = relative_path.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let full_path = self
            .public_root
            .join(trimmed.replace('\\', "/").trim_start_matches('/'));
        match tokio::fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Абсолютный путь файла по его публичному пути
    pub fn resolve(&self, relative_path: &str) -> PathBuf {
        self.public_root
            .join(relative_path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (ImageStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = ImageStore::new(temp_dir.path());
        (store, temp_dir)
    }

    fn image(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        }
    }

    #[tokio::test]
    async fn save_writes_file_and_returns_public_path() {
        let (store, _temp_dir) = test_store();

        let path = store.save(&image("photo.jpg")).await.expect("save");

        assert!(path.starts_with("/uploads/"));
        assert!(path.ends_with(".jpg"));
        assert!(store.resolve(&path).exists());
    }

    #[tokio::test]
    async fn saved_names_are_unique() {
        let (store, _temp_dir) = test_store();

        let first = store.save(&image("photo.jpg")).await.expect("save");
        let second = store.save(&image("photo.jpg")).await.expect("save");

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn extension_is_preserved_and_optional() {
        let (store, _temp_dir) = test_store();

        let with_ext = store.save(&image("cover.png")).await.expect("save");
        assert!(with_ext.ends_with(".png"));

        let without_ext = store.save(&image("noextension")).await.expect("save");
        assert!(!without_ext.contains('.'));
    }

    #[tokio::test]
    async fn delete_removes_saved_file() {
        let (store, _temp_dir) = test_store();

        let path = store.save(&image("photo.jpg")).await.expect("save");
        store.delete_if_exists(&path).await.expect("delete");

        assert!(!store.resolve(&path).exists());
    }

    #[tokio::test]
    async fn delete_of_missing_file_is_ok() {
        let (store, _temp_dir) = test_store();

        store
            .delete_if_exists("/uploads/nonexistent.jpg")
            .await
            .expect("missing file is not an error");
    }

    #[tokio::test]
    async fn delete_of_empty_path_is_noop() {
        let (store, _temp_dir) = test_store();

        store.delete_if_exists("").await.expect("empty path");
        store.delete_if_exists("   ").await.expect("blank path");
    }
}
