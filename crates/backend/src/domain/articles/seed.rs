use chrono::{Duration, Utc};
use contracts::domain::articles::aggregate::Article;
use sea_orm::DatabaseConnection;

use super::repository;

/// Заполнить пустую базу демонстрационными статьями.
/// Если статьи уже есть — ничего не делает.
pub async fn seed_demo_articles(conn: &DatabaseConnection) -> anyhow::Result<()> {
    if repository::count(conn).await? > 0 {
        return Ok(());
    }

    tracing::info!("Seeding demo articles");

    for i in 1..=10 {
        let mut article = Article::new_for_insert();
        article.image_path = Some(format!("/uploads/{}.jpg", i));
        article.created_at = Utc::now() - Duration::days(i);
        article.updated_at = article.created_at;

        article.upsert_translation(
            "ru",
            format!("Заголовок статьи {}", i),
            Some(format!("Подзаголовок статьи {}", i)),
            format!(
                "Это текст статьи номер {}. Здесь рассказывается о важной теме для читателей.",
                i
            ),
        );
        article.upsert_translation(
            "en",
            format!("Article Title {}", i),
            Some(format!("Article Subtitle {}", i)),
            format!(
                "This is the text of article number {}. It discusses an important topic for readers.",
                i
            ),
        );

        repository::insert(conn, &article).await?;
    }

    Ok(())
}
