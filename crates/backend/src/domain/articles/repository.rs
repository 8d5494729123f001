use contracts::domain::articles::aggregate::{Article, ArticleId, ArticleTranslation};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

pub mod article {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "articles")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub image_path: Option<String>,
        pub created_at: chrono::DateTime<chrono::Utc>,
        pub updated_at: chrono::DateTime<chrono::Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::translation::Entity")]
        Translations,
    }

    impl Related<super::translation::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Translations.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod translation {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "article_translations")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub article_id: String,
        pub language: String,
        pub title: String,
        pub subtitle: Option<String>,
        pub text: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::article::Entity",
            from = "Column::ArticleId",
            to = "super::article::Column::Id"
        )]
        Article,
    }

    impl Related<super::article::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Article.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<translation::Model> for ArticleTranslation {
    fn from(m: translation::Model) -> Self {
        ArticleTranslation {
            id: Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4()),
            language: m.language,
            title: m.title,
            subtitle: m.subtitle,
            text: m.text,
        }
    }
}

fn assemble(row: article::Model, translations: Vec<translation::Model>) -> Article {
    let uuid = Uuid::parse_str(&row.id).unwrap_or_else(|_| Uuid::new_v4());
    Article {
        id: ArticleId::new(uuid),
        image_path: row.image_path,
        created_at: row.created_at,
        updated_at: row.updated_at,
        translations: translations.into_iter().map(Into::into).collect(),
    }
}

fn translation_active(article_id: &ArticleId, tr: &ArticleTranslation) -> translation::ActiveModel {
    translation::ActiveModel {
        id: Set(tr.id.to_string()),
        article_id: Set(article_id.as_string()),
        language: Set(tr.language.clone()),
        title: Set(tr.title.clone()),
        subtitle: Set(tr.subtitle.clone()),
        text: Set(tr.text.clone()),
    }
}

/// Статья по идентификатору, всегда вместе со всеми переводами.
/// Отсутствие статьи — нормальный результат, не ошибка.
pub async fn get_by_id(conn: &DatabaseConnection, id: Uuid) -> Result<Option<Article>, DbErr> {
    let row = article::Entity::find_by_id(id.to_string()).one(conn).await?;
    match row {
        Some(row) => {
            let translations = translation::Entity::find()
                .filter(translation::Column::ArticleId.eq(row.id.clone()))
                .all(conn)
                .await?;
            Ok(Some(assemble(row, translations)))
        }
        None => Ok(None),
    }
}

/// Страница статей по убыванию created_at, каждая с переводами.
/// Контракт чтения: переводы загружаются жадно, второй запрос за ними
/// вызывающей стороне не нужен.
pub async fn list_paged(
    conn: &DatabaseConnection,
    skip: u64,
    take: u64,
) -> Result<Vec<Article>, DbErr> {
    let rows = article::Entity::find()
        .order_by_desc(article::Column::CreatedAt)
        .offset(skip)
        .limit(take)
        .all(conn)
        .await?;

    let translations = rows.load_many(translation::Entity, conn).await?;

    Ok(rows
        .into_iter()
        .zip(translations)
        .map(|(row, trs)| assemble(row, trs))
        .collect())
}

pub async fn count(conn: &DatabaseConnection) -> Result<u64, DbErr> {
    article::Entity::find().count(conn).await
}

/// Вставка статьи вместе с переводами одной транзакцией
pub async fn insert(conn: &DatabaseConnection, aggregate: &Article) -> Result<(), DbErr> {
    let txn = conn.begin().await?;

    let active = article::ActiveModel {
        id: Set(aggregate.id.as_string()),
        image_path: Set(aggregate.image_path.clone()),
        created_at: Set(aggregate.created_at),
        updated_at: Set(aggregate.updated_at),
    };
    article::Entity::insert(active).exec(&txn).await?;

    for tr in &aggregate.translations {
        translation::Entity::insert(translation_active(&aggregate.id, tr))
            .exec(&txn)
            .await?;
    }

    txn.commit().await
}

/// Запись уже слитого агрегата: строка статьи обновляется, переводы
/// пишутся поштучно — существующий идентификатор обновляется на месте,
/// новый вставляется. Всё в одной транзакции.
pub async fn update(conn: &DatabaseConnection, aggregate: &Article) -> Result<(), DbErr> {
    let txn = conn.begin().await?;

    use sea_orm::sea_query::Expr;

    article::Entity::update_many()
        .col_expr(
            article::Column::ImagePath,
            Expr::value(aggregate.image_path.clone()),
        )
        .col_expr(
            article::Column::UpdatedAt,
            Expr::value(aggregate.updated_at),
        )
        .filter(article::Column::Id.eq(aggregate.id.as_string()))
        .exec(&txn)
        .await?;

    for tr in &aggregate.translations {
        let updated = translation::Entity::update_many()
            .col_expr(translation::Column::Title, Expr::value(tr.title.clone()))
            .col_expr(
                translation::Column::Subtitle,
                Expr::value(tr.subtitle.clone()),
            )
            .col_expr(translation::Column::Text, Expr::value(tr.text.clone()))
            .filter(translation::Column::Id.eq(tr.id.to_string()))
            .exec(&txn)
            .await?;

        if updated.rows_affected == 0 {
            translation::Entity::insert(translation_active(&aggregate.id, tr))
                .exec(&txn)
                .await?;
        }
    }

    txn.commit().await
}

/// Удаление статьи и всех её переводов одной транзакцией
pub async fn delete(conn: &DatabaseConnection, id: Uuid) -> Result<bool, DbErr> {
    let txn = conn.begin().await?;

    translation::Entity::delete_many()
        .filter(translation::Column::ArticleId.eq(id.to_string()))
        .exec(&txn)
        .await?;

    let result = article::Entity::delete_many()
        .filter(article::Column::Id.eq(id.to_string()))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    Ok(result.rows_affected > 0)
}
