use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use contracts::domain::articles::view::ArticleView;
use contracts::shared::culture;
use serde::Deserialize;
use uuid::Uuid;

use super::{current_culture, is_local_url};
use crate::state::AppState;
use crate::system::auth::cookies;
use crate::views;

const LATEST_COUNT: i64 = 6;
const DEFAULT_BATCH: u64 = 6;

/// GET /
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let culture = current_culture(&headers);
    tracing::info!("Fetching latest articles for culture {}", culture);

    match state.articles.get_latest(LATEST_COUNT).await {
        Ok(articles) => {
            tracing::debug!("Fetched {} latest articles", articles.len());
            let views: Vec<ArticleView> = articles.iter().map(|a| a.localize(culture)).collect();
            views::news::index(culture, &views).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch latest articles: {}", e);
            views::server_error(culture, "/")
        }
    }
}

/// GET /news/all
pub async fn all(headers: HeaderMap) -> Html<String> {
    let culture = current_culture(&headers);
    views::news::all(culture)
}

#[derive(Debug, Deserialize)]
pub struct BatchQuery {
    pub skip: Option<u64>,
    pub take: Option<u64>,
}

/// GET /news/articles?skip=&take= — JSON-партия для ленивой подгрузки
pub async fn get_articles(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BatchQuery>,
) -> Result<Json<Vec<ArticleView>>, StatusCode> {
    let culture = current_culture(&headers);
    let skip = query.skip.unwrap_or(0);
    let take = query.take.unwrap_or(DEFAULT_BATCH);
    tracing::info!(
        "Fetching articles batch: skip={}, take={}, culture={}",
        skip,
        take,
        culture
    );

    let articles = state.articles.get_paged(skip, take).await.map_err(|e| {
        tracing::error!("Failed to fetch articles batch: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    if articles.is_empty() {
        tracing::info!("No more articles found for skip={}, take={}", skip, take);
    }

    let views = articles.iter().map(|a| a.localize(culture)).collect();
    Ok(Json(views))
}

/// GET /news/details/:id
pub async fn details(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let culture = current_culture(&headers);
    let current_path = format!("/news/details/{}", id);

    // Нечитаемый идентификатор — такой страницы нет
    let id = match Uuid::parse_str(&id) {
        Ok(id) => id,
        Err(_) => return views::not_found(culture, &current_path),
    };

    match state.articles.get_by_id(id).await {
        Ok(Some(article)) => {
            if article.translation_for(culture).is_none()
                && article.translation_for(culture::FALLBACK).is_none()
            {
                tracing::warn!("No translation found for article {}", id);
            }
            views::news::details(culture, &article.localize(culture)).into_response()
        }
        Ok(None) => {
            tracing::warn!("Article {} not found", id);
            views::not_found(culture, &current_path)
        }
        Err(e) => {
            tracing::error!("Failed to fetch article {}: {}", id, e);
            views::server_error(culture, &current_path)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetLanguageQuery {
    pub culture: String,
    pub return_url: Option<String>,
}

/// GET /news/set-language?culture=&return_url= — запоминает выбор языка
/// в cookie и возвращает читателя на прежнюю страницу
pub async fn set_language(Query(query): Query<SetLanguageQuery>) -> Response {
    let target = query
        .return_url
        .as_deref()
        .filter(|url| is_local_url(url))
        .unwrap_or("/")
        .to_string();

    if !culture::is_supported(&query.culture) {
        tracing::warn!("Attempted to set unsupported culture '{}'", query.culture);
        return Redirect::to(&target).into_response();
    }

    tracing::info!("Setting UI culture to {}", query.culture);
    let mut response = Redirect::to(&target).into_response();
    if let Ok(value) =
        cookies::culture_cookie(culture::COOKIE_NAME, &query.culture).parse()
    {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
