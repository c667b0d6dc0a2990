use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{Duration, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::News;
use crate::repository::news::NewsFilter;
use crate::utils::{now_string, parse_object_id, total_pages};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/news", get(list_news).post(create_news))
        .route("/news/featured", get(featured_news))
        .route("/news/search", get(search_news))
        .route("/news/categories", get(news_categories))
        .route("/news/popular", get(popular_news))
        .route("/news/recent", get(recent_news))
        .route("/news/category/{category}", get(news_by_category))
        .route(
            "/news/{id}",
            get(get_news).put(update_news).delete(delete_news),
        )
}

#[derive(Deserialize)]
struct ListQuery {
    #[serde(default)]
    page: u64,
    #[serde(default = "default_size")]
    size: i64,
    category: Option<String>,
    featured: Option<bool>,
    search: Option<String>,
}

fn default_size() -> i64 {
    10
}

async fn list_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = NewsFilter {
        category: query.category.filter(|c| !c.trim().is_empty()),
        featured: query.featured,
        search: query.search.filter(|s| !s.trim().is_empty()),
    };
    let size = query.size.max(1);
    let skip = query.page * size as u64;
    let (news, total) = state.db.news().find_page(&filter, skip, size).await?;

    Ok(Json(json!({
        "success": true,
        "news": news,
        "totalElements": total,
        "totalPages": total_pages(total, size as u64),
        "currentPage": query.page,
        "size": size,
    })))
}

async fn get_news(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // Reads count as views
    let news = state
        .db
        .news()
        .find_and_increment_views(parse_object_id(&id)?)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(json!({ "success": true, "news": news })))
}

async fn featured_news(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let news = state.db.news().find_featured().await?;
    Ok(Json(json!({ "success": true, "news": news })))
}

async fn news_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let news = state.db.news().find_by_category(&category).await?;
    Ok(Json(json!({ "success": true, "news": news })))
}

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
}

async fn search_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let news = state.db.news().search(&query.q).await?;
    Ok(Json(json!({ "success": true, "news": news, "query": query.q })))
}

async fn news_categories(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state.db.news().distinct_categories().await?;
    Ok(Json(json!({ "success": true, "categories": categories })))
}

async fn popular_news(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let news = state.db.news().find_popular(10).await?;
    Ok(Json(json!({ "success": true, "news": news })))
}

async fn recent_news(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let cutoff = (Utc::now() - Duration::days(30)).to_rfc3339_opts(SecondsFormat::Secs, true);
    let news = state.db.news().find_published_since(&cutoff).await?;
    Ok(Json(json!({ "success": true, "news": news })))
}

async fn create_news(
    State(state): State<Arc<AppState>>,
    Json(mut news): Json<News>,
) -> Result<impl IntoResponse, ApiError> {
    news.apply_create_defaults();
    let saved = state.db.news().insert(news).await?;
    Ok(Json(json!({
        "success": true,
        "message": "news created",
        "news": saved,
    })))
}

async fn update_news(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<News>,
) -> Result<impl IntoResponse, ApiError> {
    let oid = parse_object_id(&id)?;
    let mut news = state
        .db
        .news()
        .find_by_id(oid)
        .await?
        .ok_or(ApiError::NotFound)?;

    // Editorial fields come from the payload, counters and dates survive
    news.title = update.title;
    news.summary = update.summary;
    news.content = update.content;
    news.author = update.author;
    news.category = update.category;
    news.tags = update.tags;
    news.image_url = update.image_url;
    news.featured = update.featured;
    news.updated_at = Some(now_string());

    let saved = state.db.news().replace(oid, news).await?;
    Ok(Json(json!({
        "success": true,
        "message": "news updated",
        "news": saved,
    })))
}

async fn delete_news(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.news().delete(parse_object_id(&id)?).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(json!({ "success": true, "message": "news deleted" })))
}
