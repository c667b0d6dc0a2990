use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::article::{Article, STATUS_PUBLISHED};
use crate::utils::{now_string, parse_object_id, require_non_blank};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/articles", get(list_articles).post(create_article))
        .route("/articles/search", get(search_articles))
        .route("/articles/latest", get(latest_articles))
        .route("/articles/featured", get(featured_articles))
        .route("/articles/movie/{movieId}", get(articles_by_movie))
        .route("/articles/category/{category}", get(articles_by_category))
        .route("/articles/author/{author}", get(articles_by_author))
        .route("/articles/count/movie/{movieId}", get(count_by_movie))
        .route("/articles/count/category/{category}", get(count_by_category))
        .route(
            "/articles/{id}",
            get(get_article).put(update_article).delete(delete_article),
        )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    #[serde(default = "default_status")]
    status: String,
    #[serde(default = "default_active")]
    is_active: bool,
}

fn default_status() -> String {
    STATUS_PUBLISHED.to_string()
}

fn default_active() -> bool {
    true
}

async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state
            .db
            .articles()
            .find_by_status(&query.status, query.is_active)
            .await?,
    ))
}

async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let article = state
        .db
        .articles()
        .find_by_id(parse_object_id(&id)?)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(article))
}

async fn articles_by_movie(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state.db.articles().find_published_by_movie(&movie_id).await?,
    ))
}

#[derive(Deserialize)]
struct SearchQuery {
    title: String,
}

async fn search_articles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state
            .db
            .articles()
            .search_title_or_content(&query.title)
            .await?,
    ))
}

async fn articles_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state
            .db
            .articles()
            .find_published_by_category(&category)
            .await?,
    ))
}

#[derive(Deserialize)]
struct LatestQuery {
    #[serde(default = "default_limit")]
    limit: i64,
}

fn default_limit() -> i64 {
    10
}

async fn latest_articles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LatestQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state.db.articles().find_latest_published(query.limit).await?,
    ))
}

async fn featured_articles(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.articles().find_featured().await?))
}

async fn articles_by_author(
    State(state): State<Arc<AppState>>,
    Path(author): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.articles().find_by_author(&author).await?))
}

async fn count_by_movie(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.articles().count_by_movie(&movie_id).await?))
}

async fn count_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.articles().count_by_category(&category).await?))
}

async fn create_article(
    State(state): State<Arc<AppState>>,
    Json(mut article): Json<Article>,
) -> Result<impl IntoResponse, ApiError> {
    require_non_blank(article.title.as_deref(), "title")?;
    require_non_blank(article.content.as_deref(), "content")?;

    article.apply_create_defaults();
    let now = now_string();
    article.created_at = Some(now.clone());
    article.updated_at = Some(now.clone());
    if article.is_published() && article.published_at.is_none() {
        article.published_at = Some(now);
    }

    let saved = state.db.articles().insert(article).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut article): Json<Article>,
) -> Result<impl IntoResponse, ApiError> {
    let oid = parse_object_id(&id)?;
    let existing = state
        .db
        .articles()
        .find_by_id(oid)
        .await?
        .ok_or(ApiError::NotFound)?;

    article.created_at = article.created_at.or(existing.created_at);
    article.updated_at = Some(now_string());
    // Stamp publishedAt the first time an article goes live
    if article.is_published() && article.published_at.is_none() {
        article.published_at = existing.published_at.or_else(|| Some(now_string()));
    }

    Ok(Json(state.db.articles().replace(oid, article).await?))
}

async fn delete_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.articles().delete(parse_object_id(&id)?).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
