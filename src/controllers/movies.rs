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
use crate::models::Movie;
use crate::utils::{parse_object_id, require_non_blank};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/search", get(search_movies))
        .route("/movies/featured", get(featured_movies))
        .route("/movies/genre/{genre}", get(movies_by_genre))
        .route("/movies/year/{year}", get(movies_by_year))
        .route(
            "/movies/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
}

async fn list_movies(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.movies().find_all().await?))
}

async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let movie = state
        .db
        .movies()
        .find_by_id(parse_object_id(&id)?)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(movie))
}

async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(movie): Json<Movie>,
) -> Result<impl IntoResponse, ApiError> {
    require_non_blank(movie.title.as_deref(), "title")?;
    let saved = state.db.movies().insert(movie).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(movie): Json<Movie>,
) -> Result<impl IntoResponse, ApiError> {
    let oid = parse_object_id(&id)?;
    if !state.db.movies().exists(oid).await? {
        return Err(ApiError::NotFound);
    }
    require_non_blank(movie.title.as_deref(), "title")?;
    Ok(Json(state.db.movies().replace(oid, movie).await?))
}

async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.movies().delete(parse_object_id(&id)?).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
}

// Catalog documents are schema-drifted, so text filters run in memory over
// the accessor methods instead of per-field queries.
async fn search_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let movies: Vec<Movie> = state
        .db
        .movies()
        .find_all()
        .await?
        .into_iter()
        .filter(|movie| movie.matches_query(&query.q))
        .collect();
    Ok(Json(movies))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeaturedQuery {
    #[serde(default = "default_min_rating")]
    min_rating: f64,
}

fn default_min_rating() -> f64 {
    7.0
}

async fn featured_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeaturedQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let movies: Vec<Movie> = state
        .db
        .movies()
        .find_all()
        .await?
        .into_iter()
        .filter(|movie| movie.rating_value().is_some_and(|r| r >= query.min_rating))
        .collect();
    Ok(Json(movies))
}

async fn movies_by_genre(
    State(state): State<Arc<AppState>>,
    Path(genre): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let movies: Vec<Movie> = state
        .db
        .movies()
        .find_all()
        .await?
        .into_iter()
        .filter(|movie| movie.matches_genre(&genre))
        .collect();
    Ok(Json(movies))
}

async fn movies_by_year(
    State(state): State<Arc<AppState>>,
    Path(year): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let movies: Vec<Movie> = state
        .db
        .movies()
        .find_all()
        .await?
        .into_iter()
        .filter(|movie| movie.matches_year(&year))
        .collect();
    Ok(Json(movies))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn featured_threshold_defaults_to_seven() {
        assert_eq!(default_min_rating(), 7.0);
    }
}
