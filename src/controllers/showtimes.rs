use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::Showtime;
use crate::utils::parse_object_id;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/showtimes", get(list_showtimes).post(create_showtime))
        .route("/showtimes/movie/{movieId}", get(showtimes_by_movie))
        .route(
            "/showtimes/{id}",
            get(get_showtime).put(update_showtime).delete(delete_showtime),
        )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    movie_id: Option<String>,
}

/// Full listing populates `movieName` from the movies collection; the
/// `?movieId=` form returns the raw showtimes of one movie.
async fn list_showtimes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(movie_id) = query.movie_id {
        return Ok(Json(state.db.showtimes().find_by_movie_id(&movie_id).await?));
    }

    let mut showtimes = state.db.showtimes().find_all().await?;
    let movies = state.db.movies();
    for showtime in &mut showtimes {
        showtime.movie_name = Some(match &showtime.movie_id {
            Some(movie_id) => match ObjectId::parse_str(movie_id) {
                Ok(oid) => match movies.find_by_id(oid).await? {
                    Some(movie) => movie.display_title().to_string(),
                    None => "Movie Not Found".to_string(),
                },
                Err(_) => "Movie Not Found".to_string(),
            },
            None => "No Movie ID".to_string(),
        });
    }
    Ok(Json(showtimes))
}

async fn showtimes_by_movie(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.showtimes().find_by_movie_id(&movie_id).await?))
}

async fn get_showtime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let showtime = state
        .db
        .showtimes()
        .find_by_id(parse_object_id(&id)?)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(showtime))
}

async fn create_showtime(
    State(state): State<Arc<AppState>>,
    Json(showtime): Json<Showtime>,
) -> Result<impl IntoResponse, ApiError> {
    let saved = state.db.showtimes().insert(showtime).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update_showtime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(showtime): Json<Showtime>,
) -> Result<impl IntoResponse, ApiError> {
    let oid = parse_object_id(&id)?;
    if state.db.showtimes().find_by_id(oid).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(state.db.showtimes().replace(oid, showtime).await?))
}

async fn delete_showtime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.showtimes().delete(parse_object_id(&id)?).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
