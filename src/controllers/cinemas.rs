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
use crate::models::Cinema;
use crate::utils::{parse_object_id, require_non_blank};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cinemas", get(list_cinemas).post(create_cinema))
        .route("/cinemas/search", get(search_cinemas))
        .route("/cinemas/city/{city}", get(cinemas_by_city))
        .route(
            "/cinemas/{id}",
            get(get_cinema).put(update_cinema).delete(delete_cinema),
        )
}

async fn list_cinemas(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.cinemas().find_all().await?))
}

async fn get_cinema(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cinema = state
        .db
        .cinemas()
        .find_by_id(parse_object_id(&id)?)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(cinema))
}

async fn cinemas_by_city(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.cinemas().find_by_city(&city).await?))
}

#[derive(Deserialize)]
struct SearchQuery {
    name: String,
}

async fn search_cinemas(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.cinemas().search_by_name(&query.name).await?))
}

async fn create_cinema(
    State(state): State<Arc<AppState>>,
    Json(mut cinema): Json<Cinema>,
) -> Result<impl IntoResponse, ApiError> {
    require_non_blank(cinema.name.as_deref(), "name")?;
    require_non_blank(cinema.city.as_deref(), "city")?;
    if cinema.status.as_deref().is_none_or(|s| s.trim().is_empty()) {
        cinema.status = Some(Cinema::DEFAULT_STATUS.to_string());
    }
    let saved = state.db.cinemas().insert(cinema).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update_cinema(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(cinema): Json<Cinema>,
) -> Result<impl IntoResponse, ApiError> {
    let oid = parse_object_id(&id)?;
    if !state.db.cinemas().exists(oid).await? {
        return Err(ApiError::NotFound);
    }
    require_non_blank(cinema.name.as_deref(), "name")?;
    require_non_blank(cinema.city.as_deref(), "city")?;
    Ok(Json(state.db.cinemas().replace(oid, cinema).await?))
}

async fn delete_cinema(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.cinemas().delete(parse_object_id(&id)?).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
