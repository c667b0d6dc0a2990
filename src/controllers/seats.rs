use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::Seat;
use crate::services::booking::BookingService;
use crate::utils::parse_object_id;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seats", get(list_seats).post(create_seat))
        .route("/seats/batch", post(create_seats_batch))
        .route(
            "/seats/showtime/{showtimeId}",
            get(seats_by_showtime).delete(delete_seats_by_showtime),
        )
        .route("/seats/{id}/book", put(book_seat))
        .route("/seats/{id}/unbook", put(unbook_seat))
        .route(
            "/seats/{id}",
            get(get_seat).put(update_seat).delete(delete_seat),
        )
}

async fn list_seats(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.seats().find_all().await?))
}

async fn get_seat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let seat = state
        .db
        .seats()
        .find_by_id(parse_object_id(&id)?)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(seat))
}

async fn seats_by_showtime(
    State(state): State<Arc<AppState>>,
    Path(showtime_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let seats = BookingService::new(&state.db)
        .seats_for_showtime(&showtime_id)
        .await?;
    Ok(Json(seats))
}

async fn create_seat(
    State(state): State<Arc<AppState>>,
    Json(seat): Json<Seat>,
) -> Result<impl IntoResponse, ApiError> {
    let saved = state.db.seats().insert(seat).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

// Seat maps are created one showtime at a time, so batches insert as a unit.
async fn create_seats_batch(
    State(state): State<Arc<AppState>>,
    Json(seats): Json<Vec<Seat>>,
) -> Result<impl IntoResponse, ApiError> {
    let saved = state.db.seats().insert_many(seats).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update_seat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(seat): Json<Seat>,
) -> Result<impl IntoResponse, ApiError> {
    let oid = parse_object_id(&id)?;
    if state.db.seats().find_by_id(oid).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(state.db.seats().replace(oid, seat).await?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingRequest {
    #[serde(default)]
    user_id: String,
}

async fn book_seat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<BookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let seat = BookingService::new(&state.db)
        .book_seat(&id, &request.user_id)
        .await?;
    Ok(Json(seat))
}

async fn unbook_seat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<BookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let seat = BookingService::new(&state.db)
        .unbook_seat(&id, &request.user_id)
        .await?;
    Ok(Json(seat))
}

async fn delete_seat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.seats().delete(parse_object_id(&id)?).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_seats_by_showtime(
    State(state): State<Arc<AppState>>,
    Path(showtime_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.seats().delete_by_showtime(&showtime_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
