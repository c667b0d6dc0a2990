use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::Ticket;
use crate::services::booking::BookingService;
use crate::utils::parse_object_id;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tickets", get(list_tickets).post(create_ticket))
        .route("/tickets/book", post(book_ticket))
        .route("/tickets/user/{userId}", get(tickets_by_user))
        .route(
            "/tickets/{id}",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
}

async fn list_tickets(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.tickets().find_all().await?))
}

async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let ticket = state
        .db
        .tickets()
        .find_by_id(parse_object_id(&id)?)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(ticket))
}

async fn tickets_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.tickets().find_by_user(&user_id).await?))
}

async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Json(ticket): Json<Ticket>,
) -> Result<impl IntoResponse, ApiError> {
    let saved = BookingService::new(&state.db).create_ticket(ticket).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

// Same persistence path as create; the storefront posts here after a seat is
// locked in.
async fn book_ticket(
    State(state): State<Arc<AppState>>,
    Json(ticket): Json<Ticket>,
) -> Result<impl IntoResponse, ApiError> {
    let saved = BookingService::new(&state.db).create_ticket(ticket).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(ticket): Json<Ticket>,
) -> Result<impl IntoResponse, ApiError> {
    let oid = parse_object_id(&id)?;
    if state.db.tickets().find_by_id(oid).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(state.db.tickets().replace(oid, ticket).await?))
}

async fn delete_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.tickets().delete(parse_object_id(&id)?).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
