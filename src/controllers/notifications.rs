use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::Notification;
use crate::utils::{now_string, parse_object_id};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notifications", get(list_notifications).post(create_notification))
        .route(
            "/notifications/user/{userId}",
            get(notifications_by_user).delete(delete_by_user),
        )
        .route("/notifications/user/{userId}/unread", get(unread_by_user))
        .route("/notifications/user/{userId}/count", get(unread_count))
        .route("/notifications/user/{userId}/read-all", put(mark_all_read))
        .route("/notifications/{id}/read", put(mark_read))
        .route(
            "/notifications/{id}",
            get(get_notification).delete(delete_notification),
        )
}

async fn list_notifications(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.notifications().find_all().await?))
}

async fn get_notification(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let notification = state
        .db
        .notifications()
        .find_by_id(parse_object_id(&id)?)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(notification))
}

async fn notifications_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.notifications().find_by_user(&user_id).await?))
}

async fn unread_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state.db.notifications().find_unread_by_user(&user_id).await?,
    ))
}

async fn unread_count(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.notifications().count_unread(&user_id).await?))
}

async fn create_notification(
    State(state): State<Arc<AppState>>,
    Json(mut notification): Json<Notification>,
) -> Result<impl IntoResponse, ApiError> {
    if notification.created_at.is_none() {
        notification.created_at = Some(now_string());
    }
    let saved = state.db.notifications().insert(notification).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let notification = state
        .db
        .notifications()
        .mark_read(parse_object_id(&id)?, &now_string())
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(notification))
}

async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state
        .db
        .notifications()
        .mark_all_read(&user_id, &now_string())
        .await?;
    Ok(Json(json!({ "success": true, "updated": updated })))
}

async fn delete_notification(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.notifications().delete(parse_object_id(&id)?).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.db.notifications().delete_by_user(&user_id).await?;
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}
