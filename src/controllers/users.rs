use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::User;
use crate::utils::{now_string, parse_object_id, require_non_blank};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/check-username", get(check_username))
        .route("/users/check-email", get(check_email))
        .route("/users/profile", get(get_profile))
        .route("/users/profile/{userId}", put(update_profile))
        .route("/users/change-password/{userId}", post(change_password))
        .route("/users/{id}/update-login", post(update_last_login))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let users: Vec<User> = state
        .db
        .users()
        .find_all()
        .await?
        .into_iter()
        .map(User::without_password)
        .collect();
    Ok(Json(users))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .users()
        .find_by_id(parse_object_id(&id)?)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(user.without_password()))
}

/// Shared by POST /users and POST /users/register: required fields, then
/// username and email uniqueness.
async fn insert_new_user(state: &AppState, user: User) -> Result<User, ApiError> {
    let username = require_non_blank(user.username.as_deref(), "username")?;
    let email = require_non_blank(user.email.as_deref(), "email")?;
    require_non_blank(user.password.as_deref(), "password")?;

    let users = state.db.users();
    if users.exists_by_username(&username).await? {
        return Err(ApiError::Conflict("username already exists".into()));
    }
    if users.exists_by_email(&email).await? {
        return Err(ApiError::Conflict("email already exists".into()));
    }
    Ok(users.insert(user).await?.without_password())
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(user): Json<User>,
) -> Result<impl IntoResponse, ApiError> {
    let saved = insert_new_user(&state, user).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(user): Json<User>,
) -> Result<impl IntoResponse, ApiError> {
    let saved = insert_new_user(&state, user).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<User>,
) -> Result<impl IntoResponse, ApiError> {
    let oid = parse_object_id(&id)?;
    let users = state.db.users();
    let mut user = users.find_by_id(oid).await?.ok_or(ApiError::NotFound)?;

    require_non_blank(update.username.as_deref(), "username")?;
    require_non_blank(update.email.as_deref(), "email")?;

    user.username = update.username;
    user.email = update.email;
    if update.full_name.is_some() {
        user.full_name = update.full_name;
    }
    if update.phone.is_some() {
        user.phone = update.phone;
    }
    if update.address.is_some() {
        user.address = update.address;
    }
    if update.notes.is_some() {
        user.notes = update.notes;
    }
    if update.avatar.is_some() {
        user.avatar = update.avatar;
    }
    // Password only changes when a non-blank one is sent
    if update.password.as_deref().is_some_and(|p| !p.trim().is_empty()) {
        user.password = update.password;
    }
    user.updated_at = Some(now_string());

    let saved = users.replace(oid, user).await?;
    Ok(Json(saved.without_password()))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.users().delete(parse_object_id(&id)?).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct LoginQuery {
    username: String,
    password: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoginQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.db.users();
    let user = users
        .find_by_credentials(&query.username, &query.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("invalid username or password".into()))?;

    let user = match user.id {
        Some(id) => users
            .set_last_login(id, &now_string())
            .await?
            .unwrap_or(user),
        None => user,
    };
    Ok(Json(user.without_password()))
}

#[derive(Deserialize)]
struct UsernameQuery {
    username: String,
}

async fn check_username(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsernameQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state.db.users().exists_by_username(&query.username).await?,
    ))
}

#[derive(Deserialize)]
struct EmailQuery {
    email: String,
}

async fn check_email(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.users().exists_by_email(&query.email).await?))
}

async fn update_last_login(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .users()
        .set_last_login(parse_object_id(&id)?, &now_string())
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(user.without_password()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileQuery {
    user_id: String,
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProfileQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .users()
        .find_by_id(parse_object_id(&query.user_id)?)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(user.without_password()))
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(update): Json<User>,
) -> Result<impl IntoResponse, ApiError> {
    let oid = parse_object_id(&user_id)?;
    let users = state.db.users();
    let mut user = users.find_by_id(oid).await?.ok_or(ApiError::NotFound)?;

    if let Some(full_name) = update.full_name.filter(|v| !v.trim().is_empty()) {
        user.full_name = Some(full_name);
    }
    if let Some(email) = update.email.filter(|v| !v.trim().is_empty()) {
        if user.email.as_deref() != Some(email.as_str()) && users.exists_by_email(&email).await? {
            return Err(ApiError::Conflict("email already exists".into()));
        }
        user.email = Some(email);
    }
    if update.phone.is_some() {
        user.phone = update.phone;
    }
    if update.address.is_some() {
        user.address = update.address;
    }
    user.updated_at = Some(now_string());

    let saved = users.replace(oid, user).await?;
    Ok(Json(saved.without_password()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest {
    current_password: Option<String>,
    new_password: Option<String>,
}

async fn change_password(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let current = require_non_blank(request.current_password.as_deref(), "currentPassword")?;
    let new_password = require_non_blank(request.new_password.as_deref(), "newPassword")?;

    let oid = parse_object_id(&user_id)?;
    let users = state.db.users();
    let mut user = users.find_by_id(oid).await?.ok_or(ApiError::NotFound)?;

    if user.password.as_deref() != Some(current.as_str()) {
        return Err(ApiError::Unauthorized("current password is incorrect".into()));
    }
    user.password = Some(new_password);
    user.updated_at = Some(now_string());

    let saved = users.replace(oid, user).await?;
    Ok(Json(saved.without_password()))
}
