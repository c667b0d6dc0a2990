use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::ApiError;
use crate::middleware::AdminAuth;
use crate::models::{Admin, User};
use crate::services::stats;
use crate::utils::{now_string, parse_object_id, require_non_blank};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/login", post(login))
        .route("/admin/logout", post(logout))
        .route("/admin/profile", get(get_profile))
        .route("/admin/stats", get(get_stats))
        .route("/admin/admins", get(list_admins))
        .route("/admin/tickets", get(list_tickets))
        .route("/admin/tickets/{ticketId}/status", post(update_ticket_status))
        .route("/admin/users", get(list_users))
        .route("/admin/users/search", get(search_users))
        .route(
            "/admin/users/{userId}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/admin/create", post(create_admin))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    username: Option<String>,
    password: Option<String>,
    admin_key: Option<String>,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = require_non_blank(request.username.as_deref(), "username")?;
    let password = require_non_blank(request.password.as_deref(), "password")?;
    let admin_key = require_non_blank(request.admin_key.as_deref(), "adminKey")?;

    if admin_key != state.config.admin.admin_key {
        return Err(ApiError::Unauthorized("invalid admin key".into()));
    }

    let admins = state.db.admins();
    let admin = admins
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("admin account does not exist".into()))?;

    if admin.password.as_deref() != Some(password.as_str()) {
        return Err(ApiError::Unauthorized("incorrect password".into()));
    }

    let id = admin.id.ok_or(ApiError::NotFound)?;
    let admin = admins
        .set_last_login(id, &now_string())
        .await?
        .unwrap_or(admin);

    tracing::info!("admin '{}' logged in", username);
    Ok(Json(json!({
        "success": true,
        "message": "login successful",
        "admin": admin.without_password(),
        "token": format!("admin-token-{}", id.to_hex()),
    })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdminIdQuery {
    admin_id: String,
}

async fn logout(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AdminIdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let oid = parse_object_id(&query.admin_id)?;
    if state.db.admins().find_by_id(oid).await?.is_none() {
        return Err(ApiError::BadRequest("admin does not exist".into()));
    }
    Ok(Json(json!({ "success": true, "message": "logout successful" })))
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AdminIdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = state
        .db
        .admins()
        .find_by_id(parse_object_id(&query.admin_id)?)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(json!({ "success": true, "admin": admin.without_password() })))
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let stats = stats::collect(&state.db.tickets(), &state.db.users()).await?;
    Ok(Json(json!({ "success": true, "stats": stats })))
}

async fn list_admins(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let admins: Vec<Admin> = state
        .db
        .admins()
        .find_all()
        .await?
        .into_iter()
        .map(Admin::without_password)
        .collect();
    Ok(Json(json!({ "success": true, "admins": admins })))
}

async fn list_tickets(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let tickets = state.db.tickets().find_all().await?;
    Ok(Json(json!({ "success": true, "tickets": tickets })))
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
    Ok(Json(json!({ "success": true, "users": users })))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .users()
        .find_by_id(parse_object_id(&user_id)?)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(json!({ "success": true, "user": user.without_password() })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserUpdate {
    full_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    notes: Option<String>,
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    _auth: AdminAuth,
    Path(user_id): Path<String>,
    Json(update): Json<UserUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let oid = parse_object_id(&user_id)?;
    let users = state.db.users();
    let mut user = users.find_by_id(oid).await?.ok_or(ApiError::NotFound)?;

    if update.full_name.is_some() {
        user.full_name = update.full_name;
    }
    if let Some(email) = update.email {
        if user.email.as_deref() != Some(email.as_str()) && users.exists_by_email(&email).await? {
            return Err(ApiError::BadRequest("email already exists".into()));
        }
        user.email = Some(email);
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
    user.updated_at = Some(now_string());

    let saved = users.replace(oid, user).await?;
    Ok(Json(json!({
        "success": true,
        "message": "user updated",
        "user": saved.without_password(),
    })))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    _auth: AdminAuth,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.users().delete(parse_object_id(&user_id)?).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(json!({ "success": true, "message": "user deleted" })))
}

#[derive(Deserialize)]
struct SearchQuery {
    keyword: String,
}

async fn search_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let keyword = query.keyword.to_lowercase();
    let users: Vec<User> = state
        .db
        .users()
        .find_all()
        .await?
        .into_iter()
        .filter(|user| {
            [&user.username, &user.full_name, &user.email]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&keyword))
        })
        .map(User::without_password)
        .collect();
    Ok(Json(json!({ "success": true, "users": users })))
}

#[derive(Deserialize)]
struct StatusRequest {
    status: Option<String>,
}

async fn update_ticket_status(
    State(state): State<Arc<AppState>>,
    _auth: AdminAuth,
    Path(ticket_id): Path<String>,
    Json(request): Json<StatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = require_non_blank(request.status.as_deref(), "status")?;
    let ticket = state
        .db
        .tickets()
        .set_status(parse_object_id(&ticket_id)?, &status)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(json!({
        "success": true,
        "message": "ticket status updated",
        "ticket": ticket,
    })))
}

async fn create_admin(
    State(state): State<Arc<AppState>>,
    _auth: AdminAuth,
    Json(request): Json<Admin>,
) -> Result<impl IntoResponse, ApiError> {
    let username = require_non_blank(request.username.as_deref(), "username")?;
    let password = require_non_blank(request.password.as_deref(), "password")?;

    let admins = state.db.admins();
    if admins.exists_by_username(&username).await? {
        return Err(ApiError::BadRequest("username already exists".into()));
    }
    if let Some(email) = request.email.as_deref() {
        if admins.exists_by_email(email).await? {
            return Err(ApiError::BadRequest("email already exists".into()));
        }
    }

    let mut admin = Admin::new(username, password);
    admin.full_name = request.full_name;
    admin.email = request.email;
    admin.phone = request.phone;
    admin.notes = request.notes;
    if request.role.is_some() {
        admin.role = request.role;
    }

    let saved = admins.insert(admin).await?;
    Ok(Json(json!({
        "success": true,
        "message": "admin created",
        "admin": saved.without_password(),
    })))
}
