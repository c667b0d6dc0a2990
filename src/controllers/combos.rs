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
use crate::models::Combo;
use crate::utils::{now_string, parse_object_id, require_non_blank};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/combos", get(list_combos).post(create_combo))
        .route("/combos/search", get(search_combos))
        .route("/combos/price-range", get(combos_by_price_range))
        .route("/combos/max-price", get(combos_by_max_price))
        .route(
            "/combos/{id}",
            get(get_combo).put(update_combo).delete(delete_combo),
        )
}

async fn list_combos(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.combos().find_active().await?))
}

async fn get_combo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let combo = state
        .db
        .combos()
        .find_by_id(parse_object_id(&id)?)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(combo))
}

#[derive(Deserialize)]
struct SearchQuery {
    name: String,
}

async fn search_combos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state.db.combos().search_active_by_name(&query.name).await?,
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceRangeQuery {
    min_price: f64,
    max_price: f64,
}

async fn combos_by_price_range(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PriceRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state
            .db
            .combos()
            .find_active_in_price_range(query.min_price, query.max_price)
            .await?,
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MaxPriceQuery {
    max_price: f64,
}

async fn combos_by_max_price(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MaxPriceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state
            .db
            .combos()
            .find_active_below_price(query.max_price)
            .await?,
    ))
}

async fn create_combo(
    State(state): State<Arc<AppState>>,
    Json(mut combo): Json<Combo>,
) -> Result<impl IntoResponse, ApiError> {
    require_non_blank(combo.name.as_deref(), "name")?;
    combo.is_active = Some(combo.is_active.unwrap_or(true));
    let now = now_string();
    combo.created_at = Some(now.clone());
    combo.updated_at = Some(now);
    let saved = state.db.combos().insert(combo).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update_combo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut combo): Json<Combo>,
) -> Result<impl IntoResponse, ApiError> {
    let oid = parse_object_id(&id)?;
    let existing = state
        .db
        .combos()
        .find_by_id(oid)
        .await?
        .ok_or(ApiError::NotFound)?;
    combo.created_at = combo.created_at.or(existing.created_at);
    combo.updated_at = Some(now_string());
    Ok(Json(state.db.combos().replace(oid, combo).await?))
}

async fn delete_combo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.combos().soft_delete(parse_object_id(&id)?).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::OK)
}
