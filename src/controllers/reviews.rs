use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{review, Review};
use crate::utils::{now_string, parse_object_id, require_non_blank};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reviews", get(list_reviews).post(create_review))
        .route("/reviews/movie/{movieId}", get(reviews_by_movie))
        .route("/reviews/movie/{movieId}/count", get(count_by_movie))
        .route(
            "/reviews/movie/{movieId}/rating/{rating}",
            get(reviews_by_movie_and_rating),
        )
        .route(
            "/reviews/movie/{movieId}/rating/{rating}/count",
            get(count_by_movie_and_rating),
        )
        .route("/reviews/user/{userId}", get(reviews_by_user))
        .route("/reviews/{id}/like", put(like_review))
        .route("/reviews/{id}/dislike", put(dislike_review))
        .route(
            "/reviews/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
}

async fn list_reviews(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.reviews().find_all_active().await?))
}

async fn get_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let review = state
        .db
        .reviews()
        .find_by_id(parse_object_id(&id)?)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(review))
}

async fn reviews_by_movie(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.reviews().find_by_movie(&movie_id).await?))
}

async fn reviews_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.reviews().find_by_user(&user_id).await?))
}

async fn reviews_by_movie_and_rating(
    State(state): State<Arc<AppState>>,
    Path((movie_id, rating)): Path<(String, i32)>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state
            .db
            .reviews()
            .find_by_movie_and_rating(&movie_id, rating)
            .await?,
    ))
}

async fn count_by_movie(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.db.reviews().count_by_movie(&movie_id).await?))
}

async fn count_by_movie_and_rating(
    State(state): State<Arc<AppState>>,
    Path((movie_id, rating)): Path<(String, i32)>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state
            .db
            .reviews()
            .count_by_movie_and_rating(&movie_id, rating)
            .await?,
    ))
}

async fn create_review(
    State(state): State<Arc<AppState>>,
    Json(mut review): Json<Review>,
) -> Result<impl IntoResponse, ApiError> {
    require_non_blank(review.movie_id.as_deref(), "movieId")?;
    require_non_blank(review.user_id.as_deref(), "userId")?;
    require_non_blank(review.user_name.as_deref(), "userName")?;
    require_non_blank(review.comment.as_deref(), "comment")?;
    match review.rating {
        Some(rating) if review::rating_in_range(rating) => {}
        _ => return Err(ApiError::BadRequest("rating must be between 1 and 5".into())),
    }

    review.likes = Some(review.likes.unwrap_or(0));
    review.dislikes = Some(review.dislikes.unwrap_or(0));
    review.is_active = Some(review.is_active.unwrap_or(true));
    review.is_verified = Some(review.is_verified.unwrap_or(false));
    let now = now_string();
    review.created_at = Some(now.clone());
    review.updated_at = Some(now);

    let saved = state.db.reviews().insert(review).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut review): Json<Review>,
) -> Result<impl IntoResponse, ApiError> {
    let oid = parse_object_id(&id)?;
    if !state.db.reviews().exists(oid).await? {
        return Err(ApiError::NotFound);
    }
    if let Some(rating) = review.rating {
        if !review::rating_in_range(rating) {
            return Err(ApiError::BadRequest("rating must be between 1 and 5".into()));
        }
    }
    review.updated_at = Some(now_string());
    Ok(Json(state.db.reviews().replace(oid, review).await?))
}

async fn like_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let review = state
        .db
        .reviews()
        .bump_counter(parse_object_id(&id)?, "likes", &now_string())
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(review))
}

async fn dislike_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let review = state
        .db
        .reviews()
        .bump_counter(parse_object_id(&id)?, "dislikes", &now_string())
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(review))
}

async fn delete_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.reviews().delete(parse_object_id(&id)?).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
