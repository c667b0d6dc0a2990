pub mod admin;
pub mod articles;
pub mod cinemas;
pub mod combos;
pub mod movies;
pub mod news;
pub mod notifications;
pub mod reviews;
pub mod seats;
pub mod showtimes;
pub mod tickets;
pub mod users;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(movies::routes())
        .merge(cinemas::routes())
        .merge(showtimes::routes())
        .merge(seats::routes())
        .merge(tickets::routes())
        .merge(users::routes())
        .merge(admin::routes())
        .merge(reviews::routes())
        .merge(articles::routes())
        .merge(news::routes())
        .merge(notifications::routes())
        .merge(combos::routes())
}
