//! One accessor per entity over the document store: lookup by id, lookup by
//! field, existence checks and bulk retrieval. Handlers never touch raw
//! collections directly.

pub mod admins;
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

pub use admins::AdminRepo;
pub use articles::ArticleRepo;
pub use cinemas::CinemaRepo;
pub use combos::ComboRepo;
pub use movies::MovieRepo;
pub use news::NewsRepo;
pub use notifications::NotificationRepo;
pub use reviews::ReviewRepo;
pub use seats::SeatRepo;
pub use showtimes::ShowtimeRepo;
pub use tickets::TicketRepo;
pub use users::UserRepo;

pub type RepoResult<T> = mongodb::error::Result<T>;
