pub mod admin;
pub mod article;
pub mod cinema;
pub mod combo;
pub mod movie;
pub mod news;
pub mod notification;
pub mod review;
pub mod seat;
pub mod showtime;
pub mod ticket;
pub mod user;

pub use admin::Admin;
pub use article::Article;
pub use cinema::Cinema;
pub use combo::Combo;
pub use movie::Movie;
pub use news::News;
pub use notification::Notification;
pub use review::Review;
pub use seat::Seat;
pub use showtime::Showtime;
pub use ticket::Ticket;
pub use user::User;
