pub mod booking;
pub mod stats;
