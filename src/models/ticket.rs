use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::serialize_object_id;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_USED: &str = "used";
pub const STATUS_CANCELLED: &str = "cancelled";

/// Purchase record. Showtime, seat and payment details are denormalized onto
/// the ticket so list and export views need no joins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    pub id: Option<ObjectId>,
    pub user_id: Option<String>,
    pub showtime_id: Option<String>,
    pub seat_id: Option<String>,
    pub seat_number: Option<String>,
    pub movie_id: Option<String>,
    pub movie_title: Option<String>,
    pub movie_poster: Option<String>,
    pub cinema_name: Option<String>,
    pub show_date: Option<String>,
    pub show_time: Option<String>,
    pub price: Option<f64>,
    pub booking_time: Option<String>,
    pub status: Option<String>,
    // Later revisions of the record
    pub ticket_number: Option<String>,
    pub qr_code: Option<String>,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub cancelled_at: Option<String>,
    pub cancellation_reason: Option<String>,
    pub used_at: Option<String>,
    pub refunded_at: Option<String>,
}

impl Ticket {
    /// Confirmed and used tickets count toward revenue.
    pub fn counts_toward_revenue(&self) -> bool {
        matches!(
            self.status.as_deref(),
            Some(STATUS_CONFIRMED) | Some(STATUS_USED)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revenue_covers_confirmed_and_used_only() {
        for (status, expected) in [
            (Some(STATUS_CONFIRMED), true),
            (Some(STATUS_USED), true),
            (Some(STATUS_PENDING), false),
            (Some(STATUS_CANCELLED), false),
            (None, false),
        ] {
            let ticket = Ticket {
                status: status.map(str::to_string),
                ..Ticket::default()
            };
            assert_eq!(ticket.counts_toward_revenue(), expected, "{status:?}");
        }
    }

    #[test]
    fn tolerates_minimal_booking_shape() {
        let ticket: Ticket =
            serde_json::from_str(r#"{"userId":"u1","seatNumber":"A1","price":90000.0}"#).unwrap();
        assert_eq!(ticket.price, Some(90000.0));
        assert!(ticket.qr_code.is_none());
    }
}
