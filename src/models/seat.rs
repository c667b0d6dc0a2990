use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::serialize_object_id;

/// A bookable seat of one showtime. Booking state lives directly on the
/// document: `booked`, `bookedBy` (owning user id) and `bookedAt`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    pub id: Option<ObjectId>,
    pub showtime_id: Option<String>,
    pub seat_number: Option<String>,
    pub row: Option<String>,
    #[serde(default)]
    pub column: i32,
    #[serde(default)]
    pub booked: bool,
    pub booked_by: Option<String>,
    pub booked_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_fields_default_to_free() {
        let seat: Seat =
            serde_json::from_str(r#"{"showtimeId":"s1","seatNumber":"A1","row":"A"}"#).unwrap();
        assert!(!seat.booked);
        assert!(seat.booked_by.is_none());
        assert_eq!(seat.column, 0);
    }
}
