use chrono::Utc;
use uuid::Uuid;

use crate::database::Database;
use crate::error::ApiError;
use crate::models::{ticket, Seat, Ticket};
use crate::repository::{SeatRepo, TicketRepo};
use crate::utils::{now_string, parse_object_id};

/// Seat/ticket booking workflow. Seat state transitions go through guarded
/// single-document updates, so a seat can only ever be booked once at a time
/// and only released by its owner.
pub struct BookingService {
    seats: SeatRepo,
    tickets: TicketRepo,
}

impl BookingService {
    pub fn new(db: &Database) -> Self {
        Self {
            seats: db.seats(),
            tickets: db.tickets(),
        }
    }

    /// All seats of one showtime, in seating order.
    pub async fn seats_for_showtime(&self, showtime_id: &str) -> Result<Vec<Seat>, ApiError> {
        Ok(self.seats.find_by_showtime(showtime_id).await?)
    }

    pub async fn book_seat(&self, seat_id: &str, user_id: &str) -> Result<Seat, ApiError> {
        if user_id.trim().is_empty() {
            return Err(ApiError::BadRequest("userId must not be empty".into()));
        }
        let oid = parse_object_id(seat_id)?;
        match self.seats.mark_booked(oid, user_id, &now_string()).await? {
            Some(seat) => {
                tracing::info!("seat {} booked by user {}", seat_id, user_id);
                Ok(seat)
            }
            // The guarded update matched nothing: either the seat is gone or
            // someone else got there first.
            None => Err(booking_failure(self.seats.find_by_id(oid).await?)),
        }
    }

    pub async fn unbook_seat(&self, seat_id: &str, user_id: &str) -> Result<Seat, ApiError> {
        if user_id.trim().is_empty() {
            return Err(ApiError::BadRequest("userId must not be empty".into()));
        }
        let oid = parse_object_id(seat_id)?;
        match self.seats.mark_unbooked(oid, user_id).await? {
            Some(seat) => Ok(seat),
            None => Err(unbooking_failure(self.seats.find_by_id(oid).await?)),
        }
    }

    /// Persist a ticket, filling in booking time, ticket number and QR token
    /// when the caller did not provide them.
    pub async fn create_ticket(&self, mut ticket: Ticket) -> Result<Ticket, ApiError> {
        apply_booking_defaults(&mut ticket);
        Ok(self.tickets.insert(ticket).await?)
    }
}

/// Explains a booking update that matched no document, from the seat's
/// current state: gone entirely, or taken by a concurrent request.
fn booking_failure(seat: Option<Seat>) -> ApiError {
    match seat {
        Some(_) => ApiError::Conflict("seat is already booked".into()),
        None => ApiError::NotFound,
    }
}

/// Same for the release side: the owner filter did not match because the
/// seat is gone, was never booked, or belongs to someone else.
fn unbooking_failure(seat: Option<Seat>) -> ApiError {
    match seat {
        None => ApiError::NotFound,
        Some(seat) if !seat.booked => ApiError::Conflict("seat is not booked".into()),
        Some(_) => ApiError::Forbidden("seat was booked by another user".into()),
    }
}

pub fn apply_booking_defaults(ticket: &mut Ticket) {
    if ticket
        .booking_time
        .as_deref()
        .is_none_or(|t| t.trim().is_empty())
    {
        ticket.booking_time = Some(now_string());
    }
    if ticket.status.as_deref().is_none_or(|s| s.trim().is_empty()) {
        ticket.status = Some(ticket::STATUS_PENDING.to_string());
    }
    if ticket.ticket_number.is_none() {
        ticket.ticket_number = Some(generate_ticket_number());
    }
    if ticket.qr_code.is_none() {
        ticket.qr_code = Some(generate_qr_token());
    }
}

/// Human-readable ticket number: `TCK-<yyyymmdd>-<6 hex>`.
pub fn generate_ticket_number() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "TCK-{}-{}",
        Utc::now().format("%Y%m%d"),
        suffix[..6].to_uppercase()
    )
}

/// Opaque token encoded into the ticket QR code.
pub fn generate_qr_token() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn booking_a_missing_seat_is_not_found() {
        assert_eq!(booking_failure(None).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn booking_a_taken_seat_is_a_conflict() {
        let taken = Seat {
            booked: true,
            booked_by: Some("u1".into()),
            ..Seat::default()
        };
        assert_eq!(booking_failure(Some(taken)).status(), StatusCode::CONFLICT);
    }

    #[test]
    fn unbooking_distinguishes_missing_free_and_foreign_seats() {
        assert_eq!(unbooking_failure(None).status(), StatusCode::NOT_FOUND);

        let free = Seat::default();
        assert_eq!(unbooking_failure(Some(free)).status(), StatusCode::CONFLICT);

        let someone_elses = Seat {
            booked: true,
            booked_by: Some("u2".into()),
            ..Seat::default()
        };
        assert_eq!(
            unbooking_failure(Some(someone_elses)).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn ticket_numbers_follow_the_scheme() {
        let number = generate_ticket_number();
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "TCK");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 6);
    }

    #[test]
    fn qr_tokens_are_unique() {
        assert_ne!(generate_qr_token(), generate_qr_token());
    }

    #[test]
    fn booking_defaults_fill_missing_fields() {
        let mut ticket = Ticket::default();
        apply_booking_defaults(&mut ticket);
        assert!(ticket.booking_time.is_some());
        assert_eq!(ticket.status.as_deref(), Some("pending"));
        assert!(ticket.ticket_number.is_some());
        assert!(ticket.qr_code.is_some());
    }

    #[test]
    fn booking_defaults_keep_caller_values() {
        let mut ticket = Ticket {
            booking_time: Some("2025-06-01T10:00:00Z".into()),
            status: Some("confirmed".into()),
            ticket_number: Some("TCK-20250601-ABCDEF".into()),
            qr_code: Some("token".into()),
            ..Ticket::default()
        };
        apply_booking_defaults(&mut ticket);
        assert_eq!(ticket.booking_time.as_deref(), Some("2025-06-01T10:00:00Z"));
        assert_eq!(ticket.status.as_deref(), Some("confirmed"));
        assert_eq!(ticket.ticket_number.as_deref(), Some("TCK-20250601-ABCDEF"));
        assert_eq!(ticket.qr_code.as_deref(), Some("token"));
    }

    #[test]
    fn blank_booking_time_is_replaced() {
        let mut ticket = Ticket {
            booking_time: Some("   ".into()),
            ..Ticket::default()
        };
        apply_booking_defaults(&mut ticket);
        assert_ne!(ticket.booking_time.as_deref(), Some("   "));
    }
}
