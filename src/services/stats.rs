use serde::Serialize;

use crate::models::{ticket, Ticket};
use crate::repository::{TicketRepo, UserRepo};

/// Dashboard counters for the admin panel.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    pub total_tickets: u64,
    pub total_users: u64,
    pub pending_tickets: u64,
    pub confirmed_tickets: u64,
    pub used_tickets: u64,
    pub cancelled_tickets: u64,
    pub total_revenue: f64,
}

/// Status buckets come from grouped counts in the store; only the revenue
/// sum needs the ticket documents themselves.
pub async fn collect(tickets: &TicketRepo, users: &UserRepo) -> mongodb::error::Result<TicketStats> {
    let revenue_tickets = tickets
        .find_by_statuses(&[ticket::STATUS_CONFIRMED, ticket::STATUS_USED])
        .await?;
    Ok(TicketStats {
        total_tickets: tickets.count().await?,
        total_users: users.count().await?,
        pending_tickets: tickets.count_by_status(ticket::STATUS_PENDING).await?,
        confirmed_tickets: tickets.count_by_status(ticket::STATUS_CONFIRMED).await?,
        used_tickets: tickets.count_by_status(ticket::STATUS_USED).await?,
        cancelled_tickets: tickets.count_by_status(ticket::STATUS_CANCELLED).await?,
        total_revenue: revenue(&revenue_tickets),
    })
}

/// Revenue only counts confirmed and used tickets, unpriced tickets
/// contribute zero.
pub fn revenue(tickets: &[Ticket]) -> f64 {
    tickets
        .iter()
        .filter(|t| t.counts_toward_revenue())
        .map(|t| t.price.unwrap_or(0.0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(status: &str, price: Option<f64>) -> Ticket {
        Ticket {
            status: Some(status.to_string()),
            price,
            ..Ticket::default()
        }
    }

    #[test]
    fn revenue_covers_confirmed_and_used_only() {
        let tickets = vec![
            ticket("pending", Some(90000.0)),
            ticket("confirmed", Some(90000.0)),
            ticket("confirmed", Some(120000.0)),
            ticket("used", Some(90000.0)),
            ticket("cancelled", Some(90000.0)),
        ];
        assert_eq!(revenue(&tickets), 300000.0);
    }

    #[test]
    fn unpriced_and_unknown_statuses_do_not_panic() {
        let tickets = vec![
            ticket("confirmed", None),
            Ticket::default(),
            ticket("refunded", Some(50000.0)),
        ];
        assert_eq!(revenue(&tickets), 0.0);
    }

    #[test]
    fn empty_list_yields_zero() {
        assert_eq!(revenue(&[]), 0.0);
    }
}
