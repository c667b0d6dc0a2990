use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use super::RepoResult;
use crate::models::Seat;

/// Filter matching a seat only while it is still free.
fn free_seat_filter(id: ObjectId) -> Document {
    doc! { "_id": id, "booked": { "$ne": true } }
}

/// Filter matching a booked seat only for the user who booked it.
fn owned_booking_filter(id: ObjectId, user_id: &str) -> Document {
    doc! { "_id": id, "booked": true, "bookedBy": user_id }
}

#[derive(Clone)]
pub struct SeatRepo {
    coll: Collection<Seat>,
}

impl SeatRepo {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            coll: db.collection("seats"),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Seat>> {
        self.coll.find(doc! {}).await?.try_collect().await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Seat>> {
        self.coll.find_one(doc! { "_id": id }).await
    }

    pub async fn find_by_showtime(&self, showtime_id: &str) -> RepoResult<Vec<Seat>> {
        self.coll
            .find(doc! { "showtimeId": showtime_id })
            .sort(doc! { "row": 1, "column": 1 })
            .await?
            .try_collect()
            .await
    }

    pub async fn insert(&self, mut seat: Seat) -> RepoResult<Seat> {
        seat.id = None;
        let result = self.coll.insert_one(&seat).await?;
        seat.id = result.inserted_id.as_object_id();
        Ok(seat)
    }

    pub async fn insert_many(&self, mut seats: Vec<Seat>) -> RepoResult<Vec<Seat>> {
        if seats.is_empty() {
            return Ok(seats);
        }
        for seat in &mut seats {
            seat.id = None;
        }
        let result = self.coll.insert_many(&seats).await?;
        for (index, seat) in seats.iter_mut().enumerate() {
            seat.id = result
                .inserted_ids
                .get(&index)
                .and_then(|id| id.as_object_id());
        }
        Ok(seats)
    }

    pub async fn replace(&self, id: ObjectId, mut seat: Seat) -> RepoResult<Seat> {
        seat.id = None;
        self.coll.replace_one(doc! { "_id": id }, &seat).await?;
        seat.id = Some(id);
        Ok(seat)
    }

    /// Mark a free seat booked. The `booked: false` filter makes the
    /// transition a single guarded update, so two concurrent requests for the
    /// same seat cannot both succeed.
    pub async fn mark_booked(
        &self,
        id: ObjectId,
        user_id: &str,
        booked_at: &str,
    ) -> RepoResult<Option<Seat>> {
        self.coll
            .find_one_and_update(
                free_seat_filter(id),
                doc! { "$set": {
                    "booked": true,
                    "bookedBy": user_id,
                    "bookedAt": booked_at,
                } },
            )
            .return_document(ReturnDocument::After)
            .await
    }

    /// Release a booked seat, but only for its owner.
    pub async fn mark_unbooked(&self, id: ObjectId, user_id: &str) -> RepoResult<Option<Seat>> {
        self.coll
            .find_one_and_update(
                owned_booking_filter(id, user_id),
                doc! { "$set": { "booked": false },
                       "$unset": { "bookedBy": "", "bookedAt": "" } },
            )
            .return_document(ReturnDocument::After)
            .await
    }

    pub async fn delete(&self, id: ObjectId) -> RepoResult<bool> {
        Ok(self.coll.delete_one(doc! { "_id": id }).await?.deleted_count > 0)
    }

    pub async fn delete_by_showtime(&self, showtime_id: &str) -> RepoResult<u64> {
        Ok(self
            .coll
            .delete_many(doc! { "showtimeId": showtime_id })
            .await?
            .deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_filter_only_matches_free_seats() {
        let id = ObjectId::new();
        let filter = free_seat_filter(id);
        assert_eq!(filter.get_object_id("_id").unwrap(), id);
        // `$ne: true` also covers documents written before the booked flag
        // existed
        let guard = filter.get_document("booked").unwrap();
        assert!(guard.get_bool("$ne").unwrap());
    }

    #[test]
    fn release_filter_pins_the_owner() {
        let id = ObjectId::new();
        let filter = owned_booking_filter(id, "u1");
        assert_eq!(filter.get_object_id("_id").unwrap(), id);
        assert!(filter.get_bool("booked").unwrap());
        assert_eq!(filter.get_str("bookedBy").unwrap(), "u1");
    }
}
