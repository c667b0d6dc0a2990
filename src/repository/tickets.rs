use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Collection;

use super::RepoResult;
use crate::models::Ticket;

#[derive(Clone)]
pub struct TicketRepo {
    coll: Collection<Ticket>,
}

impl TicketRepo {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            coll: db.collection("tickets"),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Ticket>> {
        self.coll.find(doc! {}).await?.try_collect().await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Ticket>> {
        self.coll.find_one(doc! { "_id": id }).await
    }

    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Ticket>> {
        self.coll
            .find(doc! { "userId": user_id })
            .sort(doc! { "bookingTime": -1 })
            .await?
            .try_collect()
            .await
    }

    pub async fn count(&self) -> RepoResult<u64> {
        self.coll.count_documents(doc! {}).await
    }

    pub async fn count_by_status(&self, status: &str) -> RepoResult<u64> {
        self.coll.count_documents(doc! { "status": status }).await
    }

    pub async fn find_by_statuses(&self, statuses: &[&str]) -> RepoResult<Vec<Ticket>> {
        self.coll
            .find(doc! { "status": { "$in": statuses.to_vec() } })
            .await?
            .try_collect()
            .await
    }

    pub async fn insert(&self, mut ticket: Ticket) -> RepoResult<Ticket> {
        ticket.id = None;
        let result = self.coll.insert_one(&ticket).await?;
        ticket.id = result.inserted_id.as_object_id();
        Ok(ticket)
    }

    pub async fn replace(&self, id: ObjectId, mut ticket: Ticket) -> RepoResult<Ticket> {
        ticket.id = None;
        self.coll.replace_one(doc! { "_id": id }, &ticket).await?;
        ticket.id = Some(id);
        Ok(ticket)
    }

    pub async fn set_status(&self, id: ObjectId, status: &str) -> RepoResult<Option<Ticket>> {
        self.coll
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": { "status": status } })
            .return_document(mongodb::options::ReturnDocument::After)
            .await
    }

    pub async fn delete(&self, id: ObjectId) -> RepoResult<bool> {
        Ok(self.coll.delete_one(doc! { "_id": id }).await?.deleted_count > 0)
    }
}
