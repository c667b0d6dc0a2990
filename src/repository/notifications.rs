use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use super::RepoResult;
use crate::models::Notification;

#[derive(Clone)]
pub struct NotificationRepo {
    coll: Collection<Notification>,
}

impl NotificationRepo {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            coll: db.collection("notifications"),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Notification>> {
        self.coll.find(doc! {}).await?.try_collect().await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Notification>> {
        self.coll.find_one(doc! { "_id": id }).await
    }

    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Notification>> {
        self.coll
            .find(doc! { "userId": user_id })
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await
    }

    pub async fn find_unread_by_user(&self, user_id: &str) -> RepoResult<Vec<Notification>> {
        self.coll
            .find(doc! { "userId": user_id, "isRead": false })
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await
    }

    pub async fn count_unread(&self, user_id: &str) -> RepoResult<u64> {
        self.coll
            .count_documents(doc! { "userId": user_id, "isRead": false })
            .await
    }

    pub async fn insert(&self, mut notification: Notification) -> RepoResult<Notification> {
        notification.id = None;
        let result = self.coll.insert_one(&notification).await?;
        notification.id = result.inserted_id.as_object_id();
        Ok(notification)
    }

    pub async fn mark_read(&self, id: ObjectId, read_at: &str) -> RepoResult<Option<Notification>> {
        self.coll
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": { "isRead": true, "readAt": read_at } },
            )
            .return_document(ReturnDocument::After)
            .await
    }

    /// Returns the number of notifications flipped to read.
    pub async fn mark_all_read(&self, user_id: &str, read_at: &str) -> RepoResult<u64> {
        let result = self
            .coll
            .update_many(
                doc! { "userId": user_id, "isRead": false },
                doc! { "$set": { "isRead": true, "readAt": read_at } },
            )
            .await?;
        Ok(result.modified_count)
    }

    pub async fn delete(&self, id: ObjectId) -> RepoResult<bool> {
        Ok(self.coll.delete_one(doc! { "_id": id }).await?.deleted_count > 0)
    }

    pub async fn delete_by_user(&self, user_id: &str) -> RepoResult<u64> {
        Ok(self
            .coll
            .delete_many(doc! { "userId": user_id })
            .await?
            .deleted_count)
    }
}
