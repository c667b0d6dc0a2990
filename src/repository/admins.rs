use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use super::RepoResult;
use crate::models::Admin;

#[derive(Clone)]
pub struct AdminRepo {
    coll: Collection<Admin>,
}

impl AdminRepo {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            coll: db.collection("admins"),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Admin>> {
        self.coll.find(doc! {}).await?.try_collect().await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Admin>> {
        self.coll.find_one(doc! { "_id": id }).await
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<Admin>> {
        self.coll.find_one(doc! { "username": username }).await
    }

    pub async fn exists_by_username(&self, username: &str) -> RepoResult<bool> {
        Ok(self
            .coll
            .count_documents(doc! { "username": username })
            .await?
            > 0)
    }

    pub async fn exists_by_email(&self, email: &str) -> RepoResult<bool> {
        Ok(self.coll.count_documents(doc! { "email": email }).await? > 0)
    }

    pub async fn count(&self) -> RepoResult<u64> {
        self.coll.count_documents(doc! {}).await
    }

    pub async fn insert(&self, mut admin: Admin) -> RepoResult<Admin> {
        admin.id = None;
        let result = self.coll.insert_one(&admin).await?;
        admin.id = result.inserted_id.as_object_id();
        Ok(admin)
    }

    pub async fn set_last_login(&self, id: ObjectId, at: &str) -> RepoResult<Option<Admin>> {
        self.coll
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": { "lastLoginAt": at } })
            .return_document(ReturnDocument::After)
            .await
    }
}
