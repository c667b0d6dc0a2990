use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use super::RepoResult;
use crate::models::User;

#[derive(Clone)]
pub struct UserRepo {
    coll: Collection<User>,
}

impl UserRepo {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            coll: db.collection("users"),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        self.coll.find(doc! {}).await?.try_collect().await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<User>> {
        self.coll.find_one(doc! { "_id": id }).await
    }

    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> RepoResult<Option<User>> {
        self.coll
            .find_one(doc! { "username": username, "password": password })
            .await
    }

    pub async fn count(&self) -> RepoResult<u64> {
        self.coll.count_documents(doc! {}).await
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

    pub async fn insert(&self, mut user: User) -> RepoResult<User> {
        user.id = None;
        let result = self.coll.insert_one(&user).await?;
        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    pub async fn replace(&self, id: ObjectId, mut user: User) -> RepoResult<User> {
        user.id = None;
        self.coll.replace_one(doc! { "_id": id }, &user).await?;
        user.id = Some(id);
        Ok(user)
    }

    pub async fn set_last_login(&self, id: ObjectId, at: &str) -> RepoResult<Option<User>> {
        self.coll
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": { "lastLoginAt": at } })
            .return_document(ReturnDocument::After)
            .await
    }

    pub async fn delete(&self, id: ObjectId) -> RepoResult<bool> {
        Ok(self.coll.delete_one(doc! { "_id": id }).await?.deleted_count > 0)
    }
}
