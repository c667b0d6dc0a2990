use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Collection;

use super::RepoResult;
use crate::models::Cinema;

#[derive(Clone)]
pub struct CinemaRepo {
    coll: Collection<Cinema>,
}

impl CinemaRepo {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            coll: db.collection("cinemas"),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Cinema>> {
        self.coll.find(doc! {}).await?.try_collect().await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Cinema>> {
        self.coll.find_one(doc! { "_id": id }).await
    }

    pub async fn find_by_city(&self, city: &str) -> RepoResult<Vec<Cinema>> {
        self.coll
            .find(doc! { "city": city })
            .await?
            .try_collect()
            .await
    }

    pub async fn search_by_name(&self, name: &str) -> RepoResult<Vec<Cinema>> {
        self.coll
            .find(doc! { "name": { "$regex": name, "$options": "i" } })
            .await?
            .try_collect()
            .await
    }

    pub async fn exists(&self, id: ObjectId) -> RepoResult<bool> {
        Ok(self.coll.count_documents(doc! { "_id": id }).await? > 0)
    }

    pub async fn insert(&self, mut cinema: Cinema) -> RepoResult<Cinema> {
        cinema.id = None;
        let result = self.coll.insert_one(&cinema).await?;
        cinema.id = result.inserted_id.as_object_id();
        Ok(cinema)
    }

    pub async fn replace(&self, id: ObjectId, mut cinema: Cinema) -> RepoResult<Cinema> {
        cinema.id = None;
        self.coll.replace_one(doc! { "_id": id }, &cinema).await?;
        cinema.id = Some(id);
        Ok(cinema)
    }

    pub async fn delete(&self, id: ObjectId) -> RepoResult<bool> {
        Ok(self.coll.delete_one(doc! { "_id": id }).await?.deleted_count > 0)
    }
}
