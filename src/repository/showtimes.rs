use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Collection;

use super::RepoResult;
use crate::models::Showtime;

#[derive(Clone)]
pub struct ShowtimeRepo {
    coll: Collection<Showtime>,
}

impl ShowtimeRepo {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            coll: db.collection("showtimes"),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Showtime>> {
        self.coll.find(doc! {}).await?.try_collect().await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Showtime>> {
        self.coll.find_one(doc! { "_id": id }).await
    }

    pub async fn find_by_movie_id(&self, movie_id: &str) -> RepoResult<Vec<Showtime>> {
        self.coll
            .find(doc! { "movieId": movie_id })
            .await?
            .try_collect()
            .await
    }

    pub async fn insert(&self, mut showtime: Showtime) -> RepoResult<Showtime> {
        showtime.id = None;
        let result = self.coll.insert_one(&showtime).await?;
        showtime.id = result.inserted_id.as_object_id();
        Ok(showtime)
    }

    pub async fn replace(&self, id: ObjectId, mut showtime: Showtime) -> RepoResult<Showtime> {
        showtime.id = None;
        self.coll.replace_one(doc! { "_id": id }, &showtime).await?;
        showtime.id = Some(id);
        Ok(showtime)
    }

    pub async fn delete(&self, id: ObjectId) -> RepoResult<bool> {
        Ok(self.coll.delete_one(doc! { "_id": id }).await?.deleted_count > 0)
    }
}
