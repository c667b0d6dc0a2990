use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Collection;

use super::RepoResult;
use crate::models::Movie;

#[derive(Clone)]
pub struct MovieRepo {
    coll: Collection<Movie>,
}

impl MovieRepo {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            coll: db.collection("movies"),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Movie>> {
        self.coll.find(doc! {}).await?.try_collect().await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Movie>> {
        self.coll.find_one(doc! { "_id": id }).await
    }

    pub async fn exists(&self, id: ObjectId) -> RepoResult<bool> {
        Ok(self.coll.count_documents(doc! { "_id": id }).await? > 0)
    }

    pub async fn insert(&self, mut movie: Movie) -> RepoResult<Movie> {
        movie.id = None;
        let result = self.coll.insert_one(&movie).await?;
        movie.id = result.inserted_id.as_object_id();
        Ok(movie)
    }

    pub async fn replace(&self, id: ObjectId, mut movie: Movie) -> RepoResult<Movie> {
        movie.id = None;
        self.coll.replace_one(doc! { "_id": id }, &movie).await?;
        movie.id = Some(id);
        Ok(movie)
    }

    pub async fn delete(&self, id: ObjectId) -> RepoResult<bool> {
        Ok(self.coll.delete_one(doc! { "_id": id }).await?.deleted_count > 0)
    }
}
