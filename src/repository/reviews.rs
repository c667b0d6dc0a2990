use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use super::RepoResult;
use crate::models::Review;

#[derive(Clone)]
pub struct ReviewRepo {
    coll: Collection<Review>,
}

impl ReviewRepo {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            coll: db.collection("reviews"),
        }
    }

    async fn find_active(&self, mut filter: Document) -> RepoResult<Vec<Review>> {
        filter.insert("isActive", true);
        self.coll
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await
    }

    pub async fn find_all_active(&self) -> RepoResult<Vec<Review>> {
        self.find_active(doc! {}).await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Review>> {
        self.coll.find_one(doc! { "_id": id }).await
    }

    pub async fn find_by_movie(&self, movie_id: &str) -> RepoResult<Vec<Review>> {
        self.find_active(doc! { "movieId": movie_id }).await
    }

    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Review>> {
        self.find_active(doc! { "userId": user_id }).await
    }

    pub async fn find_by_movie_and_rating(
        &self,
        movie_id: &str,
        rating: i32,
    ) -> RepoResult<Vec<Review>> {
        self.find_active(doc! { "movieId": movie_id, "rating": rating })
            .await
    }

    pub async fn count_by_movie(&self, movie_id: &str) -> RepoResult<u64> {
        self.coll
            .count_documents(doc! { "movieId": movie_id, "isActive": true })
            .await
    }

    pub async fn count_by_movie_and_rating(&self, movie_id: &str, rating: i32) -> RepoResult<u64> {
        self.coll
            .count_documents(doc! { "movieId": movie_id, "rating": rating, "isActive": true })
            .await
    }

    pub async fn exists(&self, id: ObjectId) -> RepoResult<bool> {
        Ok(self.coll.count_documents(doc! { "_id": id }).await? > 0)
    }

    pub async fn insert(&self, mut review: Review) -> RepoResult<Review> {
        review.id = None;
        let result = self.coll.insert_one(&review).await?;
        review.id = result.inserted_id.as_object_id();
        Ok(review)
    }

    pub async fn replace(&self, id: ObjectId, mut review: Review) -> RepoResult<Review> {
        review.id = None;
        self.coll.replace_one(doc! { "_id": id }, &review).await?;
        review.id = Some(id);
        Ok(review)
    }

    /// Bump the like or dislike counter and refresh `updatedAt`.
    pub async fn bump_counter(
        &self,
        id: ObjectId,
        field: &str,
        updated_at: &str,
    ) -> RepoResult<Option<Review>> {
        self.coll
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$inc": { field: 1 }, "$set": { "updatedAt": updated_at } },
            )
            .return_document(ReturnDocument::After)
            .await
    }

    pub async fn delete(&self, id: ObjectId) -> RepoResult<bool> {
        Ok(self.coll.delete_one(doc! { "_id": id }).await?.deleted_count > 0)
    }
}
