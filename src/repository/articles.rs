use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Collection;

use super::RepoResult;
use crate::models::article::{Article, STATUS_PUBLISHED};

#[derive(Clone)]
pub struct ArticleRepo {
    coll: Collection<Article>,
}

impl ArticleRepo {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            coll: db.collection("articles"),
        }
    }

    pub async fn find_by_status(&self, status: &str, active_only: bool) -> RepoResult<Vec<Article>> {
        let mut filter = doc! { "status": status };
        if active_only {
            filter.insert("isActive", true);
        }
        self.coll.find(filter).await?.try_collect().await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Article>> {
        self.coll.find_one(doc! { "_id": id }).await
    }

    pub async fn find_published_by_movie(&self, movie_id: &str) -> RepoResult<Vec<Article>> {
        self.coll
            .find(doc! { "movieId": movie_id, "status": STATUS_PUBLISHED, "isActive": true })
            .await?
            .try_collect()
            .await
    }

    pub async fn search_title_or_content(&self, query: &str) -> RepoResult<Vec<Article>> {
        let regex = doc! { "$regex": query, "$options": "i" };
        self.coll
            .find(doc! { "$or": [
                { "title": regex.clone() },
                { "content": regex },
            ] })
            .await?
            .try_collect()
            .await
    }

    pub async fn find_published_by_category(&self, category: &str) -> RepoResult<Vec<Article>> {
        self.coll
            .find(doc! { "category": category, "status": STATUS_PUBLISHED, "isActive": true })
            .await?
            .try_collect()
            .await
    }

    pub async fn find_latest_published(&self, limit: i64) -> RepoResult<Vec<Article>> {
        self.coll
            .find(doc! { "status": STATUS_PUBLISHED, "isActive": true })
            .sort(doc! { "publishedAt": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await
    }

    pub async fn find_featured(&self) -> RepoResult<Vec<Article>> {
        self.coll
            .find(doc! { "isFeatured": true })
            .await?
            .try_collect()
            .await
    }

    pub async fn find_by_author(&self, author: &str) -> RepoResult<Vec<Article>> {
        self.coll
            .find(doc! { "author": author })
            .await?
            .try_collect()
            .await
    }

    pub async fn count_by_movie(&self, movie_id: &str) -> RepoResult<u64> {
        self.coll
            .count_documents(doc! { "movieId": movie_id })
            .await
    }

    pub async fn count_by_category(&self, category: &str) -> RepoResult<u64> {
        self.coll
            .count_documents(doc! { "category": category })
            .await
    }

    pub async fn insert(&self, mut article: Article) -> RepoResult<Article> {
        article.id = None;
        let result = self.coll.insert_one(&article).await?;
        article.id = result.inserted_id.as_object_id();
        Ok(article)
    }

    pub async fn replace(&self, id: ObjectId, mut article: Article) -> RepoResult<Article> {
        article.id = None;
        self.coll.replace_one(doc! { "_id": id }, &article).await?;
        article.id = Some(id);
        Ok(article)
    }

    pub async fn delete(&self, id: ObjectId) -> RepoResult<bool> {
        Ok(self.coll.delete_one(doc! { "_id": id }).await?.deleted_count > 0)
    }
}
