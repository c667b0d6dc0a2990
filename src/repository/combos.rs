use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Collection;

use super::RepoResult;
use crate::models::Combo;

#[derive(Clone)]
pub struct ComboRepo {
    coll: Collection<Combo>,
}

impl ComboRepo {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            coll: db.collection("combos"),
        }
    }

    pub async fn find_active(&self) -> RepoResult<Vec<Combo>> {
        self.coll
            .find(doc! { "isActive": true })
            .await?
            .try_collect()
            .await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Combo>> {
        self.coll.find_one(doc! { "_id": id }).await
    }

    pub async fn search_active_by_name(&self, name: &str) -> RepoResult<Vec<Combo>> {
        self.coll
            .find(doc! {
                "name": { "$regex": name, "$options": "i" },
                "isActive": true,
            })
            .await?
            .try_collect()
            .await
    }

    pub async fn find_active_in_price_range(
        &self,
        min_price: f64,
        max_price: f64,
    ) -> RepoResult<Vec<Combo>> {
        self.coll
            .find(doc! {
                "price": { "$gte": min_price, "$lte": max_price },
                "isActive": true,
            })
            .await?
            .try_collect()
            .await
    }

    pub async fn find_active_below_price(&self, max_price: f64) -> RepoResult<Vec<Combo>> {
        self.coll
            .find(doc! { "price": { "$lte": max_price }, "isActive": true })
            .await?
            .try_collect()
            .await
    }

    pub async fn insert(&self, mut combo: Combo) -> RepoResult<Combo> {
        combo.id = None;
        let result = self.coll.insert_one(&combo).await?;
        combo.id = result.inserted_id.as_object_id();
        Ok(combo)
    }

    pub async fn replace(&self, id: ObjectId, mut combo: Combo) -> RepoResult<Combo> {
        combo.id = None;
        self.coll.replace_one(doc! { "_id": id }, &combo).await?;
        combo.id = Some(id);
        Ok(combo)
    }

    /// Combos are never hard-deleted, only deactivated.
    pub async fn soft_delete(&self, id: ObjectId) -> RepoResult<bool> {
        let result = self
            .coll
            .update_one(doc! { "_id": id }, doc! { "$set": { "isActive": false } })
            .await?;
        Ok(result.matched_count > 0)
    }
}
