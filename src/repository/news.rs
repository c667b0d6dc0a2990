use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use super::RepoResult;
use crate::models::News;

/// Filters accepted by the paginated news listing.
#[derive(Debug, Default)]
pub struct NewsFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
}

impl NewsFilter {
    fn to_document(&self) -> Document {
        let mut filter = doc! {};
        if let Some(search) = &self.search {
            let regex = doc! { "$regex": search, "$options": "i" };
            filter.insert(
                "$or",
                vec![
                    doc! { "title": regex.clone() },
                    doc! { "summary": regex.clone() },
                    doc! { "content": regex },
                ],
            );
            return filter;
        }
        if let Some(category) = &self.category {
            filter.insert("category", category);
        }
        if let Some(featured) = self.featured {
            filter.insert("featured", featured);
        }
        filter
    }
}

#[derive(Clone)]
pub struct NewsRepo {
    coll: Collection<News>,
}

impl NewsRepo {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            coll: db.collection("news"),
        }
    }

    pub async fn find_page(
        &self,
        filter: &NewsFilter,
        skip: u64,
        limit: i64,
    ) -> RepoResult<(Vec<News>, u64)> {
        let filter_doc = filter.to_document();
        let total = self.coll.count_documents(filter_doc.clone()).await?;
        let page = self
            .coll
            .find(filter_doc)
            .sort(doc! { "publishDate": -1 })
            .skip(skip)
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok((page, total))
    }

    /// Fetch and increment the view counter in one guarded update.
    pub async fn find_and_increment_views(&self, id: ObjectId) -> RepoResult<Option<News>> {
        self.coll
            .find_one_and_update(doc! { "_id": id }, doc! { "$inc": { "views": 1 } })
            .return_document(ReturnDocument::After)
            .await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<News>> {
        self.coll.find_one(doc! { "_id": id }).await
    }

    pub async fn find_featured(&self) -> RepoResult<Vec<News>> {
        self.coll
            .find(doc! { "featured": true })
            .sort(doc! { "publishDate": -1 })
            .await?
            .try_collect()
            .await
    }

    pub async fn find_by_category(&self, category: &str) -> RepoResult<Vec<News>> {
        self.coll
            .find(doc! { "category": category })
            .sort(doc! { "publishDate": -1 })
            .await?
            .try_collect()
            .await
    }

    pub async fn search(&self, query: &str) -> RepoResult<Vec<News>> {
        let filter = NewsFilter {
            search: Some(query.to_string()),
            ..NewsFilter::default()
        };
        self.coll
            .find(filter.to_document())
            .sort(doc! { "publishDate": -1 })
            .await?
            .try_collect()
            .await
    }

    pub async fn distinct_categories(&self) -> RepoResult<Vec<String>> {
        let values = self.coll.distinct("category", doc! {}).await?;
        let mut categories: Vec<String> = values
            .into_iter()
            .filter_map(|value| match value {
                Bson::String(s) => Some(s),
                _ => None,
            })
            .collect();
        categories.sort();
        Ok(categories)
    }

    pub async fn find_popular(&self, limit: i64) -> RepoResult<Vec<News>> {
        self.coll
            .find(doc! {})
            .sort(doc! { "views": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await
    }

    pub async fn find_published_since(&self, cutoff: &str) -> RepoResult<Vec<News>> {
        self.coll
            .find(doc! { "publishDate": { "$gte": cutoff } })
            .sort(doc! { "publishDate": -1 })
            .await?
            .try_collect()
            .await
    }

    pub async fn insert(&self, mut news: News) -> RepoResult<News> {
        news.id = None;
        let result = self.coll.insert_one(&news).await?;
        news.id = result.inserted_id.as_object_id();
        Ok(news)
    }

    pub async fn replace(&self, id: ObjectId, mut news: News) -> RepoResult<News> {
        news.id = None;
        self.coll.replace_one(doc! { "_id": id }, &news).await?;
        news.id = Some(id);
        Ok(news)
    }

    pub async fn delete(&self, id: ObjectId) -> RepoResult<bool> {
        Ok(self.coll.delete_one(doc! { "_id": id }).await?.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_filter_overrides_category_and_featured() {
        let filter = NewsFilter {
            category: Some("releases".into()),
            featured: Some(true),
            search: Some("oscar".into()),
        };
        let doc = filter.to_document();
        assert!(doc.contains_key("$or"));
        assert!(!doc.contains_key("category"));
    }

    #[test]
    fn category_and_featured_combine() {
        let filter = NewsFilter {
            category: Some("releases".into()),
            featured: Some(false),
            search: None,
        };
        let doc = filter.to_document();
        assert_eq!(doc.get_str("category").unwrap(), "releases");
        assert!(!doc.get_bool("featured").unwrap());
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(NewsFilter::default().to_document().is_empty());
    }
}
