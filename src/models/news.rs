use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::{now_string, serialize_object_id};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    pub id: Option<ObjectId>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub publish_date: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub featured: Option<bool>,
    pub views: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl News {
    pub fn apply_create_defaults(&mut self) {
        if self.created_at.is_none() {
            self.created_at = Some(now_string());
        }
        self.views = Some(self.views.unwrap_or(0));
        self.featured = Some(self.featured.unwrap_or(false));
        if self.publish_date.is_none() {
            self.publish_date = Some(now_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_set_views_and_publish_date() {
        let mut news = News::default();
        news.apply_create_defaults();
        assert_eq!(news.views, Some(0));
        assert_eq!(news.featured, Some(false));
        assert!(news.publish_date.is_some());
        assert!(news.created_at.is_some());
    }

    #[test]
    fn create_defaults_keep_explicit_values() {
        let mut news = News {
            views: Some(7),
            featured: Some(true),
            publish_date: Some("2025-01-01T00:00:00Z".into()),
            ..News::default()
        };
        news.apply_create_defaults();
        assert_eq!(news.views, Some(7));
        assert_eq!(news.featured, Some(true));
        assert_eq!(news.publish_date.as_deref(), Some("2025-01-01T00:00:00Z"));
    }
}
