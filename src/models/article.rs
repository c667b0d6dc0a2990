use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::serialize_object_id;

pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_DRAFT: &str = "draft";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    pub id: Option<ObjectId>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub source: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub url: Option<String>,
    pub href: Option<String>,
    pub movie_id: Option<String>,
    pub movie_ids: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
    pub published_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub view_count: Option<i32>,
    pub like_count: Option<i32>,
    pub share_count: Option<i32>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    // SEO fields
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub slug: Option<String>,
    pub video_url: Option<String>,
    pub audio_url: Option<String>,
    pub gallery_images: Option<Vec<String>>,
    pub reading_time: Option<String>,
}

impl Article {
    pub fn is_published(&self) -> bool {
        self.status.as_deref() == Some(STATUS_PUBLISHED)
    }

    /// Fill the counters and flags a fresh article is expected to carry.
    pub fn apply_create_defaults(&mut self) {
        if self
            .status
            .as_deref()
            .is_none_or(|s| s.trim().is_empty())
        {
            self.status = Some(STATUS_DRAFT.to_string());
        }
        self.is_active = Some(self.is_active.unwrap_or(true));
        self.is_featured = Some(self.is_featured.unwrap_or(false));
        self.view_count = Some(self.view_count.unwrap_or(0));
        self.like_count = Some(self.like_count.unwrap_or(0));
        self.share_count = Some(self.share_count.unwrap_or(0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_fill_counters_without_clobbering() {
        let mut article = Article {
            view_count: Some(12),
            ..Article::default()
        };
        article.apply_create_defaults();
        assert_eq!(article.status.as_deref(), Some(STATUS_DRAFT));
        assert_eq!(article.view_count, Some(12));
        assert_eq!(article.like_count, Some(0));
        assert_eq!(article.is_active, Some(true));
        assert!(!article.is_published());
    }
}
