use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::serialize_object_id;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    pub id: Option<ObjectId>,
    pub movie_id: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub user_avatar: Option<String>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub likes: Option<i32>,
    pub dislikes: Option<i32>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
    pub user_email: Option<String>,
    pub user_phone: Option<String>,
}

/// Ratings are a 1..=5 star scale.
pub fn rating_in_range(rating: i32) -> bool {
    (1..=5).contains(&rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(!rating_in_range(0));
        assert!(rating_in_range(1));
        assert!(rating_in_range(5));
        assert!(!rating_in_range(6));
    }
}
