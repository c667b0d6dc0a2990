use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::serialize_object_id;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    pub id: Option<ObjectId>,
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub last_login_at: Option<String>,
}

impl User {
    /// Copy with the password stripped, the shape every response uses.
    pub fn without_password(mut self) -> Self {
        self.password = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stripped_password_never_reaches_the_response() {
        let user = User {
            username: Some("minh".into()),
            password: Some("secret".into()),
            ..User::default()
        };
        let json = serde_json::to_value(user.without_password()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "minh");
    }
}
