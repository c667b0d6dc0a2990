use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::{now_string, serialize_object_id};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    pub id: Option<ObjectId>,
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub created_at: Option<String>,
    pub last_login_at: Option<String>,
    pub avatar: Option<String>,
    pub notes: Option<String>,
}

impl Admin {
    pub fn new(username: String, password: String) -> Self {
        Admin {
            username: Some(username),
            password: Some(password),
            role: Some("admin".to_string()),
            created_at: Some(now_string()),
            ..Admin::default()
        }
    }

    pub fn without_password(mut self) -> Self {
        self.password = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_admin_defaults_role_and_created_at() {
        let admin = Admin::new("ops".into(), "pw".into());
        assert_eq!(admin.role.as_deref(), Some("admin"));
        assert!(admin.created_at.is_some());
    }
}
