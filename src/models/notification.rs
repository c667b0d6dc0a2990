use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::serialize_object_id;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    pub id: Option<ObjectId>,
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: Option<String>,
    pub read_at: Option<String>,
    pub related_id: Option<String>,
    pub related_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_field_keeps_its_wire_name() {
        let n: Notification =
            serde_json::from_str(r#"{"userId":"u1","type":"ticket_approved"}"#).unwrap();
        assert_eq!(n.kind.as_deref(), Some("ticket_approved"));
        assert!(!n.is_read);
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "ticket_approved");
    }
}
