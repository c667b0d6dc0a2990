use chrono::{SecondsFormat, Utc};
use mongodb::bson::oid::ObjectId;
use serde::Serializer;

use crate::error::ApiError;

/// Render an optional `_id` as a plain hex string in JSON responses.
pub fn serialize_object_id<S>(oid: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match oid {
        Some(oid) => serializer.serialize_str(&oid.to_hex()),
        None => serializer.serialize_none(),
    }
}

pub fn parse_object_id(id: &str) -> Result<ObjectId, ApiError> {
    Ok(ObjectId::parse_str(id)?)
}

/// Current time as a fixed-width RFC 3339 UTC string. Timestamps are stored
/// as strings so that lexicographic comparison in queries stays correct.
pub fn now_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Validation used all over the controllers: reject missing or blank fields.
pub fn require_non_blank(value: Option<&str>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(ApiError::BadRequest(format!("{field} must not be empty"))),
    }
}

pub fn total_pages(total_elements: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_elements.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Doc {
        #[serde(serialize_with = "serialize_object_id")]
        id: Option<ObjectId>,
    }

    #[test]
    fn object_id_renders_as_hex_string() {
        let oid = ObjectId::new();
        let json = serde_json::to_value(Doc { id: Some(oid) }).unwrap();
        assert_eq!(json["id"], serde_json::json!(oid.to_hex()));
    }

    #[test]
    fn missing_object_id_renders_as_null() {
        let json = serde_json::to_value(Doc { id: None }).unwrap();
        assert!(json["id"].is_null());
    }

    #[test]
    fn parse_object_id_rejects_garbage() {
        assert!(parse_object_id("not-an-oid").is_err());
        let oid = ObjectId::new();
        assert_eq!(parse_object_id(&oid.to_hex()).unwrap(), oid);
    }

    #[test]
    fn now_string_is_fixed_width_utc() {
        let now = now_string();
        assert!(now.ends_with('Z'));
        assert_eq!(now.len(), "2026-01-01T00:00:00Z".len());
    }

    #[test]
    fn require_non_blank_trims() {
        assert!(require_non_blank(Some("  "), "title").is_err());
        assert!(require_non_blank(None, "title").is_err());
        assert_eq!(require_non_blank(Some("ok"), "title").unwrap(), "ok");
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
    }
}
