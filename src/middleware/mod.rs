use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::ApiError;
use crate::models::Admin;
use crate::utils::parse_object_id;
use crate::AppState;

/// Extractor guarding admin-only routes. Expects
/// `Authorization: Bearer admin-token-<id>` and resolves the admin account
/// behind the token.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    pub admin: Admin,
}

/// Pulls the admin id out of a bearer token, if it has the right shape.
fn admin_id_from_token(token: &str) -> Option<&str> {
    let id = token.strip_prefix("admin-token-")?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

impl FromRequestParts<Arc<AppState>> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("missing authorization header".into()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("expected a bearer token".into()))?;

        let id = admin_id_from_token(token)
            .ok_or_else(|| ApiError::Unauthorized("invalid admin token".into()))?;
        let oid =
            parse_object_id(id).map_err(|_| ApiError::Unauthorized("invalid admin token".into()))?;

        let admin = state
            .db
            .admins()
            .find_by_id(oid)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("unknown admin token".into()))?;

        Ok(AdminAuth { admin })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_the_id_from_well_formed_tokens() {
        assert_eq!(
            admin_id_from_token("admin-token-665f1c2ab3d4e5f6a7b8c9d0"),
            Some("665f1c2ab3d4e5f6a7b8c9d0")
        );
    }

    #[test]
    fn rejects_foreign_and_empty_tokens() {
        assert_eq!(admin_id_from_token("admin-token-"), None);
        assert_eq!(admin_id_from_token("user-token-abc"), None);
        assert_eq!(admin_id_from_token(""), None);
    }
}
