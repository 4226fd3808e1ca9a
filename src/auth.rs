use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USERNAME_HEADER: &str = "x-username";

/// Identity established by the gateway in front of this service. Every ledger
/// endpoint requires it; there is no fallback user.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing X-User-Id header".to_string()))?;

        let user_id = user_id
            .parse::<Uuid>()
            .map_err(|_| AppError::Unauthorized("X-User-Id is not a valid UUID".to_string()))?;

        let username = parts
            .headers
            .get(USERNAME_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing X-Username header".to_string()))?
            .to_string();

        Ok(AuthUser { user_id, username })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/balance/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (parts, _body) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn extracts_valid_identity() {
        let user_id = Uuid::new_v4();
        let mut parts = parts_with_headers(&[
            ("X-User-Id", &user_id.to_string()),
            ("X-Username", "maria"),
        ]);

        let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.username, "maria");
    }

    #[tokio::test]
    async fn rejects_missing_user_id() {
        let mut parts = parts_with_headers(&[("X-Username", "maria")]);
        let result = AuthUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn rejects_malformed_user_id() {
        let mut parts =
            parts_with_headers(&[("X-User-Id", "not-a-uuid"), ("X-Username", "maria")]);
        let result = AuthUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn rejects_missing_username() {
        let user_id = Uuid::new_v4().to_string();
        let mut parts = parts_with_headers(&[("X-User-Id", &user_id)]);
        let result = AuthUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
