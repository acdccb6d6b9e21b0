use super::jwt::JwtClaims;
use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// Roles allowed to manage products and stocks
pub const SELLER_OR_ADMIN: &[&str] = &["SELLER", "ADMIN"];

/// Authenticated caller, read from the claims that
/// [`optional_jwt_auth_middleware`](super::optional_jwt_auth_middleware) attached.
///
/// Rejects anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub JwtClaims);

impl CurrentUser {
    pub fn user_id(&self) -> Uuid {
        self.0.sub
    }

    pub fn claims(&self) -> &JwtClaims {
        &self.0
    }

    /// 403 unless the caller holds at least one of `roles`
    pub fn require_any_role(&self, roles: &[&str]) -> Result<(), AppError> {
        if roles.iter().any(|role| self.0.has_role(role)) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "One of {} roles is required",
                roles.join(", ")
            )))
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<JwtClaims>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtAuth, JwtConfig, optional_jwt_auth_middleware};
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
    };
    use tower::ServiceExt;

    fn app(auth: JwtAuth) -> Router {
        Router::new()
            .route(
                "/me",
                get(|user: CurrentUser| async move { user.user_id().to_string() }),
            )
            .route(
                "/sellers-only",
                get(|user: CurrentUser| async move {
                    user.require_any_role(&["SELLER", "ADMIN"]).map(|_| "ok")
                }),
            )
            .layer(from_fn_with_state(auth, optional_jwt_auth_middleware))
    }

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("test-secret-that-is-at-least-32-characters"))
    }

    fn get_with_token(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_anonymous_is_401() {
        let response = app(auth()).oneshot(get_with_token("/me", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_401() {
        let response = app(auth())
            .oneshot(get_with_token("/me", Some("forged")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_is_accepted() {
        let auth = auth();
        let token = auth
            .create_access_token(Uuid::now_v7(), "c@example.com", "C", &["CUSTOMER".into()])
            .unwrap();

        let response = app(auth).oneshot(get_with_token("/me", Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_role_is_403() {
        let auth = auth();
        let customer = auth
            .create_access_token(Uuid::now_v7(), "c@example.com", "C", &["CUSTOMER".into()])
            .unwrap();
        let seller = auth
            .create_access_token(Uuid::now_v7(), "s@example.com", "S", &["SELLER".into()])
            .unwrap();

        let app = app(auth);
        let response = app
            .clone()
            .oneshot(get_with_token("/sellers-only", Some(&customer)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .oneshot(get_with_token("/sellers-only", Some(&seller)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
