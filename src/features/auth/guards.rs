//! Role-based authorization guards.
//!
//! The auth middleware attaches an [`AuthenticatedUser`] to the request; guards
//! read it back and check roles before the handler body runs.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for back-office handlers. Only users with the "admin" role pass.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn run_guard(user: Option<AuthenticatedUser>) -> Result<RequireAdmin, AppError> {
        let mut request = Request::builder().uri("/").body(()).unwrap();
        if let Some(user) = user {
            request.extensions_mut().insert(user);
        }
        let (mut parts, _) = request.into_parts();
        RequireAdmin::from_request_parts(&mut parts, &()).await
    }

    fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "sub-1".to_string(),
            email: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_missing_user_is_unauthorized() {
        assert!(matches!(run_guard(None).await, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden() {
        let result = run_guard(Some(user_with_roles(&["staff"]))).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_admin_passes() {
        let RequireAdmin(user) = run_guard(Some(user_with_roles(&["staff", "admin"])))
            .await
            .unwrap();
        assert_eq!(user.sub, "sub-1");
    }
}
