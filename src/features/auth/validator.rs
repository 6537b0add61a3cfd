use super::model::{AuthenticatedUser, CustomClaims};
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::jwks::JwksClient;

/// Claim name under which the identity provider publishes storefront roles
const CUSTOM_CLAIMS_NAMESPACE: &str = "https://storefront.app/claims";

pub struct JwtValidator {
    jwks_client: Arc<JwksClient>,
    issuer: String,
    audience: String,
    leeway: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl Claims {
    fn custom_claims(&self) -> CustomClaims {
        self.extra
            .get(CUSTOM_CLAIMS_NAMESPACE)
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default()
    }

    fn into_user(self) -> AuthenticatedUser {
        let roles = self.custom_claims().roles;
        AuthenticatedUser {
            sub: self.sub,
            email: self.email,
            roles,
        }
    }
}

impl JwtValidator {
    pub fn new(
        jwks_client: Arc<JwksClient>,
        issuer: String,
        audience: String,
        leeway: Duration,
    ) -> Self {
        Self {
            jwks_client,
            issuer,
            audience,
            leeway: leeway.as_secs(),
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        if header.alg != Algorithm::RS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only RS256 is allowed",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AppError::Auth("Missing kid in token header".to_string()))?;

        let decoding_key = self
            .jwks_client
            .get_key(&kid)
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        Ok(token_data.claims.into_user())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(json: serde_json::Value) -> Claims {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_roles_read_from_namespaced_claim() {
        let user = claims(serde_json::json!({
            "sub": "user-1",
            "email": "owner@shop.test",
            "https://storefront.app/claims": { "roles": ["admin"] }
        }))
        .into_user();

        assert_eq!(user.sub, "user-1");
        assert_eq!(user.email.as_deref(), Some("owner@shop.test"));
        assert!(user.is_admin());
    }

    #[test]
    fn test_missing_or_malformed_claims_yield_no_roles() {
        let user = claims(serde_json::json!({ "sub": "user-2" })).into_user();
        assert!(user.roles.is_empty());

        let user = claims(serde_json::json!({
            "sub": "user-3",
            "https://storefront.app/claims": "admin"
        }))
        .into_user();
        assert!(user.roles.is_empty());
    }
}
