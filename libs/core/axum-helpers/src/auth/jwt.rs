use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// User id
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    /// Upper-case role names, e.g. `SELLER`
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl JwtClaims {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }
}

/// Stateless HS256 token minting and verification
#[derive(Clone)]
pub struct JwtAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(ttl_secs = config.ttl_secs, "JWT auth initialized");
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl_secs: config.ttl_secs,
        }
    }

    /// Access token lifetime in seconds, reported to clients as `expires_in`
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    pub fn create_access_token(
        &self,
        user_id: Uuid,
        email: &str,
        name: &str,
        roles: &[String],
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id,
            email: email.to_string(),
            name: name.to_string(),
            roles: roles.to_vec(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// Check signature and expiry, then decode claims
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, jsonwebtoken::errors::Error> {
        let token_data = decode::<JwtClaims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuth")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("test-secret-that-is-at-least-32-characters"))
    }

    #[test]
    fn test_create_and_verify_token() {
        let auth = auth();
        let user_id = Uuid::now_v7();
        let token = auth
            .create_access_token(user_id, "jane@example.com", "Jane", &["SELLER".to_string()])
            .unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "jane@example.com");
        assert!(claims.has_role("seller"));
        assert!(!claims.has_role("ADMIN"));
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_rejects_token_signed_with_other_secret() {
        let other = JwtAuth::new(&JwtConfig::new("another-secret-that-is-at-least-32-chars"));
        let token = other
            .create_access_token(Uuid::now_v7(), "a@b.com", "A", &[])
            .unwrap();

        assert!(auth().verify_token(&token).is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let auth = JwtAuth::new(
            &JwtConfig::new("test-secret-that-is-at-least-32-characters").with_ttl_secs(-3600),
        );
        let token = auth
            .create_access_token(Uuid::now_v7(), "a@b.com", "A", &[])
            .unwrap();

        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(auth().verify_token("not.a.jwt").is_err());
    }
}
