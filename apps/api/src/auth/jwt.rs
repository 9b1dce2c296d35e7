use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::AppError;
use crate::state::AppState;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The user's email.
    pub sub: String,
    /// Database id, or a placeholder for mock and debug identities.
    pub id: String,
    pub exp: usize,
    pub iat: usize,
}

/// Issues and validates signed bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiration: Duration,
}

impl TokenService {
    pub fn new(config: &Config) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            expiration: Duration::minutes(config.access_token_expire_minutes),
        }
    }

    pub fn issue(&self, email: &str, id: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            id: id.to_string(),
            exp: (now + self.expiration).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding)
    }

    pub fn validate(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        decode::<Claims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}

/// Extractor for routes that require `Authorization: Bearer <token>`.
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        state
            .tokens
            .validate(token.trim())
            .map(AuthUser)
            .map_err(|e| {
                tracing::debug!("Rejected bearer token: {e}");
                AppError::Unauthorized
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(minutes: i64) -> TokenService {
        TokenService::new(&Config {
            jwt_secret: "test_secret".to_string(),
            access_token_expire_minutes: minutes,
            ..Config::default()
        })
    }

    #[test]
    fn test_issued_token_validates() {
        let tokens = service(30);
        let token = tokens.issue("a@b.com", "42").unwrap();
        let claims = tokens.validate(&token).unwrap();
        assert_eq!(claims.sub, "a@b.com");
        assert_eq!(claims.id, "42");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = service(-10);
        let token = tokens.issue("a@b.com", "42").unwrap();
        assert!(tokens.validate(&token).is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let token = service(30).issue("a@b.com", "42").unwrap();
        let other = TokenService::new(&Config {
            jwt_secret: "different".to_string(),
            ..Config::default()
        });
        assert!(other.validate(&token).is_err());
    }
}
