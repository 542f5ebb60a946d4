//! JWT token handling

use crate::config::JwtConfig;
use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const IDENTITY_AUDIENCE: &str = "todo-api";
const IDENTITY_TOKEN_TYPE: &str = "identity";

/// Identity Token claims (issued after authentication)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Email
    pub email: String,
    /// Username
    pub name: String,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Token type discriminator
    #[serde(default)]
    pub token_type: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// JWT token manager
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Validation with a 5 second leeway instead of the default 60 seconds
    fn strict_validation(&self) -> Validation {
        let mut v = Validation::new(Algorithm::HS256);
        v.leeway = 5;
        v
    }

    /// Create an identity token
    pub fn create_identity_token(&self, user_id: Uuid, email: &str, name: &str) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.access_token_ttl_secs);

        let claims = IdentityClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            iss: self.config.issuer.clone(),
            aud: IDENTITY_AUDIENCE.to_string(),
            token_type: IDENTITY_TOKEN_TYPE.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        let header = Header::new(Algorithm::HS256);
        encode(&header, &claims, &self.encoding_key).map_err(|e| AppError::Internal(e.into()))
    }

    /// Verify and decode an identity token
    pub fn verify_identity_token(&self, token: &str) -> Result<IdentityClaims> {
        let mut validation = self.strict_validation();
        validation.set_audience(&[IDENTITY_AUDIENCE]);
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<IdentityClaims>(token, &self.decoding_key, &validation)?;
        if token_data.claims.token_type != IDENTITY_TOKEN_TYPE {
            return Err(AppError::Unauthorized("Unexpected token type".to_string()));
        }
        Ok(token_data.claims)
    }
}
