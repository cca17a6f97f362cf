//! Signed bearer tokens (HS256 JWT).

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AuthConfig;
use crate::db::User;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token is invalid or expired: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// Claims embedded in every issued token.
///
/// Identity fields are optional on the way in: a token signed by us always
/// carries them, but resolution must cope with their absence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Alternate subject claim some issuers use instead of `sub`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nameid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    ttl_seconds: i64,
}

impl TokenService {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        let secret = if config.jwt_secret.is_empty() {
            tracing::warn!(
                "auth.jwt_secret is not set; using a random key, tokens will not survive a restart"
            );
            generate_secret()
        } else {
            config.jwt_secret.clone()
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl_seconds: i64::from(config.token_ttl_minutes) * 60,
        }
    }

    /// Signs a token for `user` valid for the configured lifetime.
    pub fn issue(&self, user: &User) -> Result<IssuedToken, TokenError> {
        let now = chrono::Utc::now().timestamp();
        let expires_at = now + self.ttl_seconds;

        let claims = Claims {
            sub: Some(user.id.to_string()),
            nameid: None,
            email: Some(user.email.clone()),
            role: Some(user.role.as_str().to_string()),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now,
            exp: expires_at,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Checks signature, issuer, audience and expiry.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

/// Random 64 character hex string
fn generate_secret() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();

    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}
